//! Renumber collection command.

use sparseorder_core::{CollectionId, PositionResolver};

use crate::error::CliError;
use crate::util::{Context, open_store, runtime, save_layout};

/// Cleanup command handler
pub fn cmd_cleanup(ctx: &Context, collection: CollectionId) -> Result<(), CliError> {
    let store = open_store(ctx)?;
    let resolver = PositionResolver::new(store.clone(), ctx.settings.step);

    runtime()?.block_on(async {
        resolver.cleanup(&collection).await?;
        let count = resolver.reader().read(&collection).await?.len();
        save_layout(&ctx.layout_path, &store.layout().await)?;
        ctx.say(&format!("Renumbered {count} item(s) in {collection}"));
        Ok::<(), CliError>(())
    })
}
