//! Remove item command.

use sparseorder_core::{CollectionId, ItemId};

use crate::error::CliError;
use crate::util::{Context, commit, executor_for, open_store, runtime};

/// Remove command handler
///
/// Takes the item out of one collection only; copies filed elsewhere stay.
pub fn cmd_remove(ctx: &Context, item: ItemId, from: CollectionId) -> Result<(), CliError> {
    let store = open_store(ctx)?;
    let (executor, refresher) = executor_for(ctx, &store);

    runtime()?.block_on(async {
        executor.remove_from_collection(item, from).await?;
        commit(ctx, &store, &refresher).await?;
        ctx.say(&format!("Removed {item} from {from}"));
        Ok::<(), CliError>(())
    })
}
