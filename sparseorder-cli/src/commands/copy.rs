//! Copy item command.

use sparseorder_core::{Anchor, CollectionId, ItemId, Side};

use crate::error::CliError;
use crate::util::{Context, commit, executor_for, open_store, runtime};

/// Copy command handler
pub fn cmd_copy(
    ctx: &Context,
    item: ItemId,
    to: CollectionId,
    anchor: Anchor,
    side: Side,
) -> Result<(), CliError> {
    let store = open_store(ctx)?;
    let (executor, refresher) = executor_for(ctx, &store);

    runtime()?.block_on(async {
        let position = executor.copy_to_collection(item, to, anchor, side).await?;
        commit(ctx, &store, &refresher).await?;
        ctx.say(&format!("Copied {item} to {to} at position {position}"));
        Ok::<(), CliError>(())
    })
}
