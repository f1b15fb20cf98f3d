//! Move item command.

use sparseorder_core::{Anchor, CollectionId, ItemId, Side};

use crate::error::CliError;
use crate::util::{Context, commit, executor_for, open_store, runtime};

/// Move command handler
pub fn cmd_move(
    ctx: &Context,
    item: ItemId,
    from: CollectionId,
    to: CollectionId,
    anchor: Anchor,
    side: Side,
) -> Result<(), CliError> {
    let store = open_store(ctx)?;
    let (executor, refresher) = executor_for(ctx, &store);

    runtime()?.block_on(async {
        let position = executor
            .move_to_collection(item, from, to, anchor, side)
            .await?;
        commit(ctx, &store, &refresher).await?;
        ctx.say(&format!("Moved {item} to {to} at position {position}"));
        Ok::<(), CliError>(())
    })
}
