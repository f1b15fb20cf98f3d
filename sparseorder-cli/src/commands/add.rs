//! Add item command.

use sparseorder_core::{CollectionId, ItemId, OrderError, SnapshotReader};

use crate::error::CliError;
use crate::util::{Context, open_store, runtime, save_layout};

/// Add command handler
///
/// Appends the item at the collection's next position. With `folder`, the
/// item also gets its own (empty) collection.
pub fn cmd_add(
    ctx: &Context,
    collection: CollectionId,
    item: Option<ItemId>,
    folder: bool,
) -> Result<(), CliError> {
    if folder && !collection.is_root() {
        return Err(CliError::Invalid(
            "folders can only be added to the root collection".to_string(),
        ));
    }

    let store = open_store(ctx)?;
    let reader = SnapshotReader::new(store.clone(), ctx.settings.step);
    let id = item.unwrap_or_else(uuid::Uuid::new_v4);

    runtime()?.block_on(async {
        let position = reader.next_position(&collection).await?;
        store
            .insert(collection, id, position)
            .await
            .map_err(OrderError::from)?;
        if folder {
            store.create_collection(CollectionId::Folder(id)).await;
        }
        save_layout(&ctx.layout_path, &store.layout().await)?;

        tracing::info!(
            item = %id,
            collection = %collection,
            position = %position,
            "Item added"
        );
        ctx.say(&format!("Added {id} to {collection} at position {position}"));
        Ok::<(), CliError>(())
    })
}
