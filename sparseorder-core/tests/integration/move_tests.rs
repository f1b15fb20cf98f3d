//! Move, copy and drop execution

use std::sync::Arc;

use sparseorder_core::{
    Anchor, CollectionId, DropPosition, DropTarget, ItemKind, MemoryStore, MoveExecutor,
    OrderError, Position, RecordingRefresher, Side, StoreError,
};
use uuid::Uuid;

use super::support::{Fault, FaultyStore, order, positions, seed};

fn executor_over(store: &Arc<FaultyStore>) -> (MoveExecutor, Arc<RecordingRefresher>) {
    let refresher = Arc::new(RecordingRefresher::new());
    let executor = MoveExecutor::new(store.clone(), refresher.clone(), 1000);
    (executor, refresher)
}

#[tokio::test]
async fn test_move_within_collection() {
    let memory = MemoryStore::new();
    let ids = seed(&memory, CollectionId::Root, &[1000, 2000, 3000]).await;
    let store = FaultyStore::new(memory, Fault::None);
    let (executor, refresher) = executor_over(&store);

    let position = executor
        .move_item(ids[2], CollectionId::Root, Anchor::Item(ids[1]), Side::Before)
        .await
        .unwrap();

    assert_eq!(position.get(), 1500);
    assert_eq!(
        order(store.as_ref(), CollectionId::Root).await,
        vec![ids[0], ids[2], ids[1]]
    );
    assert_eq!(refresher.reloads(), vec![CollectionId::Root]);
    assert_eq!(store.persist_calls(), 1);
}

#[tokio::test]
async fn test_move_into_own_old_slot_is_accepted() {
    let memory = MemoryStore::new();
    let ids = seed(&memory, CollectionId::Root, &[1000, 2000, 3000]).await;
    let store = FaultyStore::new(memory, Fault::None);
    let (executor, _) = executor_over(&store);

    let position = executor
        .move_item(ids[1], CollectionId::Root, Anchor::Item(ids[0]), Side::After)
        .await
        .unwrap();

    assert_eq!(position.get(), 2000);
    assert_eq!(order(store.as_ref(), CollectionId::Root).await, ids);
}

#[tokio::test]
async fn test_move_into_dense_gap_renumbers_then_persists() {
    let memory = MemoryStore::new();
    let ids = seed(&memory, CollectionId::Root, &[1000, 1001, 1002]).await;
    let store = FaultyStore::new(memory, Fault::None);
    let (executor, refresher) = executor_over(&store);

    let position = executor
        .move_item(ids[2], CollectionId::Root, Anchor::Item(ids[0]), Side::After)
        .await
        .unwrap();

    assert_eq!(position.get(), 1500);
    assert_eq!(store.renumber_calls(), 1);
    assert_eq!(
        positions(store.as_ref(), CollectionId::Root).await,
        vec![1000, 1500, 2000]
    );
    assert_eq!(
        order(store.as_ref(), CollectionId::Root).await,
        vec![ids[0], ids[2], ids[1]]
    );
    assert_eq!(
        store.events(),
        vec!["read", "renumber", "read", "persist"]
    );
    assert_eq!(refresher.reloads(), vec![CollectionId::Root]);
}

#[tokio::test]
async fn test_move_between_collections_refreshes_both() {
    let memory = MemoryStore::new();
    let source = CollectionId::Folder(Uuid::new_v4());
    let destination = CollectionId::Folder(Uuid::new_v4());
    let moved = seed(&memory, source, &[1000, 2000]).await;
    let resident = seed(&memory, destination, &[1000]).await;
    let store = FaultyStore::new(memory, Fault::None);
    let (executor, refresher) = executor_over(&store);

    let position = executor
        .move_to_collection(
            moved[0],
            source,
            destination,
            Anchor::Item(resident[0]),
            Side::Before,
        )
        .await
        .unwrap();

    assert_eq!(position.get(), 500);
    assert_eq!(order(store.as_ref(), source).await, vec![moved[1]]);
    assert_eq!(
        order(store.as_ref(), destination).await,
        vec![moved[0], resident[0]]
    );
    assert_eq!(refresher.reloads(), vec![source, destination]);
}

#[tokio::test]
async fn test_persist_failure_leaves_lists_untouched() {
    let memory = MemoryStore::new();
    let ids = seed(&memory, CollectionId::Root, &[1000, 2000]).await;
    let store = FaultyStore::new(memory, Fault::FailPersist);
    let (executor, refresher) = executor_over(&store);

    let err = executor
        .move_item(ids[1], CollectionId::Root, Anchor::Start, Side::Before)
        .await
        .unwrap_err();

    assert!(matches!(err, OrderError::Store(StoreError::Io(_))));
    assert_eq!(store.persist_calls(), 1);
    assert!(refresher.reloads().is_empty());
    assert_eq!(positions(store.as_ref(), CollectionId::Root).await, vec![1000, 2000]);
}

#[tokio::test]
async fn test_exhaustion_failure_persists_nothing() {
    let memory = MemoryStore::new();
    let ids = seed(&memory, CollectionId::Root, &[1, 2, 3]).await;
    let store = FaultyStore::new(memory, Fault::NoopRenumber);
    let (executor, refresher) = executor_over(&store);

    let err = executor
        .move_item(ids[2], CollectionId::Root, Anchor::Item(ids[0]), Side::After)
        .await
        .unwrap_err();

    assert!(matches!(err, OrderError::PositionSpaceExhausted { .. }));
    assert_eq!(store.persist_calls(), 0);
    assert!(refresher.reloads().is_empty());
}

#[tokio::test]
async fn test_anchor_on_moved_item_is_rejected() {
    let memory = MemoryStore::new();
    let ids = seed(&memory, CollectionId::Root, &[1000]).await;
    let store = FaultyStore::new(memory, Fault::None);
    let (executor, refresher) = executor_over(&store);

    let err = executor
        .move_item(ids[0], CollectionId::Root, Anchor::Item(ids[0]), Side::After)
        .await
        .unwrap_err();

    assert!(matches!(err, OrderError::SelfAnchor(id) if id == ids[0]));
    assert!(store.events().is_empty());
    assert!(refresher.reloads().is_empty());
}

#[tokio::test]
async fn test_copy_keeps_source_and_rejects_duplicates() {
    let memory = MemoryStore::new();
    let source = CollectionId::Folder(Uuid::new_v4());
    let destination = CollectionId::Folder(Uuid::new_v4());
    let items = seed(&memory, source, &[1000]).await;
    seed(&memory, destination, &[1000, 2000]).await;
    let store = FaultyStore::new(memory, Fault::None);
    let (executor, refresher) = executor_over(&store);

    let position = executor
        .copy_to_collection(items[0], destination, Anchor::End, Side::After)
        .await
        .unwrap();

    assert_eq!(position.get(), 3000);
    assert_eq!(order(store.as_ref(), source).await, items);
    assert_eq!(positions(store.as_ref(), destination).await, vec![1000, 2000, 3000]);
    assert_eq!(refresher.reloads(), vec![destination]);

    let err = executor
        .copy_to_collection(items[0], destination, Anchor::Start, Side::Before)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        OrderError::DuplicateItem { collection, .. } if collection == destination
    ));
    assert_eq!(store.persist_calls(), 1);
}

#[tokio::test]
async fn test_drop_into_folder_appends() {
    let memory = MemoryStore::new();
    let folders = seed(&memory, CollectionId::Root, &[1000, 2000]).await;
    let from = CollectionId::Folder(folders[0]);
    let to = CollectionId::Folder(folders[1]);
    let sources = seed(&memory, from, &[1000]).await;
    seed(&memory, to, &[1000, 4000]).await;
    let store = FaultyStore::new(memory, Fault::None);
    let (executor, refresher) = executor_over(&store);

    let target = DropTarget {
        collection: CollectionId::Root,
        item: folders[1],
        kind: ItemKind::Folder,
        position: DropPosition::Into,
    };
    let position = executor.apply_drop(sources[0], from, &target).await.unwrap();

    assert_eq!(position.map(|p| p.get()), Some(5000));
    assert!(order(store.as_ref(), from).await.is_empty());
    assert_eq!(refresher.reloads(), vec![from, to]);
}

#[tokio::test]
async fn test_drop_before_row_reorders() {
    let memory = MemoryStore::new();
    let ids = seed(&memory, CollectionId::Root, &[1000, 2000, 3000]).await;
    let store = FaultyStore::new(memory, Fault::None);
    let (executor, _) = executor_over(&store);

    let target = DropTarget {
        collection: CollectionId::Root,
        item: ids[0],
        kind: ItemKind::Folder,
        position: DropPosition::Before,
    };
    let position = executor
        .apply_drop(ids[2], CollectionId::Root, &target)
        .await
        .unwrap();

    assert_eq!(position.map(|p| p.get()), Some(500));
    assert_eq!(
        order(store.as_ref(), CollectionId::Root).await,
        vec![ids[2], ids[0], ids[1]]
    );
}

#[tokio::test]
async fn test_inapplicable_drops_change_nothing() {
    let memory = MemoryStore::new();
    let folders = seed(&memory, CollectionId::Root, &[1000]).await;
    let folder = CollectionId::Folder(folders[0]);
    let sources = seed(&memory, folder, &[1000, 2000]).await;
    let store = FaultyStore::new(memory, Fault::None);
    let (executor, refresher) = executor_over(&store);

    let into_leaf = DropTarget {
        collection: folder,
        item: sources[1],
        kind: ItemKind::Leaf,
        position: DropPosition::Into,
    };
    assert_eq!(
        executor.apply_drop(sources[0], folder, &into_leaf).await.unwrap(),
        None
    );

    let onto_itself = DropTarget {
        collection: folder,
        item: sources[0],
        kind: ItemKind::Leaf,
        position: DropPosition::After,
    };
    assert_eq!(
        executor.apply_drop(sources[0], folder, &onto_itself).await.unwrap(),
        None
    );

    let folder_into_itself = DropTarget {
        collection: CollectionId::Root,
        item: folders[0],
        kind: ItemKind::Folder,
        position: DropPosition::Into,
    };
    assert_eq!(
        executor
            .apply_drop(folders[0], CollectionId::Root, &folder_into_itself)
            .await
            .unwrap(),
        None
    );

    assert!(store.events().is_empty());
    assert!(refresher.reloads().is_empty());
}

#[tokio::test]
async fn test_remove_keeps_other_collections_and_positions() {
    let memory = MemoryStore::new();
    let source = CollectionId::Folder(Uuid::new_v4());
    let other = CollectionId::Folder(Uuid::new_v4());
    let items = seed(&memory, source, &[1000, 2000, 3000]).await;
    seed(&memory, other, &[]).await;
    memory.insert(other, items[1], Position::new(1000)).await.unwrap();
    let store = FaultyStore::new(memory, Fault::None);
    let (executor, refresher) = executor_over(&store);

    executor.remove_from_collection(items[1], source).await.unwrap();

    assert_eq!(order(store.as_ref(), source).await, vec![items[0], items[2]]);
    assert_eq!(positions(store.as_ref(), source).await, vec![1000, 3000]);
    assert_eq!(order(store.as_ref(), other).await, vec![items[1]]);
    assert_eq!(refresher.reloads(), vec![source]);
    assert_eq!(store.events(), vec!["persist"]);
}

#[tokio::test]
async fn test_remove_missing_item_is_not_found() {
    let memory = MemoryStore::new();
    seed(&memory, CollectionId::Root, &[1000]).await;
    let store = FaultyStore::new(memory, Fault::None);
    let (executor, refresher) = executor_over(&store);

    let err = executor
        .remove_from_collection(Uuid::new_v4(), CollectionId::Root)
        .await
        .unwrap_err();

    assert!(matches!(err, OrderError::Store(StoreError::ItemNotFound { .. })));
    assert!(err.is_not_found());
    assert!(refresher.reloads().is_empty());
}

#[tokio::test]
async fn test_remove_failure_leaves_list_untouched() {
    let memory = MemoryStore::new();
    let ids = seed(&memory, CollectionId::Root, &[1000, 2000]).await;
    let store = FaultyStore::new(memory, Fault::FailPersist);
    let (executor, refresher) = executor_over(&store);

    let err = executor
        .remove_from_collection(ids[0], CollectionId::Root)
        .await
        .unwrap_err();

    assert!(matches!(err, OrderError::Store(StoreError::Io(_))));
    assert!(refresher.reloads().is_empty());
    assert_eq!(order(store.as_ref(), CollectionId::Root).await, ids);
}
