//! Cleanup-and-retry behaviour, including misbehaving stores

use std::collections::BTreeMap;

use sparseorder_core::{
    Anchor, CollectionId, Layout, MemoryStore, OrderError, Position, PositionResolver, Side,
    SiblingEntry, StoreError,
};
use uuid::Uuid;

use super::support::{Fault, FaultyStore, order, positions, seed};

#[tokio::test]
async fn test_store_that_never_renumbers_fails_after_one_cleanup() {
    let memory = MemoryStore::new();
    let ids = seed(&memory, CollectionId::Root, &[1000, 1001]).await;
    let store = FaultyStore::new(memory, Fault::NoopRenumber);
    let resolver = PositionResolver::new(store.clone(), 1000);

    let err = resolver
        .resolve(&CollectionId::Root, Anchor::Item(ids[0]), Side::After, None)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        OrderError::PositionSpaceExhausted { collection: CollectionId::Root }
    ));
    assert_eq!(store.renumber_calls(), 1);
    assert_eq!(positions(store.as_ref(), CollectionId::Root).await, vec![1000, 1001]);
}

#[tokio::test]
async fn test_renumber_failure_is_propagated() {
    let memory = MemoryStore::new();
    let ids = seed(&memory, CollectionId::Root, &[7]).await;
    let store = FaultyStore::new(memory, Fault::FailRenumber);
    let resolver = PositionResolver::new(store.clone(), 1000);

    let appended = resolver
        .resolve(&CollectionId::Root, Anchor::Item(ids[0]), Side::After, None)
        .await;
    assert!(appended.is_ok(), "appending never needs a renumber");

    let halved = resolver
        .resolve(&CollectionId::Root, Anchor::Item(ids[0]), Side::Before, None)
        .await;
    assert!(halved.is_ok(), "7 halves to 3");

    let memory = MemoryStore::new();
    let ids = seed(&memory, CollectionId::Root, &[1, 2]).await;
    let store = FaultyStore::new(memory, Fault::FailRenumber);
    let resolver = PositionResolver::new(store.clone(), 1000);

    let err = resolver
        .resolve(&CollectionId::Root, Anchor::Item(ids[1]), Side::Before, None)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        OrderError::Store(StoreError::Unavailable(ref message))
            if message == "cleanup endpoint down"
    ));
    assert_eq!(store.renumber_calls(), 1);
}

#[tokio::test]
async fn test_snapshot_is_reread_after_renumber() {
    let memory = MemoryStore::new();
    let ids = seed(&memory, CollectionId::Root, &[1000, 1001]).await;
    let store = FaultyStore::new(memory, Fault::None);
    let resolver = PositionResolver::new(store.clone(), 1000);

    resolver
        .resolve(&CollectionId::Root, Anchor::Item(ids[0]), Side::After, None)
        .await
        .unwrap();

    assert_eq!(store.events(), vec!["read", "renumber", "read"]);
}

#[tokio::test]
async fn test_renumber_preserves_order() {
    let memory = MemoryStore::new();
    let ids = seed(&memory, CollectionId::Root, &[3, 4, 5, 900]).await;
    let store = FaultyStore::new(memory, Fault::None);
    let resolver = PositionResolver::new(store.clone(), 1000);

    resolver.cleanup(&CollectionId::Root).await.unwrap();

    assert_eq!(order(store.as_ref(), CollectionId::Root).await, ids);
    assert_eq!(
        positions(store.as_ref(), CollectionId::Root).await,
        vec![1000, 2000, 3000, 4000]
    );
}

#[tokio::test]
async fn test_renumber_uses_store_step() {
    let memory = MemoryStore::with_step(10);
    let ids = seed(&memory, CollectionId::Root, &[5, 6]).await;
    let store = FaultyStore::new(memory, Fault::None);
    let resolver = PositionResolver::new(store.clone(), 10);

    let position = resolver
        .resolve(&CollectionId::Root, Anchor::Item(ids[1]), Side::Before, None)
        .await
        .unwrap();

    assert_eq!(positions(store.as_ref(), CollectionId::Root).await, vec![10, 20]);
    assert_eq!(position, Position::new(15));
}

#[tokio::test]
async fn test_duplicate_positions_are_corrupt() {
    let folder = CollectionId::Folder(Uuid::new_v4());
    let mut collections = BTreeMap::new();
    collections.insert(
        folder,
        vec![
            SiblingEntry::new(Uuid::new_v4(), Position::new(100)),
            SiblingEntry::new(Uuid::new_v4(), Position::new(100)),
        ],
    );
    let memory = MemoryStore::from_layout(Layout { collections }, 1000);
    let store = FaultyStore::new(memory, Fault::None);
    let resolver = PositionResolver::new(store.clone(), 1000);

    let err = resolver
        .resolve(&folder, Anchor::End, Side::After, None)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        OrderError::CorruptSnapshot { collection, .. } if collection == folder
    ));
    assert_eq!(store.renumber_calls(), 0);
}

#[tokio::test]
async fn test_each_resolution_gets_its_own_budget() {
    let memory = MemoryStore::new();
    let ids = seed(&memory, CollectionId::Root, &[1, 2]).await;
    let store = FaultyStore::new(memory, Fault::None);
    let resolver = PositionResolver::new(store.clone(), 1000);

    let first = resolver
        .resolve_detailed(&CollectionId::Root, Anchor::Item(ids[0]), Side::After, None)
        .await
        .unwrap();
    assert_eq!(first.cleanups, 1);

    // Make the collection dense again and resolve once more.
    store
        .inner
        .insert(CollectionId::Root, Uuid::new_v4(), Position::new(1001))
        .await
        .unwrap();
    let second = resolver
        .resolve_detailed(&CollectionId::Root, Anchor::Item(ids[0]), Side::After, None)
        .await
        .unwrap();

    assert_eq!(second.cleanups, 1);
    assert_eq!(store.renumber_calls(), 2);
}
