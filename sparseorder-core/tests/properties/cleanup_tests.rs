//! Property-based tests for the cleanup-and-retry protocol
//!
//! Moves are executed against an in-memory store whose collection may be
//! arbitrarily dense; at most one renumber is ever needed.

use std::sync::Arc;

use proptest::prelude::*;
use sparseorder_core::{
    Anchor, CleanupBudget, CollectionId, MAX_CLEANUPS, MemoryStore, MoveExecutor, NoopRefresher,
    OrderStore, Position, Side,
};
use uuid::Uuid;

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("test runtime")
}

/// Strategy for ascending positions with mostly adjacent neighbours
fn dense_positions() -> impl Strategy<Value = Vec<u64>> {
    (1u64..50, prop::collection::vec(prop_oneof![3 => Just(1u64), 1 => 2u64..100], 1..25))
        .prop_map(|(first, gaps)| {
            let mut positions = vec![first];
            for gap in gaps {
                let last = positions[positions.len() - 1];
                positions.push(last + gap);
            }
            positions
        })
}

fn side_strategy() -> impl Strategy<Value = Side> {
    prop_oneof![Just(Side::Before), Just(Side::After)]
}

/// Order the collection should have after moving `moved` next to `anchor`
fn expected_order(ids: &[Uuid], moved: usize, anchor: usize, side: Side) -> Vec<Uuid> {
    let mut order: Vec<Uuid> = ids.to_vec();
    let item = order.remove(moved);
    let anchor_at = order
        .iter()
        .position(|id| *id == ids[anchor])
        .expect("anchor stays in list");
    let insert_at = match side {
        Side::Before => anchor_at,
        Side::After => anchor_at + 1,
    };
    order.insert(insert_at, item);
    order
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Moving any item next to any other lands it exactly there, whatever the
    /// density of the collection.
    #[test]
    fn prop_move_lands_next_to_anchor(
        positions in dense_positions(),
        moved_seed in any::<prop::sample::Index>(),
        anchor_seed in any::<prop::sample::Index>(),
        side in side_strategy(),
    ) {
        let moved = moved_seed.index(positions.len());
        let anchor = anchor_seed.index(positions.len());
        prop_assume!(moved != anchor);

        let (ids, after) = runtime().block_on(async {
            let store = Arc::new(MemoryStore::new());
            let mut ids = Vec::new();
            for p in &positions {
                let id = Uuid::new_v4();
                store.insert(CollectionId::Root, id, Position::new(*p)).await.unwrap();
                ids.push(id);
            }
            let executor = MoveExecutor::new(store.clone(), Arc::new(NoopRefresher), 1000);
            executor
                .move_item(ids[moved], CollectionId::Root, Anchor::Item(ids[anchor]), side)
                .await
                .unwrap();
            let after = store.read_snapshot(&CollectionId::Root).await.unwrap();
            (ids, after)
        });

        let order: Vec<Uuid> = after.iter().map(|e| e.id).collect();
        prop_assert_eq!(order, expected_order(&ids, moved, anchor, side));
        prop_assert!(after.windows(2).all(|w| w[0].position < w[1].position));
    }

    /// Resolution never spends more than one cleanup.
    #[test]
    fn prop_resolution_spends_at_most_one_cleanup(
        positions in dense_positions(),
        anchor_seed in any::<prop::sample::Index>(),
        side in side_strategy(),
    ) {
        let anchor = anchor_seed.index(positions.len());

        let cleanups = runtime().block_on(async {
            let store = Arc::new(MemoryStore::new());
            let mut ids = Vec::new();
            for p in &positions {
                let id = Uuid::new_v4();
                store.insert(CollectionId::Root, id, Position::new(*p)).await.unwrap();
                ids.push(id);
            }
            let executor = MoveExecutor::new(store, Arc::new(NoopRefresher), 1000);
            executor
                .resolver()
                .resolve_detailed(&CollectionId::Root, Anchor::Item(ids[anchor]), side, None)
                .await
                .unwrap()
                .cleanups
        });

        prop_assert!(cleanups <= MAX_CLEANUPS);
    }

    /// The budget refuses every spend past the cap.
    #[test]
    fn prop_budget_is_capped(attempts in 0u32..20) {
        let mut budget = CleanupBudget::new();
        let granted = (0..attempts).filter(|_| budget.try_spend()).count();
        prop_assert_eq!(granted, attempts.min(MAX_CLEANUPS) as usize);
        prop_assert_eq!(budget.spent(), attempts.min(MAX_CLEANUPS));
    }
}
