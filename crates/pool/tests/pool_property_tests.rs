//! Property-based tests for pool invariants

mod common;

use common::{bitmap, unbounded_pool};
use proptest::prelude::*;
use std::collections::VecDeque;
use tilepool_pool::{create_strategy, BitmapId, LruPoolStrategy, PixelFormat, StrategyKind};

#[derive(Debug, Clone)]
enum Op {
    Put(u32, u32, PixelFormat),
    Get(u32, u32, PixelFormat),
    RemoveLast,
}

fn format_strategy() -> impl Strategy<Value = PixelFormat> {
    prop::sample::select(PixelFormat::ALL.to_vec())
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (1u32..48, 1u32..48, format_strategy()).prop_map(|(w, h, f)| Op::Put(w, h, f)),
        4 => (1u32..48, 1u32..48, format_strategy()).prop_map(|(w, h, f)| Op::Get(w, h, f)),
        1 => Just(Op::RemoveLast),
    ]
}

fn kind_strategy() -> impl Strategy<Value = StrategyKind> {
    prop_oneof![Just(StrategyKind::SizeConfig), Just(StrategyKind::Attribute)]
}

proptest! {
    #[test]
    fn test_exist_matches_get(
        kind in kind_strategy(),
        ops in prop::collection::vec(op_strategy(), 1..60)
    ) {
        let strategy = create_strategy(kind);

        for op in ops {
            match op {
                Op::Put(w, h, f) => strategy.put(bitmap(w, h, f)),
                Op::Get(w, h, f) => {
                    let expected = strategy.exist(w, h, f);
                    let got = strategy.get(w, h, f);
                    prop_assert_eq!(expected, got.is_some());
                    if let Some(b) = got {
                        prop_assert_eq!((b.width(), b.height(), b.format()), (w, h, f));
                        prop_assert!(strategy.get_size(&b) >= f.byte_size(w, h).unwrap());
                    }
                }
                Op::RemoveLast => {
                    let was_empty = strategy.is_empty();
                    prop_assert_eq!(strategy.remove_last().is_none(), was_empty);
                }
            }
        }
    }

    #[test]
    fn test_remove_last_follows_put_order(
        kind in kind_strategy(),
        ops in prop::collection::vec(op_strategy(), 1..60)
    ) {
        let strategy = create_strategy(kind);
        // Reference model: ids in put order, minus anything handed out
        let mut model: VecDeque<BitmapId> = VecDeque::new();

        for op in ops {
            match op {
                Op::Put(w, h, f) => {
                    let b = bitmap(w, h, f);
                    model.push_back(b.id());
                    strategy.put(b);
                }
                Op::Get(w, h, f) => {
                    if let Some(b) = strategy.get(w, h, f) {
                        let position = model.iter().position(|id| *id == b.id());
                        prop_assert!(position.is_some());
                        model.remove(position.unwrap());
                    }
                }
                Op::RemoveLast => {
                    prop_assert_eq!(strategy.remove_last().map(|b| b.id()), model.pop_front());
                }
            }
            prop_assert_eq!(strategy.len(), model.len());
        }

        while let Some(expected) = model.pop_front() {
            prop_assert_eq!(strategy.remove_last().map(|b| b.id()), Some(expected));
        }
        prop_assert!(strategy.remove_last().is_none());
    }

    #[test]
    fn test_round_trip_preserves_size(
        kind in kind_strategy(),
        w in 1u32..256,
        h in 1u32..256,
        f in format_strategy(),
        relayout in prop::option::of((1u32..=256, 1u32..=256, format_strategy()))
    ) {
        let pool = unbounded_pool(kind);
        let mut b = bitmap(w, h, f);
        // Tiles come back from `get` laid out smaller than their allocation
        if let Some((rw, rh, rf)) = relayout {
            let _ = b.reconfigure(rw.min(w), rh.min(h), rf);
        }
        let (w, h, f) = (b.width(), b.height(), b.format());
        let size = pool.get_size(&b);
        prop_assert_eq!(size, b.allocation_byte_count());
        let id = b.id();
        pool.put(b).unwrap();
        prop_assert!(pool.exist(w, h, f));

        let got = pool.get(w, h, f).unwrap();
        prop_assert!(got.is_some());
        let got = got.unwrap();
        prop_assert_eq!(got.id(), id);
        prop_assert_eq!(pool.get_size(&got), size);
        prop_assert!(!pool.exist(w, h, f));
        prop_assert!(pool.is_empty());
    }
}

#[test]
fn test_strategy_objects_are_shareable() {
    fn assert_send_sync<T: Send + Sync + ?Sized>() {}
    assert_send_sync::<dyn LruPoolStrategy>();
    assert_send_sync::<tilepool_pool::LruBitmapPool>();
}
