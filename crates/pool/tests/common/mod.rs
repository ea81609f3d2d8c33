//! Common test utilities and helpers

#![allow(dead_code)]

use tilepool_pool::{create_strategy, Bitmap, LruBitmapPool, PixelFormat, StrategyKind};
use tracing_subscriber::EnvFilter;

/// Install a fmt subscriber honouring `RUST_LOG`; later calls are no-ops
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn bitmap(width: u32, height: u32, format: PixelFormat) -> Bitmap {
    Bitmap::new(width, height, format).expect("valid test bitmap")
}

/// Pool with the given strategy and a budget large enough to never evict in tests
pub fn unbounded_pool(kind: StrategyKind) -> LruBitmapPool {
    LruBitmapPool::with_strategy(u64::MAX / 2, create_strategy(kind)).unwrap()
}

pub const STRATEGIES: [StrategyKind; 2] = [StrategyKind::SizeConfig, StrategyKind::Attribute];
