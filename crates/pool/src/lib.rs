//! Reusable tile bitmap pool for tilepool
//!
//! This crate keeps previously decoded tile bitmaps around so that the next
//! tile can be decoded into an existing allocation:
//! - Pluggable pooling strategies (size-class best fit, exact attributes)
//! - Byte-budgeted LRU eviction
//! - Memory-pressure trimming
//! - Layered configuration and pool statistics

pub mod config;
pub mod errors;
pub mod pool;
pub mod stats;
pub mod strategy;

pub use config::{
    ConfigSource, PoolConfig, PoolConfigBuilder, PoolConfigLoader, PoolConfigOverrides,
    PoolConfiguration,
};
pub use errors::{Error, PoolError, RecoveryHint, RejectReason, Result};
pub use pool::{LruBitmapPool, RejectedBitmap, TrimLevel};
pub use stats::PoolStatistics;
pub use strategy::*;

pub use tilepool_core::{Bitmap, BitmapId, PixelFormat};
