//! Byte-budgeted LRU bitmap pool
//!
//! `LruBitmapPool` drives a pooling strategy and keeps the total bytes it
//! holds within a budget, evicting least recently put bitmaps on overflow.
//! - Rejected bitmaps are handed back to the caller
//! - Budget can be scaled at runtime and trimmed under memory pressure
//! - Hit, miss, put, eviction and rejection counters

mod eviction;
mod operations;
mod types;

pub use types::{LruBitmapPool, RejectedBitmap, TrimLevel};
