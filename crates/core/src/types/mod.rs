//! Raster types managed by the reuse pool.
//!
//! - **`format`**: pixel formats and their bytes-per-pixel
//! - **`bitmap`**: the owned raster buffer and its identity

pub mod bitmap;
pub mod format;

pub use bitmap::*;
pub use format::*;
