//! Core raster types and errors for `tilepool`.
//!
//! This crate holds the buffer type that the reuse pool manages and the
//! validation rules every buffer obeys.
//!
//! ## Key Components
//!
//! - **`types`**: `Bitmap`, its `BitmapId`, and the `PixelFormat` enum with
//!   per-format byte accounting.
//! - **`errors`**: the `Error` enum and `Result` alias for invalid dimensions,
//!   size overflow, failed reconfiguration and unknown format names.

pub mod errors;
pub mod types;

pub use self::{
    errors::{Error, Result},
    types::*,
};
