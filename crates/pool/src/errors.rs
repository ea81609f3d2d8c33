//! Error handling for the bitmap pool
//!
//! "Not found" is never an error here: lookups return `Option`. The types in
//! this module cover invalid requests, refused bitmaps and configuration
//! failures, each carrying a recovery hint for the caller.

mod conversions;
mod display;
mod recovery;
mod types;

pub use types::*;
