//! Pooling strategy implementations

mod attribute;
mod size_config;

pub use attribute::AttributeStrategy;
pub use size_config::{SizeConfigStrategy, MAX_SIZE_MULTIPLE};
