//! Pooling strategies for reusable bitmaps
//!
//! A strategy decides which pooled bitmap can serve a request and which one
//! is least recently used. Two implementations are provided: size-class
//! best fit and exact attribute match.

mod factory;
mod store;
mod strategies;
mod traits;

pub use factory::{create_strategy, create_strategy_from_name, StrategyKind};
pub use strategies::{AttributeStrategy, SizeConfigStrategy, MAX_SIZE_MULTIPLE};
pub use traits::LruPoolStrategy;

#[cfg(test)]
mod tests;
