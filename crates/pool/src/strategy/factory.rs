//! Factory for creating pooling strategies

use crate::errors::{PoolError, RecoveryHint, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::strategies::{AttributeStrategy, SizeConfigStrategy};
use super::traits::LruPoolStrategy;

/// Available pooling strategies
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    /// Best fit by allocation size within compatible formats
    #[default]
    SizeConfig,
    /// Exact width, height and format match
    Attribute,
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SizeConfig => f.write_str("size_config"),
            Self::Attribute => f.write_str("attribute"),
        }
    }
}

impl FromStr for StrategyKind {
    type Err = PoolError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "size_config" | "size-config" | "size" => Ok(Self::SizeConfig),
            "attribute" | "exact" => Ok(Self::Attribute),
            _ => Err(PoolError::Configuration {
                message: format!("Unknown pool strategy: {s}"),
                recovery_hint: RecoveryHint::UseDefault {
                    value: Self::default().to_string(),
                },
            }),
        }
    }
}

/// Pooling strategy factory
pub fn create_strategy(kind: StrategyKind) -> Box<dyn LruPoolStrategy> {
    match kind {
        StrategyKind::SizeConfig => Box::new(SizeConfigStrategy::new()),
        StrategyKind::Attribute => Box::new(AttributeStrategy::new()),
    }
}

/// Create a strategy from its configured name
pub fn create_strategy_from_name(name: &str) -> Result<Box<dyn LruPoolStrategy>> {
    let kind = name.parse::<StrategyKind>()?;
    Ok(create_strategy(kind))
}
