//! Core pool types and structures

use crate::config::{scaled_size, PoolConfig};
use crate::errors::{PoolError, RecoveryHint, Result};
use crate::stats::PoolStats;
use crate::strategy::{create_strategy, LruPoolStrategy};
use parking_lot::Mutex;
use std::collections::BTreeSet;
use std::fmt;
use tilepool_core::{Bitmap, PixelFormat};

/// Byte-budgeted pool of reusable bitmaps
pub struct LruBitmapPool {
    /// Matching and recency policy
    pub(super) strategy: Box<dyn LruPoolStrategy>,
    /// Formats accepted by `put`
    pub(super) allowed_formats: BTreeSet<PixelFormat>,
    /// Budget the size multiplier is applied to
    pub(super) initial_max_size: u64,
    /// Byte accounting; held across every mutation of the strategy
    pub(super) budget: Mutex<Budget>,
    pub(super) stats: PoolStats,
}

pub(super) struct Budget {
    pub max_size: u64,
    pub current_size: u64,
}

impl LruBitmapPool {
    /// Create a pool from validated configuration
    pub fn new(config: &PoolConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            strategy: create_strategy(config.strategy),
            allowed_formats: config.allowed_formats.clone(),
            initial_max_size: config.max_size,
            budget: Mutex::new(Budget {
                max_size: scaled_size(config.max_size, config.size_multiplier),
                current_size: 0,
            }),
            stats: PoolStats::default(),
        })
    }

    /// Create a pool over a custom strategy accepting every format.
    ///
    /// The strategy must be empty: bitmaps it already holds were never
    /// counted against the budget.
    pub fn with_strategy(max_size: u64, strategy: Box<dyn LruPoolStrategy>) -> Result<Self> {
        if !strategy.is_empty() {
            return Err(PoolError::Configuration {
                message: format!(
                    "Strategy already holds {} bitmaps; a pool must start from an empty strategy",
                    strategy.len()
                ),
                recovery_hint: RecoveryHint::Manual {
                    instructions: "Drain the strategy with remove_last before handing it to a pool"
                        .to_string(),
                },
            });
        }

        Ok(Self {
            strategy,
            allowed_formats: PixelFormat::ALL.into_iter().collect(),
            initial_max_size: max_size,
            budget: Mutex::new(Budget {
                max_size,
                current_size: 0,
            }),
            stats: PoolStats::default(),
        })
    }
}

impl fmt::Debug for LruBitmapPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let budget = self.budget.lock();
        f.debug_struct("LruBitmapPool")
            .field("max_size", &budget.max_size)
            .field("current_size", &budget.current_size)
            .field("pooled_count", &self.strategy.len())
            .field("allowed_formats", &self.allowed_formats)
            .finish()
    }
}

/// A bitmap the pool refused, returned to the caller with the reason
#[derive(Debug)]
pub struct RejectedBitmap {
    pub bitmap: Bitmap,
    pub error: PoolError,
}

impl RejectedBitmap {
    pub fn into_bitmap(self) -> Bitmap {
        self.bitmap
    }
}

impl fmt::Display for RejectedBitmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.error, f)
    }
}

impl std::error::Error for RejectedBitmap {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

/// Memory pressure levels reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TrimLevel {
    RunningModerate,
    RunningLow,
    RunningCritical,
    UiHidden,
    Background,
    Moderate,
    Complete,
}
