//! Recovery utilities for pool errors

use super::types::{PoolError, RecoveryHint};

impl PoolError {
    /// Get the recovery hint for this error
    #[must_use]
    pub const fn recovery_hint(&self) -> &RecoveryHint {
        match self {
            Self::InvalidRequest { recovery_hint, .. }
            | Self::Rejected { recovery_hint, .. }
            | Self::Configuration { recovery_hint, .. }
            | Self::Io { recovery_hint, .. }
            | Self::Serialization { recovery_hint, .. } => recovery_hint,
        }
    }

    /// Check if the pool refused a bitmap
    #[must_use]
    pub const fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }

    /// Check if this error came from loading or validating configuration
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::Configuration { .. } | Self::Io { .. } | Self::Serialization { .. }
        )
    }
}
