//! Error conversion utilities

use super::types::{PoolError, RecoveryHint};

impl From<tilepool_core::Error> for PoolError {
    fn from(error: tilepool_core::Error) -> Self {
        Self::InvalidRequest {
            source: error,
            recovery_hint: RecoveryHint::Manual {
                instructions: "Request non-zero dimensions whose byte size fits in memory"
                    .to_string(),
            },
        }
    }
}
