//! Core error types for the bitmap pool

use std::path::PathBuf;
use tilepool_core::PixelFormat;

/// Result type for pool operations
pub type Result<T> = std::result::Result<T, PoolError>;

pub use PoolError as Error;

/// Error type for pool operations
#[derive(Debug)]
pub enum PoolError {
    /// A request or bitmap has unusable dimensions or size
    InvalidRequest {
        source: tilepool_core::Error,
        recovery_hint: RecoveryHint,
    },

    /// The pool refused to take ownership of a bitmap
    Rejected {
        bitmap: String,
        reason: RejectReason,
        recovery_hint: RecoveryHint,
    },

    /// Configuration error
    Configuration {
        message: String,
        recovery_hint: RecoveryHint,
    },

    /// I/O errors while loading configuration
    Io {
        path: PathBuf,
        operation: &'static str,
        source: std::io::Error,
        recovery_hint: RecoveryHint,
    },

    /// Configuration file could not be decoded
    Serialization {
        key: String,
        source: Box<dyn std::error::Error + Send + Sync>,
        recovery_hint: RecoveryHint,
    },
}

/// Why `put` refused a bitmap
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    /// Immutable bitmaps cannot be written into and are never reused
    Immutable,
    /// The format is not in the pool's allowed set
    FormatNotAllowed { format: PixelFormat },
    /// The bitmap alone exceeds the pool's byte budget
    TooLarge { size: u64, max_size: u64 },
}

/// Recovery hints for error handling
#[derive(Debug, Clone, PartialEq)]
pub enum RecoveryHint {
    /// Drop the bitmap; the pool will allocate fresh ones on demand
    Recycle,

    /// Increase the pool budget
    IncreaseCapacity { suggested_bytes: u64 },

    /// Check file permissions
    CheckPermissions { path: PathBuf },

    /// Use a default value
    UseDefault { value: String },

    /// No automated recovery possible
    Manual { instructions: String },
}
