//! Display implementations for pool errors

use super::types::{PoolError, RejectReason};
use std::fmt;

impl fmt::Display for PoolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRequest { source, .. } => write!(f, "Invalid bitmap request: {source}"),
            Self::Rejected { bitmap, reason, .. } => {
                write!(f, "Bitmap {bitmap} rejected by pool: {reason}")
            }
            Self::Configuration { message, .. } => write!(f, "Configuration error: {message}"),
            Self::Io {
                path,
                operation,
                source,
                ..
            } => write!(
                f,
                "I/O error during {} on '{}': {}",
                operation,
                path.display(),
                source
            ),
            Self::Serialization { key, source, .. } => {
                write!(f, "Failed to decode '{key}': {source}")
            }
        }
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Immutable => f.write_str("bitmap is immutable"),
            Self::FormatNotAllowed { format } => write!(f, "format {format} is not allowed"),
            Self::TooLarge { size, max_size } => write!(
                f,
                "size {size} bytes exceeds pool max size {max_size} bytes"
            ),
        }
    }
}

impl std::error::Error for PoolError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidRequest { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            Self::Serialization { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}
