use crate::types::PixelFormat;

/// Result type alias for raster operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for bitmap construction and reconfiguration
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Width or height is not usable for a raster
    #[error("invalid bitmap dimensions {width}x{height}: {message}")]
    InvalidDimensions {
        width: u32,
        height: u32,
        message: String,
    },

    /// The byte size of a raster does not fit the platform's address space
    #[error("bitmap {width}x{height} in {format} overflows the addressable byte size")]
    SizeOverflow {
        width: u32,
        height: u32,
        format: PixelFormat,
    },

    /// The existing allocation is too small for the requested layout
    #[error(
        "cannot reconfigure to {width}x{height} {format}: requires {required} bytes, allocation holds {available}"
    )]
    ReconfigureTooLarge {
        width: u32,
        height: u32,
        format: PixelFormat,
        required: u64,
        available: u64,
    },

    /// A pixel format name could not be parsed
    #[error("unknown pixel format '{value}'")]
    UnknownFormat { value: String },
}

impl Error {
    /// Create an invalid dimensions error
    pub fn invalid_dimensions(width: u32, height: u32, message: impl Into<String>) -> Self {
        Error::InvalidDimensions {
            width,
            height,
            message: message.into(),
        }
    }
}
