//! Pixel formats and byte accounting

use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::str::FromStr;

/// Pixel layout of a raster buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PixelFormat {
    /// Single 8-bit alpha channel
    #[serde(rename = "ALPHA_8")]
    Alpha8,
    /// 16-bit RGB without alpha
    #[serde(rename = "RGB_565")]
    Rgb565,
    /// 16-bit ARGB, 4 bits per channel
    #[serde(rename = "ARGB_4444")]
    Argb4444,
    /// 32-bit ARGB, 8 bits per channel
    #[serde(rename = "ARGB_8888")]
    Argb8888,
    /// 64-bit half-float RGBA
    #[serde(rename = "RGBA_F16")]
    RgbaF16,
    /// 32-bit RGBA, 10 bits per color channel and 2 bits alpha
    #[serde(rename = "RGBA_1010102")]
    Rgba1010102,
}

impl PixelFormat {
    /// Every supported format
    pub const ALL: [PixelFormat; 6] = [
        PixelFormat::Alpha8,
        PixelFormat::Rgb565,
        PixelFormat::Argb4444,
        PixelFormat::Argb8888,
        PixelFormat::RgbaF16,
        PixelFormat::Rgba1010102,
    ];

    /// Format assumed when a request does not name one
    pub const DEFAULT: PixelFormat = PixelFormat::Argb8888;

    pub const fn bytes_per_pixel(self) -> u64 {
        match self {
            PixelFormat::Alpha8 => 1,
            PixelFormat::Rgb565 | PixelFormat::Argb4444 => 2,
            PixelFormat::Argb8888 | PixelFormat::Rgba1010102 => 4,
            PixelFormat::RgbaF16 => 8,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            PixelFormat::Alpha8 => "ALPHA_8",
            PixelFormat::Rgb565 => "RGB_565",
            PixelFormat::Argb4444 => "ARGB_4444",
            PixelFormat::Argb8888 => "ARGB_8888",
            PixelFormat::RgbaF16 => "RGBA_F16",
            PixelFormat::Rgba1010102 => "RGBA_1010102",
        }
    }

    /// Byte size of a `width` x `height` raster in this format.
    ///
    /// Zero dimensions are rejected; the product must fit in both `u64` and
    /// the platform's `usize`.
    pub fn byte_size(self, width: u32, height: u32) -> Result<u64> {
        if width == 0 || height == 0 {
            return Err(Error::invalid_dimensions(
                width,
                height,
                "width and height must be non-zero",
            ));
        }

        let overflow = || Error::SizeOverflow {
            width,
            height,
            format: self,
        };

        let size = u64::from(width)
            .checked_mul(u64::from(height))
            .and_then(|pixels| pixels.checked_mul(self.bytes_per_pixel()))
            .ok_or_else(overflow)?;

        usize::try_from(size).map_err(|_| overflow())?;
        Ok(size)
    }
}

impl Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PixelFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_uppercase().replace('-', "_");
        PixelFormat::ALL
            .into_iter()
            .find(|format| format.as_str() == normalized)
            .ok_or_else(|| Error::UnknownFormat {
                value: s.to_string(),
            })
    }
}
