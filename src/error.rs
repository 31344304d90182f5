//! Error types returned by the crate.

use crate::{MAX_COLORS, MAX_PIXELS};
use thiserror::Error;

/// An invalid `color_count` or `quality` was requested.
///
/// These are raised before any pixel is looked at and always indicate a programmer error,
/// as opposed to a missing or undecodable image, which is not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// A palette of a single color was requested.
    #[error(
        "color_count must be between 2 and {}, got 1; \
         use get_color to get a single dominant color",
        MAX_COLORS
    )]
    SingleColor,
    /// The requested palette size is `0` or above [`MAX_COLORS`].
    #[error("color_count must be between 2 and {}, got {0}", MAX_COLORS)]
    ColorCountOutOfRange(u32),
    /// The sampling stride is `0`.
    #[error("quality must be an integer of at least 1, got {0}")]
    QualityOutOfRange(u32),
}

impl ConfigurationError {
    /// The name of the offending configuration field.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::SingleColor | Self::ColorCountOutOfRange(_) => "color_count",
            Self::QualityOutOfRange(_) => "quality",
        }
    }
}

/// The pixel data does not describe a valid RGBA image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PixelBufferError {
    /// The byte length is not `width * height * 4`.
    #[error("pixel buffer length {len} does not match dimensions {width}x{height} (RGBA)")]
    LengthMismatch {
        /// The length of the byte slice.
        len: usize,
        /// The image width in pixels.
        width: u32,
        /// The image height in pixels.
        height: u32,
    },
    /// The image has more than [`MAX_PIXELS`] pixels.
    #[error("image has more than the maximum of {} pixels", MAX_PIXELS)]
    TooManyPixels,
}

/// A string could not be parsed as a `#rrggbb` color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HexError {
    /// The string does not start with `#`.
    #[error("hex color must start with '#'")]
    MissingPrefix,
    /// The string does not have exactly six digits after the `#`.
    #[error("hex color must have exactly 6 digits, got {0}")]
    InvalidLength(usize),
    /// A character is not a hexadecimal digit.
    #[error("invalid hex digit {0:?}")]
    InvalidDigit(char),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_field_and_range() {
        let err = ConfigurationError::SingleColor;
        assert_eq!(err.field(), "color_count");
        assert!(err.to_string().contains("between 2 and 256"));

        let err = ConfigurationError::ColorCountOutOfRange(300);
        assert_eq!(err.field(), "color_count");
        assert!(err.to_string().contains("got 300"));

        let err = ConfigurationError::QualityOutOfRange(0);
        assert_eq!(err.field(), "quality");
        assert!(err.to_string().contains("at least 1"));
    }
}
