//! Conversions between `Srgb<u8>` and the output color representations.

use crate::HexError;
use palette::{cast, Srgb};
use std::{fmt::Display, str::FromStr};

/// The representation to return palette colors in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ColorFormat {
    /// An `[r, g, b]` array ([`Color::Triple`]).
    Triple,
    /// A lowercase `#rrggbb` string ([`Color::Hex`]).
    #[default]
    Hex,
}

impl FromStr for ColorFormat {
    type Err = UnknownColorFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("hex") {
            Ok(Self::Hex)
        } else if s.eq_ignore_ascii_case("triple") || s.eq_ignore_ascii_case("array") {
            Ok(Self::Triple)
        } else {
            Err(UnknownColorFormat)
        }
    }
}

impl Display for ColorFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ColorFormat::Triple => "triple",
            ColorFormat::Hex => "hex",
        })
    }
}

/// The error returned when parsing an unknown [`ColorFormat`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unknown color format, expected \"hex\" or \"triple\"")]
pub struct UnknownColorFormat;

/// A palette color in the requested [`ColorFormat`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Color {
    /// The red, green, and blue channels.
    Triple([u8; 3]),
    /// A lowercase `#rrggbb` string.
    Hex(String),
}

impl Color {
    /// Creates a new [`Color`] in the given format.
    #[must_use]
    pub fn new(color: Srgb<u8>, format: ColorFormat) -> Self {
        match format {
            ColorFormat::Triple => Self::Triple(cast::into_array(color)),
            ColorFormat::Hex => Self::Hex(to_hex(color)),
        }
    }

    /// Returns the format of this color.
    #[must_use]
    pub const fn format(&self) -> ColorFormat {
        match self {
            Color::Triple(_) => ColorFormat::Triple,
            Color::Hex(_) => ColorFormat::Hex,
        }
    }

    /// Converts this color back into `Srgb<u8>`.
    ///
    /// # Errors
    /// Returns an error if this is a [`Color::Hex`] that is not a valid `#rrggbb` string.
    pub fn to_srgb(&self) -> Result<Srgb<u8>, HexError> {
        match self {
            Color::Triple(rgb) => Ok(cast::from_array(*rgb)),
            Color::Hex(hex) => from_hex(hex),
        }
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Color::Triple([r, g, b]) => write!(f, "[{r}, {g}, {b}]"),
            Color::Hex(hex) => f.write_str(hex),
        }
    }
}

/// Formats the color as `#rrggbb` with lowercase hex digits.
#[must_use]
pub fn to_hex(color: Srgb<u8>) -> String {
    let [r, g, b] = cast::into_array(color);
    format!("#{r:02x}{g:02x}{b:02x}")
}

/// Parses a `#rrggbb` string (upper or lower case digits) into a color.
///
/// This is the inverse of [`to_hex`].
///
/// # Errors
/// Returns an error if `hex` does not start with `#`,
/// does not have exactly 6 digits, or contains a character that is not a hex digit.
pub fn from_hex(hex: &str) -> Result<Srgb<u8>, HexError> {
    let digits = hex.strip_prefix('#').ok_or(HexError::MissingPrefix)?;

    if let Some(ch) = digits.chars().find(|ch| !ch.is_ascii_hexdigit()) {
        return Err(HexError::InvalidDigit(ch));
    }

    if digits.len() != 6 {
        return Err(HexError::InvalidLength(digits.len()));
    }

    hex.parse().map_err(|_| HexError::InvalidLength(digits.len()))
}
