//! Contains the [`Options`] builder struct and parameter validation.

use crate::{
    sample::SampleFilter, ColorFormat, ConfigurationError, PaletteSize, Quality, DEFAULT_QUALITY,
    MAX_COLORS, MIN_COLORS,
};

/// A builder struct to specify how palettes and dominant colors are computed.
///
/// # Examples
/// ```
/// # use chromacut::{ColorFormat, Options};
/// let options = Options::new()
///     .quality(5)
///     .format(ColorFormat::Triple)
///     .ignore_white(true);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// The sampling stride.
    pub(crate) quality: u32,
    /// The representation of the returned colors.
    pub(crate) format: ColorFormat,
    /// Whether to skip near-white pixels while sampling.
    pub(crate) ignore_white: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self::new()
    }
}

impl Options {
    /// Creates a new [`Options`] with default values.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            quality: DEFAULT_QUALITY,
            format: ColorFormat::Hex,
            ignore_white: false,
        }
    }

    /// Sets the sampling stride: every `quality`-th pixel is looked at.
    ///
    /// `1` is the highest quality setting and visits every pixel.
    /// Larger values are faster, but are more likely to miss colors.
    /// The value is checked when a palette is computed and must be at least `1`.
    ///
    /// The default quality is `10`.
    #[must_use]
    pub const fn quality(mut self, quality: u32) -> Self {
        self.quality = quality;
        self
    }

    /// Sets the representation of the returned colors.
    ///
    /// The default is [`ColorFormat::Hex`].
    #[must_use]
    pub const fn format(mut self, format: ColorFormat) -> Self {
        self.format = format;
        self
    }

    /// Sets whether pixels with all channels above `250` are skipped while sampling.
    ///
    /// The default is `false`.
    #[must_use]
    pub const fn ignore_white(mut self, ignore_white: bool) -> Self {
        self.ignore_white = ignore_white;
        self
    }

    /// Returns the sample filter for these options.
    pub(crate) const fn filter(self) -> SampleFilter {
        SampleFilter { ignore_white: self.ignore_white }
    }
}

/// A `color_count` and `quality` pair that passed [`validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Validated {
    /// The palette size, between [`MIN_COLORS`] and [`MAX_COLORS`].
    pub color_count: PaletteSize,
    /// The sampling stride.
    pub quality: Quality,
}

/// Checks the requested palette size and sampling stride.
///
/// # Errors
/// - [`ConfigurationError::SingleColor`] if `color_count` is `1`.
///   This is never clamped; use [`get_color`](crate::get_color) for a single color.
/// - [`ConfigurationError::ColorCountOutOfRange`] if `color_count` is `0` or above [`MAX_COLORS`].
/// - [`ConfigurationError::QualityOutOfRange`] if `quality` is `0`.
pub fn validate(color_count: u32, quality: u32) -> Result<Validated, ConfigurationError> {
    let color_count = match u16::try_from(color_count) {
        Ok(1) => return Err(ConfigurationError::SingleColor),
        Ok(n) if (MIN_COLORS..=MAX_COLORS).contains(&n) => PaletteSize::from_clamped(n),
        _ => return Err(ConfigurationError::ColorCountOutOfRange(color_count)),
    };

    let quality = Quality::new(quality).ok_or(ConfigurationError::QualityOutOfRange(quality))?;

    Ok(Validated { color_count, quality })
}
