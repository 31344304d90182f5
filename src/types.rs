//! Contains various types needed across the crate.

use crate::{PixelBufferError, DEFAULT_QUALITY, MAX_COLORS, MAX_PIXELS};
use std::{fmt::Display, num::NonZeroU32, slice::ChunksExact};
#[cfg(feature = "image")]
use image::RgbaImage;

/// A borrowed, decoded RGBA image: a flat byte slice with 4 bytes per pixel
/// (red, green, blue, alpha) alongside the image dimensions.
///
/// The invariant is that the byte length is exactly `width * height * 4`
/// and that the number of pixels is not greater than [`MAX_PIXELS`].
///
/// # Examples
/// From raw bytes:
/// ```
/// # use chromacut::{PixelBuffer, PixelBufferError};
/// # fn main() -> Result<(), PixelBufferError> {
/// let data = [255, 0, 0, 255, 0, 0, 255, 255];
/// let pixels = PixelBuffer::new(&data, 2, 1)?;
/// assert_eq!(pixels.pixel_count(), 2);
/// # Ok(())
/// # }
/// ```
///
/// From an image (needs the `image` feature to be enabled):
/// ```no_run
/// # use chromacut::PixelBuffer;
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let img = image::open("some image")?.into_rgba8();
/// let pixels = PixelBuffer::try_from(&img)?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelBuffer<'a> {
    /// The RGBA bytes.
    data: &'a [u8],
    /// The width of the image in pixels.
    width: u32,
    /// The height of the image in pixels.
    height: u32,
}

impl<'a> PixelBuffer<'a> {
    /// Creates a new [`PixelBuffer`] after checking the length of `data` against the dimensions.
    ///
    /// # Errors
    /// Returns [`PixelBufferError::TooManyPixels`] if `width * height` is above [`MAX_PIXELS`]
    /// and [`PixelBufferError::LengthMismatch`] if `data` is not `width * height * 4` bytes long.
    pub fn new(data: &'a [u8], width: u32, height: u32) -> Result<Self, PixelBufferError> {
        let pixels = u64::from(width) * u64::from(height);
        if pixels > u64::from(MAX_PIXELS) {
            return Err(PixelBufferError::TooManyPixels);
        }

        if data.len() as u64 == pixels * 4 {
            Ok(Self { data, width, height })
        } else {
            Err(PixelBufferError::LengthMismatch { len: data.len(), width, height })
        }
    }

    /// An empty, zero-sized image.
    #[must_use]
    pub const fn empty() -> Self {
        Self { data: &[], width: 0, height: 0 }
    }

    /// Returns the width of the image in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Returns the height of the image in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Returns the number of pixels, `width * height`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn pixel_count(&self) -> u32 {
        (self.data.len() / 4) as u32
    }

    /// Returns the raw RGBA bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &'a [u8] {
        self.data
    }

    /// Returns whether the image has no pixels.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// An iterator over the `[r, g, b, a]` chunks of each pixel.
    pub(crate) fn pixels(&self) -> ChunksExact<'a, u8> {
        self.data.chunks_exact(4)
    }
}

#[cfg(feature = "image")]
impl<'a> TryFrom<&'a RgbaImage> for PixelBuffer<'a> {
    type Error = PixelBufferError;

    fn try_from(image: &'a RgbaImage) -> Result<Self, Self::Error> {
        let (width, height) = image.dimensions();
        let len = (u64::from(width) * u64::from(height) * 4).min(image.as_raw().len() as u64);
        #[allow(clippy::cast_possible_truncation)]
        Self::new(&image.as_raw()[..len as usize], width, height)
    }
}

/// This type is used to specify the (maximum) number of colors to include in a palette.
///
/// This is a simple new type wrapper around `u16` with the invariant that it must be
/// less than or equal to [`MAX_COLORS`].
///
/// If a [`PaletteSize`] of `0` is provided to [`median_cut::palette`](crate::median_cut::palette),
/// an empty [`QuantizeOutput`] will be returned.
/// The facade functions (e.g., [`get_palette`](crate::get_palette)) additionally reject
/// sizes below `2`; see [`validate`](crate::validate).
///
/// # Examples
/// ```
/// # use chromacut::PaletteSize;
/// let size = PaletteSize::from(16);
/// let size = PaletteSize::from_clamped(1024);
/// assert_eq!(size, PaletteSize::MAX);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct PaletteSize(u16);

impl PaletteSize {
    /// The maximum supported palette size (given by [`MAX_COLORS`]).
    pub const MAX: Self = Self(MAX_COLORS);

    /// Gets the inner `u16` value.
    #[must_use]
    pub const fn into_inner(self) -> u16 {
        self.0
    }

    /// Creates a [`PaletteSize`] by clamping the given `u16` to be less than or equal to [`MAX_COLORS`].
    #[must_use]
    pub const fn from_clamped(value: u16) -> Self {
        if value <= MAX_COLORS {
            Self(value)
        } else {
            Self(MAX_COLORS)
        }
    }
}

impl Default for PaletteSize {
    fn default() -> Self {
        Self::MAX
    }
}

impl From<PaletteSize> for u16 {
    fn from(val: PaletteSize) -> Self {
        val.into_inner()
    }
}

impl From<u8> for PaletteSize {
    fn from(value: u8) -> Self {
        Self(value.into())
    }
}

impl Display for PaletteSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.into_inner())
    }
}

/// The sampling stride: every `quality`-th pixel is looked at.
///
/// `1` visits every pixel. Larger values are faster but are more likely to miss colors
/// that only cover a small part of the image. The default is [`DEFAULT_QUALITY`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Quality(NonZeroU32);

impl Quality {
    /// Visits every pixel.
    pub const BEST: Self = Self(NonZeroU32::MIN);

    /// The stride used when none is given, [`DEFAULT_QUALITY`].
    pub const DEFAULT: Self = match Self::new(DEFAULT_QUALITY) {
        Some(quality) => quality,
        None => Self::BEST,
    };

    /// Creates a new [`Quality`], returning `None` if `stride` is `0`.
    #[must_use]
    pub const fn new(stride: u32) -> Option<Self> {
        match NonZeroU32::new(stride) {
            Some(stride) => Some(Self(stride)),
            None => None,
        }
    }

    /// Returns the stride as a `u32`.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }

    /// Returns the stride as a `usize` for use with iterator adapters.
    #[must_use]
    pub(crate) const fn stride(self) -> usize {
        self.0.get() as usize
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl Display for Quality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.get())
    }
}

/// The output struct returned by [`median_cut::palette`](crate::median_cut::palette).
///
/// It contains the color `palette` for the samples, alongside `counts` which has
/// the number of samples assigned to each palette color.
///
/// Both fields will be empty if there were no samples or a [`PaletteSize`] of `0` was requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantizeOutput<Color> {
    /// The representative colors, ordered by box population times box volume (descending).
    ///
    /// The colors in the palette are not guaranteed to be unique.
    pub palette: Vec<Color>,
    /// The number of samples that were assigned to each color in `palette`.
    pub counts: Vec<u32>,
}

impl<Color> Default for QuantizeOutput<Color> {
    fn default() -> Self {
        Self { palette: Vec::new(), counts: Vec::new() }
    }
}

impl<Color> QuantizeOutput<Color> {
    /// Returns the number of colors in the palette.
    #[must_use]
    pub fn len(&self) -> usize {
        self.palette.len()
    }

    /// Returns whether the palette has no colors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.palette.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn pixel_buffer_checks_length() {
        let data = [0u8; 8];
        assert!(PixelBuffer::new(&data, 2, 1).is_ok());
        assert!(PixelBuffer::new(&data, 1, 2).is_ok());
        assert_eq!(
            PixelBuffer::new(&data, 3, 1),
            Err(PixelBufferError::LengthMismatch { len: 8, width: 3, height: 1 })
        );
        assert_eq!(
            PixelBuffer::new(&data[..7], 2, 1),
            Err(PixelBufferError::LengthMismatch { len: 7, width: 2, height: 1 })
        );
        assert_eq!(
            PixelBuffer::new(&[], u32::MAX, 2),
            Err(PixelBufferError::TooManyPixels)
        );
    }

    #[test]
    fn zero_sized_buffers() {
        let pixels = PixelBuffer::new(&[], 0, 10).unwrap();
        assert!(pixels.is_empty());
        assert_eq!(pixels.pixel_count(), 0);
        assert_eq!(pixels, PixelBuffer::new(&[], 0, 10).unwrap());
        assert_eq!(PixelBuffer::empty().pixel_count(), 0);
    }

    #[test]
    fn quality_rejects_zero() {
        assert_eq!(Quality::new(0), None);
        assert_eq!(Quality::new(1), Some(Quality::BEST));
        assert_eq!(Quality::default().get(), 10);
    }

    #[test]
    fn palette_size_clamps() {
        assert_eq!(PaletteSize::from_clamped(300), PaletteSize::MAX);
        assert_eq!(PaletteSize::from(5).into_inner(), 5);
    }

    #[cfg(feature = "image")]
    #[test]
    fn from_rgba_image() {
        let img = RgbaImage::from_pixel(3, 2, image::Rgba([1, 2, 3, 255]));
        let pixels = PixelBuffer::try_from(&img).unwrap();
        assert_eq!(pixels.pixel_count(), 6);
        assert_eq!(&pixels.as_bytes()[..4], &[1, 2, 3, 255]);
    }
}
