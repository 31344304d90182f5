//! The synchronous palette and dominant color functions.

use super::options::{validate, Options, Validated};
use crate::{
    median_cut,
    sample::{self, SampleFilter},
    Color, ConfigurationError, PaletteSize, PixelBuffer, Quality, QuantizeOutput,
    DOMINANT_PALETTE_SIZE,
};
use palette::Srgb;

/// Computes the palette for already sampled colors.
fn quantize(mut samples: Vec<Srgb<u8>>, color_count: PaletteSize) -> QuantizeOutput<Srgb<u8>> {
    let output = median_cut::palette(&mut samples, color_count);
    log::debug!(
        "quantized {} samples into {} of at most {} colors",
        samples.len(),
        output.len(),
        color_count,
    );
    output
}

/// Runs the pipeline with the given sampler after validation.
fn run(
    pixels: PixelBuffer,
    color_count: u32,
    options: Options,
    sampler: fn(PixelBuffer, Quality, SampleFilter) -> Vec<Srgb<u8>>,
) -> Result<QuantizeOutput<Srgb<u8>>, ConfigurationError> {
    let Validated { color_count, quality } = validate(color_count, options.quality)?;
    let colors = sampler(pixels, quality, options.filter());
    Ok(quantize(colors, color_count))
}

/// Converts the palette into the requested representation.
fn into_colors(output: QuantizeOutput<Srgb<u8>>, options: Options) -> Vec<Color> {
    output
        .palette
        .into_iter()
        .map(|color| Color::new(color, options.format))
        .collect()
}

/// Computes the palette of `pixels` with its sample counts,
/// leaving the colors as `Srgb<u8>` regardless of [`Options::format`].
///
/// # Errors
/// Returns a [`ConfigurationError`] if `color_count` or the quality in `options` is invalid
/// (see [`validate`]).
pub fn get_palette_srgb(
    pixels: PixelBuffer,
    color_count: u32,
    options: &Options,
) -> Result<QuantizeOutput<Srgb<u8>>, ConfigurationError> {
    run(pixels, color_count, *options, sample::sample)
}

/// Computes a palette of at most `color_count` colors that are representative of `pixels`.
///
/// The result is empty if the image has no pixels or all sampled pixels are transparent.
/// Identical inputs always give identical palettes, in the same order.
///
/// # Errors
/// Returns a [`ConfigurationError`] if `color_count` or the quality in `options` is invalid
/// (see [`validate`]).
///
/// # Examples
/// ```
/// # use chromacut::{get_palette, Options, PixelBuffer};
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let data = [255, 0, 0, 255].repeat(64);
/// let pixels = PixelBuffer::new(&data, 8, 8)?;
/// let palette = get_palette(pixels, 8, &Options::new())?;
/// assert_eq!(palette.len(), 1);
/// assert!(get_palette(pixels, 1, &Options::new()).is_err());
/// # Ok(())
/// # }
/// ```
pub fn get_palette(
    pixels: PixelBuffer,
    color_count: u32,
    options: &Options,
) -> Result<Vec<Color>, ConfigurationError> {
    let output = get_palette_srgb(pixels, color_count, options)?;
    Ok(into_colors(output, *options))
}

/// Returns the dominant color of `pixels`:
/// the first entry of a palette of [`DOMINANT_PALETTE_SIZE`] colors.
///
/// This approximates the color of the largest cluster. `None` is returned if the image has
/// no pixels or all sampled pixels are transparent.
///
/// # Errors
/// Returns a [`ConfigurationError`] if the quality in `options` is invalid.
pub fn get_color(pixels: PixelBuffer, options: &Options) -> Result<Option<Color>, ConfigurationError> {
    let palette = get_palette(pixels, DOMINANT_PALETTE_SIZE.into(), options)?;
    Ok(palette.into_iter().next())
}

/// Computes the palette of `pixels` in parallel with its sample counts,
/// leaving the colors as `Srgb<u8>` regardless of [`Options::format`].
///
/// Gives the same result as [`get_palette_srgb`].
///
/// # Errors
/// Returns a [`ConfigurationError`] if `color_count` or the quality in `options` is invalid.
#[cfg(feature = "threads")]
pub fn get_palette_srgb_par(
    pixels: PixelBuffer,
    color_count: u32,
    options: &Options,
) -> Result<QuantizeOutput<Srgb<u8>>, ConfigurationError> {
    run(pixels, color_count, *options, sample::sample_par)
}

/// Computes a palette of at most `color_count` colors in parallel.
///
/// Gives the same result as [`get_palette`].
///
/// # Errors
/// Returns a [`ConfigurationError`] if `color_count` or the quality in `options` is invalid.
#[cfg(feature = "threads")]
pub fn get_palette_par(
    pixels: PixelBuffer,
    color_count: u32,
    options: &Options,
) -> Result<Vec<Color>, ConfigurationError> {
    let output = get_palette_srgb_par(pixels, color_count, options)?;
    Ok(into_colors(output, *options))
}

/// Returns the dominant color of `pixels`, computed in parallel.
///
/// Gives the same result as [`get_color`].
///
/// # Errors
/// Returns a [`ConfigurationError`] if the quality in `options` is invalid.
#[cfg(feature = "threads")]
pub fn get_color_par(
    pixels: PixelBuffer,
    options: &Options,
) -> Result<Option<Color>, ConfigurationError> {
    let palette = get_palette_par(pixels, DOMINANT_PALETTE_SIZE.into(), options)?;
    Ok(palette.into_iter().next())
}
