//! A library for extracting a representative color palette and a dominant color from images.
//!
//! `chromacut` samples the opaque pixels of an RGBA image, clusters them with median cut,
//! and returns the average color of each cluster either as an `[r, g, b]` triple
//! or as a `#rrggbb` hex string.
//!
//! # Features
//! To reduce dependencies and compile times, `chromacut` has several `cargo` features
//! that can be turned off or on:
//! - `threads`: exposes parallel versions of the sampling step via [`rayon`].
//! - `image`: enables integration with the [`image`] crate, including decoding of files and buffers.
//! - `async`: exposes [`get_palette_async`] and [`get_color_async`], which first acquire an image
//!   through the [`Acquire`] trait.
//! - `cli`: builds the `chromacut` command line tool.
//!
//! # Example
//! ```
//! # use chromacut::{get_color, get_palette, Color, ColorFormat, Options, PixelBuffer};
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let data = [
//!     255, 0, 0, 255, // red
//!     0, 0, 255, 255, // blue
//! ];
//! let pixels = PixelBuffer::new(&data, 2, 1)?;
//! let options = Options::new().quality(1);
//!
//! let mut palette = get_palette(pixels, 2, &options)?;
//! palette.sort_by_key(ToString::to_string);
//! assert_eq!(palette, vec![Color::Hex("#0000ff".into()), Color::Hex("#ff0000".into())]);
//!
//! let dominant = get_color(pixels, &options.format(ColorFormat::Triple))?;
//! assert!(matches!(dominant, Some(Color::Triple(_))));
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(
    clippy::pedantic,
    clippy::cargo,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used,
    clippy::unwrap_in_result,
    clippy::expect_used,
    clippy::unneeded_field_pattern,
    clippy::rest_pat_in_fully_bound_structs,
    clippy::unnecessary_self_imports,
    clippy::str_to_string,
    clippy::string_to_string,
    clippy::string_slice,
    missing_docs,
    clippy::missing_docs_in_private_items,
    rustdoc::all,
    clippy::float_cmp_const,
    clippy::lossy_float_literal
)]
#![allow(
    clippy::doc_markdown,
    clippy::module_name_repetitions,
    clippy::many_single_char_names,
    clippy::missing_panics_doc,
    clippy::unreadable_literal,
    clippy::wildcard_imports
)]

mod api;
mod error;
mod format;
mod types;

pub mod median_cut;
pub mod sample;

pub use api::*;
pub use error::*;
pub use format::*;
pub use types::*;

/// The maximum supported image size in number of pixels is `u32::MAX`.
pub const MAX_PIXELS: u32 = u32::MAX;

/// The maximum supported number of palette colors is `256`.
pub const MAX_COLORS: u16 = u8::MAX as u16 + 1;

/// The smallest palette the facade functions accept.
pub const MIN_COLORS: u16 = 2;

/// The sampling stride used when none is given.
pub const DEFAULT_QUALITY: u32 = 10;

/// Pixels with an alpha value less than or equal to this are treated as background and skipped.
pub const ALPHA_THRESHOLD: u8 = 125;

/// The palette size computed by [`get_color`]; its first entry is the dominant color.
pub const DOMINANT_PALETTE_SIZE: u16 = 5;

#[cfg(test)]
pub(crate) mod tests {
    use palette::Srgb;
    use rand::{Rng, SeedableRng};
    use rand_xoshiro::Xoroshiro128PlusPlus;

    /// `len` random colors from a fixed seed.
    pub fn test_colors(len: usize) -> Vec<Srgb<u8>> {
        let mut rng = Xoroshiro128PlusPlus::seed_from_u64(42);
        (0..len)
            .map(|_| Srgb::new(rng.gen(), rng.gen(), rng.gen()))
            .collect()
    }

    pub fn test_data_1024() -> Vec<Srgb<u8>> {
        test_colors(1024)
    }

    /// RGBA bytes for `colors`, all fully opaque.
    pub fn opaque_rgba(colors: &[Srgb<u8>]) -> Vec<u8> {
        colors
            .iter()
            .flat_map(|c| [c.red, c.green, c.blue, u8::MAX])
            .collect()
    }

    /// RGBA bytes with random colors and random alpha values from a fixed seed.
    pub fn random_rgba(len: usize) -> Vec<u8> {
        let mut rng = Xoroshiro128PlusPlus::seed_from_u64(7);
        (0..len * 4).map(|_| rng.gen()).collect()
    }

    pub const RED: [u8; 4] = [255, 0, 0, 255];
    pub const BLUE: [u8; 4] = [0, 0, 255, 255];
    pub const CLEAR: [u8; 4] = [0, 0, 0, 0];
}
