//! Contains the high level functions for computing palettes and dominant colors.

#[cfg(feature = "async")]
mod acquire;
mod options;
mod palette;

#[cfg(feature = "async")]
pub use acquire::{get_color_async, get_palette_async, Acquire, DecodedImage};
#[cfg(all(feature = "async", feature = "image"))]
pub use acquire::ImageSource;
pub use options::{validate, Options, Validated};
pub use palette::{get_color, get_palette, get_palette_srgb};
#[cfg(feature = "threads")]
pub use palette::{get_color_par, get_palette_par, get_palette_srgb_par};
