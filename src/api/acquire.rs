//! Asynchronous image acquisition and the async palette and dominant color functions.
//!
//! Acquisition and configuration fail through different channels:
//! an invalid `color_count` or `quality` is returned as a [`ConfigurationError`],
//! while an image that cannot be read or decoded resolves to `Ok(None)`.

use super::{
    options::{validate, Options},
    palette::{get_color, get_palette},
};
use crate::{Color, ConfigurationError, PixelBuffer, PixelBufferError};
use std::future::Future;
#[cfg(feature = "image")]
use {
    image::{ImageFormat, RgbaImage},
    std::{path::PathBuf, sync::Arc},
};

/// An owned, decoded RGBA image as produced by an [`Acquire`] implementation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    /// The RGBA bytes, 4 per pixel.
    pub data: Vec<u8>,
    /// The width of the image in pixels.
    pub width: u32,
    /// The height of the image in pixels.
    pub height: u32,
}

impl DecodedImage {
    /// Borrows the image as a [`PixelBuffer`].
    ///
    /// # Errors
    /// Returns an error if `data` does not match the dimensions.
    pub fn pixel_buffer(&self) -> Result<PixelBuffer<'_>, PixelBufferError> {
        PixelBuffer::new(&self.data, self.width, self.height)
    }
}

#[cfg(feature = "image")]
impl From<RgbaImage> for DecodedImage {
    fn from(image: RgbaImage) -> Self {
        let (width, height) = image.dimensions();
        Self { data: image.into_raw(), width, height }
    }
}

/// A source that can asynchronously produce a decoded image.
///
/// Implementations only report success or failure: any error details should be logged
/// by the implementation and `None` returned. Dropping the returned future cancels acquisition.
pub trait Acquire {
    /// Reads and decodes the image, returning `None` if there is no usable image.
    fn acquire(&self) -> impl Future<Output = Option<DecodedImage>> + Send;
}

/// Borrows an acquired image as a [`PixelBuffer`], treating inconsistent dimensions
/// the same as a failed acquisition.
fn usable(image: Option<&DecodedImage>) -> Option<PixelBuffer<'_>> {
    let Some(image) = image else {
        log::debug!("image acquisition produced no image");
        return None;
    };

    image
        .pixel_buffer()
        .map_err(|err| log::warn!("acquired image is invalid: {err}"))
        .ok()
}

/// Acquires an image from `source` and computes a palette of at most `color_count` colors.
///
/// The parameters are validated before `source` is awaited.
/// Once the image is available, the rest of the computation runs without suspending.
///
/// # Errors
/// Returns a [`ConfigurationError`] if `color_count` or the quality in `options` is invalid.
/// If the image could not be acquired, `Ok(None)` is returned instead of an error.
pub async fn get_palette_async(
    source: &impl Acquire,
    color_count: u32,
    options: &Options,
) -> Result<Option<Vec<Color>>, ConfigurationError> {
    validate(color_count, options.quality)?;

    let image = source.acquire().await;
    let Some(pixels) = usable(image.as_ref()) else {
        return Ok(None);
    };

    get_palette(pixels, color_count, options).map(Some)
}

/// Acquires an image from `source` and returns its dominant color.
///
/// `Ok(None)` is returned if the image could not be acquired or has no opaque pixels.
///
/// # Errors
/// Returns a [`ConfigurationError`] if the quality in `options` is invalid.
/// This is checked before `source` is awaited.
pub async fn get_color_async(
    source: &impl Acquire,
    options: &Options,
) -> Result<Option<Color>, ConfigurationError> {
    validate(crate::DOMINANT_PALETTE_SIZE.into(), options.quality)?;

    let image = source.acquire().await;
    let Some(pixels) = usable(image.as_ref()) else {
        return Ok(None);
    };

    get_color(pixels, options)
}

/// An image file or an encoded in-memory image, decoded with the [`image`] crate.
///
/// Decoding happens on tokio's blocking thread pool, so the futures must be awaited
/// inside a tokio runtime.
///
/// # Examples
/// ```no_run
/// # use chromacut::{get_palette_async, ImageSource, Options};
/// # async fn run() -> Result<(), chromacut::ConfigurationError> {
/// let source = ImageSource::path("photo.jpg");
/// match get_palette_async(&source, 8, &Options::new()).await? {
///     Some(palette) => println!("{palette:?}"),
///     None => println!("could not read the image"),
/// }
/// # Ok(())
/// # }
/// ```
#[cfg(feature = "image")]
#[derive(Debug, Clone)]
pub enum ImageSource {
    /// A path to an image file. The format is guessed from the file contents.
    Path(PathBuf),
    /// An encoded image in memory.
    Bytes {
        /// The encoded image.
        data: Arc<[u8]>,
        /// The image format, or `None` to guess it from the contents.
        format: Option<ImageFormat>,
    },
}

#[cfg(feature = "image")]
impl ImageSource {
    /// Creates a new [`ImageSource::Path`].
    #[must_use]
    pub fn path(path: impl Into<PathBuf>) -> Self {
        Self::Path(path.into())
    }

    /// Creates a new [`ImageSource::Bytes`] with an optional format hint.
    #[must_use]
    pub fn bytes(data: impl Into<Arc<[u8]>>, format: Option<ImageFormat>) -> Self {
        Self::Bytes { data: data.into(), format }
    }

    /// Reads the encoded bytes of the image.
    async fn read(&self) -> Option<(Arc<[u8]>, Option<ImageFormat>)> {
        match self {
            ImageSource::Path(path) => match tokio::fs::read(path).await {
                Ok(data) => Some((data.into(), None)),
                Err(err) => {
                    log::warn!("failed to read image {}: {err}", path.display());
                    None
                }
            },
            ImageSource::Bytes { data, format } => Some((Arc::clone(data), *format)),
        }
    }
}

/// Decodes an encoded image into RGBA pixels.
#[cfg(feature = "image")]
fn decode(data: &[u8], format: Option<ImageFormat>) -> image::ImageResult<DecodedImage> {
    let image = match format {
        Some(format) => image::load_from_memory_with_format(data, format)?,
        None => image::load_from_memory(data)?,
    };
    Ok(image.into_rgba8().into())
}

#[cfg(feature = "image")]
impl Acquire for ImageSource {
    async fn acquire(&self) -> Option<DecodedImage> {
        let (data, format) = self.read().await?;

        match tokio::task::spawn_blocking(move || decode(&data, format)).await {
            Ok(Ok(image)) => Some(image),
            Ok(Err(err)) => {
                log::warn!("failed to decode image: {err}");
                None
            }
            Err(err) => {
                log::warn!("image decoding task failed: {err}");
                None
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::{tests::*, ColorFormat};

    /// A source that always yields the same result.
    struct Fixed(Option<DecodedImage>);

    impl Acquire for Fixed {
        fn acquire(&self) -> impl Future<Output = Option<DecodedImage>> + Send {
            std::future::ready(self.0.clone())
        }
    }

    fn red_red_blue() -> Fixed {
        Fixed(Some(DecodedImage { data: [RED, RED, BLUE].concat(), width: 3, height: 1 }))
    }

    #[tokio::test]
    async fn palette_on_success() {
        let options = Options::new().quality(1).format(ColorFormat::Triple);
        let palette = get_palette_async(&red_red_blue(), 5, &options).await.unwrap();
        assert_eq!(palette, Some(vec![Color::Triple([255, 0, 0]), Color::Triple([0, 0, 255])]));
    }

    #[tokio::test]
    async fn failure_is_absent() {
        let options = Options::new();
        assert_eq!(get_palette_async(&Fixed(None), 5, &options).await, Ok(None));
        assert_eq!(get_color_async(&Fixed(None), &options).await, Ok(None));
    }

    #[tokio::test]
    async fn inconsistent_image_is_absent() {
        let source = Fixed(Some(DecodedImage { data: vec![0; 7], width: 2, height: 1 }));
        assert_eq!(get_palette_async(&source, 5, &Options::new()).await, Ok(None));
    }

    #[tokio::test]
    async fn color_on_success() {
        let options = Options::new().format(ColorFormat::Triple);
        let color = get_color_async(&red_red_blue(), &options).await.unwrap();
        assert_eq!(color, Some(Color::Triple([255, 0, 0])));
    }

    #[tokio::test]
    async fn transparent_image_has_no_color() {
        let source = Fixed(Some(DecodedImage { data: [CLEAR; 4].concat(), width: 2, height: 2 }));
        assert_eq!(get_color_async(&source, &Options::new()).await, Ok(None));
        assert_eq!(
            get_palette_async(&source, 5, &Options::new()).await,
            Ok(Some(Vec::new()))
        );
    }

    #[tokio::test]
    async fn configuration_errors_are_not_swallowed() {
        assert_eq!(
            get_palette_async(&Fixed(None), 1, &Options::new()).await,
            Err(ConfigurationError::SingleColor)
        );
        assert_eq!(
            get_color_async(&Fixed(None), &Options::new().quality(0)).await,
            Err(ConfigurationError::QualityOutOfRange(0))
        );
    }

    #[cfg(feature = "image")]
    #[tokio::test]
    async fn decodes_in_memory_png() {
        let img = RgbaImage::from_fn(4, 4, |x, _| {
            if x < 2 {
                image::Rgba(RED)
            } else {
                image::Rgba(BLUE)
            }
        });
        let mut png = std::io::Cursor::new(Vec::new());
        img.write_to(&mut png, ImageFormat::Png).unwrap();

        let source = ImageSource::bytes(png.into_inner(), Some(ImageFormat::Png));
        let options = Options::new().quality(1);
        let palette = get_palette_async(&source, 2, &options).await.unwrap().unwrap();
        assert_eq!(palette.len(), 2);
        assert!(palette.contains(&Color::Hex("#ff0000".into())));
        assert!(palette.contains(&Color::Hex("#0000ff".into())));
    }

    #[cfg(feature = "image")]
    #[tokio::test]
    async fn undecodable_source_is_absent() {
        let source = ImageSource::bytes(vec![1, 2, 3, 4], None);
        assert_eq!(get_palette_async(&source, 5, &Options::new()).await, Ok(None));

        let source = ImageSource::path("this/file/does/not/exist.png");
        assert_eq!(get_color_async(&source, &Options::new()).await, Ok(None));
    }
}
