//! Reduces an RGBA image to a list of opaque RGB samples.
//!
//! Every [`Quality`]-th pixel is visited, and pixels with an alpha value at or below
//! [`ALPHA_THRESHOLD`] are treated as background and skipped.
//! Larger strides linearly reduce the amount of work at the cost of possibly missing
//! colors that only cover a small part of the image.

use crate::{PixelBuffer, Quality, ALPHA_THRESHOLD};
use palette::Srgb;
#[cfg(feature = "threads")]
use rayon::prelude::*;

/// Channel values above this count as white for [`SampleFilter::ignore_white`].
pub const WHITE_THRESHOLD: u8 = 250;

/// Additional rules for which visited pixels are kept.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SampleFilter {
    /// Skip pixels whose red, green and blue channels are all above [`WHITE_THRESHOLD`].
    pub ignore_white: bool,
}

impl SampleFilter {
    /// Returns the sample for the given `[r, g, b, a]` pixel, if it should be kept.
    #[inline]
    fn keep(self, pixel: &[u8]) -> Option<Srgb<u8>> {
        let &[r, g, b, a] = pixel else {
            return None;
        };

        if a <= ALPHA_THRESHOLD
            || (self.ignore_white && r > WHITE_THRESHOLD && g > WHITE_THRESHOLD && b > WHITE_THRESHOLD)
        {
            None
        } else {
            Some(Srgb::new(r, g, b))
        }
    }
}

/// Samples every `quality`-th pixel of `pixels`, skipping (mostly) transparent ones.
///
/// The samples are returned in the order the pixels were visited.
/// The result is empty if the image has no pixels or every visited pixel was skipped.
#[must_use]
pub fn sample(pixels: PixelBuffer, quality: Quality, filter: SampleFilter) -> Vec<Srgb<u8>> {
    pixels
        .pixels()
        .step_by(quality.stride())
        .filter_map(|pixel| filter.keep(pixel))
        .collect()
}

/// Samples every `quality`-th pixel of `pixels` in parallel, skipping (mostly) transparent ones.
///
/// The output is identical to [`sample`].
#[must_use]
#[cfg(feature = "threads")]
pub fn sample_par(pixels: PixelBuffer, quality: Quality, filter: SampleFilter) -> Vec<Srgb<u8>> {
    pixels
        .as_bytes()
        .par_chunks_exact(4)
        .step_by(quality.stride())
        .filter_map(|pixel| filter.keep(pixel))
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::tests::*;

    fn quality(stride: u32) -> Quality {
        Quality::new(stride).unwrap()
    }

    #[test]
    fn empty_input() {
        let samples = sample(PixelBuffer::empty(), Quality::BEST, SampleFilter::default());
        assert!(samples.is_empty());
    }

    #[test]
    fn transparent_input() {
        let data = [CLEAR; 16].concat();
        let pixels = PixelBuffer::new(&data, 4, 4).unwrap();
        assert!(sample(pixels, Quality::BEST, SampleFilter::default()).is_empty());
    }

    #[test]
    fn alpha_threshold() {
        let data = [[10, 20, 30, 125], [40, 50, 60, 126], [70, 80, 90, 0]].concat();
        let pixels = PixelBuffer::new(&data, 3, 1).unwrap();
        let samples = sample(pixels, Quality::BEST, SampleFilter::default());
        assert_eq!(samples, vec![Srgb::new(40, 50, 60)]);
    }

    #[test]
    fn stride_visits_every_nth_pixel() {
        let colors = test_colors(10);
        let data = opaque_rgba(&colors);
        let pixels = PixelBuffer::new(&data, 5, 2).unwrap();

        let samples = sample(pixels, quality(3), SampleFilter::default());
        assert_eq!(samples, vec![colors[0], colors[3], colors[6], colors[9]]);

        let samples = sample(pixels, Quality::BEST, SampleFilter::default());
        assert_eq!(samples, colors);

        let samples = sample(pixels, quality(100), SampleFilter::default());
        assert_eq!(samples, vec![colors[0]]);
    }

    #[test]
    fn ignore_white() {
        let data = [[255, 255, 255, 255], [251, 251, 251, 255], [250, 255, 255, 255]].concat();
        let pixels = PixelBuffer::new(&data, 3, 1).unwrap();

        let samples = sample(pixels, Quality::BEST, SampleFilter::default());
        assert_eq!(samples.len(), 3);

        let samples = sample(pixels, Quality::BEST, SampleFilter { ignore_white: true });
        assert_eq!(samples, vec![Srgb::new(250, 255, 255)]);
    }

    #[test]
    fn larger_stride_never_samples_more_opaque_pixels() {
        let data = opaque_rgba(&test_data_1024());
        let pixels = PixelBuffer::new(&data, 32, 32).unwrap();

        let counts = (1..=40)
            .map(|q| sample(pixels, quality(q), SampleFilter::default()).len())
            .collect::<Vec<_>>();

        assert_eq!(counts[0], 1024);
        for pair in counts.windows(2) {
            assert!(pair[0] >= pair[1]);
        }
    }

    #[test]
    #[cfg(feature = "threads")]
    fn single_and_multi_threaded_match() {
        let data = random_rgba(4096);
        let pixels = PixelBuffer::new(&data, 64, 64).unwrap();

        for q in [1, 2, 7, 10, 5000] {
            for ignore_white in [false, true] {
                let filter = SampleFilter { ignore_white };
                assert_eq!(
                    sample(pixels, quality(q), filter),
                    sample_par(pixels, quality(q), filter)
                );
            }
        }
    }
}
