//! Median cut color quantization.
//!
//! The samples are recursively split into boxes: the box to split next is taken from a priority
//! queue, and it is cut along the color channel with the widest range at the median sample.
//! Each final box contributes its average color to the palette.
//!
//! Box extents are tracked on a 5-bit-per-channel histogram grid (`32` levels per channel),
//! so samples that fall into the same histogram bin are never separated.
//! This bounds the work per split and gives a coarse, deterministic tie-break.
//!
//! The priority follows the modified median cut used by Leptonica:
//! the first `75%` of the boxes are created by always splitting the most populated box,
//! and the rest by splitting the box with the largest population times volume.
//! Ties are broken in favor of the box that was created first.

// Referenced paper:
// Paul Heckbert, Color image quantization for frame buffer display,
// ACM SIGGRAPH Computer Graphics, vol. 16, no. 3, 297–307, 1982.
// https://doi.org/10.1145/965145.801294

use crate::{PaletteSize, QuantizeOutput};
use palette::{cast, Srgb};
use std::{
    cmp::{Ordering, Reverse},
    collections::BinaryHeap,
    ops::Range,
};

/// The number of color channels.
const N: usize = 3;

/// The number of significant bits kept per channel for the histogram grid.
const SIGBITS: u32 = 5;

/// The number of histogram bins per channel.
const BINS: usize = 1 << SIGBITS;

/// Returns the histogram bin of each channel of the given color.
#[inline]
fn bin(color: Srgb<u8>) -> [u8; N] {
    cast::into_array(color).map(|c| c >> (u8::BITS - SIGBITS))
}

/// A box of samples, given by a range into the (reordered) sample slice.
#[derive(Debug, Clone)]
struct ColorBox {
    /// The samples belonging to this box.
    range: Range<usize>,
    /// The lower histogram bin in each channel (inclusive).
    min: [u8; N],
    /// The upper histogram bin in each channel (inclusive).
    max: [u8; N],
    /// The order in which the box was created.
    seq: u32,
}

impl ColorBox {
    /// Creates a new box over the given range of `samples`, computing its extents.
    fn new(samples: &[Srgb<u8>], range: Range<usize>, seq: u32) -> Self {
        debug_assert!(!range.is_empty());

        let mut min = [u8::MAX; N];
        let mut max = [0; N];
        for &color in &samples[range.clone()] {
            let bin = bin(color);
            for c in 0..N {
                min[c] = min[c].min(bin[c]);
                max[c] = max[c].max(bin[c]);
            }
        }

        Self { range, min, max, seq }
    }

    /// The number of samples in the box.
    #[allow(clippy::cast_possible_truncation)]
    fn population(&self) -> u32 {
        self.range.len() as u32
    }

    /// The number of histogram bins the box spans.
    fn volume(&self) -> u32 {
        (0..N)
            .map(|c| u32::from(self.max[c] - self.min[c]) + 1)
            .product()
    }

    /// Whether or not all samples fall into a single histogram bin.
    fn is_single_bin(&self) -> bool {
        self.min == self.max
    }

    /// The channel with the widest range of bins, preferring red, then green, then blue.
    fn widest_channel(&self) -> usize {
        let mut widest = 0;
        for c in 1..N {
            if self.max[c] - self.min[c] > self.max[widest] - self.min[widest] {
                widest = c;
            }
        }
        widest
    }
}

/// The key used to decide which box to split next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Priority {
    /// Split the most populated box.
    Population,
    /// Split the box with the largest population times volume.
    PopulationVolume,
}

impl Priority {
    /// Returns the priority of the given box, higher is split first.
    fn key(self, cbox: &ColorBox) -> u64 {
        match self {
            Priority::Population => u64::from(cbox.population()),
            Priority::PopulationVolume => u64::from(cbox.population()) * u64::from(cbox.volume()),
        }
    }
}

/// A box in the priority queue.
struct Queued {
    /// The priority of the box.
    key: u64,
    /// The box.
    cbox: ColorBox,
}

impl Queued {
    /// Creates a new queue entry for the given box.
    fn new(cbox: ColorBox, priority: Priority) -> Self {
        Self { key: priority.key(&cbox), cbox }
    }
}

impl PartialOrd for Queued {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Queued {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.key, Reverse(self.cbox.seq)).cmp(&(other.key, Reverse(other.cbox.seq)))
    }
}

impl Eq for Queued {}

impl PartialEq for Queued {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

/// The state for one run of median cut.
struct MedianCut<'a> {
    /// The samples, reordered in place as boxes are split.
    samples: &'a mut [Srgb<u8>],
    /// Boxes that can still be split.
    queue: BinaryHeap<Queued>,
    /// Boxes that cannot be split any further.
    done: Vec<ColorBox>,
    /// The sequence number for the next box.
    next_seq: u32,
}

impl<'a> MedianCut<'a> {
    /// Creates a new [`MedianCut`] with a single box holding all `samples`.
    fn new(samples: &'a mut [Srgb<u8>]) -> Self {
        let mut data = Self {
            samples,
            queue: BinaryHeap::new(),
            done: Vec::new(),
            next_seq: 0,
        };

        let root = data.new_box(0..data.samples.len());
        data.push(root, Priority::Population);
        data
    }

    /// Creates a new box over the given range of samples.
    fn new_box(&mut self, range: Range<usize>) -> ColorBox {
        let cbox = ColorBox::new(&*self.samples, range, self.next_seq);
        self.next_seq += 1;
        cbox
    }

    /// Adds a box to the queue, or to the finished boxes if it cannot be split.
    fn push(&mut self, cbox: ColorBox, priority: Priority) {
        if cbox.is_single_bin() {
            self.done.push(cbox);
        } else {
            self.queue.push(Queued::new(cbox, priority));
        }
    }

    /// The current number of boxes.
    fn num_boxes(&self) -> usize {
        self.queue.len() + self.done.len()
    }

    /// Cuts the given box at the median sample along its widest channel.
    fn split(&mut self, cbox: &ColorBox) -> (ColorBox, ColorBox) {
        let channel = cbox.widest_channel();
        let lo = usize::from(cbox.min[channel]);
        let hi = usize::from(cbox.max[channel]);
        debug_assert!(lo < hi);

        let samples = &mut self.samples[cbox.range.clone()];
        samples.sort_by_key(|&color| bin(color)[channel]);

        let mut hist = [0u32; BINS];
        for &color in samples.iter() {
            hist[usize::from(bin(color)[channel])] += 1;
        }

        // first bin where at least half of the samples are at or below it,
        // but never the last bin so that the upper box is not empty
        let total = cbox.population();
        let mut below = 0;
        let mut cut = lo;
        for (b, &count) in hist.iter().enumerate().take(hi).skip(lo) {
            below += count;
            cut = b;
            if reaches_half(below, total) {
                break;
            }
        }

        let mid = cbox.range.start + hist[lo..=cut].iter().sum::<u32>() as usize;

        log::trace!(
            "splitting box {} ({} samples) along channel {channel} at bin {cut}",
            cbox.seq,
            total,
        );

        let lower = self.new_box(cbox.range.start..mid);
        let upper = self.new_box(mid..cbox.range.end);
        (lower, upper)
    }

    /// Splits boxes in priority order until there are `target` boxes or no box can be split.
    fn split_until(&mut self, target: usize, priority: Priority) {
        while self.num_boxes() < target {
            let Some(Queued { cbox, .. }) = self.queue.pop() else {
                break;
            };

            let (lower, upper) = self.split(&cbox);
            self.push(lower, priority);
            self.push(upper, priority);
        }
    }

    /// Returns the final boxes for a palette of at most `k` colors, in palette order.
    fn boxes(mut self, k: usize) -> (Vec<ColorBox>, &'a [Srgb<u8>]) {
        self.split_until((k * 3).div_ceil(4), Priority::Population);

        self.queue = std::mem::take(&mut self.queue)
            .into_iter()
            .map(|Queued { cbox, .. }| Queued::new(cbox, Priority::PopulationVolume))
            .collect();

        self.split_until(k, Priority::PopulationVolume);

        let Self { samples, queue, mut done, .. } = self;
        done.extend(queue.into_iter().map(|queued| queued.cbox));
        done.sort_by_key(|cbox| (Reverse(Priority::PopulationVolume.key(cbox)), cbox.seq));

        (done, samples)
    }
}

/// Whether `below` samples make up at least half of `total`.
#[inline]
fn reaches_half(below: u32, total: u32) -> bool {
    u64::from(below) * 2 >= u64::from(total)
}

/// Returns the rounded average color of the given samples.
fn average(samples: &[Srgb<u8>]) -> Srgb<u8> {
    debug_assert!(!samples.is_empty());

    let mut sums = [0u64; N];
    for &color in samples {
        for (sum, c) in sums.iter_mut().zip(cast::into_array(color)) {
            *sum += u64::from(c);
        }
    }

    let n = samples.len() as u64;
    #[allow(clippy::cast_possible_truncation)]
    let mean = sums.map(|sum| ((sum + n / 2) / n).min(u64::from(u8::MAX)) as u8);
    cast::from_array(mean)
}

/// Computes a color palette from the given `samples` with at most `palette_size` entries.
///
/// The samples are reordered in place.
/// The palette is ordered by box population times box volume (descending),
/// with ties in favor of the box created first. The first color therefore approximates,
/// but is not guaranteed to be, the color of the largest cluster.
///
/// The palette has fewer than `palette_size` colors if the samples cannot be split
/// into that many boxes (e.g., there are fewer distinct colors than requested).
/// An empty [`QuantizeOutput`] is returned if `samples` is empty or `palette_size` is `0`.
#[must_use]
pub fn palette(samples: &mut [Srgb<u8>], palette_size: PaletteSize) -> QuantizeOutput<Srgb<u8>> {
    if palette_size.into_inner() == 0 || samples.is_empty() {
        return QuantizeOutput::default();
    }

    let k = usize::from(palette_size.into_inner());
    let (boxes, samples) = MedianCut::new(samples).boxes(k);

    let (palette, counts) = boxes
        .iter()
        .map(|cbox| (average(&samples[cbox.range.clone()]), cbox.population()))
        .unzip();

    QuantizeOutput { palette, counts }
}
