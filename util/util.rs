#![allow(dead_code)]

use std::sync::OnceLock;

use chromacut::PixelBuffer;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoroshiro128PlusPlus;

/// An RGBA test image generated from a fixed seed.
pub struct BenchImage {
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl BenchImage {
    pub fn pixels(&self) -> PixelBuffer<'_> {
        PixelBuffer::new(&self.data, self.width, self.height).unwrap()
    }
}

/// Smooth gradients with some noise, similar to a photo.
pub fn gradient(width: u32, height: u32, seed: u64) -> BenchImage {
    let mut rng = Xoroshiro128PlusPlus::seed_from_u64(seed);
    let mut data = Vec::with_capacity((width * height * 4) as usize);
    for y in 0..height {
        for x in 0..width {
            let r = (x * 255 / width.max(1)) as i32;
            let g = (y * 255 / height.max(1)) as i32;
            let b = ((x + y) * 255 / (width + height).max(1)) as i32;
            let [r, g, b] = [r, g, b].map(|c| (c + rng.gen_range(-12..=12)).clamp(0, 255) as u8);
            data.extend_from_slice(&[r, g, b, u8::MAX]);
        }
    }

    BenchImage { name: format!("gradient_{width}x{height}"), width, height, data }
}

/// Uniformly random colors where roughly a quarter of the pixels are transparent.
pub fn noise(width: u32, height: u32, seed: u64) -> BenchImage {
    let mut rng = Xoroshiro128PlusPlus::seed_from_u64(seed);
    let data = (0..width * height)
        .flat_map(|_| {
            let alpha = if rng.gen_ratio(1, 4) { 0 } else { u8::MAX };
            [rng.gen(), rng.gen(), rng.gen(), alpha]
        })
        .collect();

    BenchImage { name: format!("noise_{width}x{height}"), width, height, data }
}

pub fn load_bench_images() -> Vec<BenchImage> {
    vec![
        gradient(480, 270, 0),
        gradient(1920, 1080, 1),
        noise(480, 270, 2),
        noise(1920, 1080, 3),
    ]
}

static BENCH_IMAGES: OnceLock<Vec<BenchImage>> = OnceLock::new();

pub fn bench_images() -> &'static [BenchImage] {
    BENCH_IMAGES.get_or_init(load_bench_images)
}
