// Copyright @yucwang 2026

use crate::math::bitmap::Bitmap;
use crate::math::constants::Float;
use crate::math::spectrum::RGBSpectrum;

/// Receives the radiance of every completed path.
pub trait FrameAccumulator {
    fn submit(&mut self, pixel: usize, radiance: RGBSpectrum);
}

/// Per-pixel running mean over all submitted paths.
pub struct RunningAverage {
    sum: Bitmap,
    counts: Vec<u32>,
}

impl RunningAverage {
    pub fn new(width: usize, height: usize) -> Self {
        Self { sum: Bitmap::new(width, height), counts: vec![0; width * height] }
    }

    pub fn width(&self) -> usize {
        self.sum.width()
    }

    pub fn height(&self) -> usize {
        self.sum.height()
    }

    pub fn count(&self, pixel: usize) -> u32 {
        self.counts[pixel]
    }

    pub fn mean(&self, pixel: usize) -> RGBSpectrum {
        match self.counts[pixel] {
            0 => RGBSpectrum::default(),
            n => RGBSpectrum::from_vector(self.sum.pixel(pixel)) / n as Float,
        }
    }

    pub fn to_bitmap(&self) -> Bitmap {
        let mut out = Bitmap::new(self.width(), self.height());
        for pixel in 0..self.counts.len() {
            *out.pixel_mut(pixel) = self.mean(pixel).to_vector();
        }
        out
    }
}

impl FrameAccumulator for RunningAverage {
    fn submit(&mut self, pixel: usize, radiance: RGBSpectrum) {
        if !radiance.is_finite() {
            log::warn!("Dropping non-finite radiance sample at pixel {}.", pixel);
            return;
        }
        *self.sum.pixel_mut(pixel) += radiance.to_vector();
        self.counts[pixel] += 1;
    }
}
