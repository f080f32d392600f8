// Copyright @yucwang 2026

use crate::core::rng::LcgRng;
use crate::math::constants::{Float, Vector2f};

/// The uniform variates one bounce consumes.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BounceSamples {
    /// Direction sampling (cosine lobe or microfacet normal).
    pub bsdf: Vector2f,
    /// Lobe selection for multi-lobe materials.
    pub lobe: Float,
    /// Emitter triangle selection.
    pub emitter: Float,
    /// Point on the selected emitter triangle.
    pub point: Vector2f,
    pub roulette: Float,
}

impl BounceSamples {
    pub fn from_rng(rng: &mut LcgRng) -> Self {
        let bsdf = rng.next_2d();
        let lobe = rng.next_f32();
        let emitter = rng.next_f32();
        let point = rng.next_2d();
        let roulette = rng.next_f32();
        Self { bsdf, lobe, emitter, point, roulette }
    }
}

pub trait RandomSampleSource: Sync {
    /// Independent variates for `bounce` of the path at `pixel` during tick `frame`.
    fn next(&self, pixel: usize, frame: u64, bounce: u32) -> BounceSamples;
}

/// Stateless source hashing (seed, pixel, frame, bounce) into an LCG stream.
pub struct HashedSampleSource {
    seed: u64,
}

impl HashedSampleSource {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

fn mix64(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
    z ^ (z >> 31)
}

impl RandomSampleSource for HashedSampleSource {
    fn next(&self, pixel: usize, frame: u64, bounce: u32) -> BounceSamples {
        let mut h = mix64(self.seed ^ 0x9e3779b97f4a7c15);
        h = mix64(h ^ pixel as u64);
        h = mix64(h ^ frame);
        h = mix64(h ^ bounce as u64);
        let mut rng = LcgRng::new(h);
        BounceSamples::from_rng(&mut rng)
    }
}
