// Copyright @yucwang 2026

use crate::core::sampler::BounceSamples;
use crate::core::scene::{ SceneData, SceneQuery };
use crate::emitters::table::EmitterTable;
use crate::math::constants::{ Float, Vector3f };
use crate::math::ray::Ray3f;
use crate::math::spectrum::RGBSpectrum;

/// Read-only scene resources shared by every ray of a render.
#[derive(Clone, Copy)]
pub struct SceneContext<'a> {
    pub scene: &'a SceneData,
    pub query: &'a dyn SceneQuery,
    pub emitters: &'a EmitterTable,
}

/// Path state of one pixel, carried from tick to tick.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RayState {
    pub origin: Vector3f,
    pub direction: Vector3f,
    pub throughput: RGBSpectrum,
    pub radiance: RGBSpectrum,
    pub bounce_count: u32,
    /// Solid-angle pdf of the last BSDF sample, used to weight emitter hits.
    pub material_pdf: Float,
    /// The last BSDF sample came from a delta lobe.
    pub delta_bounce: bool,
    pub completed: bool,
}

impl RayState {
    pub fn new(ray: &Ray3f) -> Self {
        Self {
            origin: ray.origin(),
            direction: ray.dir(),
            throughput: RGBSpectrum::one(),
            radiance: RGBSpectrum::default(),
            bounce_count: 0,
            material_pdf: 0.0,
            delta_bounce: false,
            completed: false,
        }
    }

    pub fn reset(&mut self, ray: &Ray3f) {
        *self = Self::new(ray);
    }

    pub fn ray(&self) -> Ray3f {
        Ray3f::new(self.origin, self.direction, Some(0.0), None)
    }
}

pub trait Integrator: Sync {
    /// Advances an active path by exactly one bounce. Completed paths are left untouched.
    fn bounce(&self, ctx: &SceneContext<'_>, state: &mut RayState, samples: &BounceSamples);
}
