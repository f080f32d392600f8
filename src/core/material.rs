// Copyright @yucwang 2023

use crate::math::constants::{ Float, Vector3f };
use crate::math::spectrum::RGBSpectrum;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MaterialKind {
    Diffuse,
    Mirror,
    RoughConductor,
    Plastic,
    Dielectric,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Material {
    pub kind: MaterialKind,
    pub diffuse_color: RGBSpectrum,
    pub specular_color: RGBSpectrum,
    pub transmittance_color: RGBSpectrum,
    pub roughness: Float,
    pub ext_ior: Float,
    pub int_ior: Float,
    pub emissive: RGBSpectrum,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            kind: MaterialKind::Diffuse,
            diffuse_color: RGBSpectrum::splat(0.5),
            specular_color: RGBSpectrum::one(),
            transmittance_color: RGBSpectrum::one(),
            roughness: 0.0,
            ext_ior: 1.0,
            int_ior: 1.5,
            emissive: RGBSpectrum::default(),
        }
    }
}

impl Material {
    pub fn diffuse(color: RGBSpectrum) -> Self {
        Self { kind: MaterialKind::Diffuse, diffuse_color: color, ..Default::default() }
    }

    pub fn mirror(color: RGBSpectrum) -> Self {
        Self { kind: MaterialKind::Mirror, specular_color: color, ..Default::default() }
    }

    pub fn rough_conductor(color: RGBSpectrum, roughness: Float) -> Self {
        Self {
            kind: MaterialKind::RoughConductor,
            specular_color: color,
            roughness: roughness.max(0.0).min(1.0),
            ..Default::default()
        }
    }

    pub fn plastic(diffuse: RGBSpectrum, roughness: Float, int_ior: Float) -> Self {
        Self {
            kind: MaterialKind::Plastic,
            diffuse_color: diffuse,
            roughness: roughness.max(0.0).min(1.0),
            int_ior,
            ..Default::default()
        }
    }

    pub fn dielectric(roughness: Float, ext_ior: Float, int_ior: Float) -> Self {
        Self {
            kind: MaterialKind::Dielectric,
            roughness: roughness.max(0.0).min(1.0),
            ext_ior,
            int_ior,
            ..Default::default()
        }
    }

    pub fn emitter(emissive: RGBSpectrum) -> Self {
        Self {
            kind: MaterialKind::Diffuse,
            diffuse_color: RGBSpectrum::default(),
            emissive,
            ..Default::default()
        }
    }

    pub fn is_emissive(&self) -> bool {
        !self.emissive.is_black()
    }

    /// GGX alpha; roughness is perceptual.
    pub fn alpha(&self) -> Float {
        self.roughness * self.roughness
    }
}

/// Result of sampling or evaluating a material.
///
/// `bsdf` is the cosine-weighted scattering value toward `direction`,
/// so `weight = bsdf / pdf` is the factor applied to path throughput.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SampledMaterial {
    pub direction: Vector3f,
    pub bsdf: RGBSpectrum,
    pub pdf: Float,
    pub weight: RGBSpectrum,
    pub eta: Float,
    pub delta: bool,
    pub valid: bool,
}

impl Default for SampledMaterial {
    fn default() -> Self {
        Self {
            direction: Vector3f::zeros(),
            bsdf: RGBSpectrum::default(),
            pdf: 0.0,
            weight: RGBSpectrum::default(),
            eta: 1.0,
            delta: false,
            valid: false,
        }
    }
}

impl SampledMaterial {
    pub fn invalid() -> Self {
        Self::default()
    }

    pub fn new(direction: Vector3f, bsdf: RGBSpectrum, pdf: Float, eta: Float) -> Self {
        if !(pdf > 0.0) || !pdf.is_finite() || !bsdf.is_finite() {
            return Self::invalid();
        }
        Self {
            direction,
            bsdf,
            pdf,
            weight: bsdf / pdf,
            eta,
            delta: false,
            valid: true,
        }
    }

    /// Delta lobes carry their weight directly; `pdf` is the discrete lobe probability.
    pub fn delta(direction: Vector3f, weight: RGBSpectrum, pdf: Float, eta: Float) -> Self {
        if !(pdf > 0.0) || !weight.is_finite() {
            return Self::invalid();
        }
        Self {
            direction,
            bsdf: weight * pdf,
            pdf,
            weight,
            eta,
            delta: true,
            valid: true,
        }
    }
}
