// Copyright @yucwang 2026

//! Material sampling and evaluation.
//!
//! Both entry points take world-space vectors: `normal` is the shading
//! normal, `wi` points from the surface toward the previous path vertex and
//! `wo` away from the surface. Every material except the dielectric is
//! one-sided and treats the normal as facing `wi`.

pub mod diffuse;
pub mod microfacet;
pub mod mirror;
pub mod plastic;
pub mod roughconductor;
pub mod roughdielectric;

use crate::core::material::{ Material, MaterialKind, SampledMaterial };
use crate::core::sampler::BounceSamples;
use crate::math::constants::{ Float, Vector3f };
use crate::math::frame::Frame;
use crate::materials::microfacet::MIN_ALPHA;

/// True when the material only scatters into a discrete set of directions,
/// so no light sample can ever match it.
pub fn is_delta(material: &Material) -> bool {
    match material.kind {
        MaterialKind::Mirror => true,
        MaterialKind::RoughConductor | MaterialKind::Dielectric => material.alpha() < MIN_ALPHA,
        MaterialKind::Diffuse | MaterialKind::Plastic => false,
    }
}

fn shading_frame(material: &Material, normal: &Vector3f, wi: &Vector3f) -> Frame {
    let facing = match material.kind {
        MaterialKind::Dielectric => *normal,
        _ if normal.dot(wi) < 0.0 => -normal,
        _ => *normal,
    };
    Frame::from_normal(&facing)
}

pub fn sample(material: &Material,
              normal: &Vector3f,
              wi: &Vector3f,
              samples: &BounceSamples) -> SampledMaterial {
    let frame = shading_frame(material, normal, wi);
    let wi_local = frame.to_local(wi);
    let u = &samples.bsdf;
    let u_lobe: Float = samples.lobe;

    let mut result = match material.kind {
        MaterialKind::Diffuse => diffuse::sample(material, &wi_local, u),
        MaterialKind::Mirror => mirror::sample(material, &wi_local),
        MaterialKind::RoughConductor => roughconductor::sample(material, &wi_local, u),
        MaterialKind::Plastic => plastic::sample(material, &wi_local, u, u_lobe),
        MaterialKind::Dielectric => roughdielectric::sample(material, &wi_local, u, u_lobe),
    };
    if result.valid {
        result.direction = frame.from_local(&result.direction).normalize();
        result.delta = result.delta || is_delta(material);
    }
    result
}

pub fn evaluate(material: &Material,
                normal: &Vector3f,
                wi: &Vector3f,
                wo: &Vector3f) -> SampledMaterial {
    let frame = shading_frame(material, normal, wi);
    let wi_local = frame.to_local(wi);
    let wo_local = frame.to_local(wo);

    let mut result = match material.kind {
        MaterialKind::Diffuse => diffuse::evaluate(material, &wi_local, &wo_local),
        MaterialKind::Mirror => mirror::evaluate(material, &wi_local, &wo_local),
        MaterialKind::RoughConductor => roughconductor::evaluate(material, &wi_local, &wo_local),
        MaterialKind::Plastic => plastic::evaluate(material, &wi_local, &wo_local),
        MaterialKind::Dielectric => roughdielectric::evaluate(material, &wi_local, &wo_local),
    };
    if result.valid {
        result.direction = *wo;
        result.delta = result.delta || is_delta(material);
    }
    result
}
