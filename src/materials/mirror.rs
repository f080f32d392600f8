// Copyright @yucwang 2026

use crate::core::material::{ Material, SampledMaterial };
use crate::math::constants::{ Float, Vector3f };

/// Cosine of the largest angle still treated as the mirror direction.
const MIRROR_COS_TOLERANCE: Float = 0.99999;

fn mirror_direction(wi: &Vector3f) -> Vector3f {
    Vector3f::new(-wi.x, -wi.y, wi.z)
}

pub fn sample(material: &Material, wi: &Vector3f) -> SampledMaterial {
    if wi.z <= 0.0 {
        return SampledMaterial::invalid();
    }
    SampledMaterial::delta(mirror_direction(wi), material.specular_color, 1.0, 1.0)
}

pub fn evaluate(material: &Material, wi: &Vector3f, wo: &Vector3f) -> SampledMaterial {
    if wi.z <= 0.0 || wo.z <= 0.0 {
        return SampledMaterial::invalid();
    }
    if mirror_direction(wi).dot(&wo.normalize()) < MIRROR_COS_TOLERANCE {
        return SampledMaterial::invalid();
    }
    SampledMaterial::delta(*wo, material.specular_color, 1.0, 1.0)
}
