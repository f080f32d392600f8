// Copyright @yucwang 2023

use crate::core::material::{ Material, SampledMaterial };
use crate::math::constants::{ INV_PI, Vector2f, Vector3f };
use crate::math::warp::{ sample_cosine_hemisphere, sample_cosine_hemisphere_pdf };

pub fn sample(material: &Material, wi: &Vector3f, u: &Vector2f) -> SampledMaterial {
    if wi.z <= 0.0 {
        return SampledMaterial::invalid();
    }
    let wo = sample_cosine_hemisphere(u);
    evaluate(material, wi, &wo)
}

pub fn evaluate(material: &Material, wi: &Vector3f, wo: &Vector3f) -> SampledMaterial {
    if wi.z <= 0.0 || wo.z <= 0.0 {
        return SampledMaterial::invalid();
    }
    let bsdf = material.diffuse_color * (wo.z * INV_PI);
    let pdf = sample_cosine_hemisphere_pdf(wo.z);

    SampledMaterial::new(*wo, bsdf, pdf, 1.0)
}
