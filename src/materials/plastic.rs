// Copyright @yucwang 2026

use crate::core::material::{ Material, SampledMaterial };
use crate::math::constants::{ Float, INV_PI, Vector2f, Vector3f };
use crate::math::warp::sample_cosine_hemisphere;
use crate::materials::microfacet::{ fresnel_dielectric, ggx_d, ggx_g, sample_ggx, reflect };

/// Probability of picking the specular lobe, fixed per incident direction
/// so that the mixture density in `evaluate` is exact.
///
/// Uses Fresnel at the macro normal rather than at the sampled microfacet;
/// the specular term of the bsdf still uses the microfacet Fresnel.
fn specular_probability(material: &Material, wi: &Vector3f) -> Float {
    fresnel_dielectric(wi.z, material.ext_ior, material.int_ior)
}

pub fn sample(material: &Material, wi: &Vector3f, u: &Vector2f, u_lobe: Float) -> SampledMaterial {
    if wi.z <= 0.0 {
        return SampledMaterial::invalid();
    }
    let wo = if u_lobe < specular_probability(material, wi) {
        let m = sample_ggx(u, material.alpha());
        reflect(wi, &m)
    } else {
        sample_cosine_hemisphere(u)
    };
    evaluate(material, wi, &wo)
}

pub fn evaluate(material: &Material, wi: &Vector3f, wo: &Vector3f) -> SampledMaterial {
    let cos_i = wi.z;
    let cos_o = wo.z;
    if cos_i <= 1e-6 || cos_o <= 1e-6 {
        return SampledMaterial::invalid();
    }
    let m = (wi + wo).normalize();
    let cos_o_m = wo.dot(&m);
    if cos_o_m <= 1e-6 {
        return SampledMaterial::invalid();
    }

    let alpha = material.alpha();
    let f = fresnel_dielectric(wi.dot(&m), material.ext_ior, material.int_ior);
    let d = ggx_d(m.z, alpha);
    let g = ggx_g(cos_i, cos_o, alpha);

    let diffuse = material.diffuse_color * (INV_PI * cos_o * (1.0 - f));
    let specular = material.specular_color * (f * d * g / (4.0 * cos_i));

    let p_spec = specular_probability(material, wi);
    let pdf = (1.0 - p_spec) * INV_PI * cos_o + p_spec * d * m.z / (4.0 * cos_o_m);

    SampledMaterial::new(*wo, diffuse + specular, pdf, 1.0)
}
