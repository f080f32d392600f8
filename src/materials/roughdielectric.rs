// Copyright @yucwang 2026

use crate::core::material::{ Material, SampledMaterial };
use crate::math::constants::{ Float, Vector2f, Vector3f };
use crate::materials::microfacet::{ fresnel_dielectric, ggx_d, ggx_g, sample_ggx, reflect, refract };

/// Incident-side and transmitted-side indices of refraction for `wi`.
fn interface(material: &Material, wi: &Vector3f) -> (Float, Float) {
    if wi.z > 0.0 {
        (material.ext_ior, material.int_ior)
    } else {
        (material.int_ior, material.ext_ior)
    }
}

pub fn sample(material: &Material, wi: &Vector3f, u: &Vector2f, u_lobe: Float) -> SampledMaterial {
    if wi.z == 0.0 {
        return SampledMaterial::invalid();
    }
    let (eta_i, eta_o) = interface(material, wi);
    let flip: Float = if wi.z > 0.0 { 1.0 } else { -1.0 };
    let wi_up = wi * flip;

    let m = sample_ggx(u, material.alpha());
    let cos_i_m = wi_up.dot(&m);
    if cos_i_m <= 0.0 {
        return SampledMaterial::invalid();
    }

    let f = fresnel_dielectric(cos_i_m, eta_i, eta_o);
    let wo_up = if u_lobe < f {
        let wo = reflect(&wi_up, &m);
        if wo.z <= 0.0 {
            return SampledMaterial::invalid();
        }
        wo
    } else {
        match refract(&wi_up, &m, eta_i / eta_o) {
            Some(wo) if wo.z < 0.0 => wo,
            _ => return SampledMaterial::invalid(),
        }
    };

    evaluate(material, wi, &(wo_up * flip))
}

pub fn evaluate(material: &Material, wi: &Vector3f, wo: &Vector3f) -> SampledMaterial {
    if wi.z == 0.0 || wo.z == 0.0 {
        return SampledMaterial::invalid();
    }
    let (eta_i, eta_o) = interface(material, wi);
    let flip: Float = if wi.z > 0.0 { 1.0 } else { -1.0 };
    let wi = wi * flip;
    let wo_up = wo * flip;
    let cos_i = wi.z;
    let alpha = material.alpha();

    if wo_up.z > 0.0 {
        let m = (wi + wo_up).normalize();
        let cos_i_m = wi.dot(&m);
        let cos_o_m = wo_up.dot(&m);
        if m.z <= 0.0 || cos_i_m <= 0.0 || cos_o_m <= 1e-6 {
            return SampledMaterial::invalid();
        }

        let f = fresnel_dielectric(cos_i_m, eta_i, eta_o);
        let d = ggx_d(m.z, alpha);
        let g = ggx_g(cos_i, wo_up.z, alpha);

        let bsdf = material.specular_color * (d * g * f / (4.0 * cos_i));
        let pdf = f * d * m.z / (4.0 * cos_o_m);
        return SampledMaterial::new(*wo, bsdf, pdf, 1.0);
    }

    // Transmission: the half vector of a refraction event is -(eta * wi + wo).
    let eta = eta_i / eta_o;
    let mut m = -(wi * eta + wo_up);
    if m.norm_squared() <= 0.0 {
        return SampledMaterial::invalid();
    }
    m = m.normalize();
    if m.z < 0.0 {
        m = -m;
    }
    let cos_i_m = wi.dot(&m);
    let cos_o_m = wo_up.dot(&m);
    if cos_i_m <= 0.0 || cos_o_m >= 0.0 {
        return SampledMaterial::invalid();
    }

    let f = fresnel_dielectric(cos_i_m, eta_i, eta_o);
    if f >= 1.0 {
        return SampledMaterial::invalid();
    }
    let d = ggx_d(m.z, alpha);
    let g = ggx_g(cos_i, wo_up.z, alpha);
    let denom = cos_i_m * eta + cos_o_m;
    let denom2 = denom * denom;
    if denom2 <= 1e-12 {
        return SampledMaterial::invalid();
    }

    let bsdf = material.transmittance_color
        * ((1.0 - f) * d * g * (cos_i_m * cos_o_m).abs() / (cos_i * denom2));
    let pdf = (1.0 - f) * d * m.z * cos_o_m.abs() / denom2;
    SampledMaterial::new(*wo, bsdf, pdf, eta_o / eta_i)
}
