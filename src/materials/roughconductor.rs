// Copyright @yucwang 2026

use crate::core::material::{ Material, SampledMaterial };
use crate::math::constants::{ Vector2f, Vector3f };
use crate::materials::microfacet::{ fresnel_schlick, ggx_d, ggx_g, sample_ggx, reflect };

pub fn sample(material: &Material, wi: &Vector3f, u: &Vector2f) -> SampledMaterial {
    if wi.z <= 0.0 {
        return SampledMaterial::invalid();
    }
    let m = sample_ggx(u, material.alpha());
    if wi.dot(&m) <= 0.0 {
        return SampledMaterial::invalid();
    }
    let wo = reflect(wi, &m);
    if wo.z <= 0.0 {
        return SampledMaterial::invalid();
    }
    evaluate(material, wi, &wo)
}

pub fn evaluate(material: &Material, wi: &Vector3f, wo: &Vector3f) -> SampledMaterial {
    let cos_i = wi.z;
    let cos_o = wo.z;
    if cos_i <= 1e-6 || cos_o <= 1e-6 {
        return SampledMaterial::invalid();
    }

    let m = wi + wo;
    if m.norm_squared() <= 0.0 {
        return SampledMaterial::invalid();
    }
    let m = m.normalize();
    let cos_i_m = wi.dot(&m);
    let cos_o_m = wo.dot(&m);
    if m.z <= 0.0 || cos_i_m <= 0.0 || cos_o_m <= 1e-6 {
        return SampledMaterial::invalid();
    }

    let alpha = material.alpha();
    let d = ggx_d(m.z, alpha);
    let g = ggx_g(cos_i, cos_o, alpha);
    let f = fresnel_schlick(material.specular_color, cos_i_m);

    let bsdf = f * (d * g / (4.0 * cos_i));
    let pdf = d * m.z / (4.0 * cos_o_m);

    SampledMaterial::new(*wo, bsdf, pdf, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::LcgRng;
    use crate::math::spectrum::RGBSpectrum;

    #[test]
    fn test_sample_agrees_with_evaluate() {
        let material = Material::rough_conductor(RGBSpectrum::new(0.9, 0.6, 0.3), 0.5);
        let wi = Vector3f::new(0.4, 0.1, 0.9).normalize();
        let mut rng = LcgRng::new(9);
        for _ in 0..256 {
            let s = sample(&material, &wi, &rng.next_2d());
            if !s.valid {
                continue;
            }
            let e = evaluate(&material, &wi, &s.direction);
            assert!(e.valid);
            assert!((e.pdf - s.pdf).abs() <= 1e-3 * s.pdf.max(1.0));
            for c in 0..3 {
                assert!((e.bsdf[c] - s.bsdf[c]).abs() <= 1e-3 * s.bsdf[c].max(1.0));
            }
        }
    }

    #[test]
    fn test_white_furnace_low_roughness() {
        let material = Material::rough_conductor(RGBSpectrum::one(), 0.2);
        let wi = Vector3f::new(0.2, 0.0, 0.98).normalize();
        let mut rng = LcgRng::new(10);
        let n = 20_000;
        let mut sum = 0.0f64;
        for _ in 0..n {
            let s = sample(&material, &wi, &rng.next_2d());
            if s.valid {
                sum += s.weight.average() as f64;
            }
        }
        let albedo = sum / n as f64;
        assert!((albedo - 1.0).abs() < 0.02, "albedo = {}", albedo);
    }

    #[test]
    fn test_opposite_hemispheres_are_invalid() {
        let material = Material::rough_conductor(RGBSpectrum::one(), 0.5);
        let s = evaluate(&material, &Vector3f::z(), &Vector3f::new(0.0, 0.0, -1.0));
        assert!(!s.valid);
    }
}
