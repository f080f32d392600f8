// Copyright @yucwang 2026

use crate::math::constants::{Float, Vector2f, Vector3f, PI};
use crate::math::spectrum::RGBSpectrum;

/// Smallest GGX alpha the distribution functions accept.
pub const MIN_ALPHA: Float = 1e-3;

fn clamp01(v: Float) -> Float {
    if v < 0.0 {
        0.0
    } else if v > 1.0 {
        1.0
    } else {
        v
    }
}

pub fn ggx_d(cos_theta: Float, alpha: Float) -> Float {
    if cos_theta <= 0.0 {
        return 0.0;
    }
    let a = alpha.max(MIN_ALPHA);
    let a2 = a * a;
    let cos2 = cos_theta * cos_theta;
    let denom = cos2 * (a2 - 1.0) + 1.0;
    a2 / (PI * denom * denom)
}

pub fn ggx_g1(cos_theta: Float, alpha: Float) -> Float {
    if cos_theta <= 0.0 {
        return 0.0;
    }
    let a = alpha.max(MIN_ALPHA);
    let cos2 = cos_theta * cos_theta;
    let sin2 = (1.0 - cos2).max(0.0);
    if sin2 <= 0.0 {
        return 1.0;
    }
    let tan2 = sin2 / cos2.max(1e-6);
    let root = (1.0 + a * a * tan2).sqrt();
    2.0 / (1.0 + root)
}

/// Separable Smith shadowing-masking term.
pub fn ggx_g(cos_i: Float, cos_o: Float, alpha: Float) -> Float {
    ggx_g1(cos_i.abs(), alpha) * ggx_g1(cos_o.abs(), alpha)
}

/// Density of `sample_ggx` w.r.t. the microfacet normal: D(m) * cos(theta_m).
pub fn pdf_ggx(m: &Vector3f, alpha: Float) -> Float {
    if m.z <= 0.0 {
        return 0.0;
    }
    ggx_d(m.z, alpha) * m.z
}

/// Samples a microfacet normal around +z proportionally to D(m) * cos(theta_m).
pub fn sample_ggx(u: &Vector2f, alpha: Float) -> Vector3f {
    let a = alpha.max(MIN_ALPHA);
    let u1 = clamp01(u.x);
    let u2 = clamp01(u.y.min(1.0 - 1e-6));
    let phi = 2.0 * PI * u1;
    let tan2 = (a * a) * u2 / (1.0 - u2).max(1e-6);
    let cos_theta = 1.0 / (1.0 + tan2).sqrt();
    let sin_theta = (1.0 - cos_theta * cos_theta).max(0.0).sqrt();
    Vector3f::new(sin_theta * phi.cos(), sin_theta * phi.sin(), cos_theta)
}

pub fn reflect(wi: &Vector3f, m: &Vector3f) -> Vector3f {
    2.0 * wi.dot(m) * m - wi
}

/// Refracts `wi` through a facet `m` on the same side; `eta` is eta_i / eta_t.
/// Returns `None` on total internal reflection.
pub fn refract(wi: &Vector3f, m: &Vector3f, eta: Float) -> Option<Vector3f> {
    let cos_i = wi.dot(m).max(-1.0).min(1.0);
    let sin2_i = (1.0 - cos_i * cos_i).max(0.0);
    let sin2_t = eta * eta * sin2_i;
    if sin2_t >= 1.0 {
        return None;
    }
    let cos_t = (1.0 - sin2_t).sqrt();
    let wt = -eta * wi + (eta * cos_i - cos_t) * m;
    Some(wt.normalize())
}

pub fn fresnel_dielectric(cos_i: Float, eta_i: Float, eta_t: Float) -> Float {
    let mut cos_i = cos_i.max(-1.0).min(1.0);
    let entering = cos_i > 0.0;
    let (eta_i, eta_t) = if entering { (eta_i, eta_t) } else { (eta_t, eta_i) };
    cos_i = cos_i.abs();

    let sin2_i = (1.0 - cos_i * cos_i).max(0.0);
    let eta = eta_i / eta_t;
    let sin2_t = eta * eta * sin2_i;
    if sin2_t >= 1.0 {
        return 1.0;
    }
    let cos_t = (1.0 - sin2_t).sqrt();
    let r_parl = (eta_t * cos_i - eta_i * cos_t) / (eta_t * cos_i + eta_i * cos_t);
    let r_perp = (eta_i * cos_i - eta_t * cos_t) / (eta_i * cos_i + eta_t * cos_t);
    0.5 * (r_parl * r_parl + r_perp * r_perp)
}

pub fn fresnel_schlick(f0: RGBSpectrum, cos_theta: Float) -> RGBSpectrum {
    let cos_theta = cos_theta.max(0.0).min(1.0);
    let one_minus = (1.0 - cos_theta).powi(5);
    f0 + (RGBSpectrum::one() - f0) * one_minus
}
