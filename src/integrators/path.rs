// Copyright @yucwang 2026

use crate::core::integrator::{ Integrator, RayState, SceneContext };
use crate::core::material::Material;
use crate::core::sampler::BounceSamples;
use crate::emitters::table::EmitterTriangle;
use crate::materials;
use crate::math::constants::{ Float, Vector3f };
use crate::math::ray::Ray3f;
use crate::math::spectrum::RGBSpectrum;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SamplingStrategy {
    /// Light sampling and BSDF sampling combined with the power heuristic.
    Mis,
    /// Emitters are found only by BSDF sampling.
    BsdfOnly,
    /// Emitters are found only by light sampling, except where BSDF
    /// sampling is the only option (camera rays and delta bounces).
    LightOnly,
}

impl std::str::FromStr for SamplingStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mis" => Ok(SamplingStrategy::Mis),
            "bsdf" => Ok(SamplingStrategy::BsdfOnly),
            "light" => Ok(SamplingStrategy::LightOnly),
            other => Err(format!("unknown sampling strategy '{}'", other)),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct IntegratorSettings {
    /// Bounces before Russian roulette starts.
    pub rr_min_bounces: u32,
    pub rr_max_survival: Float,
    pub ray_epsilon: Float,
    pub strategy: SamplingStrategy,
    /// Radiance returned by rays leaving the scene.
    pub environment: RGBSpectrum,
    pub max_bounces: Option<u32>,
}

impl Default for IntegratorSettings {
    fn default() -> Self {
        Self {
            rr_min_bounces: 5,
            rr_max_survival: 0.95,
            ray_epsilon: 1e-4,
            strategy: SamplingStrategy::Mis,
            environment: RGBSpectrum::default(),
            max_bounces: None,
        }
    }
}

/// Power heuristic weight of strategy `a` against strategy `b`.
pub fn power_heuristic(pdf_a: Float, pdf_b: Float) -> Float {
    let a2 = pdf_a * pdf_a;
    let b2 = pdf_b * pdf_b;
    let sum = a2 + b2;
    if !(sum > 0.0) {
        return 0.0;
    }
    // Computing the smaller weight as a complement keeps
    // power_heuristic(a, b) + power_heuristic(b, a) exactly one.
    let w = if a2 >= b2 { a2 / sum } else { 1.0 - b2 / sum };
    w.max(0.0).min(1.0)
}

/// Survives with probability `min(max_survival, max(throughput))` and returns
/// the compensated throughput, or `None` when the path is killed.
pub fn russian_roulette(throughput: RGBSpectrum, u: Float, max_survival: Float) -> Option<RGBSpectrum> {
    let q = throughput.max_component().min(max_survival);
    if q > 0.0 && u < q {
        Some(throughput / q)
    } else {
        None
    }
}

fn offset_origin(p: &Vector3f, n: &Vector3f, dir: &Vector3f, epsilon: Float) -> Vector3f {
    if dir.dot(n) >= 0.0 {
        p + n * epsilon
    } else {
        p - n * epsilon
    }
}

pub struct PathIntegrator {
    settings: IntegratorSettings,
}

impl PathIntegrator {
    pub fn new(settings: IntegratorSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &IntegratorSettings {
        &self.settings
    }

    /// MIS weight for emission found by BSDF sampling.
    fn emission_weight(&self, ctx: &SceneContext<'_>, state: &RayState, primitive: usize, p: &Vector3f) -> Float {
        if state.bounce_count == 0 || state.delta_bounce {
            return 1.0;
        }
        match self.settings.strategy {
            SamplingStrategy::BsdfOnly => 1.0,
            SamplingStrategy::LightOnly => 0.0,
            SamplingStrategy::Mis => match ctx.emitters.pdf_for_hit(primitive, &state.origin, p) {
                Some(light_pdf) => power_heuristic(state.material_pdf, light_pdf),
                None => 1.0,
            },
        }
    }

    fn visible(&self, ctx: &SceneContext<'_>, p: &Vector3f, n: &Vector3f, dir: &Vector3f, target: &EmitterTriangle) -> bool {
        let origin = offset_origin(p, n, dir, self.settings.ray_epsilon);
        let shadow_ray = Ray3f::new(origin, *dir, Some(0.0), None);
        match ctx.query.intersect(&shadow_ray) {
            Some(hit) => hit.primitive == target.global_index,
            None => false,
        }
    }

    /// Next-event estimate at `p`, already multiplied by `throughput`.
    pub fn sample_light(&self,
                        ctx: &SceneContext<'_>,
                        throughput: RGBSpectrum,
                        material: &Material,
                        p: &Vector3f,
                        n: &Vector3f,
                        wi: &Vector3f,
                        samples: &BounceSamples) -> RGBSpectrum {
        let black = RGBSpectrum::default();
        if materials::is_delta(material) {
            return black;
        }
        let emitter = match ctx.emitters.sample_emitter(samples.emitter) {
            Some(e) => e,
            None => return black,
        };
        let light_p = emitter.sample_point(&samples.point);
        let light_pdf = match emitter.solid_angle_pdf(p, &light_p) {
            Some(pdf) if pdf > 0.0 && pdf.is_finite() => pdf,
            _ => return black,
        };
        let dir = (light_p - p).normalize();

        let eval = materials::evaluate(material, n, wi, &dir);
        if !eval.valid || eval.bsdf.is_black() {
            return black;
        }
        let weight = match self.settings.strategy {
            SamplingStrategy::Mis => power_heuristic(light_pdf, eval.pdf),
            _ => 1.0,
        };
        if weight <= 0.0 || !self.visible(ctx, p, n, &dir, emitter) {
            return black;
        }

        emitter.emissive * throughput * eval.bsdf * (weight / light_pdf)
    }
}

impl Integrator for PathIntegrator {
    fn bounce(&self, ctx: &SceneContext<'_>, state: &mut RayState, samples: &BounceSamples) {
        if state.completed {
            return;
        }

        let hit = match ctx.query.intersect(&state.ray()) {
            Some(hit) => hit,
            None => {
                state.radiance += state.throughput * self.settings.environment;
                state.completed = true;
                return;
            }
        };

        let p = ctx.scene.hit_point(&hit);
        let n = ctx.scene.geometric_normal(hit.primitive);
        let material = ctx.scene.material_of(hit.primitive);
        let wi = -state.direction;

        if material.is_emissive() && n.dot(&wi) > 0.0 {
            let weight = self.emission_weight(ctx, state, hit.primitive, &p);
            state.radiance += material.emissive * state.throughput * weight;
        }

        if self.settings.strategy != SamplingStrategy::BsdfOnly && !ctx.emitters.is_empty() {
            state.radiance += self.sample_light(ctx, state.throughput, material, &p, &n, &wi, samples);
        }

        let sampled = materials::sample(material, &n, &wi, samples);
        if sampled.valid {
            state.throughput *= sampled.weight;
            state.material_pdf = sampled.pdf;
            state.delta_bounce = sampled.delta;
            state.origin = offset_origin(&p, &n, &sampled.direction, self.settings.ray_epsilon);
            state.direction = sampled.direction;
        } else {
            // A degenerate sample carries zero weight; the path is then
            // retired by the black-throughput check below.
            state.throughput = RGBSpectrum::default();
        }
        state.bounce_count += 1;

        if state.throughput.is_black() || !state.throughput.is_finite() {
            state.completed = true;
            return;
        }
        if let Some(max_bounces) = self.settings.max_bounces {
            if state.bounce_count >= max_bounces {
                state.completed = true;
                return;
            }
        }
        if state.bounce_count >= self.settings.rr_min_bounces {
            match russian_roulette(state.throughput, samples.roulette, self.settings.rr_max_survival) {
                Some(throughput) => state.throughput = throughput,
                None => state.completed = true,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::LcgRng;
    use crate::core::sampler::{ HashedSampleSource, RandomSampleSource };
    use crate::core::scene::{ SceneData, Triangle };
    use crate::emitters::table::EmitterTable;
    use crate::math::constants::{ Vector2f, PI };
    use crate::scenes;
    use crate::shapes::triangle::LinearSceneQuery;

    fn trace(integrator: &PathIntegrator,
             scene: &SceneData,
             ray: &Ray3f,
             source: &HashedSampleSource,
             path: usize) -> (RGBSpectrum, RayState) {
        let query = LinearSceneQuery::new(scene);
        let emitters = EmitterTable::build(scene);
        let ctx = SceneContext { scene, query: &query, emitters: &emitters };
        let mut state = RayState::new(ray);
        let mut tick = 0u64;
        while !state.completed && tick < 10_000 {
            let samples = source.next(path, tick, state.bounce_count);
            integrator.bounce(&ctx, &mut state, &samples);
            tick += 1;
        }
        (state.radiance, state)
    }

    fn estimate(settings: IntegratorSettings, scene: &SceneData, ray: &Ray3f, n: usize, seed: u64) -> f64 {
        let integrator = PathIntegrator::new(settings);
        let query = LinearSceneQuery::new(scene);
        let emitters = EmitterTable::build(scene);
        let ctx = SceneContext { scene, query: &query, emitters: &emitters };
        let source = HashedSampleSource::new(seed);
        let mut sum = 0.0f64;
        for path in 0..n {
            let mut state = RayState::new(ray);
            let mut tick = 0u64;
            while !state.completed && tick < 10_000 {
                let samples = source.next(path, tick, state.bounce_count);
                integrator.bounce(&ctx, &mut state, &samples);
                tick += 1;
            }
            sum += state.radiance.average() as f64;
        }
        sum / n as f64
    }

    #[test]
    fn test_power_heuristic_weights_sum_to_one() {
        let mut rng = LcgRng::new(100);
        for _ in 0..10_000 {
            let a = rng.next_f32() * 100.0 + 1e-3;
            let b = rng.next_f32() * 0.1 + 1e-4;
            assert_eq!(power_heuristic(a, b) + power_heuristic(b, a), 1.0);
            assert_eq!(power_heuristic(b, a) + power_heuristic(a, b), 1.0);
        }
        assert_eq!(power_heuristic(2.0, 2.0), 0.5);
        assert_eq!(power_heuristic(0.0, 0.0), 0.0);
        assert_eq!(power_heuristic(1.0, 0.0), 1.0);
        assert!((power_heuristic(1.0, 2.0) - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_russian_roulette_is_unbiased() {
        let throughput = RGBSpectrum::new(0.3, 0.1, 0.05);
        let n = 100_000;
        let mut sum = RGBSpectrum::default();
        for i in 0..n {
            let u = (i as Float + 0.5) / n as Float;
            if let Some(t) = russian_roulette(throughput, u, 0.95) {
                sum += t;
            }
        }
        let mean = sum / n as Float;
        for c in 0..3 {
            assert!((mean[c] - throughput[c]).abs() < 1e-4, "{:?}", mean);
        }
    }

    #[test]
    fn test_russian_roulette_survival_decays_geometrically() {
        let mut rng = LcgRng::new(101);
        let n = 100_000;
        let rounds = 20;
        let mut survivors = 0;
        for _ in 0..n {
            let mut t = RGBSpectrum::one();
            let mut alive = true;
            for _ in 0..rounds {
                match russian_roulette(t, rng.next_f32(), 0.95) {
                    Some(next) => t = next,
                    None => {
                        alive = false;
                        break;
                    }
                }
            }
            if alive {
                survivors += 1;
            }
        }
        let fraction = survivors as f64 / n as f64;
        assert!((fraction - 0.95f64.powi(rounds)).abs() < 0.01, "fraction = {}", fraction);
        assert!(russian_roulette(RGBSpectrum::default(), 0.0, 0.95).is_none());
    }

    #[test]
    fn test_furnace() {
        let environment = RGBSpectrum::splat(1.0);
        let settings = IntegratorSettings { environment, ..Default::default() };
        let cases = [
            Material::diffuse(RGBSpectrum::one()),
            Material::mirror(RGBSpectrum::one()),
            Material::rough_conductor(RGBSpectrum::one(), 0.2),
        ];
        for material in cases.iter() {
            let built = scenes::furnace_plane(*material).unwrap();
            let ray = Ray3f::new(Vector3f::new(0.1, 1.0, 0.0), Vector3f::new(-0.1, -1.0, 0.0), None, None);
            let mean = estimate(settings, &built.scene, &ray, 10_000, 7);
            assert!((mean - 1.0).abs() < 0.02, "{:?}: mean = {}", material.kind, mean);
        }
    }

    #[test]
    fn test_strategies_converge_to_same_value() {
        let built = scenes::single_light(Material::diffuse(RGBSpectrum::splat(0.5)), RGBSpectrum::splat(4.0)).unwrap();
        let ray = Ray3f::new(Vector3f::new(0.3, 0.5, 0.1), Vector3f::new(0.0, -1.0, 0.0), None, None);
        let n = 200_000;
        let with = |strategy| IntegratorSettings { strategy, ..Default::default() };

        let mis = estimate(with(SamplingStrategy::Mis), &built.scene, &ray, n, 1);
        let bsdf = estimate(with(SamplingStrategy::BsdfOnly), &built.scene, &ray, n, 2);
        let light = estimate(with(SamplingStrategy::LightOnly), &built.scene, &ray, n, 3);

        assert!(mis > 0.05, "mis = {}", mis);
        assert!((bsdf - mis).abs() < 0.03 * mis, "bsdf = {}, mis = {}", bsdf, mis);
        assert!((light - mis).abs() < 0.03 * mis, "light = {}, mis = {}", light, mis);
    }

    #[test]
    fn test_camera_ray_hitting_emitter_has_full_weight() {
        let built = scenes::single_light(Material::diffuse(RGBSpectrum::splat(0.5)), RGBSpectrum::splat(4.0)).unwrap();
        let integrator = PathIntegrator::new(IntegratorSettings::default());
        let source = HashedSampleSource::new(5);
        let ray = Ray3f::new(Vector3f::new(0.0, 0.5, 0.0), Vector3f::new(0.0, 1.0, 0.0), None, None);
        let (radiance, state) = trace(&integrator, &built.scene, &ray, &source, 0);
        assert_eq!(radiance, RGBSpectrum::splat(4.0));
        assert!(state.completed);
        assert_eq!(state.bounce_count, 1);
    }

    #[test]
    fn test_back_of_emitter_is_dark() {
        let built = scenes::single_light(Material::diffuse(RGBSpectrum::splat(0.5)), RGBSpectrum::splat(4.0)).unwrap();
        let integrator = PathIntegrator::new(IntegratorSettings::default());
        let source = HashedSampleSource::new(6);
        let ray = Ray3f::new(Vector3f::new(0.0, 2.0, 0.0), Vector3f::new(0.0, -1.0, 0.0), None, None);
        let (radiance, _) = trace(&integrator, &built.scene, &ray, &source, 0);
        assert!(radiance.is_black());
    }

    #[test]
    fn test_mirror_light_sampling_contributes_nothing() {
        let built = scenes::single_light(Material::mirror(RGBSpectrum::one()), RGBSpectrum::splat(4.0)).unwrap();
        let scene = &built.scene;
        let query = LinearSceneQuery::new(scene);
        let emitters = EmitterTable::build(scene);
        let ctx = SceneContext { scene, query: &query, emitters: &emitters };
        let integrator = PathIntegrator::new(IntegratorSettings::default());
        let material = scene.material_of(0);
        let p = Vector3f::new(0.0, 0.0, 0.0);
        let n = Vector3f::new(0.0, 1.0, 0.0);
        let wi = Vector3f::new(0.8, 1.0, 0.2).normalize();
        let mut rng = LcgRng::new(102);
        for _ in 0..1000 {
            let samples = BounceSamples::from_rng(&mut rng);
            let contribution = integrator.sample_light(&ctx, RGBSpectrum::one(), material, &p, &n, &wi, &samples);
            assert!(contribution.is_black());

            let emitter = emitters.sample_emitter(samples.emitter).unwrap();
            let dir = (emitter.sample_point(&samples.point) - p).normalize();
            let eval = materials::evaluate(material, &n, &wi, &dir);
            assert_eq!(eval.pdf, 0.0);
        }
    }

    #[test]
    fn test_light_sampling_matches_analytic_irradiance() {
        let built = scenes::single_light(Material::diffuse(RGBSpectrum::one()), RGBSpectrum::one()).unwrap();
        let scene = &built.scene;
        let query = LinearSceneQuery::new(scene);
        let emitters = EmitterTable::build(scene);
        let ctx = SceneContext { scene, query: &query, emitters: &emitters };
        let integrator = PathIntegrator::new(IntegratorSettings { strategy: SamplingStrategy::LightOnly, ..Default::default() });
        let material = scene.material_of(0);
        let p = Vector3f::new(0.0, 0.0, 0.0);
        let n = Vector3f::new(0.0, 1.0, 0.0);
        let wi = n;

        // Reference: integrate cos * cos_l / (pi * d^2) over the light by midpoint quadrature.
        let light = emitters.entries()[0];
        let steps = 400;
        let mut reference = 0.0f64;
        for i in 0..steps {
            for j in 0..steps {
                let u = Vector2f::new((i as Float + 0.5) / steps as Float, (j as Float + 0.5) / steps as Float);
                let q = light.sample_point(&u);
                let d = q - p;
                let dist2 = d.norm_squared();
                let dir = d / dist2.sqrt();
                let cos = dir.dot(&n);
                let cos_l = light.normal.dot(&(-dir));
                reference += (cos * cos_l / (PI * dist2)) as f64;
            }
        }
        reference *= light.area as f64 / (steps * steps) as f64;

        let mut rng = LcgRng::new(103);
        let m = 100_000;
        let mut sum = 0.0f64;
        for _ in 0..m {
            let samples = BounceSamples::from_rng(&mut rng);
            sum += integrator.sample_light(&ctx, RGBSpectrum::one(), material, &p, &n, &wi, &samples).average() as f64;
        }
        let mean = sum / m as f64;
        assert!((mean - reference).abs() < 0.01 * reference, "mean = {}, reference = {}", mean, reference);
    }

    #[test]
    fn test_enclosed_scene_terminates_by_roulette() {
        let built = scenes::closed_box(Material::diffuse(RGBSpectrum::one())).unwrap();
        let integrator = PathIntegrator::new(IntegratorSettings::default());
        let source = HashedSampleSource::new(8);
        let ray = Ray3f::new(Vector3f::zeros(), Vector3f::new(0.2, 0.1, 1.0), None, None);
        let mut total_bounces = 0u64;
        for path in 0..500 {
            let (radiance, state) = trace(&integrator, &built.scene, &ray, &source, path);
            assert!(state.completed);
            assert!(state.bounce_count >= 5);
            assert!(radiance.is_black());
            total_bounces += state.bounce_count as u64;
        }
        // Five fixed bounces plus a geometric tail with survival 0.95.
        let mean = total_bounces as f64 / 500.0;
        assert!(mean > 15.0 && mean < 35.0, "mean bounces = {}", mean);
    }

    #[test]
    fn test_zero_emitter_scene_renders_black() {
        let built = scenes::furnace_plane(Material::diffuse(RGBSpectrum::one())).unwrap();
        let integrator = PathIntegrator::new(IntegratorSettings::default());
        let source = HashedSampleSource::new(9);
        let ray = Ray3f::new(Vector3f::new(0.0, 1.0, 0.0), Vector3f::new(0.0, -1.0, 0.0), None, None);
        let (radiance, state) = trace(&integrator, &built.scene, &ray, &source, 0);
        assert!(radiance.is_black());
        assert!(state.completed);
    }

    #[test]
    fn test_max_bounces_caps_path() {
        let built = scenes::closed_box(Material::diffuse(RGBSpectrum::one())).unwrap();
        let settings = IntegratorSettings { max_bounces: Some(3), ..Default::default() };
        let integrator = PathIntegrator::new(settings);
        let source = HashedSampleSource::new(10);
        let ray = Ray3f::new(Vector3f::zeros(), Vector3f::new(0.0, 0.0, 1.0), None, None);
        let (_, state) = trace(&integrator, &built.scene, &ray, &source, 0);
        assert!(state.completed);
        assert_eq!(state.bounce_count, 3);
    }

    fn v(x: Float, y: Float, z: Float) -> Vector3f {
        Vector3f::new(x, y, z)
    }

    /// Upward floor through the origin, a large downward triangle at y = 0.5
    /// and a small downward emitter at y = 1 directly above both.
    fn stacked_scene(middle: Material) -> SceneData {
        let vertices = vec![
            v(-2.0, 0.0, -2.0), v(0.0, 0.0, 2.0), v(2.0, 0.0, -2.0),
            v(-2.0, 0.5, -2.0), v(2.0, 0.5, -2.0), v(0.0, 0.5, 2.0),
            v(-0.5, 1.0, -0.5), v(0.5, 1.0, -0.5), v(0.0, 1.0, 0.5),
        ];
        let triangles = vec![
            Triangle::new([0, 1, 2], 0),
            Triangle::new([3, 4, 5], 1),
            Triangle::new([6, 7, 8], 2),
        ];
        let materials = vec![
            Material::diffuse(RGBSpectrum::one()),
            middle,
            Material::emitter(RGBSpectrum::one()),
        ];
        SceneData::new(vertices, triangles, materials).unwrap()
    }

    #[test]
    fn test_occluded_light_contributes_nothing() {
        let scene = stacked_scene(Material::diffuse(RGBSpectrum::splat(0.5)));
        let query = LinearSceneQuery::new(&scene);
        let emitters = EmitterTable::build(&scene);
        assert_eq!(emitters.len(), 1);
        let ctx = SceneContext { scene: &scene, query: &query, emitters: &emitters };
        let integrator = PathIntegrator::new(IntegratorSettings::default());
        let p = Vector3f::zeros();
        let n = v(0.0, 1.0, 0.0);

        // Same light and floor without the blocker.
        let open = scenes::single_light(Material::diffuse(RGBSpectrum::one()), RGBSpectrum::one()).unwrap();
        let open_query = LinearSceneQuery::new(&open.scene);
        let open_emitters = EmitterTable::build(&open.scene);
        let open_ctx = SceneContext { scene: &open.scene, query: &open_query, emitters: &open_emitters };

        let mut rng = LcgRng::new(104);
        let mut lit = 0;
        for _ in 0..1000 {
            let samples = BounceSamples::from_rng(&mut rng);
            let blocked = integrator.sample_light(&ctx, RGBSpectrum::one(), scene.material_of(0), &p, &n, &n, &samples);
            assert!(blocked.is_black());
            let unblocked = integrator.sample_light(&open_ctx, RGBSpectrum::one(), open.scene.material_of(0), &p, &n, &n, &samples);
            if !unblocked.is_black() {
                lit += 1;
            }
        }
        assert!(lit > 990, "lit = {}", lit);
    }

    #[test]
    fn test_light_sample_must_reach_the_chosen_emitter() {
        let scene = stacked_scene(Material::emitter(RGBSpectrum::splat(2.0)));
        let query = LinearSceneQuery::new(&scene);
        let emitters = EmitterTable::build(&scene);
        assert_eq!(emitters.len(), 2);
        let ctx = SceneContext { scene: &scene, query: &query, emitters: &emitters };
        let integrator = PathIntegrator::new(IntegratorSettings::default());
        let p = Vector3f::zeros();
        let n = v(0.0, 1.0, 0.0);

        let mut rng = LcgRng::new(105);
        let (mut hidden, mut front, mut front_lit) = (0, 0, 0);
        for _ in 0..4000 {
            let samples = BounceSamples::from_rng(&mut rng);
            let chosen = emitters.sample_emitter(samples.emitter).unwrap().global_index;
            let contribution = integrator.sample_light(&ctx, RGBSpectrum::one(), scene.material_of(0), &p, &n, &n, &samples);
            if chosen == 2 {
                assert!(contribution.is_black());
                hidden += 1;
            } else {
                assert_eq!(chosen, 1);
                front += 1;
                if !contribution.is_black() {
                    front_lit += 1;
                }
            }
        }
        assert!(hidden > 0);
        assert!(front_lit as f64 > 0.99 * front as f64, "{} of {}", front_lit, front);
    }

    #[test]
    fn test_degenerate_sample_counts_as_a_bounce_with_zero_weight() {
        let built = scenes::furnace_plane(Material::rough_conductor(RGBSpectrum::one(), 1.0)).unwrap();
        let scene = &built.scene;
        let query = LinearSceneQuery::new(scene);
        let emitters = EmitterTable::build(scene);
        let ctx = SceneContext { scene, query: &query, emitters: &emitters };
        let settings = IntegratorSettings { environment: RGBSpectrum::one(), ..Default::default() };
        let integrator = PathIntegrator::new(settings);

        // Grazing incidence onto a very rough conductor.
        let ray = Ray3f::new(v(-10.0, 0.5, 10.0), v(10.0, -0.5, 0.0), None, None);
        let n = v(0.0, 1.0, 0.0);
        let wi = -ray.dir();
        let mut rng = LcgRng::new(106);
        let base = BounceSamples::from_rng(&mut rng);
        let degenerate = (0..64)
            .map(|i| BounceSamples { bsdf: Vector2f::new(i as Float / 64.0, 0.999), ..base })
            .find(|s| !materials::sample(scene.material_of(0), &n, &wi, s).valid)
            .unwrap();

        let mut state = RayState::new(&ray);
        integrator.bounce(&ctx, &mut state, &degenerate);
        assert_eq!(state.bounce_count, 1);
        assert!(state.throughput.is_black());
        assert!(state.radiance.is_black());
        assert!(state.completed);
    }
}
