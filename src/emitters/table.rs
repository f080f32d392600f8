// Copyright @yucwang 2026

use crate::core::scene::SceneData;
use crate::math::constants::{ Float, Vector2f, Vector3f };
use crate::math::spectrum::RGBSpectrum;
use crate::math::warp::square_to_triangle;

use std::collections::HashMap;

/// One emissive triangle, copied out of the scene for light sampling.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct EmitterTriangle {
    pub vertices: [Vector3f; 3],
    pub normal: Vector3f,
    pub area: Float,
    pub emissive: RGBSpectrum,
    /// Selection probability, area / total emitter area.
    pub pdf: Float,
    /// Sum of `pdf` over all preceding entries.
    pub cdf: Float,
    /// Index of the triangle in the scene's triangle array.
    pub global_index: usize,
}

impl EmitterTriangle {
    fn sentinel() -> Self {
        Self {
            vertices: [Vector3f::zeros(); 3],
            normal: Vector3f::zeros(),
            area: 0.0,
            emissive: RGBSpectrum::default(),
            pdf: 0.0,
            cdf: 1.0,
            global_index: usize::MAX,
        }
    }

    /// Uniformly distributed point on the triangle.
    pub fn sample_point(&self, u: &Vector2f) -> Vector3f {
        let w = square_to_triangle(u);
        self.vertices[0] * w.x + self.vertices[1] * w.y + self.vertices[2] * w.z
    }

    /// Solid-angle density of choosing `light_p` on this triangle as seen from `ref_p`.
    /// `None` when the triangle faces away from `ref_p`.
    pub fn solid_angle_pdf(&self, ref_p: &Vector3f, light_p: &Vector3f) -> Option<Float> {
        let to_light = light_p - ref_p;
        let dist2 = to_light.norm_squared();
        if dist2 <= 0.0 || self.area <= 0.0 {
            return None;
        }
        let dir = to_light / dist2.sqrt();
        let cos_light = self.normal.dot(&(-dir));
        if cos_light <= 0.0 {
            return None;
        }
        Some(self.pdf * dist2 / (self.area * cos_light))
    }
}

/// Area-weighted distribution over the emissive triangles of a scene.
pub struct EmitterTable {
    entries: Vec<EmitterTriangle>,
    by_global_index: HashMap<usize, usize>,
    total_area: Float,
}

impl EmitterTable {
    pub fn build(scene: &SceneData) -> Self {
        let mut emitters: Vec<(usize, Float)> = Vec::new();
        let mut skipped = 0usize;
        for idx in 0..scene.triangles().len() {
            if !scene.material_of(idx).is_emissive() {
                continue;
            }
            let area = scene.triangle_area(idx);
            if area > 0.0 && area.is_finite() {
                emitters.push((idx, area));
            } else {
                skipped += 1;
            }
        }
        if skipped > 0 {
            log::warn!("Skipped {} degenerate emissive triangles.", skipped);
        }

        emitters.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
        let total_area: Float = emitters.iter().map(|e| e.1).sum();
        if emitters.is_empty() || total_area <= 0.0 {
            log::warn!("Scene has no emitters, explicit light sampling is disabled.");
            return Self {
                entries: vec![EmitterTriangle::sentinel()],
                by_global_index: HashMap::new(),
                total_area: 0.0,
            };
        }

        let mut entries = Vec::with_capacity(emitters.len() + 1);
        let mut by_global_index = HashMap::with_capacity(emitters.len());
        let mut running: Float = 0.0;
        for (global_index, area) in emitters {
            let (p0, p1, p2) = scene.triangle_vertices(global_index);
            let pdf = area / total_area;
            by_global_index.insert(global_index, entries.len());
            entries.push(EmitterTriangle {
                vertices: [p0, p1, p2],
                normal: scene.geometric_normal(global_index),
                area,
                emissive: scene.material_of(global_index).emissive,
                pdf,
                cdf: running.min(1.0),
                global_index,
            });
            running += pdf;
        }
        entries.push(EmitterTriangle::sentinel());

        log::info!("Built emitter table: {} triangles, total area {:.4}.", entries.len() - 1, total_area);

        Self { entries, by_global_index, total_area }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.len() <= 1
    }

    /// Number of emitters, excluding the sentinel.
    pub fn len(&self) -> usize {
        self.entries.len() - 1
    }

    pub fn total_area(&self) -> Float {
        self.total_area
    }

    pub fn entries(&self) -> &[EmitterTriangle] {
        &self.entries[..self.len()]
    }

    /// Chooses an emitter with probability proportional to its area.
    /// Any `xi` in [0, 1) resolves to a real entry; `None` only for an empty table.
    pub fn sample_emitter(&self, xi: Float) -> Option<&EmitterTriangle> {
        if self.is_empty() {
            return None;
        }
        let idx = self.entries[1..].partition_point(|e| e.cdf <= xi);
        Some(&self.entries[idx.min(self.len() - 1)])
    }

    pub fn find(&self, global_index: usize) -> Option<&EmitterTriangle> {
        self.by_global_index.get(&global_index).map(|&idx| &self.entries[idx])
    }

    /// Solid-angle density with which light sampling from `ref_p` would have
    /// produced `light_p` on triangle `global_index`.
    pub fn pdf_for_hit(&self, global_index: usize, ref_p: &Vector3f, light_p: &Vector3f) -> Option<Float> {
        self.find(global_index)?.solid_angle_pdf(ref_p, light_p)
    }
}
