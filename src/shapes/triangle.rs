// Copyright @yucwang 2023

use crate::core::scene::{ Hit, SceneData, SceneQuery };
use crate::math::constants::{ Float, Vector3f };
use crate::math::ray::Ray3f;

const DET_EPSILON: Float = 1e-9;

/// Moller-Trumbore test. Returns the distance and the weights of `p1` and `p2`.
pub fn intersect_triangle(ray: &Ray3f,
                          p0: &Vector3f,
                          p1: &Vector3f,
                          p2: &Vector3f) -> Option<(Float, Float, Float)> {
    let edge0 = p1 - p0;
    let edge1 = p2 - p0;
    let dir = ray.dir();
    let pvec = dir.cross(&edge1);
    let det = edge0.dot(&pvec);
    if det.abs() < DET_EPSILON {
        return None;
    }
    let inv_det = 1.0 / det;

    let tvec = ray.origin() - p0;
    let u = tvec.dot(&pvec) * inv_det;
    if u < 0.0 || u > 1.0 {
        return None;
    }

    let qvec = tvec.cross(&edge0);
    let v = dir.dot(&qvec) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = edge1.dot(&qvec) * inv_det;
    if !ray.test_segment(t) {
        return None;
    }
    Some((t, u, v))
}

/// Brute-force nearest-hit query over every triangle of a scene.
pub struct LinearSceneQuery<'a> {
    scene: &'a SceneData,
}

impl<'a> LinearSceneQuery<'a> {
    pub fn new(scene: &'a SceneData) -> Self {
        Self { scene }
    }
}

impl<'a> SceneQuery for LinearSceneQuery<'a> {
    fn intersect(&self, ray: &Ray3f) -> Option<Hit> {
        let mut closest: Option<Hit> = None;
        let mut ray = *ray;
        for primitive in 0..self.scene.triangles().len() {
            let (p0, p1, p2) = self.scene.triangle_vertices(primitive);
            if let Some((t, u, v)) = intersect_triangle(&ray, &p0, &p1, &p2) {
                ray.max_t = t;
                closest = Some(Hit { distance: t, primitive, barycentric: (u, v) });
            }
        }
        closest
    }
}
