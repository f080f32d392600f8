// Copyright @yucwang 2026

//! Scenes assembled in code, used by the binary and by the integrator tests.

use crate::core::material::Material;
use crate::core::scene::{ SceneData, SceneError, Triangle };
use crate::math::constants::{ Float, PI, Vector3f };
use crate::math::spectrum::RGBSpectrum;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CameraPose {
    pub origin: Vector3f,
    pub target: Vector3f,
    pub up: Vector3f,
    pub fov_y: Float,
}

pub struct BuiltinScene {
    pub scene: SceneData,
    pub camera: CameraPose,
}

#[derive(Default)]
struct SceneBuilder {
    vertices: Vec<Vector3f>,
    triangles: Vec<Triangle>,
    materials: Vec<Material>,
}

impl SceneBuilder {
    fn material(&mut self, material: Material) -> usize {
        self.materials.push(material);
        self.materials.len() - 1
    }

    fn triangle(&mut self, p: [Vector3f; 3], material: usize) {
        let base = self.vertices.len();
        self.vertices.extend_from_slice(&p);
        self.triangles.push(Triangle::new([base, base + 1, base + 2], material));
    }

    /// Quad with corners in counter-clockwise order around its front normal.
    fn quad(&mut self, p: [Vector3f; 4], material: usize) {
        let base = self.vertices.len();
        self.vertices.extend_from_slice(&p);
        self.triangles.push(Triangle::new([base, base + 1, base + 2], material));
        self.triangles.push(Triangle::new([base, base + 2, base + 3], material));
    }

    /// Axis-aligned box with outward-facing sides.
    fn cuboid(&mut self, min: Vector3f, max: Vector3f, material: usize) {
        let c = |x: Float, y: Float, z: Float| Vector3f::new(x, y, z);
        let (x0, y0, z0) = (min.x, min.y, min.z);
        let (x1, y1, z1) = (max.x, max.y, max.z);
        self.quad([c(x0, y1, z0), c(x0, y1, z1), c(x1, y1, z1), c(x1, y1, z0)], material);
        self.quad([c(x0, y0, z0), c(x1, y0, z0), c(x1, y0, z1), c(x0, y0, z1)], material);
        self.quad([c(x0, y0, z1), c(x1, y0, z1), c(x1, y1, z1), c(x0, y1, z1)], material);
        self.quad([c(x0, y0, z0), c(x0, y1, z0), c(x1, y1, z0), c(x1, y0, z0)], material);
        self.quad([c(x1, y0, z0), c(x1, y1, z0), c(x1, y1, z1), c(x1, y0, z1)], material);
        self.quad([c(x0, y0, z0), c(x0, y0, z1), c(x0, y1, z1), c(x0, y1, z0)], material);
    }

    fn build(self) -> Result<SceneData, SceneError> {
        SceneData::new(self.vertices, self.triangles, self.materials)
    }
}

fn v(x: Float, y: Float, z: Float) -> Vector3f {
    Vector3f::new(x, y, z)
}

/// Unit Cornell box: red and green side walls, a ceiling light, a rough
/// metal block, a plastic block and a glass block.
pub fn cornell_box() -> Result<BuiltinScene, SceneError> {
    let mut b = SceneBuilder::default();
    let white = b.material(Material::diffuse(RGBSpectrum::splat(0.73)));
    let red = b.material(Material::diffuse(RGBSpectrum::new(0.65, 0.05, 0.05)));
    let green = b.material(Material::diffuse(RGBSpectrum::new(0.12, 0.45, 0.15)));
    let light = b.material(Material::emitter(RGBSpectrum::new(17.0, 12.0, 4.0)));
    let metal = b.material(Material::rough_conductor(RGBSpectrum::new(0.95, 0.64, 0.54), 0.3));
    let plastic = b.material(Material::plastic(RGBSpectrum::new(0.1, 0.2, 0.6), 0.2, 1.5));
    let glass = b.material(Material::dielectric(0.05, 1.0, 1.5));

    // Interior faces point into the box.
    b.quad([v(0.0, 0.0, 0.0), v(0.0, 0.0, 1.0), v(1.0, 0.0, 1.0), v(1.0, 0.0, 0.0)], white);
    b.quad([v(0.0, 1.0, 0.0), v(1.0, 1.0, 0.0), v(1.0, 1.0, 1.0), v(0.0, 1.0, 1.0)], white);
    b.quad([v(0.0, 0.0, 1.0), v(0.0, 1.0, 1.0), v(1.0, 1.0, 1.0), v(1.0, 0.0, 1.0)], white);
    b.quad([v(0.0, 0.0, 0.0), v(0.0, 1.0, 0.0), v(0.0, 1.0, 1.0), v(0.0, 0.0, 1.0)], red);
    b.quad([v(1.0, 0.0, 0.0), v(1.0, 0.0, 1.0), v(1.0, 1.0, 1.0), v(1.0, 1.0, 0.0)], green);
    b.quad([v(0.4, 0.999, 0.4), v(0.6, 0.999, 0.4), v(0.6, 0.999, 0.6), v(0.4, 0.999, 0.6)], light);

    b.cuboid(v(0.15, 0.0, 0.55), v(0.45, 0.6, 0.85), metal);
    b.cuboid(v(0.58, 0.0, 0.2), v(0.85, 0.3, 0.47), plastic);
    b.cuboid(v(0.2, 0.0, 0.15), v(0.38, 0.18, 0.33), glass);

    Ok(BuiltinScene {
        scene: b.build()?,
        camera: CameraPose {
            origin: v(0.5, 0.5, -1.4),
            target: v(0.5, 0.5, 0.0),
            up: v(0.0, 1.0, 0.0),
            fov_y: 40.0 * PI / 180.0,
        },
    })
}

/// One large upward-facing quad, for furnace tests under a constant environment.
pub fn furnace_plane(material: Material) -> Result<BuiltinScene, SceneError> {
    let mut b = SceneBuilder::default();
    let m = b.material(material);
    b.quad([v(-100.0, 0.0, -100.0), v(-100.0, 0.0, 100.0), v(100.0, 0.0, 100.0), v(100.0, 0.0, -100.0)], m);

    Ok(BuiltinScene {
        scene: b.build()?,
        camera: CameraPose {
            origin: v(0.0, 1.0, -0.2),
            target: v(0.0, 0.0, 0.0),
            up: v(0.0, 0.0, 1.0),
            fov_y: 30.0 * PI / 180.0,
        },
    })
}

/// A diffuse floor lit by a single small emissive triangle facing down from above.
pub fn single_light(floor: Material, emission: RGBSpectrum) -> Result<BuiltinScene, SceneError> {
    let mut b = SceneBuilder::default();
    let floor = b.material(floor);
    let light = b.material(Material::emitter(emission));
    b.quad([v(-5.0, 0.0, -5.0), v(-5.0, 0.0, 5.0), v(5.0, 0.0, 5.0), v(5.0, 0.0, -5.0)], floor);
    b.triangle([v(-0.5, 1.0, -0.5), v(0.5, 1.0, -0.5), v(0.0, 1.0, 0.5)], light);

    Ok(BuiltinScene {
        scene: b.build()?,
        camera: CameraPose {
            origin: v(0.0, 0.5, -2.0),
            target: v(0.0, 0.0, 0.0),
            up: v(0.0, 1.0, 0.0),
            fov_y: 45.0 * PI / 180.0,
        },
    })
}

/// Closed cube around the origin; no ray can escape it.
pub fn closed_box(material: Material) -> Result<BuiltinScene, SceneError> {
    let mut b = SceneBuilder::default();
    let m = b.material(material);
    b.cuboid(v(-1.0, -1.0, -1.0), v(1.0, 1.0, 1.0), m);

    Ok(BuiltinScene {
        scene: b.build()?,
        camera: CameraPose {
            origin: v(0.0, 0.0, 0.0),
            target: v(0.0, 0.0, 1.0),
            up: v(0.0, 1.0, 0.0),
            fov_y: 60.0 * PI / 180.0,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cornell_box_is_valid() {
        let built = cornell_box().unwrap();
        let scene = &built.scene;
        // Floor faces up, ceiling down, back wall toward the camera.
        assert!((scene.geometric_normal(0) - v(0.0, 1.0, 0.0)).norm() < 1e-5);
        assert!((scene.geometric_normal(2) - v(0.0, -1.0, 0.0)).norm() < 1e-5);
        assert!((scene.geometric_normal(4) - v(0.0, 0.0, -1.0)).norm() < 1e-5);
        assert!((scene.geometric_normal(10) - v(0.0, -1.0, 0.0)).norm() < 1e-5);
        assert!(scene.material_of(10).is_emissive());
    }

    #[test]
    fn test_cuboid_faces_point_outward() {
        let built = closed_box(Material::default()).unwrap();
        let scene = &built.scene;
        for idx in 0..scene.triangles().len() {
            let (p0, p1, p2) = scene.triangle_vertices(idx);
            let center = (p0 + p1 + p2) / 3.0;
            assert!(scene.geometric_normal(idx).dot(&center) > 0.0, "face {}", idx);
        }
    }

    #[test]
    fn test_single_light_faces_floor() {
        let built = single_light(Material::default(), RGBSpectrum::one()).unwrap();
        assert_eq!(built.scene.geometric_normal(2), v(0.0, -1.0, 0.0));
        assert_eq!(built.scene.geometric_normal(0), v(0.0, 1.0, 0.0));
    }
}
