// Copyright @yucwang 2026

use crate::core::material::Material;
use crate::math::constants::{ Float, Vector3f };
use crate::math::ray::Ray3f;

use std::fmt;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Triangle {
    pub indices: [usize; 3],
    pub material: usize,
}

impl Triangle {
    pub fn new(indices: [usize; 3], material: usize) -> Self {
        Self { indices, material }
    }
}

/// Nearest intersection reported by a [`SceneQuery`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Hit {
    pub distance: Float,
    pub primitive: usize,
    /// Weights of the second and third vertex.
    pub barycentric: (Float, Float),
}

pub trait SceneQuery: Sync {
    fn intersect(&self, ray: &Ray3f) -> Option<Hit>;
}

#[derive(Debug, PartialEq)]
pub enum SceneError {
    EmptyScene,
    VertexIndexOutOfRange { triangle: usize, index: usize },
    MaterialIndexOutOfRange { triangle: usize, material: usize },
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneError::EmptyScene => write!(f, "scene has no triangles"),
            SceneError::VertexIndexOutOfRange { triangle, index } =>
                write!(f, "triangle {} references missing vertex {}", triangle, index),
            SceneError::MaterialIndexOutOfRange { triangle, material } =>
                write!(f, "triangle {} references missing material {}", triangle, material),
        }
    }
}

impl std::error::Error for SceneError {}

/// Immutable scene arrays shared by every ray of a render.
#[derive(Debug, Clone)]
pub struct SceneData {
    vertices: Vec<Vector3f>,
    triangles: Vec<Triangle>,
    materials: Vec<Material>,
}

impl SceneData {
    pub fn new(vertices: Vec<Vector3f>,
               triangles: Vec<Triangle>,
               materials: Vec<Material>) -> Result<Self, SceneError> {
        if triangles.is_empty() {
            return Err(SceneError::EmptyScene);
        }
        for (idx, tri) in triangles.iter().enumerate() {
            if let Some(&bad) = tri.indices.iter().find(|&&v| v >= vertices.len()) {
                return Err(SceneError::VertexIndexOutOfRange { triangle: idx, index: bad });
            }
            if tri.material >= materials.len() {
                return Err(SceneError::MaterialIndexOutOfRange { triangle: idx, material: tri.material });
            }
        }
        log::debug!("Scene validated: {} vertices, {} triangles, {} materials.",
                    vertices.len(), triangles.len(), materials.len());

        Ok(Self { vertices, triangles, materials })
    }

    pub fn vertices(&self) -> &[Vector3f] {
        &self.vertices
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    pub fn triangle_vertices(&self, primitive: usize) -> (Vector3f, Vector3f, Vector3f) {
        let [a, b, c] = self.triangles[primitive].indices;
        (self.vertices[a], self.vertices[b], self.vertices[c])
    }

    pub fn material_of(&self, primitive: usize) -> &Material {
        &self.materials[self.triangles[primitive].material]
    }

    /// Unit normal following the triangle's winding order.
    pub fn geometric_normal(&self, primitive: usize) -> Vector3f {
        let (p0, p1, p2) = self.triangle_vertices(primitive);
        (p1 - p0).cross(&(p2 - p0)).normalize()
    }

    pub fn triangle_area(&self, primitive: usize) -> Float {
        let (p0, p1, p2) = self.triangle_vertices(primitive);
        0.5 * (p1 - p0).cross(&(p2 - p0)).norm()
    }

    pub fn hit_point(&self, hit: &Hit) -> Vector3f {
        let (p0, p1, p2) = self.triangle_vertices(hit.primitive);
        let (u, v) = hit.barycentric;
        p0 * (1.0 - u - v) + p1 * u + p2 * v
    }
}
