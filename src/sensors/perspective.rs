// Copyright @yucwang 2026

use crate::core::sensor::Sensor;
use crate::math::constants::{Float, Vector2f, Vector3f};
use crate::math::ray::Ray3f;
use crate::scenes::CameraPose;

/// Pinhole camera looking from `origin` at `target`.
pub struct PinholeCamera {
    origin: Vector3f,
    forward: Vector3f,
    right: Vector3f,
    up: Vector3f,
    tan_half_fov_y: Float,
    aspect: Float,
    width: usize,
    height: usize,
}

impl PinholeCamera {
    pub fn new(origin: Vector3f,
               target: Vector3f,
               up: Vector3f,
               fov_y_radians: Float,
               width: usize,
               height: usize) -> Self {
        let forward = (target - origin).normalize();
        let right = forward.cross(&up).normalize();
        let up = right.cross(&forward).normalize();
        let aspect = if height > 0 { width as Float / height as Float } else { 1.0 };

        Self {
            origin,
            forward,
            right,
            up,
            tan_half_fov_y: (0.5 * fov_y_radians).tan(),
            aspect,
            width,
            height,
        }
    }

    pub fn from_pose(pose: &CameraPose, width: usize, height: usize) -> Self {
        Self::new(pose.origin, pose.target, pose.up, pose.fov_y, width, height)
    }

    /// Ray through the film position `u` in [0, 1]^2, with v growing downward.
    pub fn sample_ray(&self, u: &Vector2f) -> Ray3f {
        let px = (2.0 * u.x - 1.0) * self.aspect * self.tan_half_fov_y;
        let py = (1.0 - 2.0 * u.y) * self.tan_half_fov_y;
        let dir = self.right * px + self.up * py + self.forward;
        Ray3f::new(self.origin, dir, Some(0.0), None)
    }
}

impl Sensor for PinholeCamera {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn generate_ray(&self, x: usize, y: usize, jitter: &Vector2f) -> Ray3f {
        let u = Vector2f::new((x as Float + jitter.x) / self.width.max(1) as Float,
                              (y as Float + jitter.y) / self.height.max(1) as Float);
        self.sample_ray(&u)
    }

    fn describe(&self) -> String {
        format!("PinholeCamera {{ origin: {:?}, forward: {:?}, {}x{} }}",
                self.origin, self.forward, self.width, self.height)
    }
}
