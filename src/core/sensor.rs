// Copyright @yucwang 2026

use crate::math::constants::Vector2f;
use crate::math::ray::Ray3f;

pub trait Sensor: Sync {
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    /// Primary ray through pixel (x, y); `jitter` is the sub-pixel offset in [0, 1)^2.
    fn generate_ray(&self, x: usize, y: usize, jitter: &Vector2f) -> Ray3f;
    fn describe(&self) -> String {
        String::from("Sensor")
    }
}
