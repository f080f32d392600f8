// Copyright @yucwang 2026

pub mod core;
pub mod emitters;
pub mod integrators;
pub mod io;
pub mod materials;
pub mod math;
pub mod renderers;
pub mod scenes;
pub mod sensors;
pub mod shapes;
