// Copyright @yucwang 2021

pub mod accumulator;
pub mod integrator;
pub mod material;
pub mod rng;
pub mod sampler;
pub mod scene;
pub mod sensor;
