// Copyright @yucwang 2026

use crate::core::scene::SceneError;

use std::fmt;

pub mod exr_utils;

#[derive(Debug)]
pub enum RenderError {
    Io(std::io::Error),
    Exr(String),
    InvalidArgument(String),
    Scene(SceneError),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::Io(err) => write!(f, "io error: {}", err),
            RenderError::Exr(msg) => write!(f, "exr error: {}", msg),
            RenderError::InvalidArgument(msg) => write!(f, "invalid argument: {}", msg),
            RenderError::Scene(err) => write!(f, "scene error: {}", err),
        }
    }
}

impl std::error::Error for RenderError {}

impl From<std::io::Error> for RenderError {
    fn from(err: std::io::Error) -> Self {
        RenderError::Io(err)
    }
}

impl From<SceneError> for RenderError {
    fn from(err: SceneError) -> Self {
        RenderError::Scene(err)
    }
}

impl From<exr::error::Error> for RenderError {
    fn from(err: exr::error::Error) -> Self {
        RenderError::Exr(err.to_string())
    }
}
