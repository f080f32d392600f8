// Copyright @yucwang 2026

use crate::integrators::path::{ IntegratorSettings, SamplingStrategy };
use crate::io::RenderError;
use crate::math::constants::Float;
use crate::math::spectrum::RGBSpectrum;

use std::str::FromStr;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SceneChoice {
    CornellBox,
    Furnace,
    SingleLight,
}

impl FromStr for SceneChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cornell" => Ok(SceneChoice::CornellBox),
            "furnace" => Ok(SceneChoice::Furnace),
            "single-light" => Ok(SceneChoice::SingleLight),
            other => Err(format!("unknown scene '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderSettings {
    pub width: usize,
    pub height: usize,
    pub seed: u64,
    pub frames: u64,
    pub scene: SceneChoice,
    pub output: String,
    pub integrator: IntegratorSettings,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            width: 256,
            height: 256,
            seed: 0,
            frames: 1024,
            scene: SceneChoice::CornellBox,
            output: String::from("out.exr"),
            integrator: IntegratorSettings::default(),
        }
    }
}

fn parse_value<T: FromStr>(flag: &str, value: Option<&String>) -> Result<T, RenderError> {
    let value = value.ok_or_else(|| RenderError::InvalidArgument(format!("{} expects a value", flag)))?;
    value.parse::<T>()
        .map_err(|_| RenderError::InvalidArgument(format!("{} got '{}'", flag, value)))
}

impl RenderSettings {
    pub const USAGE: &'static str =
        "<output.exr> [--width N] [--height N] [--frames N] [--seed N] \
         [--strategy mis|bsdf|light] [--scene cornell|furnace|single-light] \
         [--environment V] [--max-bounces N]";

    /// Parses command line arguments, without the program name.
    pub fn from_args(args: &[String]) -> Result<Self, RenderError> {
        let mut settings = RenderSettings::default();
        let mut output = None;

        let mut i = 0;
        while i < args.len() {
            let flag = args[i].as_str();
            match flag {
                "--width" => {
                    i += 1;
                    settings.width = parse_value(flag, args.get(i))?;
                }
                "--height" => {
                    i += 1;
                    settings.height = parse_value(flag, args.get(i))?;
                }
                "--frames" => {
                    i += 1;
                    settings.frames = parse_value(flag, args.get(i))?;
                }
                "--seed" => {
                    i += 1;
                    settings.seed = parse_value(flag, args.get(i))?;
                }
                "--strategy" => {
                    i += 1;
                    settings.integrator.strategy = args.get(i)
                        .ok_or_else(|| RenderError::InvalidArgument(String::from("--strategy expects a value")))?
                        .parse::<SamplingStrategy>()
                        .map_err(RenderError::InvalidArgument)?;
                }
                "--scene" => {
                    i += 1;
                    settings.scene = args.get(i)
                        .ok_or_else(|| RenderError::InvalidArgument(String::from("--scene expects a value")))?
                        .parse::<SceneChoice>()
                        .map_err(RenderError::InvalidArgument)?;
                }
                "--environment" => {
                    i += 1;
                    let v: Float = parse_value(flag, args.get(i))?;
                    settings.integrator.environment = RGBSpectrum::splat(v);
                }
                "--max-bounces" => {
                    i += 1;
                    settings.integrator.max_bounces = Some(parse_value(flag, args.get(i))?);
                }
                other if other.starts_with("--") => {
                    return Err(RenderError::InvalidArgument(format!("unknown flag {}", other)));
                }
                other => {
                    if output.is_some() {
                        return Err(RenderError::InvalidArgument(format!("unexpected argument {}", other)));
                    }
                    output = Some(other.to_string());
                }
            }
            i += 1;
        }

        settings.output = output
            .ok_or_else(|| RenderError::InvalidArgument(String::from("missing output path")))?;
        if settings.width == 0 || settings.height == 0 {
            return Err(RenderError::InvalidArgument(String::from("image size must be positive")));
        }
        Ok(settings)
    }
}
