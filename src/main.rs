// Copyright 2020 TwoCookingMice

use macaron::core::integrator::SceneContext;
use macaron::core::material::Material;
use macaron::core::sampler::HashedSampleSource;
use macaron::emitters::table::EmitterTable;
use macaron::integrators::path::PathIntegrator;
use macaron::io::{ exr_utils, RenderError };
use macaron::math::spectrum::RGBSpectrum;
use macaron::renderers::progressive::ProgressiveRenderer;
use macaron::renderers::settings::{ RenderSettings, SceneChoice };
use macaron::scenes;
use macaron::sensors::perspective::PinholeCamera;
use macaron::shapes::triangle::LinearSceneQuery;

use std::env;

fn run(settings: &RenderSettings) -> Result<(), RenderError> {
    let built = match settings.scene {
        SceneChoice::CornellBox => scenes::cornell_box()?,
        SceneChoice::Furnace => scenes::furnace_plane(Material::diffuse(RGBSpectrum::splat(0.8)))?,
        SceneChoice::SingleLight => scenes::single_light(Material::diffuse(RGBSpectrum::splat(0.5)), RGBSpectrum::splat(4.0))?,
    };
    let scene = &built.scene;
    let query = LinearSceneQuery::new(scene);
    let emitters = EmitterTable::build(scene);
    let ctx = SceneContext { scene, query: &query, emitters: &emitters };

    let integrator = PathIntegrator::new(settings.integrator);
    let camera = PinholeCamera::from_pose(&built.camera, settings.width, settings.height);
    let source = HashedSampleSource::new(settings.seed);

    log::info!("Rendering {:?} at {}x{} for {} frames with {:?}.",
               settings.scene, settings.width, settings.height, settings.frames, settings.integrator.strategy);
    let mut renderer = ProgressiveRenderer::new(&integrator, ctx, &camera, &source);
    let image = renderer.render(settings.frames);
    exr_utils::write_exr_to_file(&image, &settings.output)
}

fn main() {
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map(|s| s.as_str()).unwrap_or("macaron");
    let settings = match RenderSettings::from_args(args.get(1..).unwrap_or(&[])) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("Usage: {} {}", program, RenderSettings::USAGE);
            std::process::exit(1);
        }
    };

    if let Err(e) = run(&settings) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
