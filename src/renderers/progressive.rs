// Copyright @yucwang 2026

use crate::core::accumulator::{ FrameAccumulator, RunningAverage };
use crate::core::integrator::{ Integrator, RayState, SceneContext };
use crate::core::sampler::RandomSampleSource;
use crate::core::sensor::Sensor;
use crate::math::bitmap::Bitmap;
use crate::math::ray::Ray3f;
use crate::math::spectrum::RGBSpectrum;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::mpsc;
use std::thread;

/// Bounce index reserved for the camera-ray jitter of a new path.
const CAMERA_BOUNCE: u32 = u32::MAX;

/// Advances one path per pixel by a single bounce each tick and averages
/// the radiance of every path that completes.
pub struct ProgressiveRenderer<'a> {
    integrator: &'a dyn Integrator,
    ctx: SceneContext<'a>,
    sensor: &'a dyn Sensor,
    source: &'a dyn RandomSampleSource,
    states: Vec<RayState>,
    accumulator: RunningAverage,
    frame: u64,
    thread_count: usize,
}

fn camera_ray(sensor: &dyn Sensor, source: &dyn RandomSampleSource, pixel: usize, frame: u64) -> Ray3f {
    let width = sensor.width();
    let jitter = source.next(pixel, frame, CAMERA_BOUNCE).point;
    sensor.generate_ray(pixel % width, pixel / width, &jitter)
}

impl<'a> ProgressiveRenderer<'a> {
    pub fn new(integrator: &'a dyn Integrator,
               ctx: SceneContext<'a>,
               sensor: &'a dyn Sensor,
               source: &'a dyn RandomSampleSource) -> Self {
        let (width, height) = (sensor.width(), sensor.height());
        let states = (0..width * height)
            .map(|pixel| RayState::new(&camera_ray(sensor, source, pixel, 0)))
            .collect();
        let thread_count = thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        log::debug!("ProgressiveRenderer: {}x{} on {} threads, {}", width, height, thread_count, sensor.describe());

        Self {
            integrator,
            ctx,
            sensor,
            source,
            states,
            accumulator: RunningAverage::new(width, height),
            frame: 0,
            thread_count,
        }
    }

    pub fn with_threads(mut self, thread_count: usize) -> Self {
        self.thread_count = thread_count.max(1);
        self
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn states(&self) -> &[RayState] {
        &self.states
    }

    pub fn accumulator(&self) -> &RunningAverage {
        &self.accumulator
    }

    pub fn image(&self) -> Bitmap {
        self.accumulator.to_bitmap()
    }

    /// Runs one bounce for every pixel. Returns the number of paths completed.
    pub fn tick(&mut self) -> usize {
        let width = self.sensor.width();
        if width == 0 || self.states.is_empty() {
            return 0;
        }
        let height = self.states.len() / width;
        let rows_per_chunk = (height + self.thread_count - 1) / self.thread_count;
        let chunk_len = rows_per_chunk.max(1) * width;

        let frame = self.frame;
        let integrator = self.integrator;
        let ctx = self.ctx;
        let sensor = self.sensor;
        let source = self.source;
        let accumulator = &mut self.accumulator;
        let (tx, rx) = mpsc::channel::<Vec<(usize, RGBSpectrum)>>();
        let mut completed = 0usize;

        thread::scope(|scope| {
            for (chunk_index, chunk) in self.states.chunks_mut(chunk_len).enumerate() {
                let tx = tx.clone();
                scope.spawn(move || {
                    let first_pixel = chunk_index * chunk_len;
                    let mut finished = Vec::new();
                    for (offset, state) in chunk.iter_mut().enumerate() {
                        let pixel = first_pixel + offset;
                        let samples = source.next(pixel, frame, state.bounce_count);
                        integrator.bounce(&ctx, state, &samples);
                        if state.completed {
                            finished.push((pixel, state.radiance));
                            state.reset(&camera_ray(sensor, source, pixel, frame + 1));
                        }
                    }
                    // The receiver outlives every worker inside the scope.
                    let _ = tx.send(finished);
                });
            }

            drop(tx);
            for finished in rx.iter() {
                completed += finished.len();
                for (pixel, radiance) in finished {
                    accumulator.submit(pixel, radiance);
                }
            }
        });

        self.frame += 1;
        completed
    }

    /// Runs `frames` ticks and returns the running average.
    pub fn render(&mut self, frames: u64) -> Bitmap {
        let progress = ProgressBar::new(frames);
        progress.set_style(
            ProgressStyle::with_template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} frames")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );

        let mut completed = 0usize;
        for _ in 0..frames {
            completed += self.tick();
            progress.inc(1);
        }
        progress.finish_and_clear();
        log::info!("Rendered {} frames, {} paths completed.", frames, completed);

        self.image()
    }
}
