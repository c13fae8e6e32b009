//! Per-pixel sampling, tone mapping and the public render entry points.

use crate::{
    camera::{Camera, CameraSettings},
    error::{Error, Result},
    integrator::{self, color},
    scene::Scene,
    DefaultRng,
};
use glam::Vec3;
use image::{Rgba, RgbaImage};
use rand::prelude::*;
use serde::Deserialize;
use std::{
    fs,
    path::Path,
    time::{Duration, Instant},
};

/// Everything needed to turn a scene into an image.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct RenderSettings {
    pub width: u32,
    pub height: u32,
    /// Rays averaged per pixel
    pub samples: u32,
    pub max_depth: u32,
    /// Nearest hit distance accepted along a ray
    pub epsilon: f32,
    /// Fixes every random draw of the render. Entropy when absent.
    pub seed: Option<u64>,
    pub camera: CameraSettings,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            width: 200,
            height: 100,
            samples: 8,
            max_depth: integrator::MAX_DEPTH,
            epsilon: integrator::EPSILON,
            seed: None,
            camera: CameraSettings::default(),
        }
    }
}

impl RenderSettings {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::InvalidSettings(format!(
                "image dimensions must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if self.samples == 0 {
            return Err(Error::InvalidSettings(
                "at least one sample per pixel is required".into(),
            ));
        }
        if !(self.epsilon > 0.0 && self.epsilon.is_finite()) {
            return Err(Error::InvalidSettings(format!(
                "epsilon must be positive, got {}",
                self.epsilon
            )));
        }

        Ok(())
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// A generator seeded from `seed`, or from entropy when there is none.
    pub fn rng(&self) -> DefaultRng {
        match self.seed {
            Some(seed) => DefaultRng::seed_from_u64(seed),
            None => DefaultRng::from_entropy(),
        }
    }
}

/// Counters gathered over one render.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RenderStats {
    /// Rays leaving the camera
    pub primary_rays: u64,
    /// Every ray traced, scattered ones included
    pub total_rays: u64,
    pub elapsed: Duration,
}

impl RenderStats {
    pub fn rays_per_second(&self) -> f64 {
        let seconds = self.elapsed.as_secs_f64();
        if seconds > 0.0 {
            self.total_rays as f64 / seconds
        } else {
            0.0
        }
    }
}

pub struct RenderOutput {
    /// Gamma corrected 8-bit pixels, row 0 at the top, alpha always opaque
    pub image: RgbaImage,
    pub stats: RenderStats,
}

pub struct Renderer {
    settings: RenderSettings,
}

impl Renderer {
    pub fn new(settings: RenderSettings) -> Result<Self> {
        settings.validate()?;
        Ok(Self { settings })
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    /// The camera described by the settings, matched to the image aspect ratio.
    pub fn camera(&self) -> Result<Camera> {
        self.settings.camera.build(self.settings.aspect())
    }

    pub fn render(&self, scene: &Scene, camera: &Camera) -> RenderOutput {
        let RenderSettings {
            width,
            height,
            samples,
            max_depth,
            epsilon,
            ..
        } = self.settings;

        log::info!(
            "Rendering {}x{} at {} samples per pixel, {} spheres",
            width,
            height,
            samples,
            scene.len()
        );

        // Keep the pixel streams clear of whatever the scene builder drew from the same seed
        let mut rng = self.settings.rng();
        rng.long_jump();

        let mut image = RgbaImage::new(width, height);
        let mut stats = RenderStats::default();
        let start = Instant::now();

        for (y, row) in image.rows_mut().enumerate() {
            // Every row owns a disjoint stream
            let mut row_rng = rng.clone();
            rng.jump();

            // Image rows go top down, the camera's t goes bottom up
            let j = height - 1 - y as u32;

            for (i, pixel) in row.enumerate() {
                let mut out = Vec3::ZERO;

                // Antialiasing via multisampling
                for _ in 0..samples {
                    let (du, dv) = if samples == 1 {
                        (0.5, 0.5)
                    } else {
                        (row_rng.gen::<f32>(), row_rng.gen::<f32>())
                    };
                    let s = (i as f32 + du) / width as f32;
                    let t = (j as f32 + dv) / height as f32;

                    let ray = camera.ray(s, t, &mut row_rng);
                    let trace = color(ray, scene, max_depth, epsilon, &mut row_rng);

                    out += trace.color;
                    stats.primary_rays += 1;
                    stats.total_rays += trace.rays;
                }

                out /= samples as f32;
                *pixel = to_rgba(out);
            }

            log::trace!("Finished row {}/{}", y + 1, height);
        }

        stats.elapsed = start.elapsed();
        log::info!(
            "Time elapsed: {:.2?}, total rays: {:.2}M, rays per second: {:.2}M",
            stats.elapsed,
            stats.total_rays as f64 / 1_000_000.0,
            stats.rays_per_second() / 1_000_000.0
        );

        RenderOutput { image, stats }
    }
}

/// Gamma correct (gamma 2) a linear color and convert it from [0, 1] to [0, 255].
pub fn to_rgba(color: Vec3) -> Rgba<u8> {
    // The float to int cast saturates, so stray values above 1 land on 255
    let quantize = |channel: f32| (255.99 * channel.sqrt()) as u8;

    Rgba([quantize(color.x), quantize(color.y), quantize(color.z), 255])
}

/// Renders the random sphere scene through the default camera.
pub fn render(width: u32, height: u32, samples: u32) -> Result<RgbaImage> {
    let renderer = Renderer::new(RenderSettings {
        width,
        height,
        samples,
        ..RenderSettings::default()
    })?;

    let scene = Scene::random(&mut renderer.settings().rng())?;
    let camera = renderer.camera()?;

    Ok(renderer.render(&scene, &camera).image)
}
