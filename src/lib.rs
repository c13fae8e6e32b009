//! A recursive, stochastic ray tracer for scenes made of spheres.
//!
//! Rays leave a thin-lens [`Camera`], the [`Scene`] resolves the nearest hit,
//! the hit surface's [`Material`] scatters the ray and the integrator folds
//! the attenuations of every bounce into a color. [`Renderer`] runs that per
//! pixel with multi-sample anti-aliasing and gamma correction.

pub mod camera;
pub mod error;
pub mod integrator;
pub mod material;
pub mod primitives;
pub mod ray;
pub mod render;
pub mod scene;

pub use crate::{
    camera::{Camera, CameraSettings},
    error::{Error, Result},
    material::{Dielectric, Lambertian, Material, Metal, Scatter, ScatterResult},
    primitives::{Intersect, Primitive, Sphere},
    ray::{Hit, Ray},
    render::{render, RenderOutput, RenderSettings, RenderStats, Renderer},
    scene::Scene,
};

/// The random number generator every sampling routine draws from.
pub type DefaultRng = rand_xoshiro::Xoshiro256Plus;
