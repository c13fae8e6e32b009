//! This module is full of primitives that all impl Intersect

mod sphere;

pub use sphere::*;

use crate::ray::{Hit, Ray};
use enum_dispatch::enum_dispatch;
use smallvec::SmallVec;

/// Every intersection a single primitive reports along a ray
pub type Hits<'a> = SmallVec<[Hit<'a>; 2]>;

/// Computes whether a ray intersects a primitive
#[enum_dispatch]
pub trait Intersect {
    /// Every intersection with `t_min < t < t_max`, nearest first
    fn intersections(&self, ray: Ray, t_min: f32, t_max: f32) -> Hits<'_>;

    /// The nearest intersection with `t_min < t < t_max`
    fn intersection(&self, ray: Ray, t_min: f32, t_max: f32) -> Option<Hit<'_>> {
        self.intersections(ray, t_min, t_max).into_iter().next()
    }
}

/// All geometry a scene can hold
#[enum_dispatch(Intersect)]
#[derive(Clone, Debug)]
pub enum Primitive {
    Sphere,
}
