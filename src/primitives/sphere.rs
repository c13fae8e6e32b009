use crate::{
    error::Error,
    material::Material,
    primitives::{Hits, Intersect},
    Hit, Ray,
};
use glam::Vec3;
use smallvec::SmallVec;
use std::sync::Arc;

#[derive(Clone, Debug)]
pub struct Sphere {
    center: Vec3,
    radius: f32,
    material: Arc<Material>,
}

impl Sphere {
    pub fn new(center: Vec3, radius: f32, material: Arc<Material>) -> Result<Self, Error> {
        // NaN fails this comparison too
        if !(radius > 0.0 && radius.is_finite()) {
            return Err(Error::InvalidRadius(radius));
        }

        Ok(Self {
            center,
            radius,
            material,
        })
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn material(&self) -> &Arc<Material> {
        &self.material
    }
}

impl Intersect for Sphere {
    fn intersections(&self, ray: Ray, t_min: f32, t_max: f32) -> Hits<'_> {
        let mut hits = SmallVec::new();

        let oc = ray.origin - self.center;
        let a = ray.direction.dot(ray.direction);
        let b = oc.dot(ray.direction);
        let c = oc.dot(oc) - self.radius * self.radius;
        let discriminant = b * b - a * c;

        if discriminant < 0.0 {
            return hits;
        }

        let sqrt_d = f32::sqrt(discriminant);
        let t_1 = (-b - sqrt_d) / a;
        let t_2 = (-b + sqrt_d) / a;

        for t in [t_1, t_2] {
            if t_min < t && t < t_max {
                let point = ray.point_at_parameter(t);

                hits.push(Hit {
                    t,
                    point,
                    normal: (point - self.center) / self.radius,
                    material: &self.material,
                });
            }
        }

        hits
    }
}
