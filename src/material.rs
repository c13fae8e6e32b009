use crate::{error::Error, DefaultRng, Hit, Ray};
use enum_dispatch::enum_dispatch;
use glam::{vec3, Vec3};
use rand::prelude::*;

// Samples a random point inside the unit sphere by rejection
pub fn random_in_unit_sphere(rng: &mut DefaultRng) -> Vec3 {
    loop {
        let p = vec3(
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
        );
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}

// Reflect vector v around normal n
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

// Refract unit vector uv through a surface whose normal n faces against it.
// None means total internal reflection.
pub fn refract(uv: Vec3, n: Vec3, ni_over_nt: f32) -> Option<Vec3> {
    let dt = uv.dot(n);
    let discriminant = 1.0 - ni_over_nt * ni_over_nt * (1.0 - dt * dt);

    if discriminant < 0.0 {
        None
    } else {
        Some(ni_over_nt * (uv - n * dt) - n * f32::sqrt(discriminant))
    }
}

// An approximation for reflectivity
pub fn schlick(cosine: f32, refractive_index: f32) -> f32 {
    let r_0 = (1.0 - refractive_index) / (1.0 + refractive_index);
    let r_0 = r_0 * r_0;

    r_0 + (1.0 - r_0) * (1.0 - cosine).powi(5)
}

#[derive(Clone, Copy, Debug)]
pub struct ScatterResult {
    pub scattered: Ray,
    pub attenuation: Vec3,
}

/// How a surface responds to an incoming ray.
#[enum_dispatch]
pub trait Scatter {
    /// Returns the attenuation and the outgoing ray, or None if the ray is absorbed.
    fn scatter(&self, ray: &Ray, hit: &Hit<'_>, rng: &mut DefaultRng) -> Option<ScatterResult>;
}

/// Every surface type a sphere can be made of.
///
/// Materials are immutable and shared between primitives behind an `Arc`.
#[enum_dispatch(Scatter)]
#[derive(Clone, Debug, PartialEq)]
pub enum Material {
    Lambertian,
    Metal,
    Dielectric,
}

/// Ideal diffuse surface.
#[derive(Clone, Debug, PartialEq)]
pub struct Lambertian {
    pub albedo: Vec3,
}

impl Lambertian {
    pub fn new(albedo: Vec3) -> Self {
        Self { albedo }
    }
}

impl Scatter for Lambertian {
    fn scatter(&self, _ray: &Ray, hit: &Hit<'_>, rng: &mut DefaultRng) -> Option<ScatterResult> {
        let direction = hit.normal + random_in_unit_sphere(rng);

        Some(ScatterResult {
            scattered: Ray::new(hit.point, direction),
            attenuation: self.albedo,
        })
    }
}

/// Mirror-like surface, roughened by `fuzz`.
#[derive(Clone, Debug, PartialEq)]
pub struct Metal {
    pub albedo: Vec3,
    pub fuzz: f32,
}

impl Metal {
    pub fn new(albedo: Vec3, fuzz: f32) -> Result<Self, Error> {
        if !(0.0..=1.0).contains(&fuzz) {
            return Err(Error::InvalidFuzz(fuzz));
        }

        Ok(Self { albedo, fuzz })
    }
}

impl Scatter for Metal {
    fn scatter(&self, ray: &Ray, hit: &Hit<'_>, rng: &mut DefaultRng) -> Option<ScatterResult> {
        let reflected = reflect(ray.direction.normalize(), hit.normal);
        let scattered = Ray::new(hit.point, reflected + self.fuzz * random_in_unit_sphere(rng));

        // Rays fuzzed below the surface are absorbed
        if scattered.direction.dot(hit.normal) > 0.0 {
            Some(ScatterResult {
                scattered,
                attenuation: self.albedo,
            })
        } else {
            None
        }
    }
}

/// Clear refractive surface such as glass or water.
#[derive(Clone, Debug, PartialEq)]
pub struct Dielectric {
    pub refractive_index: f32,
}

/// The two candidate directions at a dielectric boundary and the chance of reflecting.
#[derive(Clone, Copy, Debug)]
pub struct Interface {
    pub reflected: Vec3,
    pub refracted: Option<Vec3>,
    pub reflect_prob: f32,
}

impl Dielectric {
    pub fn new(refractive_index: f32) -> Result<Self, Error> {
        if !(refractive_index > 1.0 && refractive_index.is_finite()) {
            return Err(Error::InvalidRefractiveIndex(refractive_index));
        }

        Ok(Self { refractive_index })
    }

    /// Resolves the boundary for a ray travelling along `direction` hitting a
    /// surface with outward normal `normal`.
    pub fn interface(&self, direction: Vec3, normal: Vec3) -> Interface {
        let unit_direction = direction.normalize();
        let cos_incident = unit_direction.dot(normal);
        let exiting = cos_incident > 0.0;

        let (outward_normal, ni_over_nt) = if exiting {
            (-normal, self.refractive_index)
        } else {
            (normal, 1.0 / self.refractive_index)
        };

        let reflected = reflect(unit_direction, normal);
        let refracted = refract(unit_direction, outward_normal, ni_over_nt);

        // Schlick takes the angle on the optically thinner side of the boundary
        let reflect_prob = match refracted {
            Some(refracted) if exiting => schlick(refracted.dot(normal), self.refractive_index),
            Some(_) => schlick(-cos_incident, self.refractive_index),
            None => 1.0,
        };

        Interface {
            reflected,
            refracted,
            reflect_prob,
        }
    }
}

impl Scatter for Dielectric {
    fn scatter(&self, ray: &Ray, hit: &Hit<'_>, rng: &mut DefaultRng) -> Option<ScatterResult> {
        let interface = self.interface(ray.direction, hit.normal);

        // Reflect or refract based on probability
        let direction = match interface.refracted {
            Some(refracted) if rng.gen::<f32>() >= interface.reflect_prob => refracted,
            _ => interface.reflected,
        };

        Some(ScatterResult {
            scattered: Ray::new(hit.point, direction),
            attenuation: Vec3::ONE,
        })
    }
}
