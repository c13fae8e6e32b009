use crate::{material::Scatter, scene::Scene, DefaultRng, Ray};
use glam::{vec3, Vec3};

/// Lower bound on hit distances, keeps scattered rays from re-hitting their own origin.
pub const EPSILON: f32 = 0.001;

/// How many times a ray may scatter before it is cut off.
pub const MAX_DEPTH: u32 = 10;

/// The sky gradient seen by rays that escape the scene. The only light source.
pub fn background(ray: Ray) -> Vec3 {
    let dir = ray.direction.normalize();
    let t = 0.5 * (dir.y + 1.0);
    (1.0 - t) * vec3(1.0, 1.0, 1.0) + t * vec3(0.5, 0.7, 1.0)
}

/// Computes the color carried back along `ray`.
///
/// Follows the ray from surface to surface, multiplying in each material's
/// attenuation. Escaping rays pick up the background; absorbed rays and rays
/// still bouncing after `max_depth` scatters contribute black.
pub fn color(
    ray: Ray,
    scene: &Scene,
    max_depth: u32,
    t_min: f32,
    rng: &mut DefaultRng,
) -> Trace {
    let mut throughput = Vec3::ONE;
    let mut ray = ray;
    let mut rays = 0;

    for depth in 0..=max_depth {
        rays += 1;

        let Some(hit) = scene.hit(ray, t_min, f32::INFINITY) else {
            return Trace {
                color: throughput * background(ray),
                rays,
            };
        };

        // The material of the object we hit decides how the ray scatters
        match hit.material.scatter(&ray, &hit, rng) {
            Some(scatter) if depth < max_depth => {
                throughput *= scatter.attenuation;
                ray = scatter.scattered;
            }
            _ => break,
        }
    }

    Trace {
        color: Vec3::ZERO,
        rays,
    }
}

/// The color of a traced path and how many rays it took.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Trace {
    pub color: Vec3,
    pub rays: u64,
}
