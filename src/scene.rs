use crate::{
    error::Error,
    material::{Dielectric, Lambertian, Material, Metal},
    primitives::{Intersect, Primitive, Sphere},
    DefaultRng, Hit, Ray,
};
use glam::{vec3, Vec3};
use itertools::iproduct;
use rand::prelude::*;
use std::sync::Arc;

/// An unordered collection of primitives queried for the nearest hit.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    primitives: Vec<Primitive>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, primitive: impl Into<Primitive>) {
        self.primitives.push(primitive.into());
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// The nearest hit over every primitive with `t_min < t < t_max`
    pub fn hit(&self, ray: Ray, t_min: f32, t_max: f32) -> Option<Hit<'_>> {
        let mut closest_so_far = t_max;
        let mut best = None;

        for primitive in &self.primitives {
            for hit in primitive.intersections(ray, t_min, t_max) {
                if hit.t < closest_so_far {
                    closest_so_far = hit.t;
                    best = Some(hit);
                }
            }
        }

        best
    }

    /// Generate the semi random cover scene: a ground sphere, a jittered grid
    /// of small spheres and three large spheres, one of each material.
    pub fn random(rng: &mut DefaultRng) -> Result<Self, Error> {
        let mut scene = Scene::new();

        // The big sphere
        let ground = Arc::new(Lambertian::new(vec3(0.5, 0.5, 0.5)).into());
        scene.add(Sphere::new(vec3(0.0, -1000.0, 0.0), 1000.0, ground)?);

        let glass: Arc<Material> = Arc::new(Dielectric::new(1.5)?.into());
        let reserved = vec3(4.0, 0.2, 0.0);

        for (a, b) in iproduct!(-11..11, -11..11) {
            let choice = rng.gen::<f32>();
            let center = vec3(
                a as f32 + 0.9 * rng.gen::<f32>(),
                0.2,
                b as f32 + 0.9 * rng.gen::<f32>(),
            );

            if (center - reserved).length() <= 0.9 {
                continue;
            }

            let material: Arc<Material> = if choice < 0.8 {
                let albedo = vec3(
                    rng.gen::<f32>() * rng.gen::<f32>(),
                    rng.gen::<f32>() * rng.gen::<f32>(),
                    rng.gen::<f32>() * rng.gen::<f32>(),
                );
                Arc::new(Lambertian::new(albedo).into())
            } else if choice < 0.95 {
                let albedo = vec3(
                    0.5 * (1.0 + rng.gen::<f32>()),
                    0.5 * (1.0 + rng.gen::<f32>()),
                    0.5 * (1.0 + rng.gen::<f32>()),
                );
                Arc::new(Metal::new(albedo, rng.gen::<f32>())?.into())
            } else {
                Arc::clone(&glass)
            };

            scene.add(Sphere::new(center, 0.2, material)?);
        }

        scene.add(Sphere::new(vec3(0.0, 1.0, 0.0), 1.0, glass)?);

        let diffuse = Arc::new(Lambertian::new(vec3(0.4, 0.2, 0.1)).into());
        scene.add(Sphere::new(vec3(-4.0, 1.0, 0.0), 1.0, diffuse)?);

        let metal = Arc::new(Metal::new(vec3(0.7, 0.6, 0.5), 0.0)?.into());
        scene.add(Sphere::new(vec3(4.0, 1.0, 0.0), 1.0, metal)?);

        log::debug!("Generated random scene with {} spheres", scene.len());

        Ok(scene)
    }
}

impl FromIterator<Primitive> for Scene {
    fn from_iter<I: IntoIterator<Item = Primitive>>(iter: I) -> Self {
        Self {
            primitives: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-4;

    fn matte() -> Arc<Material> {
        Arc::new(Lambertian::new(Vec3::splat(0.5)).into())
    }

    fn sphere(center: Vec3, radius: f32) -> Sphere {
        Sphere::new(center, radius, matte()).unwrap()
    }

    #[test]
    fn test_empty_scene_never_hits() {
        let scene = Scene::new();
        let ray = Ray::new(Vec3::ZERO, vec3(0.0, 0.0, -1.0));

        assert!(scene.is_empty());
        assert!(scene.hit(ray, 0.001, f32::INFINITY).is_none());
    }

    #[test]
    fn test_scene_returns_nearest_hit_regardless_of_order() {
        let near = sphere(vec3(0.0, 0.0, -3.0), 1.0);
        let middle = sphere(vec3(0.0, 0.0, -6.0), 1.0);
        let far = sphere(vec3(0.0, 0.0, -10.0), 2.0);
        let ray = Ray::new(Vec3::ZERO, vec3(0.0, 0.0, -1.0));

        let orders = [
            vec![far.clone(), near.clone(), middle.clone()],
            vec![near.clone(), middle.clone(), far.clone()],
            vec![middle.clone(), far.clone(), near.clone()],
        ];

        for order in orders {
            let scene: Scene = order.into_iter().map(Primitive::from).collect();
            let hit = scene.hit(ray, 0.001, f32::INFINITY).unwrap();

            assert!((hit.t - 2.0).abs() < EPSILON);
            for primitive in scene.primitives() {
                for candidate in primitive.intersections(ray, 0.001, f32::INFINITY) {
                    assert!(hit.t <= candidate.t);
                }
            }
        }
    }

    #[test]
    fn test_scene_respects_the_query_interval() {
        let mut scene = Scene::new();
        scene.add(sphere(vec3(0.0, 0.0, -3.0), 1.0));
        scene.add(sphere(vec3(0.0, 0.0, -10.0), 1.0));
        let ray = Ray::new(Vec3::ZERO, vec3(0.0, 0.0, -1.0));

        let hit = scene.hit(ray, 5.0, f32::INFINITY).unwrap();
        assert!((hit.t - 9.0).abs() < EPSILON);

        assert!(scene.hit(ray, 0.001, 1.5).is_none());
    }

    #[test]
    fn test_scene_misses_when_every_member_misses() {
        let mut scene = Scene::new();
        scene.add(sphere(vec3(5.0, 0.0, -3.0), 1.0));
        scene.add(sphere(vec3(-5.0, 0.0, -3.0), 1.0));
        let ray = Ray::new(Vec3::ZERO, vec3(0.0, 0.0, -1.0));

        assert_eq!(scene.len(), 2);
        assert!(scene.hit(ray, 0.001, f32::INFINITY).is_none());
    }

    #[test]
    fn test_random_scene_layout() {
        let mut rng = DefaultRng::seed_from_u64(42);
        let scene = Scene::random(&mut rng).unwrap();

        // Ground, at most 22 * 22 small spheres and the three large ones
        assert!(scene.len() > 4);
        assert!(scene.len() <= 1 + 22 * 22 + 3);

        let spheres: Vec<&Sphere> = scene
            .primitives()
            .iter()
            .map(|primitive| match primitive {
                Primitive::Sphere(sphere) => sphere,
            })
            .collect();

        let ground = spheres[0];
        assert_eq!(ground.center(), vec3(0.0, -1000.0, 0.0));
        assert_eq!(ground.radius(), 1000.0);

        let large: Vec<_> = spheres.iter().filter(|s| s.radius() == 1.0).collect();
        assert_eq!(large.len(), 3);
        assert!(matches!(large[0].material().as_ref(), Material::Dielectric(_)));
        assert!(matches!(large[1].material().as_ref(), Material::Lambertian(_)));
        assert!(matches!(large[2].material().as_ref(), Material::Metal(_)));

        for small in spheres.iter().filter(|s| s.radius() == 0.2) {
            let center = small.center();
            assert_eq!(center.y, 0.2);
            assert!((center - vec3(4.0, 0.2, 0.0)).length() > 0.9);

            match small.material().as_ref() {
                Material::Lambertian(lambertian) => {
                    assert!(lambertian.albedo.cmpge(Vec3::ZERO).all());
                    assert!(lambertian.albedo.cmplt(Vec3::ONE).all());
                }
                Material::Metal(metal) => {
                    assert!(metal.albedo.cmpge(Vec3::splat(0.5)).all());
                    assert!((0.0..=1.0).contains(&metal.fuzz));
                }
                Material::Dielectric(dielectric) => {
                    assert_eq!(dielectric.refractive_index, 1.5);
                }
            }
        }
    }

    #[test]
    fn test_random_scene_mostly_diffuse() {
        let mut rng = DefaultRng::seed_from_u64(1234);
        let scene = Scene::random(&mut rng).unwrap();

        let diffuse = scene
            .primitives()
            .iter()
            .filter(|primitive| match primitive {
                Primitive::Sphere(sphere) => {
                    matches!(sphere.material().as_ref(), Material::Lambertian(_))
                }
            })
            .count();

        // Roughly 80% of the small spheres are diffuse
        assert!(diffuse as f32 > 0.6 * scene.len() as f32);
    }

    #[test]
    fn test_random_scene_is_reproducible() {
        let first = Scene::random(&mut DefaultRng::seed_from_u64(9)).unwrap();
        let second = Scene::random(&mut DefaultRng::seed_from_u64(9)).unwrap();

        assert_eq!(first.len(), second.len());
        for (a, b) in first.primitives().iter().zip(second.primitives()) {
            let (Primitive::Sphere(a), Primitive::Sphere(b)) = (a, b);
            assert_eq!(a.center(), b.center());
            assert_eq!(a.material(), b.material());
        }
    }
}
