use crate::material::Material;
use glam::Vec3;

/// The ray data type
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    pub fn point_at_parameter(&self, t: f32) -> Vec3 {
        self.origin + t * self.direction
    }
}

/// Contains data to be used in the generation of a new ray as a result of an intersection.
#[derive(Clone, Copy, Debug)]
pub struct Hit<'a> {
    pub t: f32,
    pub point: Vec3,
    /// Outward facing unit normal
    pub normal: Vec3,
    pub material: &'a Material,
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::vec3;

    #[test]
    fn test_point_at_parameter_endpoints() {
        let ray = Ray::new(vec3(1.0, -2.0, 3.0), vec3(0.5, 4.0, -1.0));

        assert_eq!(ray.point_at_parameter(0.0), ray.origin);
        assert_eq!(ray.point_at_parameter(1.0), ray.origin + ray.direction);
    }

    #[test]
    fn test_point_at_parameter_is_linear() {
        let ray = Ray::new(Vec3::ZERO, vec3(1.0, 2.0, 3.0));

        assert_eq!(ray.point_at_parameter(2.0), vec3(2.0, 4.0, 6.0));
        assert_eq!(ray.point_at_parameter(-1.0), vec3(-1.0, -2.0, -3.0));
    }
}
