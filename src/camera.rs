use crate::{error::Error, DefaultRng, Ray};
use glam::Vec3;
use rand_distr::{Distribution, UnitDisc};
use serde::Deserialize;

/// A thin lens camera.
///
/// Everything at `focus_dist` from the eye is in perfect focus; the rest blurs
/// in proportion to the aperture and the distance from that plane.
#[derive(Clone, Debug)]
pub struct Camera {
    origin: Vec3,
    lower_left_corner: Vec3,
    horizontal: Vec3,
    vertical: Vec3,
    u: Vec3,
    v: Vec3,
    w: Vec3,
    lens_radius: f32,
}

impl Camera {
    pub fn new(
        origin: Vec3,
        target: Vec3,
        up: Vec3,
        vfov: f32,
        aspect: f32,
        aperture: f32,
        focus_dist: f32,
    ) -> Result<Self, Error> {
        if !(vfov > 0.0 && vfov < 180.0) {
            return Err(Error::InvalidCamera(format!(
                "vertical field of view must be in (0, 180) degrees, got {}",
                vfov
            )));
        }
        if !(aspect > 0.0 && aspect.is_finite()) {
            return Err(Error::InvalidCamera(format!(
                "aspect ratio must be positive, got {}",
                aspect
            )));
        }
        if !(aperture >= 0.0 && aperture.is_finite()) {
            return Err(Error::InvalidCamera(format!(
                "aperture must not be negative, got {}",
                aperture
            )));
        }
        if !(focus_dist > 0.0 && focus_dist.is_finite()) {
            return Err(Error::InvalidCamera(format!(
                "focus distance must be positive, got {}",
                focus_dist
            )));
        }

        let w = (origin - target)
            .try_normalize()
            .ok_or_else(|| Error::InvalidCamera("eye and target coincide".into()))?;
        let u = up
            .cross(w)
            .try_normalize()
            .ok_or_else(|| Error::InvalidCamera("up vector is parallel to the view direction".into()))?;
        let v = w.cross(u);

        let lens_radius = aperture / 2.0;
        let theta = vfov.to_radians();
        let half_height = f32::tan(theta / 2.0);
        let half_width = aspect * half_height;
        let lower_left_corner =
            origin - half_width * focus_dist * u - half_height * focus_dist * v - focus_dist * w;
        let horizontal = 2.0 * half_width * focus_dist * u;
        let vertical = 2.0 * half_height * focus_dist * v;

        Ok(Self {
            origin,
            lower_left_corner,
            horizontal,
            vertical,
            u,
            v,
            w,
            lens_radius,
        })
    }

    /// The camera's orthonormal basis, `w` pointing from the target back to the eye.
    pub fn basis(&self) -> (Vec3, Vec3, Vec3) {
        (self.u, self.v, self.w)
    }

    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// The world space ray through screen coordinates `(s, t)`, where `(0, 0)`
    /// is the lower left corner. Coordinates outside `[0, 1]` extrapolate.
    pub fn ray(&self, s: f32, t: f32, rng: &mut DefaultRng) -> Ray {
        let offset = if self.lens_radius > 0.0 {
            let [x, y]: [f32; 2] = UnitDisc.sample(rng);
            self.lens_radius * (self.u * x + self.v * y)
        } else {
            Vec3::ZERO
        };

        Ray::new(
            self.origin + offset,
            self.lower_left_corner + s * self.horizontal + t * self.vertical - self.origin - offset,
        )
    }
}

/// Declarative description of a [`Camera`], as found in render config files.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraSettings {
    pub look_from: [f32; 3],
    pub look_at: [f32; 3],
    pub v_up: [f32; 3],
    /// Vertical field of view in degrees
    pub vfov: f32,
    pub aperture: f32,
    /// Defaults to the distance between `look_from` and `look_at`
    pub focus_distance: Option<f32>,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            look_from: [13.0, 2.0, 3.0],
            look_at: [0.0, 0.0, 0.0],
            v_up: [0.0, 1.0, 0.0],
            vfov: 20.0,
            aperture: 0.1,
            focus_distance: None,
        }
    }
}

impl CameraSettings {
    pub fn build(&self, aspect: f32) -> Result<Camera, Error> {
        let look_from = Vec3::from(self.look_from);
        let look_at = Vec3::from(self.look_at);
        let focus_distance = self
            .focus_distance
            .unwrap_or_else(|| (look_from - look_at).length());

        Camera::new(
            look_from,
            look_at,
            Vec3::from(self.v_up),
            self.vfov,
            aspect,
            self.aperture,
            focus_distance,
        )
    }
}
