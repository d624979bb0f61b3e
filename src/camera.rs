use std::f64::consts::PI;

use crate::ray::Ray;
use crate::vec3::{Vec3, EPS};

/// Pinhole camera parameters, independent of any resolved look-at basis.
#[derive(Debug, Clone, Copy)]
pub struct CameraOptions {
    pub screen_width: u32,
    pub screen_height: u32,
    pub fov: f64,
    pub look_from: Vec3,
    pub look_to: Vec3,
}

impl Default for CameraOptions {
    fn default() -> CameraOptions {
        CameraOptions {
            screen_width: 640,
            screen_height: 480,
            fov: PI / 2.0,
            look_from: Vec3::zero(),
            look_to: Vec3::new(0.0, 0.0, -1.0),
        }
    }
}

/// The camera-to-world change of basis: rows `right`, `up`, `forward`, with `look_from` as the
/// (non-standard, see `point_to_world`) translation row. `forward` points from `look_to` back
/// toward `look_from` — the camera itself looks down `-forward`.
#[derive(Debug, Clone, Copy)]
struct CameraToWorld {
    right: Vec3,
    up: Vec3,
    forward: Vec3,
    look_from: Vec3,
}

fn look_at(look_from: Vec3, look_to: Vec3) -> CameraToWorld {
    let forward = (look_from - look_to).normalize();

    let mut up_hint = Vec3::new(0.0, 1.0, 0.0);
    let mut right = up_hint.cross(forward);
    if right.length() < EPS {
        up_hint = Vec3::new(0.0, 0.0, 1.0);
        right = up_hint.cross(forward);
        if up_hint.dot(forward) > 0.0 {
            right = -right;
        }
    }
    let right = right.normalize();

    let up = forward.cross(right);

    CameraToWorld {
        right,
        up,
        forward,
        look_from,
    }
}

impl CameraToWorld {
    /// Rotates a direction into world space, ignoring translation.
    fn vector_to_world(&self, v: Vec3) -> Vec3 {
        v.x * self.right + v.y * self.up + v.z * self.forward
    }

    /// Transforms a point into world space. The divide-by-`(p . look_from + 1)` projective
    /// normalization is non-standard (a point's 4th homogeneous coordinate would ordinarily
    /// just be 1), but kept to match the camera's reference renders: for `p = origin`
    /// it's a divide by exactly 1, so `point_to_world(origin) == look_from` as expected.
    fn point_to_world(&self, p: Vec3) -> Vec3 {
        let rotated = self.vector_to_world(p) + self.look_from;
        let depth = p.dot(self.look_from) + 1.0;
        rotated / depth
    }
}

/// A camera with its look-at basis and screen mapping already resolved, ready to emit one
/// primary ray per pixel.
pub struct Camera {
    basis: CameraToWorld,
    origin: Vec3,
    width: u32,
    height: u32,
    aspect_ratio: f64,
    scale: f64,
}

impl Camera {
    pub fn new(options: &CameraOptions) -> Camera {
        let basis = look_at(options.look_from, options.look_to);
        let origin = basis.point_to_world(Vec3::zero());
        Camera {
            basis,
            origin,
            width: options.screen_width,
            height: options.screen_height,
            aspect_ratio: f64::from(options.screen_width) / f64::from(options.screen_height),
            scale: (options.fov / 2.0).tan(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// The primary ray through the center of pixel `(i, j)`, `0 <= i < width`, `0 <= j < height`.
    pub fn primary_ray(&self, i: u32, j: u32) -> Ray {
        let x = (2.0 * (f64::from(i) + 0.5) / f64::from(self.width) - 1.0) * self.aspect_ratio * self.scale;
        let y = (1.0 - 2.0 * (f64::from(j) + 0.5) / f64::from(self.height)) * self.scale;
        let direction = self.basis.vector_to_world(Vec3::new(x, y, -1.0));
        Ray::new(self.origin, direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn default_camera_at_origin_looks_down_negative_z() {
        let options = CameraOptions::default();
        let camera = Camera::new(&options);
        let center_ray = camera.primary_ray(camera.width() / 2, camera.height() / 2);
        assert_relative_eq!(center_ray.origin, Vec3::zero(), epsilon = 1e-6);
        assert!(center_ray.direction.z < 0.0);
    }

    #[test]
    fn origin_resolves_to_look_from() {
        let options = CameraOptions {
            look_from: Vec3::new(1.0, 2.0, 3.0),
            look_to: Vec3::new(1.0, 2.0, 2.0),
            ..CameraOptions::default()
        };
        let camera = Camera::new(&options);
        assert_relative_eq!(camera.origin, options.look_from, epsilon = 1e-6);
    }

    #[test]
    fn primary_ray_direction_is_unit_length() {
        let camera = Camera::new(&CameraOptions::default());
        let ray = camera.primary_ray(10, 20);
        assert_relative_eq!(ray.direction.length(), 1.0, epsilon = 1e-8);
    }
}
