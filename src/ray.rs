use crate::vec3::Vec3;

/// Origin + direction pair. Invariant: `direction` is unit length, enforced at construction so
/// downstream code (shadow tests, sphere/triangle intersection) never has to renormalize it.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Ray {
        Ray {
            origin,
            direction: direction.normalize(),
        }
    }

    pub fn point_at(&self, distance: f64) -> Vec3 {
        self.origin + distance * self.direction
    }
}

/// `d` is the incident direction, `n` the surface normal facing the incoming ray.
pub fn reflect(direction: Vec3, normal: Vec3) -> Vec3 {
    let cos_incidence = -normal.dot(direction);
    direction + 2.0 * cos_incidence * normal
}

/// Refracts `direction` through a surface with normal `normal` and relative index of
/// refraction `eta`. Returns `None` on total internal reflection.
pub fn refract(direction: Vec3, normal: Vec3, eta: f64) -> Option<Vec3> {
    let cos_incidence = -normal.dot(direction);
    let beta = 1.0 - eta * eta * (1.0 - cos_incidence * cos_incidence);
    if beta < 0.0 {
        return None;
    }
    Some(eta * direction + (eta * cos_incidence - beta.sqrt()) * normal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn ray_direction_is_normalized_on_construction() {
        let ray = Ray::new(Vec3::zero(), Vec3::new(3.0, 4.0, 0.0));
        assert_relative_eq!(ray.direction.length(), 1.0, epsilon = 1e-8);
    }

    #[test]
    fn reflecting_twice_returns_original_direction() {
        let normal = Vec3::new(0.0, 1.0, 0.0);
        let incoming = Vec3::new(1.0, -1.0, 0.0).normalize();
        let once = reflect(incoming, normal);
        let twice = reflect(once, normal);
        assert_relative_eq!(twice, incoming, epsilon = 1e-8);
    }

    #[test]
    fn refract_with_unit_eta_passes_straight_through() {
        let normal = Vec3::new(0.0, 1.0, 0.0);
        let incoming = Vec3::new(0.3, -1.0, 0.1).normalize();
        let refracted = refract(incoming, normal, 1.0).unwrap();
        assert_relative_eq!(refracted, incoming, epsilon = 1e-8);
    }

    #[test]
    fn refract_past_critical_angle_into_sparser_medium_is_tir() {
        let normal = Vec3::new(0.0, 1.0, 0.0);
        // grazing incidence, eta < 1 (going from dense -> sparse) should exceed the critical angle
        let incoming = Vec3::new(0.999, -0.04, 0.0).normalize();
        assert!(refract(incoming, normal, 0.5).is_none());
    }

    #[test]
    fn refract_into_denser_medium_never_totally_reflects() {
        let normal = Vec3::new(0.0, 1.0, 0.0);
        let incoming = Vec3::new(0.999, -0.04, 0.0).normalize();
        assert!(refract(incoming, normal, 1.5).is_some());
    }
}
