use crate::vec3::Vec3;

/// A point light source. `intensity` is a per-channel color weight, not a scalar.
#[derive(Debug, Clone, Copy)]
pub struct PointLight {
    pub origin: Vec3,
    pub intensity: Vec3,
}

impl PointLight {
    pub fn new(origin: Vec3, intensity: Vec3) -> PointLight {
        PointLight { origin, intensity }
    }
}
