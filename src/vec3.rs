use std::ops;

/// Tolerance used for float-equality, zero-length guards, and self-intersection offsets.
pub const EPS: f64 = 1e-8;

/// A 3D vector/color/point, depending on context. Value type: every operation returns a new
/// `Vec3` rather than mutating in place, so sharing one across recursive trace calls never
/// aliases state.
#[derive(Debug, Clone, Copy)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub fn new(x: f64, y: f64, z: f64) -> Vec3 {
        Vec3 { x, y, z }
    }

    /// Same value in all three channels, e.g. a grey background or ambient term.
    pub fn splat(v: f64) -> Vec3 {
        Vec3 { x: v, y: v, z: v }
    }

    pub fn zero() -> Vec3 {
        Vec3::splat(0.0)
    }

    pub fn dot(self, other: Vec3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    /// Component-wise (Hadamard) product, used to modulate a color by a light intensity.
    pub fn hadamard(self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.x * other.x,
            y: self.y * other.y,
            z: self.z * other.z,
        }
    }

    pub fn length(self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Returns a new unit-length vector. Undefined (divides by ~0) for a zero-length vector;
    /// callers must avoid calling this on one.
    pub fn normalize(self) -> Vec3 {
        self / self.length()
    }

    pub fn min_scalar(self, max_val: f64) -> Vec3 {
        Vec3 {
            x: self.x.min(max_val),
            y: self.y.min(max_val),
            z: self.z.min(max_val),
        }
    }

    pub fn max_component(self) -> f64 {
        self.x.max(self.y).max(self.z)
    }
}

macro_rules! vec3_op_vec {
    ($($path:ident)::+, $fn:ident) => {
        impl $($path)::+ for Vec3 {
            type Output = Vec3;
            fn $fn(self, other: Vec3) -> Self::Output {
                Vec3 {
                    x: self.x.$fn(other.x),
                    y: self.y.$fn(other.y),
                    z: self.z.$fn(other.z),
                }
            }
        }
    };
}

vec3_op_vec!(ops::Add, add);
vec3_op_vec!(ops::Sub, sub);

impl ops::AddAssign for Vec3 {
    fn add_assign(&mut self, other: Vec3) {
        *self = *self + other;
    }
}

impl ops::Neg for Vec3 {
    type Output = Vec3;
    fn neg(self) -> Vec3 {
        Vec3 {
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }
}

macro_rules! vec3_op_num {
    ($($path:ident)::+, $fn:ident) => {
        impl $($path)::+<f64> for Vec3 {
            type Output = Vec3;
            fn $fn(self, other: f64) -> Self::Output {
                Vec3 {
                    x: self.x.$fn(other),
                    y: self.y.$fn(other),
                    z: self.z.$fn(other),
                }
            }
        }
        impl $($path)::+<Vec3> for f64 {
            type Output = Vec3;
            fn $fn(self, other: Vec3) -> Self::Output {
                Vec3 {
                    x: other.x.$fn(self),
                    y: other.y.$fn(self),
                    z: other.z.$fn(self),
                }
            }
        }
    };
}

vec3_op_num!(ops::Mul, mul);
vec3_op_num!(ops::Div, div);

impl PartialEq for Vec3 {
    fn eq(&self, other: &Vec3) -> bool {
        (self.x - other.x).abs() < EPS
            && (self.y - other.y).abs() < EPS
            && (self.z - other.z).abs() < EPS
    }
}

impl approx::AbsDiffEq for Vec3 {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        EPS
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        f64::abs_diff_eq(&self.x, &other.x, epsilon)
            && f64::abs_diff_eq(&self.y, &other.y, epsilon)
            && f64::abs_diff_eq(&self.z, &other.z, epsilon)
    }
}

impl approx::RelativeEq for Vec3 {
    fn default_max_relative() -> f64 {
        EPS
    }

    fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
        f64::relative_eq(&self.x, &other.x, epsilon, max_relative)
            && f64::relative_eq(&self.y, &other.y, epsilon, max_relative)
            && f64::relative_eq(&self.z, &other.z, epsilon, max_relative)
    }
}
