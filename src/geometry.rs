use anyhow::{anyhow, Result};

use crate::material::Material;
use crate::ray::Ray;
use crate::vec3::{Vec3, EPS};

/// A ray-object hit. `distance` is the parameter `t` such that `ray.point_at(distance) ==
/// position`, always positive; `normal` is unit length and always faces the incoming ray.
#[derive(Debug, Clone, Copy)]
pub struct Intersection {
    pub position: Vec3,
    pub normal: Vec3,
    pub distance: f64,
}

/// A scene primitive. A tagged sum type rather than a trait object, so the hot `find_closest`
/// scan in `scene.rs` stays inlineable; dynamic dispatch is reserved for cases where the
/// dispatch cost is demonstrably negligible, which isn't true on this per-pixel, per-object
/// hot path).
#[derive(Debug, Clone)]
pub enum Object {
    Sphere {
        center: Vec3,
        radius: f64,
        material: Material,
    },
    Triangle {
        v0: Vec3,
        v1: Vec3,
        v2: Vec3,
        material: Material,
    },
}

impl Object {
    pub fn sphere(center: Vec3, radius: f64, material: Material) -> Result<Object> {
        if radius <= 0.0 {
            return Err(anyhow!(
                "sphere radius must be positive, got {}",
                radius
            ));
        }
        Ok(Object::Sphere {
            center,
            radius,
            material,
        })
    }

    pub fn triangle(vertices: [Vec3; 3], material: Material) -> Object {
        let [v0, v1, v2] = vertices;
        Object::Triangle { v0, v1, v2, material }
    }

    /// Rejects anything but exactly three vertices, mirroring the source's `Triangle(vertices)`
    /// constructor taking an arbitrary sequence.
    pub fn triangle_from_slice(vertices: &[Vec3], material: Material) -> Result<Object> {
        if vertices.len() != 3 {
            return Err(anyhow!(
                "triangle has exactly three vertices, got {}",
                vertices.len()
            ));
        }
        Ok(Object::triangle(
            [vertices[0], vertices[1], vertices[2]],
            material,
        ))
    }

    pub fn material(&self) -> &Material {
        match self {
            Object::Sphere { material, .. } => material,
            Object::Triangle { material, .. } => material,
        }
    }

    pub fn has_volume(&self) -> bool {
        match self {
            Object::Sphere { .. } => true,
            Object::Triangle { .. } => false,
        }
    }

    pub fn intersect(&self, ray: &Ray) -> Option<Intersection> {
        match self {
            Object::Sphere { center, radius, .. } => sphere_intersect(ray, *center, *radius),
            Object::Triangle { v0, v1, v2, .. } => triangle_intersect(ray, *v0, *v1, *v2),
        }
    }
}

/// Solves `a*t^2 + b*t + c = 0`, returning the two roots (possibly equal) in ascending order.
/// `a == 0` degrades to the linear case; `a == 0 && b == 0 && c == 0` has infinitely many
/// solutions, which is a broken-invariant condition for this crate (every `Ray::direction` is
/// unit length, so the sphere solver always calls this with `a == 1`) and panics rather than
/// returning a sentinel the per-ray hot path would have to keep checking for.
fn solve_quadratic(a: f64, b: f64, c: f64) -> Option<(f64, f64)> {
    if a == 0.0 {
        if b == 0.0 {
            if c == 0.0 {
                panic!("degenerate quadratic has infinitely many solutions");
            }
            return None;
        }
        let x = -c / b;
        return Some((x, x));
    }

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }
    let sqrt_d = discriminant.sqrt();
    let (mut x1, mut x2) = ((-b - sqrt_d) / (2.0 * a), (-b + sqrt_d) / (2.0 * a));
    if a < 0.0 {
        std::mem::swap(&mut x1, &mut x2);
    }
    Some((x1, x2))
}

fn sphere_intersect(ray: &Ray, center: Vec3, radius: f64) -> Option<Intersection> {
    let from_center = ray.origin - center;
    let a = ray.direction.dot(ray.direction);
    let b = 2.0 * from_center.dot(ray.direction);
    let c = from_center.dot(from_center) - radius * radius;

    let (t1, t2) = solve_quadratic(a, b, c)?;
    let distance = if t1 > 0.0 { t1 } else { t2 };
    if distance <= 0.0 {
        return None;
    }

    let position = ray.point_at(distance);
    let mut normal = (position - center) / radius;
    if c < 0.0 {
        // ray origin is inside the sphere: flip the normal to face it
        normal = -normal;
    }

    Some(Intersection {
        position,
        normal,
        distance,
    })
}

/// Möller–Trumbore ray-triangle intersection. The returned normal always faces the incoming
/// ray, regardless of the vertices' winding order.
fn triangle_intersect(ray: &Ray, v0: Vec3, v1: Vec3, v2: Vec3) -> Option<Intersection> {
    let edge1 = v1 - v0;
    let edge2 = v2 - v0;
    let h = ray.direction.cross(edge2);
    let det = edge1.dot(h);
    if det.abs() < EPS {
        return None;
    }

    let inv_det = 1.0 / det;
    let s = ray.origin - v0;
    let u = inv_det * s.dot(h);
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = inv_det * ray.direction.dot(q);
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let distance = inv_det * edge2.dot(q);
    if distance < 0.0 {
        return None;
    }

    let position = ray.point_at(distance);
    let mut normal = edge1.cross(edge2);
    if ray.direction.dot(normal) > 0.0 {
        normal = -normal;
    }
    let normal = normal.normalize();

    Some(Intersection {
        position,
        normal,
        distance,
    })
}
