use indicatif::ParallelProgressIterator;
use rayon::prelude::*;

use crate::camera::{Camera, CameraOptions};
use crate::geometry::{Intersection, Object};
use crate::image::FloatImage;
use crate::light::PointLight;
use crate::ray::{reflect, refract, Ray};
use crate::vec3::{Vec3, EPS};

/// Render-time options. Rust has no keyword arguments, so this is a builder-friendly struct
/// instead, with `Default` filling in the usual values.
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    pub background: Vec3,
    pub depth: u32,
    pub parallel: bool,
    pub num_workers: Option<usize>,
    pub gamma: f64,
    pub progress: bool,
}

impl Default for RenderOptions {
    fn default() -> RenderOptions {
        RenderOptions {
            background: Vec3::zero(),
            depth: 3,
            parallel: false,
            num_workers: None,
            gamma: 2.2,
            progress: false,
        }
    }
}

/// An ordered collection of objects and point lights. Insertion order is preserved and only
/// matters for closest-hit tie-breaking (first inserted wins ties).
#[derive(Debug, Clone, Default)]
pub struct Scene {
    objects: Vec<Object>,
    lights: Vec<PointLight>,
}

impl Scene {
    pub fn new() -> Scene {
        Scene::default()
    }

    pub fn add_object(&mut self, object: Object) {
        self.objects.push(object);
    }

    pub fn add_light(&mut self, light: PointLight) {
        self.lights.push(light);
    }

    pub fn objects(&self) -> &[Object] {
        &self.objects
    }

    pub fn lights(&self) -> &[PointLight] {
        &self.lights
    }

    /// Linear scan over every object, keeping the strictly-closer hit. Ties (equal distance)
    /// keep whichever object was found first, i.e. whichever was inserted first.
    fn find_closest(&self, ray: &Ray) -> Option<(Intersection, &Object)> {
        let mut best: Option<(Intersection, &Object)> = None;
        for object in &self.objects {
            if let Some(hit) = object.intersect(ray) {
                let replace = match &best {
                    None => true,
                    Some((current, _)) => hit.distance < current.distance,
                };
                if replace {
                    best = Some((hit, object));
                }
            }
        }
        best
    }

    /// `true` iff nothing lies strictly between `point` and a light offset by `light_offset`
    /// (i.e. the shadow ray from `point` toward the light is unoccluded short of the light).
    fn is_point_illuminated(&self, point: Vec3, light_offset: Vec3) -> bool {
        let light_distance = light_offset.length();
        let shadow_ray = Ray::new(point, light_offset);
        !self
            .objects
            .iter()
            .any(|object| matches!(object.intersect(&shadow_ray), Some(hit) if hit.distance < light_distance))
    }

    /// Ambient + per-light diffuse/specular accumulation at a single surface point. Skipped
    /// entirely when `inside` a refractive volume, or when the material's local-shading
    /// albedo weight is (near) zero.
    fn shade(&self, ray: &Ray, hit: &Intersection, object: &Object, inside: bool) -> Vec3 {
        let material = object.material();
        let mut intensity = material.ambient;

        if inside || material.albedo.x <= EPS {
            return intensity;
        }

        let shifted_pos = hit.position + EPS * hit.normal;
        let view_dir = -ray.direction;

        let mut diffuse_total = Vec3::zero();
        let mut specular_total = Vec3::zero();

        for light in &self.lights {
            let light_offset = light.origin - shifted_pos;
            if !self.is_point_illuminated(shifted_pos, light_offset) {
                continue;
            }
            let light_dir = light_offset.normalize();

            diffuse_total += hit.normal.dot(light_dir).max(0.0) * light.intensity;

            let specular_dot = view_dir.dot(reflect(-light_dir, hit.normal));
            specular_total += specular_dot.max(0.0).powf(material.specular_exponent) * light.intensity;
        }

        intensity += material.albedo.x * material.diffuse.hadamard(diffuse_total);
        intensity += material.albedo.x * material.specular.hadamard(specular_total);
        intensity
    }

    /// The Whitted recursion: shade the closest hit, then (depth permitting) branch into a
    /// reflected ray and/or a refracted ray and fold their contributions back in, weighted by
    /// the material's albedo.
    pub fn trace(&self, ray: &Ray, depth: u32, inside: bool) -> Option<Vec3> {
        let (hit, object) = self.find_closest(ray)?;
        let mut intensity = self.shade(ray, &hit, object, inside);

        if depth <= 1 {
            return Some(intensity);
        }

        let material = object.material();

        if !inside && material.albedo.y > EPS {
            let new_dir = reflect(ray.direction, hit.normal);
            let new_origin = hit.position + EPS * hit.normal;
            let new_ray = Ray::new(new_origin, new_dir);
            if let Some(reflected) = self.trace(&new_ray, depth - 1, false) {
                intensity += material.albedo.y * reflected;
            }
        }

        if inside || material.albedo.z > EPS {
            let eta = if inside {
                material.refraction_index
            } else {
                1.0 / material.refraction_index
            };
            if let Some(new_dir) = refract(ray.direction, hit.normal, eta) {
                let new_origin = hit.position - EPS * hit.normal;
                let new_ray = Ray::new(new_origin, new_dir);
                let next_inside = inside ^ object.has_volume();
                if let Some(refracted) = self.trace(&new_ray, depth - 1, next_inside) {
                    let weight = if inside { 1.0 } else { material.albedo.z };
                    intensity += weight * refracted;
                }
            }
        }

        Some(intensity)
    }

    /// Renders the scene through `cam_options`, returning the post-processed, quantized image.
    pub fn render(&self, cam_options: &CameraOptions, options: &RenderOptions) -> FloatImage {
        let camera = Camera::new(cam_options);
        let mut image = FloatImage::new(camera.width(), camera.height());

        let trace_pixel = |i: u32, j: u32| -> (Vec3, bool) {
            let ray = camera.primary_ray(i, j);
            match self.trace(&ray, options.depth, false) {
                Some(color) => (color, false),
                None => (options.background, true),
            }
        };

        if options.parallel {
            // Default worker count is CPU count - 1, never less than one thread.
            let workers = options
                .num_workers
                .unwrap_or_else(|| num_cpus::get().saturating_sub(1).max(1));
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(workers)
                .build()
                .expect("failed to build render thread pool");

            let render_rows = || -> Vec<Vec<(Vec3, bool)>> {
                let row_for = |j: u32| -> Vec<(Vec3, bool)> {
                    (0..camera.width()).map(|i| trace_pixel(i, j)).collect()
                };
                let rows = 0..camera.height();
                match progress_bar(options.progress, camera.height() as u64) {
                    Some(bar) => rows.into_par_iter().progress_with(bar).map(row_for).collect(),
                    None => rows.into_par_iter().map(row_for).collect(),
                }
            };

            let rows = pool.install(render_rows);

            for (j, row) in rows.into_iter().enumerate() {
                image.set_row(j as u32, &row);
            }
        } else {
            let bar = progress_bar(options.progress, camera.height() as u64);
            for j in 0..camera.height() {
                let row: Vec<(Vec3, bool)> = (0..camera.width()).map(|i| trace_pixel(i, j)).collect();
                image.set_row(j, &row);
                if let Some(bar) = &bar {
                    bar.inc(1);
                }
            }
            if let Some(bar) = bar {
                bar.finish_and_clear();
            }
        }

        image.postprocess(options.background, options.gamma);
        image
    }
}

fn progress_bar(enabled: bool, len: u64) -> Option<indicatif::ProgressBar> {
    if !enabled {
        return None;
    }
    let bar = indicatif::ProgressBar::new(len);
    bar.set_style(
        indicatif::ProgressStyle::default_bar()
            .template("{bar:40.cyan/blue} {pos}/{len} rows ({eta})")
            .unwrap_or_else(|_| indicatif::ProgressStyle::default_bar()),
    );
    Some(bar)
}
