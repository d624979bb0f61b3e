//! Loads scenes and cameras from `.ini` files. This is glue for the CLI front-end
//! (`src/bin/raytracer.rs`), not part of the library's tested rendering core: the core only
//! ever sees `Scene`/`CameraOptions` built programmatically.

use std::path::Path;

use anyhow::{anyhow, Context, Error, Result};
use configparser::ini::Ini;

use crate::camera::CameraOptions;
use crate::geometry::Object;
use crate::light::PointLight;
use crate::material::Material;
use crate::scene::Scene;
use crate::vec3::Vec3;

pub fn load_scene<P: AsRef<Path>>(path: P) -> Result<Scene> {
    let mut config = Ini::new();
    config.set_comment_symbols(&[';', '#']);
    config.load(&path).map_err(Error::msg)?;

    let mut scene = Scene::new();

    for section in sections_with_prefix(&config, "sphere") {
        let center = get_vec3(&config, &section, "center")?;
        let radius = get_float(&config, &section, "radius")?;
        let material = get_material(&config, &section)?;
        scene.add_object(
            Object::sphere(center, radius, material)
                .with_context(|| format!("in section '{}'", section))?,
        );
    }

    for section in sections_with_prefix(&config, "triangle") {
        let v0 = get_vec3(&config, &section, "v0")?;
        let v1 = get_vec3(&config, &section, "v1")?;
        let v2 = get_vec3(&config, &section, "v2")?;
        let material = get_material(&config, &section)?;
        scene.add_object(Object::triangle([v0, v1, v2], material));
    }

    for section in sections_with_prefix(&config, "light") {
        let origin = get_vec3(&config, &section, "origin")?;
        let intensity = get_vec3_default(&config, &section, "intensity", Vec3::splat(1.0))?;
        scene.add_light(PointLight::new(origin, intensity));
    }

    Ok(scene)
}

pub fn load_camera<P: AsRef<Path>>(path: P) -> Result<CameraOptions> {
    let mut config = Ini::new();
    config.load(&path).map_err(Error::msg)?;

    let defaults = CameraOptions::default();
    Ok(CameraOptions {
        screen_width: get_float_default(&config, "camera", "screen_width", f64::from(defaults.screen_width))? as u32,
        screen_height: get_float_default(&config, "camera", "screen_height", f64::from(defaults.screen_height))? as u32,
        fov: get_float_default(&config, "camera", "fov", defaults.fov)?,
        look_from: get_vec3_default(&config, "camera", "look_from", defaults.look_from)?,
        look_to: get_vec3_default(&config, "camera", "look_to", defaults.look_to)?,
    })
}

fn sections_with_prefix(config: &Ini, prefix: &str) -> Vec<String> {
    config
        .sections()
        .into_iter()
        .filter(|section| section == prefix || section.starts_with(&format!("{prefix}.")))
        .collect()
}

fn get_material(config: &Ini, section: &str) -> Result<Material> {
    let defaults = Material::default();
    Ok(Material::builder()
        .ambient(get_vec3_default(config, section, "ambient", defaults.ambient)?)
        .diffuse(get_vec3_default(config, section, "diffuse", defaults.diffuse)?)
        .specular(get_vec3_default(config, section, "specular", defaults.specular)?)
        .specular_exponent(get_float_default(
            config,
            section,
            "specular_exponent",
            defaults.specular_exponent,
        )?)
        .refraction_index(get_float_default(
            config,
            section,
            "refraction_index",
            defaults.refraction_index,
        )?)
        .albedo(get_vec3_default(config, section, "albedo", defaults.albedo)?)
        .build())
}

fn get_float(config: &Ini, section: &str, key: &str) -> Result<f64> {
    config
        .getfloat(section, key)
        .map_err(|s| anyhow!(s))?
        .ok_or_else(|| anyhow!("missing attribute '{}' in section '{}'", key, section))
}

fn get_float_default(config: &Ini, section: &str, key: &str, default: f64) -> Result<f64> {
    Ok(config.getfloat(section, key).map_err(|s| anyhow!(s))?.unwrap_or(default))
}

fn get_vec3(config: &Ini, section: &str, key: &str) -> Result<Vec3> {
    let raw = config
        .get(section, key)
        .ok_or_else(|| anyhow!("missing vector attribute '{}' in section '{}'", key, section))?;
    parse_vec3(&raw).with_context(|| format!("in vector attribute '{}' of section '{}'", key, section))
}

fn get_vec3_default(config: &Ini, section: &str, key: &str, default: Vec3) -> Result<Vec3> {
    match config.get(section, key) {
        Some(raw) => {
            parse_vec3(&raw).with_context(|| format!("in vector attribute '{}' of section '{}'", key, section))
        }
        None => Ok(default),
    }
}

/// Parses `x, y, z`, optionally wrapped in `[...]` or `(...)`.
fn parse_vec3(raw: &str) -> Result<Vec3> {
    let trimmed = raw.trim();
    let inner = match trimmed.chars().next() {
        Some('[') => trimmed
            .strip_prefix('[')
            .and_then(|s| s.strip_suffix(']'))
            .ok_or_else(|| anyhow!("unterminated '[' delimiter"))?,
        Some('(') => trimmed
            .strip_prefix('(')
            .and_then(|s| s.strip_suffix(')'))
            .ok_or_else(|| anyhow!("unterminated '(' delimiter"))?,
        _ => trimmed,
    };

    let components: Vec<f64> = inner
        .split(',')
        .map(|part| part.trim().parse::<f64>().map_err(Error::msg))
        .collect::<Result<_>>()
        .context("vector components must be floating point numbers")?;

    match components.as_slice() {
        [x, y, z] => Ok(Vec3::new(*x, *y, *z)),
        other => Err(anyhow!(
            "vector must have exactly 3 components, got {}",
            other.len()
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bracketed_vector() {
        assert_eq!(parse_vec3("[1, 2, 3]").unwrap(), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn parses_bare_comma_separated_vector() {
        assert_eq!(parse_vec3("1, 2, 3").unwrap(), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn rejects_wrong_component_count() {
        assert!(parse_vec3("1, 2").is_err());
    }
}
