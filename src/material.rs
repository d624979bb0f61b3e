use crate::vec3::Vec3;

/// Surface shading parameters. `albedo` holds three unconstrained weights (need not sum to 1):
/// `x` gates local ambient/diffuse/specular shading, `y` gates reflection, `z` gates refraction.
#[derive(Debug, Clone, Copy)]
pub struct Material {
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
    pub specular_exponent: f64,
    pub refraction_index: f64,
    pub albedo: Vec3,
}

impl Default for Material {
    fn default() -> Material {
        Material {
            ambient: Vec3::zero(),
            diffuse: Vec3::zero(),
            specular: Vec3::zero(),
            specular_exponent: 0.0,
            refraction_index: 1.0,
            albedo: Vec3::new(1.0, 0.0, 0.0),
        }
    }
}

impl Material {
    pub fn builder() -> MaterialBuilder {
        MaterialBuilder::default()
    }
}

/// All-fields-optional construction, so a scene file only needs to set the properties a
/// material actually departs from the defaults on.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialBuilder {
    material: MaterialOrDefault,
}

#[derive(Debug, Clone, Copy)]
struct MaterialOrDefault(Material);

impl Default for MaterialOrDefault {
    fn default() -> Self {
        MaterialOrDefault(Material::default())
    }
}

impl MaterialBuilder {
    pub fn ambient(mut self, ambient: Vec3) -> Self {
        self.material.0.ambient = ambient;
        self
    }

    pub fn diffuse(mut self, diffuse: Vec3) -> Self {
        self.material.0.diffuse = diffuse;
        self
    }

    pub fn specular(mut self, specular: Vec3) -> Self {
        self.material.0.specular = specular;
        self
    }

    pub fn specular_exponent(mut self, specular_exponent: f64) -> Self {
        self.material.0.specular_exponent = specular_exponent;
        self
    }

    pub fn refraction_index(mut self, refraction_index: f64) -> Self {
        self.material.0.refraction_index = refraction_index;
        self
    }

    pub fn albedo(mut self, albedo: Vec3) -> Self {
        self.material.0.albedo = albedo;
        self
    }

    pub fn build(self) -> Material {
        self.material.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_material_has_vacuum_refraction_index_and_local_only_albedo() {
        let material = Material::default();
        assert_eq!(material.refraction_index, 1.0);
        assert_eq!(material.albedo, Vec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn builder_overrides_only_set_fields() {
        let material = Material::builder()
            .diffuse(Vec3::new(0.5, 0.0, 0.0))
            .build();
        assert_eq!(material.diffuse, Vec3::new(0.5, 0.0, 0.0));
        assert_eq!(material.ambient, Vec3::zero());
    }
}
