use crate::core::Color;
use glam::Vec3;

/// Lights supported by the Phong model.
#[derive(Clone, Debug)]
pub enum Light {
    /// Constant direction, no attenuation.
    Directional {
        /// Direction pointing *towards* the light.
        direction: Vec3,
        ambient: Color,
        diffuse: Color,
        specular: Color,
    },
    /// Positioned light without distance falloff.
    Point {
        position: Vec3,
        ambient: Color,
        diffuse: Color,
        specular: Color,
    },
}

impl Light {
    /// Warm, strong light parked high above the road.
    pub fn sun() -> Self {
        Light::Directional {
            direction: Vec3::new(20.0, 50.0, 10.0).normalize(),
            ambient: Color::new(0.3, 0.3, 0.35),
            diffuse: Color::new(0.9, 0.85, 0.8),
            specular: Color::new(1.0, 0.95, 0.9),
        }
    }

    /// Weak cool glow emitted by the watch face at `position`.
    pub fn screen_glow(position: Vec3) -> Self {
        Light::Point {
            position,
            ambient: Color::new(0.05, 0.05, 0.1),
            diffuse: Color::new(0.1, 0.15, 0.2),
            specular: Color::new(0.05, 0.05, 0.1),
        }
    }

    fn terms(&self) -> (Color, Color, Color) {
        match self {
            Light::Directional {
                ambient,
                diffuse,
                specular,
                ..
            }
            | Light::Point {
                ambient,
                diffuse,
                specular,
                ..
            } => (*ambient, *diffuse, *specular),
        }
    }

    /// Normalized direction from `frag_pos` towards the light.
    fn to_light(&self, frag_pos: Vec3) -> Vec3 {
        match self {
            Light::Directional { direction, .. } => direction.normalize_or_zero(),
            Light::Point { position, .. } => (*position - frag_pos).normalize_or_zero(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub ambient: Color,
    pub diffuse: Color,
    pub specular: Color,
    pub shininess: f32,
}

impl Material {
    pub const fn new(ambient: Color, diffuse: Color, specular: Color, shininess: f32) -> Self {
        Self {
            ambient,
            diffuse,
            specular,
            shininess,
        }
    }

    pub const GRASS: Material =
        Material::new(Color::splat(0.3), Color::splat(0.8), Color::splat(0.1), 8.0);
    pub const CONCRETE: Material =
        Material::new(Color::splat(0.2), Color::splat(0.7), Color::splat(0.3), 16.0);
    pub const SKIN: Material = Material::new(
        Color::splat(0.3),
        Color::new(0.8, 0.6, 0.5),
        Color::splat(0.2),
        8.0,
    );
    pub const BRUSHED_METAL: Material =
        Material::new(Color::splat(0.1), Color::splat(0.3), Color::splat(0.8), 64.0);
}

impl Default for Material {
    fn default() -> Self {
        Material::GRASS
    }
}

pub trait LightingModel: Sync {
    /// Computes the lit color of a fragment.
    ///
    /// - `frag_pos`: world-space position of the fragment.
    /// - `normal`: normalized surface normal.
    /// - `view_dir`: normalized direction from the fragment to the camera.
    /// - `base`: surface albedo (texture times tint).
    fn shade(
        &self,
        frag_pos: Vec3,
        normal: Vec3,
        view_dir: Vec3,
        lights: &[Light],
        material: &Material,
        base: Color,
    ) -> Color;
}

/// Classic Phong: reflected-vector specular, terms summed over every light.
pub struct PhongShading;

impl LightingModel for PhongShading {
    fn shade(
        &self,
        frag_pos: Vec3,
        normal: Vec3,
        view_dir: Vec3,
        lights: &[Light],
        material: &Material,
        base: Color,
    ) -> Color {
        let mut lit = Color::BLACK;
        let mut highlight = Color::BLACK;

        for light in lights {
            let (ambient, diffuse, specular) = light.terms();
            let light_dir = light.to_light(frag_pos);

            lit = lit + ambient * material.ambient;

            let diff = normal.dot(light_dir).max(0.0);
            lit = lit + diffuse * material.diffuse * diff;

            let reflect_dir = (-light_dir).reflect(normal);
            let spec = view_dir.dot(reflect_dir).max(0.0).powf(material.shininess);
            highlight = highlight + specular * material.specular * spec;
        }

        (lit * base + highlight).clamped()
    }
}
