//! Scene types for Glint.
//!
//! A scene is an ordered list of primitives, an ordered list of point lights
//! and a single camera. It is built once (usually by the loader) and is
//! read-only for the duration of a render.

use glint_math::Vec3;

/// RGB color with channels in the 0-255 range.
pub type Color = Vec3;

/// Surface material shared by every primitive kind.
///
/// Coefficients follow a Blinn-Phong style local illumination model. All of
/// them default to zero, which renders the surface black.
#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    /// Base color (RGB, 0-255)
    pub color: Color,

    /// Weight of the constant ambient term
    pub ambient_k: f32,

    /// Weight of the Lambertian diffuse term
    pub diffuse_k: f32,

    /// Weight of the specular highlight (untinted, always white)
    pub specular_k: f32,

    /// Shininess exponent of the specular highlight
    pub specular_exponent: f32,

    /// Fraction of a mirror-reflected ray's color added on top (0-1)
    pub reflectivity: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: Color::ZERO,
            ambient_k: 0.0,
            diffuse_k: 0.0,
            specular_k: 0.0,
            specular_exponent: 0.0,
            reflectivity: 0.0,
        }
    }
}

impl Material {
    /// Create a material with just a base color.
    pub fn new(color: Color) -> Self {
        Self {
            color,
            ..Default::default()
        }
    }

    /// Set the ambient, diffuse and specular weights.
    pub fn with_coefficients(mut self, ambient_k: f32, diffuse_k: f32, specular_k: f32) -> Self {
        self.ambient_k = ambient_k;
        self.diffuse_k = diffuse_k;
        self.specular_k = specular_k;
        self
    }

    /// Set the specular shininess exponent.
    pub fn with_specular_exponent(mut self, exponent: f32) -> Self {
        self.specular_exponent = exponent;
        self
    }

    /// Set the mirror reflectivity.
    pub fn with_reflectivity(mut self, reflectivity: f32) -> Self {
        self.reflectivity = reflectivity;
        self
    }
}

/// Geometric shape of a primitive.
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    Sphere {
        center: Vec3,
        radius: f32,
    },
    /// Infinite plane through `point`. The normal is kept unit length and
    /// is the same on both sides.
    Plane {
        point: Vec3,
        normal: Vec3,
    },
}

/// A renderable shape paired with its material.
#[derive(Clone, Debug, PartialEq)]
pub struct Primitive {
    pub shape: Shape,
    pub material: Material,
}

impl Primitive {
    /// Create a sphere primitive.
    pub fn sphere(center: Vec3, radius: f32, material: Material) -> Self {
        Self {
            shape: Shape::Sphere { center, radius },
            material,
        }
    }

    /// Create a plane primitive. The normal is normalized here; a zero or
    /// non-finite normal logs a warning and falls back to +Y. Use
    /// [`Primitive::try_plane`] to reject those instead.
    pub fn plane(point: Vec3, normal: Vec3, material: Material) -> Self {
        let normal = normal.try_normalize().unwrap_or_else(|| {
            log::warn!("Plane normal {} cannot be normalized, using +Y", normal);
            Vec3::Y
        });
        Self {
            shape: Shape::Plane { point, normal },
            material,
        }
    }

    /// Create a plane primitive, or `None` if `normal` cannot be normalized.
    pub fn try_plane(point: Vec3, normal: Vec3, material: Material) -> Option<Self> {
        let normal = normal.try_normalize()?;
        Some(Self {
            shape: Shape::Plane { point, normal },
            material,
        })
    }

    /// Short name of the shape kind, for logging.
    pub fn kind(&self) -> &'static str {
        match self.shape {
            Shape::Sphere { .. } => "sphere",
            Shape::Plane { .. } => "plane",
        }
    }
}

/// A point light. Lights have no color or falloff; each one either reaches
/// a surface point or is blocked.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Light {
    pub position: Vec3,
}

impl Light {
    pub fn new(position: Vec3) -> Self {
        Self { position }
    }
}

/// Pinhole camera description.
///
/// Image dimensions are not part of the scene; they come from the output
/// buffer at render time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    /// Eye position
    pub position: Vec3,

    /// Look-at point (not a direction vector)
    pub target: Vec3,

    /// Horizontal field of view in degrees
    pub fov: f32,
}

impl Camera {
    pub fn new(position: Vec3, target: Vec3, fov: f32) -> Self {
        Self {
            position,
            target,
            fov,
        }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 5.0),
            target: Vec3::ZERO,
            fov: 60.0,
        }
    }
}

/// A complete scene ready for rendering.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    /// Primitives in file order (nearest-hit ties resolve to the earlier one)
    pub primitives: Vec<Primitive>,

    /// Point lights in file order
    pub lights: Vec<Light>,

    pub camera: Camera,
}

impl Scene {
    /// Create an empty scene viewed through `camera`.
    pub fn new(camera: Camera) -> Self {
        Self {
            primitives: Vec::new(),
            lights: Vec::new(),
            camera,
        }
    }

    /// Add a primitive.
    pub fn add_primitive(&mut self, primitive: Primitive) {
        self.primitives.push(primitive);
    }

    /// Add a light.
    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    /// Builder form of [`Scene::add_primitive`].
    pub fn with_primitive(mut self, primitive: Primitive) -> Self {
        self.add_primitive(primitive);
        self
    }

    /// Builder form of [`Scene::add_light`].
    pub fn with_light(mut self, light: Light) -> Self {
        self.add_light(light);
        self
    }

    /// Check if the scene has nothing to hit.
    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }
}
