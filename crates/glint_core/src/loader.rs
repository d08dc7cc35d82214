//! JSON scene loading.
//!
//! The file format mirrors the scene model closely:
//!
//! ```json
//! {
//!   "camera": { "position": [0, 0, 5], "direction": [0, 0, 0], "fov": 60 },
//!   "lights": [ { "position": [5, 5, 5] } ],
//!   "objects": [
//!     { "type": "sphere", "center": [0, 0, 0], "radius": 1,
//!       "color": [255, 0, 0], "ambientK": 0.1, "diffuseK": 0.8 },
//!     { "type": "plane", "center": [0, -1, 0], "normal": [0, 1, 0],
//!       "color": [200, 200, 200], "diffuseK": 0.6 }
//!   ]
//! }
//! ```
//!
//! `camera.direction` is a look-at point. Material coefficients that are
//! missing default to zero.

use std::path::Path;

use glint_math::Vec3;
use serde::Deserialize;
use thiserror::Error;

use crate::scene::{Camera, Color, Light, Material, Primitive, Scene};

/// Errors that can occur while loading a scene file.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid camera: {0}")]
    InvalidCamera(String),

    #[error("Invalid object at index {index}: {message}")]
    InvalidObject { index: usize, message: String },

    #[error("Invalid light at index {index}: {message}")]
    InvalidLight { index: usize, message: String },
}

/// Result type for scene loading.
pub type ParseResult<T> = Result<T, ParseError>;

#[derive(Deserialize, Debug)]
struct SceneFile {
    camera: CameraFile,
    #[serde(default)]
    lights: Vec<LightFile>,
    #[serde(default)]
    objects: Vec<ObjectFile>,
}

#[derive(Deserialize, Debug)]
struct CameraFile {
    position: [f32; 3],
    direction: [f32; 3],
    fov: f32,
}

#[derive(Deserialize, Debug)]
struct LightFile {
    position: [f32; 3],
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
enum ObjectKind {
    Sphere,
    Plane,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct ObjectFile {
    #[serde(rename = "type")]
    kind: ObjectKind,
    center: [f32; 3],
    radius: Option<f32>,
    normal: Option<[f32; 3]>,
    color: [f32; 3],
    #[serde(default)]
    ambient_k: f32,
    #[serde(default)]
    diffuse_k: f32,
    #[serde(default)]
    specular_k: f32,
    #[serde(default)]
    specular_exponent: f32,
    #[serde(default)]
    reflectivity: f32,
}

/// Load a scene from a JSON file on disk.
pub fn load_scene<P: AsRef<Path>>(path: P) -> ParseResult<Scene> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let scene = load_scene_from_str(&text)?;

    log::info!(
        "Loaded scene {}: {} primitives, {} lights",
        path.display(),
        scene.primitives.len(),
        scene.lights.len()
    );

    Ok(scene)
}

/// Parse and validate a scene from JSON text.
pub fn load_scene_from_str(text: &str) -> ParseResult<Scene> {
    let file: SceneFile = serde_json::from_str(text)?;

    let mut scene = Scene::new(convert_camera(&file.camera)?);

    for (index, object) in file.objects.iter().enumerate() {
        let primitive = convert_object(index, object)?;
        log::debug!("Object {}: {}", index, primitive.kind());
        scene.add_primitive(primitive);
    }

    for (index, light) in file.lights.iter().enumerate() {
        let position = finite_vec("position", light.position)
            .map_err(|message| ParseError::InvalidLight { index, message })?;
        scene.add_light(Light::new(position));
    }

    if scene.primitives.is_empty() {
        log::warn!("Scene has no objects; every pixel will be background");
    }
    if scene.lights.is_empty() {
        log::warn!("Scene has no lights; only ambient shading will show");
    }

    Ok(scene)
}

/// Numbers past the f32 range deserialize as infinity, so every vector read
/// from the file goes through here.
fn finite_vec(name: &str, value: [f32; 3]) -> Result<Vec3, String> {
    if value.iter().all(|c| c.is_finite()) {
        Ok(Vec3::from_array(value))
    } else {
        Err(format!("{} must be finite, got {:?}", name, value))
    }
}

fn convert_camera(camera: &CameraFile) -> ParseResult<Camera> {
    let position = finite_vec("position", camera.position).map_err(ParseError::InvalidCamera)?;
    let target = finite_vec("direction", camera.direction).map_err(ParseError::InvalidCamera)?;

    if !(camera.fov > 0.0 && camera.fov < 180.0) {
        return Err(ParseError::InvalidCamera(format!(
            "fov must be between 0 and 180 degrees, got {}",
            camera.fov
        )));
    }

    Ok(Camera::new(position, target, camera.fov))
}

fn convert_object(index: usize, object: &ObjectFile) -> ParseResult<Primitive> {
    let invalid = |message: String| ParseError::InvalidObject { index, message };

    let material = convert_material(object).map_err(invalid)?;
    let center = finite_vec("center", object.center).map_err(invalid)?;

    match object.kind {
        ObjectKind::Sphere => {
            let radius = object
                .radius
                .ok_or_else(|| invalid("sphere is missing \"radius\"".to_string()))?;
            if !(radius > 0.0 && radius.is_finite()) {
                return Err(invalid(format!(
                    "sphere radius must be positive and finite, got {}",
                    radius
                )));
            }
            Ok(Primitive::sphere(center, radius, material))
        }
        ObjectKind::Plane => {
            let normal = object
                .normal
                .ok_or_else(|| invalid("plane is missing \"normal\"".to_string()))?;
            let normal = finite_vec("normal", normal).map_err(invalid)?;
            Primitive::try_plane(center, normal, material)
                .ok_or_else(|| invalid("plane normal must be non-zero".to_string()))
        }
    }
}

fn convert_material(object: &ObjectFile) -> Result<Material, String> {
    if let Some(channel) = object.color.iter().find(|c| !(0.0..=255.0).contains(*c)) {
        return Err(format!("color channel {} is outside 0-255", channel));
    }

    let coefficients = [
        ("ambientK", object.ambient_k),
        ("diffuseK", object.diffuse_k),
        ("specularK", object.specular_k),
        ("specularExponent", object.specular_exponent),
    ];
    for (name, value) in coefficients {
        if !(value >= 0.0 && value.is_finite()) {
            return Err(format!("{} must be non-negative and finite, got {}", name, value));
        }
    }

    if !(0.0..=1.0).contains(&object.reflectivity) {
        return Err(format!(
            "reflectivity must be between 0 and 1, got {}",
            object.reflectivity
        ));
    }

    Ok(Material {
        color: Color::from_array(object.color),
        ambient_k: object.ambient_k,
        diffuse_k: object.diffuse_k,
        specular_k: object.specular_k,
        specular_exponent: object.specular_exponent,
        reflectivity: object.reflectivity,
    })
}
