//! Glint Core - Scene description and loading.
//!
//! This crate provides:
//!
//! - **Scene types**: `Scene`, `Camera`, `Light`, `Primitive`, `Shape`, `Material`
//! - **Scene loading**: JSON scene file parsing and validation
//!
//! # Example
//!
//! ```ignore
//! use glint_core::load_scene;
//!
//! let scene = load_scene("scenes/spheres.json")?;
//! println!("Loaded {} primitives, {} lights",
//!     scene.primitives.len(),
//!     scene.lights.len());
//! ```

pub mod loader;
pub mod scene;

// Re-export commonly used types
pub use loader::{load_scene, load_scene_from_str, ParseError, ParseResult};
pub use scene::{Camera, Color, Light, Material, Primitive, Scene, Shape};
