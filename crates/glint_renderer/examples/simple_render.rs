//! Simple ray casting example.
//!
//! Renders a built-in scene of spheres on a mirror floor and saves it as PNG.

use glint_renderer::{
    render, Camera, Color, ImageBuffer, Light, Material, Primitive, RenderConfig, Scene, Vec3,
};

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    println!("Glint Ray Caster - Simple Example");
    println!("=================================");

    let scene = build_scene();

    let config = RenderConfig::default().with_max_depth(3);
    let mut image = ImageBuffer::new(800, 450);

    println!("Rendering {}x{}...", image.width, image.height);
    let start = std::time::Instant::now();
    render(&scene, &config, &mut image).expect("Failed to render");
    println!("Rendered in {:?}", start.elapsed());

    let filename = "output.png";
    image.save_png(filename).expect("Failed to save image");
    println!("Saved to {}", filename);
}

fn build_scene() -> Scene {
    let camera = Camera::new(Vec3::new(0.0, 1.5, 7.0), Vec3::new(0.0, 0.5, 0.0), 60.0);

    let mut scene = Scene::new(camera)
        .with_light(Light::new(Vec3::new(-5.0, 6.0, 5.0)))
        .with_light(Light::new(Vec3::new(4.0, 8.0, 2.0)));

    // Floor
    scene.add_primitive(Primitive::plane(
        Vec3::new(0.0, -1.0, 0.0),
        Vec3::Y,
        Material::new(Color::new(180.0, 180.0, 180.0))
            .with_coefficients(0.1, 0.6, 0.0)
            .with_reflectivity(0.3),
    ));

    // Three main spheres
    scene.add_primitive(Primitive::sphere(
        Vec3::new(-2.2, 0.0, 0.0),
        1.0,
        Material::new(Color::new(220.0, 40.0, 40.0))
            .with_coefficients(0.1, 0.7, 0.4)
            .with_specular_exponent(32.0),
    ));
    scene.add_primitive(Primitive::sphere(
        Vec3::new(0.0, 0.0, -1.0),
        1.0,
        Material::new(Color::new(40.0, 200.0, 60.0))
            .with_coefficients(0.1, 0.7, 0.2)
            .with_specular_exponent(8.0),
    ));
    scene.add_primitive(Primitive::sphere(
        Vec3::new(2.2, 0.0, 0.0),
        1.0,
        Material::new(Color::new(50.0, 80.0, 230.0))
            .with_coefficients(0.1, 0.5, 0.8)
            .with_specular_exponent(64.0)
            .with_reflectivity(0.5),
    ));

    println!("Created {} objects", scene.primitives.len());
    scene
}
