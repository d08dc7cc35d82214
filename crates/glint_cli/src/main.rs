mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use glint_renderer::{render_with_progress, ImageBuffer};
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::time::Instant;

use cli::Args;

fn init_logger(args: &Args) {
    let mut builder = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if let Some(level) = &args.log_level {
        builder.filter_level(level.clone().into());
    }
    builder.init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(&args);

    let scene = glint_core::load_scene(&args.scene)
        .with_context(|| format!("Failed to load scene {}", args.scene.display()))?;

    let config = args.render_config();
    log::debug!("Render config: {:?}", config);

    let start = Instant::now();
    let mut image = ImageBuffer::new(args.width, args.height);
    let cancel = AtomicBool::new(false);
    let rows_done = AtomicU32::new(0);
    let step = (args.height / 10).max(1);
    render_with_progress(&scene, &config, &mut image, &cancel, |_| {
        let done = rows_done.fetch_add(1, Ordering::Relaxed) + 1;
        if done % step == 0 {
            log::debug!("{}/{} rows", done, args.height);
        }
    })
    .context("Render failed")?;

    image
        .save_png(&args.output)
        .with_context(|| format!("Failed to save {}", args.output.display()))?;

    log::info!("Done in {:?}", start.elapsed());
    Ok(())
}
