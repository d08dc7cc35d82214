use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use glint_renderer::{Color, RenderConfig, DEFAULT_BIAS, MAX_TRACE_DEPTH};
use log::LevelFilter;

/// Log levels selectable from the command line
#[derive(Debug, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "glint")]
#[command(about = "Render a JSON scene of spheres and planes with a local illumination ray caster")]
pub struct Args {
    /// Scene file (JSON)
    pub scene: PathBuf,

    /// Output PNG path
    #[arg(short, long, default_value = "render.png")]
    pub output: PathBuf,

    /// Image width in pixels
    #[arg(long, default_value_t = 800)]
    pub width: u32,

    /// Image height in pixels
    #[arg(long, default_value_t = 600)]
    pub height: u32,

    /// Disable the ambient term
    #[arg(long)]
    pub no_ambient: bool,

    /// Disable the diffuse term
    #[arg(long)]
    pub no_diffuse: bool,

    /// Disable the specular term
    #[arg(long)]
    pub no_specular: bool,

    /// Disable mirror reflection
    #[arg(long)]
    pub no_reflection: bool,

    /// Maximum trace depth (0 = primary rays only)
    #[arg(
        long,
        default_value_t = 1,
        value_parser = clap::value_parser!(u32).range(0..=MAX_TRACE_DEPTH as i64)
    )]
    pub max_depth: u32,

    /// Background color as R,G,B in 0-255
    #[arg(long, value_parser = parse_rgb, default_value = "190,210,215")]
    pub background: Color,

    /// Self-intersection bias in scene units
    #[arg(long, default_value_t = DEFAULT_BIAS)]
    pub bias: f32,

    /// Logging level (RUST_LOG is used when not given)
    #[arg(long)]
    pub log_level: Option<LogLevel>,
}

impl Args {
    /// Build the render configuration selected by the flags.
    pub fn render_config(&self) -> RenderConfig {
        RenderConfig::default()
            .with_ambient(!self.no_ambient)
            .with_diffuse(!self.no_diffuse)
            .with_specular(!self.no_specular)
            .with_reflection(!self.no_reflection)
            .with_max_depth(self.max_depth)
            .with_background(self.background)
            .with_bias(self.bias)
    }
}

/// Parse an "R,G,B" triple with channels in 0-255.
fn parse_rgb(text: &str) -> Result<Color, String> {
    let channels = text
        .split(',')
        .map(|part| part.trim().parse::<f32>().map_err(|e| format!("{}: {}", part, e)))
        .collect::<Result<Vec<_>, _>>()?;

    match channels.as_slice() {
        [r, g, b] if channels.iter().all(|c| (0.0..=255.0).contains(c)) => Ok(Color::new(*r, *g, *b)),
        [_, _, _] => Err("channels must be between 0 and 255".to_string()),
        _ => Err(format!("expected R,G,B but got {} values", channels.len())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_render_config() {
        let args = Args::parse_from(["glint", "scene.json"]);
        assert_eq!(args.render_config(), RenderConfig::default());
        assert_eq!(args.output, PathBuf::from("render.png"));
    }

    #[test]
    fn test_toggles_and_background() {
        let args = Args::parse_from([
            "glint",
            "scene.json",
            "--no-ambient",
            "--no-specular",
            "--max-depth",
            "3",
            "--background",
            "0,0,0",
        ]);
        let config = args.render_config();

        assert!(!config.ambient);
        assert!(config.diffuse);
        assert!(!config.specular);
        assert!(config.reflection);
        assert_eq!(config.max_depth, 3);
        assert_eq!(config.background, Color::ZERO);
    }

    #[test]
    fn test_max_depth_is_bounded() {
        let args = Args::parse_from(["glint", "scene.json", "--max-depth", "64"]);
        assert_eq!(args.render_config().max_depth, MAX_TRACE_DEPTH);

        let result = Args::try_parse_from(["glint", "scene.json", "--max-depth", "1000000"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_rgb() {
        assert_eq!(parse_rgb("10, 20,30"), Ok(Color::new(10.0, 20.0, 30.0)));
        assert!(parse_rgb("10,20").is_err());
        assert!(parse_rgb("10,20,300").is_err());
        assert!(parse_rgb("a,b,c").is_err());
    }
}
