use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;

use crate::scenes::SceneName;

/// Log levels selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
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
#[command(name = "lumen")]
#[command(about = "Render a scene with a recursive Monte Carlo ray tracer")]
pub struct Args {
    /// Output file (.ppm for binary P6, .png)
    pub output: PathBuf,

    /// Image width in pixels
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    pub width: u32,

    /// Image height in pixels
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    pub height: u32,

    /// Number of samples per pixel
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    pub samples: u32,

    /// Scene to render
    #[arg(value_enum, default_value_t = SceneName::Nice)]
    pub scene: SceneName,

    /// TOML file with render and lens settings
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the render seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of worker threads
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub threads: Option<u64>,

    /// Abort the render after this many seconds
    #[arg(long)]
    pub timeout: Option<f64>,

    /// Set the logging level
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,
}

/// Initialize the logger with the specified level
pub fn init_logger(level: LevelFilter) {
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positional_arguments() {
        let args = Args::try_parse_from(["lumen", "out.ppm", "320", "200", "16"]).unwrap();
        assert_eq!(args.output, PathBuf::from("out.ppm"));
        assert_eq!((args.width, args.height, args.samples), (320, 200, 16));
        assert_eq!(args.scene, SceneName::Nice);
        assert_eq!(args.log_level, LogLevel::Info);
    }

    #[test]
    fn test_scene_names() {
        for (name, expected) in [
            ("empty", SceneName::Empty),
            ("nice", SceneName::Nice),
            ("random", SceneName::Random),
            ("irregular-grid", SceneName::IrregularGrid),
            ("irreg", SceneName::IrregularGrid),
        ] {
            let args = Args::try_parse_from(["lumen", "o.ppm", "1", "1", "1", name]).unwrap();
            assert_eq!(args.scene, expected);
        }
    }

    #[test]
    fn test_unknown_scene_rejected() {
        assert!(Args::try_parse_from(["lumen", "o.ppm", "10", "10", "1", "teapot"]).is_err());
    }

    #[test]
    fn test_malformed_numbers_rejected() {
        assert!(Args::try_parse_from(["lumen", "o.ppm", "ten", "10", "1"]).is_err());
        assert!(Args::try_parse_from(["lumen", "o.ppm", "0", "10", "1"]).is_err());
        assert!(Args::try_parse_from(["lumen", "o.ppm", "10", "10", "0"]).is_err());
        assert!(Args::try_parse_from(["lumen", "o.ppm", "10", "10"]).is_err());
        assert!(Args::try_parse_from(["lumen", "o.ppm", "10", "10", "1", "nice", "extra"]).is_err());
    }

    #[test]
    fn test_optional_flags() {
        let args = Args::try_parse_from([
            "lumen", "o.png", "8", "8", "2", "random", "--seed", "7", "--threads", "2",
            "--timeout", "1.5", "--log-level", "debug",
        ])
        .unwrap();
        assert_eq!(args.seed, Some(7));
        assert_eq!(args.threads, Some(2));
        assert_eq!(args.timeout, Some(1.5));
        assert_eq!(LevelFilter::from(args.log_level), LevelFilter::Debug);
    }
}
