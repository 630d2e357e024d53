use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use lumen_renderer::{render_with_control, CameraSettings, RenderConfig, RenderControl, Vec3};

mod cli;
mod output;
mod scenes;
mod settings;

use cli::{init_logger, Args};
use settings::Settings;

fn main() -> Result<()> {
    // Usage errors exit here, before anything is rendered or written
    let args = Args::parse();
    init_logger(args.log_level.into());

    let settings = match &args.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };

    let mut config =
        settings.apply_render(RenderConfig::new(args.width, args.height, args.samples));
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(threads) = args.threads {
        config.threads = Some(usize::try_from(threads).context("Thread count out of range")?);
    }
    config.validate()?;

    let start = Instant::now();
    let setup = scenes::build(args.scene, args.seed.or(settings.seed))
        .with_context(|| format!("Failed to build scene {:?}", args.scene))?;
    log::info!(
        "Built {:?} scene with {} primitives in {:?}",
        args.scene,
        setup.scene.len(),
        start.elapsed()
    );
    setup.scene.describe();

    let camera = settings
        .apply_camera(CameraSettings::new())?
        .with_position(setup.look_from, setup.look_at, Vec3::Y)
        .with_resolution(args.width, args.height)
        .build();

    let mut control = RenderControl::new();
    let timeout = match args.timeout {
        Some(secs) => Some(Duration::try_from_secs_f64(secs).context("Invalid --timeout")?),
        None => settings.timeout()?,
    };
    if let Some(timeout) = timeout {
        control = control.with_timeout(timeout);
    }

    let image = render_with_control(&camera, &setup.scene, &config, &control)?;

    output::save_image(&args.output, &image)?;
    log::info!("Saved to {}", args.output.display());

    Ok(())
}
