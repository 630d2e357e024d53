//! Optional TOML settings file.

use std::path::Path;
use std::time::Duration;

use anyhow::{ensure, Context, Result};
use lumen_renderer::{CameraSettings, RenderConfig};
use serde::Deserialize;

/// Values read from `--config`. Anything left out keeps its default.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub max_depth: Option<u32>,
    pub seed: Option<u64>,
    pub bucket_size: Option<u32>,
    pub threads: Option<usize>,
    /// Seconds before the render is abandoned
    pub timeout: Option<f64>,
    pub camera: LensSettings,
}

/// Lens overrides, under `[camera]`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LensSettings {
    /// Vertical field of view in degrees
    pub fov: Option<f64>,
    pub aperture: Option<f64>,
    pub focus_dist: Option<f64>,
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("Invalid settings file {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Apply render overrides.
    pub fn apply_render(&self, mut config: RenderConfig) -> RenderConfig {
        if let Some(max_depth) = self.max_depth {
            config.max_depth = max_depth;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(bucket_size) = self.bucket_size {
            config.bucket_size = bucket_size;
        }
        if let Some(threads) = self.threads {
            config.threads = Some(threads);
        }
        config
    }

    /// Apply lens overrides, rejecting values that give a degenerate camera.
    pub fn apply_camera(&self, settings: CameraSettings) -> Result<CameraSettings> {
        let lens = &self.camera;
        let fov = lens.fov.unwrap_or(settings.vfov);
        let aperture = lens.aperture.unwrap_or(settings.aperture);
        let focus_dist = lens.focus_dist.unwrap_or(settings.focus_dist);

        ensure!(fov > 0.0 && fov < 180.0, "Camera fov must lie in (0, 180) degrees, got {fov}");
        ensure!(
            aperture >= 0.0 && aperture.is_finite(),
            "Camera aperture must be non-negative, got {aperture}"
        );
        ensure!(
            focus_dist > 0.0 && focus_dist.is_finite(),
            "Camera focus_dist must be positive, got {focus_dist}"
        );
        Ok(settings.with_lens(fov, aperture, focus_dist))
    }

    pub fn timeout(&self) -> Result<Option<Duration>> {
        self.timeout
            .map(|secs| Duration::try_from_secs_f64(secs).context("Invalid timeout in settings"))
            .transpose()
    }
}
