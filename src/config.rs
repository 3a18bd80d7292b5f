//! Viewer configuration: defaults, optional JSON file, command-line overrides.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::camera::CameraParameters;
use crate::cli::Cli;
use crate::core::{BACKGROUND, DEFAULT_TICK_INTERVAL};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub window_width: u32,
    pub window_height: u32,
    pub tick_interval_ms: u64,
    pub background: [f32; 4],
    pub show_ui: bool,
    pub camera: CameraParameters,
    /// Figure kinds appended at startup, in order.
    pub figures: Vec<String>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            window_width: 800,
            window_height: 600,
            tick_interval_ms: DEFAULT_TICK_INTERVAL.as_millis() as u64,
            background: BACKGROUND,
            show_ui: true,
            camera: CameraParameters::default(),
            figures: Vec::new(),
        }
    }
}

impl ViewerConfig {
    /// Defaults, then the file named by `--config`, then command-line flags.
    pub fn load(cli: &Cli) -> Result<Self> {
        let base = match &cli.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        Ok(base.with_overrides(cli))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {:?}", path))?;
        Self::from_json(&text).with_context(|| format!("invalid config file {:?}", path))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        anyhow::ensure!(config.tick_interval_ms > 0, "tick_interval_ms must be positive");
        Ok(config)
    }

    pub fn with_overrides(mut self, cli: &Cli) -> Self {
        if cli.no_ui {
            self.show_ui = false;
        }
        if let Some(ms) = cli.tick_ms {
            self.tick_interval_ms = ms.max(1);
        }
        if let Some(width) = cli.width {
            self.window_width = width;
        }
        if let Some(height) = cli.height {
            self.window_height = height;
        }
        if !cli.figures.is_empty() {
            self.figures = cli.figures.clone();
        }
        self
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ViewerConfig::default();
        assert_eq!(config.tick_interval(), Duration::from_millis(15));
        assert_eq!(config.background, [0.2, 0.227, 0.271, 1.0]);
        assert!(config.show_ui);
        assert!(config.figures.is_empty());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = ViewerConfig::from_json(
            r#"{ "figures": ["cube", "cone"], "camera": { "fov_y": 60.0 } }"#,
        )
        .unwrap();

        assert_eq!(config.figures, vec!["cube", "cone"]);
        assert_eq!(config.camera.fov_y, 60.0);
        assert_eq!(config.camera.far, 30.0);
        assert_eq!(config.window_width, 800);
    }

    #[test]
    fn test_zero_tick_interval_rejected() {
        assert!(ViewerConfig::from_json(r#"{ "tick_interval_ms": 0 }"#).is_err());
    }

    #[test]
    fn test_cli_overrides_file_values() {
        let cli = Cli {
            no_ui: true,
            tick_ms: Some(30),
            figures: vec!["pyramid".to_string()],
            ..Default::default()
        };
        let config = ViewerConfig {
            figures: vec!["cube".to_string()],
            ..Default::default()
        }
        .with_overrides(&cli);

        assert!(!config.show_ui);
        assert_eq!(config.tick_interval_ms, 30);
        assert_eq!(config.figures, vec!["pyramid"]);
    }

    #[test]
    fn test_missing_file_is_reported() {
        let err = ViewerConfig::from_file("/nonexistent/viewer.json").unwrap_err();
        assert!(err.to_string().contains("failed to read config file"));
    }

    #[test]
    fn test_round_trips_through_file() {
        let path = std::env::temp_dir().join(format!("scene-viewer-{}.json", std::process::id()));
        let config = ViewerConfig {
            tick_interval_ms: 20,
            figures: vec!["cone".to_string()],
            ..Default::default()
        };
        std::fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();

        let loaded = ViewerConfig::from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded, config);
    }
}
