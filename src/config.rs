//! Configuration file support for flick.
//!
//! Configuration is loaded from `~/.config/flick/config.toml` with the
//! following precedence:
//! 1. CLI arguments (highest priority)
//! 2. Configuration file
//! 3. Default values (lowest priority)
//!
//! # Example Configuration
//!
//! ```toml
//! # ~/.config/flick/config.toml
//! [scroll]
//! fps = 12.0
//! speed = 1.2
//! step = 2.0
//! quantum = 2.0
//!
//! [shelf]
//! anime = ["虫师", "Ping Pong the Animation"]
//! games = ["Outer Wilds", "Baba Is You"]
//! ```

use serde::Deserialize;
use std::path::PathBuf;

use crate::engine::Tuning;

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Stop-motion scroll tuning
    pub scroll: ScrollConfig,

    /// Titles for the generated shelf document
    pub shelf: ShelfConfig,
}

/// Scroll engine tuning.
///
/// The library defaults are pixel-sized; the row-based terminal viewport
/// wants a much smaller base step, so these defaults replace `base_step`
/// while keeping the rest of the feel.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    /// Accepted frame rate of the animation
    pub fps: f64,

    /// Wheel delta multiplier
    pub speed: f64,

    /// Base unit (rows) for keyboard steps
    pub step: f64,

    /// Row granularity each animation step is quantized to
    pub quantum: f64,

    /// Fraction of the remaining distance covered per frame
    pub damping: f64,

    /// Residual distance below which motion snaps exactly
    pub snap: f64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        let tuning = Tuning::default();
        Self {
            fps: tuning.target_fps,
            speed: tuning.speed_factor,
            step: 2.0,
            quantum: tuning.quantum,
            damping: tuning.damping,
            snap: tuning.snap_threshold,
        }
    }
}

impl ScrollConfig {
    /// Build engine tuning from this configuration.
    pub fn tuning(&self) -> Tuning {
        Tuning {
            target_fps: self.fps,
            speed_factor: self.speed,
            snap_threshold: self.snap,
            damping: self.damping,
            quantum: self.quantum,
            base_step: self.step,
        }
    }
}

/// Titles to look up when generating the shelf document.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ShelfConfig {
    /// Anime keywords for the Bangumi lookup
    pub anime: Vec<String>,

    /// Game keywords for the Steam lookup
    pub games: Vec<String>,
}

impl Config {
    /// Load configuration from the default config file path.
    ///
    /// Returns default configuration if file doesn't exist or can't be parsed.
    pub fn load() -> Self {
        let config_path = Self::config_path();

        if !config_path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(&config_path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("Warning: Failed to parse config file: {}", e);
                    Self::default()
                }
            },
            Err(e) => {
                eprintln!("Warning: Failed to read config file: {}", e);
                Self::default()
            }
        }
    }

    /// Get the default configuration file path.
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("flick")
            .join("config.toml")
    }

    /// Merge with CLI overrides.
    ///
    /// CLI arguments take precedence over config file values.
    pub fn with_overrides(mut self, fps: Option<f64>) -> Self {
        if let Some(fps) = fps {
            self.scroll.fps = fps;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.scroll.fps, 12.0);
        assert_eq!(config.scroll.speed, 1.2);
        assert_eq!(config.scroll.quantum, 2.0);
        assert!(config.shelf.anime.is_empty());
        assert!(config.shelf.games.is_empty());
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
            [scroll]
            fps = 24.0
            step = 4.0

            [shelf]
            anime = ["虫师"]
            games = ["Outer Wilds", "Baba Is You"]
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.scroll.fps, 24.0);
        assert_eq!(config.scroll.step, 4.0);
        // Unspecified fields keep their defaults.
        assert_eq!(config.scroll.speed, 1.2);
        assert_eq!(config.shelf.anime, vec!["虫师"]);
        assert_eq!(config.shelf.games.len(), 2);
    }

    #[test]
    fn test_tuning_mapping() {
        let config = ScrollConfig {
            fps: 24.0,
            speed: 2.0,
            step: 4.0,
            quantum: 1.0,
            damping: 0.5,
            snap: 0.25,
        };
        let tuning = config.tuning();
        assert_eq!(tuning.target_fps, 24.0);
        assert_eq!(tuning.speed_factor, 2.0);
        assert_eq!(tuning.base_step, 4.0);
        assert_eq!(tuning.quantum, 1.0);
        assert_eq!(tuning.damping, 0.5);
        assert_eq!(tuning.snap_threshold, 0.25);
    }

    #[test]
    fn test_cli_overrides() {
        let config = Config::default().with_overrides(Some(6.0));
        assert_eq!(config.scroll.fps, 6.0);

        let config = Config::default().with_overrides(None);
        assert_eq!(config.scroll.fps, 12.0);
    }
}
