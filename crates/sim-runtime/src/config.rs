//! Runtime tunables. Every field has a default so partial YAML files work.

use serde::{Deserialize, Serialize};
use sim_econ::VisitorRemainder;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Play area shared by every moving entity.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
    /// Margin on the left, right and bottom edges.
    pub padding: f64,
    /// Margin on the top edge, leaving room for UI.
    pub top_padding: f64,
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            padding: 10.0,
            top_padding: 30.0,
        }
    }
}

impl Bounds {
    /// Allowed top-left positions `(min_x, max_x, min_y, max_y)` for a sprite of `size`.
    pub fn limits(&self, size: f64) -> (f64, f64, f64, f64) {
        let min_x = self.padding;
        let min_y = self.top_padding;
        let max_x = (self.width - size - self.padding).max(min_x);
        let max_y = (self.height - size - self.padding).max(min_y);
        (min_x, max_x, min_y, max_y)
    }

    /// Gate leaving visitors walk to: bottom centre.
    pub fn exit_point(&self) -> (f64, f64) {
        (self.width / 2.0, self.height - self.padding)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    pub generator_speed: f64,
    pub visitor_speed: f64,
    pub exit_speed: f64,
    /// Probability per second that a generator turns 90 degrees.
    pub turn_chance_per_sec: f64,
    pub generator_size: f64,
    pub visitor_size: f64,
    pub visitor_lifetime_min_secs: f64,
    pub visitor_lifetime_max_secs: f64,
    /// Remaining lifetime below which a visitor heads for the exit.
    pub leaving_threshold_secs: f64,
    pub exit_radius: f64,
    pub max_visible_per_type: usize,
    pub max_visible_visitors: usize,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            generator_speed: 10.0,
            visitor_speed: 20.0,
            exit_speed: 20.0,
            turn_chance_per_sec: 0.5,
            generator_size: 48.0,
            visitor_size: 24.0,
            visitor_lifetime_min_secs: 8.0,
            visitor_lifetime_max_secs: 20.0,
            leaving_threshold_secs: 2.0,
            exit_radius: 8.0,
            max_visible_per_type: 25,
            max_visible_visitors: 30,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub tick_interval_ms: u64,
    /// Upper bound on a single animation frame's delta time.
    pub max_frame_dt_secs: f64,
    pub autosave_interval_secs: u64,
    pub max_offline_secs: u64,
    pub visitor_remainder: VisitorRemainder,
    pub rng_seed: u64,
    pub bounds: Bounds,
    pub movement: MovementConfig,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 1000,
            max_frame_dt_secs: 0.1,
            autosave_interval_secs: 5,
            max_offline_secs: persistence::MAX_OFFLINE_SECS,
            visitor_remainder: VisitorRemainder::default(),
            rng_seed: 42,
            bounds: Bounds::default(),
            movement: MovementConfig::default(),
        }
    }
}

impl RuntimeConfig {
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    /// Tick cadence in seconds.
    pub fn tick_seconds(&self) -> f64 {
        self.tick_interval_ms as f64 / 1000.0
    }
}
