//! Layered game configuration
//!
//! Config is loaded with three layers of precedence (highest wins):
//! 1. Environment variables: `FROST_MAX_DELTA`, `FROST_NUM_LEVELS`
//! 2. Project-local: `.frost/config.toml`
//! 3. Global: `~/.frost/config.toml`

use frost_core::{FrostError, Result};
use frost_runtime::Viewport;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One layer as written on disk. Every key is optional so a layer only
/// overrides what it names.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameConfigFile {
    #[serde(default)]
    pub max_delta_seconds: Option<f64>,
    #[serde(default)]
    pub viewport: Option<Viewport>,
    #[serde(default)]
    pub present_speed: Option<f32>,
    #[serde(default)]
    pub landing_tolerance: Option<f32>,
    #[serde(default)]
    pub score_per_target: Option<u64>,
    /// `[[seconds, factor], ...]`, checked in order
    #[serde(default)]
    pub score_multipliers: Option<Vec<(f64, u64)>>,
    #[serde(default)]
    pub time_per_level: Option<f64>,
    #[serde(default)]
    pub num_levels: Option<usize>,
    #[serde(default)]
    pub effect_lifetime: Option<f64>,
    #[serde(default)]
    pub holding_suffix: Option<String>,
}

/// Resolved configuration with every layer applied
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// Upper clamp for a single frame delta
    pub max_delta_seconds: f64,
    pub viewport: Viewport,
    /// Present flight speed in world units per second
    pub present_speed: f32,
    /// A present closer than this to its destination has landed
    pub landing_tolerance: f32,
    pub score_per_target: u64,
    pub score_multipliers: Vec<(f64, u64)>,
    /// Countdown seconds granted per level; zero or less disables the countdown
    pub time_per_level: f64,
    /// Level count for the built-in demo source
    pub num_levels: usize,
    /// Lifetime of a landing burst in seconds
    pub effect_lifetime: f64,
    pub holding_suffix: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_delta_seconds: 1.0,
            viewport: Viewport::default(),
            present_speed: 12.0,
            landing_tolerance: 0.01,
            score_per_target: 100,
            score_multipliers: vec![(10.0, 3), (20.0, 2)],
            time_per_level: 60.0,
            num_levels: 3,
            effect_lifetime: 0.5,
            holding_suffix: "_Holding".to_string(),
        }
    }
}

impl GameConfig {
    /// Load config with layered precedence: global < project < env vars
    pub fn load() -> Result<Self> {
        let mut config = Self::default();

        // Layer 1: Global config (~/.frost/config.toml)
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                config.merge(Self::load_file(&global_path)?);
            }
        }

        // Layer 2: Project-local config (.frost/config.toml)
        let local_path = PathBuf::from(".frost/config.toml");
        if local_path.exists() {
            config.merge(Self::load_file(&local_path)?);
        }

        // Layer 3: Environment variable overrides
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from a specific file on top of the defaults, with no
    /// other layers
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let mut config = Self::default();
        config.merge(Self::load_file(path)?);
        config.validate()?;
        Ok(config)
    }

    /// Points for a target resolved `elapsed` seconds into its level
    pub fn points_for(&self, elapsed: f64) -> u64 {
        let factor = self
            .score_multipliers
            .iter()
            .find(|(seconds, _)| elapsed < *seconds)
            .map(|(_, factor)| *factor)
            .unwrap_or(1);
        self.score_per_target.saturating_mul(factor)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.present_speed > 0.0) {
            return Err(FrostError::ConfigError(format!(
                "present_speed must be positive, got {}",
                self.present_speed
            )));
        }
        if self.landing_tolerance < 0.0 {
            return Err(FrostError::ConfigError(
                "landing_tolerance must not be negative".to_string(),
            ));
        }
        if !(self.max_delta_seconds > 0.0) {
            return Err(FrostError::ConfigError(
                "max_delta_seconds must be positive".to_string(),
            ));
        }
        if !(self.viewport.width > 0.0 && self.viewport.height > 0.0) {
            return Err(FrostError::ConfigError(format!(
                "viewport must be positive, got {}x{}",
                self.viewport.width, self.viewport.height
            )));
        }
        if !(self.effect_lifetime >= 0.0) {
            return Err(FrostError::ConfigError(
                "effect_lifetime must not be negative".to_string(),
            ));
        }
        if self.num_levels == 0 {
            return Err(FrostError::ConfigError(
                "num_levels must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".frost").join("config.toml"))
    }

    fn load_file(path: &Path) -> Result<GameConfigFile> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| {
            FrostError::ConfigError(format!("Failed to parse config {}: {}", path.display(), e))
        })
    }

    fn merge(&mut self, overlay: GameConfigFile) {
        if let Some(v) = overlay.max_delta_seconds {
            self.max_delta_seconds = v;
        }
        if let Some(v) = overlay.viewport {
            self.viewport = v;
        }
        if let Some(v) = overlay.present_speed {
            self.present_speed = v;
        }
        if let Some(v) = overlay.landing_tolerance {
            self.landing_tolerance = v;
        }
        if let Some(v) = overlay.score_per_target {
            self.score_per_target = v;
        }
        if let Some(v) = overlay.score_multipliers {
            self.score_multipliers = v;
        }
        if let Some(v) = overlay.time_per_level {
            self.time_per_level = v;
        }
        if let Some(v) = overlay.num_levels {
            self.num_levels = v;
        }
        if let Some(v) = overlay.effect_lifetime {
            self.effect_lifetime = v;
        }
        if let Some(v) = overlay.holding_suffix {
            self.holding_suffix = v;
        }
    }

    fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(raw) = lookup("FROST_MAX_DELTA") {
            self.max_delta_seconds = raw.trim().parse().map_err(|_| {
                FrostError::ConfigError(format!("FROST_MAX_DELTA is not a number: {raw}"))
            })?;
        }
        if let Some(raw) = lookup("FROST_NUM_LEVELS") {
            self.num_levels = raw.trim().parse().map_err(|_| {
                FrostError::ConfigError(format!("FROST_NUM_LEVELS is not a count: {raw}"))
            })?;
        }
        Ok(())
    }
}
