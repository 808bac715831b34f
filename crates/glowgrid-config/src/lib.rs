//! Configuration loading for the glowgrid application.
//!
//! Settings come from a TOML file in the platform config directory
//! (`glowgrid/config.toml`), with built-in defaults when no file exists.
//! Every numeric default matches the original chart's tuning. Validation
//! is fail-fast: a degenerate grid or an unparseable palette color is
//! rejected before any cell is generated.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use glowgrid_core::{FadeOrder, LayoutMode, Rgba, Vec2};
use serde::Deserialize;

/// Configuration failure.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
    #[error("unparseable palette color {0:?} (expected \"#rrggbb\")")]
    BadColor(String),
    #[error("unknown fade order {0:?} (expected \"flat\" or \"grouped\")")]
    BadFadeOrder(String),
}

/// User-facing settings for the chart animation.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Hex color per height class; also sets the column count in
    /// sequential mode.
    pub palette: Vec<String>,
    /// Resting cell alpha.
    pub low_alpha: f32,
    /// Chance of leaving a gap in randomized layouts.
    pub gap_probability: f32,
    /// Columns in randomized mode.
    pub column_count: usize,
    /// Rows per column.
    pub row_count: usize,
    /// World height of one row unit.
    pub cell_height: f32,
    /// Horizontal and vertical cell spacing.
    pub interval: [f32; 2],
    /// Layout seed; the same seed reproduces the same chart.
    pub seed: u64,
    /// Seconds a cell holds full brightness; ramps last a fifth of this.
    pub ramp_hold_delay: f32,
    /// Seconds the cursor rests on a cell before its ramp starts
    /// (flat order only).
    pub secondary_delay: f32,
    /// Randomized layout instead of sequential.
    pub randomize_layout: bool,
    /// Shuffle animation order in randomized layouts.
    pub shuffle: bool,
    /// "flat" or "grouped".
    pub fade_order: String,
    /// Restart the fade pass when it completes.
    pub looping: bool,
    /// Easing speed of the cursor follower.
    pub cursor_speed: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            palette: vec![
                "#46a3ff".to_string(),
                "#ffc24b".to_string(),
                "#ff5e6c".to_string(),
            ],
            low_alpha: 0.5,
            gap_probability: 0.3,
            column_count: 3,
            row_count: 10,
            cell_height: 0.2,
            interval: [1.0, 0.02],
            seed: 123,
            ramp_hold_delay: 0.3,
            secondary_delay: 0.1,
            randomize_layout: true,
            shuffle: true,
            fade_order: "flat".to_string(),
            looping: true,
            cursor_speed: 20.0,
        }
    }
}

impl Config {
    /// Load from the platform config directory, falling back to defaults
    /// when no file exists.
    pub fn load() -> Result<Self, ConfigError> {
        match config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => {
                let config = Self::default();
                config.validate()?;
                Ok(config)
            }
        }
    }

    /// Load and validate a specific file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the generator's arithmetic is undefined for.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.palette.is_empty() {
            return Err(ConfigError::Invalid("palette must not be empty"));
        }
        if self.row_count == 0 {
            return Err(ConfigError::Invalid("row_count must be at least 1"));
        }
        if self.column_count == 0 {
            return Err(ConfigError::Invalid("column_count must be at least 1"));
        }
        if !(0.0..=1.0).contains(&self.low_alpha) {
            return Err(ConfigError::Invalid("low_alpha must be within [0, 1]"));
        }
        if !(0.0..=1.0).contains(&self.gap_probability) {
            return Err(ConfigError::Invalid(
                "gap_probability must be within [0, 1]",
            ));
        }
        if self.cell_height <= 0.0 {
            return Err(ConfigError::Invalid("cell_height must be positive"));
        }
        if self.ramp_hold_delay <= 0.0 {
            return Err(ConfigError::Invalid("ramp_hold_delay must be positive"));
        }
        if self.secondary_delay < 0.0 {
            return Err(ConfigError::Invalid("secondary_delay must not be negative"));
        }
        if self.cursor_speed <= 0.0 {
            return Err(ConfigError::Invalid("cursor_speed must be positive"));
        }
        self.palette_colors()?;
        self.fade_order()?;
        Ok(())
    }

    /// Parsed palette colors, in height-class order.
    pub fn palette_colors(&self) -> Result<Vec<Rgba>, ConfigError> {
        self.palette
            .iter()
            .map(|hex| Rgba::from_hex(hex).ok_or_else(|| ConfigError::BadColor(hex.clone())))
            .collect()
    }

    /// Layout mode selected by `randomize_layout`.
    pub fn layout_mode(&self) -> LayoutMode {
        if self.randomize_layout {
            LayoutMode::Randomized
        } else {
            LayoutMode::Sequential
        }
    }

    /// Parsed fade order.
    pub fn fade_order(&self) -> Result<FadeOrder, ConfigError> {
        FadeOrder::from_name(&self.fade_order)
            .ok_or_else(|| ConfigError::BadFadeOrder(self.fade_order.clone()))
    }

    /// Cell spacing as a vector.
    pub fn interval(&self) -> Vec2 {
        Vec2::new(self.interval[0], self.interval[1])
    }
}

fn config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "glowgrid").map(|dirs| dirs.config_dir().join("config.toml"))
}
