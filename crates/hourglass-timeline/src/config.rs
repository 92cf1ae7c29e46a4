//! RON-backed configuration for timeline views.
//!
//! Every field has a default, so an empty `()` file is a valid config and
//! partial files only override what they name:
//!
//! ```ron
//! (
//!     block_height: 18.0,
//!     root_order: Input,
//!     tooltip: (show_delay_ms: 250),
//! )
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use thiserror::Error;

/// Errors from loading a config file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid timeline config: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

/// Order in which roots (and each parent's children) are emitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum RootOrder {
    /// Ascending `start`; equal starts keep input order.
    #[default]
    StartTime,
    /// Input order, untouched.
    Input,
}

/// What to do with a record whose parent id is not in the input set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum OrphanPolicy {
    /// Fail construction with `UnknownParent`.
    #[default]
    Reject,
    /// Treat the record as a root and log a warning.
    PromoteToRoot,
}

/// Tooltip timing and size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TooltipConfig {
    pub show_delay_ms: u64,
    pub hide_delay_ms: u64,
    pub width: f64,
    pub height: f64,
}

impl Default for TooltipConfig {
    fn default() -> Self {
        Self {
            show_delay_ms: 500,
            hide_delay_ms: 100,
            width: 200.0,
            height: 60.0,
        }
    }
}

impl TooltipConfig {
    pub fn show_delay(&self) -> Duration {
        Duration::from_millis(self.show_delay_ms)
    }

    pub fn hide_delay(&self) -> Duration {
        Duration::from_millis(self.hide_delay_ms)
    }
}

/// Layout constants and tree policies for one view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    /// Height of one block row in pixels.
    pub block_height: f64,
    /// Gap between consecutive visible rows.
    pub vertical_margin: f64,
    /// Height of the time axis strip under the canvas.
    pub axis_height: f64,
    /// Time resolution: milliseconds covered by one pixel.
    pub ms_per_pixel: f64,
    /// Desired pixel distance between axis ticks.
    pub tick_spacing: f64,
    /// X of a level-0 expand/collapse affordance in the left gutter.
    pub gutter_offset: f64,
    /// Horizontal indent per nesting level in the gutter.
    pub indent: f64,
    /// Viewport width for surfaces that have no window of their own.
    pub viewport_width: f64,
    pub root_order: RootOrder,
    pub orphan_policy: OrphanPolicy,
    pub tooltip: TooltipConfig,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            block_height: 14.0,
            vertical_margin: 2.0,
            axis_height: 20.0,
            ms_per_pixel: 10.0,
            tick_spacing: 100.0,
            gutter_offset: 40.0,
            indent: 10.0,
            viewport_width: 1000.0,
            root_order: RootOrder::default(),
            orphan_policy: OrphanPolicy::default(),
            tooltip: TooltipConfig::default(),
        }
    }
}

impl TimelineConfig {
    /// Parse a config from RON text.
    pub fn from_ron_str(text: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(text)?)
    }

    /// Load a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_ron_str(&text)?;
        tracing::debug!(path = %path.display(), "loaded timeline config");
        Ok(config)
    }

    /// Vertical distance between the tops of two consecutive visible rows.
    pub fn row_pitch(&self) -> f64 {
        self.block_height + self.vertical_margin
    }
}
