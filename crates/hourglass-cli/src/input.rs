//! Record files and config discovery.

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use hourglass_timeline::{Record, TimelineConfig};

/// `$XDG_CONFIG_HOME/hourglass/timeline.ron` (or the platform equivalent).
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("hourglass").join("timeline.ron"))
}

/// Config from `explicit`, else the default path if it exists, else defaults.
pub fn resolve_config(explicit: Option<&Path>) -> Result<TimelineConfig> {
    if let Some(path) = explicit {
        return TimelineConfig::load(path).with_context(|| format!("loading config {}", path.display()));
    }
    match default_config_path() {
        Some(path) if path.exists() => {
            TimelineConfig::load(&path).with_context(|| format!("loading config {}", path.display()))
        }
        _ => Ok(TimelineConfig::default()),
    }
}

/// Read a JSON array of records from `path`, or stdin when `path` is `-`.
pub fn load_records(path: &Path) -> Result<Vec<Record>> {
    let text = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("reading records from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path).with_context(|| format!("reading records {}", path.display()))?
    };

    let records: Vec<Record> =
        serde_json::from_str(&text).with_context(|| format!("parsing records {}", path.display()))?;
    tracing::debug!(count = records.len(), "loaded records");
    Ok(records)
}
