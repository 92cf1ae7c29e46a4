//! Library half of the `hourglass` binary.
//!
//! Loading, toggling and printing live here so they can be tested without
//! spawning the process.

pub mod input;
pub mod render;

pub use input::{default_config_path, load_records, resolve_config};
pub use render::{FrameCapture, OutputFormat, RenderOptions, render};
