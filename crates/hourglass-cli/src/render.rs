//! Text and JSON output of a timeline frame.

use anyhow::{Context, Result};
use hourglass_timeline::{
    BlockGeometry, Frame, Record, RecordId, Surface, TimelineConfig, TimelineView,
};

/// How `render` prints the frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Indented tree with a proportional bar per visible record.
    #[default]
    Tree,
    /// The full frame as pretty JSON.
    Json,
}

/// Surface with a fixed viewport that keeps the latest frame.
#[derive(Debug, Default)]
pub struct FrameCapture {
    width: f64,
    last: Frame,
    draws: usize,
}

impl FrameCapture {
    pub fn new(width: f64) -> Self {
        Self {
            width,
            ..Default::default()
        }
    }

    pub fn last(&self) -> &Frame {
        &self.last
    }

    pub fn draws(&self) -> usize {
        self.draws
    }
}

impl Surface for FrameCapture {
    fn viewport_width(&self) -> f64 {
        self.width
    }

    fn draw(&mut self, frame: &Frame) {
        self.last = frame.clone();
        self.draws += 1;
    }
}

/// Which branches to open and how to print.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub expand: Vec<RecordId>,
    pub expand_all: bool,
    pub format: OutputFormat,
    /// Width of the tree format's time bars, in characters.
    pub bar_columns: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            expand: Vec::new(),
            expand_all: false,
            format: OutputFormat::Tree,
            bar_columns: 40,
        }
    }
}

/// Build a view over `records`, open the requested branches and print it.
pub fn render(records: Vec<Record>, config: TimelineConfig, options: &RenderOptions) -> Result<String> {
    let surface = FrameCapture::new(config.viewport_width);
    let mut view = TimelineView::with_config(surface, records, config).context("building timeline")?;

    if options.expand_all {
        view.expand_all();
    }
    for id in &options.expand {
        // Only open: toggling an open branch would shut it
        if view.timeline().is_collapsed(id)? {
            view.toggle_branch(id)?;
        }
    }

    let frame = view.surface().last();
    tracing::info!(
        visible = frame.visible_blocks().count(),
        total = frame.blocks.len(),
        draws = view.surface().draws(),
        "rendered timeline"
    );

    match options.format {
        OutputFormat::Tree => Ok(tree_lines(frame, options.bar_columns).join("\n")),
        OutputFormat::Json => serde_json::to_string_pretty(frame).context("serializing frame"),
    }
}

/// One line per visible block: time caption, bar, indented label, duration.
pub fn tree_lines(frame: &Frame, bar_columns: usize) -> Vec<String> {
    frame
        .visible_blocks()
        .map(|block| {
            let marker = match (block.has_children, block.collapsed) {
                (false, _) => "·",
                (true, true) => "▸",
                (true, false) => "▾",
            };
            format!(
                "{:>7} |{}| {}{} {} ({})",
                block.time_caption,
                bar(block, frame.axis_width, bar_columns),
                "  ".repeat(block.level),
                marker,
                block.label,
                block.duration_caption,
            )
        })
        .collect()
}

/// Block span scaled onto `columns` characters of the axis.
fn bar(block: &BlockGeometry, axis_width: f64, columns: usize) -> String {
    if columns == 0 || axis_width <= 0.0 {
        return " ".repeat(columns);
    }
    let column = |px: f64| px * columns as f64 / axis_width;
    let start = (column(block.x).floor() as usize).min(columns - 1);
    let end = (column(block.x + block.width).ceil() as usize).clamp(start + 1, columns);

    let mut out = String::with_capacity(columns * 3);
    out.push_str(&" ".repeat(start));
    out.push_str(&"█".repeat(end - start));
    out.push_str(&" ".repeat(columns - end));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records() -> Vec<Record> {
        vec![
            Record::root(1u64, 0, 5000, "root"),
            Record::child(2u64, 1u64, 5000, 10_000, "child"),
        ]
    }

    #[test]
    fn tree_shows_only_visible_rows() {
        let out = render(records(), TimelineConfig::default(), &RenderOptions::default()).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("▸ root (5000ms)"));
    }

    #[test]
    fn expand_opens_named_branch() {
        let options = RenderOptions {
            expand: vec![RecordId::from(1u64)],
            bar_columns: 10,
            ..Default::default()
        };
        let out = render(records(), TimelineConfig::default(), &options).unwrap();
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines.len(), 2);
        // 1000px axis, 10 columns: root covers 0..500px, child 500..1000px
        assert_eq!(lines[0], "   0m0s |█████     | ▾ root (5000ms)");
        assert_eq!(lines[1], "   0m5s |     █████|   · child (5000ms)");
    }

    #[test]
    fn expand_unknown_id_fails() {
        let options = RenderOptions {
            expand: vec![RecordId::from("nope")],
            ..Default::default()
        };
        assert!(render(records(), TimelineConfig::default(), &options).is_err());
    }

    #[test]
    fn json_contains_frame() {
        let options = RenderOptions {
            expand_all: true,
            format: OutputFormat::Json,
            ..Default::default()
        };
        let out = render(records(), TimelineConfig::default(), &options).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();

        assert_eq!(value["blocks"].as_array().unwrap().len(), 2);
        assert_eq!(value["blocks"][1]["y"], 16.0);
        assert_eq!(value["content_height"], 46.0);
    }

    #[test]
    fn bar_never_empty() {
        let block = BlockGeometry {
            id: RecordId::from("x"),
            label: String::new(),
            visible: true,
            x: 999.0,
            y: 0.0,
            width: 1.0,
            height: 14.0,
            level: 0,
            has_children: false,
            collapsed: true,
            color_slot: None,
            toggle_x: 40.0,
            connector: None,
            duration_caption: String::new(),
            time_caption: String::new(),
        };
        assert_eq!(bar(&block, 1000.0, 4), "   █");
    }
}
