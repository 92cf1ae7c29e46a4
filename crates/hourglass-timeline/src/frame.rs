//! Per-redraw geometry handed to a rendering surface.
//!
//! A [`Frame`] is everything a renderer needs to draw one state of the
//! timeline: one [`BlockGeometry`] per record in canonical order, the
//! content extents, and the axis ticks. Renderers must skip blocks with
//! `visible == false`; their geometry is zeroed.

use hourglass_types::{RecordId, format_millis, format_minutes_seconds};
use serde::Serialize;

use crate::config::TimelineConfig;
use crate::layout::Layout;
use crate::scale::TimeScale;
use crate::tree::Timeline;

/// Start gap after which the left gutter prints another time caption.
pub const TIME_CAPTION_GAP_MS: u64 = 30_000;

/// Elbow line in the gutter from a child's toggle to its parent's row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Connector {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

/// Geometry and captions for one record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockGeometry {
    pub id: RecordId,
    pub label: String,
    pub visible: bool,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub level: usize,
    pub has_children: bool,
    pub collapsed: bool,
    pub color_slot: Option<usize>,
    /// X of the expand/collapse affordance in the gutter.
    pub toggle_x: f64,
    pub connector: Option<Connector>,
    /// `"<n>ms"`, empty when hidden.
    pub duration_caption: String,
    /// `"<m>m<s>s"` at large start gaps, empty otherwise.
    pub time_caption: String,
}

/// One axis tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Tick {
    pub time_ms: f64,
    pub x: f64,
}

/// Complete drawable state.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Frame {
    pub blocks: Vec<BlockGeometry>,
    pub content_width: f64,
    pub content_height: f64,
    /// Width of the time axis (and the scale's pixel range).
    pub axis_width: f64,
    pub axis_height: f64,
    pub ticks: Vec<Tick>,
    /// Latest end among page-load records, 0 if none.
    pub page_load_ms: u64,
}

impl Frame {
    /// Assemble a frame from a finished layout pass.
    pub fn compose(timeline: &Timeline, layout: &Layout, scale: &TimeScale, config: &TimelineConfig) -> Self {
        let mut blocks = Vec::with_capacity(timeline.len());
        let mut prev_start = 0u64;
        let mut page_load_ms = 0u64;

        for (position, node) in timeline.nodes().iter().enumerate() {
            let record = node.record();
            let row = layout.row(position);
            let visible = row.is_some();
            let top = row.map_or(0.0, |r| r.top);
            let toggle_x = config.gutter_offset + node.level() as f64 * config.indent;

            // The gap is measured against the previous record in canonical
            // order whether or not that one is drawn
            let gap_caption = prev_start == 0 || record.start > prev_start.saturating_add(TIME_CAPTION_GAP_MS);
            prev_start = record.start;

            if record.is_page_load() {
                page_load_ms = page_load_ms.max(record.end);
            }

            let connector = match (visible, timeline.index().parent(position)) {
                (true, Some(parent)) => layout.row(parent).map(|parent_row| Connector {
                    x1: toggle_x,
                    y1: top + config.block_height / 2.0,
                    x2: toggle_x - config.indent,
                    y2: parent_row.top + config.block_height,
                }),
                _ => None,
            };

            blocks.push(BlockGeometry {
                id: record.id.clone(),
                label: record.label.clone(),
                visible,
                x: scale.to_pixel(record.start),
                y: top,
                width: scale.span_width(record.start, record.end),
                height: if visible { config.block_height } else { 0.0 },
                level: node.level(),
                has_children: timeline.has_children(position),
                collapsed: node.is_collapsed(),
                color_slot: node.color_slot(),
                toggle_x,
                connector,
                duration_caption: if visible { format_millis(record.duration()) } else { String::new() },
                time_caption: if visible && gap_caption {
                    format_minutes_seconds(record.start)
                } else {
                    String::new()
                },
            });
        }

        let ticks = scale
            .ticks(scale.tick_count(config.tick_spacing))
            .into_iter()
            .map(|time_ms| Tick {
                time_ms,
                x: time_ms / scale.ms_per_pixel(),
            })
            .collect();

        Self {
            blocks,
            content_width: layout.content_width,
            content_height: layout.content_height,
            axis_width: scale.pixel_width(),
            axis_height: config.axis_height,
            ticks,
            page_load_ms,
        }
    }

    /// Geometry of `id`.
    pub fn block(&self, id: &RecordId) -> Option<&BlockGeometry> {
        self.blocks.iter().find(|b| &b.id == id)
    }

    /// Visible blocks in display order.
    pub fn visible_blocks(&self) -> impl Iterator<Item = &BlockGeometry> {
        self.blocks.iter().filter(|b| b.visible)
    }
}
