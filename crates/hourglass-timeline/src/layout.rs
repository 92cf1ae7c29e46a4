//! Row assignment and content extents.
//!
//! A full pass over the canonical order: every visible node takes the next
//! row slot, invisible nodes take none and consume no height. Run again in
//! full after every toggle; there is no incremental patching.

use serde::Serialize;

use crate::config::TimelineConfig;
use crate::scale::TimeScale;
use crate::tree::Timeline;

/// Placement of one visible node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Row {
    /// Index among visible rows, in display order.
    pub row_index: usize,
    /// Y offset of the row's top edge.
    pub top: f64,
}

/// Result of one layout pass.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Layout {
    rows: Vec<Option<Row>>,
    /// Height of the drawing surface: last offset plus one block.
    pub content_height: f64,
    /// Rightmost pixel of any visible block.
    pub content_width: f64,
    /// Rightmost pixel of any block, visible or not.
    pub extent_width: f64,
}

impl Layout {
    /// Row of the node at `position`, `None` if it is hidden.
    pub fn row(&self, position: usize) -> Option<Row> {
        self.rows.get(position).copied().flatten()
    }

    pub fn visible_count(&self) -> usize {
        self.rows.iter().filter(|r| r.is_some()).count()
    }
}

/// Assigns rows using fixed block height and margin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutEngine {
    pub block_height: f64,
    pub vertical_margin: f64,
}

impl LayoutEngine {
    pub fn new(block_height: f64, vertical_margin: f64) -> Self {
        Self {
            block_height,
            vertical_margin,
        }
    }

    pub fn from_config(config: &TimelineConfig) -> Self {
        Self::new(config.block_height, config.vertical_margin)
    }

    /// Distance between consecutive row tops.
    pub fn row_pitch(&self) -> f64 {
        self.block_height + self.vertical_margin
    }

    pub fn layout(&self, timeline: &Timeline, scale: &TimeScale) -> Layout {
        let mut rows = Vec::with_capacity(timeline.len());
        let mut offset = 0.0;
        let mut row_index = 0;
        let mut content_width: f64 = 0.0;
        let mut extent_width: f64 = 0.0;

        for (position, node) in timeline.nodes().iter().enumerate() {
            let right = scale.to_pixel(node.record().end);
            extent_width = extent_width.max(right);

            if timeline.is_visible_at(position) {
                rows.push(Some(Row { row_index, top: offset }));
                row_index += 1;
                offset += self.row_pitch();
                content_width = content_width.max(right);
            } else {
                rows.push(None);
            }
        }

        tracing::debug!(visible = row_index, total = timeline.len(), "layout pass");

        Layout {
            rows,
            content_height: offset + self.block_height,
            content_width,
            extent_width,
        }
    }
}
