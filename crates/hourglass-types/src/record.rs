//! Timed event records.
//!
//! A `Record` is what a trace producer hands us: an id, an optional parent,
//! a start/end pair in milliseconds and a label. Records are immutable once
//! supplied; nesting depth and expand/collapse state are tracked by the
//! timeline arena, not here.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ids::RecordId;

/// Label prefix marking the page-load record(s) of a browser trace.
pub const PAGE_LOAD_PREFIX: &str = "loadPage";

/// A record whose span runs backwards.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("record {id} ends at {end}ms before it starts at {start}ms")]
pub struct SpanError {
    pub id: RecordId,
    pub start: u64,
    pub end: u64,
}

/// A single timed event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Unique within one input set.
    pub id: RecordId,
    /// Containing record, `None` for a root.
    #[serde(default)]
    pub parent: Option<RecordId>,
    /// Start, in milliseconds since trace origin.
    pub start: u64,
    /// End, in milliseconds since trace origin. Never before `start`.
    pub end: u64,
    /// Display string.
    #[serde(default)]
    pub label: String,
}

impl Record {
    /// A top-level record.
    pub fn root(id: impl Into<RecordId>, start: u64, end: u64, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            parent: None,
            start,
            end,
            label: label.into(),
        }
    }

    /// A record nested under `parent`.
    pub fn child(
        id: impl Into<RecordId>,
        parent: impl Into<RecordId>,
        start: u64,
        end: u64,
        label: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            parent: Some(parent.into()),
            start,
            end,
            label: label.into(),
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Elapsed milliseconds; zero for a malformed span.
    pub fn duration(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }

    /// Whether this record marks a page load.
    pub fn is_page_load(&self) -> bool {
        self.label.starts_with(PAGE_LOAD_PREFIX)
    }

    /// Check the `end >= start` invariant.
    pub fn validate_span(&self) -> Result<(), SpanError> {
        if self.end < self.start {
            return Err(SpanError {
                id: self.id.clone(),
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }
}
