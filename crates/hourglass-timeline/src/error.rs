//! Error types for timeline construction and toggling.

use hourglass_types::{RecordId, SpanError};
use thiserror::Error;

/// Errors that can occur while building or driving a timeline.
///
/// Construction errors (everything except `NotFound`) are fatal: no
/// timeline is produced. `NotFound` from a toggle leaves all state unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimelineError {
    /// Two records share an id.
    #[error("duplicate record id: {0}")]
    DuplicateId(RecordId),

    /// A record names a parent that is not in the input set.
    #[error("record {id} references unknown parent {parent}")]
    UnknownParent { id: RecordId, parent: RecordId },

    /// A record is (transitively) its own ancestor.
    #[error("record {0} is part of a parent cycle")]
    CyclicAncestry(RecordId),

    /// A record ends before it starts.
    #[error(transparent)]
    InvalidSpan(#[from] SpanError),

    /// Operation addressed an id the timeline does not know.
    #[error("record not found: {0}")]
    NotFound(RecordId),
}
