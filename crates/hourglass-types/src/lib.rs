//! Shared record types for hourglass.
//!
//! This crate is the input vocabulary: one [`Record`] per timed event, keyed
//! by an opaque [`RecordId`] and optionally pointing at a parent record. It
//! has **no internal hourglass dependencies**; everything else builds on it.
//!
//! ```text
//! Record (RecordId)
//!     └── parent: Option<RecordId> forms the nesting tree
//!     └── start..end in milliseconds since trace origin
//! ```

pub mod ids;
pub mod record;
pub mod time;

pub use ids::RecordId;
pub use record::{Record, SpanError};
pub use time::{format_minutes_seconds, format_millis};
