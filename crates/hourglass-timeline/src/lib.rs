//! Hierarchical timeline core for hourglass.
//!
//! Turns a flat list of parent-referencing [`Record`]s into a collapsible,
//! time-ordered tree and computes the geometry any renderer needs.
//!
//! # Pipeline
//!
//! ```text
//! Vec<Record>
//!   └── TreeIndex::build     id → position, parent, children
//!   └── linearize            canonical pre-order + levels
//!   └── Timeline             arena, all nodes collapsed
//!
//! on every redraw (construction, toggle, resize):
//!   Timeline ── LayoutEngine ──▶ Layout (rows, extents)
//!            └─ TimeScale    ──▶ Frame (blocks, ticks) ──▶ Surface::draw
//! ```
//!
//! Topology never changes after construction; toggles only flip
//! `collapsed` flags and trigger a full relayout.

pub mod config;
mod error;
pub mod frame;
pub mod index;
pub mod layout;
pub mod linearize;
pub mod scale;
mod toggle;
pub mod tooltip;
mod tree;
mod view;
mod visibility;

pub use config::{ConfigError, OrphanPolicy, RootOrder, TimelineConfig, TooltipConfig};
pub use error::TimelineError;
pub use frame::{BlockGeometry, Connector, Frame, Tick};
pub use hourglass_types::{Record, RecordId};
pub use index::{TreeIndex, TreeNode};
pub use layout::{Layout, LayoutEngine, Row};
pub use scale::TimeScale;
pub use toggle::ToggleOutcome;
pub use tooltip::{PointerTracker, TipContent, TipEvent, TipPlacement, TooltipDebouncer};
pub use tree::{Node, PALETTE_SIZE, Timeline};
pub use view::{CaptionAction, Surface, TimelineView, TipUpdate};

/// Result type for timeline operations.
pub type Result<T> = std::result::Result<T, TimelineError>;
