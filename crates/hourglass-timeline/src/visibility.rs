//! Visibility resolution.
//!
//! A record is visible iff every ancestor is expanded. Nothing is cached:
//! each query walks the ancestor chain against the current `collapsed`
//! flags, so a toggle anywhere above is always observed.

use hourglass_types::RecordId;

use crate::Result;
use crate::tree::Timeline;

impl Timeline {
    /// Whether the node at `position` is currently rendered.
    pub fn is_visible_at(&self, position: usize) -> bool {
        let mut current = position;
        // Construction rejected cycles, so this chain ends at a root
        while let Some(parent) = self.index().parent(current) {
            if self.node(parent).is_collapsed() {
                return false;
            }
            current = parent;
        }
        true
    }

    /// Whether `id` is currently rendered.
    pub fn is_visible(&self, id: &RecordId) -> Result<bool> {
        Ok(self.is_visible_at(self.require(id)?))
    }

    /// Canonical positions of all visible nodes, in display order.
    pub fn visible_positions(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.len()).filter(|&p| self.is_visible_at(p))
    }
}
