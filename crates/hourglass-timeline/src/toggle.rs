//! Expand/collapse state machine.
//!
//! Each node is either collapsed or expanded; all start collapsed.
//! Expanding flips only the target's flag, so descendants reappear in
//! whatever state they were left. Collapsing is destructive: the whole
//! subtree is forced collapsed, and a later expand reveals direct children
//! only.

use hourglass_types::RecordId;

use crate::Result;
use crate::tree::Timeline;

/// What a toggle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// Target has no children; nothing changed.
    Leaf,
    /// Target went from collapsed to expanded.
    Expanded,
    /// Target went from expanded to collapsed. `forced` counts descendants
    /// that were expanded and got shut along with it.
    Collapsed { forced: usize },
}

impl ToggleOutcome {
    /// Whether any flag changed (and a relayout is due).
    pub fn changed(self) -> bool {
        !matches!(self, Self::Leaf)
    }
}

impl Timeline {
    /// Flip the collapsed state of `id`.
    ///
    /// Fails with `NotFound` for an unknown id, leaving all state unchanged.
    pub fn toggle(&mut self, id: &RecordId) -> Result<ToggleOutcome> {
        let position = self.require(id)?;

        let outcome = if !self.has_children(position) {
            ToggleOutcome::Leaf
        } else if self.node(position).is_collapsed() {
            self.nodes_mut()[position].collapsed = false;
            ToggleOutcome::Expanded
        } else {
            let forced = self.collapse_branch(position);
            ToggleOutcome::Collapsed { forced }
        };

        tracing::trace!(%id, ?outcome, "toggled branch");
        Ok(outcome)
    }

    /// Collapse `position` and every descendant. Returns how many
    /// descendants were open.
    fn collapse_branch(&mut self, position: usize) -> usize {
        let mut forced = 0;
        let mut stack = vec![position];

        while let Some(current) = stack.pop() {
            stack.extend_from_slice(self.index().children(current));
            let node = &mut self.nodes_mut()[current];
            if current != position && !node.collapsed {
                forced += 1;
            }
            node.collapsed = true;
        }

        forced
    }

    /// Expand every node that has children. Returns how many changed.
    pub fn expand_all(&mut self) -> usize {
        let branches: Vec<usize> = (0..self.len()).filter(|&p| self.has_children(p)).collect();
        let mut changed = 0;
        for position in branches {
            let node = &mut self.nodes_mut()[position];
            if node.collapsed {
                node.collapsed = false;
                changed += 1;
            }
        }
        changed
    }

    /// Collapse every node, back to the construction state.
    pub fn collapse_all(&mut self) {
        for node in self.nodes_mut() {
            node.collapsed = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{TimelineConfig, TimelineError};
    use hourglass_types::Record;

    fn tree() -> Timeline {
        let records = vec![
            Record::root("r", 0, 100, "r"),
            Record::child("a", "r", 10, 50, "a"),
            Record::child("a1", "a", 11, 20, "a1"),
            Record::child("a1x", "a1", 12, 13, "a1x"),
            Record::child("b", "r", 60, 90, "b"),
        ];
        Timeline::build(records, &TimelineConfig::default()).unwrap()
    }

    fn collapsed(t: &Timeline, id: &str) -> bool {
        t.is_collapsed(&id.into()).unwrap()
    }

    fn visible(t: &Timeline, id: &str) -> bool {
        t.is_visible(&id.into()).unwrap()
    }

    #[test]
    fn leaf_toggle_is_noop() {
        let mut t = tree();
        assert_eq!(t.toggle(&"b".into()).unwrap(), ToggleOutcome::Leaf);
        assert!(!ToggleOutcome::Leaf.changed());
        assert!(collapsed(&t, "b"));
    }

    #[test]
    fn expand_reveals_direct_children_only() {
        let mut t = tree();
        assert_eq!(t.toggle(&"r".into()).unwrap(), ToggleOutcome::Expanded);
        assert!(visible(&t, "a"));
        assert!(visible(&t, "b"));
        assert!(!visible(&t, "a1"));
    }

    #[test]
    fn collapse_forces_whole_subtree_shut() {
        let mut t = tree();
        t.toggle(&"r".into()).unwrap();
        t.toggle(&"a".into()).unwrap();
        t.toggle(&"a1".into()).unwrap();
        assert!(visible(&t, "a1x"));

        assert_eq!(t.toggle(&"r".into()).unwrap(), ToggleOutcome::Collapsed { forced: 2 });
        for id in ["r", "a", "a1", "a1x", "b"] {
            assert!(collapsed(&t, id), "{id} should be collapsed");
        }

        // Re-expanding does not restore a or a1
        t.toggle(&"r".into()).unwrap();
        assert!(visible(&t, "a"));
        assert!(!visible(&t, "a1"));
    }

    #[test]
    fn expand_restores_state_below_when_not_forced() {
        let mut t = tree();
        t.toggle(&"r".into()).unwrap();
        t.toggle(&"a".into()).unwrap();
        // a stays expanded while r's flag alone is flipped back and forth
        t.nodes_mut()[0].collapsed = true;
        assert!(!visible(&t, "a1"));
        t.toggle(&"r".into()).unwrap();
        assert!(visible(&t, "a1"));
    }

    #[test]
    fn unknown_id_changes_nothing() {
        let mut t = tree();
        t.toggle(&"r".into()).unwrap();
        let before: Vec<bool> = t.nodes().iter().map(|n| n.is_collapsed()).collect();

        assert_eq!(t.toggle(&"nope".into()), Err(TimelineError::NotFound("nope".into())));
        let after: Vec<bool> = t.nodes().iter().map(|n| n.is_collapsed()).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn expand_all_then_collapse_all() {
        let mut t = tree();
        assert_eq!(t.expand_all(), 3);
        assert!(visible(&t, "a1x"));
        t.collapse_all();
        assert_eq!(t.visible_positions().count(), 1);
    }
}
