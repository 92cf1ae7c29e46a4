//! The timeline arena.
//!
//! Records live in a dense `Vec<Node>` in canonical (pre-order) order; the
//! canonical [`TreeIndex`] maps ids to positions and holds parent/child
//! links as positions. Topology is fixed at construction. The only mutable
//! state afterwards is each node's `collapsed` flag, owned by the toggle
//! operations.

use std::ops::Range;

use hourglass_types::{Record, RecordId};

use crate::config::{RootOrder, TimelineConfig};
use crate::index::TreeIndex;
use crate::linearize::linearize;
use crate::{Result, TimelineError};

/// Number of color slots branches cycle through.
pub const PALETTE_SIZE: usize = 6;

/// One record plus the state the tree derives for it.
#[derive(Debug, Clone)]
pub struct Node {
    record: Record,
    level: usize,
    pub(crate) collapsed: bool,
    color_slot: Option<usize>,
}

impl Node {
    pub fn record(&self) -> &Record {
        &self.record
    }

    pub fn id(&self) -> &RecordId {
        &self.record.id
    }

    /// Depth from the nearest root (roots are 0).
    pub fn level(&self) -> usize {
        self.level
    }

    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    /// Color slot of the branch this node belongs to. Childless roots have none.
    pub fn color_slot(&self) -> Option<usize> {
        self.color_slot
    }
}

/// Canonically ordered, nested record set with expand/collapse state.
#[derive(Debug, Clone)]
pub struct Timeline {
    nodes: Vec<Node>,
    index: TreeIndex,
}

impl Timeline {
    /// Build the canonical tree from a flat record list.
    ///
    /// Every node starts collapsed, so only roots are visible.
    pub fn build(records: Vec<Record>, config: &TimelineConfig) -> Result<Self> {
        for record in &records {
            record.validate_span()?;
        }

        let mut records = records;
        if config.root_order == RootOrder::StartTime {
            records.sort_by_key(|r| r.start);
        }

        let index = TreeIndex::build(&records, config.orphan_policy)?;
        let lin = linearize(&records, &index)?;
        let canonical = index.permute(&lin.order);

        let mut rank = vec![0usize; lin.order.len()];
        for (new, &old) in lin.order.iter().enumerate() {
            rank[old] = new;
        }
        let mut keyed: Vec<(usize, Record)> = records
            .into_iter()
            .enumerate()
            .map(|(old, record)| (rank[old], record))
            .collect();
        keyed.sort_unstable_by_key(|(position, _)| *position);

        let mut nodes: Vec<Node> = Vec::with_capacity(keyed.len());
        for ((position, record), level) in keyed.into_iter().zip(lin.levels) {
            // Parents precede children, so the parent's slot is already set
            let color_slot = match canonical.parent(position) {
                Some(parent) => nodes[parent].color_slot,
                None if !canonical.children(position).is_empty() => Some(position % PALETTE_SIZE),
                None => None,
            };
            nodes.push(Node {
                record,
                level,
                collapsed: true,
                color_slot,
            });
        }

        tracing::debug!(
            records = nodes.len(),
            roots = canonical.roots().len(),
            order = %config.root_order,
            "built timeline"
        );

        Ok(Self { nodes, index: canonical })
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes in canonical order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Node at a canonical position.
    pub fn node(&self, position: usize) -> &Node {
        &self.nodes[position]
    }

    /// Canonical position of `id`.
    pub fn position(&self, id: &RecordId) -> Option<usize> {
        self.index.position(id)
    }

    pub fn get(&self, id: &RecordId) -> Option<&Node> {
        self.position(id).map(|p| &self.nodes[p])
    }

    /// Canonical index (positions match `nodes()`).
    pub fn index(&self) -> &TreeIndex {
        &self.index
    }

    pub fn has_children(&self, position: usize) -> bool {
        !self.index.children(position).is_empty()
    }

    /// Canonical positions of every strict descendant of `position`.
    ///
    /// Pre-order keeps a subtree contiguous: it ends at the next node that
    /// is not deeper than `position`.
    pub fn descendants(&self, position: usize) -> Range<usize> {
        let level = self.nodes[position].level;
        let end = self.nodes[position + 1..]
            .iter()
            .position(|n| n.level <= level)
            .map_or(self.nodes.len(), |offset| position + 1 + offset);
        position + 1..end
    }

    pub(crate) fn nodes_mut(&mut self) -> &mut [Node] {
        &mut self.nodes
    }

    pub(crate) fn require(&self, id: &RecordId) -> Result<usize> {
        self.position(id).ok_or_else(|| TimelineError::NotFound(id.clone()))
    }

    /// Nesting depth of `id`.
    pub fn level(&self, id: &RecordId) -> Result<usize> {
        Ok(self.nodes[self.require(id)?].level)
    }

    pub fn is_collapsed(&self, id: &RecordId) -> Result<bool> {
        Ok(self.nodes[self.require(id)?].collapsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OrphanPolicy;

    fn config(order: RootOrder) -> TimelineConfig {
        TimelineConfig {
            root_order: order,
            ..Default::default()
        }
    }

    fn ids(timeline: &Timeline) -> Vec<&str> {
        timeline.nodes().iter().map(|n| n.id().as_str()).collect()
    }

    fn sample() -> Vec<Record> {
        vec![
            Record::root("late", 500, 900, "late root"),
            Record::child("k2", "early", 40, 60, "second child"),
            Record::root("early", 0, 400, "early root"),
            Record::child("k1", "early", 10, 30, "first child"),
            Record::root("solo", 450, 460, "childless"),
        ]
    }

    #[test]
    fn start_time_order_sorts_roots_and_children() {
        let timeline = Timeline::build(sample(), &config(RootOrder::StartTime)).unwrap();
        assert_eq!(ids(&timeline), ["early", "k1", "k2", "solo", "late"]);
    }

    #[test]
    fn input_order_keeps_encounter_order() {
        let timeline = Timeline::build(sample(), &config(RootOrder::Input)).unwrap();
        assert_eq!(ids(&timeline), ["late", "early", "k2", "k1", "solo"]);
    }

    #[test]
    fn equal_starts_keep_input_order() {
        let records = vec![
            Record::root("b", 5, 6, "b"),
            Record::root("a", 5, 6, "a"),
        ];
        let timeline = Timeline::build(records, &config(RootOrder::StartTime)).unwrap();
        assert_eq!(ids(&timeline), ["b", "a"]);
    }

    #[test]
    fn everything_starts_collapsed_with_levels() {
        let timeline = Timeline::build(sample(), &TimelineConfig::default()).unwrap();
        assert!(timeline.nodes().iter().all(Node::is_collapsed));
        assert_eq!(timeline.level(&"early".into()).unwrap(), 0);
        assert_eq!(timeline.level(&"k2".into()).unwrap(), 1);
        assert_eq!(
            timeline.level(&"missing".into()),
            Err(TimelineError::NotFound("missing".into()))
        );
    }

    #[test]
    fn color_slots_follow_branch_roots() {
        let timeline = Timeline::build(sample(), &TimelineConfig::default()).unwrap();
        let slot = |id: &str| timeline.get(&id.into()).unwrap().color_slot();

        assert_eq!(slot("early"), Some(0));
        assert_eq!(slot("k1"), Some(0));
        assert_eq!(slot("k2"), Some(0));
        assert_eq!(slot("solo"), None);
        assert_eq!(slot("late"), None);
    }

    #[test]
    fn descendants_are_contiguous() {
        let records = vec![
            Record::root("r", 0, 100, "r"),
            Record::child("a", "r", 1, 2, "a"),
            Record::child("a1", "a", 1, 2, "a1"),
            Record::child("b", "r", 3, 4, "b"),
            Record::root("s", 200, 300, "s"),
        ];
        let timeline = Timeline::build(records, &config(RootOrder::Input)).unwrap();

        assert_eq!(timeline.descendants(0), 1..4);
        assert_eq!(timeline.descendants(1), 2..3);
        assert_eq!(timeline.descendants(3), 4..4);
        assert_eq!(timeline.descendants(4), 5..5);
    }

    #[test]
    fn backwards_span_fails_construction() {
        let records = vec![Record::root("r", 10, 5, "r")];
        assert!(matches!(
            Timeline::build(records, &TimelineConfig::default()),
            Err(TimelineError::InvalidSpan(_))
        ));
    }

    #[test]
    fn promoted_orphan_becomes_level_zero() {
        let records = vec![
            Record::root("r", 0, 10, "r"),
            Record::child("o", "ghost", 5, 6, "orphan"),
        ];
        let cfg = TimelineConfig {
            orphan_policy: OrphanPolicy::PromoteToRoot,
            ..Default::default()
        };
        let timeline = Timeline::build(records, &cfg).unwrap();
        assert_eq!(timeline.level(&"o".into()).unwrap(), 0);
        assert_eq!(timeline.index().roots(), &[0, 1]);
    }
}
