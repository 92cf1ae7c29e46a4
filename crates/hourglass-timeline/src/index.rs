//! Parent-pointer index over a flat record list.
//!
//! `TreeIndex` is a pure function of the record slice: positions are slice
//! indices, parent links and child lists are positions too, so the tree
//! never holds references into itself. Parent lookups are resolved against
//! the complete id set, so a child listed before its parent is still
//! attached.

use std::collections::HashMap;

use hourglass_types::{Record, RecordId};

use crate::config::OrphanPolicy;
use crate::{Result, TimelineError};

/// Per-record entry of the index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeNode {
    /// Position of the record in the indexed slice.
    pub position: usize,
    /// Positions of direct children, in the order they appear in the slice.
    pub children: Vec<usize>,
    /// Position of the resolved parent, `None` for roots.
    pub parent: Option<usize>,
}

/// Index from record id to position, parent and children.
#[derive(Debug, Clone, Default)]
pub struct TreeIndex {
    positions: HashMap<RecordId, usize>,
    nodes: Vec<TreeNode>,
    roots: Vec<usize>,
}

impl TreeIndex {
    /// Index `records` in slice order.
    ///
    /// Fails on duplicate ids, and on unknown parents unless `orphans` is
    /// [`OrphanPolicy::PromoteToRoot`].
    pub fn build(records: &[Record], orphans: OrphanPolicy) -> Result<Self> {
        let mut positions = HashMap::with_capacity(records.len());
        for (i, record) in records.iter().enumerate() {
            if positions.insert(record.id.clone(), i).is_some() {
                return Err(TimelineError::DuplicateId(record.id.clone()));
            }
        }

        let mut nodes: Vec<TreeNode> = (0..records.len())
            .map(|position| TreeNode { position, ..Default::default() })
            .collect();
        let mut roots = Vec::new();

        for (i, record) in records.iter().enumerate() {
            let Some(parent_id) = &record.parent else {
                roots.push(i);
                continue;
            };
            match positions.get(parent_id) {
                Some(&p) => {
                    nodes[i].parent = Some(p);
                    nodes[p].children.push(i);
                }
                None => match orphans {
                    OrphanPolicy::Reject => {
                        return Err(TimelineError::UnknownParent {
                            id: record.id.clone(),
                            parent: parent_id.clone(),
                        });
                    }
                    OrphanPolicy::PromoteToRoot => {
                        tracing::warn!(id = %record.id, parent = %parent_id, "unknown parent, promoting record to root");
                        roots.push(i);
                    }
                },
            }
        }

        Ok(Self { positions, nodes, roots })
    }

    /// Re-index under a new ordering of the same records.
    ///
    /// `order[new] = old`. Child lists follow the new positions but keep
    /// their relative order, which is what a fresh build over the reordered
    /// slice would produce for a pre-order permutation.
    pub fn permute(&self, order: &[usize]) -> Self {
        let mut rank = vec![0usize; order.len()];
        for (new, &old) in order.iter().enumerate() {
            rank[old] = new;
        }

        let nodes: Vec<TreeNode> = order
            .iter()
            .enumerate()
            .map(|(new, &old)| {
                let node = &self.nodes[old];
                TreeNode {
                    position: new,
                    children: node.children.iter().map(|&c| rank[c]).collect(),
                    parent: node.parent.map(|p| rank[p]),
                }
            })
            .collect();

        let positions = self
            .positions
            .iter()
            .map(|(id, &old)| (id.clone(), rank[old]))
            .collect();

        let mut roots: Vec<usize> = self.roots.iter().map(|&r| rank[r]).collect();
        roots.sort_unstable();

        Self { positions, nodes, roots }
    }

    /// Position of `id`, if indexed.
    pub fn position(&self, id: &RecordId) -> Option<usize> {
        self.positions.get(id).copied()
    }

    /// Entry for `id`, if indexed.
    pub fn get(&self, id: &RecordId) -> Option<&TreeNode> {
        self.position(id).map(|p| &self.nodes[p])
    }

    /// Entry at `position`.
    pub fn node(&self, position: usize) -> &TreeNode {
        &self.nodes[position]
    }

    /// Resolved parent position.
    pub fn parent(&self, position: usize) -> Option<usize> {
        self.nodes[position].parent
    }

    /// Direct children of `position`.
    pub fn children(&self, position: usize) -> &[usize] {
        &self.nodes[position].children
    }

    /// Positions treated as roots, ascending.
    pub fn roots(&self) -> &[usize] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
