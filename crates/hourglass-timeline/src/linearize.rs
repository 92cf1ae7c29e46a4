//! Pre-order linearization of a [`TreeIndex`].
//!
//! Walks roots in index order and emits each root followed by its subtree,
//! children in their recorded order. The walk uses an explicit stack, so
//! nesting depth is bounded only by memory.

use hourglass_types::Record;

use crate::index::TreeIndex;
use crate::{Result, TimelineError};

/// Canonical display order plus per-record nesting depth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Linearized {
    /// `order[canonical] = position in the indexed slice`.
    pub order: Vec<usize>,
    /// Nesting depth, indexed by canonical position.
    pub levels: Vec<usize>,
}

/// Produce the canonical order of `records` as indexed by `index`.
///
/// Every record must be reachable from a root. Anything left over sits on or
/// below a parent cycle; the error names a record on the cycle itself, found
/// by following parent links up from the first stranded record.
pub fn linearize(records: &[Record], index: &TreeIndex) -> Result<Linearized> {
    let mut order = Vec::with_capacity(index.len());
    let mut levels = Vec::with_capacity(index.len());
    let mut visited = vec![false; index.len()];

    // Push roots in reverse to emit the first root first
    let mut stack: Vec<(usize, usize)> = index.roots().iter().rev().map(|&r| (r, 0)).collect();

    while let Some((position, level)) = stack.pop() {
        if std::mem::replace(&mut visited[position], true) {
            continue;
        }
        order.push(position);
        levels.push(level);
        for &child in index.children(position).iter().rev() {
            stack.push((child, level + 1));
        }
    }

    if let Some(stranded) = visited.iter().position(|seen| !seen) {
        let member = cycle_member(index, stranded);
        return Err(TimelineError::CyclicAncestry(records[member].id.clone()));
    }

    Ok(Linearized { order, levels })
}

/// Climb parent links from an unreachable record until one repeats.
///
/// An unreachable record never climbs to a root, so the chain must loop.
fn cycle_member(index: &TreeIndex, stranded: usize) -> usize {
    let mut seen = vec![false; index.len()];
    let mut current = stranded;
    while !std::mem::replace(&mut seen[current], true) {
        match index.parent(current) {
            Some(parent) => current = parent,
            None => return stranded,
        }
    }
    current
}
