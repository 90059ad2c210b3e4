//! Nested, serializable form of an outline.
//!
//! The arena is flattened into the shape a reader expects: an array of
//! bullets, each carrying its children inline. `parent_id` and `level` are
//! written for readability and cross-checked on import.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::domain::arena::Outline;
use crate::domain::entities::{BulletId, BulletNode};
use crate::domain::error::{DomainError, DomainResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulletSnapshot {
    pub id: BulletId,
    #[serde(default)]
    pub content: String,
    #[serde(default = "expanded_by_default")]
    pub expanded: bool,
    #[serde(default)]
    pub parent_id: Option<BulletId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<usize>,
    #[serde(default)]
    pub children: Vec<BulletSnapshot>,
}

fn expanded_by_default() -> bool {
    true
}

// Children are released iteratively so dropping a deep snapshot cannot
// exhaust the stack.
impl Drop for BulletSnapshot {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut entry) = pending.pop() {
            pending.append(&mut entry.children);
        }
    }
}

impl Outline {
    /// Nested copy of the whole forest.
    ///
    /// Built bottom-up from the reversed pre-order, so depth costs heap, not stack.
    pub fn to_snapshot(&self) -> Vec<BulletSnapshot> {
        let order: Vec<&BulletNode> = self.iter().collect();
        let mut built: HashMap<BulletId, BulletSnapshot> = HashMap::with_capacity(order.len());
        for node in order.into_iter().rev() {
            let children = node
                .children
                .iter()
                .filter_map(|child| built.remove(child))
                .collect();
            built.insert(
                node.id,
                BulletSnapshot {
                    id: node.id,
                    content: node.content.clone(),
                    expanded: node.expanded,
                    parent_id: node.parent_id,
                    level: Some(node.level),
                    children,
                },
            );
        }
        self.roots()
            .iter()
            .filter_map(|id| built.remove(id))
            .collect()
    }

    /// Rebuild an outline from its nested form.
    ///
    /// Ids are kept as given; the id counter continues after the largest one.
    /// `u64::MAX` is not a valid id.
    #[instrument(level = "debug", skip(snapshot))]
    pub fn from_snapshot(snapshot: &[BulletSnapshot]) -> DomainResult<Outline> {
        let mut outline = Outline::new();
        let mut seen = HashSet::new();
        // (entry, parent, level), popped in pre-order
        let mut pending: Vec<(&BulletSnapshot, Option<BulletId>, usize)> =
            snapshot.iter().rev().map(|entry| (entry, None, 0)).collect();

        while let Some((entry, parent, level)) = pending.pop() {
            check_entry(entry, &mut seen, parent, level)?;
            outline.register(BulletNode {
                id: entry.id,
                parent_id: parent,
                content: entry.content.clone(),
                level,
                children: entry.children.iter().map(|child| child.id).collect(),
                expanded: entry.expanded,
            })?;
            if parent.is_none() {
                if let Some(roots) = outline.container_mut(None) {
                    roots.push(entry.id);
                }
            }
            pending.extend(
                entry
                    .children
                    .iter()
                    .rev()
                    .map(|child| (child, Some(entry.id), level + 1)),
            );
        }

        outline.validate()?;
        Ok(outline)
    }
}

fn check_entry(
    entry: &BulletSnapshot,
    seen: &mut HashSet<BulletId>,
    parent: Option<BulletId>,
    level: usize,
) -> DomainResult<()> {
    if entry.id.0 == u64::MAX {
        return Err(DomainError::InvalidSnapshot(format!(
            "id {} is out of range",
            entry.id
        )));
    }
    if !seen.insert(entry.id) {
        return Err(DomainError::InvalidSnapshot(format!(
            "duplicate id {}",
            entry.id
        )));
    }
    if let Some(declared) = entry.parent_id {
        if Some(declared) != parent {
            return Err(DomainError::InvalidSnapshot(format!(
                "{} declares parent {} but is nested under {:?}",
                entry.id, declared, parent
            )));
        }
    }
    if let Some(declared) = entry.level {
        if declared != level {
            return Err(DomainError::InvalidSnapshot(format!(
                "{} declares level {} but sits at depth {}",
                entry.id, declared, level
            )));
        }
    }
    Ok(())
}
