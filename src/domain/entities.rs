//! Domain entities: core data structures

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identifier of a bullet.
///
/// Ids are handed out by the owning [`Outline`](crate::domain::Outline) from a
/// monotonic counter and are never reused, not even after a delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BulletId(pub u64);

impl fmt::Display for BulletId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u64> for BulletId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

/// One entry in the outline.
///
/// Children are stored as ids; the nodes themselves live in the arena.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulletNode {
    pub id: BulletId,
    /// Id of the containing bullet, None for the root sequence
    pub parent_id: Option<BulletId>,
    pub content: String,
    /// Nesting depth, 0 for the root sequence
    pub level: usize,
    /// Ordered child ids, insertion order is display order
    pub children: Vec<BulletId>,
    /// Whether children are visible and navigable
    pub expanded: bool,
}

impl BulletNode {
    /// Fresh empty bullet, expanded, without children.
    pub fn new(id: BulletId, parent_id: Option<BulletId>, level: usize) -> Self {
        Self {
            id,
            parent_id,
            content: String::new(),
            level,
            children: Vec::new(),
            expanded: true,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// True when the children are shown (expanded and present).
    pub fn shows_children(&self) -> bool {
        self.expanded && self.has_children()
    }
}

impl fmt::Display for BulletNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.content)
    }
}
