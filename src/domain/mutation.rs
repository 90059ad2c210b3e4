//! Structural edits on an [`Outline`].
//!
//! Every operation borrows the current outline and returns a new one; the
//! input is never touched. Each edit exists twice:
//!
//! - `try_*` returns a [`DomainResult`] so callers can see why an edit was
//!   rejected (`NotFound`, `InvalidMove`, `CycleRisk`, `IdsExhausted`).
//! - the plain form never fails: a rejected edit is logged at debug level and
//!   yields an unchanged copy of the outline.
//!
//! Edits run on a clone; a failed edit never hands a half-built structure
//! back to the caller.

use tracing::{debug, instrument};

use crate::domain::arena::Outline;
use crate::domain::entities::{BulletId, BulletNode};
use crate::domain::error::{DomainError, DomainResult};

/// Where a relocated bullet lands inside its new container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placement {
    /// Append as last element
    End,
    /// Directly after the given sibling
    After(BulletId),
}

impl Outline {
    /// Insert a new empty bullet directly after `after`, at the same level.
    #[instrument(level = "trace", skip(self))]
    pub fn try_insert_after(&self, after: BulletId) -> DomainResult<(Outline, BulletId)> {
        let anchor = self.find_by_id(after).ok_or(DomainError::NotFound(after))?;
        let (parent, level) = (anchor.parent_id, anchor.level);
        let position = self.position(after).ok_or(DomainError::NotFound(after))?;

        let mut next = self.clone();
        let id = next.allocate_id()?;
        next.register(BulletNode::new(id, parent, level))?;
        next.container_mut(parent)
            .ok_or(DomainError::NotFound(after))?
            .insert(position + 1, id);
        Ok((next, id))
    }

    pub fn insert_after(&self, after: BulletId) -> (Outline, Option<BulletId>) {
        match self.try_insert_after(after) {
            Ok((next, id)) => (next, Some(id)),
            Err(e) => (self.rejected("insert_after", e), None),
        }
    }

    /// Append a new empty bullet to the children of `parent`, or to the root
    /// sequence for `None`.
    #[instrument(level = "trace", skip(self))]
    pub fn try_append_child(&self, parent: Option<BulletId>) -> DomainResult<(Outline, BulletId)> {
        let level = match parent {
            None => 0,
            Some(p) => self.find_by_id(p).ok_or(DomainError::NotFound(p))?.level + 1,
        };

        let mut next = self.clone();
        let id = next.allocate_id()?;
        next.register(BulletNode::new(id, parent, level))?;
        if let Some(container) = next.container_mut(parent) {
            container.push(id);
        }
        if let Some(p) = parent {
            // the new bullet must be visible
            if let Some(node) = next.node_mut(p) {
                node.expanded = true;
            }
        }
        Ok((next, id))
    }

    pub fn append_child(&self, parent: Option<BulletId>) -> (Outline, Option<BulletId>) {
        match self.try_append_child(parent) {
            Ok((next, id)) => (next, Some(id)),
            Err(e) => (self.rejected("append_child", e), None),
        }
    }

    /// Replace the text of `id`.
    #[instrument(level = "trace", skip(self, text))]
    pub fn try_update_content(&self, id: BulletId, text: &str) -> DomainResult<Outline> {
        if !self.contains(id) {
            return Err(DomainError::NotFound(id));
        }
        let mut next = self.clone();
        if let Some(node) = next.node_mut(id) {
            node.content = text.to_string();
        }
        Ok(next)
    }

    pub fn update_content(&self, id: BulletId, text: &str) -> Outline {
        self.try_update_content(id, text)
            .unwrap_or_else(|e| self.rejected("update_content", e))
    }

    /// Flip the expansion flag of `id`. Children are kept either way.
    #[instrument(level = "trace", skip(self))]
    pub fn try_toggle_expanded(&self, id: BulletId) -> DomainResult<Outline> {
        if !self.contains(id) {
            return Err(DomainError::NotFound(id));
        }
        let mut next = self.clone();
        if let Some(node) = next.node_mut(id) {
            node.expanded = !node.expanded;
        }
        Ok(next)
    }

    pub fn toggle_expanded(&self, id: BulletId) -> Outline {
        self.try_toggle_expanded(id)
            .unwrap_or_else(|e| self.rejected("toggle_expanded", e))
    }

    /// Make `id` the last child of its preceding sibling.
    ///
    /// The whole moved subtree goes one level deeper. The new parent is
    /// expanded so that `id` stays visible.
    #[instrument(level = "trace", skip(self))]
    pub fn try_indent(&self, id: BulletId) -> DomainResult<Outline> {
        let siblings = self.siblings(id).ok_or(DomainError::NotFound(id))?;
        let position = self.position(id).ok_or(DomainError::NotFound(id))?;
        if position == 0 {
            return Err(DomainError::InvalidMove {
                id,
                reason: "no preceding sibling to indent under",
            });
        }
        let new_parent = siblings[position - 1];

        let mut next = self.clone();
        next.relocate(id, Some(new_parent), Placement::End)?;
        if let Some(parent) = next.node_mut(new_parent) {
            parent.expanded = true;
        }
        Ok(next)
    }

    pub fn indent(&self, id: BulletId) -> Outline {
        self.try_indent(id)
            .unwrap_or_else(|e| self.rejected("indent", e))
    }

    /// Move `id` out of its parent, directly after that parent.
    ///
    /// Bullets that followed `id` stay with the old parent.
    #[instrument(level = "trace", skip(self))]
    pub fn try_unindent(&self, id: BulletId) -> DomainResult<Outline> {
        let node = self.find_by_id(id).ok_or(DomainError::NotFound(id))?;
        let Some(parent) = node.parent_id else {
            return Err(DomainError::InvalidMove {
                id,
                reason: "already at top level",
            });
        };
        let grandparent = self
            .find_by_id(parent)
            .ok_or(DomainError::NotFound(parent))?
            .parent_id;

        let mut next = self.clone();
        next.relocate(id, grandparent, Placement::After(parent))?;
        Ok(next)
    }

    pub fn unindent(&self, id: BulletId) -> Outline {
        self.try_unindent(id)
            .unwrap_or_else(|e| self.rejected("unindent", e))
    }

    /// Remove `id` together with its subtree.
    ///
    /// Returns the bullet that should receive focus: the preceding sibling,
    /// else the new first sibling, else none.
    #[instrument(level = "trace", skip(self))]
    pub fn try_delete_node(&self, id: BulletId) -> DomainResult<(Outline, Option<BulletId>)> {
        let parent = self.find_by_id(id).ok_or(DomainError::NotFound(id))?.parent_id;
        let position = self.position(id).ok_or(DomainError::NotFound(id))?;

        let mut next = self.clone();
        if let Some(container) = next.container_mut(parent) {
            container.remove(position);
        }
        let removed = next.unregister_subtree(id);
        debug!(%id, removed, "deleted subtree");

        let remaining = next.children_of(parent).unwrap_or_default();
        let focus = match position {
            0 => remaining.first().copied(),
            p => remaining.get(p - 1).copied(),
        };
        Ok((next, focus))
    }

    pub fn delete_node(&self, id: BulletId) -> (Outline, Option<BulletId>) {
        match self.try_delete_node(id) {
            Ok(result) => result,
            Err(e) => (self.rejected("delete_node", e), None),
        }
    }

    /// Swap `id` with its preceding sibling.
    #[instrument(level = "trace", skip(self))]
    pub fn try_move_up(&self, id: BulletId) -> DomainResult<Outline> {
        let position = self.position(id).ok_or(DomainError::NotFound(id))?;
        if position == 0 {
            return Err(DomainError::InvalidMove {
                id,
                reason: "already first in its list",
            });
        }
        self.swap_siblings(id, position - 1, position)
    }

    pub fn move_up(&self, id: BulletId) -> Outline {
        self.try_move_up(id)
            .unwrap_or_else(|e| self.rejected("move_up", e))
    }

    /// Swap `id` with its following sibling.
    #[instrument(level = "trace", skip(self))]
    pub fn try_move_down(&self, id: BulletId) -> DomainResult<Outline> {
        let siblings = self.siblings(id).ok_or(DomainError::NotFound(id))?;
        let position = self.position(id).ok_or(DomainError::NotFound(id))?;
        if position + 1 >= siblings.len() {
            return Err(DomainError::InvalidMove {
                id,
                reason: "already last in its list",
            });
        }
        self.swap_siblings(id, position, position + 1)
    }

    pub fn move_down(&self, id: BulletId) -> Outline {
        self.try_move_down(id)
            .unwrap_or_else(|e| self.rejected("move_down", e))
    }

    fn swap_siblings(&self, id: BulletId, a: usize, b: usize) -> DomainResult<Outline> {
        let parent = self.find_by_id(id).ok_or(DomainError::NotFound(id))?.parent_id;
        let mut next = self.clone();
        next.container_mut(parent)
            .ok_or(DomainError::NotFound(id))?
            .swap(a, b);
        Ok(next)
    }

    /// Detach `id` and attach it under `new_parent`, re-leveling the subtree.
    ///
    /// Must only be called on a scratch copy: on error the copy may be
    /// partially modified.
    fn relocate(
        &mut self,
        id: BulletId,
        new_parent: Option<BulletId>,
        placement: Placement,
    ) -> DomainResult<()> {
        let old_parent = self.find_by_id(id).ok_or(DomainError::NotFound(id))?.parent_id;
        let new_level = match new_parent {
            None => 0,
            Some(target) => {
                if target == id || self.is_descendant(id, target) {
                    return Err(DomainError::CycleRisk { id, target });
                }
                self.find_by_id(target)
                    .ok_or(DomainError::NotFound(target))?
                    .level
                    + 1
            }
        };

        self.container_mut(old_parent)
            .ok_or(DomainError::NotFound(id))?
            .retain(|&child| child != id);

        let container = self
            .container_mut(new_parent)
            .ok_or(DomainError::NotFound(id))?;
        let index = match placement {
            Placement::End => container.len(),
            Placement::After(anchor) => container
                .iter()
                .position(|&child| child == anchor)
                .map_or(container.len(), |p| p + 1),
        };
        container.insert(index, id);

        if let Some(node) = self.node_mut(id) {
            node.parent_id = new_parent;
        }
        self.relevel_subtree(id, new_level);
        Ok(())
    }

    fn rejected(&self, op: &str, error: DomainError) -> Outline {
        debug!(op, %error, "edit rejected, outline unchanged");
        self.clone()
    }
}
