use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use generational_arena::{Arena, Index};
use tracing::instrument;

use crate::domain::entities::{BulletId, BulletNode};
use crate::domain::error::{DomainError, DomainResult};

/// Arena-backed forest of bullets.
///
/// Nodes live in a generational arena as `Arc<BulletNode>`; public ids map to
/// arena slots. Cloning an `Outline` copies pointers only, and mutation goes
/// through `Arc::make_mut`, so a mutated copy owns fresh nodes exactly on the
/// touched path while every other node stays shared with the original.
///
/// The clone itself is still linear in the bullet count: the slot map and the
/// arena's slot vector are copied, only the nodes behind the `Arc`s are not.
#[derive(Debug, Clone)]
pub struct Outline {
    /// Arena storage for all bullets
    arena: Arena<Arc<BulletNode>>,
    /// Stable id to arena slot
    slots: HashMap<BulletId, Index>,
    /// Top-level sequence in display order
    roots: Vec<BulletId>,
    /// Next id to hand out, monotonic
    next_id: u64,
}

impl Default for Outline {
    fn default() -> Self {
        Self::new()
    }
}

impl Outline {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            slots: HashMap::new(),
            roots: Vec::new(),
            next_id: 1,
        }
    }

    #[instrument(level = "trace", skip(self))]
    pub fn find_by_id(&self, id: BulletId) -> Option<&BulletNode> {
        self.node_arc(id).map(Arc::as_ref)
    }

    pub fn contains(&self, id: BulletId) -> bool {
        self.slots.contains_key(&id)
    }

    pub fn roots(&self) -> &[BulletId] {
        &self.roots
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn node_count(&self) -> usize {
        self.slots.len()
    }

    /// Children of `parent`, or the root sequence for `None`.
    ///
    /// Returns `None` when `parent` is not in the outline.
    pub fn children_of(&self, parent: Option<BulletId>) -> Option<&[BulletId]> {
        match parent {
            None => Some(&self.roots),
            Some(id) => self.find_by_id(id).map(|node| node.children.as_slice()),
        }
    }

    /// Parent of `id`; `None` for a top-level or unknown bullet.
    pub fn parent_of(&self, id: BulletId) -> Option<BulletId> {
        self.find_by_id(id)?.parent_id
    }

    /// The sibling list that contains `id`.
    pub fn siblings(&self, id: BulletId) -> Option<&[BulletId]> {
        let node = self.find_by_id(id)?;
        self.children_of(node.parent_id)
    }

    /// Position of `id` within its sibling list.
    pub fn position(&self, id: BulletId) -> Option<usize> {
        self.siblings(id)?.iter().position(|&sibling| sibling == id)
    }

    /// Ancestors of `id`, nearest first.
    pub fn ancestors(&self, id: BulletId) -> Vec<BulletId> {
        let mut result = Vec::new();
        let mut current = self.find_by_id(id).and_then(|node| node.parent_id);
        while let Some(parent) = current {
            // a corrupt parent chain must not loop forever
            if result.len() > self.node_count() {
                break;
            }
            result.push(parent);
            current = self.find_by_id(parent).and_then(|node| node.parent_id);
        }
        result
    }

    /// True if `candidate` sits somewhere below `ancestor`.
    ///
    /// A node is not its own descendant.
    #[instrument(level = "trace", skip(self))]
    pub fn is_descendant(&self, ancestor: BulletId, candidate: BulletId) -> bool {
        self.ancestors(candidate).contains(&ancestor)
    }

    /// Number of nodes below `id` (not counting `id` itself).
    pub fn descendant_count(&self, id: BulletId) -> usize {
        self.iter_subtree(id).count().saturating_sub(1)
    }

    /// Maximum nesting depth; 0 for an empty outline, 1 for a flat list.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        self.iter().map(|node| node.level + 1).max().unwrap_or(0)
    }

    /// Pre-order traversal over the whole forest, ignoring expansion.
    pub fn iter(&self) -> OutlineIterator<'_> {
        OutlineIterator::new(self, self.roots.iter().rev().copied().collect())
    }

    /// Pre-order traversal of `id` and everything below it.
    pub fn iter_subtree(&self, id: BulletId) -> OutlineIterator<'_> {
        let stack = if self.contains(id) { vec![id] } else { Vec::new() };
        OutlineIterator::new(self, stack)
    }

    /// Check every structural invariant.
    ///
    /// Walks the forest from the roots and verifies parent links, levels,
    /// id uniqueness and that no slot is unreachable.
    #[instrument(level = "debug", skip(self))]
    pub fn validate(&self) -> DomainResult<()> {
        let mut seen: HashSet<BulletId> = HashSet::with_capacity(self.node_count());
        let mut stack: Vec<(BulletId, Option<BulletId>, usize)> = self
            .roots
            .iter()
            .rev()
            .map(|&id| (id, None, 0))
            .collect();

        while let Some((id, expected_parent, expected_level)) = stack.pop() {
            let node = self.find_by_id(id).ok_or(DomainError::NotFound(id))?;
            if !seen.insert(id) {
                return Err(violation(id, "bullet reachable twice"));
            }
            if node.id != id {
                return Err(violation(id, format!("slot holds bullet {}", node.id)));
            }
            if node.parent_id != expected_parent {
                return Err(violation(
                    id,
                    format!(
                        "parent_id is {:?}, container is {:?}",
                        node.parent_id, expected_parent
                    ),
                ));
            }
            if node.level != expected_level {
                return Err(violation(
                    id,
                    format!("level is {}, depth is {}", node.level, expected_level),
                ));
            }
            for &child in node.children.iter().rev() {
                stack.push((child, Some(id), expected_level + 1));
            }
        }

        if seen.len() != self.node_count() {
            let orphan = self
                .slots
                .keys()
                .find(|id| !seen.contains(id))
                .copied()
                .unwrap_or(BulletId(0));
            return Err(violation(orphan, "bullet not reachable from the roots"));
        }
        if let Some(&max) = self.slots.keys().max() {
            if max.0 >= self.next_id {
                return Err(violation(max, "id not below the id counter"));
            }
        }
        Ok(())
    }

    // ---- crate-internal building blocks used by the mutation engine ----

    pub(crate) fn node_arc(&self, id: BulletId) -> Option<&Arc<BulletNode>> {
        let idx = self.slots.get(&id)?;
        self.arena.get(*idx)
    }

    /// Mutable access; copies the node first if it is shared with another outline.
    pub(crate) fn node_mut(&mut self, id: BulletId) -> Option<&mut BulletNode> {
        let idx = *self.slots.get(&id)?;
        self.arena.get_mut(idx).map(Arc::make_mut)
    }

    /// Mutable sibling list of `parent` (root sequence for `None`).
    pub(crate) fn container_mut(&mut self, parent: Option<BulletId>) -> Option<&mut Vec<BulletId>> {
        match parent {
            None => Some(&mut self.roots),
            Some(id) => self.node_mut(id).map(|node| &mut node.children),
        }
    }

    /// Hand out the next id; `u64::MAX` is never used so the counter cannot wrap.
    pub(crate) fn allocate_id(&mut self) -> DomainResult<BulletId> {
        let id = BulletId(self.next_id);
        self.next_id = self
            .next_id
            .checked_add(1)
            .ok_or(DomainError::IdsExhausted)?;
        Ok(id)
    }

    /// Store a node in the arena without linking it into any container.
    pub(crate) fn register(&mut self, node: BulletNode) -> DomainResult<()> {
        let id = node.id;
        if id.0 >= self.next_id {
            self.next_id = id.0.checked_add(1).ok_or(DomainError::IdsExhausted)?;
        }
        let idx = self.arena.insert(Arc::new(node));
        self.slots.insert(id, idx);
        Ok(())
    }

    /// Drop `id` and its whole subtree from the arena; returns the number removed.
    ///
    /// The caller is responsible for unlinking `id` from its container.
    pub(crate) fn unregister_subtree(&mut self, id: BulletId) -> usize {
        let doomed: Vec<BulletId> = self.iter_subtree(id).map(|node| node.id).collect();
        for id in &doomed {
            if let Some(idx) = self.slots.remove(id) {
                self.arena.remove(idx);
            }
        }
        doomed.len()
    }

    /// Set `id` to `level` and shift every descendant by the same amount.
    pub(crate) fn relevel_subtree(&mut self, id: BulletId, level: usize) {
        let mut stack = vec![(id, level)];
        while let Some((current, level)) = stack.pop() {
            let Some(node) = self.node_mut(current) else {
                continue;
            };
            node.level = level;
            stack.extend(node.children.iter().map(|&child| (child, level + 1)));
        }
    }
}

fn violation(id: BulletId, message: impl Into<String>) -> DomainError {
    DomainError::InvariantViolation {
        id,
        message: message.into(),
    }
}

pub struct OutlineIterator<'a> {
    outline: &'a Outline,
    stack: Vec<BulletId>,
}

impl<'a> OutlineIterator<'a> {
    fn new(outline: &'a Outline, stack: Vec<BulletId>) -> Self {
        Self { outline, stack }
    }
}

impl<'a> Iterator for OutlineIterator<'a> {
    type Item = &'a BulletNode;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current) = self.stack.pop() {
            if let Some(node) = self.outline.find_by_id(current) {
                // Push children in reverse order for top-to-bottom traversal
                self.stack.extend(node.children.iter().rev().copied());
                return Some(node);
            }
        }
        None
    }
}
