//! Expansion-aware focus movement.
//!
//! Visible order is pre-order depth-first, descending only into expanded
//! bullets. A scope (the zoom root) limits movement to its descendants; the
//! scope itself is never a target and its children count as shown even when
//! it is collapsed.

use tracing::instrument;

use crate::domain::arena::Outline;
use crate::domain::entities::BulletId;

impl Outline {
    /// Next visible bullet after `current` in the whole outline.
    pub fn next_visible(&self, current: BulletId) -> Option<BulletId> {
        self.next_visible_within(None, current)
    }

    /// Previous visible bullet before `current` in the whole outline.
    pub fn previous_visible(&self, current: BulletId) -> Option<BulletId> {
        self.previous_visible_within(None, current)
    }

    #[instrument(level = "trace", skip(self))]
    pub fn next_visible_within(
        &self,
        scope: Option<BulletId>,
        current: BulletId,
    ) -> Option<BulletId> {
        if Some(current) == scope {
            return self.children_of(scope)?.first().copied();
        }
        let anchor = self.visible_anchor(scope, current)?;
        let node = self.find_by_id(anchor)?;
        if node.shows_children() {
            return node.children.first().copied();
        }

        // climb until some bullet on the way has a following sibling
        let mut cursor = anchor;
        loop {
            let parent = self.find_by_id(cursor)?.parent_id;
            let siblings = self.children_of(parent)?;
            let position = siblings.iter().position(|&id| id == cursor)?;
            if let Some(&following) = siblings.get(position + 1) {
                return Some(following);
            }
            if parent == scope {
                return None;
            }
            cursor = parent?;
        }
    }

    #[instrument(level = "trace", skip(self))]
    pub fn previous_visible_within(
        &self,
        scope: Option<BulletId>,
        current: BulletId,
    ) -> Option<BulletId> {
        if Some(current) == scope {
            return None;
        }
        let anchor = self.visible_anchor(scope, current)?;
        if anchor != current {
            // hidden bullet: its collapsed ancestor is the closest thing above
            return Some(anchor);
        }

        let parent = self.find_by_id(current)?.parent_id;
        let siblings = self.children_of(parent)?;
        match siblings.iter().position(|&id| id == current)? {
            0 if parent == scope => None,
            0 => parent,
            p => Some(self.last_visible_descendant(siblings[p - 1])),
        }
    }

    /// Deepest, last visible bullet under `id`, or `id` itself.
    pub fn last_visible_descendant(&self, id: BulletId) -> BulletId {
        let mut cursor = id;
        while let Some(&last) = self
            .find_by_id(cursor)
            .filter(|node| node.shows_children())
            .and_then(|node| node.children.last())
        {
            cursor = last;
        }
        cursor
    }

    /// All bullets a reader would see below `scope`, in display order.
    pub fn visible_within(&self, scope: Option<BulletId>) -> Vec<BulletId> {
        let mut result = Vec::new();
        let mut stack: Vec<BulletId> = self
            .children_of(scope)
            .map(|children| children.iter().rev().copied().collect())
            .unwrap_or_default();
        while let Some(id) = stack.pop() {
            let Some(node) = self.find_by_id(id) else {
                continue;
            };
            result.push(id);
            if node.shows_children() {
                stack.extend(node.children.iter().rev().copied());
            }
        }
        result
    }

    /// True if `id` lies under `scope` without a collapsed bullet in between.
    pub fn is_visible_within(&self, scope: Option<BulletId>, id: BulletId) -> bool {
        self.visible_anchor(scope, id) == Some(id)
    }

    /// The bullet that stands in for `id` on screen.
    ///
    /// That is `id` itself when visible, otherwise its outermost collapsed
    /// ancestor below `scope`. `None` when `id` is unknown or not under `scope`.
    fn visible_anchor(&self, scope: Option<BulletId>, id: BulletId) -> Option<BulletId> {
        self.find_by_id(id)?;
        let mut chain = self.ancestors(id);
        if let Some(scope) = scope {
            let cut = chain.iter().position(|&ancestor| ancestor == scope)?;
            chain.truncate(cut);
        }
        chain
            .iter()
            .rev()
            .find(|&&ancestor| self.find_by_id(ancestor).is_some_and(|node| !node.expanded))
            .copied()
            .or(Some(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// a[b[d], c], e
    fn sample() -> (Outline, [BulletId; 5]) {
        let (outline, a) = Outline::new().try_append_child(None).unwrap();
        let (outline, b) = outline.try_append_child(Some(a)).unwrap();
        let (outline, c) = outline.try_insert_after(b).unwrap();
        let (outline, d) = outline.try_append_child(Some(b)).unwrap();
        let (outline, e) = outline.try_insert_after(a).unwrap();
        (outline, [a, b, c, d, e])
    }

    #[test]
    fn given_expanded_outline_when_walking_down_then_visits_preorder() {
        let (outline, [a, b, c, d, e]) = sample();
        assert_eq!(outline.next_visible(a), Some(b));
        assert_eq!(outline.next_visible(b), Some(d));
        assert_eq!(outline.next_visible(d), Some(c));
        assert_eq!(outline.next_visible(c), Some(e));
        assert_eq!(outline.next_visible(e), None);
    }

    #[test]
    fn given_expanded_outline_when_walking_up_then_visits_reverse_preorder() {
        let (outline, [a, b, c, d, e]) = sample();
        assert_eq!(outline.previous_visible(e), Some(c));
        assert_eq!(outline.previous_visible(c), Some(d));
        assert_eq!(outline.previous_visible(d), Some(b));
        assert_eq!(outline.previous_visible(b), Some(a));
        assert_eq!(outline.previous_visible(a), None);
    }

    #[test]
    fn given_collapsed_sibling_when_walking_up_then_stops_on_sibling() {
        let (outline, [a, _, _, _, e]) = sample();
        let outline = outline.toggle_expanded(a);
        assert_eq!(outline.previous_visible(e), Some(a));
        assert_eq!(outline.next_visible(a), Some(e));
    }

    #[test]
    fn given_hidden_bullet_when_navigating_then_snaps_to_collapsed_ancestor() {
        let (outline, [_, b, c, d, _]) = sample();
        let outline = outline.toggle_expanded(b);
        assert!(!outline.is_visible_within(None, d));
        assert_eq!(outline.previous_visible(d), Some(b));
        assert_eq!(outline.next_visible(d), Some(c));
    }

    #[test]
    fn given_scope_when_navigating_then_stays_inside() {
        let (outline, [a, b, c, d, _]) = sample();
        let scope = Some(a);
        assert_eq!(outline.previous_visible_within(scope, b), None);
        assert_eq!(outline.next_visible_within(scope, c), None);
        assert_eq!(outline.next_visible_within(scope, d), Some(c));
        assert_eq!(outline.next_visible_within(scope, a), Some(b));
        assert_eq!(outline.visible_within(scope), vec![b, d, c]);
    }

    #[test]
    fn given_bullet_outside_scope_when_navigating_then_returns_none() {
        let (outline, [_, b, _, _, e]) = sample();
        assert_eq!(outline.next_visible_within(Some(b), e), None);
        assert_eq!(outline.previous_visible_within(Some(b), e), None);
    }

    #[test]
    fn given_collapsed_scope_when_listing_then_children_still_show() {
        let (outline, [a, b, c, d, _]) = sample();
        let outline = outline.toggle_expanded(a);
        assert_eq!(outline.visible_within(Some(a)), vec![b, d, c]);
        assert_eq!(outline.next_visible_within(Some(a), d), Some(c));
    }

    #[test]
    fn given_unknown_bullet_when_navigating_then_returns_none() {
        let (outline, _) = sample();
        assert_eq!(outline.next_visible(BulletId(77)), None);
        assert_eq!(outline.previous_visible(BulletId(77)), None);
    }
}
