//! Zoom: which bullet currently acts as the display root.

use tracing::{debug, instrument};

use crate::domain::arena::Outline;
use crate::domain::entities::BulletId;
use crate::domain::error::{DomainError, DomainResult};

/// Current zoom focus; `None` means the top-level view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ZoomState {
    focus: Option<BulletId>,
}

impl ZoomState {
    pub fn top_level() -> Self {
        Self::default()
    }

    /// Raw zoom focus, possibly stale.
    pub fn focus(&self) -> Option<BulletId> {
        self.focus
    }

    /// Effective zoom root: the focus if it still exists, else top level.
    pub fn resolve(&self, outline: &Outline) -> Option<BulletId> {
        self.focus.filter(|&id| outline.contains(id))
    }

    #[instrument(level = "trace", skip(outline))]
    pub fn try_zoom_in(&self, outline: &Outline, id: BulletId) -> DomainResult<Self> {
        if !outline.contains(id) {
            return Err(DomainError::NotFound(id));
        }
        Ok(Self { focus: Some(id) })
    }

    pub fn zoom_in(&self, outline: &Outline, id: BulletId) -> Self {
        self.try_zoom_in(outline, id).unwrap_or_else(|error| {
            debug!(%error, "zoom in rejected");
            *self
        })
    }

    /// Zoom out to the parent of the zoomed bullet.
    ///
    /// A zoomed bullet that no longer exists resets to the top level.
    #[instrument(level = "trace", skip(outline))]
    pub fn zoom_out(&self, outline: &Outline) -> Self {
        let Some(current) = self.focus else {
            return *self;
        };
        match outline.find_by_id(current) {
            Some(node) => Self {
                focus: node.parent_id,
            },
            None => {
                debug!(%current, "zoomed bullet is gone, back to top level");
                Self::top_level()
            }
        }
    }

    /// The bullets shown at the top of the view.
    pub fn display_roots<'a>(&self, outline: &'a Outline) -> &'a [BulletId] {
        outline
            .children_of(self.resolve(outline))
            .unwrap_or_default()
    }

    /// Path from the top level down to the zoom root, inclusive.
    pub fn breadcrumb(&self, outline: &Outline) -> Vec<BulletId> {
        let Some(root) = self.resolve(outline) else {
            return Vec::new();
        };
        let mut path = outline.ancestors(root);
        path.reverse();
        path.push(root);
        path
    }
}
