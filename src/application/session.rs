//! Editor session: outline, focus and zoom as one immutable value.
//!
//! ```text
//! Session + Command  →  apply()  →  Outcome { session, focus_request }
//! ```
//!
//! Every input event becomes exactly one [`Command`]. `apply` never mutates
//! the session it is called on; the caller swaps in the returned one.

use tracing::{debug, instrument};

use crate::application::keymap::{self, Key, Operation};
use crate::domain::{BulletId, Outline, ZoomState};

/// One input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// A structural key pressed on the focused bullet
    Key(Key),
    /// New text of the focused bullet
    Type(String),
    /// Click on a bullet
    Focus(BulletId),
    /// Collapse or expand the focused bullet
    ToggleExpanded,
    /// Make the focused bullet the display root
    ZoomIn,
    /// Go one level back up
    ZoomOut,
}

/// Result of applying a command.
#[derive(Debug, Clone)]
pub struct Outcome {
    pub session: Session,
    /// Bullet the text widget should focus, if focus moved
    pub focus_request: Option<BulletId>,
}

#[derive(Debug, Clone)]
pub struct Session {
    outline: Outline,
    focus: Option<BulletId>,
    zoom: ZoomState,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Fresh session with a single empty, focused bullet.
    pub fn new() -> Self {
        let (outline, first) = Outline::new().append_child(None);
        Self {
            outline,
            focus: first,
            zoom: ZoomState::top_level(),
        }
    }

    /// Session over an existing outline, focused on its first bullet.
    pub fn from_outline(outline: Outline) -> Self {
        let focus = outline.roots().first().copied();
        Self {
            outline,
            focus,
            zoom: ZoomState::top_level(),
        }
    }

    pub fn outline(&self) -> &Outline {
        &self.outline
    }

    pub fn zoom(&self) -> ZoomState {
        self.zoom
    }

    /// Effective zoom root, `None` at top level.
    pub fn zoom_root(&self) -> Option<BulletId> {
        self.zoom.resolve(&self.outline)
    }

    /// Focused bullet, ignoring a focus that no longer exists.
    pub fn focus(&self) -> Option<BulletId> {
        self.focus.filter(|&id| self.outline.contains(id))
    }

    #[instrument(level = "debug", skip(self))]
    pub fn apply(&self, command: Command) -> Outcome {
        match command {
            Command::Key(key) => self.press(key),
            Command::Type(text) => match self.focus() {
                Some(id) => self.unmoved(self.outline.update_content(id, &text)),
                None => self.ignored("type without focus"),
            },
            Command::Focus(id) => {
                if self.outline.is_visible_within(self.zoom_root(), id) {
                    self.focused(self.outline.clone(), Some(id))
                } else {
                    self.ignored("focus target not visible")
                }
            }
            Command::ToggleExpanded => match self.focus() {
                Some(id) => self.unmoved(self.outline.toggle_expanded(id)),
                None => self.ignored("toggle without focus"),
            },
            Command::ZoomIn => self.zoom_in(),
            Command::ZoomOut => self.zoom_out(),
        }
    }

    fn press(&self, key: Key) -> Outcome {
        let scope = self.zoom_root();
        let Some(focus) = self.focus() else {
            return match key {
                Key::Enter => {
                    let (outline, created) = self.outline.append_child(scope);
                    self.focused(outline, created)
                }
                Key::Down => {
                    let first = self.outline.visible_within(scope).first().copied();
                    self.focused(self.outline.clone(), first)
                }
                Key::Up => {
                    let last = self.outline.visible_within(scope).last().copied();
                    self.focused(self.outline.clone(), last)
                }
                _ => self.ignored("key without focus"),
            };
        };

        let operation = keymap::resolve(&self.outline, focus, key);
        debug!(%key, ?operation, %focus, "key resolved");
        match operation {
            Operation::InsertAfter => {
                let (outline, created) = self.outline.insert_after(focus);
                self.focused(outline, created)
            }
            Operation::Indent => self.unmoved(self.outline.indent(focus)),
            Operation::Unindent => {
                let parent = self.outline.find_by_id(focus).and_then(|node| node.parent_id);
                if parent.is_some() && parent == scope {
                    // would leave the zoomed view
                    self.ignored("unindent past zoom root")
                } else {
                    self.unmoved(self.outline.unindent(focus))
                }
            }
            Operation::Delete => {
                let (outline, next_focus) = self.outline.delete_node(focus);
                self.focused(outline, next_focus)
            }
            Operation::FocusPrevious => {
                match self.outline.previous_visible_within(scope, focus) {
                    Some(target) => self.focused(self.outline.clone(), Some(target)),
                    None => self.ignored("already at first visible bullet"),
                }
            }
            Operation::FocusNext => match self.outline.next_visible_within(scope, focus) {
                Some(target) => self.focused(self.outline.clone(), Some(target)),
                None => self.ignored("already at last visible bullet"),
            },
            Operation::MoveUp => self.unmoved(self.outline.move_up(focus)),
            Operation::MoveDown => self.unmoved(self.outline.move_down(focus)),
            Operation::Nothing => self.ignored("key has no structural effect"),
        }
    }

    /// Zoom into the focused bullet; focus lands on its first child,
    /// which is created when there is none.
    fn zoom_in(&self) -> Outcome {
        let Some(target) = self.focus() else {
            return self.ignored("zoom in without focus");
        };
        let zoom = self.zoom.zoom_in(&self.outline, target);
        let first_child = self
            .outline
            .children_of(Some(target))
            .and_then(|children| children.first().copied());
        let (outline, focus) = match first_child {
            Some(child) => (self.outline.clone(), Some(child)),
            None => self.outline.append_child(Some(target)),
        };
        Outcome {
            session: Session {
                outline,
                focus,
                zoom,
            },
            focus_request: focus,
        }
    }

    /// Zoom out one level; focus returns to the bullet that was zoomed.
    fn zoom_out(&self) -> Outcome {
        if self.zoom.focus().is_none() {
            return self.ignored("already at top level");
        }
        let previous = self.zoom_root();
        let zoom = self.zoom.zoom_out(&self.outline);
        let focus = previous.or_else(|| self.outline.roots().first().copied());
        Outcome {
            session: Session {
                outline: self.outline.clone(),
                focus,
                zoom,
            },
            focus_request: focus,
        }
    }

    /// New outline, focus stays where it was.
    fn unmoved(&self, outline: Outline) -> Outcome {
        Outcome {
            session: Session {
                outline,
                focus: self.focus,
                zoom: self.zoom,
            },
            focus_request: None,
        }
    }

    /// New outline and a focus request for `focus`.
    fn focused(&self, outline: Outline, focus: Option<BulletId>) -> Outcome {
        Outcome {
            session: Session {
                outline,
                focus,
                zoom: self.zoom,
            },
            focus_request: focus,
        }
    }

    fn ignored(&self, reason: &str) -> Outcome {
        debug!(reason, "command ignored");
        Outcome {
            session: self.clone(),
            focus_request: None,
        }
    }
}
