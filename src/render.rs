//! Plain-text rendering of the visible outline via `termtree`.

use itertools::Itertools;
use termtree::Tree;
use tracing::instrument;

use crate::application::Session;
use crate::config::Settings;
use crate::domain::{BulletId, Outline, ZoomState};

/// Marker appended to the focused bullet.
const FOCUS_MARKER: &str = "◂";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderStyle {
    pub bullet: String,
    pub collapsed_bullet: String,
    pub placeholder: String,
    pub show_ids: bool,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self::from(&Settings::default())
    }
}

impl From<&Settings> for RenderStyle {
    fn from(settings: &Settings) -> Self {
        Self {
            bullet: settings.bullet.clone(),
            collapsed_bullet: settings.collapsed_bullet.clone(),
            placeholder: settings.placeholder.clone(),
            show_ids: settings.show_ids,
        }
    }
}

pub trait TreeConvert {
    fn to_tree_string(&self, style: &RenderStyle) -> Tree<String>;
}

impl TreeConvert for Outline {
    fn to_tree_string(&self, style: &RenderStyle) -> Tree<String> {
        render(self, ZoomState::top_level(), None, style)
    }
}

impl TreeConvert for Session {
    fn to_tree_string(&self, style: &RenderStyle) -> Tree<String> {
        render(self.outline(), self.zoom(), self.focus(), style)
    }
}

/// Render what a reader sees: the zoom breadcrumb as root, then the
/// displayed bullets with collapsed subtrees folded.
#[instrument(level = "debug", skip(outline, style))]
pub fn render(
    outline: &Outline,
    zoom: ZoomState,
    focus: Option<BulletId>,
    style: &RenderStyle,
) -> Tree<String> {
    let title = match zoom.breadcrumb(outline).as_slice() {
        [] => "Outline".to_string(),
        path => path
            .iter()
            .filter_map(|&id| outline.find_by_id(id))
            .map(|node| text_or(&node.content, "…"))
            .join(" › "),
    };
    let mut tree = Tree::new(title);
    for &id in zoom.display_roots(outline) {
        if let Some(leaf) = build(outline, id, focus, style) {
            tree.push(leaf);
        }
    }
    tree
}

fn build(
    outline: &Outline,
    id: BulletId,
    focus: Option<BulletId>,
    style: &RenderStyle,
) -> Option<Tree<String>> {
    let node = outline.find_by_id(id)?;
    let folded = !node.expanded && node.has_children();

    let mut label = format!(
        "{} {}",
        if folded { &style.collapsed_bullet } else { &style.bullet },
        text_or(&node.content, &style.placeholder)
    );
    if folded {
        label.push_str(&format!(" (+{})", outline.descendant_count(id)));
    }
    if style.show_ids {
        label.push_str(&format!(" [{}]", id));
    }
    if focus == Some(id) {
        label.push(' ');
        label.push_str(FOCUS_MARKER);
    }

    let mut tree = Tree::new(label);
    if node.expanded {
        for &child in &node.children {
            if let Some(leaf) = build(outline, child, focus, style) {
                tree.push(leaf);
            }
        }
    }
    Some(tree)
}

fn text_or<'a>(content: &'a str, fallback: &'a str) -> &'a str {
    if content.is_empty() {
        fallback
    } else {
        content
    }
}
