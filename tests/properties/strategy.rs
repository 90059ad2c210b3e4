//! Random edit sequences over a small outline.

use proptest::prelude::*;

use flocky::domain::{BulletId, Outline};

/// One edit; `usize` picks a live bullet by pre-order index.
#[derive(Debug, Clone)]
pub enum Edit {
    InsertAfter(usize),
    AppendChild(usize),
    Update(usize, String),
    Toggle(usize),
    Indent(usize),
    Unindent(usize),
    Delete(usize),
    MoveUp(usize),
    MoveDown(usize),
}

pub fn edit() -> impl Strategy<Value = Edit> {
    let pick = 0usize..32;
    prop_oneof![
        3 => pick.clone().prop_map(Edit::InsertAfter),
        2 => pick.clone().prop_map(Edit::AppendChild),
        1 => (pick.clone(), "[a-z ]{0,8}").prop_map(|(i, s)| Edit::Update(i, s)),
        1 => pick.clone().prop_map(Edit::Toggle),
        2 => pick.clone().prop_map(Edit::Indent),
        2 => pick.clone().prop_map(Edit::Unindent),
        1 => pick.clone().prop_map(Edit::Delete),
        1 => pick.clone().prop_map(Edit::MoveUp),
        1 => pick.prop_map(Edit::MoveDown),
    ]
}

pub fn edits() -> impl Strategy<Value = Vec<Edit>> {
    proptest::collection::vec(edit(), 0..40)
}

/// Bullet at pre-order position `index` modulo the bullet count.
pub fn pick(outline: &Outline, index: usize) -> Option<BulletId> {
    let ids: Vec<BulletId> = outline.iter().map(|node| node.id).collect();
    if ids.is_empty() {
        None
    } else {
        Some(ids[index % ids.len()])
    }
}

/// Apply one edit with the lenient operations; an empty outline regrows a root.
pub fn apply(outline: &Outline, edit: &Edit) -> Outline {
    let target = match edit {
        Edit::InsertAfter(i)
        | Edit::AppendChild(i)
        | Edit::Update(i, _)
        | Edit::Toggle(i)
        | Edit::Indent(i)
        | Edit::Unindent(i)
        | Edit::Delete(i)
        | Edit::MoveUp(i)
        | Edit::MoveDown(i) => pick(outline, *i),
    };
    let Some(id) = target else {
        return outline.append_child(None).0;
    };
    match edit {
        Edit::InsertAfter(_) => outline.insert_after(id).0,
        Edit::AppendChild(_) => outline.append_child(Some(id)).0,
        Edit::Update(_, text) => outline.update_content(id, text),
        Edit::Toggle(_) => outline.toggle_expanded(id),
        Edit::Indent(_) => outline.indent(id),
        Edit::Unindent(_) => outline.unindent(id),
        Edit::Delete(_) => outline.delete_node(id).0,
        Edit::MoveUp(_) => outline.move_up(id),
        Edit::MoveDown(_) => outline.move_down(id),
    }
}

/// Outline reached from a single empty root by `edits`, never empty.
pub fn build(edits: &[Edit]) -> Outline {
    let start = Outline::new().append_child(None).0;
    let outline = edits.iter().fold(start, |outline, edit| apply(&outline, edit));
    if outline.is_empty() {
        outline.append_child(None).0
    } else {
        outline
    }
}
