//! Mutation engine tests on the public `Outline` API.

use rstest::{fixture, rstest};

use flocky::domain::{BulletId, DomainError, Outline};
use flocky::util::testing::{init_test_setup, outline_from_sketch};

// a
// ├── b
// │   └── d
// └── c
// e
#[fixture]
fn sample() -> (Outline, Vec<BulletId>) {
    init_test_setup();
    outline_from_sketch(
        "
a
  b
    d
  c
e
",
    )
}

fn content(outline: &Outline, ids: &[BulletId]) -> Vec<String> {
    ids.iter()
        .map(|&id| outline.find_by_id(id).unwrap().content.clone())
        .collect()
}

// ============================================================
// Walkthrough: insert, indent, unindent, delete
// ============================================================

#[test]
fn given_single_root_when_insert_indent_unindent_delete_then_matches_walkthrough() {
    let (outline, a) = Outline::new().try_append_child(None).unwrap();
    assert_eq!(outline.find_by_id(a).unwrap().level, 0);

    // insert after A → B at level 0
    let (outline, b) = outline.try_insert_after(a).unwrap();
    let node = outline.find_by_id(b).unwrap();
    assert_eq!((node.level, node.parent_id), (0, None));
    assert!(node.expanded);
    assert!(node.is_empty());

    // indent B → child of A
    let outline = outline.try_indent(b).unwrap();
    let node = outline.find_by_id(b).unwrap();
    assert_eq!((node.level, node.parent_id), (1, Some(a)));
    assert_eq!(outline.roots(), &[a]);

    // unindent B → right after A, top level
    let outline = outline.try_unindent(b).unwrap();
    let node = outline.find_by_id(b).unwrap();
    assert_eq!((node.level, node.parent_id), (0, None));
    assert_eq!(outline.roots(), &[a, b]);

    // delete A → only B, focus B
    let (outline, focus) = outline.try_delete_node(a).unwrap();
    assert_eq!(outline.roots(), &[b]);
    assert_eq!(outline.node_count(), 1);
    assert_eq!(focus, Some(b));
    outline.validate().unwrap();
}

// ============================================================
// insert_after
// ============================================================

#[rstest]
fn given_nested_bullet_when_inserting_after_then_new_sibling_follows_it(sample: (Outline, Vec<BulletId>)) {
    let (outline, ids) = sample;
    let (a, b, c) = (ids[0], ids[1], ids[3]);
    let (next, new) = outline.try_insert_after(b).unwrap();

    assert_eq!(next.children_of(Some(a)).unwrap(), &[b, new, c]);
    let node = next.find_by_id(new).unwrap();
    assert_eq!(node.parent_id, Some(a));
    assert_eq!(node.level, 1);
    assert!(!ids.contains(&new));
    next.validate().unwrap();
}

#[rstest]
fn given_many_inserts_then_ids_are_unique_and_increasing(sample: (Outline, Vec<BulletId>)) {
    let (mut outline, ids) = sample;
    let mut last = *ids.iter().max().unwrap();
    for _ in 0..10 {
        let (next, new) = outline.try_insert_after(ids[4]).unwrap();
        assert!(new > last);
        last = new;
        outline = next;
    }
    assert_eq!(outline.node_count(), 15);
}

// ============================================================
// update_content / toggle_expanded
// ============================================================

#[rstest]
fn given_update_when_applied_then_only_content_changes(sample: (Outline, Vec<BulletId>)) {
    let (outline, ids) = sample;
    let b = ids[1];
    let next = outline.update_content(b, "renamed");
    let (old, new) = (outline.find_by_id(b).unwrap(), next.find_by_id(b).unwrap());
    assert_eq!(new.content, "renamed");
    assert_eq!(
        (new.id, new.parent_id, new.level, &new.children, new.expanded),
        (old.id, old.parent_id, old.level, &old.children, old.expanded)
    );
}

#[rstest]
fn given_toggle_twice_then_bullet_is_unchanged(sample: (Outline, Vec<BulletId>)) {
    let (outline, ids) = sample;
    let b = ids[1];
    let once = outline.toggle_expanded(b);
    assert!(!once.find_by_id(b).unwrap().expanded);
    assert_eq!(once.children_of(Some(b)).unwrap(), &[ids[2]]);
    let twice = once.toggle_expanded(b);
    assert_eq!(twice.find_by_id(b), outline.find_by_id(b));
}

// ============================================================
// indent / unindent
// ============================================================

#[rstest]
fn given_bullet_with_children_when_indenting_then_whole_subtree_moves_deeper(sample: (Outline, Vec<BulletId>)) {
    let (outline, ids) = sample;
    let (a, b, d, c) = (ids[0], ids[1], ids[2], ids[3]);
    // c moves under b, then b carries d and c out to the top level and back
    let outline = outline.try_indent(c).unwrap();
    assert_eq!(outline.children_of(Some(b)).unwrap(), &[d, c]);
    assert_eq!(outline.find_by_id(c).unwrap().level, 2);

    let outline = outline.try_unindent(b).unwrap();
    assert_eq!(outline.roots(), &[a, b, ids[4]]);
    assert_eq!(outline.find_by_id(d).unwrap().level, 1);
    assert_eq!(outline.find_by_id(c).unwrap().level, 1);

    let outline = outline.try_indent(b).unwrap();
    assert_eq!(outline.find_by_id(b).unwrap().level, 1);
    assert_eq!(outline.find_by_id(d).unwrap().level, 2);
    assert_eq!(outline.find_by_id(c).unwrap().level, 2);
    outline.validate().unwrap();
}

#[rstest]
#[case::first_root(0)]
#[case::first_child(1)]
#[case::only_grandchild(2)]
fn given_first_in_list_when_indenting_then_invalid_move(sample: (Outline, Vec<BulletId>), #[case] index: usize) {
    let (outline, ids) = sample;
    let err = outline.try_indent(ids[index]).unwrap_err();
    assert!(matches!(err, DomainError::InvalidMove { .. }));
    assert_eq!(outline.indent(ids[index]).to_snapshot(), outline.to_snapshot());
}

#[rstest]
#[case::a(0)]
#[case::e(4)]
fn given_top_level_when_unindenting_then_invalid_move(sample: (Outline, Vec<BulletId>), #[case] index: usize) {
    let (outline, ids) = sample;
    assert!(matches!(
        outline.try_unindent(ids[index]),
        Err(DomainError::InvalidMove { .. })
    ));
}

#[rstest]
fn given_indent_then_unindent_then_level_parent_and_position_restored(sample: (Outline, Vec<BulletId>)) {
    let (outline, ids) = sample;
    let c = ids[3];
    let before = outline.find_by_id(c).unwrap().clone();
    let back = outline.indent(c).unindent(c);
    let after = back.find_by_id(c).unwrap();
    assert_eq!((after.level, after.parent_id), (before.level, before.parent_id));
    assert_eq!(back.position(c), outline.position(c));
}

// ============================================================
// delete_node
// ============================================================

#[rstest]
fn given_parent_when_deleting_then_count_drops_by_subtree_size(sample: (Outline, Vec<BulletId>)) {
    let (outline, ids) = sample;
    let a = ids[0];
    let expected = outline.node_count() - (1 + outline.descendant_count(a));
    let (next, focus) = outline.delete_node(a);
    assert_eq!(next.node_count(), expected);
    assert_eq!(focus, Some(ids[4]));
    for gone in &ids[..4] {
        assert!(next.find_by_id(*gone).is_none());
    }
}

#[rstest]
fn given_second_child_when_deleting_then_focus_on_previous_sibling(sample: (Outline, Vec<BulletId>)) {
    let (outline, ids) = sample;
    let (next, focus) = outline.delete_node(ids[3]);
    assert_eq!(focus, Some(ids[1]));
    assert_eq!(content(&next, next.children_of(Some(ids[0])).unwrap()), vec!["b"]);
}

#[rstest]
fn given_missing_bullet_when_deleting_then_not_found(sample: (Outline, Vec<BulletId>)) {
    let (outline, _) = sample;
    assert_eq!(
        outline.try_delete_node(BulletId(999)).unwrap_err(),
        DomainError::NotFound(BulletId(999))
    );
}

// ============================================================
// reorder
// ============================================================

#[rstest]
fn given_last_root_when_moving_up_then_becomes_first(sample: (Outline, Vec<BulletId>)) {
    let (outline, ids) = sample;
    let next = outline.move_up(ids[4]);
    assert_eq!(content(&next, next.roots()), vec!["e", "a"]);
    next.validate().unwrap();
}
