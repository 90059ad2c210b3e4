//! Property tests for the mutation engine.

use proptest::prelude::*;

use crate::strategy::{apply, build, edits, pick};

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: every edit keeps parent links, levels and reachability consistent.
    #[test]
    fn property_edits_keep_outline_valid(edits in edits()) {
        let mut outline = build(&[]);
        for edit in &edits {
            outline = apply(&outline, edit);
            prop_assert!(outline.validate().is_ok(), "after {:?}: {:?}", edit, outline.validate());
        }
    }

    /// PROPERTY: toggling twice restores the bullet exactly.
    #[test]
    fn property_toggle_twice_is_identity(edits in edits(), index in 0usize..32) {
        let outline = build(&edits);
        let id = pick(&outline, index).unwrap();
        let back = outline.toggle_expanded(id).toggle_expanded(id);
        prop_assert_eq!(back.to_snapshot(), outline.to_snapshot());
    }

    /// PROPERTY: delete removes the bullet and exactly its descendants.
    #[test]
    fn property_delete_removes_whole_subtree(edits in edits(), index in 0usize..32) {
        let outline = build(&edits);
        let id = pick(&outline, index).unwrap();
        let removed: Vec<_> = outline.iter_subtree(id).map(|node| node.id).collect();

        let (next, focus) = outline.delete_node(id);

        prop_assert_eq!(next.node_count(), outline.node_count() - removed.len());
        for gone in &removed {
            prop_assert!(!next.contains(*gone));
        }
        if let Some(focus) = focus {
            prop_assert!(next.contains(focus));
        }
    }

    /// PROPERTY: a successful indent followed by unindent restores parent, level and position.
    #[test]
    fn property_indent_then_unindent_round_trips(edits in edits(), index in 0usize..32) {
        let outline = build(&edits);
        let id = pick(&outline, index).unwrap();
        prop_assume!(outline.try_indent(id).is_ok());

        let back = outline.indent(id).unindent(id);
        let (before, after) = (outline.find_by_id(id).unwrap(), back.find_by_id(id).unwrap());
        prop_assert_eq!(after.parent_id, before.parent_id);
        prop_assert_eq!(after.level, before.level);
        prop_assert_eq!(back.position(id), outline.position(id));
        prop_assert_eq!(back.node_count(), outline.node_count());
    }

    /// PROPERTY: edits never touch the outline they were applied to.
    #[test]
    fn property_edits_leave_source_unchanged(edits in edits()) {
        let mut outline = build(&[]);
        for edit in &edits {
            let before = outline.to_snapshot();
            let next = apply(&outline, edit);
            prop_assert_eq!(outline.to_snapshot(), before);
            outline = next;
        }
    }
}
