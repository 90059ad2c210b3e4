//! Property tests for visible-order navigation.

use proptest::prelude::*;

use crate::strategy::{build, edits};

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: walking next from the first visible bullet visits the visible list in order.
    #[test]
    fn property_next_walk_matches_visible_order(edits in edits()) {
        let outline = build(&edits);
        let visible = outline.visible_within(None);

        let mut walked = Vec::new();
        let mut cursor = visible.first().copied();
        while let Some(id) = cursor {
            walked.push(id);
            prop_assert!(walked.len() <= visible.len(), "walk does not terminate");
            cursor = outline.next_visible(id);
        }
        prop_assert_eq!(walked, visible);
    }

    /// PROPERTY: previous undoes next between visible bullets.
    #[test]
    fn property_previous_inverts_next(edits in edits()) {
        let outline = build(&edits);
        for id in outline.visible_within(None) {
            if let Some(next) = outline.next_visible(id) {
                prop_assert_eq!(outline.previous_visible(next), Some(id));
            }
        }
    }

    /// PROPERTY: navigation from any bullet lands on a visible bullet.
    #[test]
    fn property_targets_are_visible(edits in edits()) {
        let outline = build(&edits);
        for node in outline.iter() {
            for target in [outline.next_visible(node.id), outline.previous_visible(node.id)]
                .into_iter()
                .flatten()
            {
                prop_assert!(outline.is_visible_within(None, target));
            }
        }
    }
}
