//! Property tests for JSON snapshots.

use proptest::prelude::*;

use flocky::application::{export_json, import_json};

use crate::strategy::{build, edits};

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: export then import reproduces the outline.
    #[test]
    fn property_snapshot_round_trips(edits in edits()) {
        let outline = build(&edits);
        let json = export_json(&outline, false).unwrap();
        let restored = import_json(&json).unwrap();

        prop_assert_eq!(restored.to_snapshot(), outline.to_snapshot());
        prop_assert!(restored.validate().is_ok());
    }
}
