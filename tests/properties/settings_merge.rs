//! Property tests for app settings merging.

use std::collections::BTreeMap;

use proptest::prelude::*;

use scdeploy::domain::entities::AppSettings;

fn settings() -> impl Strategy<Value = BTreeMap<String, String>> {
    proptest::collection::btree_map("[A-Za-z_]{1,12}", "[ -~]{0,24}", 0..12)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Merging never drops a key and overrides always win.
    #[test]
    fn property_merge_is_superset_with_overrides_winning(
        current in settings(),
        overrides in settings(),
    ) {
        let base: AppSettings = current.clone().into_iter().collect();
        let patch: AppSettings = overrides.clone().into_iter().collect();

        let merged = base.merged_with(&patch);

        for (key, value) in &overrides {
            prop_assert_eq!(merged.get(key), Some(value.as_str()));
        }
        for (key, value) in &current {
            if !overrides.contains_key(key) {
                prop_assert_eq!(merged.get(key), Some(value.as_str()));
            }
        }
        let union: std::collections::BTreeSet<&String> =
            current.keys().chain(overrides.keys()).collect();
        prop_assert_eq!(merged.len(), union.len());
    }

    /// PROPERTY: Applying the same overrides twice changes nothing more.
    #[test]
    fn property_merge_is_idempotent(
        current in settings(),
        overrides in settings(),
    ) {
        let base: AppSettings = current.into_iter().collect();
        let patch: AppSettings = overrides.into_iter().collect();

        let once = base.merged_with(&patch);
        let twice = once.merged_with(&patch);

        prop_assert_eq!(once, twice);
    }
}
