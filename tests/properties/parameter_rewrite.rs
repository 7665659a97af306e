//! Property tests for the supply-chain parameter rewrite.

use std::path::Path;

use proptest::prelude::*;
use serde_json::{json, Map, Value};

use scdeploy::domain::entities::ParameterFile;
use scdeploy::domain::services::{rewrite_parameters, ParameterKeys};
use scdeploy::domain::value_objects::Secret;

const OWNED: [&str; 3] = ["namePrefix", "ethereumAccountPsswd", "vnetName"];

fn other_parameters() -> impl Strategy<Value = Vec<(String, String)>> {
    proptest::collection::vec(("[a-z][A-Za-z0-9]{0,10}", "[ -~]{0,16}"), 0..6).prop_map(
        |entries| {
            entries
                .into_iter()
                .filter(|(name, _)| !OWNED.contains(&name.as_str()))
                .collect()
        },
    )
}

fn parameter_file(entries: &[(String, Value)]) -> ParameterFile {
    let mut params = Map::new();
    for (name, value) in entries {
        params.insert(name.clone(), json!({ "value": value, "metadata": { "n": name } }));
    }
    let doc = json!({
        "$schema": "https://schema.management.azure.com/schemas/2015-01-01/deploymentParameters.json#",
        "contentVersion": "1.0.0.0",
        "parameters": params,
    });
    ParameterFile::from_json(&doc.to_string(), Path::new("params.json")).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 96,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: The rewrite only ever touches its three parameters.
    #[test]
    fn property_rewrite_touches_only_owned_keys(
        others in other_parameters(),
        prefix in proptest::option::of("[a-z]{1,8}"),
        file_password in proptest::option::of("[ -~]{1,16}"),
        password in "[ -~]{1,16}",
        vnet in proptest::option::of("[a-z\\-]{1,12}"),
    ) {
        let mut source_entries = Vec::new();
        if let Some(p) = &prefix {
            source_entries.push(("namePrefix".to_string(), json!(p)));
        }
        if let Some(p) = &file_password {
            source_entries.push(("ethereumAccountPsswd".to_string(), json!(p)));
        }
        let source = parameter_file(&source_entries);

        let mut target_entries: Vec<(String, Value)> = others
            .iter()
            .map(|(k, v)| (k.clone(), json!(v)))
            .collect();
        target_entries.push(("namePrefix".to_string(), json!("")));
        let original = parameter_file(&target_entries);
        let mut target = original.clone();

        let changed = rewrite_parameters(
            &source,
            &mut target,
            &Secret::new(password.clone()),
            vnet.as_deref(),
            &ParameterKeys::default(),
        );

        for name in &changed {
            prop_assert!(OWNED.contains(&name.as_str()), "unexpected change: {}", name);
        }
        for (name, _) in &others {
            prop_assert_eq!(
                &target.as_value()["parameters"][name],
                &original.as_value()["parameters"][name]
            );
        }
        prop_assert_eq!(
            target.value("namePrefix"),
            Some(&prefix.map(Value::String).unwrap_or(Value::Null))
        );
        prop_assert_eq!(target.str_value("ethereumAccountPsswd"), Some(password.as_str()));
        prop_assert_eq!(
            target.value("vnetName"),
            Some(&vnet.map(Value::String).unwrap_or(Value::Null))
        );
        prop_assert_eq!(&target.as_value()["contentVersion"], &json!("1.0.0.0"));
    }

    /// PROPERTY: Rewriting twice with the same inputs reports no changes.
    #[test]
    fn property_rewrite_is_idempotent(
        others in other_parameters(),
        vnet in proptest::option::of("[a-z\\-]{1,12}"),
    ) {
        let source = parameter_file(&[
            ("namePrefix".to_string(), json!("sc")),
            ("ethereumAccountPsswd".to_string(), json!("pw")),
        ]);
        let entries: Vec<(String, Value)> =
            others.iter().map(|(k, v)| (k.clone(), json!(v))).collect();
        let mut target = parameter_file(&entries);
        let keys = ParameterKeys::default();
        let password = Secret::new("pw");

        rewrite_parameters(&source, &mut target, &password, vnet.as_deref(), &keys);
        let snapshot = target.clone();
        let changed = rewrite_parameters(&source, &mut target, &password, vnet.as_deref(), &keys);

        prop_assert!(changed.is_empty());
        prop_assert_eq!(target, snapshot);
    }
}
