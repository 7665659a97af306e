//! Scenario: Redeploying Over an Existing Stack
//!
//! Journey: The operator runs the same deployment twice. The second run finds
//! the group and an already rewritten parameter file.
//!
//! Success Criteria:
//! - No resource group is created on the second run
//! - The rewrite reports nothing to change and the file is byte-identical
//! - Settings written by the first run are carried through, not duplicated

use scdeploy::application::deploy::StepStatus;
use scdeploy::domain::ports::RunStatus;
use scdeploy::domain::value_objects::{Region, Step};
use scdeploy::infrastructure::JsonParameterStore;
use scdeploy::{DeployOptions, DeployUseCase};

use crate::common::*;

fn options_for(env: &TestEnv) -> DeployOptions {
    DeployOptions::new("0000-1111", "sc-rg", "demo")
        .with_region(Region::parse("westeurope"))
        .with_consortium_files(
            env.project_path("etheriumConsertiumTemplate.json"),
            env.project_path("etheriumConsertiumParameters.json"),
        )
        .with_supplychain_files(
            env.project_path("supplyChainTemplate.json"),
            env.project_path("supplyChainParameters.json"),
        )
        .with_readiness(None)
}

fn use_case(platform: FakePlatform) -> DeployUseCase<FakePlatform, FakeContractDeployer, JsonParameterStore> {
    DeployUseCase::new(
        platform,
        FakeContractDeployer::succeeding(),
        JsonParameterStore::new(),
        Box::new(AlwaysReady),
        Box::new(NoSleep),
    )
}

/// SCENARIO: Second run against the same project directory
#[test]
fn scenario_second_run_changes_nothing_on_disk() {
    let env = TestEnv::new();
    env.write_project_file("etheriumConsertiumTemplate.json", TEMPLATE);
    env.write_project_file("supplyChainTemplate.json", TEMPLATE);
    env.write_project_file("etheriumConsertiumParameters.json", CONSORTIUM_PARAMETERS);
    env.write_project_file("supplyChainParameters.json", SUPPLYCHAIN_PARAMETERS);
    let options = options_for(&env);

    // First run: rewrites the file
    let first = use_case(FakePlatform::healthy()).execute(&options);
    assert_eq!(first.status(), RunStatus::Success);
    let after_first = env.read_project_file("supplyChainParameters.json");

    // Second run: group already there
    let mut platform = FakePlatform::healthy();
    platform.group_exists = true;
    let second_run = use_case(platform);
    let second = second_run.execute(&options);

    assert_eq!(second.status(), RunStatus::Success, "{:?}", second.steps);
    assert!(second_run.platform().created_groups.borrow().is_empty());

    match &second.record(Step::EnsureResourceGroup).unwrap().status {
        StepStatus::Completed { detail } => assert!(detail.contains("already exists")),
        other => panic!("unexpected status {:?}", other),
    }
    match &second.record(Step::RewriteParameters).unwrap().status {
        StepStatus::Completed { detail } => {
            assert!(detail.contains("already up to date"), "detail: {}", detail)
        }
        other => panic!("unexpected status {:?}", other),
    }

    assert_eq!(env.read_project_file("supplyChainParameters.json"), after_first);
}

/// SCENARIO: Existing app settings survive a redeploy
#[test]
fn scenario_redeploy_keeps_unrelated_settings() {
    let env = TestEnv::new();
    env.write_project_file("etheriumConsertiumTemplate.json", TEMPLATE);
    env.write_project_file("supplyChainTemplate.json", TEMPLATE);
    env.write_project_file("etheriumConsertiumParameters.json", CONSORTIUM_PARAMETERS);

    let mut platform = FakePlatform::healthy();
    platform.group_exists = true;
    platform.settings.borrow_mut().insert(
        "sc-web".to_string(),
        scdeploy::domain::entities::AppSettings::new()
            .with("RpcEndpoint", "http://stale:8545")
            .with("FeatureFlag", "on"),
    );
    let run = use_case(platform);

    let result = run.execute(&options_for(&env));

    assert_eq!(result.status(), RunStatus::Success, "{:?}", result.steps);
    let web = run.platform().settings_of("sc-web");
    assert_eq!(web.get("FeatureFlag"), Some("on"));
    assert_eq!(web.get("RpcEndpoint"), Some(RPC_ENDPOINT));
    assert_eq!(web.len(), 3);
}
