//! Scenario: Contract Deployment Fails
//!
//! Journey: The infrastructure comes up but the contract deployer exits
//! without reporting addresses (for example, the account is still locked).
//!
//! Success Criteria:
//! - The run ends `Partial`, not `Failed`
//! - The API app is left untouched: it would point at no contract
//! - The web app still learns the API and RPC endpoints

use scdeploy::application::deploy::StepStatus;
use scdeploy::domain::ports::RunStatus;
use scdeploy::domain::value_objects::{Region, Step};
use scdeploy::infrastructure::JsonParameterStore;
use scdeploy::{DeployOptions, DeployUseCase};

use crate::common::*;

/// SCENARIO: Deployer prints an error and exits non-zero
#[test]
fn scenario_contract_failure_leaves_run_partial() {
    let env = TestEnv::new();
    env.write_project_file("etheriumConsertiumTemplate.json", TEMPLATE);
    env.write_project_file("supplyChainTemplate.json", TEMPLATE);
    env.write_project_file("etheriumConsertiumParameters.json", CONSORTIUM_PARAMETERS);
    env.write_project_file("supplyChainParameters.json", SUPPLYCHAIN_PARAMETERS);

    let use_case = DeployUseCase::new(
        FakePlatform::healthy(),
        FakeContractDeployer::with_output(
            "Compiling SupplyChain.sol...\nError: authentication needed: password or unlock",
            Some(1),
        ),
        JsonParameterStore::new(),
        Box::new(AlwaysReady),
        Box::new(NoSleep),
    );
    let options = DeployOptions::new("0000-1111", "sc-rg", "demo")
        .with_region(Region::parse("eastus"))
        .with_consortium_files(
            env.project_path("etheriumConsertiumTemplate.json"),
            env.project_path("etheriumConsertiumParameters.json"),
        )
        .with_supplychain_files(
            env.project_path("supplyChainTemplate.json"),
            env.project_path("supplyChainParameters.json"),
        )
        .with_readiness(None);

    let result = use_case.execute(&options);

    assert_eq!(result.status(), RunStatus::Partial, "{:?}", result.steps);
    assert!(result.error.is_none());

    match &result.record(Step::DeployContract).unwrap().status {
        StepStatus::Failed { error, fatal } => {
            assert!(!fatal);
            assert!(error.contains("exit code 1"), "error: {}", error);
        }
        other => panic!("unexpected status {:?}", other),
    }
    assert!(matches!(
        result.record(Step::PatchApiSettings).unwrap().status,
        StepStatus::Skipped { .. }
    ));

    let platform = use_case.platform();
    let api = platform.settings_of("sc-api");
    assert_eq!(api.get("ContractAddress"), None);
    assert_eq!(api.get("WEBSITE_NODE_DEFAULT_VERSION"), Some("10.14"));

    let writes = platform.settings_writes.borrow();
    assert_eq!(writes.len(), 1);
    assert_eq!(writes[0].app, "sc-web");

    let web = platform.settings_of("sc-web");
    assert_eq!(web.get("ApiEndpoint"), Some("https://sc-api.azurewebsites.net"));
    assert_eq!(web.get("RpcEndpoint"), Some(RPC_ENDPOINT));
}

/// SCENARIO: Supply-chain template fails; the contract still lands on the node
#[test]
fn scenario_supplychain_failure_still_deploys_contract() {
    let env = TestEnv::new();
    env.write_project_file("etheriumConsertiumTemplate.json", TEMPLATE);
    env.write_project_file("supplyChainTemplate.json", TEMPLATE);
    env.write_project_file("etheriumConsertiumParameters.json", CONSORTIUM_PARAMETERS);

    let use_case = DeployUseCase::new(
        FakePlatform::healthy().failing("demo-supplychain"),
        FakeContractDeployer::succeeding(),
        JsonParameterStore::new(),
        Box::new(AlwaysReady),
        Box::new(NoSleep),
    );
    let options = DeployOptions::new("0000-1111", "sc-rg", "demo")
        .with_region(Region::parse("eastus"))
        .with_consortium_files(
            env.project_path("etheriumConsertiumTemplate.json"),
            env.project_path("etheriumConsertiumParameters.json"),
        )
        .with_supplychain_files(
            env.project_path("supplyChainTemplate.json"),
            env.project_path("supplyChainParameters.json"),
        )
        .with_readiness(None);

    let result = use_case.execute(&options);

    assert_eq!(result.status(), RunStatus::Partial);
    assert!(result.contract.is_some());
    assert_eq!(use_case.contract_deployer().passwords.borrow().len(), 1);
    assert!(use_case.platform().settings_writes.borrow().is_empty());
    assert_eq!(result.failed_count(), 1);
    // rewrite (no file), readiness (disabled) and both settings patches
    assert_eq!(result.skipped_count(), 4);
}
