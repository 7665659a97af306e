//! Scenario: First Deployment Into a New Resource Group
//!
//! Journey: An operator deploys the whole stack into a subscription for the
//! first time.
//!
//! Steps:
//! 1. Resource group does not exist, region `eastus` is given
//! 2. Both parameter files sit next to the templates
//! 3. The consortium deploys and reports its RPC endpoint and vnet
//! 4. The supply-chain parameter file is rewritten on disk
//! 5. The contract deploys and both apps get their settings
//!
//! Success Criteria:
//! - Group created in `eastus`
//! - Parameter file on disk carries the shared values, nothing else changed
//! - API and web settings carry the contract and endpoint values

use std::sync::Arc;

use scdeploy::domain::entities::ParameterFile;
use scdeploy::domain::ports::{NoopEventSink, ParameterStore, RunStatus};
use scdeploy::domain::value_objects::Region;
use scdeploy::infrastructure::JsonParameterStore;
use scdeploy::{DeployOptions, DeployUseCase};

use crate::common::*;

fn options_for(env: &TestEnv) -> DeployOptions {
    DeployOptions::new("0000-1111", "sc-rg", "demo")
        .with_region(Region::parse("eastus"))
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

fn project_with_all_files() -> TestEnv {
    let env = TestEnv::new();
    env.write_project_file("etheriumConsertiumTemplate.json", TEMPLATE);
    env.write_project_file("supplyChainTemplate.json", TEMPLATE);
    env.write_project_file("etheriumConsertiumParameters.json", CONSORTIUM_PARAMETERS);
    env.write_project_file("supplyChainParameters.json", SUPPLYCHAIN_PARAMETERS);
    env
}

/// SCENARIO: Everything present, group absent, region given
#[test]
fn scenario_first_deployment_complete_journey() {
    let env = project_with_all_files();
    let use_case = DeployUseCase::new(
        FakePlatform::healthy(),
        FakeContractDeployer::succeeding(),
        JsonParameterStore::new(),
        Box::new(AlwaysReady),
        Box::new(NoSleep),
    );

    let result = use_case.execute_with_events(&options_for(&env), Arc::new(NoopEventSink));

    assert_eq!(result.status(), RunStatus::Success, "{:?}", result.steps);

    // Step 1: group created in the requested region
    let platform = use_case.platform();
    let created = platform.created_groups.borrow();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].0, "sc-rg");
    assert_eq!(created[0].1.as_str(), "eastus");

    // Step 2/3: both deployments went out with their parameter files
    let deployments = platform.deployments.borrow();
    assert_eq!(deployments.len(), 2);
    assert_eq!(deployments[0].name, "demo-consortium");
    assert_eq!(
        deployments[0].parameters.as_deref(),
        Some(env.project_path("etheriumConsertiumParameters.json").as_path())
    );
    assert_eq!(deployments[1].name, "demo-supplychain");
    assert!(deployments[1].parameters.is_some());

    // Step 4: the parameter file on disk was rewritten
    let rewritten = JsonParameterStore::new()
        .load(&env.project_path("supplyChainParameters.json"))
        .unwrap();
    assert_eq!(rewritten.str_value("namePrefix"), Some("sc"));
    assert_eq!(rewritten.str_value("ethereumAccountPsswd"), Some(ACCOUNT_PASSWORD));
    assert_eq!(rewritten.str_value("vnetName"), Some("sc-vnet"));
    assert_eq!(rewritten.str_value("appServiceSku"), Some("S1"));
    assert_eq!(
        rewritten.as_value()["parameters"]["appServiceSku"]["metadata"]["description"],
        "App service plan tier"
    );
    assert!(env.project_path("supplyChainParameters.json.lock").is_file());

    // Step 5: settings carry the parsed contract addresses
    let api = platform.settings_of("sc-api");
    assert_eq!(api.get("ContractAddress"), Some("0xBB"));
    assert_eq!(api.get("AccountAddress"), Some("0xAA"));
    assert_eq!(api.get("RpcEndpoint"), Some(RPC_ENDPOINT));
    assert_eq!(api.get("WEBSITE_NODE_DEFAULT_VERSION"), Some("10.14"));
    assert!(api
        .get("StorageConnectionString")
        .unwrap()
        .contains("AccountName=scstore"));

    let web = platform.settings_of("sc-web");
    assert_eq!(web.get("ApiEndpoint"), Some("https://sc-api.azurewebsites.net"));
    assert_eq!(web.get("RpcEndpoint"), Some(RPC_ENDPOINT));
}

/// SCENARIO: Rewritten file keeps the layout operators expect
#[test]
fn scenario_rewritten_file_is_pretty_printed_in_original_order() {
    let env = project_with_all_files();
    let use_case = DeployUseCase::new(
        FakePlatform::healthy(),
        FakeContractDeployer::succeeding(),
        JsonParameterStore::new(),
        Box::new(AlwaysReady),
        Box::new(NoSleep),
    );

    use_case.execute(&options_for(&env));

    let content = env.read_project_file("supplyChainParameters.json");
    let expected = SUPPLYCHAIN_PARAMETERS
        .replacen("\"namePrefix\": {\n      \"value\": \"\"", "\"namePrefix\": {\n      \"value\": \"sc\"", 1)
        .replacen(
            "\"ethereumAccountPsswd\": {\n      \"value\": \"\"",
            "\"ethereumAccountPsswd\": {\n      \"value\": \"S3cret!pass\"",
            1,
        )
        .replacen("\"vnetName\": {\n      \"value\": \"\"", "\"vnetName\": {\n      \"value\": \"sc-vnet\"", 1);
    assert_eq!(content, expected);

    let reparsed =
        ParameterFile::from_json(&content, &env.project_path("supplyChainParameters.json")).unwrap();
    assert_eq!(
        reparsed.names(),
        vec!["namePrefix", "ethereumAccountPsswd", "vnetName", "appServiceSku"]
    );
}

/// SCENARIO: No parameter files at all, password given on the command line
#[test]
fn scenario_first_deployment_without_parameter_files() {
    let env = TestEnv::new();
    env.write_project_file("etheriumConsertiumTemplate.json", TEMPLATE);
    env.write_project_file("supplyChainTemplate.json", TEMPLATE);

    let use_case = DeployUseCase::new(
        FakePlatform::healthy(),
        FakeContractDeployer::succeeding(),
        JsonParameterStore::new(),
        Box::new(AlwaysReady),
        Box::new(NoSleep),
    );
    let options = options_for(&env)
        .with_account_password(Some(scdeploy::domain::value_objects::Secret::new("pw")));

    let result = use_case.execute(&options);

    assert_eq!(result.status(), RunStatus::Success, "{:?}", result.steps);
    let deployments = use_case.platform().deployments.borrow();
    assert!(deployments.iter().all(|d| d.parameters.is_none()));
    assert!(!env.project_path("supplyChainParameters.json").exists());
    assert_eq!(
        *use_case.contract_deployer().passwords.borrow(),
        vec!["pw".to_string()]
    );
}
