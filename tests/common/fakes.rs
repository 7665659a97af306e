//! In-memory port implementations for driving `DeployUseCase` without Azure.

use std::cell::RefCell;
use std::collections::HashMap;
use std::time::Duration;

use serde_json::json;

use scdeploy::domain::entities::{AppSettings, DeploymentOutputs};
use scdeploy::domain::ports::{
    AppTarget, CloudPlatform, ContractDeployer, ContractRequest, ContractRun, NodeProbe, Sleeper,
    TemplateDeployment,
};
use scdeploy::domain::value_objects::{Region, Secret};
use scdeploy::{ScdeployError, ScdeployResult};

use super::fixtures::{CONTRACT_OUTPUT, RPC_ENDPOINT, STORAGE_KEY};

/// Cloud platform backed by maps; records every mutating call
pub struct FakePlatform {
    pub group_exists: bool,
    pub outputs: HashMap<String, DeploymentOutputs>,
    pub failing_deployments: Vec<String>,
    pub created_groups: RefCell<Vec<(String, Region)>>,
    pub deployments: RefCell<Vec<TemplateDeployment>>,
    pub settings: RefCell<HashMap<String, AppSettings>>,
    pub settings_writes: RefCell<Vec<AppTarget>>,
}

impl FakePlatform {
    /// Both deployments succeed with the outputs the real templates declare
    pub fn healthy() -> Self {
        let mut outputs = HashMap::new();
        outputs.insert(
            "demo-consortium".to_string(),
            DeploymentOutputs::new()
                .with("ethereum-rpc-endpoint", json!(RPC_ENDPOINT))
                .with("vnetName", json!("sc-vnet")),
        );
        outputs.insert(
            "demo-supplychain".to_string(),
            DeploymentOutputs::new()
                .with("apiAppName", json!("sc-api"))
                .with("webAppName", json!("sc-web"))
                .with("storageAccountName", json!("scstore")),
        );

        let mut settings = HashMap::new();
        settings.insert(
            "sc-api".to_string(),
            AppSettings::new().with("WEBSITE_NODE_DEFAULT_VERSION", "10.14"),
        );
        settings.insert("sc-web".to_string(), AppSettings::new());

        Self {
            group_exists: false,
            outputs,
            failing_deployments: Vec::new(),
            created_groups: RefCell::new(Vec::new()),
            deployments: RefCell::new(Vec::new()),
            settings: RefCell::new(settings),
            settings_writes: RefCell::new(Vec::new()),
        }
    }

    pub fn failing(mut self, deployment: &str) -> Self {
        self.failing_deployments.push(deployment.to_string());
        self
    }

    pub fn settings_of(&self, app: &str) -> AppSettings {
        self.settings.borrow().get(app).cloned().unwrap_or_default()
    }
}

impl CloudPlatform for FakePlatform {
    fn authenticate(&self, _subscription_id: &str) -> ScdeployResult<()> {
        Ok(())
    }

    fn register_provider(&self, _namespace: &str) -> ScdeployResult<()> {
        Ok(())
    }

    fn resource_group_exists(&self, _name: &str) -> ScdeployResult<bool> {
        Ok(self.group_exists || !self.created_groups.borrow().is_empty())
    }

    fn create_resource_group(&self, name: &str, region: &Region) -> ScdeployResult<()> {
        self.created_groups
            .borrow_mut()
            .push((name.to_string(), region.clone()));
        Ok(())
    }

    fn deploy_template(&self, request: &TemplateDeployment) -> ScdeployResult<DeploymentOutputs> {
        if !request.template.exists() {
            return Err(ScdeployError::FileNotFound {
                path: request.template.clone(),
            });
        }
        self.deployments.borrow_mut().push(request.clone());

        if self.failing_deployments.contains(&request.name) {
            return Err(ScdeployError::CommandFailed {
                command: "az deployment group create".to_string(),
                message: format!("deployment '{}' finished in state Failed", request.name),
            });
        }
        Ok(self.outputs.get(&request.name).cloned().unwrap_or_default())
    }

    fn list_virtual_networks(&self, _resource_group: &str) -> ScdeployResult<Vec<String>> {
        Ok(vec!["listed-vnet".to_string()])
    }

    fn web_app_hostname(&self, _resource_group: &str, app: &str) -> ScdeployResult<String> {
        Ok(format!("{}.azurewebsites.net", app))
    }

    fn get_app_settings(&self, target: &AppTarget) -> ScdeployResult<AppSettings> {
        Ok(self.settings_of(&target.app))
    }

    fn set_app_settings(&self, target: &AppTarget, settings: &AppSettings) -> ScdeployResult<()> {
        self.settings
            .borrow_mut()
            .insert(target.app.clone(), settings.clone());
        self.settings_writes.borrow_mut().push(target.clone());
        Ok(())
    }

    fn storage_account_key(&self, _resource_group: &str, _account: &str) -> ScdeployResult<Secret> {
        Ok(Secret::new(STORAGE_KEY))
    }
}

/// Contract deployer that replays canned output
pub struct FakeContractDeployer {
    pub output: String,
    pub exit_code: Option<i32>,
    pub passwords: RefCell<Vec<String>>,
}

impl FakeContractDeployer {
    pub fn succeeding() -> Self {
        Self::with_output(CONTRACT_OUTPUT, Some(0))
    }

    pub fn with_output(output: &str, exit_code: Option<i32>) -> Self {
        Self {
            output: output.to_string(),
            exit_code,
            passwords: RefCell::new(Vec::new()),
        }
    }
}

impl ContractDeployer for FakeContractDeployer {
    fn deploy(&self, request: &ContractRequest<'_>) -> ScdeployResult<ContractRun> {
        self.passwords
            .borrow_mut()
            .push(request.password.expose().to_string());
        Ok(ContractRun {
            output: self.output.clone(),
            structured: None,
            exit_code: self.exit_code,
        })
    }
}

pub struct AlwaysReady;

impl NodeProbe for AlwaysReady {
    fn is_ready(&self, _rpc_endpoint: &str) -> ScdeployResult<bool> {
        Ok(true)
    }
}

pub struct NoSleep;

impl Sleeper for NoSleep {
    fn sleep(&self, _duration: Duration) {}
}
