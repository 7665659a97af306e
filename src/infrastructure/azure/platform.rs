//! Azure CLI Cloud Platform
//!
//! Implements `CloudPlatform` by shelling out to `az`. Argument lists are
//! built by small pure functions so they can be tested without Azure.

use serde::Deserialize;
use serde_json::Value;

use super::az_cli::AzCli;
use crate::domain::entities::{AppSettings, DeploymentOutputs};
use crate::domain::ports::{AppTarget, CloudPlatform, TemplateDeployment};
use crate::domain::value_objects::{Region, Secret};
use crate::error::{ScdeployError, ScdeployResult};

pub struct AzCliPlatform {
    az: AzCli,
}

impl AzCliPlatform {
    pub fn new(az: AzCli) -> Self {
        Self { az }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeploymentResponse {
    properties: DeploymentProperties,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeploymentProperties {
    #[serde(default)]
    provisioning_state: Option<String>,
    #[serde(default)]
    outputs: Value,
}

#[derive(Debug, Deserialize)]
struct NamedResource {
    name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WebApp {
    default_host_name: String,
}

#[derive(Debug, Deserialize)]
struct AppSettingEntry {
    name: String,
    #[serde(default)]
    value: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StorageKey {
    value: String,
}

impl CloudPlatform for AzCliPlatform {
    fn authenticate(&self, subscription_id: &str) -> ScdeployResult<()> {
        let signed_in = self.az.run(&["account", "show"]).is_ok();
        if !signed_in {
            self.az.run_attached(&["login"])?;
        }
        self.az
            .run(&["account", "set", "--subscription", subscription_id])?;
        Ok(())
    }

    fn register_provider(&self, namespace: &str) -> ScdeployResult<()> {
        self.az
            .run(&["provider", "register", "--namespace", namespace])?;
        Ok(())
    }

    fn resource_group_exists(&self, name: &str) -> ScdeployResult<bool> {
        self.az.run_json(&["group", "exists", "--name", name])
    }

    fn create_resource_group(&self, name: &str, region: &Region) -> ScdeployResult<()> {
        self.az.run_json::<Value, _>(&[
            "group",
            "create",
            "--name",
            name,
            "--location",
            region.as_str(),
        ])?;
        Ok(())
    }

    fn deploy_template(&self, request: &TemplateDeployment) -> ScdeployResult<DeploymentOutputs> {
        if !request.template.exists() {
            return Err(ScdeployError::FileNotFound {
                path: request.template.clone(),
            });
        }

        let response: DeploymentResponse = self.az.run_json(&deployment_args(request))?;
        let state = response
            .properties
            .provisioning_state
            .unwrap_or_else(|| "Unknown".to_string());
        if !state.eq_ignore_ascii_case("Succeeded") {
            return Err(ScdeployError::CommandFailed {
                command: format!("{} deployment group create", self.az.program()),
                message: format!("deployment '{}' finished in state {}", request.name, state),
            });
        }

        Ok(DeploymentOutputs::from_arm(&response.properties.outputs))
    }

    fn list_virtual_networks(&self, resource_group: &str) -> ScdeployResult<Vec<String>> {
        let vnets: Vec<NamedResource> = self.az.run_json(&[
            "network",
            "vnet",
            "list",
            "--resource-group",
            resource_group,
        ])?;
        Ok(vnets.into_iter().map(|v| v.name).collect())
    }

    fn web_app_hostname(&self, resource_group: &str, app: &str) -> ScdeployResult<String> {
        let webapp: WebApp = self.az.run_json(&[
            "webapp",
            "show",
            "--resource-group",
            resource_group,
            "--name",
            app,
        ])?;
        Ok(webapp.default_host_name)
    }

    fn get_app_settings(&self, target: &AppTarget) -> ScdeployResult<AppSettings> {
        let entries: Vec<AppSettingEntry> = self.az.run_json(&appsettings_list_args(target))?;
        Ok(entries
            .into_iter()
            .map(|e| (e.name, e.value.unwrap_or_default()))
            .collect())
    }

    fn set_app_settings(&self, target: &AppTarget, settings: &AppSettings) -> ScdeployResult<()> {
        if settings.is_empty() {
            return Ok(());
        }
        self.az
            .run_json::<Value, _>(&appsettings_set_args(target, settings))?;
        Ok(())
    }

    fn storage_account_key(&self, resource_group: &str, account: &str) -> ScdeployResult<Secret> {
        let keys: Vec<StorageKey> = self.az.run_json(&[
            "storage",
            "account",
            "keys",
            "list",
            "--resource-group",
            resource_group,
            "--account-name",
            account,
        ])?;
        keys.into_iter()
            .next()
            .map(|k| Secret::new(k.value))
            .ok_or_else(|| ScdeployError::UnexpectedOutput {
                command: format!("{} storage account keys list", self.az.program()),
                message: format!("storage account '{}' returned no keys", account),
            })
    }
}

fn deployment_args(request: &TemplateDeployment) -> Vec<String> {
    let mut args = vec![
        "deployment".to_string(),
        "group".to_string(),
        "create".to_string(),
        "--resource-group".to_string(),
        request.resource_group.clone(),
        "--name".to_string(),
        request.name.clone(),
        "--template-file".to_string(),
        request.template.display().to_string(),
    ];
    if let Some(parameters) = &request.parameters {
        args.push("--parameters".to_string());
        args.push(format!("@{}", parameters.display()));
    }
    args
}

fn slot_args(target: &AppTarget) -> Vec<String> {
    if target.is_production() {
        Vec::new()
    } else {
        vec!["--slot".to_string(), target.slot.clone()]
    }
}

fn appsettings_list_args(target: &AppTarget) -> Vec<String> {
    let mut args = vec![
        "webapp".to_string(),
        "config".to_string(),
        "appsettings".to_string(),
        "list".to_string(),
        "--resource-group".to_string(),
        target.resource_group.clone(),
        "--name".to_string(),
        target.app.clone(),
    ];
    args.extend(slot_args(target));
    args
}

fn appsettings_set_args(target: &AppTarget, settings: &AppSettings) -> Vec<String> {
    let mut args = vec![
        "webapp".to_string(),
        "config".to_string(),
        "appsettings".to_string(),
        "set".to_string(),
        "--resource-group".to_string(),
        target.resource_group.clone(),
        "--name".to_string(),
        target.app.clone(),
    ];
    args.extend(slot_args(target));
    args.push("--settings".to_string());
    args.extend(settings.iter().map(|(k, v)| format!("{}={}", k, v)));
    args
}
