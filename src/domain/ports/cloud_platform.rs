//! Cloud Platform Port
//!
//! Everything the deployment asks of Azure. The production implementation
//! drives the `az` CLI; tests use an in-memory fake.

use std::path::PathBuf;

use crate::domain::entities::{AppSettings, DeploymentOutputs};
use crate::domain::value_objects::{Region, Secret};
use crate::error::ScdeployResult;

/// Slot name that addresses the app itself rather than a deployment slot
pub const PRODUCTION_SLOT: &str = "production";

/// A single template deployment request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateDeployment {
    pub resource_group: String,
    /// Deployment name as recorded by the platform
    pub name: String,
    pub template: PathBuf,
    /// Parameter file, or `None` to use the template defaults
    pub parameters: Option<PathBuf>,
}

/// A web app slot whose settings are read or written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppTarget {
    pub resource_group: String,
    pub app: String,
    pub slot: String,
}

impl AppTarget {
    pub fn new(
        resource_group: impl Into<String>,
        app: impl Into<String>,
        slot: impl Into<String>,
    ) -> Self {
        Self {
            resource_group: resource_group.into(),
            app: app.into(),
            slot: slot.into(),
        }
    }

    pub fn is_production(&self) -> bool {
        self.slot.eq_ignore_ascii_case(PRODUCTION_SLOT)
    }
}

/// Trait for the cloud control plane.
///
/// Every call blocks until the platform reports completion.
pub trait CloudPlatform {
    /// Make sure a session exists and select the subscription
    fn authenticate(&self, subscription_id: &str) -> ScdeployResult<()>;

    /// Register a resource-provider namespace (e.g. `microsoft.web`)
    fn register_provider(&self, namespace: &str) -> ScdeployResult<()>;

    fn resource_group_exists(&self, name: &str) -> ScdeployResult<bool>;

    fn create_resource_group(&self, name: &str, region: &Region) -> ScdeployResult<()>;

    /// Submit a template and wait for it; returns the declared outputs
    fn deploy_template(&self, request: &TemplateDeployment) -> ScdeployResult<DeploymentOutputs>;

    /// Names of the virtual networks in a resource group
    fn list_virtual_networks(&self, resource_group: &str) -> ScdeployResult<Vec<String>>;

    /// Default host name of a web app (`<app>.azurewebsites.net`)
    fn web_app_hostname(&self, resource_group: &str, app: &str) -> ScdeployResult<String>;

    fn get_app_settings(&self, target: &AppTarget) -> ScdeployResult<AppSettings>;

    /// Push the complete settings mapping to the slot
    fn set_app_settings(&self, target: &AppTarget, settings: &AppSettings) -> ScdeployResult<()>;

    /// First access key of a storage account
    fn storage_account_key(&self, resource_group: &str, account: &str) -> ScdeployResult<Secret>;
}
