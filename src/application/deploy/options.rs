//! Deploy Options
//!
//! Everything one deployment run needs, passed explicitly to the use case.

use std::path::PathBuf;

use crate::config::{Config, OutputsConfig};
use crate::domain::services::{ParameterKeys, ReadinessPolicy};
use crate::domain::value_objects::{Region, ResourceGroup, Secret};

pub const DEFAULT_CONSORTIUM_TEMPLATE: &str = "etheriumConsertiumTemplate.json";
pub const DEFAULT_CONSORTIUM_PARAMETERS: &str = "etheriumConsertiumParameters.json";
pub const DEFAULT_SUPPLYCHAIN_TEMPLATE: &str = "supplyChainTemplate.json";
pub const DEFAULT_SUPPLYCHAIN_PARAMETERS: &str = "supplyChainParameters.json";

/// Options for the deploy use case
#[derive(Debug, Clone)]
pub struct DeployOptions {
    pub subscription_id: String,
    pub resource_group: ResourceGroup,
    /// Base name; the two deployments get `-consortium` / `-supplychain`
    pub deployment_name: String,
    pub consortium_template: PathBuf,
    pub consortium_parameters: PathBuf,
    pub supplychain_template: PathBuf,
    pub supplychain_parameters: PathBuf,
    /// Account password; falls back to the consortium parameter file
    pub account_password: Option<Secret>,
    /// Resource provider namespaces to register
    pub providers: Vec<String>,
    pub contract_name: String,
    pub gas: String,
    pub slot: String,
    /// `None` skips the readiness wait
    pub readiness: Option<ReadinessPolicy>,
    pub parameter_keys: ParameterKeys,
    pub outputs: OutputsConfig,
}

impl DeployOptions {
    pub fn new(
        subscription_id: impl Into<String>,
        resource_group: impl Into<String>,
        deployment_name: impl Into<String>,
    ) -> Self {
        Self::from_config(
            &Config::default(),
            subscription_id,
            resource_group,
            deployment_name,
        )
    }

    /// Options with every tunable taken from `config`
    pub fn from_config(
        config: &Config,
        subscription_id: impl Into<String>,
        resource_group: impl Into<String>,
        deployment_name: impl Into<String>,
    ) -> Self {
        Self {
            subscription_id: subscription_id.into(),
            resource_group: ResourceGroup::new(resource_group, None),
            deployment_name: deployment_name.into(),
            consortium_template: PathBuf::from(DEFAULT_CONSORTIUM_TEMPLATE),
            consortium_parameters: PathBuf::from(DEFAULT_CONSORTIUM_PARAMETERS),
            supplychain_template: PathBuf::from(DEFAULT_SUPPLYCHAIN_TEMPLATE),
            supplychain_parameters: PathBuf::from(DEFAULT_SUPPLYCHAIN_PARAMETERS),
            account_password: None,
            providers: config.providers.namespaces.clone(),
            contract_name: config.contract.name.clone(),
            gas: config.contract.gas.clone(),
            slot: config.apps.slot.clone(),
            readiness: config
                .readiness
                .enabled
                .then(|| config.readiness.policy()),
            parameter_keys: config.parameters.keys(),
            outputs: config.outputs.clone(),
        }
    }

    pub fn with_region(mut self, region: Option<Region>) -> Self {
        self.resource_group.region = region;
        self
    }

    pub fn with_consortium_files(
        mut self,
        template: impl Into<PathBuf>,
        parameters: impl Into<PathBuf>,
    ) -> Self {
        self.consortium_template = template.into();
        self.consortium_parameters = parameters.into();
        self
    }

    pub fn with_supplychain_files(
        mut self,
        template: impl Into<PathBuf>,
        parameters: impl Into<PathBuf>,
    ) -> Self {
        self.supplychain_template = template.into();
        self.supplychain_parameters = parameters.into();
        self
    }

    pub fn with_account_password(mut self, password: Option<Secret>) -> Self {
        self.account_password = password;
        self
    }

    pub fn with_providers(mut self, providers: Vec<String>) -> Self {
        self.providers = providers;
        self
    }

    pub fn with_slot(mut self, slot: impl Into<String>) -> Self {
        self.slot = slot.into();
        self
    }

    pub fn with_readiness(mut self, readiness: Option<ReadinessPolicy>) -> Self {
        self.readiness = readiness;
        self
    }

    pub fn consortium_deployment(&self) -> String {
        format!("{}-consortium", self.deployment_name)
    }

    pub fn supplychain_deployment(&self) -> String {
        format!("{}-supplychain", self.deployment_name)
    }
}
