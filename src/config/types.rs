//! Configuration type definitions

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::services::{ParameterKeys, ReadinessPolicy};
use crate::error::ScdeployResult;

use super::loader::{self, ConfigWarning};

/// Azure CLI configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AzureConfig {
    /// Subscription to select when none is given on the command line
    #[serde(default)]
    pub subscription_id: Option<String>,

    /// Path or name of the Azure CLI executable
    #[serde(default = "default_az_program")]
    pub program: String,
}

impl Default for AzureConfig {
    fn default() -> Self {
        Self {
            subscription_id: None,
            program: default_az_program(),
        }
    }
}

fn default_az_program() -> String {
    "az".to_string()
}

/// Resource providers registered before anything is deployed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProvidersConfig {
    #[serde(default = "default_namespaces")]
    pub namespaces: Vec<String>,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            namespaces: default_namespaces(),
        }
    }
}

fn default_namespaces() -> Vec<String> {
    ["microsoft.compute", "microsoft.network", "microsoft.storage", "microsoft.web"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// External contract deployer
///
/// The deployer is run as `<program> <args...> <name> <rpc-endpoint> <password>`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractConfig {
    #[serde(default = "default_contract_program")]
    pub program: String,

    #[serde(default = "default_contract_args")]
    pub args: Vec<String>,

    /// Contract name passed as the first positional argument
    #[serde(default = "default_contract_name")]
    pub name: String,

    /// Directory to run the deployer in (defaults to the current directory)
    #[serde(default)]
    pub working_dir: Option<PathBuf>,

    /// Gas limit written to the API app's settings
    #[serde(default = "default_gas")]
    pub gas: String,
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            program: default_contract_program(),
            args: default_contract_args(),
            name: default_contract_name(),
            working_dir: None,
            gas: default_gas(),
        }
    }
}

fn default_contract_program() -> String {
    "node".to_string()
}

fn default_contract_args() -> Vec<String> {
    vec!["deploy.js".to_string()]
}

fn default_contract_name() -> String {
    "SupplyChain".to_string()
}

fn default_gas() -> String {
    "4700000".to_string()
}

/// Node readiness polling
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    #[serde(default = "default_initial_delay")]
    pub initial_delay_secs: u64,

    #[serde(default = "default_max_delay")]
    pub max_delay_secs: u64,

    #[serde(default = "default_multiplier")]
    pub multiplier: u32,

    /// Timeout of a single RPC probe
    #[serde(default = "default_probe_timeout")]
    pub probe_timeout_secs: u64,
}

impl Default for ReadinessConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_attempts: default_max_attempts(),
            initial_delay_secs: default_initial_delay(),
            max_delay_secs: default_max_delay(),
            multiplier: default_multiplier(),
            probe_timeout_secs: default_probe_timeout(),
        }
    }
}

impl ReadinessConfig {
    pub fn policy(&self) -> ReadinessPolicy {
        ReadinessPolicy {
            max_attempts: self.max_attempts,
            initial_delay: Duration::from_secs(self.initial_delay_secs),
            max_delay: Duration::from_secs(self.max_delay_secs),
            multiplier: self.multiplier,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_max_attempts() -> u32 {
    30
}

fn default_initial_delay() -> u64 {
    5
}

fn default_max_delay() -> u64 {
    30
}

fn default_multiplier() -> u32 {
    2
}

fn default_probe_timeout() -> u64 {
    10
}

/// Parameter names copied between the two parameter files
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParametersConfig {
    #[serde(default = "default_name_prefix")]
    pub name_prefix: String,

    #[serde(default = "default_password")]
    pub password: String,

    #[serde(default = "default_vnet_name")]
    pub vnet_name: String,
}

impl Default for ParametersConfig {
    fn default() -> Self {
        Self {
            name_prefix: default_name_prefix(),
            password: default_password(),
            vnet_name: default_vnet_name(),
        }
    }
}

impl ParametersConfig {
    pub fn keys(&self) -> ParameterKeys {
        ParameterKeys {
            name_prefix: self.name_prefix.clone(),
            password: self.password.clone(),
            vnet_name: self.vnet_name.clone(),
        }
    }
}

fn default_name_prefix() -> String {
    "namePrefix".to_string()
}

fn default_password() -> String {
    "ethereumAccountPsswd".to_string()
}

fn default_vnet_name() -> String {
    "vnetName".to_string()
}

/// Names of the template outputs the deployment reads
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputsConfig {
    #[serde(default = "default_rpc_output")]
    pub rpc_endpoint: String,

    #[serde(default = "default_vnet_name")]
    pub vnet_name: String,

    #[serde(default = "default_api_app_output")]
    pub api_app: String,

    #[serde(default = "default_web_app_output")]
    pub web_app: String,

    #[serde(default = "default_storage_output")]
    pub storage_account: String,
}

impl Default for OutputsConfig {
    fn default() -> Self {
        Self {
            rpc_endpoint: default_rpc_output(),
            vnet_name: default_vnet_name(),
            api_app: default_api_app_output(),
            web_app: default_web_app_output(),
            storage_account: default_storage_output(),
        }
    }
}

fn default_rpc_output() -> String {
    "ethereum-rpc-endpoint".to_string()
}

fn default_api_app_output() -> String {
    "apiAppName".to_string()
}

fn default_web_app_output() -> String {
    "webAppName".to_string()
}

fn default_storage_output() -> String {
    "storageAccountName".to_string()
}

/// Web app settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppsConfig {
    /// Deployment slot whose settings are patched
    #[serde(default = "default_slot")]
    pub slot: String,
}

impl Default for AppsConfig {
    fn default() -> Self {
        Self {
            slot: default_slot(),
        }
    }
}

fn default_slot() -> String {
    "production".to_string()
}

/// Color output mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OutputConfig {
    #[serde(default)]
    pub color: ColorMode,
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub azure: AzureConfig,

    #[serde(default)]
    pub providers: ProvidersConfig,

    #[serde(default)]
    pub contract: ContractConfig,

    #[serde(default)]
    pub readiness: ReadinessConfig,

    #[serde(default)]
    pub parameters: ParametersConfig,

    #[serde(default)]
    pub outputs: OutputsConfig,

    #[serde(default)]
    pub apps: AppsConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from TOML file
    pub fn load(path: &Path) -> ScdeployResult<Self> {
        Ok(loader::load_with_warnings(path)?.0)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> ScdeployResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Resolve the config hierarchy for a working directory
    pub fn resolve(
        project_root: &Path,
        explicit: Option<&Path>,
    ) -> ScdeployResult<(Self, Vec<ConfigWarning>)> {
        loader::resolve(project_root, explicit)
    }
}
