//! Configuration module for scdeploy
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (SCDEPLOY_*)
//! 3. `--config <file>` or project config (`./scdeploy.toml`)
//! 4. User config (~/.config/scdeploy/config.toml)
//! 5. Built-in defaults (lowest priority)

mod env_validator;
mod loader;
mod types;

pub use loader::{
    apply_env_overrides, user_config_path, with_env_overrides, ConfigWarning, PROJECT_CONFIG_FILE,
};
pub use types::{
    AppsConfig, AzureConfig, ColorMode, Config, ContractConfig, OutputConfig, OutputsConfig,
    ParametersConfig, ProvidersConfig, ReadinessConfig,
};
