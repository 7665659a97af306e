//! Configuration loading

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{ScdeployError, ScdeployResult};

use super::env_validator::{levenshtein, EnvVarValidator};
use super::types::{ColorMode, Config};

/// Project config file name, looked up in the working directory
pub const PROJECT_CONFIG_FILE: &str = "scdeploy.toml";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> ScdeployResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| ScdeployError::Config {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Resolve configuration in priority order:
/// explicit `--config` file, project `scdeploy.toml`, user config, defaults.
/// Environment overrides are applied on top.
pub fn resolve(
    project_root: &Path,
    explicit: Option<&Path>,
) -> ScdeployResult<(Config, Vec<ConfigWarning>)> {
    if let Some(path) = explicit {
        if !path.exists() {
            return Err(ScdeployError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let (config, warnings) = load_with_warnings(path)?;
        return Ok((with_env_overrides(config), warnings));
    }

    let project_config = project_root.join(PROJECT_CONFIG_FILE);
    if project_config.exists() {
        let (config, warnings) = load_with_warnings(&project_config)?;
        return Ok((with_env_overrides(config), warnings));
    }

    if let Some(user_config) = user_config_path() {
        if user_config.exists() {
            let (config, warnings) = load_with_warnings(&user_config)?;
            return Ok((with_env_overrides(config), warnings));
        }
    }

    Ok((with_env_overrides(Config::default()), Vec::new()))
}

/// `~/.config/scdeploy/config.toml` (platform equivalent via `dirs`)
pub fn user_config_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("SCDEPLOY_USER_CONFIG") {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir().map(|d| d.join("scdeploy/config.toml"))
}

/// Apply environment variable overrides (SCDEPLOY_* prefix)
pub fn with_env_overrides(config: Config) -> Config {
    apply_env_overrides(config, |name| std::env::var(name).ok(), &mut std::io::stderr())
}

/// Apply overrides from an arbitrary variable source. Invalid values are
/// reported to `warn` and ignored.
pub fn apply_env_overrides<F, W>(mut config: Config, lookup: F, warn: &mut W) -> Config
where
    F: Fn(&str) -> Option<String>,
    W: Write,
{
    if let Some(id) = lookup("SCDEPLOY_SUBSCRIPTION_ID").filter(|s| !s.trim().is_empty()) {
        config.azure.subscription_id = Some(id.trim().to_string());
    }

    if let Some(slot) = lookup("SCDEPLOY_SLOT").filter(|s| !s.trim().is_empty()) {
        config.apps.slot = slot.trim().to_string();
    }

    if let Some(program) = lookup("SCDEPLOY_CONTRACT_PROGRAM").filter(|s| !s.trim().is_empty()) {
        config.contract.program = program.trim().to_string();
    }

    if let Some(gas) = lookup("SCDEPLOY_GAS") {
        match gas.trim().parse::<u64>() {
            Ok(value) => config.contract.gas = value.to_string(),
            Err(_) => {
                let _ = writeln!(
                    warn,
                    "Warning: Invalid SCDEPLOY_GAS value '{}' (expected a positive integer)",
                    gas
                );
            }
        }
    }

    if let Some(attempts) = lookup("SCDEPLOY_READINESS_ATTEMPTS") {
        match attempts.trim().parse::<u32>() {
            Ok(value) if value > 0 => config.readiness.max_attempts = value,
            _ => {
                let _ = writeln!(
                    warn,
                    "Warning: Invalid SCDEPLOY_READINESS_ATTEMPTS value '{}' (expected a positive integer)",
                    attempts
                );
            }
        }
    }

    if let Some(color) = lookup("SCDEPLOY_COLOR") {
        let validator = EnvVarValidator::new("SCDEPLOY_COLOR", &["auto", "always", "never"]);
        config.output.color = validator.parse_with_writer(
            &color,
            |s| match s.trim().to_lowercase().as_str() {
                "auto" => Some(ColorMode::Auto),
                "always" => Some(ColorMode::Always),
                "never" => Some(ColorMode::Never),
                _ => None,
            },
            config.output.color,
            warn,
        );
    }

    config
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    for (i, line) in content.lines().enumerate() {
        if line.contains(needle) {
            return Some(i + 1);
        }
    }
    None
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "azure",
        "subscription_id",
        "program",
        "providers",
        "namespaces",
        "contract",
        "args",
        "name",
        "working_dir",
        "gas",
        "readiness",
        "enabled",
        "max_attempts",
        "initial_delay_secs",
        "max_delay_secs",
        "multiplier",
        "probe_timeout_secs",
        "parameters",
        "name_prefix",
        "password",
        "vnet_name",
        "outputs",
        "rpc_endpoint",
        "api_app",
        "web_app",
        "storage_account",
        "apps",
        "slot",
        "output",
        "color",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}
