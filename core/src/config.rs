use std::path::Path;
use std::path::PathBuf;

use dirs::home_dir;
use serde::Deserialize;
use serde_json::Map;
use serde_json::Value;

use crate::error::ConfigError;

pub const AI_KERNEL_HOME_ENV: &str = "AI_KERNEL_HOME";
pub const CONFIG_TOML_FILE: &str = "config.toml";
pub const DEFAULT_APPROVAL_REASON: &str = "Auto-approved in AI kernel";

/// Kernel settings loaded from `config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct KernelConfig {
    /// Provider shown in the kernel banner.
    #[serde(default)]
    pub provider_name: Option<String>,

    #[serde(default)]
    pub model: Option<String>,

    /// Append the notebook context block to every prompt.
    #[serde(default = "default_true")]
    pub append_prompt_suffix: bool,

    /// Hold back model text that repeats a payload shown via `display_data`.
    #[serde(default = "default_true")]
    pub suppress_payload_echo: bool,

    /// Reason attached to automatic tool approvals.
    #[serde(default = "default_approval_reason")]
    pub approval_reason: String,
}

fn default_true() -> bool {
    true
}

fn default_approval_reason() -> String {
    DEFAULT_APPROVAL_REASON.to_string()
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            provider_name: None,
            model: None,
            append_prompt_suffix: true,
            suppress_payload_echo: true,
            approval_reason: default_approval_reason(),
        }
    }
}

/// Typed overrides that take precedence over `config.toml` and `-c` flags.
#[derive(Debug, Default, Clone)]
pub struct KernelConfigOverrides {
    pub provider_name: Option<String>,
    pub model: Option<String>,
    pub append_prompt_suffix: Option<bool>,
    pub suppress_payload_echo: Option<bool>,
}

impl KernelConfig {
    /// Loads `config.toml` from the kernel home directory, applying
    /// `overrides` on top.
    pub fn load_with_overrides(overrides: KernelConfigOverrides) -> Result<Self, ConfigError> {
        let home = find_ai_kernel_home().map_err(|source| ConfigError::Io {
            path: AI_KERNEL_HOME_ENV.to_string(),
            source,
        })?;
        let root = load_config_as_value(&home)?;
        Self::from_value(root, overrides)
    }

    /// Builds a config from an already merged configuration tree.
    pub fn from_value(root: Value, overrides: KernelConfigOverrides) -> Result<Self, ConfigError> {
        let mut config: KernelConfig =
            serde_json::from_value(root).map_err(|err| ConfigError::Invalid(err.to_string()))?;

        let KernelConfigOverrides {
            provider_name,
            model,
            append_prompt_suffix,
            suppress_payload_echo,
        } = overrides;
        if provider_name.is_some() {
            config.provider_name = provider_name;
        }
        if model.is_some() {
            config.model = model;
        }
        if let Some(append_prompt_suffix) = append_prompt_suffix {
            config.append_prompt_suffix = append_prompt_suffix;
        }
        if let Some(suppress_payload_echo) = suppress_payload_echo {
            config.suppress_payload_echo = suppress_payload_echo;
        }
        Ok(config)
    }

    /// Whether a provider and model are both set.
    pub fn has_provider(&self) -> bool {
        let set = |value: &Option<String>| value.as_deref().is_some_and(|v| !v.trim().is_empty());
        set(&self.provider_name) && set(&self.model)
    }
}

/// Reads `config.toml` under `home` into a JSON tree so that `-c` overrides
/// can be applied before deserializing. A missing file yields an empty table.
pub fn load_config_as_value(home: &Path) -> Result<Value, ConfigError> {
    let path = home.join(CONFIG_TOML_FILE);
    let contents = match std::fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("{} not found, using defaults", path.display());
            return Ok(Value::Object(Map::new()));
        }
        Err(source) => {
            return Err(ConfigError::Io {
                path: path.display().to_string(),
                source,
            });
        }
    };
    Ok(toml::from_str(&contents)?)
}

/// Returns the kernel home directory: `$AI_KERNEL_HOME` when set, otherwise
/// `~/.ai-kernel`. Does not verify that the directory exists.
pub fn find_ai_kernel_home() -> std::io::Result<PathBuf> {
    if let Some(path) = std::env::var_os(AI_KERNEL_HOME_ENV).filter(|path| !path.is_empty()) {
        return Ok(PathBuf::from(path));
    }

    let mut p = home_dir().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Could not find home directory",
        )
    })?;
    p.push(".ai-kernel");
    Ok(p)
}
