//! Support for `-c key=value` overrides.
//!
//! [`CliConfigOverrides`] is embedded into the `clap`-derived [`crate::Cli`]
//! with `#[clap(flatten)]`. Each occurrence of `-c key=value` (or
//! `--config key=value`) is collected as a raw string and later applied onto
//! the configuration tree read from `config.toml`.

use clap::ArgAction;
use clap::Parser;
use serde_json::Map;
use serde_json::Value;

/// CLI option that captures arbitrary configuration overrides specified as
/// `-c key=value`.
#[derive(Parser, Debug, Default, Clone)]
pub struct CliConfigOverrides {
    /// Override a configuration value that would otherwise be loaded from
    /// `~/.ai-kernel/config.toml`. Use a dotted path (`foo.bar`) to override
    /// nested values. The `value` portion is parsed as JSON. If it fails to
    /// parse as JSON, the raw string is used as a literal.
    ///
    /// Examples:
    ///   - `-c model=small`
    ///   - `-c suppress_payload_echo=false`
    ///   - `-c 'approval_reason="Approved by CI"'`
    #[arg(
        short = 'c',
        long = "config",
        value_name = "key=value",
        action = ArgAction::Append,
        global = true,
    )]
    pub raw_overrides: Vec<String>,
}

impl CliConfigOverrides {
    /// Parses the raw strings into `(path, value)` pairs.
    pub fn parse_overrides(&self) -> Result<Vec<(String, Value)>, String> {
        self.raw_overrides
            .iter()
            .map(|s| {
                // Only split on the first '=' so values may contain it.
                let Some((key, value_str)) = s.split_once('=') else {
                    return Err(format!("Invalid override (missing '='): {s}"));
                };
                let key = key.trim();
                let value_str = value_str.trim();

                if key.is_empty() {
                    return Err(format!("Empty key in override: {s}"));
                }

                let value: Value = match serde_json::from_str(value_str) {
                    Ok(v) => v,
                    Err(_) => Value::String(value_str.to_string()),
                };

                Ok((key.to_string(), value))
            })
            .collect()
    }

    /// Applies all parsed overrides onto `target`, creating intermediate
    /// objects as needed and replacing values at the destination path.
    pub fn apply_on_value(&self, target: &mut Value) -> Result<(), String> {
        let overrides = self.parse_overrides()?;
        for (path, value) in overrides {
            apply_single_override(target, &path, value);
        }
        Ok(())
    }
}

fn apply_single_override(root: &mut Value, path: &str, value: Value) {
    let mut parts = path.split('.').peekable();
    let mut current = root;

    while let Some(part) = parts.next() {
        if !current.is_object() {
            *current = Value::Object(Map::new());
        }
        let Value::Object(obj) = current else {
            return;
        };

        if parts.peek().is_none() {
            obj.insert(part.to_string(), value);
            return;
        }

        current = obj
            .entry(part.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
    }
}
