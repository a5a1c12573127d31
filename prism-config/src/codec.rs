//! File-format codecs over a shared JSON value tree.

use serde_json::Value;
use std::path::Path;

use crate::manager::ConfigError;

/// Supported on-disk formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Json,
    Toml,
}

impl ConfigFormat {
    /// Guess the format from a file extension. Defaults to YAML, the
    /// suite's conventional config format.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("json") => Self::Json,
            Some("toml") => Self::Toml,
            _ => Self::Yaml,
        }
    }
}

pub(crate) fn parse(format: ConfigFormat, text: &str) -> Result<Value, ConfigError> {
    let value = match format {
        ConfigFormat::Yaml => serde_yaml::from_str::<Value>(text)
            .map_err(|e| ConfigError::Parse(e.to_string()))?,
        ConfigFormat::Json => {
            if text.trim().is_empty() {
                Value::Null
            } else {
                serde_json::from_str::<Value>(text)
                    .map_err(|e| ConfigError::Parse(e.to_string()))?
            }
        }
        ConfigFormat::Toml => {
            toml::from_str::<Value>(text).map_err(|e| ConfigError::Parse(e.to_string()))?
        }
    };
    // An empty file is an empty tree, not "no tree".
    Ok(match value {
        Value::Null => Value::Object(serde_json::Map::new()),
        other => other,
    })
}

pub(crate) fn render(format: ConfigFormat, value: &Value) -> Result<String, ConfigError> {
    match format {
        ConfigFormat::Yaml => {
            serde_yaml::to_string(value).map_err(|e| ConfigError::Render(e.to_string()))
        }
        ConfigFormat::Json => {
            serde_json::to_string_pretty(value).map_err(|e| ConfigError::Render(e.to_string()))
        }
        ConfigFormat::Toml => {
            toml::to_string_pretty(value).map_err(|e| ConfigError::Render(e.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_from_extension() {
        assert_eq!(ConfigFormat::from_path(Path::new("a/config.yml")), ConfigFormat::Yaml);
        assert_eq!(ConfigFormat::from_path(Path::new("config.yaml")), ConfigFormat::Yaml);
        assert_eq!(ConfigFormat::from_path(Path::new("data.json")), ConfigFormat::Json);
        assert_eq!(ConfigFormat::from_path(Path::new("settings.toml")), ConfigFormat::Toml);
        assert_eq!(ConfigFormat::from_path(Path::new("noext")), ConfigFormat::Yaml);
    }

    #[test]
    fn empty_files_parse_to_empty_trees() {
        for format in [ConfigFormat::Yaml, ConfigFormat::Json] {
            let tree = parse(format, "").unwrap();
            assert_eq!(tree, Value::Object(serde_json::Map::new()));
        }
        let tree = parse(ConfigFormat::Toml, "").unwrap();
        assert_eq!(tree, Value::Object(serde_json::Map::new()));
    }

    #[test]
    fn trees_round_trip_per_format() {
        let value = serde_json::json!({
            "server": {"motd": "hello", "max_players": 64, "pvp": true}
        });
        for format in [ConfigFormat::Yaml, ConfigFormat::Json, ConfigFormat::Toml] {
            let text = render(format, &value).unwrap();
            assert_eq!(parse(format, &text).unwrap(), value);
        }
    }
}
