//! The config-tree manager.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

use crate::codec::{self, ConfigFormat};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(String),
    #[error("failed to render config: {0}")]
    Render(String),
    #[error("failed to watch config: {0}")]
    Watch(String),
}

/// One config file held as a tree of values with dotted-path access.
///
/// The tree survives bad edits: a failed [`ConfigManager::reload`]
/// keeps the last good tree in place.
pub struct ConfigManager {
    path: PathBuf,
    format: ConfigFormat,
    root: RwLock<Value>,
}

impl ConfigManager {
    /// Open (or bootstrap) a config file, guessing the format from the
    /// file extension. Missing files are created empty.
    pub fn open(path: impl Into<PathBuf>) -> Result<Arc<Self>, ConfigError> {
        let path = path.into();
        let format = ConfigFormat::from_path(&path);
        Self::open_with_seed(path, format, "")
    }

    /// Open (or bootstrap) a config file with an explicit format. When
    /// the file does not exist it is created with `seed` as its initial
    /// content, so a fresh install starts from the shipped defaults.
    pub fn open_with_seed(
        path: impl Into<PathBuf>,
        format: ConfigFormat,
        seed: &str,
    ) -> Result<Arc<Self>, ConfigError> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        if !path.exists() {
            fs::write(&path, seed)?;
            log::info!("prism_config: created config file {}", path.display());
        }
        let text = fs::read_to_string(&path)?;
        let root = codec::parse(format, &text)?;
        Ok(Arc::new(Self {
            path,
            format,
            root: RwLock::new(root),
        }))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn format(&self) -> ConfigFormat {
        self.format
    }

    /// Re-read the file from disk. On parse failure the previous tree
    /// stays in place and the error is returned.
    pub fn reload(&self) -> Result<(), ConfigError> {
        let text = fs::read_to_string(&self.path)?;
        let parsed = codec::parse(self.format, &text)?;
        *self.root.write().unwrap_or_else(|e| e.into_inner()) = parsed;
        log::debug!("prism_config: reloaded {}", self.path.display());
        Ok(())
    }

    /// Write the current tree back to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        let text = {
            let root = self.root.read().unwrap_or_else(|e| e.into_inner());
            codec::render(self.format, &root)?
        };
        fs::write(&self.path, text)?;
        Ok(())
    }

    #[must_use]
    pub fn contains(&self, dotted: &str) -> bool {
        self.get(dotted).is_some()
    }

    /// The value at a dotted path, e.g. `"server.motd"`.
    #[must_use]
    pub fn get(&self, dotted: &str) -> Option<Value> {
        let root = self.root.read().unwrap_or_else(|e| e.into_inner());
        navigate(&root, dotted).cloned()
    }

    #[must_use]
    pub fn get_string(&self, dotted: &str) -> Option<String> {
        self.get(dotted)?.as_str().map(str::to_string)
    }

    #[must_use]
    pub fn get_bool(&self, dotted: &str) -> Option<bool> {
        self.get(dotted)?.as_bool()
    }

    #[must_use]
    pub fn get_i64(&self, dotted: &str) -> Option<i64> {
        self.get(dotted)?.as_i64()
    }

    #[must_use]
    pub fn get_f64(&self, dotted: &str) -> Option<f64> {
        self.get(dotted)?.as_f64()
    }

    #[must_use]
    pub fn get_uuid(&self, dotted: &str) -> Option<Uuid> {
        Uuid::parse_str(self.get(dotted)?.as_str()?).ok()
    }

    /// Deserialize the value at a dotted path into any serde type, e.g.
    /// an enum carried by name.
    #[must_use]
    pub fn get_as<T: serde::de::DeserializeOwned>(&self, dotted: &str) -> Option<T> {
        serde_json::from_value(self.get(dotted)?).ok()
    }

    /// A list of strings; non-string entries are skipped.
    #[must_use]
    pub fn get_string_list(&self, dotted: &str) -> Vec<String> {
        match self.get(dotted) {
            Some(Value::Array(entries)) => entries
                .into_iter()
                .filter_map(|entry| entry.as_str().map(str::to_string))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Set the value at a dotted path, creating intermediate tables as
    /// needed, and persist the tree.
    pub fn set(&self, dotted: &str, value: Value) -> Result<(), ConfigError> {
        {
            let mut root = self.root.write().unwrap_or_else(|e| e.into_inner());
            let mut node = &mut *root;
            let segments: Vec<&str> = dotted.split('.').collect();
            for (i, segment) in segments.iter().enumerate() {
                if !node.is_object() {
                    *node = Value::Object(serde_json::Map::new());
                }
                let map = node.as_object_mut().expect("just ensured object");
                if i == segments.len() - 1 {
                    map.insert((*segment).to_string(), value);
                    break;
                }
                node = map
                    .entry((*segment).to_string())
                    .or_insert_with(|| Value::Object(serde_json::Map::new()));
            }
        }
        self.save()
    }
}

fn navigate<'a>(root: &'a Value, dotted: &str) -> Option<&'a Value> {
    let mut node = root;
    for segment in dotted.split('.') {
        node = node.as_object()?.get(segment)?;
    }
    Some(node)
}
