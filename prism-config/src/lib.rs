//! Configuration-tree managers for the Prism plugin suite.
//!
//! A [`ConfigManager`] owns one config file as a tree of values with
//! dotted-path access. The file format is pluggable (YAML, JSON, TOML);
//! the tree itself is format-independent. Managers bootstrap missing
//! files from seed content, and [`watch`] re-loads a file when it
//! changes on disk, marshaled onto the host's coordinating loop.

mod codec;
mod manager;
mod watcher;

pub use codec::ConfigFormat;
pub use manager::{ConfigError, ConfigManager};
pub use watcher::{watch, ConfigWatcher};
