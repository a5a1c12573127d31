//! Watch-triggered config reload.

use std::ffi::OsString;
use std::path::Path;
use std::sync::Arc;

use notify::{RecursiveMode, Watcher};
use prism_host::Scheduler;

use crate::manager::{ConfigError, ConfigManager};

/// Keeps the underlying filesystem watcher alive. Dropping this stops
/// reloads.
pub struct ConfigWatcher {
    _watcher: notify::RecommendedWatcher,
}

/// Reload `manager` whenever its file changes on disk. The reload runs
/// on the host's coordinating loop, so config consumers never observe a
/// tree swap mid-tick. A reload that fails to parse logs and keeps the
/// previous tree.
pub fn watch(
    manager: Arc<ConfigManager>,
    scheduler: Arc<dyn Scheduler>,
) -> Result<ConfigWatcher, ConfigError> {
    let file_name: Option<OsString> = manager.path().file_name().map(OsString::from);
    let dir = manager
        .path()
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or(Path::new("."))
        .to_path_buf();

    let mut watcher = notify::recommended_watcher(move |event: notify::Result<notify::Event>| {
        let Ok(event) = event else {
            return;
        };
        if !event.kind.is_modify() && !event.kind.is_create() {
            return;
        }
        let concerns_file = event
            .paths
            .iter()
            .any(|path| path.file_name() == file_name.as_deref());
        if !concerns_file {
            return;
        }
        let manager = Arc::clone(&manager);
        drop(scheduler.run_main(Box::pin(async move {
            match manager.reload() {
                Ok(()) => log::info!(
                    "prism_config: {} auto-reloaded after file change",
                    manager.path().display()
                ),
                Err(e) => log::warn!(
                    "prism_config: reload of {} failed, keeping previous values: {e}",
                    manager.path().display()
                ),
            }
        })));
    })
    .map_err(|e| ConfigError::Watch(e.to_string()))?;

    watcher
        .watch(&dir, RecursiveMode::NonRecursive)
        .map_err(|e| ConfigError::Watch(e.to_string()))?;

    Ok(ConfigWatcher { _watcher: watcher })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::ConfigFormat;
    use prism_host::scheduler::HostScheduler;

    #[test]
    fn watcher_attaches_to_the_config_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yml");
        let manager =
            ConfigManager::open_with_seed(&path, ConfigFormat::Yaml, "a: 1\n").unwrap();
        let scheduler = HostScheduler::new().unwrap();
        let watcher = watch(manager, scheduler);
        assert!(watcher.is_ok());
    }
}
