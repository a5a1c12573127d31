//! Console command dispatch capability.

use std::sync::{Arc, Mutex};

use crate::BoxFuture;

/// Dispatches a command line as the server console. Placeholder
/// substitution happens before the command reaches this trait.
pub trait CommandDispatcher: Send + Sync {
    fn dispatch_console<'a>(&'a self, command: &'a str) -> BoxFuture<'a, ()>;
}

/// Default dispatcher for hosts without a console hook: logs the command.
#[derive(Default)]
pub struct LoggingDispatcher;

impl CommandDispatcher for LoggingDispatcher {
    fn dispatch_console<'a>(&'a self, command: &'a str) -> BoxFuture<'a, ()> {
        Box::pin(async move {
            log::info!("prism_host: console dispatch '{command}'");
        })
    }
}

/// Records dispatched commands so tests can assert on them.
#[derive(Default)]
pub struct RecordingDispatcher {
    commands: Mutex<Vec<String>>,
}

impl RecordingDispatcher {
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    #[must_use]
    pub fn commands(&self) -> Vec<String> {
        self.commands.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl CommandDispatcher for RecordingDispatcher {
    fn dispatch_console<'a>(&'a self, command: &'a str) -> BoxFuture<'a, ()> {
        Box::pin(async move {
            self.commands
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .push(command.to_string());
        })
    }
}
