//! Task scheduling capabilities. The host platform owns a single
//! coordinating loop: all inventory mutation and every "open for player"
//! call must land there. Population work may run anywhere.

use std::sync::Arc;

use tokio::sync::oneshot;

use crate::BoxFuture;

/// Submits work to the host's execution contexts.
pub trait Scheduler: Send + Sync {
    /// Run `task` on the coordinating loop. The returned future resolves
    /// once the task has run; callers may await it or drop it for
    /// fire-and-forget scheduling.
    fn run_main(&self, task: BoxFuture<'static, ()>) -> BoxFuture<'static, ()>;

    /// Run `task` on a background worker, same completion contract.
    fn run_background(&self, task: BoxFuture<'static, ()>) -> BoxFuture<'static, ()>;
}

/// Production scheduler: a dedicated single-worker runtime stands in for
/// the game loop, and a small worker pool takes background population.
pub struct HostScheduler {
    main: tokio::runtime::Runtime,
    workers: tokio::runtime::Runtime,
}

impl HostScheduler {
    pub fn new() -> std::io::Result<Arc<Self>> {
        let main = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .thread_name("prism-main")
            .build()?;
        let workers = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .thread_name("prism-worker")
            .build()?;
        Ok(Arc::new(Self { main, workers }))
    }
}

impl Scheduler for HostScheduler {
    fn run_main(&self, task: BoxFuture<'static, ()>) -> BoxFuture<'static, ()> {
        let (done_tx, done_rx) = oneshot::channel();
        self.main.spawn(async move {
            task.await;
            let _ = done_tx.send(());
        });
        Box::pin(async move {
            let _ = done_rx.await;
        })
    }

    fn run_background(&self, task: BoxFuture<'static, ()>) -> BoxFuture<'static, ()> {
        let (done_tx, done_rx) = oneshot::channel();
        self.workers.spawn(async move {
            task.await;
            let _ = done_tx.send(());
        });
        Box::pin(async move {
            let _ = done_rx.await;
        })
    }
}

/// Test scheduler: the "scheduled" task simply runs inline when the
/// completion future is awaited, making render flows deterministic.
#[derive(Default)]
pub struct ImmediateScheduler;

impl ImmediateScheduler {
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new(Self)
    }
}

impl Scheduler for ImmediateScheduler {
    fn run_main(&self, task: BoxFuture<'static, ()>) -> BoxFuture<'static, ()> {
        task
    }

    fn run_background(&self, task: BoxFuture<'static, ()>) -> BoxFuture<'static, ()> {
        task
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[tokio::test]
    async fn immediate_scheduler_runs_on_await() {
        let ran = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&ran);
        let scheduler = ImmediateScheduler::new();
        let completion = scheduler.run_main(Box::pin(async move {
            flag.store(true, Ordering::SeqCst);
        }));
        assert!(!ran.load(Ordering::SeqCst));
        completion.await;
        assert!(ran.load(Ordering::SeqCst));
    }

    #[test]
    fn host_scheduler_runs_main_tasks() {
        let scheduler = HostScheduler::new().expect("runtime");
        let (tx, rx) = std::sync::mpsc::channel();
        let _ = scheduler.run_main(Box::pin(async move {
            let _ = tx.send(std::thread::current().name().map(String::from));
        }));
        let thread_name = rx
            .recv_timeout(std::time::Duration::from_secs(5))
            .expect("main task ran");
        assert_eq!(thread_name.as_deref(), Some("prism-main"));
    }
}
