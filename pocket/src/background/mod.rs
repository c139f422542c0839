pub mod data_loader;

use std::collections::HashMap;
use std::future::Future;
use tokio::task::JoinHandle;

/// Tracks running background tasks by id and provides cancellation
pub struct BackgroundTaskManager {
    tasks: HashMap<String, JoinHandle<()>>,
}

impl BackgroundTaskManager {
    pub fn new() -> Self {
        Self {
            tasks: HashMap::new(),
        }
    }

    /// Spawn a background task
    ///
    /// A still-running task with the same id is aborted first, so its result never arrives.
    pub fn spawn_load_task<F>(&mut self, task_id: String, future: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.tasks.retain(|_, handle| !handle.is_finished());

        if let Some(handle) = self.tasks.remove(&task_id) {
            tracing::debug!("Aborting in-flight task {}", task_id);
            handle.abort();
        }

        let handle = tokio::spawn(future);
        self.tasks.insert(task_id, handle);
    }

    /// Cancel all running tasks (used on shutdown)
    pub fn cancel_all(&mut self) {
        for (_, handle) in self.tasks.drain() {
            handle.abort();
        }
    }
}

impl Default for BackgroundTaskManager {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for BackgroundTaskManager {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::sync::oneshot;

    #[tokio::test]
    async fn respawning_an_id_aborts_the_previous_task() {
        let mut manager = BackgroundTaskManager::new();
        let (first_tx, first_rx) = oneshot::channel::<()>();
        let (second_tx, second_rx) = oneshot::channel::<()>();

        manager.spawn_load_task("load".to_string(), async move {
            tokio::time::sleep(Duration::from_secs(60)).await;
            let _ = first_tx.send(());
        });
        manager.spawn_load_task("load".to_string(), async move {
            let _ = second_tx.send(());
        });

        assert!(second_rx.await.is_ok());
        // The aborted task dropped its sender without sending
        assert!(first_rx.await.is_err());
    }

    #[tokio::test]
    async fn cancel_all_stops_everything() {
        let mut manager = BackgroundTaskManager::new();
        let (tx, rx) = oneshot::channel::<()>();
        manager.spawn_load_task("a".to_string(), async move {
            tokio::time::sleep(Duration::from_secs(60)).await;
            let _ = tx.send(());
        });
        manager.cancel_all();
        assert!(rx.await.is_err());
    }
}
