use std::future::Future;
use std::time::Duration;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// A periodic task: runs `tick`, sleeps `period`, repeats until stopped.
///
/// Dropping the handle also stops the task after its current tick.
pub struct BackgroundTask {
    name: &'static str,
    stop_tx: oneshot::Sender<()>,
    handle: JoinHandle<()>,
}

impl BackgroundTask {
    pub fn spawn<F, Fut>(name: &'static str, period: Duration, mut tick: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let (stop_tx, mut stop_rx) = oneshot::channel::<()>();

        let handle = tokio::spawn(async move {
            tracing::info!("{} started, period {:?}", name, period);

            loop {
                tick().await;

                tokio::select! {
                    _ = &mut stop_rx => break,
                    _ = tokio::time::sleep(period) => {}
                }
            }

            tracing::info!("{} stopped", name);
        });

        Self { name, stop_tx, handle }
    }

    pub async fn stop(self) {
        let _ = self.stop_tx.send(());

        if let Err(e) = self.handle.await {
            tracing::error!("{} terminated abnormally: {}", self.name, e);
        }
    }
}
