use crate::sdk::maps::model::Position;
use std::future::Future;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(500);

/// Collapses a burst of relocation events into the latest one, delivered
/// after `quiet` has passed with no new event.
pub struct RelocationDebouncer {
    sender: mpsc::UnboundedSender<Position>,
    task: JoinHandle<()>,
}

impl RelocationDebouncer {
    pub fn spawn<F, Fut>(quiet: Duration, on_settled: F) -> Self
    where
        F: Fn(Position) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let (sender, mut receiver) = mpsc::unbounded_channel::<Position>();
        let task = tokio::spawn(async move {
            while let Some(first) = receiver.recv().await {
                let mut latest = first;
                let mut closed = false;
                loop {
                    tokio::select! {
                        next = receiver.recv() => match next {
                            Some(position) => latest = position,
                            None => {
                                closed = true;
                                break;
                            }
                        },
                        _ = tokio::time::sleep(quiet) => break,
                    }
                }
                log::debug!("Relocation settled at {}", latest);
                on_settled(latest).await;
                if closed {
                    break;
                }
            }
        });
        Self { sender, task }
    }

    /// Queues a relocation. Ignored once the debouncer has shut down.
    pub fn push(&self, position: Position) {
        if self.sender.send(position).is_err() {
            log::warn!("Relocation to {} dropped; debouncer stopped", position);
        }
    }

    /// Flushes any pending relocation and waits for it to be applied.
    pub async fn close(self) {
        drop(self.sender);
        if let Err(err) = self.task.await {
            log::error!("Relocation debouncer failed: {}", err);
        }
    }
}
