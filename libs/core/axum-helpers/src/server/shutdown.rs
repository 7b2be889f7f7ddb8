use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::signal;
use tokio::sync::broadcast;
use tracing::{error, info};

/// Coordinates graceful shutdown between the server and cleanup tasks.
///
/// The first SIGINT/SIGTERM flips the shutdown flag and notifies every
/// subscriber once.
#[derive(Clone)]
pub struct ShutdownCoordinator {
    tx: broadcast::Sender<()>,
    shutdown_initiated: Arc<AtomicBool>,
}

impl ShutdownCoordinator {
    /// Create a coordinator and a receiver for the shutdown notification.
    pub fn new() -> (Self, broadcast::Receiver<()>) {
        let (tx, rx) = broadcast::channel(1);
        let coordinator = Self {
            tx,
            shutdown_initiated: Arc::new(AtomicBool::new(false)),
        };
        (coordinator, rx)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    pub fn is_shutting_down(&self) -> bool {
        self.shutdown_initiated.load(Ordering::Relaxed)
    }

    /// Initiate shutdown and notify all subscribers. Later calls are no-ops.
    pub fn shutdown(&self) {
        if self
            .shutdown_initiated
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
        {
            info!("Initiating graceful shutdown");
            let _ = self.tx.send(());
        }
    }

    /// Wait for SIGINT or SIGTERM, then initiate shutdown.
    pub async fn wait_for_signal(&self) {
        shutdown_signal().await;
        self.shutdown();
    }

    /// Resolve once shutdown has been initiated by anyone.
    pub async fn wait_for_shutdown(&self) {
        let mut rx = self.subscribe();
        if self.is_shutting_down() {
            return;
        }
        let _ = rx.recv().await;
    }
}

impl Default for ShutdownCoordinator {
    fn default() -> Self {
        Self::new().0
    }
}

/// Resolves on Ctrl+C or SIGTERM.
///
/// If a handler cannot be installed the error is logged and that signal is
/// never observed.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received SIGINT (Ctrl+C), shutting down gracefully"),
        _ = terminate => info!("Received SIGTERM, shutting down gracefully"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_shutdown_notifies_subscribers_once() {
        let (coordinator, mut rx) = ShutdownCoordinator::new();
        assert!(!coordinator.is_shutting_down());

        coordinator.shutdown();
        coordinator.shutdown();

        assert!(coordinator.is_shutting_down());
        assert!(rx.recv().await.is_ok());
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_wait_for_shutdown_returns_after_shutdown() {
        let coordinator = ShutdownCoordinator::default();
        let waiter = coordinator.clone();
        let handle = tokio::spawn(async move { waiter.wait_for_shutdown().await });

        tokio::task::yield_now().await;
        coordinator.shutdown();
        handle.await.unwrap();
    }
}
