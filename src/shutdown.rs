//! Cooperative cancellation shared by the watcher and the session.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

/// Triggers cancellation. Cheap to clone.
#[derive(Debug, Clone)]
pub struct CancelHandle(Arc<watch::Sender<bool>>);

/// Observes cancellation.
#[derive(Debug, Clone)]
pub struct Cancellation(watch::Receiver<bool>);

/// Creates a connected handle/observer pair.
pub fn channel() -> (CancelHandle, Cancellation) {
    let (tx, rx) = watch::channel(false);
    (CancelHandle(Arc::new(tx)), Cancellation(rx))
}

/// Cancels on the first Ctrl+C. Must be called inside a tokio runtime.
///
/// Installing the handler replaces the default SIGINT behavior, so call this
/// only once there is work that observes the returned [`Cancellation`].
pub fn on_ctrl_c() -> Cancellation {
    let (handle, cancellation) = channel();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                tracing::debug!("ctrl-c received");
                handle.cancel();
            }
            Err(e) => tracing::warn!(error = %e, "cannot listen for ctrl-c"),
        }
    });
    cancellation
}

impl CancelHandle {
    pub fn cancel(&self) {
        // send_replace never fails, even with no receivers left
        self.0.send_replace(true);
    }
}

impl Cancellation {
    /// An observer that is never cancelled.
    pub fn never() -> Self {
        let (_, rx) = watch::channel(false);
        Self(rx)
    }

    pub fn is_cancelled(&self) -> bool {
        *self.0.borrow()
    }

    /// Resolves once cancellation is requested.
    ///
    /// Pends forever when the handle was dropped without cancelling.
    pub async fn cancelled(&mut self) {
        let closed = self.0.wait_for(|cancelled| *cancelled).await.is_err();
        if closed {
            std::future::pending::<()>().await;
        }
    }

    /// Sleeps for `duration`, waking early on cancellation.
    ///
    /// Returns `true` if the full duration elapsed.
    pub async fn sleep(&mut self, duration: Duration) -> bool {
        tokio::select! {
            biased;
            () = self.cancelled() => false,
            () = tokio::time::sleep(duration) => true,
        }
    }
}
