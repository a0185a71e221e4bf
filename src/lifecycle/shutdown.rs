//! Process-wide stop signal.
//!
//! One `Shutdown` is created at startup and cloned into the server and the
//! handler state. `axum::serve` waits on it to stop accepting connections,
//! and each open `/reload` socket waits on it to send its close frame.

use std::future::Future;

use tokio::sync::broadcast;

/// Cloneable handle to the stop signal. Every clone fires together.
#[derive(Debug, Clone)]
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Future that resolves once `trigger` is called.
    ///
    /// The subscription is taken when this is called, not when it is first
    /// polled, so a trigger in between is not lost.
    pub fn signalled(&self) -> impl Future<Output = ()> + Send + 'static {
        let mut rx = self.tx.subscribe();
        async move {
            let _ = rx.recv().await;
        }
    }

    /// Fire the signal. A no-op when nobody is listening.
    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }

    /// Listeners that have not dropped yet: the server loop plus one per
    /// open reload socket.
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn test_trigger_reaches_every_clone() {
        let shutdown = Shutdown::new();
        let first = shutdown.signalled();
        let second = shutdown.clone().signalled();
        assert_eq!(shutdown.subscriber_count(), 2);

        shutdown.trigger();

        tokio::time::timeout(Duration::from_secs(1), async {
            first.await;
            second.await;
        })
        .await
        .expect("a clone missed the signal");
    }

    #[tokio::test]
    async fn test_signalled_sees_trigger_before_first_poll() {
        let shutdown = Shutdown::new();
        let stopping = shutdown.signalled();
        assert_eq!(shutdown.subscriber_count(), 1);

        shutdown.trigger();

        tokio::time::timeout(Duration::from_secs(1), stopping)
            .await
            .expect("signal lost");
    }

    #[tokio::test]
    async fn test_dropped_listener_is_not_counted() {
        let shutdown = Shutdown::new();
        let stopping = shutdown.signalled();
        drop(stopping);
        assert_eq!(shutdown.subscriber_count(), 0);
    }

    #[test]
    fn test_trigger_without_subscribers_is_harmless() {
        Shutdown::new().trigger();
    }
}
