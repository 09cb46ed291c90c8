//! Background task applying level overrides to the active threshold

use super::signals::LevelSignalSource;
use crate::core::{ActiveLevel, LoggerError, Result};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tokio_util::sync::CancellationToken;

const THREAD_NAME: &str = "level-signal-listener";

/// One running listener: a dedicated thread driving a current-thread runtime
/// that waits on the cancellation token and the signal source at once.
///
/// Listening → (override) → Listening → ... → (cancel) → Stopped.
pub struct LevelSignalListener {
    cancel: CancellationToken,
    handle: Option<JoinHandle<()>>,
}

impl LevelSignalListener {
    /// Start listening. Returns once interest is registered with `source`, so
    /// an override delivered after this returns is never missed.
    ///
    /// # Errors
    ///
    /// Returns error if the thread or its runtime cannot be created, or if the
    /// source refuses the subscription.
    pub fn spawn(level: ActiveLevel, source: Arc<dyn LevelSignalSource>) -> Result<Self> {
        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let (ready_tx, ready_rx) = crossbeam_channel::bounded::<Result<()>>(1);

        let handle = thread::Builder::new()
            .name(THREAD_NAME.to_string())
            .spawn(move || {
                let runtime = match tokio::runtime::Builder::new_current_thread()
                    .enable_all()
                    .build()
                {
                    Ok(runtime) => runtime,
                    Err(e) => {
                        let _ = ready_tx.send(Err(LoggerError::io_operation(
                            "starting level listener",
                            "cannot build runtime",
                            e,
                        )));
                        return;
                    }
                };

                runtime.block_on(Self::listen(level, source, token, ready_tx));
            })
            .map_err(|e| LoggerError::io_operation("starting level listener", "cannot spawn thread", e))?;

        let mut listener = Self {
            cancel,
            handle: Some(handle),
        };

        match ready_rx.recv() {
            Ok(Ok(())) => Ok(listener),
            Ok(Err(e)) => {
                listener.stop();
                Err(e)
            }
            Err(_) => {
                listener.stop();
                Err(LoggerError::listener("listener exited before registering"))
            }
        }
    }

    async fn listen(
        level: ActiveLevel,
        source: Arc<dyn LevelSignalSource>,
        cancel: CancellationToken,
        ready: crossbeam_channel::Sender<Result<()>>,
    ) {
        let mut signals = match source.subscribe() {
            Ok(signals) => signals,
            Err(e) => {
                let _ = ready.send(Err(e));
                return;
            }
        };
        let _ = ready.send(Ok(()));

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                received = signals.next() => match received {
                    Some(signal) => level.set(signal.level()),
                    // Source is gone; nothing left to do but wait for cancellation
                    None => {
                        cancel.cancelled().await;
                        break;
                    }
                },
            }
        }

        drop(signals);
    }

    /// Cancel and wait for the thread to exit. Blocks without timeout.
    pub fn stop(&mut self) {
        self.cancel.cancel();
        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.join() {
                eprintln!("[LOGGER ERROR] Level signal listener panicked: {:?}", e);
            }
        }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map_or(true, |h| h.is_finished())
    }
}

impl Drop for LevelSignalListener {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LogLevel;
    use crate::lifecycle::signals::{LevelSignals, ManualSignalSource};
    use crate::test_support::wait_until;

    struct RefusingSource;

    impl LevelSignalSource for RefusingSource {
        fn subscribe(&self) -> Result<Box<dyn LevelSignals>> {
            Err(LoggerError::listener("refused"))
        }

        fn name(&self) -> &str {
            "refusing"
        }
    }

    #[test]
    fn test_overrides_change_level() {
        let level = ActiveLevel::new(LogLevel::Info);
        let source = ManualSignalSource::new();
        let mut listener = LevelSignalListener::spawn(level.clone(), Arc::new(source.clone())).unwrap();

        assert_eq!(source.raise_to_debug(), 1);
        assert!(wait_until(|| level.get() == LogLevel::Debug));

        assert_eq!(source.lower_to_error(), 1);
        assert!(wait_until(|| level.get() == LogLevel::Error));

        // Repeating an override is idempotent
        assert_eq!(source.lower_to_error(), 1);
        std::thread::sleep(std::time::Duration::from_millis(20));
        assert_eq!(level.get(), LogLevel::Error);

        listener.stop();
        assert!(listener.is_finished());
    }

    #[test]
    fn test_stop_deregisters() {
        let level = ActiveLevel::new(LogLevel::Warn);
        let source = ManualSignalSource::new();
        let mut listener = LevelSignalListener::spawn(level.clone(), Arc::new(source.clone())).unwrap();
        assert_eq!(source.listener_count(), 1);

        listener.stop();

        assert_eq!(source.listener_count(), 0);
        assert_eq!(source.raise_to_debug(), 0);
        assert_eq!(level.get(), LogLevel::Warn);
    }

    #[test]
    fn test_stop_is_idempotent() {
        let source = ManualSignalSource::new();
        let mut listener = LevelSignalListener::spawn(ActiveLevel::default(), Arc::new(source)).unwrap();
        listener.stop();
        listener.stop();
        assert!(listener.is_finished());
    }

    #[test]
    fn test_refused_subscription_is_reported() {
        let err = LevelSignalListener::spawn(ActiveLevel::default(), Arc::new(RefusingSource))
            .err()
            .unwrap();
        assert!(err.to_string().contains("refused"));
    }
}
