//! External level-override notifications
//!
//! An operator raises or lowers verbosity on a live process through one of
//! two notifications. On unix these are SIGUSR1 (raise to debug) and SIGUSR2
//! (lower to error-only); [`ManualSignalSource`] delivers the same
//! notifications from inside the process.

use crate::core::{LogLevel, Result};
use async_trait::async_trait;
use tokio::sync::broadcast;

/// The two runtime overrides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LevelOverride {
    RaiseToDebug,
    LowerToError,
}

impl LevelOverride {
    pub fn level(self) -> LogLevel {
        match self {
            LevelOverride::RaiseToDebug => LogLevel::Debug,
            LevelOverride::LowerToError => LogLevel::Error,
        }
    }
}

/// A live registration of interest in level overrides. Dropping it
/// deregisters.
#[async_trait]
pub trait LevelSignals: Send {
    /// Wait for the next override. `None` means no further overrides will
    /// arrive. Must be cancel-safe.
    async fn next(&mut self) -> Option<LevelOverride>;
}

/// Where level overrides come from
pub trait LevelSignalSource: Send + Sync {
    /// Register interest. Called from inside the listener's tokio runtime.
    fn subscribe(&self) -> Result<Box<dyn LevelSignals>>;

    fn name(&self) -> &str;
}

/// Source used when none is given: OS signals on unix, in-process elsewhere
pub fn default_signal_source() -> std::sync::Arc<dyn LevelSignalSource> {
    #[cfg(unix)]
    {
        std::sync::Arc::new(UnixSignalSource)
    }
    #[cfg(not(unix))]
    {
        std::sync::Arc::new(ManualSignalSource::new())
    }
}

#[cfg(unix)]
pub use unix::UnixSignalSource;

#[cfg(unix)]
mod unix {
    use super::*;
    use crate::core::LoggerError;
    use parking_lot::Mutex;
    use std::thread;
    use tokio::signal::unix::{signal, SignalKind};

    /// SIGUSR1 raises to debug, SIGUSR2 lowers to error.
    ///
    /// The OS handlers are installed once per process on a forwarder thread
    /// that relays into a broadcast channel. A signal arriving while nobody
    /// is subscribed is dropped instead of being held for the next listener.
    #[derive(Debug, Default, Clone, Copy)]
    pub struct UnixSignalSource;

    static FORWARDER: Mutex<Option<broadcast::Sender<LevelOverride>>> = Mutex::new(None);

    const FORWARDER_THREAD_NAME: &str = "level-signal-forwarder";

    /// Sender fed by the process-wide forwarder, starting it on first use
    fn forwarder() -> Result<broadcast::Sender<LevelOverride>> {
        let mut slot = FORWARDER.lock();
        if let Some(sender) = slot.as_ref() {
            return Ok(sender.clone());
        }

        let (sender, _) = broadcast::channel(16);
        let forward = sender.clone();
        let (ready_tx, ready_rx) = crossbeam_channel::bounded::<Result<()>>(1);

        thread::Builder::new()
            .name(FORWARDER_THREAD_NAME.to_string())
            .spawn(move || {
                let runtime = match tokio::runtime::Builder::new_current_thread()
                    .enable_all()
                    .build()
                {
                    Ok(runtime) => runtime,
                    Err(e) => {
                        let _ = ready_tx.send(Err(LoggerError::io_operation(
                            "starting signal forwarder",
                            "cannot build runtime",
                            e,
                        )));
                        return;
                    }
                };

                runtime.block_on(async move {
                    let registered = signal(SignalKind::user_defined1())
                        .map_err(|e| LoggerError::io_operation("registering SIGUSR1", "cannot install handler", e))
                        .and_then(|raise| {
                            signal(SignalKind::user_defined2())
                                .map(|lower| (raise, lower))
                                .map_err(|e| {
                                    LoggerError::io_operation("registering SIGUSR2", "cannot install handler", e)
                                })
                        });
                    let (mut raise, mut lower) = match registered {
                        Ok(pair) => pair,
                        Err(e) => {
                            let _ = ready_tx.send(Err(e));
                            return;
                        }
                    };
                    let _ = ready_tx.send(Ok(()));

                    loop {
                        let received = tokio::select! {
                            received = raise.recv() => received.map(|_| LevelOverride::RaiseToDebug),
                            received = lower.recv() => received.map(|_| LevelOverride::LowerToError),
                        };
                        match received {
                            // No subscriber means no live epoch; the signal is dropped
                            Some(signal) => {
                                let _ = forward.send(signal);
                            }
                            None => break,
                        }
                    }
                });
            })
            .map_err(|e| LoggerError::io_operation("starting signal forwarder", "cannot spawn thread", e))?;

        match ready_rx.recv() {
            Ok(Ok(())) => {
                *slot = Some(sender.clone());
                Ok(sender)
            }
            Ok(Err(e)) => Err(e),
            Err(_) => Err(LoggerError::listener("signal forwarder exited before registering")),
        }
    }

    impl LevelSignalSource for UnixSignalSource {
        fn subscribe(&self) -> Result<Box<dyn LevelSignals>> {
            Ok(Box::new(BroadcastLevelSignals {
                receiver: forwarder()?.subscribe(),
            }))
        }

        fn name(&self) -> &str {
            "unix"
        }
    }

}

/// In-process override delivery.
///
/// Clones share one channel. Overrides sent while no listener is subscribed
/// are lost, just as an ignored OS signal would be.
///
/// # Example
///
/// ```
/// use reloadable_logger::lifecycle::{LevelOverride, ManualSignalSource};
///
/// let source = ManualSignalSource::new();
/// // Nobody is listening yet
/// assert_eq!(source.notify(LevelOverride::RaiseToDebug), 0);
/// ```
#[derive(Debug, Clone)]
pub struct ManualSignalSource {
    sender: broadcast::Sender<LevelOverride>,
}

/// Subscription to a broadcast of overrides
struct BroadcastLevelSignals {
    receiver: broadcast::Receiver<LevelOverride>,
}

impl ManualSignalSource {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(16);
        Self { sender }
    }

    /// Deliver an override; returns how many listeners received it
    pub fn notify(&self, signal: LevelOverride) -> usize {
        self.sender.send(signal).unwrap_or(0)
    }

    pub fn raise_to_debug(&self) -> usize {
        self.notify(LevelOverride::RaiseToDebug)
    }

    pub fn lower_to_error(&self) -> usize {
        self.notify(LevelOverride::LowerToError)
    }

    /// Listeners currently registered
    pub fn listener_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for ManualSignalSource {
    fn default() -> Self {
        Self::new()
    }
}

impl LevelSignalSource for ManualSignalSource {
    fn subscribe(&self) -> Result<Box<dyn LevelSignals>> {
        Ok(Box::new(BroadcastLevelSignals {
            receiver: self.sender.subscribe(),
        }))
    }

    fn name(&self) -> &str {
        "manual"
    }
}

#[async_trait]
impl LevelSignals for BroadcastLevelSignals {
    async fn next(&mut self) -> Option<LevelOverride> {
        loop {
            match self.receiver.recv().await {
                Ok(signal) => return Some(signal),
                // Only the latest override matters
                Err(broadcast::error::RecvError::Lagged(_)) => continue,
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}
