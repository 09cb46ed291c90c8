//! Reload/destroy lifecycle of a [`Logger`]

use super::listener::LevelSignalListener;
use super::signals::{default_signal_source, LevelSignalSource};
use super::sink_wiring;
use crate::core::{LogConfiguration, Logger};
use parking_lot::Mutex;
use std::io::Write;
use std::sync::Arc;

/// Produces the stream console output is written to on each reload
pub type ConsoleWriterFactory = Arc<dyn Fn() -> Box<dyn Write + Send + Sync> + Send + Sync>;

#[derive(Default)]
struct LifecycleState {
    /// Listener of the live epoch, if any
    epoch: Option<LevelSignalListener>,
    /// Set on the first file sink attempt and never cleared
    file_sink_attempted: bool,
    config: Option<Arc<LogConfiguration>>,
}

/// Applies configuration snapshots to a shared [`Logger`].
///
/// Every [`reload`](Self::reload) tears down the previous epoch, waiting for
/// its level listener to exit, before configuring the next one. At most one
/// epoch is live at a time.
///
/// The file sink is attached at most once per controller. Later reloads
/// update the console output and the level but leave the file sink as it is,
/// even when the first attempt to open it failed.
///
/// # Example
///
/// ```no_run
/// use reloadable_logger::{LifecycleController, LogConfiguration, Logger};
/// use std::sync::Arc;
///
/// let logger = Arc::new(Logger::new());
/// let controller = LifecycleController::new(Arc::clone(&logger));
///
/// controller.reload(LogConfiguration::default());
/// logger.info("configured");
///
/// controller.destroy();
/// ```
pub struct LifecycleController {
    logger: Arc<Logger>,
    signals: Arc<dyn LevelSignalSource>,
    console_writer: Option<ConsoleWriterFactory>,
    state: Mutex<LifecycleState>,
}

impl LifecycleController {
    /// Controller listening for level overrides on the platform default source
    pub fn new(logger: Arc<Logger>) -> Self {
        Self::with_signal_source(logger, default_signal_source())
    }

    pub fn with_signal_source(logger: Arc<Logger>, signals: Arc<dyn LevelSignalSource>) -> Self {
        Self {
            logger,
            signals,
            console_writer: None,
            state: Mutex::new(LifecycleState::default()),
        }
    }

    /// Send console output to streams made by `factory` instead of stdout
    #[must_use = "builder methods return a new value"]
    pub fn with_console_writer<F>(mut self, factory: F) -> Self
    where
        F: Fn() -> Box<dyn Write + Send + Sync> + Send + Sync + 'static,
    {
        self.console_writer = Some(Arc::new(factory));
        self
    }

    /// Apply `config`. Never fails: problems are reported on stderr and
    /// leave logging degraded rather than stopped.
    pub fn reload(&self, config: LogConfiguration) {
        let mut state = self.state.lock();

        Self::end_epoch(&mut state);

        let writer = self.console_writer.as_ref().map(|factory| factory());
        self.logger
            .set_output(sink_wiring::console_output(&config, writer));

        self.logger.set_level(config.level());

        if !state.file_sink_attempted {
            state.file_sink_attempted = true;
            match sink_wiring::file_sink(&config) {
                Ok(sink) => self.logger.add_hook(sink),
                Err(e) => eprintln!(
                    "[LOGGER ERROR] Failed to attach file sink '{}': {}",
                    config.log_file, e
                ),
            }
        }

        match LevelSignalListener::spawn(self.logger.active_level(), Arc::clone(&self.signals)) {
            Ok(listener) => state.epoch = Some(listener),
            Err(e) => eprintln!(
                "[LOGGER WARNING] Level overrides via '{}' unavailable: {}",
                self.signals.name(),
                e
            ),
        }

        state.config = Some(Arc::new(config));
    }

    /// End the live epoch and wait for its listener to exit. A no-op when
    /// nothing is live; safe to call repeatedly.
    pub fn destroy(&self) {
        let mut state = self.state.lock();
        Self::end_epoch(&mut state);
    }

    fn end_epoch(state: &mut LifecycleState) {
        if let Some(mut listener) = state.epoch.take() {
            listener.stop();
        }
    }

    /// Whether a level listener is currently running
    pub fn is_listening(&self) -> bool {
        self.state
            .lock()
            .epoch
            .as_ref()
            .is_some_and(|listener| !listener.is_finished())
    }

    /// Snapshot applied by the last reload
    pub fn config(&self) -> Option<Arc<LogConfiguration>> {
        self.state.lock().config.clone()
    }

    pub fn logger(&self) -> &Arc<Logger> {
        &self.logger
    }
}

impl Drop for LifecycleController {
    fn drop(&mut self) {
        Self::end_epoch(self.state.get_mut());
    }
}
