//! Reconfiguring a live logger
//!
//! [`LifecycleController`] applies configuration snapshots, wiring the console
//! output and the file sink and running one [`LevelSignalListener`] per epoch.

pub mod controller;
pub mod listener;
pub mod signals;
pub mod sink_wiring;

pub use controller::{ConsoleWriterFactory, LifecycleController};
pub use listener::LevelSignalListener;
#[cfg(unix)]
pub use signals::UnixSignalSource;
pub use signals::{default_signal_source, LevelOverride, LevelSignalSource, LevelSignals, ManualSignalSource};
pub use sink_wiring::FileSinkPlan;
