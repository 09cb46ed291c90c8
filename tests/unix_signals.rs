//! Level overrides delivered as real SIGUSR1/SIGUSR2
#![cfg(unix)]

use nix::sys::signal::{raise, Signal};
use reloadable_logger::{LifecycleController, LogConfiguration, LogLevel, Logger};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tempfile::TempDir;

fn eventually(mut condition: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + Duration::from_secs(2);
    while Instant::now() < deadline {
        if condition() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(5));
    }
    condition()
}

// Signal disposition is process-wide, so everything runs in one test.
#[test]
fn test_user_signals_switch_level() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let logger = Arc::new(Logger::new());
    let controller = LifecycleController::new(Arc::clone(&logger));

    controller.reload(LogConfiguration {
        enable_console: false,
        log_file: temp_dir.path().join("signals.log").display().to_string(),
        level: "warn".to_string(),
        ..LogConfiguration::default()
    });
    assert_eq!(logger.level(), LogLevel::Warn);

    raise(Signal::SIGUSR1).expect("Failed to raise SIGUSR1");
    assert!(eventually(|| logger.level() == LogLevel::Debug));

    raise(Signal::SIGUSR2).expect("Failed to raise SIGUSR2");
    assert!(eventually(|| logger.level() == LogLevel::Error));

    // A fresh epoch registers again after a reload
    controller.reload(LogConfiguration {
        enable_console: false,
        level: "info".to_string(),
        ..LogConfiguration::default()
    });
    assert_eq!(logger.level(), LogLevel::Info);
    raise(Signal::SIGUSR1).expect("Failed to raise SIGUSR1");
    assert!(eventually(|| logger.level() == LogLevel::Debug));

    controller.destroy();
    assert!(!controller.is_listening());

    // A signal sent between epochs is dropped, not replayed into the next one
    raise(Signal::SIGUSR1).expect("Failed to raise SIGUSR1");
    std::thread::sleep(Duration::from_millis(100));
    assert_eq!(logger.level(), LogLevel::Debug);
    logger.set_level(LogLevel::Info);

    controller.reload(LogConfiguration {
        enable_console: false,
        level: "warn".to_string(),
        ..LogConfiguration::default()
    });
    std::thread::sleep(Duration::from_millis(300));
    assert_eq!(logger.level(), LogLevel::Warn);

    raise(Signal::SIGUSR2).expect("Failed to raise SIGUSR2");
    assert!(eventually(|| logger.level() == LogLevel::Error));
    controller.destroy();
}
