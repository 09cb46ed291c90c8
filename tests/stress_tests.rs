//! Stress tests for logging during reconfiguration
//!
//! These tests verify:
//! - Concurrent log calls while the controller reloads repeatedly
//! - No duplicate file sinks or listeners after many reloads
//! - Every line written to the file sink stays intact

use reloadable_logger::lifecycle::ManualSignalSource;
use reloadable_logger::{LifecycleController, LogConfiguration, LogLevel, Logger};
use std::fs;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use tempfile::TempDir;

const WRITERS: usize = 4;
const RELOADS: usize = 50;

fn config(dir: &std::path::Path, level: &str) -> LogConfiguration {
    LogConfiguration {
        enable_console: false,
        enable_timestamp: false,
        enable_position: false,
        log_file: dir.join("stress.log").display().to_string(),
        level: level.to_string(),
        max_backups: 0,
        ..LogConfiguration::default()
    }
}

#[test]
fn test_logging_during_repeated_reloads() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let logger = Arc::new(Logger::new());
    let source = ManualSignalSource::new();
    let controller = LifecycleController::with_signal_source(Arc::clone(&logger), Arc::new(source.clone()));
    controller.reload(config(temp_dir.path(), "info"));

    let running = Arc::new(AtomicBool::new(true));
    let writers: Vec<_> = (0..WRITERS)
        .map(|id| {
            let logger = Arc::clone(&logger);
            let running = Arc::clone(&running);
            thread::spawn(move || {
                let mut sent = 0usize;
                while running.load(Ordering::Relaxed) {
                    logger.error(format!("writer {} message {}", id, sent));
                    sent += 1;
                }
                sent
            })
        })
        .collect();

    for i in 0..RELOADS {
        let level = if i % 2 == 0 { "debug" } else { "error" };
        controller.reload(config(temp_dir.path(), level));
        source.raise_to_debug();
    }

    running.store(false, Ordering::Relaxed);
    let sent: usize = writers.into_iter().map(|w| w.join().expect("writer panicked")).sum();

    controller.destroy();
    logger.flush().expect("Failed to flush");

    assert_eq!(logger.hook_count(), 1);
    assert_eq!(source.listener_count(), 0);
    assert_eq!(logger.metrics().dropped_count(), 0);

    let content = fs::read_to_string(temp_dir.path().join("stress.log")).expect("Failed to read log file");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), sent);
    assert!(lines.iter().all(|line| line.starts_with("[ERRO] writer ")));
}

#[test]
fn test_concurrent_overrides_and_reads() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let logger = Arc::new(Logger::new());
    let source = ManualSignalSource::new();
    let controller = LifecycleController::with_signal_source(Arc::clone(&logger), Arc::new(source.clone()));
    controller.reload(config(temp_dir.path(), "warn"));

    let notifier = {
        let source = source.clone();
        thread::spawn(move || {
            for i in 0..500 {
                if i % 2 == 0 {
                    source.raise_to_debug();
                } else {
                    source.lower_to_error();
                }
            }
        })
    };

    for _ in 0..10_000 {
        let level = logger.level();
        assert!(matches!(level, LogLevel::Debug | LogLevel::Warn | LogLevel::Error));
    }

    notifier.join().expect("notifier panicked");
    controller.destroy();
    assert!(!controller.is_listening());
}
