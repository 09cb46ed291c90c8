//! Reload the logger from a JSON file whenever it changes.
//!
//! ```text
//! cargo run --example hot_reload -- logging.json
//! kill -USR1 <pid>   # raise to debug
//! kill -USR2 <pid>   # errors only
//! ```

use notify::{Event, EventKind, RecursiveMode, Watcher};
use reloadable_logger::{debug, error, info, warn, LifecycleController, LogConfiguration, Logger, LoggerError};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, RecvTimeoutError};
use std::sync::Arc;
use std::time::Duration;

fn load(path: &Path) -> LogConfiguration {
    match fs::read_to_string(path)
        .map_err(LoggerError::from)
        .and_then(|text| LogConfiguration::from_json(&text))
    {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Using default logging configuration: {}", e);
            LogConfiguration::default()
        }
    }
}

fn main() -> notify::Result<()> {
    let path = PathBuf::from(std::env::args().nth(1).unwrap_or_else(|| "logging.json".to_string()));
    let path = path.canonicalize().unwrap_or(path);
    let file_name = path.file_name().map(|name| name.to_os_string());
    let watch_dir = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or(Path::new("."))
        .to_path_buf();

    let logger = Arc::new(Logger::new());
    let controller = LifecycleController::new(Arc::clone(&logger));
    controller.reload(load(&path));
    info!(logger, "started with pid {}", std::process::id());

    // Editors often replace the file on save, so watch the directory
    let (tx, rx) = channel::<()>();
    let mut watcher = notify::recommended_watcher(move |result: notify::Result<Event>| {
        let Ok(event) = result else { return };
        if !matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_)) {
            return;
        }
        if event
            .paths
            .iter()
            .any(|changed| changed.file_name().map(|n| n.to_os_string()) == file_name)
        {
            let _ = tx.send(());
        }
    })?;
    watcher.watch(&watch_dir, RecursiveMode::NonRecursive)?;

    for tick in 0u64..600 {
        match rx.recv_timeout(Duration::from_secs(1)) {
            Ok(()) => {
                // Collapse the burst of events a single save produces
                while rx.try_recv().is_ok() {}
                controller.reload(load(&path));
                warn!(logger, "configuration reloaded, level is now {}", logger.level());
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }

        debug!(logger, "tick {}", tick);
        if tick % 10 == 0 {
            info!(logger, "still running after {} ticks", tick);
        }
        if tick % 60 == 59 {
            error!(logger, "simulated failure at tick {}", tick);
        }
    }

    controller.destroy();
    Ok(())
}
