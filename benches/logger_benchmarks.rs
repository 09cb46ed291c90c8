//! Criterion benchmarks for reloadable_logger

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use reloadable_logger::lifecycle::ManualSignalSource;
use reloadable_logger::prelude::*;
use std::sync::Arc;

// ============================================================================
// Line Formatting Benchmarks
// ============================================================================

fn bench_formatting(c: &mut Criterion) {
    let mut group = c.benchmark_group("formatting");
    group.throughput(Throughput::Elements(1));

    let entry = LogEntry::new(LogLevel::Info, "Request handled in 12ms".to_string());

    let variants = [
        ("bare", false, false, false),
        ("timestamp", true, false, false),
        ("timestamp_position", true, true, false),
        ("all_colored", true, true, true),
    ];

    for (name, enable_timestamp, enable_position, enable_color) in variants {
        let formatter = LineFormatter::new(FormatterOptions {
            enable_timestamp,
            enable_position,
            enable_color,
            ..FormatterOptions::default()
        });
        group.bench_function(name, |b| {
            b.iter(|| black_box(formatter.format(black_box(&entry))));
        });
    }

    let strftime = LineFormatter::new(FormatterOptions {
        timestamp_format: "%Y-%m-%dT%H:%M:%S%.3f".to_string(),
        ..FormatterOptions::default()
    });
    group.bench_function("strftime_pattern", |b| {
        b.iter(|| black_box(strftime.format(black_box(&entry))));
    });

    group.finish();
}

// ============================================================================
// Dispatch Benchmarks
// ============================================================================

fn bench_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch");
    group.throughput(Throughput::Elements(1));

    let logger = Logger::builder()
        .level(LogLevel::Info)
        .output(ConsoleAppender::with_writer(
            LineFormatter::new(FormatterOptions::default()),
            std::io::sink(),
        ))
        .build();

    group.bench_function("emitted", |b| {
        b.iter(|| logger.info(black_box("Info message")));
    });

    group.bench_function("filtered", |b| {
        b.iter(|| logger.debug(black_box("Debug message")));
    });

    group.bench_function("discard_output", |b| {
        let discarding = Logger::builder().output(ConsoleAppender::discard()).build();
        b.iter(|| discarding.info(black_box("Info message")));
    });

    group.finish();
}

// ============================================================================
// Lifecycle Benchmarks
// ============================================================================

fn bench_reload(c: &mut Criterion) {
    let mut group = c.benchmark_group("lifecycle");
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");

    let logger = Arc::new(Logger::new());
    let controller =
        LifecycleController::with_signal_source(Arc::clone(&logger), Arc::new(ManualSignalSource::new()));
    let config = LogConfiguration {
        enable_console: false,
        log_file: temp_dir.path().join("bench.log").display().to_string(),
        ..LogConfiguration::default()
    };

    group.bench_function("reload", |b| {
        b.iter(|| controller.reload(black_box(config.clone())));
    });

    controller.destroy();
    group.finish();
}

criterion_group!(benches, bench_formatting, bench_dispatch, bench_reload);
criterion_main!(benches);
