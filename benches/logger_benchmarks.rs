//! Criterion benchmarks for batch_logger

use batch_logger::prelude::*;
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Writer that drops every batch
struct NullWriter;

impl LogWriter for NullWriter {
    fn write(&mut self, _log_name: &str, entries: &[LogEntry]) -> Result<()> {
        black_box(entries.len());
        Ok(())
    }

    fn name(&self) -> &str {
        "null"
    }
}

fn bench_logger() -> Logger {
    Logger::builder()
        .default_log_name("bench")
        .flush_interval(Duration::from_millis(100))
        .writer(NullWriter)
        .build()
}

// ============================================================================
// Recording Benchmarks
// ============================================================================

fn bench_record(c: &mut Criterion) {
    let mut group = c.benchmark_group("record");
    group.throughput(Throughput::Elements(1));

    let logger = bench_logger();
    logger.start().unwrap();

    group.bench_function("default_log", |b| {
        b.iter(|| {
            logger.record(black_box("Benchmark message"), None, Origin::unknown());
        });
    });

    group.bench_function("named_log", |b| {
        b.iter(|| {
            logger.record_to(black_box("audit"), black_box("Benchmark message"), None, Origin::unknown());
        });
    });

    group.bench_function("macro_with_format", |b| {
        b.iter(|| {
            record!(logger, "Request {} served in {}ms", black_box(42), black_box(7));
        });
    });

    let fields: Arc<dyn LogExtension> = Arc::new(CsvFields::new().with_field("GET").with_field(200));
    group.bench_function("with_extension", |b| {
        b.iter(|| {
            logger.record(black_box("Benchmark message"), Some(Arc::clone(&fields)), Origin::unknown());
        });
    });

    logger.stop().unwrap();
    group.finish();
}

fn bench_disabled(c: &mut Criterion) {
    let mut group = c.benchmark_group("disabled");
    group.throughput(Throughput::Elements(1));

    let logger = Logger::disabled();

    group.bench_function("record_macro", |b| {
        b.iter(|| {
            record!(logger, "Never formatted {}", black_box(1));
        });
    });

    group.finish();
}

// ============================================================================
// Flush Benchmarks
// ============================================================================

fn bench_flush(c: &mut Criterion) {
    let mut group = c.benchmark_group("flush");

    for batch_size in [10usize, 1_000, 10_000] {
        group.throughput(Throughput::Elements(batch_size as u64));
        group.bench_function(format!("drain_{}", batch_size), |b| {
            let logger = bench_logger();
            b.iter(|| {
                for _ in 0..batch_size {
                    logger.record("Benchmark message", None, Origin::unknown());
                }
                logger.flush().unwrap();
            });
        });
    }

    group.finish();
}

// ============================================================================
// Concurrency Benchmarks
// ============================================================================

fn bench_concurrent_record(c: &mut Criterion) {
    let mut group = c.benchmark_group("concurrent_record");
    const PER_THREAD: usize = 1_000;

    for threads in [2usize, 4, 8] {
        group.throughput(Throughput::Elements((threads * PER_THREAD) as u64));
        group.bench_function(format!("{}_threads", threads), |b| {
            let logger = Arc::new(bench_logger());
            logger.start().unwrap();
            b.iter(|| {
                let handles: Vec<_> = (0..threads)
                    .map(|_| {
                        let logger = Arc::clone(&logger);
                        thread::spawn(move || {
                            for _ in 0..PER_THREAD {
                                logger.record("Concurrent message", None, Origin::unknown());
                            }
                        })
                    })
                    .collect();
                for handle in handles {
                    handle.join().unwrap();
                }
            });
            logger.stop().unwrap();
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_record,
    bench_disabled,
    bench_flush,
    bench_concurrent_record
);
criterion_main!(benches);
