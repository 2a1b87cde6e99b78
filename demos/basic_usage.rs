//! Basic logger usage example
//!
//! Demonstrates recording from several threads into named logs and printing
//! each flushed batch on the console.
//!
//! Run with: cargo run --example basic_usage

use batch_logger::prelude::*;
use batch_logger::writers::ConsoleWriter;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

fn main() -> Result<()> {
    println!("=== Batch Logger - Basic Usage Example ===\n");

    let logger = Arc::new(
        Logger::builder()
            .default_log_name("app")
            .flush_interval_ms(200)
            .writer(ConsoleWriter::new().with_origin(true))
            .build(),
    );

    logger.start()?;

    println!("1. Recording into the default log:");
    record!(logger, "Application started");
    record!(logger, "Listening on port {}", 8080);
    thread::sleep(Duration::from_millis(300));

    println!("\n2. Recording from worker threads into named logs:");
    let workers: Vec<_> = (0..3)
        .map(|id| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                for job in 0..3 {
                    record_to!(logger, "workers", "Worker {} finished job {}", id, job);
                }
            })
        })
        .collect();
    for worker in workers {
        worker.join().expect("worker panicked");
    }
    thread::sleep(Duration::from_millis(300));

    println!("\n3. Entries recorded right before stop are flushed by stop:");
    record!(logger, "Shutting down");
    logger.stop()?;

    let metrics = logger.metrics();
    println!(
        "\nRecorded {} entries, wrote {} in {} batches",
        metrics.entries_recorded(),
        metrics.entries_written(),
        metrics.batches_written()
    );

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
