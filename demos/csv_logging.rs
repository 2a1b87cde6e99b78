//! CSV file logging example
//!
//! Demonstrates the CSV writer with extension columns.
//!
//! Run with: cargo run --example csv_logging

use batch_logger::prelude::*;
use batch_logger::writers::CsvFileWriter;
use std::sync::Arc;

/// Extra columns describing one HTTP request
#[derive(Debug)]
struct RequestInfo {
    method: &'static str,
    path: String,
    status: u16,
}

impl LogExtension for RequestInfo {
    fn render(&self) -> Result<String> {
        Ok(format!("\"{}\",\"{}\",{}", self.method, self.path, self.status))
    }
}

fn main() -> Result<()> {
    println!("=== Batch Logger - CSV Logging Example ===\n");

    let directory = std::env::temp_dir().join("batch_logger_demo");
    let writer = CsvFileWriter::new(&directory)?;
    let requests_path = writer.file_path("requests");
    let app_path = writer.file_path("app");

    let logger = Logger::builder()
        .default_log_name("app")
        .flush_interval_ms(500)
        .writer(writer)
        .build();

    logger.start()?;

    record!(logger, "Server starting");
    for (i, path) in ["/", "/login", "/missing"].iter().enumerate() {
        let info = Arc::new(RequestInfo {
            method: "GET",
            path: path.to_string(),
            status: if i == 2 { 404 } else { 200 },
        });
        record_to!(logger, "requests", ext = info; "Request {} handled", i);
    }

    logger.stop()?;

    println!("Wrote {}", app_path.display());
    println!("Wrote {}", requests_path.display());
    println!("\n{}", std::fs::read_to_string(&requests_path)?);

    println!("=== Example completed successfully! ===");

    Ok(())
}
