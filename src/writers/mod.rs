//! Writer implementations

#[cfg(feature = "console")]
pub mod console;
#[cfg(feature = "file")]
pub mod csv_file;
pub mod json;

#[cfg(feature = "console")]
pub use console::ConsoleWriter;
#[cfg(feature = "file")]
pub use csv_file::CsvFileWriter;
pub use json::JsonWriter;

pub use crate::core::LogWriter;
