//! Pluggable payloads attached to log entries

use super::error::Result;
use super::log_entry::csv_quote;
use std::fmt;

/// Custom data a producer attaches to an entry
///
/// The logger never looks inside an extension. Writers call [`render`] when
/// they serialize the entry; the CSV writer appends the fragment as extra
/// columns.
///
/// Implementations must be pure: rendering the same value twice yields the
/// same text and touches no shared state. A failure is returned to the
/// writer that asked for it.
///
/// # Example
///
/// ```
/// use batch_logger::core::{LogExtension, Result};
///
/// #[derive(Debug)]
/// struct Latency {
///     endpoint: String,
///     millis: u64,
/// }
///
/// impl LogExtension for Latency {
///     fn render(&self) -> Result<String> {
///         Ok(format!("\"{}\",{}", self.endpoint, self.millis))
///     }
/// }
/// ```
///
/// [`render`]: LogExtension::render
pub trait LogExtension: fmt::Debug + Send + Sync {
    /// Render the payload as a comma-separated fragment
    fn render(&self) -> Result<String>;
}

/// Ready-made extension holding a row of extra CSV columns
///
/// Every field is rendered quoted, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvFields {
    fields: Vec<String>,
}

impl CsvFields {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_field(mut self, value: impl ToString) -> Self {
        self.fields.push(value.to_string());
        self
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<T: ToString> FromIterator<T> for CsvFields {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().map(|v| v.to_string()).collect(),
        }
    }
}

impl LogExtension for CsvFields {
    fn render(&self) -> Result<String> {
        Ok(self
            .fields
            .iter()
            .map(|field| csv_quote(field))
            .collect::<Vec<_>>()
            .join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LoggerError;

    #[test]
    fn test_csv_fields_render() {
        let fields = CsvFields::new().with_field("user-42").with_field(17);
        assert_eq!(fields.len(), 2);
        assert_eq!(fields.render().unwrap(), "\"user-42\",\"17\"");
    }

    #[test]
    fn test_csv_fields_escapes_quotes() {
        let fields: CsvFields = ["say \"hi\""].into_iter().collect();
        assert_eq!(fields.render().unwrap(), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_empty_fields_render_empty() {
        let fields = CsvFields::new();
        assert!(fields.is_empty());
        assert_eq!(fields.render().unwrap(), "");
    }

    #[test]
    fn test_render_is_deterministic() {
        let fields = CsvFields::new().with_field("a").with_field("b");
        assert_eq!(fields.render().unwrap(), fields.render().unwrap());
    }

    #[test]
    fn test_render_failure_is_returned() {
        #[derive(Debug)]
        struct Broken;

        impl LogExtension for Broken {
            fn render(&self) -> Result<String> {
                Err(LoggerError::render("no columns"))
            }
        }

        assert!(matches!(Broken.render(), Err(LoggerError::RenderFailed(_))));
    }
}
