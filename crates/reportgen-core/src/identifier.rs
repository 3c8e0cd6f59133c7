use std::fmt;

use serde_json::Value;

use crate::document::InputDocument;
use crate::error::CoreError;

/// Caller-supplied key identifying which report to produce.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReportIdentifier(String);

impl ReportIdentifier {
    /// Trim and validate a raw identifier. Empty input yields
    /// `MissingIdentifier`; path separators and control characters would
    /// escape the key template and yield `InvalidIdentifier`.
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(CoreError::MissingIdentifier);
        }
        if trimmed
            .chars()
            .any(|c| c == '/' || c == '\\' || c.is_control())
        {
            return Err(CoreError::InvalidIdentifier(trimmed.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReportIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Pulls the report identifier out of a document.
///
/// Implementations must be pure so the same document always maps to the
/// same storage key. Returning `Ok(None)` means "no identifier present".
pub trait IdentifierExtractor: Send + Sync {
    fn extract(&self, doc: &InputDocument) -> Result<Option<ReportIdentifier>, CoreError>;
}

/// Probes a list of JSON pointers in order and takes the first usable value.
///
/// Strings and integers are accepted. Empty strings count as absent so the
/// next pointer is tried.
#[derive(Debug, Clone)]
pub struct FieldExtractor {
    pointers: Vec<String>,
}

pub const DEFAULT_IDENTIFIER_POINTERS: &[&str] = &["/reportId", "/reportNumber", "/report_number"];

impl FieldExtractor {
    pub fn new<I, S>(pointers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            pointers: pointers.into_iter().map(Into::into).collect(),
        }
    }

    pub fn pointers(&self) -> &[String] {
        &self.pointers
    }
}

impl Default for FieldExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_IDENTIFIER_POINTERS.iter().copied())
    }
}

impl IdentifierExtractor for FieldExtractor {
    fn extract(&self, doc: &InputDocument) -> Result<Option<ReportIdentifier>, CoreError> {
        for pointer in &self.pointers {
            let raw = match doc.pointer(pointer) {
                Some(Value::String(s)) if !s.trim().is_empty() => s.clone(),
                Some(Value::Number(n)) if n.is_i64() || n.is_u64() => n.to_string(),
                _ => continue,
            };
            return ReportIdentifier::parse(&raw).map(Some);
        }
        Ok(None)
    }
}
