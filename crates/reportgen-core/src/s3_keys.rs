//! S3 key conventions and the key deriver.
//!
//! Pure string functions — no AWS SDK dependency. Every report lands at
//! `credit-report-<id>.pdf` at the bucket root.

use std::fmt;

use crate::document::InputDocument;
use crate::error::CoreError;
use crate::identifier::{IdentifierExtractor, ReportIdentifier};

pub const REPORT_PREFIX: &str = "credit-report-";

pub const REPORT_SUFFIX: &str = ".pdf";

/// Deterministic object key for a report.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StorageKey(String);

impl StorageKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for StorageKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

pub fn report_pdf(id: &ReportIdentifier) -> StorageKey {
    StorageKey(format!("{REPORT_PREFIX}{id}{REPORT_SUFFIX}"))
}

/// Map a document to its storage key without touching any external system.
pub fn derive_key(
    doc: &InputDocument,
    extractor: &dyn IdentifierExtractor,
) -> Result<StorageKey, CoreError> {
    if doc.is_absent() {
        return Err(CoreError::MissingContent);
    }
    let id = extractor
        .extract(doc)?
        .ok_or(CoreError::MissingIdentifier)?;
    Ok(report_pdf(&id))
}
