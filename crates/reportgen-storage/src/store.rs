use std::fmt;
use std::time::Duration;

use reportgen_core::BoxFuture;
use reportgen_core::s3_keys::StorageKey;

use crate::error::StorageError;

/// Outcome of an existence probe. "Not there" is an answer, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Found,
    NotFound,
}

impl Presence {
    pub fn is_found(self) -> bool {
        matches!(self, Presence::Found)
    }
}

/// Outcome of a write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PutOutcome {
    Written,
    /// A conditional write found the key already occupied. The existing
    /// object is left untouched.
    AlreadyPresent,
}

/// Time-bounded read link for a stored blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessLink {
    pub url: String,
    pub expires_in: Duration,
}

impl fmt::Display for AccessLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

/// Content-addressed blob storage as seen by the report pipeline.
///
/// Implementations never retry internally.
pub trait BlobStore: Send + Sync {
    /// Probe for `key`. Only a definite "not found" maps to
    /// `Presence::NotFound`; every other failure is an error.
    fn exists<'a>(&'a self, key: &'a StorageKey) -> BoxFuture<'a, Result<Presence, StorageError>>;

    /// Write `body` under `key`.
    fn put<'a>(
        &'a self,
        key: &'a StorageKey,
        body: Vec<u8>,
        content_type: &'a str,
    ) -> BoxFuture<'a, Result<PutOutcome, StorageError>>;

    /// Issue a read link valid for `ttl`. Does not check that `key` exists.
    fn signed_link<'a>(
        &'a self,
        key: &'a StorageKey,
        ttl: Duration,
    ) -> BoxFuture<'a, Result<AccessLink, StorageError>>;
}
