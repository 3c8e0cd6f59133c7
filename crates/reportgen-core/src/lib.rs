//! reportgen-core
//!
//! Pure domain types and S3 key conventions.
//! No AWS SDK dependency — this is the shared vocabulary of the report pipeline.

pub mod document;
pub mod error;
pub mod identifier;
pub mod s3_keys;

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Lifetime of every issued access link.
pub const LINK_TTL: Duration = Duration::from_secs(3600);

pub const PDF_CONTENT_TYPE: &str = "application/pdf";
