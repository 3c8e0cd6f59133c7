use aws_sdk_s3::error::SdkError;
use thiserror::Error;

use reportgen_core::error::format_err_chain;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("S3 HeadObject error: {0}")]
    HeadObject(String),

    #[error("S3 PutObject error: {0}")]
    PutObject(String),

    #[error("S3 presign error: {0}")]
    Presign(String),
}

/// Error chain of an SDK call, prefixed with the HTTP status when a
/// response came back. Bodiless errors (a 403 on HEAD) carry nothing else.
pub fn sdk_error_detail<E>(err: &SdkError<E>) -> String
where
    E: std::error::Error + 'static,
{
    let detail = format_err_chain(err);
    match err.raw_response() {
        Some(resp) => format!("HTTP {}: {detail}", resp.status().as_u16()),
        None => detail,
    }
}
