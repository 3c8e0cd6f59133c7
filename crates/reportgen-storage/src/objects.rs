use aws_sdk_s3::Client;
use aws_sdk_s3::error::ProvideErrorMetadata;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_smithy_types::byte_stream::ByteStream;
use std::time::Duration;

use reportgen_core::error::format_err_chain;

use crate::error::{StorageError, sdk_error_detail};
use crate::store::{Presence, PutOutcome};

/// Check whether an object exists with a HEAD request.
///
/// Only the modelled `NotFound` error means absence. Anything else,
/// including access denied, is returned as an error.
pub async fn head_object(
    client: &Client,
    bucket: &str,
    key: &str,
) -> Result<Presence, StorageError> {
    match client.head_object().bucket(bucket).key(key).send().await {
        Ok(_) => Ok(Presence::Found),
        Err(e) => {
            if e.as_service_error().is_some_and(|err| err.is_not_found()) {
                Ok(Presence::NotFound)
            } else {
                Err(StorageError::HeadObject(sdk_error_detail(&e)))
            }
        }
    }
}

/// Put an object to S3, overwriting whatever is there.
pub async fn put_object(
    client: &Client,
    bucket: &str,
    key: &str,
    body: Vec<u8>,
    content_type: Option<&str>,
) -> Result<(), StorageError> {
    let mut req = client
        .put_object()
        .bucket(bucket)
        .key(key)
        .body(ByteStream::from(body));

    if let Some(ct) = content_type {
        req = req.content_type(ct);
    }

    req.send()
        .await
        .map_err(|e| StorageError::PutObject(sdk_error_detail(&e)))?;

    Ok(())
}

const CONFLICT_PRECONDITION_FAILED: &str = "PreconditionFailed";

const CONFLICT_IN_FLIGHT: &str = "ConditionalRequestConflict";

/// Put an object to S3 only if the key is unoccupied (`If-None-Match: *`).
///
/// S3 answers 412 `PreconditionFailed` when another writer got there first,
/// and 409 `ConditionalRequestConflict` when another conditional write to
/// the same key is in flight. Both are reported as
/// `PutOutcome::AlreadyPresent`.
pub async fn put_object_if_absent(
    client: &Client,
    bucket: &str,
    key: &str,
    body: Vec<u8>,
    content_type: Option<&str>,
) -> Result<PutOutcome, StorageError> {
    let mut req = client
        .put_object()
        .bucket(bucket)
        .key(key)
        .body(ByteStream::from(body))
        .if_none_match("*");

    if let Some(ct) = content_type {
        req = req.content_type(ct);
    }

    match req.send().await {
        Ok(_) => Ok(PutOutcome::Written),
        Err(e) => {
            let code = e.as_service_error().and_then(|err| err.code());
            if matches!(code, Some(CONFLICT_PRECONDITION_FAILED | CONFLICT_IN_FLIGHT)) {
                Ok(PutOutcome::AlreadyPresent)
            } else {
                Err(StorageError::PutObject(sdk_error_detail(&e)))
            }
        }
    }
}

/// Generate a presigned GET URL for an object.
pub async fn presign_get(
    client: &Client,
    bucket: &str,
    key: &str,
    expires_in: Duration,
) -> Result<String, StorageError> {
    let presign_config = PresigningConfig::builder()
        .expires_in(expires_in)
        .build()
        .map_err(|e| StorageError::Presign(e.to_string()))?;

    let presigned = client
        .get_object()
        .bucket(bucket)
        .key(key)
        .presigned(presign_config)
        .await
        .map_err(|e| StorageError::Presign(format_err_chain(&e)))?;

    Ok(presigned.uri().to_string())
}
