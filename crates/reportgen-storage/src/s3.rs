use std::time::Duration;

use aws_sdk_s3::Client;

use reportgen_core::BoxFuture;
use reportgen_core::s3_keys::StorageKey;

use crate::error::StorageError;
use crate::objects;
use crate::store::{AccessLink, BlobStore, Presence, PutOutcome};

/// `BlobStore` backed by one S3 bucket.
///
/// With conditional writes on, `put` uses `If-None-Match: *` so two
/// invocations racing on the same key cannot both write. The loser gets
/// `PutOutcome::AlreadyPresent`, whether S3 saw the winner's write as
/// committed (412) or still in flight (409). With them off the store is
/// last-write-wins.
#[derive(Clone)]
pub struct S3BlobStore {
    client: Client,
    bucket: String,
    conditional_writes: bool,
}

impl S3BlobStore {
    pub fn new(client: Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
            conditional_writes: true,
        }
    }

    pub fn with_conditional_writes(mut self, enabled: bool) -> Self {
        self.conditional_writes = enabled;
        self
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }
}

impl BlobStore for S3BlobStore {
    fn exists<'a>(&'a self, key: &'a StorageKey) -> BoxFuture<'a, Result<Presence, StorageError>> {
        Box::pin(async move {
            let presence = objects::head_object(&self.client, &self.bucket, key.as_str()).await?;
            tracing::debug!(bucket = %self.bucket, key = %key, ?presence, "head object");
            Ok(presence)
        })
    }

    fn put<'a>(
        &'a self,
        key: &'a StorageKey,
        body: Vec<u8>,
        content_type: &'a str,
    ) -> BoxFuture<'a, Result<PutOutcome, StorageError>> {
        Box::pin(async move {
            let size = body.len();
            let outcome = if self.conditional_writes {
                objects::put_object_if_absent(
                    &self.client,
                    &self.bucket,
                    key.as_str(),
                    body,
                    Some(content_type),
                )
                .await?
            } else {
                objects::put_object(&self.client, &self.bucket, key.as_str(), body, Some(content_type))
                    .await?;
                PutOutcome::Written
            };

            match outcome {
                PutOutcome::Written => {
                    tracing::info!(bucket = %self.bucket, key = %key, size, "object written");
                }
                PutOutcome::AlreadyPresent => {
                    tracing::warn!(
                        bucket = %self.bucket,
                        key = %key,
                        "object appeared during generation, kept existing copy"
                    );
                }
            }
            Ok(outcome)
        })
    }

    fn signed_link<'a>(
        &'a self,
        key: &'a StorageKey,
        ttl: Duration,
    ) -> BoxFuture<'a, Result<AccessLink, StorageError>> {
        Box::pin(async move {
            let url = objects::presign_get(&self.client, &self.bucket, key.as_str(), ttl).await?;
            Ok(AccessLink {
                url,
                expires_in: ttl,
            })
        })
    }
}
