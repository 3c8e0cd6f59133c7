use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::Mutex;

use reportgen_core::BoxFuture;
use reportgen_core::s3_keys::StorageKey;

use crate::error::StorageError;
use crate::store::{AccessLink, BlobStore, Presence, PutOutcome};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub body: Vec<u8>,
    pub content_type: String,
}

/// In-process `BlobStore` for tests and local runs.
///
/// Links use a `memory://` scheme and are not fetchable.
pub struct MemoryBlobStore {
    objects: Mutex<HashMap<String, StoredObject>>,
    conditional_writes: bool,
}

impl MemoryBlobStore {
    /// Conditional writes on, matching the S3 default.
    pub fn new() -> Self {
        Self {
            objects: Mutex::new(HashMap::new()),
            conditional_writes: true,
        }
    }

    pub fn last_write_wins() -> Self {
        Self {
            conditional_writes: false,
            ..Self::new()
        }
    }

    /// Seed an object directly, bypassing write semantics.
    pub async fn insert(&self, key: &StorageKey, body: Vec<u8>, content_type: &str) {
        self.objects.lock().await.insert(
            key.as_str().to_string(),
            StoredObject {
                body,
                content_type: content_type.to_string(),
            },
        );
    }

    pub async fn get(&self, key: &StorageKey) -> Option<StoredObject> {
        self.objects.lock().await.get(key.as_str()).cloned()
    }

    pub async fn len(&self) -> usize {
        self.objects.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.objects.lock().await.is_empty()
    }
}

impl Default for MemoryBlobStore {
    fn default() -> Self {
        Self::new()
    }
}

impl BlobStore for MemoryBlobStore {
    fn exists<'a>(&'a self, key: &'a StorageKey) -> BoxFuture<'a, Result<Presence, StorageError>> {
        Box::pin(async move {
            if self.objects.lock().await.contains_key(key.as_str()) {
                Ok(Presence::Found)
            } else {
                Ok(Presence::NotFound)
            }
        })
    }

    fn put<'a>(
        &'a self,
        key: &'a StorageKey,
        body: Vec<u8>,
        content_type: &'a str,
    ) -> BoxFuture<'a, Result<PutOutcome, StorageError>> {
        Box::pin(async move {
            let mut objects = self.objects.lock().await;
            if self.conditional_writes && objects.contains_key(key.as_str()) {
                return Ok(PutOutcome::AlreadyPresent);
            }
            objects.insert(
                key.as_str().to_string(),
                StoredObject {
                    body,
                    content_type: content_type.to_string(),
                },
            );
            Ok(PutOutcome::Written)
        })
    }

    fn signed_link<'a>(
        &'a self,
        key: &'a StorageKey,
        ttl: Duration,
    ) -> BoxFuture<'a, Result<AccessLink, StorageError>> {
        Box::pin(async move {
            Ok(AccessLink {
                url: format!("memory://{key}?expires_in={}", ttl.as_secs()),
                expires_in: ttl,
            })
        })
    }
}
