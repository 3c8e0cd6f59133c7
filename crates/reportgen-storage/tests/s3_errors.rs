//! S3 responses replayed through a canned HTTP client, checking how each
//! status maps onto `Presence`, `PutOutcome`, and `StorageError`.

use std::sync::{Arc, Mutex};

use aws_sdk_s3::Client;
use aws_sdk_s3::config::retry::RetryConfig;
use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};
use aws_smithy_http_client::test_util::infallible_client_fn;
use aws_smithy_types::body::SdkBody;

use reportgen_core::PDF_CONTENT_TYPE;
use reportgen_core::identifier::ReportIdentifier;
use reportgen_core::s3_keys::{StorageKey, report_pdf};
use reportgen_storage::error::StorageError;
use reportgen_storage::{BlobStore, Presence, PutOutcome, S3BlobStore};

const PRECONDITION_FAILED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Error><Code>PreconditionFailed</Code><Message>At least one of the pre-conditions you specified did not hold</Message><Condition>If-None-Match</Condition></Error>"#;

const CONDITIONAL_CONFLICT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Error><Code>ConditionalRequestConflict</Code><Message>A conflicting conditional operation is currently in progress against this resource. Please try again.</Message></Error>"#;

const INTERNAL_ERROR: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Error><Code>InternalError</Code><Message>We encountered an internal error. Please try again.</Message></Error>"#;

const ACCESS_DENIED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Error><Code>AccessDenied</Code><Message>Access Denied</Message></Error>"#;

/// `If-None-Match` header of every request the fake S3 received.
type SeenConditions = Arc<Mutex<Vec<Option<String>>>>;

fn store_answering(status: u16, body: &'static str) -> (S3BlobStore, SeenConditions) {
    let seen: SeenConditions = Arc::default();
    let recorder = seen.clone();
    let http_client = infallible_client_fn(move |req: http::Request<SdkBody>| {
        let condition = req
            .headers()
            .get("if-none-match")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        recorder.lock().unwrap().push(condition);
        http::Response::builder()
            .status(status)
            .body(SdkBody::from(body))
            .unwrap()
    });

    let config = aws_sdk_s3::Config::builder()
        .behavior_version(BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .credentials_provider(Credentials::new(
            "AKIDEXAMPLE",
            "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY",
            None,
            None,
            "reportgen-test",
        ))
        .retry_config(RetryConfig::disabled())
        .http_client(http_client)
        .build();

    (S3BlobStore::new(Client::from_conf(config), "reports-bucket"), seen)
}

fn key() -> StorageKey {
    report_pdf(&ReportIdentifier::parse("ABC123").unwrap())
}

#[tokio::test]
async fn head_200_is_found() {
    let (store, _) = store_answering(200, "");
    assert_eq!(store.exists(&key()).await.unwrap(), Presence::Found);
}

#[tokio::test]
async fn head_404_is_not_found() {
    let (store, _) = store_answering(404, "");
    assert_eq!(store.exists(&key()).await.unwrap(), Presence::NotFound);
}

#[tokio::test]
async fn head_403_is_an_error_with_status() {
    let (store, _) = store_answering(403, "");
    match store.exists(&key()).await {
        Err(StorageError::HeadObject(detail)) => {
            assert!(detail.contains("HTTP 403"), "{detail}");
        }
        other => panic!("expected HeadObject error, got {other:?}"),
    }
}

#[tokio::test]
async fn conditional_put_sends_if_none_match() {
    let (store, seen) = store_answering(200, "");
    let outcome = store
        .put(&key(), b"%PDF-1.7".to_vec(), PDF_CONTENT_TYPE)
        .await
        .unwrap();

    assert_eq!(outcome, PutOutcome::Written);
    assert_eq!(seen.lock().unwrap().as_slice(), &[Some("*".to_string())]);
}

#[tokio::test]
async fn put_412_is_already_present() {
    let (store, _) = store_answering(412, PRECONDITION_FAILED);
    let outcome = store
        .put(&key(), b"%PDF-1.7".to_vec(), PDF_CONTENT_TYPE)
        .await
        .unwrap();
    assert_eq!(outcome, PutOutcome::AlreadyPresent);
}

#[tokio::test]
async fn put_409_in_flight_conflict_is_already_present() {
    let (store, _) = store_answering(409, CONDITIONAL_CONFLICT);
    let outcome = store
        .put(&key(), b"%PDF-1.7".to_vec(), PDF_CONTENT_TYPE)
        .await
        .unwrap();
    assert_eq!(outcome, PutOutcome::AlreadyPresent);
}

#[tokio::test]
async fn conditional_put_access_denied_is_an_error() {
    let (store, _) = store_answering(403, ACCESS_DENIED);
    match store.put(&key(), b"%PDF-1.7".to_vec(), PDF_CONTENT_TYPE).await {
        Err(StorageError::PutObject(detail)) => {
            assert!(detail.contains("HTTP 403"), "{detail}");
            assert!(detail.contains("AccessDenied"), "{detail}");
        }
        other => panic!("expected PutObject error, got {other:?}"),
    }
}

#[tokio::test]
async fn unconditional_put_failure_is_an_error() {
    let (store, seen) = store_answering(500, INTERNAL_ERROR);
    let store = store.with_conditional_writes(false);

    match store.put(&key(), b"%PDF-1.7".to_vec(), PDF_CONTENT_TYPE).await {
        Err(StorageError::PutObject(detail)) => {
            assert!(detail.contains("HTTP 500"), "{detail}");
        }
        other => panic!("expected PutObject error, got {other:?}"),
    }
    assert_eq!(seen.lock().unwrap().as_slice(), &[None]);
}

#[tokio::test]
async fn unconditional_put_412_is_not_swallowed() {
    let (store, _) = store_answering(412, PRECONDITION_FAILED);
    let store = store.with_conditional_writes(false);

    assert!(matches!(
        store.put(&key(), b"%PDF-1.7".to_vec(), PDF_CONTENT_TYPE).await,
        Err(StorageError::PutObject(_))
    ));
}
