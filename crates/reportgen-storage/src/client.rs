use aws_config::retry::RetryConfig;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::Client;

/// Build the process-wide S3 client.
///
/// `region` overrides the SDK default chain when set. SDK retries are
/// disabled: a failed call fails the invocation and the caller decides
/// whether to try again.
pub async fn build_client(region: Option<&str>) -> Client {
    let mut loader = aws_config::defaults(BehaviorVersion::latest())
        .retry_config(RetryConfig::disabled());

    if let Some(region) = region {
        loader = loader.region(Region::new(region.to_string()));
    }

    let config = loader.load().await;
    tracing::debug!(region = ?config.region(), "S3 client configured");
    Client::new(&config)
}
