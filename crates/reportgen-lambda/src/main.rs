use std::sync::Arc;

use lambda_runtime::{LambdaEvent, service_fn};
use serde_json::Value;
use tracing_subscriber::EnvFilter;

use reportgen_lambda::build_pipeline;
use reportgen_lambda::config::Config;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Structured JSON logging for CloudWatch
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let config = Config::from_env()?;
    tracing::info!(
        bucket = %config.bucket,
        region = ?config.region,
        conditional_writes = config.conditional_writes,
        "starting report generator"
    );

    let pipeline = Arc::new(build_pipeline(&config).await?);

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| {
        let pipeline = pipeline.clone();
        async move {
            let LambdaEvent { payload, context } = event;
            tracing::debug!(request_id = %context.request_id, event = %payload, "received event");
            Ok::<_, lambda_runtime::Error>(pipeline.handle(payload).await)
        }
    }))
    .await
    .map_err(|e| eyre::eyre!(e))
}
