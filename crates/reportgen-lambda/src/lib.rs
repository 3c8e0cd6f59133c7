//! reportgen-lambda
//!
//! Process wiring for the Lambda handler: configuration and the
//! construction of the pipeline's collaborators.

pub mod config;

use std::sync::Arc;

use reportgen_export::{ChromiumEngine, ReportTemplate, Stylesheet};
use reportgen_pipeline::ReportPipeline;
use reportgen_storage::S3BlobStore;

use config::Config;

/// Build the pipeline once per process. Stylesheet and template problems
/// surface here, at cold start, instead of on the first request.
pub async fn build_pipeline(config: &Config) -> eyre::Result<ReportPipeline> {
    let s3 = reportgen_storage::client::build_client(config.region.as_deref()).await;
    let store = S3BlobStore::new(s3, config.bucket.clone())
        .with_conditional_writes(config.conditional_writes);

    let renderer = match &config.template_path {
        Some(path) => ReportTemplate::from_file(path)?,
        None => ReportTemplate::builtin()?,
    };

    let stylesheet = Stylesheet::load(&config.stylesheet_path)?;
    let mut engine = ChromiumEngine::new(&config.chromium_path, stylesheet);
    if let Some(dir) = &config.scratch_dir {
        engine = engine.with_scratch_root(dir);
    }

    Ok(ReportPipeline::new(
        Arc::new(store),
        Arc::new(renderer),
        Arc::new(engine),
    ))
}
