use std::sync::Arc;
use std::time::{Duration, Instant};

use serde_json::Value;

use reportgen_core::document::InputDocument;
use reportgen_core::identifier::{FieldExtractor, IdentifierExtractor};
use reportgen_core::s3_keys::derive_key;
use reportgen_core::{LINK_TTL, PDF_CONTENT_TYPE};
use reportgen_export::{HtmlRenderer, PdfEngine};
use reportgen_storage::BlobStore;

use crate::error::{AtStep, StepFailure};
use crate::outcome::{PipelineResult, Step, Timings};
use crate::response::InvocationResponse;

/// Turns one document into a stored PDF and an access link.
///
/// Collaborators are built once per process and shared between
/// invocations; the pipeline itself keeps no state between runs.
///
/// The existence check and the write are not one atomic operation. Two
/// invocations for the same identifier can both miss and both render; the
/// store decides which write survives (see `S3BlobStore` conditional
/// writes).
#[derive(Clone)]
pub struct ReportPipeline {
    store: Arc<dyn BlobStore>,
    renderer: Arc<dyn HtmlRenderer>,
    engine: Arc<dyn PdfEngine>,
    extractor: Arc<dyn IdentifierExtractor>,
    link_ttl: Duration,
}

impl ReportPipeline {
    pub fn new(
        store: Arc<dyn BlobStore>,
        renderer: Arc<dyn HtmlRenderer>,
        engine: Arc<dyn PdfEngine>,
    ) -> Self {
        Self {
            store,
            renderer,
            engine,
            extractor: Arc::new(FieldExtractor::default()),
            link_ttl: LINK_TTL,
        }
    }

    pub fn with_extractor(mut self, extractor: Arc<dyn IdentifierExtractor>) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn with_link_ttl(mut self, ttl: Duration) -> Self {
        self.link_ttl = ttl;
        self
    }

    /// Handle one raw invocation event end to end.
    pub async fn handle(&self, event: Value) -> InvocationResponse {
        let doc = InputDocument::new(event);
        InvocationResponse::from(self.run(&doc).await)
    }

    /// Run the pipeline. Every failure is terminal; nothing is retried.
    pub async fn run(&self, doc: &InputDocument) -> PipelineResult {
        match self.execute(doc).await {
            Ok(result) => result,
            Err(failure) if failure.error.is_client() => {
                tracing::warn!(step = %failure.step, reason = %failure.error, "input rejected");
                PipelineResult::ClientError {
                    reason: failure.error.to_string(),
                }
            }
            Err(failure) => {
                tracing::error!(step = %failure.step, error = %failure.error, "pipeline failed");
                PipelineResult::ServerError {
                    step: failure.step,
                    details: failure.error.to_string(),
                }
            }
        }
    }

    async fn execute(&self, doc: &InputDocument) -> Result<PipelineResult, StepFailure> {
        let key = derive_key(doc, self.extractor.as_ref()).at(Step::DeriveKey)?;

        let presence = self
            .store
            .exists(&key)
            .await
            .at(Step::CheckExists)?;

        if presence.is_found() {
            tracing::info!(key = %key, "report already stored, issuing link");
            let link = self
                .store
                .signed_link(&key, self.link_ttl)
                .await
                .at(Step::IssueLink)?;
            return Ok(PipelineResult::AlreadyExists { link });
        }

        tracing::info!(key = %key, "report not stored, generating");
        let started = Instant::now();

        let phase = Instant::now();
        let html = self
            .renderer
            .render_html(doc)
            .at(Step::RenderHtml)?;
        let html_render = phase.elapsed();
        tracing::info!(bytes = html.len(), elapsed_ms = millis(html_render), "HTML rendered");

        let phase = Instant::now();
        let pdf = self
            .engine
            .render_pdf(&html)
            .await
            .at(Step::RenderPdf)?;
        let pdf_render = phase.elapsed();
        tracing::info!(bytes = pdf.len(), elapsed_ms = millis(pdf_render), "PDF generated");

        let phase = Instant::now();
        let outcome = self
            .store
            .put(&key, pdf, PDF_CONTENT_TYPE)
            .await
            .at(Step::Store)?;
        let store = phase.elapsed();
        tracing::info!(key = %key, ?outcome, elapsed_ms = millis(store), "PDF stored");

        let phase = Instant::now();
        let link = self
            .store
            .signed_link(&key, self.link_ttl)
            .await
            .at(Step::IssueLink)?;
        let link_elapsed = phase.elapsed();

        let total = started.elapsed();
        tracing::info!(
            key = %key,
            link_ms = millis(link_elapsed),
            total_ms = millis(total),
            "report generated"
        );

        Ok(PipelineResult::Generated {
            link,
            stored: outcome,
            timings: Timings {
                html_render,
                pdf_render,
                store,
                link: link_elapsed,
                total,
            },
        })
    }
}

fn millis(d: Duration) -> u64 {
    d.as_millis() as u64
}
