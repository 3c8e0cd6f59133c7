use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use reportgen_storage::PutOutcome;

use crate::outcome::PipelineResult;

pub const EXISTING_MESSAGE: &str = "File already exists, returning signed URL.";

pub const GENERATED_MESSAGE: &str = "PDF generated and uploaded to S3 successfully!";

pub const GENERATED_CONCURRENTLY_MESSAGE: &str =
    "PDF generated, but a concurrent request had already uploaded it; returning signed URL.";

pub const INTERNAL_ERROR: &str = "Internal Server Error";

/// Lambda response in the API Gateway proxy shape: status, headers, and a
/// JSON body serialized to a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvocationResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl InvocationResponse {
    fn json(status_code: u16, body: Value) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        Self {
            status_code,
            headers,
            body: body.to_string(),
        }
    }

    pub fn body_json(&self) -> serde_json::Result<Value> {
        serde_json::from_str(&self.body)
    }
}

impl From<PipelineResult> for InvocationResponse {
    fn from(result: PipelineResult) -> Self {
        match result {
            PipelineResult::AlreadyExists { link } => Self::json(
                200,
                json!({
                    "message": EXISTING_MESSAGE,
                    "url": link.url,
                }),
            ),
            PipelineResult::Generated {
                link,
                timings,
                stored,
            } => Self::json(
                200,
                json!({
                    "message": match stored {
                        PutOutcome::Written => GENERATED_MESSAGE,
                        PutOutcome::AlreadyPresent => GENERATED_CONCURRENTLY_MESSAGE,
                    },
                    "url": link.url,
                    "generationTime": timings.pdf_render.as_secs_f64(),
                    "uploadTime": timings.store.as_secs_f64(),
                    "totalTime": timings.total.as_secs_f64(),
                }),
            ),
            PipelineResult::ClientError { reason } => Self::json(400, json!({ "error": reason })),
            PipelineResult::ServerError { details, .. } => Self::json(
                500,
                json!({
                    "error": INTERNAL_ERROR,
                    "details": details,
                }),
            ),
        }
    }
}
