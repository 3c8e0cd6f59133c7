use std::fmt;
use std::time::Duration;

use reportgen_storage::{AccessLink, PutOutcome};

/// Pipeline step, used to label transitions and failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    DeriveKey,
    CheckExists,
    RenderHtml,
    RenderPdf,
    Store,
    IssueLink,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Step::DeriveKey => "derive_key",
            Step::CheckExists => "check_exists",
            Step::RenderHtml => "render_html",
            Step::RenderPdf => "render_pdf",
            Step::Store => "store",
            Step::IssueLink => "issue_link",
        };
        f.write_str(name)
    }
}

/// Phase durations of a fresh generation. `total` spans HTML rendering
/// through link issuance, so it is never less than the sum of the phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Timings {
    pub html_render: Duration,
    pub pdf_render: Duration,
    pub store: Duration,
    pub link: Duration,
    pub total: Duration,
}

/// Terminal state of one invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineResult {
    /// The report was already stored; only a fresh link was issued.
    AlreadyExists { link: AccessLink },

    /// The report was rendered in this invocation. `stored` is
    /// `AlreadyPresent` when a concurrent invocation stored it first and this
    /// copy was discarded; `timings.store` then measures the rejected write.
    Generated {
        link: AccessLink,
        timings: Timings,
        stored: PutOutcome,
    },

    ClientError { reason: String },

    ServerError { step: Step, details: String },
}

impl PipelineResult {
    pub fn link(&self) -> Option<&AccessLink> {
        match self {
            PipelineResult::AlreadyExists { link } | PipelineResult::Generated { link, .. } => {
                Some(link)
            }
            _ => None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.link().is_some()
    }
}
