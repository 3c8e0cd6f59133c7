use thiserror::Error;

use reportgen_core::error::CoreError;
use reportgen_export::error::ExportError;
use reportgen_storage::error::StorageError;

use crate::outcome::Step;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Input(#[from] CoreError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

impl PipelineError {
    /// Input problems are the caller's fault; everything else is ours.
    pub fn is_client(&self) -> bool {
        matches!(self, PipelineError::Input(_))
    }
}

/// A pipeline error tagged with the step that produced it.
#[derive(Debug, Error)]
#[error("{step} failed: {error}")]
pub struct StepFailure {
    pub step: Step,
    #[source]
    pub error: PipelineError,
}

/// Tags an error with the step that produced it.
pub(crate) trait AtStep<T> {
    fn at(self, step: Step) -> Result<T, StepFailure>;
}

impl<T, E: Into<PipelineError>> AtStep<T> for Result<T, E> {
    fn at(self, step: Step) -> Result<T, StepFailure> {
        self.map_err(|e| StepFailure {
            step,
            error: e.into(),
        })
    }
}
