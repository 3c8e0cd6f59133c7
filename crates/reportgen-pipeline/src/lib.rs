//! reportgen-pipeline
//!
//! Dedup check → HTML render → PDF rasterization → storage → link issuance,
//! and the translation of its outcome into an invocation response.

pub mod error;
pub mod orchestrator;
pub mod outcome;
pub mod response;

pub use orchestrator::ReportPipeline;
pub use outcome::{PipelineResult, Step, Timings};
pub use response::InvocationResponse;
