use thiserror::Error;

/// Input problems. Every variant is detected before any I/O happens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("Content not found")]
    MissingContent,

    #[error("Report number not found in the provided data")]
    MissingIdentifier,

    #[error("invalid report identifier: {0:?}")]
    InvalidIdentifier(String),
}

/// Walk the full error chain and join all causes into one string.
///
/// SDK and template errors often have terse `Display` impls (e.g. "service
/// error") but useful detail in the source chain.
pub fn format_err_chain(err: &dyn std::error::Error) -> String {
    let mut msg = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        msg.push_str(": ");
        msg.push_str(&cause.to_string());
        source = cause.source();
    }
    msg
}
