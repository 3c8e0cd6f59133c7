use thiserror::Error;

use reportgen_core::error::format_err_chain;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("template rendering failed: {0}")]
    TemplateRender(String),

    #[error("template parse error: {0}")]
    TemplateParse(String),

    #[error("stylesheet unavailable: {0}")]
    Stylesheet(String),

    #[error("renderer launch failed: {0}")]
    Launch(String),

    #[error("PDF rasterization failed: {0}")]
    Rasterize(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<tera::Error> for ExportError {
    fn from(e: tera::Error) -> Self {
        ExportError::TemplateRender(format_err_chain(&e))
    }
}
