use std::path::Path;

use tera::{Context, Tera};

use reportgen_core::document::InputDocument;
use reportgen_core::error::format_err_chain;

use crate::error::ExportError;

/// Turns a report document into an HTML fragment (the `<body>` contents).
///
/// Must be pure: no I/O, same document in, same HTML out.
pub trait HtmlRenderer: Send + Sync {
    fn render_html(&self, doc: &InputDocument) -> Result<String, ExportError>;
}

const TEMPLATE_NAME: &str = "report.html";

const BUILTIN_TEMPLATE: &str = include_str!("../templates/credit_report.html.tera");

/// Tera-backed renderer. The document is exposed to the template as `report`.
///
/// The `.html` template name turns on Tera's autoescaping, so document
/// strings cannot inject markup.
pub struct ReportTemplate {
    tera: Tera,
}

impl ReportTemplate {
    /// The bundled credit-report layout.
    pub fn builtin() -> Result<Self, ExportError> {
        Self::from_source(BUILTIN_TEMPLATE)
    }

    pub fn from_source(source: &str) -> Result<Self, ExportError> {
        let mut tera = Tera::default();
        tera.add_raw_template(TEMPLATE_NAME, source)
            .map_err(|e| ExportError::TemplateParse(format_err_chain(&e)))?;
        Ok(Self { tera })
    }

    pub fn from_file(path: &Path) -> Result<Self, ExportError> {
        let source = std::fs::read_to_string(path).map_err(|e| {
            ExportError::TemplateParse(format!("{}: {e}", path.display()))
        })?;
        tracing::info!(path = %path.display(), "loaded report template");
        Self::from_source(&source)
    }
}

impl HtmlRenderer for ReportTemplate {
    fn render_html(&self, doc: &InputDocument) -> Result<String, ExportError> {
        let mut context = Context::new();
        context.insert("report", doc.as_value());
        let rendered = self.tera.render(TEMPLATE_NAME, &context)?;
        Ok(rendered)
    }
}
