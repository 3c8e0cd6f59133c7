use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ExportError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaperFormat {
    A4,
    Letter,
}

impl PaperFormat {
    fn css_size(self) -> &'static str {
        match self {
            PaperFormat::A4 => "A4",
            PaperFormat::Letter => "letter",
        }
    }
}

/// Physical layout of the rasterized PDF.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageLayout {
    /// Page size used when the stylesheet does not set one.
    pub format: PaperFormat,

    /// Page margin in millimetres (applied uniformly).
    pub margin_mm: f64,

    /// Print background colours and images.
    pub print_background: bool,

    /// Let an `@page { size: ... }` rule in the stylesheet win over `format`.
    pub prefer_css_page_size: bool,
}

impl Default for PageLayout {
    fn default() -> Self {
        Self {
            format: PaperFormat::A4,
            margin_mm: 3.0,
            print_background: true,
            prefer_css_page_size: true,
        }
    }
}

impl PageLayout {
    /// CSS that applies this layout in print media.
    pub fn page_rules(&self) -> String {
        let mut css = format!(
            "@page {{ size: {}; margin: {}mm; }}",
            self.format.css_size(),
            self.margin_mm
        );
        if self.print_background {
            css.push_str(" html { -webkit-print-color-adjust: exact; print-color-adjust: exact; }");
        }
        css
    }
}

/// Stylesheet embedded into every report document.
#[derive(Debug, Clone, Default)]
pub struct Stylesheet(String);

impl Stylesheet {
    pub fn inline(css: impl Into<String>) -> Self {
        Self(css.into())
    }

    /// Read the stylesheet once at startup. A missing file is a deployment
    /// error and is reported immediately rather than per request.
    pub fn load(path: &Path) -> Result<Self, ExportError> {
        let css = std::fs::read_to_string(path)
            .map_err(|e| ExportError::Stylesheet(format!("{}: {e}", path.display())))?;
        tracing::info!(path = %path.display(), bytes = css.len(), "loaded report stylesheet");
        Ok(Self(css))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Wrap a rendered HTML fragment into a full document.
///
/// Cascade order decides which page size wins: the layout rules come first
/// when the stylesheet is preferred, last otherwise.
pub fn compose_document(body: &str, stylesheet: &Stylesheet, layout: &PageLayout) -> String {
    let page_rules = layout.page_rules();
    let (before, after) = if layout.prefer_css_page_size {
        (page_rules.as_str(), "")
    } else {
        ("", page_rules.as_str())
    };

    format!(
        "<!DOCTYPE html>\n<html>\n  <head>\n    <meta charset=\"utf-8\">\n    \
         <style>{before}</style>\n    <style>{css}</style>\n    <style>{after}</style>\n  \
         </head>\n  <body>\n{body}\n  </body>\n</html>\n",
        css = stylesheet.as_str(),
    )
}
