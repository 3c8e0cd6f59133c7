//! reportgen-export
//!
//! HTML rendering of report documents and HTML → PDF rasterization.

pub mod error;
pub mod pdf;
pub mod render;
pub mod session;
pub mod styles;

pub use pdf::{ChromiumEngine, PdfEngine};
pub use render::{HtmlRenderer, ReportTemplate};
pub use styles::{PageLayout, PaperFormat, Stylesheet};
