use std::path::{Path, PathBuf};
use std::time::Instant;

use reportgen_core::BoxFuture;

use crate::error::ExportError;
use crate::session::RenderSession;
use crate::styles::{PageLayout, Stylesheet, compose_document};

/// Turns an HTML fragment into PDF bytes.
pub trait PdfEngine: Send + Sync {
    fn render_pdf<'a>(&'a self, html: &'a str) -> BoxFuture<'a, Result<Vec<u8>, ExportError>>;
}

/// Flags for a sandbox-less headless Chromium as shipped in Lambda layers.
pub const DEFAULT_CHROMIUM_ARGS: &[&str] = &[
    "--headless",
    "--disable-gpu",
    "--no-sandbox",
    "--no-zygote",
    "--single-process",
    "--disable-dev-shm-usage",
    "--hide-scrollbars",
    "--mute-audio",
    "--no-first-run",
    "--font-render-hinting=none",
];

/// `PdfEngine` that runs one headless Chromium process per render.
///
/// Nothing is pooled across renders; each call opens its own
/// [`RenderSession`] and releases it before returning.
#[derive(Debug, Clone)]
pub struct ChromiumEngine {
    executable: PathBuf,
    args: Vec<String>,
    stylesheet: Stylesheet,
    layout: PageLayout,
    scratch_root: Option<PathBuf>,
}

impl ChromiumEngine {
    pub fn new(executable: impl Into<PathBuf>, stylesheet: Stylesheet) -> Self {
        Self {
            executable: executable.into(),
            args: DEFAULT_CHROMIUM_ARGS.iter().map(|a| a.to_string()).collect(),
            stylesheet,
            layout: PageLayout::default(),
            scratch_root: None,
        }
    }

    pub fn with_layout(mut self, layout: PageLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }

    pub fn with_scratch_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.scratch_root = Some(root.into());
        self
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }
}

impl PdfEngine for ChromiumEngine {
    fn render_pdf<'a>(&'a self, html: &'a str) -> BoxFuture<'a, Result<Vec<u8>, ExportError>> {
        Box::pin(async move {
            let started = Instant::now();
            let mut session = RenderSession::open(self.scratch_root.as_deref())?;

            let document = compose_document(html, &self.stylesheet, &self.layout);
            session.write_document(&document).await?;

            session.launch(&self.executable, &self.args)?;
            let status = session.wait().await?;
            if !status.success() {
                return Err(ExportError::Rasterize(format!(
                    "renderer exited with {status}: {}",
                    session.log_tail().await
                )));
            }

            let pdf = session.read_output().await?;
            tracing::info!(
                bytes = pdf.len(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "PDF rasterized"
            );
            Ok(pdf)
        })
    }
}
