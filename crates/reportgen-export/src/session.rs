use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};

use tempfile::TempDir;
use tokio::process::{Child, Command};

use crate::error::ExportError;

const LOG_TAIL_LINES: usize = 20;

/// Resources owned by one rasterization: a private scratch directory and,
/// once launched, the renderer process.
///
/// Dropping the session kills a process that is still running and deletes
/// the scratch directory, whichever way the render ended.
pub struct RenderSession {
    // Declared before `dir` so the process goes away before its files do.
    child: Option<Child>,
    dir: TempDir,
}

impl RenderSession {
    /// Create the scratch directory under `scratch_root`, or the system temp
    /// directory when `None`.
    pub fn open(scratch_root: Option<&Path>) -> Result<Self, ExportError> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("reportgen-render-");
        let dir = match scratch_root {
            Some(root) => builder.tempdir_in(root)?,
            None => builder.tempdir()?,
        };
        tracing::debug!(dir = %dir.path().display(), "render session opened");
        Ok(Self { child: None, dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn input_path(&self) -> PathBuf {
        self.dir.path().join("report.html")
    }

    pub fn output_path(&self) -> PathBuf {
        self.dir.path().join("report.pdf")
    }

    fn log_path(&self) -> PathBuf {
        self.dir.path().join("renderer.log")
    }

    fn profile_path(&self) -> PathBuf {
        self.dir.path().join("profile")
    }

    pub async fn write_document(&self, html: &str) -> Result<(), ExportError> {
        tokio::fs::write(self.input_path(), html).await?;
        Ok(())
    }

    /// Start a headless Chromium that prints the session document to the
    /// session output path.
    pub fn launch(&mut self, executable: &Path, args: &[String]) -> Result<(), ExportError> {
        if self.child.is_some() {
            return Err(ExportError::Launch("render process already started".to_string()));
        }

        let log = std::fs::File::create(self.log_path())?;
        let child = Command::new(executable)
            .args(args)
            .arg(format!("--user-data-dir={}", self.profile_path().display()))
            .arg(format!("--print-to-pdf={}", self.output_path().display()))
            .arg("--no-pdf-header-footer")
            .arg(format!("file://{}", self.input_path().display()))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::from(log))
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| ExportError::Launch(format!("{}: {e}", executable.display())))?;

        tracing::debug!(pid = ?child.id(), executable = %executable.display(), "renderer launched");
        self.child = Some(child);
        Ok(())
    }

    /// Wait for the renderer to exit. No deadline: the invocation timeout
    /// of the hosting runtime is the only backstop.
    pub async fn wait(&mut self) -> Result<ExitStatus, ExportError> {
        let child = self
            .child
            .as_mut()
            .ok_or_else(|| ExportError::Launch("render process not started".to_string()))?;
        Ok(child.wait().await?)
    }

    /// Last lines the renderer wrote to stderr, for error messages.
    pub async fn log_tail(&self) -> String {
        let log = tokio::fs::read_to_string(self.log_path())
            .await
            .unwrap_or_default();
        let lines: Vec<&str> = log.lines().collect();
        let start = lines.len().saturating_sub(LOG_TAIL_LINES);
        lines[start..].join("\n")
    }

    /// Read and sanity-check the rasterized PDF.
    pub async fn read_output(&self) -> Result<Vec<u8>, ExportError> {
        let bytes = match tokio::fs::read(self.output_path()).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ExportError::Rasterize(format!(
                    "renderer produced no output: {}",
                    self.log_tail().await
                )));
            }
            Err(e) => return Err(e.into()),
        };

        if !bytes.starts_with(b"%PDF-") {
            return Err(ExportError::Rasterize(format!(
                "renderer output is not a PDF ({} bytes)",
                bytes.len()
            )));
        }
        Ok(bytes)
    }
}

impl Drop for RenderSession {
    fn drop(&mut self) {
        if let Some(child) = self.child.as_mut()
            && let Ok(None) = child.try_wait()
        {
            tracing::warn!(pid = ?child.id(), "renderer still running at release, killing");
            if let Err(e) = child.start_kill() {
                tracing::warn!(error = %e, "failed to kill renderer");
            }
        }
        tracing::debug!(dir = %self.dir.path().display(), "render session released");
    }
}
