use std::env;
use std::path::PathBuf;

/// Deployment settings, read from the environment once per process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub bucket: String,
    /// `None` defers to the SDK default region chain.
    pub region: Option<String>,
    pub stylesheet_path: PathBuf,
    /// Overrides the built-in report template.
    pub template_path: Option<PathBuf>,
    pub chromium_path: PathBuf,
    pub conditional_writes: bool,
    /// Parent directory for render sessions. `None` = system temp dir.
    pub scratch_dir: Option<PathBuf>,
}

pub const DEFAULT_STYLESHEET: &str = "/var/task/public/output.css";

pub const DEFAULT_CHROMIUM: &str = "/opt/chromium";

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from any variable source. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> eyre::Result<Self> {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let bucket = get("S3_BUCKET_NAME")
            .ok_or_else(|| eyre::eyre!("S3_BUCKET_NAME must be set"))?;

        let conditional_writes = match get("REPORT_CONDITIONAL_WRITES") {
            None => true,
            Some(raw) => parse_bool(&raw).ok_or_else(|| {
                eyre::eyre!("REPORT_CONDITIONAL_WRITES must be true or false, got {raw:?}")
            })?,
        };

        Ok(Self {
            bucket,
            region: get("AWS_REGION"),
            stylesheet_path: get("REPORT_STYLESHEET")
                .unwrap_or_else(|| DEFAULT_STYLESHEET.to_string())
                .into(),
            template_path: get("REPORT_TEMPLATE").map(PathBuf::from),
            chromium_path: get("CHROMIUM_PATH")
                .unwrap_or_else(|| DEFAULT_CHROMIUM.to_string())
                .into(),
            conditional_writes,
            scratch_dir: get("REPORT_SCRATCH_DIR").map(PathBuf::from),
        })
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
