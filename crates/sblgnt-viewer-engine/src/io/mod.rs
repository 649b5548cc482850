use relative_path::RelativePath;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("No fetch capability is available")]
    MissingCapability,
    #[error("Request for {url} failed with status {status}")]
    Status { url: String, status: u16 },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CacheMode {
    #[default]
    NoCache,
    Default,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchOptions {
    pub cache: CacheMode,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    pub ok: bool,
    pub status: u16,
    pub body: String,
}

impl FetchResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            ok: true,
            status: 200,
            body: body.into(),
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            ok: (200..300).contains(&status),
            status,
            body: String::new(),
        }
    }

    pub fn json(&self) -> Result<Value, FetchError> {
        Ok(serde_json::from_str(&self.body)?)
    }
}

/// Network-like capability used for every document the viewer loads.
///
/// Calls are made one at a time; a non-OK response is returned as a
/// response, not an error.
pub trait Fetch {
    fn fetch(&self, url: &str, options: FetchOptions) -> Result<FetchResponse, FetchError>;
}

/// Serves URLs as paths relative to a data root
#[derive(Debug, Clone)]
pub struct FileFetcher {
    root: PathBuf,
}

impl FileFetcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Fetch for FileFetcher {
    fn fetch(&self, url: &str, _options: FetchOptions) -> Result<FetchResponse, FetchError> {
        let path = RelativePath::new(url.trim_start_matches('/')).to_logical_path(&self.root);
        if !path.starts_with(&self.root) {
            log::warn!("Refusing to fetch {url}: outside data root");
            return Ok(FetchResponse::status(403));
        }
        if !path.is_file() {
            log::debug!("No file for {url} at {}", path.display());
            return Ok(FetchResponse::status(404));
        }
        let body = fs::read_to_string(&path)?;
        Ok(FetchResponse::ok(body))
    }
}

/// Error sink for failures the user also sees in the status panel
pub trait Console {
    fn error(&self, message: &str);
}

/// Forwards to the `log` facade
#[derive(Debug, Clone, Copy, Default)]
pub struct LogConsole;

impl Console for LogConsole {
    fn error(&self, message: &str) {
        log::error!("{message}");
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopConsole;

impl Console for NoopConsole {
    fn error(&self, _message: &str) {}
}
