use std::path::{Path, PathBuf};
use std::time::Duration;
use std::{error::Error, fmt};

use leandoc_store::schema::DATASET_URL;

use crate::fetch::{DatasetFetcher, FetchError};
use crate::loader::LoadError;

pub mod search;
pub mod tool;

pub use tool::LeanDocTool;

pub const DEFAULT_MAX_RESULTS: usize = 10;

/// Reported category of a failed invocation.
///
/// Malformed tool arguments are not listed: rmcp rejects them while decoding
/// parameters, before the control plane runs, and reports `INVALID_PARAMS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NetworkError,
    MissingData,
    ParseError,
    UnknownTool,
    Io,
}

impl ErrorKind {
    /// JSON-RPC error code reported to MCP clients.
    pub const fn code(self) -> i32 {
        match self {
            Self::NetworkError => -32001,
            Self::MissingData => -32002,
            Self::ParseError => -32003,
            Self::UnknownTool => -32004,
            Self::Io => -32603,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NetworkError => "network_error",
            Self::MissingData => "missing_data",
            Self::ParseError => "parse_error",
            Self::UnknownTool => "unknown_tool",
            Self::Io => "io_error",
        }
    }
}

#[derive(Debug)]
pub enum ControlError {
    Fetch(FetchError),
    MissingData {
        path: PathBuf,
        fetch: Option<FetchError>,
    },
    Parse {
        path: PathBuf,
        message: String,
    },
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    UnknownTool(String),
}

impl ControlError {
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Fetch(FetchError::Io { .. }) | Self::Io { .. } => ErrorKind::Io,
            Self::Fetch(_) => ErrorKind::NetworkError,
            Self::MissingData { .. } => ErrorKind::MissingData,
            Self::Parse { .. } => ErrorKind::ParseError,
            Self::UnknownTool(_) => ErrorKind::UnknownTool,
        }
    }
}

impl fmt::Display for ControlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fetch(err) => write!(f, "{err}"),
            Self::MissingData { path, fetch: Some(err) } => write!(
                f,
                "declaration data missing at {} (download failed: {err})",
                path.display()
            ),
            Self::MissingData { path, fetch: None } => {
                write!(f, "declaration data missing at {}", path.display())
            }
            Self::Parse { path, message } => write!(
                f,
                "declaration data at {} could not be parsed: {message}",
                path.display()
            ),
            Self::Io { path, source } => {
                write!(f, "failed to read declaration data at {}: {source}", path.display())
            }
            Self::UnknownTool(name) => write!(f, "Unknown tool: {name}"),
        }
    }
}

impl Error for ControlError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Fetch(err) | Self::MissingData { fetch: Some(err), .. } => Some(err),
            Self::Io { source, .. } => Some(source),
            Self::MissingData { fetch: None, .. } | Self::Parse { .. } | Self::UnknownTool(_) => {
                None
            }
        }
    }
}

impl From<FetchError> for ControlError {
    fn from(err: FetchError) -> Self {
        Self::Fetch(err)
    }
}

impl From<LoadError> for ControlError {
    fn from(err: LoadError) -> Self {
        match err {
            LoadError::NotFound(path) => Self::MissingData { path, fetch: None },
            LoadError::Io { path, source } => Self::Io { path, source },
            LoadError::Parse { path, message } => Self::Parse { path, message },
        }
    }
}

/// Settings for where the snapshot lives and how searches are capped.
#[derive(Debug, Clone)]
pub struct ControlConfig {
    pub dataset_path: PathBuf,
    pub dataset_url: String,
    pub fetch_timeout: Option<Duration>,
    pub max_results: usize,
}

impl ControlConfig {
    pub fn new(dataset_path: impl Into<PathBuf>) -> Self {
        Self {
            dataset_path: dataset_path.into(),
            dataset_url: DATASET_URL.to_string(),
            fetch_timeout: None,
            max_results: DEFAULT_MAX_RESULTS,
        }
    }

    #[must_use]
    pub fn with_dataset_url(mut self, dataset_url: impl Into<String>) -> Self {
        self.dataset_url = dataset_url.into();
        self
    }

    #[must_use]
    pub const fn with_fetch_timeout(mut self, fetch_timeout: Option<Duration>) -> Self {
        self.fetch_timeout = fetch_timeout;
        self
    }

    #[must_use]
    pub const fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }
}

/// Runs tool invocations against the on-disk snapshot.
///
/// Nothing is cached between calls: every search reloads the dataset, so the
/// only shared state is the fetcher's single-flight guard.
#[derive(Debug, Clone)]
pub struct LeanDocControlPlane {
    fetcher: DatasetFetcher,
    max_results: usize,
}

impl LeanDocControlPlane {
    pub fn new(config: ControlConfig) -> Self {
        let fetcher = DatasetFetcher::new(config.dataset_path)
            .with_url(config.dataset_url)
            .with_timeout(config.fetch_timeout);
        Self::with_fetcher(fetcher, config.max_results)
    }

    pub const fn with_fetcher(fetcher: DatasetFetcher, max_results: usize) -> Self {
        Self {
            fetcher,
            max_results,
        }
    }

    pub const fn fetcher(&self) -> &DatasetFetcher {
        &self.fetcher
    }

    pub fn dataset_path(&self) -> &Path {
        self.fetcher.path()
    }

    pub const fn max_results(&self) -> usize {
        self.max_results
    }
}
