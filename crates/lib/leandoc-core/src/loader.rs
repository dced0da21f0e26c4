//! Dataset loader.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::{error::Error, fmt};

use leandoc_store::models::Dataset;
use tracing::debug;

#[derive(Debug)]
pub enum LoadError {
    NotFound(PathBuf),
    Io { path: PathBuf, source: std::io::Error },
    Parse { path: PathBuf, message: String },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(path) => write!(f, "dataset not found at {}", path.display()),
            Self::Io { path, source } => {
                write!(f, "failed to read dataset at {}: {source}", path.display())
            }
            Self::Parse { path, message } => {
                write!(f, "dataset at {} is not valid declaration data: {message}", path.display())
            }
        }
    }
}

impl Error for LoadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::NotFound(_) | Self::Parse { .. } => None,
        }
    }
}

/// Reads declaration-data snapshots from disk.
pub struct DatasetLoader;

impl DatasetLoader {
    /// Parses snapshot text.
    ///
    /// # Errors
    /// Returns `serde_json::Error` if the text is not a declaration-data object.
    pub fn parse(text: &str) -> Result<Dataset, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Reads and parses the snapshot at `path`.
    ///
    /// # Errors
    /// Returns `LoadError::NotFound` when the file is absent, `LoadError::Parse`
    /// when it is not UTF-8 declaration data, and `LoadError::Io` otherwise.
    pub fn load(path: &Path) -> Result<Dataset, LoadError> {
        let text = std::fs::read_to_string(path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => LoadError::NotFound(path.to_path_buf()),
            ErrorKind::InvalidData => LoadError::Parse {
                path: path.to_path_buf(),
                message: source.to_string(),
            },
            _ => LoadError::Io {
                path: path.to_path_buf(),
                source,
            },
        })?;

        let dataset = Self::parse(&text).map_err(|err| LoadError::Parse {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
        debug!(
            path = %path.display(),
            declarations = dataset.declarations.len(),
            "dataset loaded"
        );
        Ok(dataset)
    }

    /// Loads the snapshot on a blocking task.
    ///
    /// # Errors
    /// Returns `LoadError` if loading fails or the task panics.
    pub async fn load_async(path: impl AsRef<Path>) -> Result<Dataset, LoadError> {
        let path = path.as_ref().to_path_buf();
        let task_path = path.clone();
        tokio::task::spawn_blocking(move || Self::load(&task_path))
            .await
            .map_err(|err| LoadError::Io {
                path,
                source: std::io::Error::other(err),
            })?
    }
}
