//! Dataset fetcher.
//!
//! Downloads the declaration-data snapshot once, on first use, and leaves it at
//! a fixed local path. There is no refresh: an existing file is always trusted.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use std::{error::Error, fmt};

use leandoc_store::schema::DATASET_URL;
use reqwest::Client;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// What [`DatasetFetcher::ensure_local_copy`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    AlreadyPresent,
    Downloaded { bytes: usize },
}

#[derive(Debug)]
pub enum FetchError {
    Request(reqwest::Error),
    Status { url: String, status: u16 },
    Io { path: PathBuf, source: std::io::Error },
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Request(err) => write!(f, "dataset request failed: {err}"),
            Self::Status { url, status } => {
                write!(f, "dataset request to {url} returned HTTP {status}")
            }
            Self::Io { path, source } => {
                write!(f, "failed to write dataset to {}: {source}", path.display())
            }
        }
    }
}

impl Error for FetchError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Request(err) => Some(err),
            Self::Status { .. } => None,
            Self::Io { source, .. } => Some(source),
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        Self::Request(err)
    }
}

/// Downloads the snapshot to `path` when it is absent.
///
/// Clones share one single-flight guard, so concurrent first calls issue at
/// most one request for the same fetcher.
#[derive(Clone)]
pub struct DatasetFetcher {
    client: Client,
    url: String,
    path: PathBuf,
    timeout: Option<Duration>,
    in_flight: Arc<Mutex<()>>,
}

impl DatasetFetcher {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            client: Client::new(),
            url: DATASET_URL.to_string(),
            path: path.into(),
            timeout: None,
            in_flight: Arc::new(Mutex::new(())),
        }
    }

    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Downloads the snapshot unless the local file already exists.
    ///
    /// The body is written to a sibling `.part` file and renamed into place,
    /// so a failed download never leaves a file at [`Self::path`].
    ///
    /// # Errors
    /// Returns `FetchError` if the request fails, the server answers with a
    /// non-success status, or the body cannot be written.
    pub async fn ensure_local_copy(&self) -> Result<FetchOutcome, FetchError> {
        let _flight = self.in_flight.lock().await;

        if tokio::fs::try_exists(&self.path)
            .await
            .map_err(|source| self.io_error(source))?
        {
            debug!(path = %self.path.display(), "dataset already present");
            return Ok(FetchOutcome::AlreadyPresent);
        }

        info!(url = %self.url, path = %self.path.display(), "downloading declaration data");
        let mut request = self.client.get(&self.url);
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }
        let body = response.bytes().await?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| self.io_error(source))?;
        }
        let partial = self.partial_path();
        tokio::fs::write(&partial, &body)
            .await
            .map_err(|source| self.io_error(source))?;
        tokio::fs::rename(&partial, &self.path)
            .await
            .map_err(|source| self.io_error(source))?;

        info!(bytes = body.len(), path = %self.path.display(), "declaration data saved");
        Ok(FetchOutcome::Downloaded { bytes: body.len() })
    }

    fn partial_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map_or_else(OsString::new, ToOwned::to_owned);
        name.push(".part");
        self.path.with_file_name(name)
    }

    fn io_error(&self, source: std::io::Error) -> FetchError {
        FetchError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl fmt::Debug for DatasetFetcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatasetFetcher")
            .field("url", &self.url)
            .field("path", &self.path)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_path_sits_next_to_dataset() {
        let fetcher = DatasetFetcher::new("/var/lib/leandoc/declaration-data.bmp");
        assert_eq!(
            fetcher.partial_path(),
            PathBuf::from("/var/lib/leandoc/declaration-data.bmp.part")
        );
    }

    #[tokio::test]
    async fn existing_file_skips_download() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("declaration-data.bmp");
        std::fs::write(&path, r#"{"declarations": {}}"#).expect("write dataset");

        let fetcher = DatasetFetcher::new(&path).with_url("http://127.0.0.1:9/unreachable");
        let outcome = fetcher
            .ensure_local_copy()
            .await
            .expect("existing file should not be fetched");

        assert_eq!(outcome, FetchOutcome::AlreadyPresent);
    }
}
