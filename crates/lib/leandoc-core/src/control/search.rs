use leandoc_store::models::{Dataset, SearchResult};
use tracing::{debug, warn};

use super::{ControlError, LeanDocControlPlane};
use crate::fetch::FetchOutcome;
use crate::format::format_result;
use crate::loader::{DatasetLoader, LoadError};
use crate::search::{SearchScope, search};

impl LeanDocControlPlane {
    /// Downloads the snapshot if it is not on disk yet.
    ///
    /// # Errors
    /// Returns `ControlError::Fetch` if the download fails.
    pub async fn fetch(&self) -> Result<FetchOutcome, ControlError> {
        Ok(self.fetcher.ensure_local_copy().await?)
    }

    /// Ensures the snapshot exists, then loads it from disk.
    ///
    /// A failed download is logged rather than returned; if the file is still
    /// missing afterwards the error is `MissingData` carrying that failure.
    ///
    /// # Errors
    /// Returns `ControlError` if the snapshot is missing, unreadable, or invalid.
    pub async fn load_dataset(&self) -> Result<Dataset, ControlError> {
        let fetch_failure = match self.fetcher.ensure_local_copy().await {
            Ok(outcome) => {
                debug!(?outcome, "dataset fetch step finished");
                None
            }
            Err(err) => {
                warn!(error = %err, url = self.fetcher.url(), "failed to download declaration data");
                Some(err)
            }
        };

        match DatasetLoader::load_async(self.fetcher.path()).await {
            Ok(dataset) => Ok(dataset),
            Err(LoadError::NotFound(path)) => Err(ControlError::MissingData {
                path,
                fetch: fetch_failure,
            }),
            Err(err) => Err(err.into()),
        }
    }

    /// Searches every query against one freshly loaded snapshot.
    ///
    /// Results are grouped by query in the order given, each group in
    /// dataset order and capped at `limit` (or the configured default).
    ///
    /// # Errors
    /// Returns `ControlError` if the snapshot cannot be loaded.
    pub async fn search(
        &self,
        queries: &[String],
        scope: SearchScope,
        limit: Option<usize>,
    ) -> Result<Vec<SearchResult>, ControlError> {
        if queries.is_empty() {
            return Ok(Vec::new());
        }

        let dataset = self.load_dataset().await?;
        let max_results = limit.unwrap_or(self.max_results);
        let mut results = Vec::new();
        for query in queries {
            let hits = search(query, &dataset, scope, max_results);
            debug!(query = %query, %scope, hits = hits.len(), "query finished");
            results.extend(hits);
        }
        Ok(results)
    }

    /// Runs the `search_lean_doc` tool: declaration search, rendered as text.
    ///
    /// # Errors
    /// Returns `ControlError` if the snapshot cannot be loaded.
    pub async fn search_lean_doc(&self, queries: &[String]) -> Result<Vec<String>, ControlError> {
        let results = self
            .search(queries, SearchScope::Declarations, None)
            .await?;
        Ok(results.iter().map(format_result).collect())
    }
}
