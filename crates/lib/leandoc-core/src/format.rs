//! Plain-text rendering of search hits.

use leandoc_store::models::SearchResult;
use leandoc_store::schema::{IMPORTED_BY_PREVIEW, RESULT_SEPARATOR};

/// Renders one hit as the multi-line block returned to MCP clients.
pub fn format_result(result: &SearchResult) -> String {
    match result {
        SearchResult::Declaration {
            name,
            kind,
            doc_link,
        } => format!(
            "Declaration: {name}\nKind: {kind}\nDocumentation Link: {doc_link}\n{RESULT_SEPARATOR}"
        ),
        SearchResult::Instance { name } => format!("Instance: {name}\n{RESULT_SEPARATOR}"),
        SearchResult::Module {
            name,
            url,
            imported_by,
        } => {
            let preview = imported_by
                .iter()
                .take(IMPORTED_BY_PREVIEW)
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join("\n  ");
            let more = if imported_by.len() > IMPORTED_BY_PREVIEW {
                "..."
            } else {
                ""
            };
            format!("Module: {name}\nURL: {url}\nImported by: {preview}{more}\n{RESULT_SEPARATOR}")
        }
    }
}
