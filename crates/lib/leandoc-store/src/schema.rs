pub const DATASET_URL: &str =
    "https://leanprover-community.github.io/mathlib4_docs/declarations/declaration-data.bmp";
pub const DATASET_FILE_NAME: &str = "declaration-data.bmp";
pub const DOCS_BASE_URL: &str = "https://leanprover-community.github.io/mathlib4_docs/";

pub const UNKNOWN_KIND: &str = "unknown";
pub const RESULT_SEPARATOR: &str = "-----";
pub const IMPORTED_BY_PREVIEW: usize = 5;

/// Resolves a dataset-relative doc link against the published docs root.
pub fn doc_url(doc_link: &str) -> String {
    let relative = doc_link.strip_prefix("./").unwrap_or(doc_link);
    format!("{DOCS_BASE_URL}{relative}")
}
