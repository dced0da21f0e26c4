use rmcp::{
    ErrorData,
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content},
    schemars,
    tool,
    tool_router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use crate::LeanDocMcp;
use crate::helpers::map_control_err;

/// Arguments accepted by `search_lean_doc`.
///
/// `queries` is advertised as required, but an absent field still decodes to
/// an empty batch.
#[derive(Debug, Clone, Default, Serialize, Deserialize, schemars::JsonSchema)]
#[schemars(transform = require_queries)]
pub struct SearchLeanDocParams {
    /// Search queries
    #[serde(default)]
    pub queries: Vec<String>,
}

fn require_queries(schema: &mut schemars::Schema) {
    schema.insert("required".to_string(), json!(["queries"]));
}

#[tool_router(router = tool_router_search, vis = "pub")]
impl LeanDocMcp {
    #[tool(
        name = "search_lean_doc",
        description = "Search Lean Mathlib 4 documentation"
    )]
    async fn search_lean_doc(
        &self,
        params: Parameters<SearchLeanDocParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let queries = params.0.queries;
        info!(queries = queries.len(), "search_lean_doc invoked");
        let blocks = self
            .control
            .search_lean_doc(&queries)
            .await
            .map_err(|err| map_control_err(&err))?;
        Ok(search_result(blocks))
    }
}

/// One text block per hit, mirrored as `{"results": [...]}` structured content.
///
/// rmcp clients reject a tool result with neither content nor structured
/// content; an empty batch decodes through the structured copy.
fn search_result(blocks: Vec<String>) -> CallToolResult {
    let structured = json!({ "results": &blocks });
    let mut result = CallToolResult::success(blocks.into_iter().map(Content::text).collect());
    result.structured_content = Some(structured);
    result
}
