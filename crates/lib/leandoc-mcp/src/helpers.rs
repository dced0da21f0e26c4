use std::borrow::Cow;

use leandoc_core::control::ControlError;
use rmcp::ErrorData;
use rmcp::model::ErrorCode;
use serde_json::json;

pub fn mcp_err(code: ErrorCode, message: impl Into<Cow<'static, str>>) -> ErrorData {
    ErrorData {
        code,
        message: message.into(),
        data: None,
    }
}

/// Maps a control-plane failure onto a JSON-RPC error with a stable code.
pub fn map_control_err(err: &ControlError) -> ErrorData {
    let kind = err.kind();
    let mut error = mcp_err(ErrorCode(kind.code()), err.to_string());
    error.data = Some(json!({ "kind": kind.as_str() }));
    error
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn unknown_tool_keeps_its_message() {
        let error = map_control_err(&ControlError::UnknownTool("nope".to_string()));
        assert_eq!(error.code, ErrorCode(-32004));
        assert_eq!(error.message, "Unknown tool: nope");
        assert_eq!(error.data, Some(json!({ "kind": "unknown_tool" })));
    }

    #[test]
    fn missing_data_uses_its_own_code() {
        let error = map_control_err(&ControlError::MissingData {
            path: PathBuf::from("data/declaration-data.bmp"),
            fetch: None,
        });
        assert_eq!(error.code, ErrorCode(-32002));
        assert!(error.message.contains("data/declaration-data.bmp"));
    }
}
