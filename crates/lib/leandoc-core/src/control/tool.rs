use std::str::FromStr;

use super::ControlError;

pub const SEARCH_LEAN_DOC: &str = "search_lean_doc";
pub const SEARCH_LEAN_DOC_DESCRIPTION: &str = "Search Lean Mathlib 4 documentation";

/// Tools this server registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeanDocTool {
    SearchLeanDoc,
}

impl LeanDocTool {
    pub const ALL: [Self; 1] = [Self::SearchLeanDoc];

    pub const fn name(self) -> &'static str {
        match self {
            Self::SearchLeanDoc => SEARCH_LEAN_DOC,
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::SearchLeanDoc => SEARCH_LEAN_DOC_DESCRIPTION,
        }
    }

    /// Resolves a requested tool name.
    ///
    /// # Errors
    /// Returns `ControlError::UnknownTool` for any unregistered name.
    pub fn resolve(name: &str) -> Result<Self, ControlError> {
        name.parse()
    }
}

impl FromStr for LeanDocTool {
    type Err = ControlError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tool| tool.name() == name)
            .ok_or_else(|| ControlError::UnknownTool(name.to_string()))
    }
}
