//! MCP tool modules.
//!
//! Only the documentation search tool is registered today.

pub mod search;
