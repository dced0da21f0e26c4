//! Dataset models and constants for leandoc-mcp.
//!
//! This crate defines the shape of the Mathlib declaration-data snapshot and
//! the transient search results rendered back to MCP clients.

pub mod keyed;
pub mod models;
pub mod schema;

pub use models::*;
