//! Core services for leandoc-mcp.
//!
//! This crate owns the declaration-data pipeline: fetching the snapshot when it
//! is missing, loading it from disk, scanning it for name matches, and
//! rendering hits as text. The control plane ties those steps together for a
//! single tool invocation.

pub mod control;
pub mod fetch;
pub mod format;
pub mod loader;
pub mod search;
