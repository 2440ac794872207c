//! Data models
//!
//! Shared between board-server and frontend (via API).
//! POS-facing types keep the camelCase field names the terminal emits.

pub mod order;
pub mod product;
pub mod table;

// Re-exports
pub use order::*;
pub use product::*;
pub use table::*;
