//! Shared types for the comanda board service
//!
//! Value types used by both the board server and its clients: POS
//! entities, the consolidated order model, the wire-trace envelope and
//! the localization formatter.

pub mod localization;
pub mod models;
pub mod trace;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use models::{
    ComandaData, OrderLineItem, ProcessedItem, Product, Table, TableDetail, TableLineItem,
    TableStatus,
};
pub use trace::{WireFrame, WireTrace};
