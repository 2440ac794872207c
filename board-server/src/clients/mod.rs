//! POS clients
//!
//! Pluggable client architecture for the POS terminal:
//! ```text
//!         ┌────────────────────┐
//!         │   PosClient Trait  │  ◄── capability seam
//!         └────────┬───────────┘
//!                  │
//!          ┌───────┴────────┐
//!          ▼                ▼
//!   MockPosClient     HttpPosClient
//!   (dev mode)        (POS bridge)
//! ```
//!
//! The implementation is selected once at state construction from
//! `Config::app_mode`; everything downstream only sees the trait.

mod http;
mod mock;
mod token;

pub use http::HttpPosClient;
pub use mock::MockPosClient;
pub use token::TokenManager;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shared::{Product, Table, TableDetail, WireTrace};

use crate::utils::AppResult;

/// Full table list as returned by the POS, trace included
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TablesPayload {
    pub tables: Vec<Table>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wire_trace: Option<WireTrace>,
}

/// Per-table content payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableDetailPayload {
    pub table: TableDetail,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wire_trace: Option<WireTrace>,
}

/// Result of a mutating POS action (prebill, close)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PosActionPayload {
    pub result: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wire_trace: Option<WireTrace>,
}

/// POS client capability set
///
/// The POS terminal owns authoritative table/order state; this trait only
/// describes the interface boundary. Callers must treat every payload as a
/// read-only snapshot.
#[async_trait]
pub trait PosClient: Send + Sync + std::fmt::Debug {
    /// Fetch the full table list along with its wire trace
    async fn fetch_tables(&self) -> AppResult<TablesPayload>;

    /// Fetch the content of one table, optionally with the wire trace
    async fn fetch_table_detail(
        &self,
        table_id: i64,
        include_trace: bool,
    ) -> AppResult<TableDetailPayload>;

    /// Issue a prebill for the table
    async fn prebill(&self, table_id: i64, include_trace: bool) -> AppResult<PosActionPayload>;

    /// Close the table after payment
    async fn close_table(&self, table_id: i64, include_trace: bool)
    -> AppResult<PosActionPayload>;

    /// Trigger a product reload on the POS side
    async fn load_products(&self) -> AppResult<Vec<Product>>;
}
