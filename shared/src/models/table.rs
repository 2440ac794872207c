//! Table Model

use serde::{Deserialize, Serialize};

use super::order::TableLineItem;

/// Table occupancy status as reported by the POS
///
/// Serialized as the raw POS integer (0/1/2). Unknown values collapse to
/// `Free`, matching how the terminal treats unrecognised states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum TableStatus {
    Free,
    Occupied,
    Closing,
}

impl From<u8> for TableStatus {
    fn from(value: u8) -> Self {
        match value {
            1 => TableStatus::Occupied,
            2 => TableStatus::Closing,
            _ => TableStatus::Free,
        }
    }
}

impl From<TableStatus> for u8 {
    fn from(status: TableStatus) -> Self {
        match status {
            TableStatus::Free => 0,
            TableStatus::Occupied => 1,
            TableStatus::Closing => 2,
        }
    }
}

/// Table entity
///
/// Mutated only by POS-side actions (prebill, close); the cache stores
/// copies and never writes back.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    pub id: i64,
    pub name: String,
    pub status: TableStatus,
    pub lock_description: Option<String>,
    pub inactive: bool,
    pub free_table: bool,
    pub initial_user: i64,
}

/// Per-table content payload returned by the POS
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableDetail {
    pub id: i64,
    pub status: TableStatus,
    pub table_location: Option<String>,
    pub content: Vec<TableLineItem>,
    pub total: f64,
    pub global_discount: f64,
}
