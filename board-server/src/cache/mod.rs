//! Table snapshot cache
//!
//! Process-wide cache of the full table list (single slot) and per-table
//! detail payloads, both fetched lazily from the POS and replaced
//! wholesale on refresh. The POS stays the source of truth; entries are
//! never mutated in place and only cleared by the explicit reset calls.
//!
//! There is deliberately no single-flight guard: concurrent first accesses
//! may each issue a POS fetch and the last insert wins. Repeated
//! pagination requests still observe one consistent dataset because the
//! populated slot is served until reset.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use shared::{Table, TableDetail, TableStatus, WireTrace};
use tokio::sync::RwLock;

use crate::clients::PosClient;
use crate::utils::{AppError, AppResult};

/// Cached full table list
#[derive(Debug, Clone, Serialize)]
pub struct TablesSnapshot {
    pub tables: Vec<Table>,
    pub wire_trace: Option<WireTrace>,
    pub fetched_at: DateTime<Utc>,
}

/// Cached per-table content payload
#[derive(Debug, Clone, Serialize)]
pub struct TableDetailSnapshot {
    pub table_id: i64,
    pub table: TableDetail,
    pub wire_trace: Option<WireTrace>,
    pub fetched_at: DateTime<Utc>,
}

/// Aggregate counts over the full (unpaginated) table set
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TablesSummary {
    pub total: usize,
    pub open: usize,
    pub closing: usize,
    pub free: usize,
}

/// Pagination metadata; indexes reported 1-based (0 when the set is empty)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginationMeta {
    pub page: u32,
    pub page_size: u32,
    pub total_items: usize,
    pub total_pages: usize,
    pub has_previous: bool,
    pub has_next: bool,
    pub start_index: usize,
    pub end_index: usize,
}

/// Composed `/tables` response payload
#[derive(Debug, Clone, Serialize)]
pub struct TablesResponse {
    pub tables: Vec<Table>,
    pub summary: TablesSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PaginationMeta>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wire_trace: Option<WireTrace>,
}

#[derive(Debug, Default)]
struct CacheInner {
    snapshot: Option<TablesSnapshot>,
    details: HashMap<i64, TableDetailSnapshot>,
}

/// Injectable cache object with explicit lifecycle
///
/// Constructed once at service start and reset through the admin
/// endpoints; cheap to clone (shared interior).
#[derive(Debug, Clone, Default)]
pub struct TableCache {
    inner: Arc<RwLock<CacheInner>>,
}

impl TableCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached table list, fetching it lazily on first access
    pub async fn get_tables(&self, pos: &dyn PosClient) -> AppResult<TablesSnapshot> {
        {
            let inner = self.inner.read().await;
            if let Some(snapshot) = &inner.snapshot {
                return Ok(snapshot.clone());
            }
        }

        // No in-flight dedup: two concurrent first calls may both fetch,
        // last insert wins.
        let payload = pos.fetch_tables().await?;
        let snapshot = TablesSnapshot {
            tables: payload.tables,
            wire_trace: payload.wire_trace,
            fetched_at: Utc::now(),
        };
        tracing::info!(tables = snapshot.tables.len(), "Table snapshot populated");
        self.inner.write().await.snapshot = Some(snapshot.clone());
        Ok(snapshot)
    }

    /// Clear the full-list slot; the next `get_tables` call repopulates
    pub async fn reset_tables(&self) {
        self.inner.write().await.snapshot = None;
        tracing::info!("Table snapshot cleared");
    }

    /// Return the cached detail for `table_id`, fetching when absent
    ///
    /// A cached traceless entry is transparently upgraded when the caller
    /// asks for a trace; a cached entry with a trace is never downgraded.
    pub async fn get_table_detail(
        &self,
        pos: &dyn PosClient,
        table_id: i64,
        include_trace: bool,
    ) -> AppResult<TableDetailSnapshot> {
        let cached = {
            let inner = self.inner.read().await;
            inner.details.get(&table_id).cloned()
        };

        let needs_trace =
            include_trace && cached.as_ref().is_none_or(|s| s.wire_trace.is_none());
        if let Some(snapshot) = cached
            && !needs_trace
        {
            return Ok(snapshot);
        }

        let payload = pos.fetch_table_detail(table_id, include_trace).await?;
        let snapshot = TableDetailSnapshot {
            table_id,
            table: payload.table,
            wire_trace: payload.wire_trace,
            fetched_at: Utc::now(),
        };
        self.inner
            .write()
            .await
            .details
            .insert(table_id, snapshot.clone());
        tracing::debug!(table_id, with_trace = snapshot.wire_trace.is_some(), "Table detail cached");
        Ok(snapshot)
    }

    /// Clear one detail entry, or all of them when `table_id` is `None`
    pub async fn reset_table_detail(&self, table_id: Option<i64>) {
        let mut inner = self.inner.write().await;
        match table_id {
            Some(id) => {
                inner.details.remove(&id);
                tracing::info!(table_id = id, "Table detail entry cleared");
            }
            None => {
                inner.details.clear();
                tracing::info!("All table detail entries cleared");
            }
        }
    }

    /// Compose the paginated, summarized `/tables` payload
    ///
    /// Summary counts always cover the full cached set, never just the
    /// visible page.
    pub async fn list_tables(
        &self,
        pos: &dyn PosClient,
        page: Option<u32>,
        page_size: Option<u32>,
        include_trace: bool,
    ) -> AppResult<TablesResponse> {
        let snapshot = self.get_tables(pos).await?;
        let (tables, pagination) = paginate_tables(&snapshot.tables, page, page_size)?;
        Ok(TablesResponse {
            summary: summarize_tables(&snapshot.tables),
            tables,
            pagination,
            wire_trace: include_trace.then_some(snapshot.wire_trace).flatten(),
        })
    }
}

/// Aggregate counts for the UI summary cards
pub fn summarize_tables(tables: &[Table]) -> TablesSummary {
    let count = |status: TableStatus| tables.iter().filter(|t| t.status == status).count();
    TablesSummary {
        total: tables.len(),
        open: count(TableStatus::Occupied),
        closing: count(TableStatus::Closing),
        free: count(TableStatus::Free),
    }
}

/// Slice the table list using 1-based `page` and positive `page_size`
///
/// Both parameters absent: full list, no metadata. Exactly one provided,
/// or either non-positive: validation error. A start offset past the end
/// of a non-empty set: not-found.
pub fn paginate_tables(
    tables: &[Table],
    page: Option<u32>,
    page_size: Option<u32>,
) -> AppResult<(Vec<Table>, Option<PaginationMeta>)> {
    let (page, page_size) = match (page, page_size) {
        (None, None) => return Ok((tables.to_vec(), None)),
        (Some(page), Some(page_size)) => (page, page_size),
        _ => {
            return Err(AppError::validation(
                "Both page and page_size must be provided to enable pagination.",
            ));
        }
    };
    if page == 0 || page_size == 0 {
        return Err(AppError::validation(
            "page and page_size must be positive integers.",
        ));
    }

    let total_items = tables.len();
    let total_pages = std::cmp::max(1, total_items.div_ceil(page_size as usize));
    let start_index = (page as usize - 1) * page_size as usize;

    if total_items > 0 && start_index >= total_items {
        return Err(AppError::not_found("Requested page is out of range."));
    }

    let end_index = std::cmp::min(start_index + page_size as usize, total_items);
    let visible = tables[start_index..end_index].to_vec();

    let meta = PaginationMeta {
        page,
        page_size,
        total_items,
        total_pages,
        has_previous: page > 1 && total_items > 0,
        has_next: (page as usize) < total_pages && total_items > 0,
        start_index: if total_items > 0 { start_index + 1 } else { 0 },
        end_index: if total_items > 0 { end_index } else { 0 },
    };
    Ok((visible, Some(meta)))
}
