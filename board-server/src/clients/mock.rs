//! Mock POS client
//!
//! Stands in for the terminal in development mode: fixed product catalog,
//! 99 tables with randomized occupancy and randomized order content per
//! occupied table. Wire traces mirror the production envelope so the
//! frontend monitor renders identically against either client.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use rand::Rng;
use serde_json::json;
use shared::{Product, Table, TableDetail, TableLineItem, TableStatus, WireTrace};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{PosActionPayload, PosClient, TableDetailPayload, TablesPayload, TokenManager};
use crate::utils::{AppError, AppResult};

/// Simulated POS round-trip latency
const MOCK_LATENCY: Duration = Duration::from_millis(20);

const MOCK_PRODUCTS: &[(i64, &str)] = &[
    (2001, "Picanha na Chapa"),
    (2002, "Costela de Cordeiro"),
    (2003, "Fraldinha Grelhada"),
    (2004, "Asinha de Frango"),
    (2005, "Linguiça Artesanal"),
    (2006, "Bife de Ancho"),
    (2007, "Maminha Assada"),
    (2008, "Espetinho Misto"),
    (2009, "Churrasco de Picanha"),
    (2010, "Tábua de Frios"),
    (2011, "Salada Caesar com Frango"),
    (2012, "Risoto de Cogumelos"),
    (2013, "Moqueca de Peixe"),
    (2014, "Feijoada Completa"),
    (2015, "Bacalhau à Brás"),
    (2016, "Camarão na Moranga"),
    (2017, "Bobó de Camarão"),
    (2018, "Pudim de Leite"),
    (2019, "Brigadeiro Gourmet"),
    (2020, "Quindim Tradicional"),
];

const TABLE_COUNT: i64 = 99;

#[derive(Debug)]
pub struct MockPosClient {
    tokens: TokenManager,
    products: Vec<Product>,
    tables: RwLock<Vec<Table>>,
}

impl MockPosClient {
    pub fn new(tokens: TokenManager) -> Self {
        let products = MOCK_PRODUCTS
            .iter()
            .map(|(id, name)| Product {
                id: *id,
                name: (*name).to_string(),
            })
            .collect();
        let tables = Self::build_tables();
        tracing::info!(
            products = MOCK_PRODUCTS.len(),
            tables = TABLE_COUNT,
            "Mock POS client initialized"
        );
        Self {
            tokens,
            products,
            tables: RwLock::new(tables),
        }
    }

    fn build_tables() -> Vec<Table> {
        let mut rng = rand::thread_rng();
        (1..=TABLE_COUNT)
            .map(|id| Table {
                id,
                name: id.to_string(),
                // occupied twice as often as closing
                status: if rng.gen_range(0..3) < 2 {
                    TableStatus::Occupied
                } else {
                    TableStatus::Closing
                },
                lock_description: None,
                inactive: false,
                free_table: true,
                initial_user: rng.gen_range(0..=20),
            })
            .collect()
    }

    async fn check_token(&self) -> AppResult<()> {
        self.tokens.ensure_token().await?;
        Ok(())
    }

    fn build_content(&self, table: &Table) -> TableDetail {
        if table.status == TableStatus::Free {
            return TableDetail {
                id: table.id,
                status: table.status,
                table_location: None,
                content: Vec::new(),
                total: 0.0,
                global_discount: 0.0,
            };
        }

        let mut rng = rand::thread_rng();
        let order_count = rng.gen_range(2..=6);
        let mut content = Vec::with_capacity(order_count);
        let mut total = 0.0;
        for _ in 0..order_count {
            let product = &self.products[rng.gen_range(0..self.products.len())];
            let quantity = rng.gen_range(1..=2) as f64;
            let price = (rng.gen_range(20.0..100.0) * 100.0_f64).round() / 100.0;
            let line_total = (quantity * price * 100.0).round() / 100.0;
            total += line_total;
            content.push(TableLineItem {
                item_id: product.id,
                item_type: rng.gen_range(0..4),
                parent_position: -1,
                quantity,
                price,
                additional_info: None,
                guid: Uuid::new_v4().to_string(),
                employee: rng.gen_range(1..=50),
                time: Utc::now().timestamp_millis(),
                line_level: 0,
                ratio: rng.gen_range(0..=1),
                total: line_total,
                line_discount: (rng.gen_range(0.0..10.0) * 100.0_f64).round() / 100.0,
                completed: rng.gen_bool(0.5),
                parent_guid: Some("00000000-0000-0000-0000-000000000000".to_string()),
                item_name: product.name.clone(),
            });
        }

        TableDetail {
            id: table.id,
            status: table.status,
            table_location: None,
            content,
            total: (total * 100.0).round() / 100.0,
            global_discount: (rng.gen_range(0.0..20.0) * 100.0_f64).round() / 100.0,
        }
    }

    async fn table_by_id(&self, table_id: i64) -> AppResult<Table> {
        if table_id < 1 || table_id > TABLE_COUNT {
            tracing::warn!(table_id, "Unknown table id requested from mock POS");
            return Err(AppError::not_found("Mesa não encontrada."));
        }
        let tables = self.tables.read().await;
        Ok(tables[(table_id - 1) as usize].clone())
    }
}

#[async_trait]
impl PosClient for MockPosClient {
    async fn fetch_tables(&self) -> AppResult<TablesPayload> {
        self.check_token().await?;
        tokio::time::sleep(MOCK_LATENCY).await;

        let tables = self.tables.read().await.clone();
        let request = format!("GETDATALIST::MobileBoardStatus::{}", Uuid::new_v4());
        let tables_json = serde_json::to_value(&tables)
            .map_err(|e| AppError::internal(format!("Serialize tables failed: {}", e)))?;
        let wire_trace = WireTrace::new(
            request,
            &tables_json,
            HashMap::from([("response_object".to_string(), tables_json.clone())]),
            None,
        );
        tracing::debug!(count = tables.len(), "Fetched mock table list");
        Ok(TablesPayload {
            tables,
            wire_trace: Some(wire_trace),
        })
    }

    async fn fetch_table_detail(
        &self,
        table_id: i64,
        include_trace: bool,
    ) -> AppResult<TableDetailPayload> {
        self.check_token().await?;
        let table = self.table_by_id(table_id).await?;
        tokio::time::sleep(MOCK_LATENCY).await;

        let detail = self.build_content(&table);
        let wire_trace = if include_trace {
            let request = format!("GETBOARDCONTENT::{}", table_id);
            let detail_json = serde_json::to_value(&detail)
                .map_err(|e| AppError::internal(format!("Serialize detail failed: {}", e)))?;
            Some(WireTrace::new(
                request,
                &detail_json,
                HashMap::from([("response_boardinfo".to_string(), detail_json.clone())]),
                None,
            ))
        } else {
            None
        };
        tracing::debug!(table_id, orders = detail.content.len(), "Fetched mock table content");
        Ok(TableDetailPayload {
            table: detail,
            wire_trace,
        })
    }

    async fn prebill(&self, table_id: i64, include_trace: bool) -> AppResult<PosActionPayload> {
        self.check_token().await?;
        let detail = self.fetch_table_detail(table_id, false).await?;
        if detail.table.content.is_empty() {
            tracing::warn!(table_id, "Prebill requested for table without orders");
            return Err(AppError::not_found("No orders found for the table."));
        }

        {
            let mut tables = self.tables.write().await;
            let table = &mut tables[(table_id - 1) as usize];
            table.status = TableStatus::Closing;
            table.free_table = false;
        }
        tokio::time::sleep(MOCK_LATENCY).await;
        tracing::info!(table_id, "Mock prebill posted");

        let result = format!("PREBILL OK::{}", table_id);
        let wire_trace = include_trace.then(|| {
            WireTrace::new(
                format!("POSTQUEUE::PREBILL::{}", table_id),
                &json!({ "result": result }),
                HashMap::new(),
                None,
            )
        });
        Ok(PosActionPayload { result, wire_trace })
    }

    async fn close_table(
        &self,
        table_id: i64,
        include_trace: bool,
    ) -> AppResult<PosActionPayload> {
        self.check_token().await?;
        self.table_by_id(table_id).await?;

        {
            let mut tables = self.tables.write().await;
            let table = &mut tables[(table_id - 1) as usize];
            table.status = TableStatus::Free;
            table.free_table = true;
        }
        tokio::time::sleep(MOCK_LATENCY).await;
        tracing::info!(table_id, "Mock table closed");

        let result = format!("TABLE CLOSED::{}", table_id);
        let wire_trace = include_trace.then(|| {
            WireTrace::new(
                format!("POSTQUEUE::CLOSE::{}", table_id),
                &json!({ "result": result }),
                HashMap::new(),
                None,
            )
        });
        Ok(PosActionPayload { result, wire_trace })
    }

    async fn load_products(&self) -> AppResult<Vec<Product>> {
        self.check_token().await?;
        // products are fixed reference data in the mock
        Ok(self.products.clone())
    }
}
