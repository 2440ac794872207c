//! HTTP POS client
//!
//! Thin JSON client against the POS bridge service. The bridge owns the
//! terminal wire protocol; this side only maps transport/status failures
//! onto the application error taxonomy.

use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use shared::Product;

use super::{PosActionPayload, PosClient, TableDetailPayload, TablesPayload, TokenManager};
use crate::utils::{AppError, AppResult};

#[derive(Debug, Clone)]
pub struct HttpPosClient {
    base_url: String,
    tokens: TokenManager,
    http: reqwest::Client,
}

impl HttpPosClient {
    pub fn new(base_url: impl Into<String>, tokens: TokenManager) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            tokens,
            http: reqwest::Client::new(),
        }
    }

    async fn request<T: DeserializeOwned>(&self, method: Method, path: &str) -> AppResult<T> {
        let token = self.tokens.ensure_token().await?;
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .http
            .request(method, &url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| AppError::upstream(format!("POS bridge request failed: {}", e)))?;

        match response.status() {
            StatusCode::UNAUTHORIZED => Err(AppError::TokenExpired),
            StatusCode::NOT_FOUND => Err(AppError::not_found("Mesa não encontrada.")),
            status if status.is_success() => response.json::<T>().await.map_err(|e| {
                AppError::upstream(format!("Malformed POS bridge response: {}", e))
            }),
            status => {
                tracing::error!(%status, url = %url, "POS bridge returned an error status");
                Err(AppError::upstream(format!("POS bridge returned {}", status)))
            }
        }
    }
}

#[async_trait]
impl PosClient for HttpPosClient {
    async fn fetch_tables(&self) -> AppResult<TablesPayload> {
        self.request(Method::GET, "/tables?include_trace=true").await
    }

    async fn fetch_table_detail(
        &self,
        table_id: i64,
        include_trace: bool,
    ) -> AppResult<TableDetailPayload> {
        self.request(
            Method::GET,
            &format!("/tables/{}?include_trace={}", table_id, include_trace),
        )
        .await
    }

    async fn prebill(&self, table_id: i64, include_trace: bool) -> AppResult<PosActionPayload> {
        self.request(
            Method::POST,
            &format!("/tables/{}/prebill?include_trace={}", table_id, include_trace),
        )
        .await
    }

    async fn close_table(
        &self,
        table_id: i64,
        include_trace: bool,
    ) -> AppResult<PosActionPayload> {
        self.request(
            Method::POST,
            &format!("/tables/{}/close?include_trace={}", table_id, include_trace),
        )
        .await
    }

    async fn load_products(&self) -> AppResult<Vec<Product>> {
        self.request(Method::POST, "/load/products").await
    }
}
