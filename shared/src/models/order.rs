//! Order Models
//!
//! Raw POS line items, the structured order produced by extraction, and
//! the consolidated comanda.

use serde::{Deserialize, Serialize};

/// Raw order line as emitted by the POS terminal
///
/// Read-only snapshot; field names follow the terminal's wire format.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableLineItem {
    pub item_id: i64,
    pub item_type: i32,
    #[serde(default = "default_parent_position")]
    pub parent_position: i32,
    pub quantity: f64,
    pub price: f64,
    #[serde(default)]
    pub additional_info: Option<String>,
    pub guid: String,
    pub employee: i64,
    /// POS epoch millis
    pub time: i64,
    #[serde(default)]
    pub line_level: i32,
    #[serde(default)]
    pub ratio: i32,
    pub total: f64,
    #[serde(default)]
    pub line_discount: f64,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub parent_guid: Option<String>,
    pub item_name: String,
}

fn default_parent_position() -> i32 {
    -1
}

/// Structured order line produced by the extraction stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLineItem {
    pub nome_prato: String,
    pub quantidade: i64,
    pub preco_unitario: f64,
}

impl OrderLineItem {
    /// Line total (quantity x unit price)
    pub fn line_total(&self) -> f64 {
        self.quantidade as f64 * self.preco_unitario
    }
}

/// Consolidated order (comanda) for one table
///
/// The aggregate fields default to zero so this type can also parse the
/// aggregate-free JSON returned by the extraction stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComandaData {
    #[serde(default)]
    pub numero_comanda: i64,
    pub pedidos: Vec<OrderLineItem>,
    #[serde(default)]
    pub valor_taxa_servico: f64,
    #[serde(default)]
    pub valor_total_bruto: f64,
}

impl ComandaData {
    /// Merge entries sharing the same dish name and unit price, summing
    /// their quantities. Same-name entries with distinct unit prices stay
    /// separate. First-seen order of groups is preserved.
    ///
    /// Unit prices are compared in whole cents so float noise from the
    /// extraction stage cannot split a group.
    pub fn consolidated(mut self) -> Self {
        let mut merged: Vec<OrderLineItem> = Vec::with_capacity(self.pedidos.len());
        for pedido in self.pedidos.drain(..) {
            let key = (pedido.nome_prato.clone(), price_cents(pedido.preco_unitario));
            match merged
                .iter_mut()
                .find(|m| m.nome_prato == key.0 && price_cents(m.preco_unitario) == key.1)
            {
                Some(existing) => existing.quantidade += pedido.quantidade,
                None => merged.push(pedido),
            }
        }
        self.pedidos = merged;
        self
    }

    /// Sum of line totals over all entries
    pub fn gross_total(&self) -> f64 {
        self.pedidos.iter().map(OrderLineItem::line_total).sum()
    }
}

fn price_cents(price: f64) -> i64 {
    (price * 100.0).round() as i64
}

/// Machine-readable echo of a canonicalized POS line
///
/// Returned alongside the generated message so callers can reconcile the
/// prose against the original numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedItem {
    pub product_name: String,
    pub quantity: f64,
    pub price: f64,
    pub total: f64,
}
