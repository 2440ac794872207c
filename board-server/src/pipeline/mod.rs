//! Order consolidation pipeline
//!
//! Four strictly sequential stages per build-message request:
//!
//! 1. canonicalize raw POS line items into order text
//! 2. extract a structured comanda via the text-generation backend
//! 3. consolidate duplicate items (deterministic group-by name+price)
//! 4. render the localized message, enhance it, persist it
//!
//! No stage is retried; any failure aborts the remaining stages and the
//! request surfaces the typed error. There is no partial result.

mod message;
mod prompts;

pub use message::MessageBuilder;

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use shared::localization::labels;
use shared::{ComandaData, ProcessedItem, TableLineItem};

use crate::services::ChatBackend;
use crate::utils::{AppError, AppResult};

/// Service fee applied over the gross total
const SERVICE_FEE_RATE: f64 = 0.10;

/// Pipeline progress marker, used for log and error context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Received,
    Canonicalized,
    Extracted,
    Consolidated,
    Enhanced,
    Persisted,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Received => "received",
            Stage::Canonicalized => "canonicalized",
            Stage::Extracted => "extracted",
            Stage::Consolidated => "consolidated",
            Stage::Enhanced => "enhanced",
            Stage::Persisted => "persisted",
        };
        f.write_str(name)
    }
}

/// Final build-message response
#[derive(Debug, Clone, Serialize)]
pub struct BoardMessage {
    pub status: String,
    pub message: String,
    pub details: MessageDetails,
}

/// Machine-readable companion to the generated prose
#[derive(Debug, Clone, Serialize)]
pub struct MessageDetails {
    pub numero_comanda: i64,
    pub valor_taxa_servico: f64,
    pub valor_total_bruto: f64,
    /// Stage-1 items, not the consolidated ones, for traceability
    pub orders: Vec<ProcessedItem>,
}

/// One pipeline run per inbound build-message request
#[derive(Debug, Clone)]
pub struct OrderPipeline {
    chat: Arc<dyn ChatBackend>,
    language: String,
}

impl OrderPipeline {
    pub fn new(chat: Arc<dyn ChatBackend>, language: impl Into<String>) -> Self {
        Self {
            chat,
            language: language.into(),
        }
    }

    /// Run all four stages and persist the final message to `output_path`
    pub async fn run(
        &self,
        table_id: i64,
        items: &[TableLineItem],
        output_path: &Path,
    ) -> AppResult<BoardMessage> {
        tracing::debug!(table_id, stage = %Stage::Received, items = items.len(), "Pipeline started");

        let (canonical, processed_items) = canonicalize(items);
        tracing::debug!(table_id, stage = %Stage::Canonicalized, "Order text canonicalized");

        let mut comanda = self.extract(&canonical).await?;
        if comanda.numero_comanda == 0 {
            comanda.numero_comanda = table_id;
        }
        tracing::debug!(table_id, stage = %Stage::Extracted, pedidos = comanda.pedidos.len(), "Structured order extracted");

        let mut comanda = comanda.consolidated();
        comanda.valor_total_bruto = round_cents(comanda.gross_total());
        comanda.valor_taxa_servico = round_cents(comanda.valor_total_bruto * SERVICE_FEE_RATE);
        tracing::debug!(table_id, stage = %Stage::Consolidated, pedidos = comanda.pedidos.len(), "Order consolidated");

        let message = MessageBuilder::new(&comanda, &self.language).build();
        let enhanced = self.enhance(&message).await?;
        tracing::debug!(table_id, stage = %Stage::Enhanced, "Message enhanced");

        tokio::fs::write(output_path, &enhanced).await?;
        tracing::info!(table_id, stage = %Stage::Persisted, path = %output_path.display(), "Message persisted");

        Ok(BoardMessage {
            status: labels(Some(&self.language)).status_success.to_string(),
            message: enhanced,
            details: MessageDetails {
                numero_comanda: comanda.numero_comanda,
                valor_taxa_servico: comanda.valor_taxa_servico,
                valor_total_bruto: comanda.valor_total_bruto,
                orders: processed_items,
            },
        })
    }

    /// Stage 2: canonical text to structured comanda
    async fn extract(&self, canonical: &str) -> AppResult<ComandaData> {
        let prompt = prompts::order_process(&self.language, canonical);
        let reply = self.chat.complete(&prompt).await?;
        parse_comanda(&reply)
    }

    /// Stage 4b: emoji/decimal-separator substitution
    async fn enhance(&self, message: &str) -> AppResult<String> {
        let prompt = prompts::message_enhancer(&self.language, message);
        self.chat.complete(&prompt).await
    }
}

/// Stage 1: render each raw line as `NAME - QTY X R$ UNIT = R$ TOTAL`,
/// keeping the numeric fields alongside for the final response
pub fn canonicalize(items: &[TableLineItem]) -> (String, Vec<ProcessedItem>) {
    let mut lines = Vec::with_capacity(items.len());
    let mut processed = Vec::with_capacity(items.len());
    for item in items {
        lines.push(format!(
            "{} - {} X R$ {:.2} = R$ {:.2}",
            item.item_name,
            format_quantity(item.quantity),
            item.price,
            item.total,
        ));
        processed.push(ProcessedItem {
            product_name: item.item_name.clone(),
            quantity: item.quantity,
            price: item.price,
            total: item.total,
        });
    }
    (lines.join("\n"), processed)
}

/// Integral quantities render without a decimal part
fn format_quantity(quantity: f64) -> String {
    if quantity.fract().abs() < f64::EPSILON {
        format!("{}", quantity as i64)
    } else {
        format!("{}", quantity)
    }
}

/// Parse the completion into `ComandaData`, tolerating code fences or
/// prose around the outermost JSON object
fn parse_comanda(reply: &str) -> AppResult<ComandaData> {
    let start = reply.find('{');
    let end = reply.rfind('}');
    let json = match (start, end) {
        (Some(start), Some(end)) if start < end => &reply[start..=end],
        _ => {
            return Err(AppError::upstream(
                "Extraction returned no JSON object".to_string(),
            ));
        }
    };
    serde_json::from_str(json)
        .map_err(|e| AppError::upstream(format!("Extraction returned malformed JSON: {}", e)))
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;

    /// Chat stub replaying a fixed sequence of completions
    #[derive(Debug, Default)]
    struct ScriptedChat {
        replies: Mutex<VecDeque<String>>,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedChat {
        fn new(replies: &[&str]) -> Self {
            Self {
                replies: Mutex::new(replies.iter().map(|r| r.to_string()).collect()),
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ChatBackend for ScriptedChat {
        async fn complete(&self, prompt: &str) -> AppResult<String> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .ok_or_else(|| AppError::upstream("No scripted reply left"))
        }
    }

    fn line_item(name: &str, quantity: f64, price: f64, total: f64) -> TableLineItem {
        TableLineItem {
            item_id: 1,
            item_type: 0,
            parent_position: -1,
            quantity,
            price,
            additional_info: None,
            guid: "guid".to_string(),
            employee: 1,
            time: 0,
            line_level: 0,
            ratio: 0,
            total,
            line_discount: 0.0,
            completed: false,
            parent_guid: None,
            item_name: name.to_string(),
        }
    }

    #[test]
    fn canonicalizes_lines_and_keeps_processed_items() {
        let items = vec![
            line_item("Coke", 2.0, 5.0, 10.0),
            line_item("Meia Pizza", 0.5, 40.0, 20.0),
        ];
        let (canonical, processed) = canonicalize(&items);
        assert_eq!(
            canonical,
            "Coke - 2 X R$ 5.00 = R$ 10.00\nMeia Pizza - 0.5 X R$ 40.00 = R$ 20.00"
        );
        assert_eq!(
            processed[0],
            ProcessedItem {
                product_name: "Coke".to_string(),
                quantity: 2.0,
                price: 5.0,
                total: 10.0
            }
        );
    }

    #[test]
    fn parses_fenced_json_replies() {
        let reply = "```json\n{\"numero_comanda\": 4, \"pedidos\": []}\n```";
        let comanda = parse_comanda(reply).unwrap();
        assert_eq!(comanda.numero_comanda, 4);
    }

    #[test]
    fn malformed_reply_is_an_upstream_error() {
        assert!(matches!(
            parse_comanda("no json here"),
            Err(AppError::Upstream(_))
        ));
        assert!(matches!(
            parse_comanda("{\"pedidos\": \"oops\"}"),
            Err(AppError::Upstream(_))
        ));
    }

    #[tokio::test]
    async fn full_run_extracts_consolidates_and_persists() {
        let chat = Arc::new(ScriptedChat::new(&[
            r#"{"numero_comanda": 0, "pedidos": [
                {"nome_prato": "Coke", "quantidade": 1, "preco_unitario": 5.0},
                {"nome_prato": "Coke", "quantidade": 1, "preco_unitario": 5.0}
            ]}"#,
            "✨ enhanced message ✨",
        ]));
        let pipeline = OrderPipeline::new(chat.clone(), "pt-br");

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("comanda_7.txt");
        let items = vec![line_item("Coke", 2.0, 5.0, 10.0)];

        let result = pipeline.run(7, &items, &path).await.unwrap();

        assert_eq!(result.status, "Mensagem processada com sucesso");
        assert_eq!(result.message, "✨ enhanced message ✨");
        assert_eq!(result.details.numero_comanda, 7);
        assert_eq!(result.details.valor_total_bruto, 10.0);
        assert_eq!(result.details.valor_taxa_servico, 1.0);
        assert_eq!(result.details.orders.len(), 1);
        assert_eq!(result.details.orders[0].product_name, "Coke");

        let persisted = std::fs::read_to_string(&path).unwrap();
        assert_eq!(persisted, "✨ enhanced message ✨");

        // stage 2 saw the canonical line, stage 4 the consolidated message
        let prompts = chat.prompts.lock().unwrap();
        assert!(prompts[0].contains("Coke - 2 X R$ 5.00 = R$ 10.00"));
        assert!(prompts[1].contains("🍽 Coke\n2 un. x R$ 5,00 = R$ 10,00"));
    }

    #[tokio::test]
    async fn extraction_failure_aborts_before_persistence() {
        let chat = Arc::new(ScriptedChat::new(&["not json at all"]));
        let pipeline = OrderPipeline::new(chat, "pt-br");

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("comanda_9.txt");
        let items = vec![line_item("Coke", 1.0, 5.0, 5.0)];

        let err = pipeline.run(9, &items, &path).await.unwrap_err();
        assert!(matches!(err, AppError::Upstream(_)));
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn enhancement_failure_aborts_the_request() {
        let chat = Arc::new(ScriptedChat::new(&[
            r#"{"pedidos": [{"nome_prato": "Coke", "quantidade": 1, "preco_unitario": 5.0}]}"#,
        ]));
        let pipeline = OrderPipeline::new(chat, "pt-br");

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("comanda_3.txt");
        let items = vec![line_item("Coke", 1.0, 5.0, 5.0)];

        let err = pipeline.run(3, &items, &path).await.unwrap_err();
        assert!(matches!(err, AppError::Upstream(_)));
        assert!(!path.exists());
    }
}
