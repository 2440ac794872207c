//! Customer-facing message rendering
//!
//! Turns a consolidated comanda into the display text: one block per
//! item, the language separator, then the fee/total summary.

use shared::ComandaData;
use shared::localization::{format_currency, labels};

pub struct MessageBuilder<'a> {
    order: &'a ComandaData,
    language: &'a str,
}

impl<'a> MessageBuilder<'a> {
    pub fn new(order: &'a ComandaData, language: &'a str) -> Self {
        Self { order, language }
    }

    /// Assemble the pre-enhancement message text
    pub fn build(&self) -> String {
        let language = Some(self.language);
        let labels = labels(language);
        let mut parts: Vec<String> = Vec::with_capacity(self.order.pedidos.len() + 2);

        for pedido in &self.order.pedidos {
            parts.push(format!(
                "🍽 {}\n{} {} x {} = {}",
                pedido.nome_prato,
                pedido.quantidade,
                labels.unit_label,
                format_currency(pedido.preco_unitario, language),
                format_currency(pedido.line_total(), language),
            ));
        }

        parts.push(labels.separator.to_string());
        parts.push(format!(
            "✨ {}: {}\n💳 {}: {}\n",
            labels.service_fee,
            format_currency(self.order.valor_taxa_servico, language),
            labels.gross_total,
            format_currency(self.order.valor_total_bruto, language),
        ));

        parts.join("\n\n")
    }
}

#[cfg(test)]
mod tests {
    use shared::OrderLineItem;

    use super::*;

    fn comanda() -> ComandaData {
        ComandaData {
            numero_comanda: 12,
            pedidos: vec![
                OrderLineItem {
                    nome_prato: "Pizza".to_string(),
                    quantidade: 3,
                    preco_unitario: 10.0,
                },
                OrderLineItem {
                    nome_prato: "Suco".to_string(),
                    quantidade: 1,
                    preco_unitario: 1234.5,
                },
            ],
            valor_taxa_servico: 126.45,
            valor_total_bruto: 1264.5,
        }
    }

    #[test]
    fn renders_localized_blocks_pt_br() {
        let order = comanda();
        let message = MessageBuilder::new(&order, "pt-br").build();
        assert!(message.contains("🍽 Pizza\n3 un. x R$ 10,00 = R$ 30,00"));
        assert!(message.contains("🍽 Suco\n1 un. x R$ 1.234,50 = R$ 1.234,50"));
        assert!(message.contains("✨ Taxa de Serviço: R$ 126,45"));
        assert!(message.contains("💳 Total Bruto: R$ 1.264,50"));
        assert!(message.contains("-----------------------------------"));
    }

    #[test]
    fn renders_localized_blocks_en_us() {
        let order = comanda();
        let message = MessageBuilder::new(&order, "en-us").build();
        assert!(message.contains("🍽 Suco\n1 units x R$ 1,234.50 = R$ 1,234.50"));
        assert!(message.contains("✨ Service Fee: R$ 126.45"));
    }
}
