//! Prompt templates for the text-generation stages
//!
//! Instructions are language-keyed; unknown tags fall back to pt-br like
//! the rest of the localization layer.

use shared::localization::normalize_language;

const COMANDA_TEMPLATE: &str =
    r#"{"numero_comanda": "Int", "pedidos": [{"nome_prato": "String", "quantidade": "Int", "preco_unitario": "Float"}]}"#;

const PEDIDO_TEMPLATE: &str =
    r#"{"nome_prato": "String", "quantidade": "Int", "preco_unitario": "Float"}"#;

/// Extraction instruction: canonical order text in, `ComandaData` JSON out
pub fn order_process(language: &str, comanda: &str) -> String {
    match normalize_language(Some(language)) {
        "en-us" => format!(
            "\nRespond using JSON only.\n\
             Fill the following JSON example:\n{COMANDA_TEMPLATE}\n\n\
             Split the items using the template: {PEDIDO_TEMPLATE}\n\
             Each order line follows ITEM_NAME'x' QUANTITY UNIT_PRICE = LINE_TOTAL.\n\
             If UNIT_PRICE is missing, divide LINE_TOTAL by QUANTITY.\n\n\
             {comanda}\n"
        ),
        _ => format!(
            "\nResponda somente em JSON.\n\
             Preencha o seguinte JSON exemplo:\n{COMANDA_TEMPLATE}\n\n\
             Separe os itens seguindo o template: {PEDIDO_TEMPLATE}\n\
             O pedido estará no formato NOME_ITEM'x' QUANTIDADE PRECO_UNITARIO = PRECO_TOTAL_ITEM\n\
             Caso não haja PRECO_UNITARIO, divida o PRECO_TOTAL_ITEM pela QUANTIDADE.\n\n\
             {comanda}\n"
        ),
    }
}

/// Enhancement instruction: emoji substitution and decimal-separator
/// normalization only; names, quantities and totals must pass through
/// untouched
pub fn message_enhancer(language: &str, message: &str) -> String {
    match normalize_language(Some(language)) {
        "en-us" => format!(
            "\nChange the emojis for each dish, using custom emojis that match the meal.\n\
             Return only the message text with the updated emojis and use decimal points.\n\n\
             {message}\n"
        ),
        _ => format!(
            "\nAltere os emojis de cada prato, adicionando emojis personalizados para cada prato.\n\
             Me retorne apenas o texto da mensagem com os emojis alterados, e as casas decimais utilizando virgula.\n\n\
             {message}\n"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extraction_prompt_embeds_the_order_text() {
        let prompt = order_process("pt-br", "Coke - 2 X R$ 5.00 = R$ 10.00");
        assert!(prompt.contains("Responda somente em JSON."));
        assert!(prompt.contains("Coke - 2 X R$ 5.00 = R$ 10.00"));
        assert!(prompt.contains("numero_comanda"));
    }

    #[test]
    fn unknown_language_falls_back_to_pt_br() {
        assert!(message_enhancer("fr-fr", "msg").contains("Altere os emojis"));
        assert!(message_enhancer("en", "msg").contains("Change the emojis"));
    }
}
