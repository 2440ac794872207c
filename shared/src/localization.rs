//! Localization formatter
//!
//! Pure mapping from a normalized language tag to display labels plus
//! currency formatting. No state.

/// Display labels for one supported language
#[derive(Debug, Clone, Copy)]
pub struct LanguageLabels {
    pub unit_label: &'static str,
    pub service_fee: &'static str,
    pub gross_total: &'static str,
    pub separator: &'static str,
    pub status_success: &'static str,
}

const PT_BR: LanguageLabels = LanguageLabels {
    unit_label: "un.",
    service_fee: "Taxa de Serviço",
    gross_total: "Total Bruto",
    separator: "\n-----------------------------------\n",
    status_success: "Mensagem processada com sucesso",
};

const EN_US: LanguageLabels = LanguageLabels {
    unit_label: "units",
    service_fee: "Service Fee",
    gross_total: "Gross Total",
    separator: "\n-----------------------------------\n",
    status_success: "Message processed successfully",
};

/// Coalesce a raw language tag onto one of the supported keys
///
/// Trims, lowercases and converts underscores to hyphens; exact matches
/// win, then `en*` / `pt*` prefixes, then the `pt-br` default.
pub fn normalize_language(language: Option<&str>) -> &'static str {
    let Some(language) = language else {
        return "pt-br";
    };
    let normalized = language.trim().to_lowercase().replace('_', "-");
    match normalized.as_str() {
        "pt-br" => "pt-br",
        "en-us" => "en-us",
        other if other.starts_with("en") => "en-us",
        _ => "pt-br",
    }
}

/// Label set for the requested language
pub fn labels(language: Option<&str>) -> LanguageLabels {
    match normalize_language(language) {
        "en-us" => EN_US,
        _ => PT_BR,
    }
}

/// Format a currency amount for the target language
///
/// Two decimal digits with thousands grouping; `pt-br` swaps the grouping
/// and decimal characters through a placeholder before prefixing `R$`.
pub fn format_currency(value: f64, language: Option<&str>) -> String {
    let mut formatted = group_thousands(value);
    if normalize_language(language) == "pt-br" {
        formatted = formatted
            .replace(',', "\u{1}")
            .replace('.', ",")
            .replace('\u{1}', ".");
    }
    format!("R$ {formatted}")
}

/// Render with 2 decimals and `,` thousands separators (en-us convention)
fn group_thousands(value: f64) -> String {
    let raw = format!("{:.2}", value);
    let (number, decimals) = raw.split_once('.').unwrap_or((raw.as_str(), "00"));
    let (sign, digits) = match number.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", number),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    format!("{sign}{grouped}.{decimals}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_aliases_and_variants() {
        assert_eq!(normalize_language(None), "pt-br");
        assert_eq!(normalize_language(Some("")), "pt-br");
        assert_eq!(normalize_language(Some("  EN_us ")), "en-us");
        assert_eq!(normalize_language(Some("en")), "en-us");
        assert_eq!(normalize_language(Some("pt")), "pt-br");
        assert_eq!(normalize_language(Some("PT_BR")), "pt-br");
        assert_eq!(normalize_language(Some("fr-fr")), "pt-br");
    }

    #[test]
    fn formats_currency_per_language() {
        assert_eq!(format_currency(1234.5, Some("pt-br")), "R$ 1.234,50");
        assert_eq!(format_currency(1234.5, Some("en-us")), "R$ 1,234.50");
    }

    #[test]
    fn formats_small_and_large_amounts() {
        assert_eq!(format_currency(0.0, Some("en-us")), "R$ 0.00");
        assert_eq!(format_currency(5.0, Some("pt-br")), "R$ 5,00");
        assert_eq!(format_currency(1234567.89, Some("en-us")), "R$ 1,234,567.89");
        assert_eq!(format_currency(1234567.89, Some("pt-br")), "R$ 1.234.567,89");
    }

    #[test]
    fn negative_amounts_keep_the_sign_outside_grouping() {
        assert_eq!(format_currency(-1234.5, Some("en-us")), "R$ -1,234.50");
    }

    #[test]
    fn labels_follow_normalization() {
        assert_eq!(labels(Some("en")).service_fee, "Service Fee");
        assert_eq!(labels(Some("pt_BR")).service_fee, "Taxa de Serviço");
        assert_eq!(labels(None).unit_label, "un.");
    }
}
