//! Parsing of product private notes.
//!
//! Merchants repurpose the free-text note field to encode sourcing metadata in a pipe-delimited
//! mini-format, e.g. `Price: 950 UAH | Supplier: Acme (acme_ua) | Art: X-204`. Labels appear in
//! English or Russian. Anything that is not a recognised label is treated as supplier text.

/// Rendered when a note yields no supplier information.
pub const UNKNOWN_SUPPLIER: &str = "Неизвестный поставщик";
/// Rendered when a note yields no purchase price.
pub const PRICE_NOT_SPECIFIED: &str = "Цена не указана";
/// Rendered when neither the note nor the line item provides an article code.
pub const MODEL_NOT_FOUND: &str = "Артикул не найден";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedNote {
    pub purchase_price: Option<String>,
    pub model: Option<String>,
    /// Supplier segments, joined back with `" | "`. Empty when the note had none.
    pub supplier: String,
}

/// Parse a private note into its structured fields. Pure and infallible: malformed or empty
/// input degrades to an empty record.
pub fn parse_private_note(note: &str) -> ParsedNote {
    let mut parsed = ParsedNote::default();
    if note.trim().is_empty() {
        return parsed;
    }
    let mut supplier_parts: Vec<String> = Vec::new();
    for part in note.split('|').map(str::trim) {
        let lower = part.to_lowercase();
        if lower.starts_with("price:") || lower.starts_with("цена:") {
            parsed.purchase_price = Some(value_after_label(part));
        } else if lower.starts_with("art:") || lower.starts_with("арт:") {
            parsed.model = Some(value_after_label(part));
        } else {
            // Unlabeled segments are supplier info by default.
            let clean = if lower.starts_with("supplier:") || lower.starts_with("поставщик:") {
                value_after_label(part)
            } else {
                part.to_string()
            };
            if !clean.is_empty() {
                supplier_parts.push(clean);
            }
        }
    }
    parsed.supplier = supplier_parts.join(" | ");
    parsed
}

fn value_after_label(part: &str) -> String {
    part.split_once(':').map(|(_, value)| value.trim().to_string()).unwrap_or_default()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn fully_labelled_note() {
        let parsed = parse_private_note("Price: 100 | Supplier: Acme | Art: X1");
        assert_eq!(parsed.purchase_price.as_deref(), Some("100"));
        assert_eq!(parsed.supplier, "Acme");
        assert_eq!(parsed.model.as_deref(), Some("X1"));
    }

    #[test]
    fn unlabeled_segment_goes_to_supplier() {
        let parsed = parse_private_note("Acme Corp | Price: 100");
        assert_eq!(parsed.supplier, "Acme Corp");
        assert_eq!(parsed.purchase_price.as_deref(), Some("100"));
        assert!(parsed.model.is_none());
    }

    #[test]
    fn multiple_unlabeled_segments_concatenate_in_order() {
        let parsed = parse_private_note("Acme | second floor, box 12 | Art: B-7");
        assert_eq!(parsed.supplier, "Acme | second floor, box 12");
        assert_eq!(parsed.model.as_deref(), Some("B-7"));
    }

    #[test]
    fn russian_labels_match_case_insensitively() {
        let parsed = parse_private_note("ЦЕНА: 950 грн | Поставщик: Ромашка (roma_ua) | АРТ: К-204");
        assert_eq!(parsed.purchase_price.as_deref(), Some("950 грн"));
        assert_eq!(parsed.supplier, "Ромашка (roma_ua)");
        assert_eq!(parsed.model.as_deref(), Some("К-204"));
    }

    #[test]
    fn empty_note_yields_empty_record() {
        assert_eq!(parse_private_note(""), ParsedNote::default());
        assert_eq!(parse_private_note("   "), ParsedNote::default());
    }

    #[test]
    fn parsing_is_deterministic() {
        let note = "Price: 100 | Supplier: Acme | Art: X1";
        assert_eq!(parse_private_note(note), parse_private_note(note));
    }

    #[test]
    fn value_keeps_colons_after_the_first() {
        let parsed = parse_private_note("Supplier: Acme: east warehouse");
        assert_eq!(parsed.supplier, "Acme: east warehouse");
    }
}
