//! Text cleanup helpers shared by the extraction code.

/// Normalize scraped text: NBSP becomes a regular space, en/em dashes
/// become hyphens, whitespace runs collapse to a single space, and the
/// result is trimmed. Idempotent.
pub fn normalize_text(s: &str) -> String {
    let replaced = s.replace('\u{a0}', " ").replace(['–', '—'], "-");
    replaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Parse a listing price out of its display text, e.g. "1.200 €" -> 1200.
///
/// Takes the first run of digits optionally interleaved with '.' and
/// spaces, strips the separators, and parses the rest as base-10.
/// Returns 0 when no digits are found or the parse fails.
///
/// '.' is always treated as a thousands separator, never a decimal
/// point: "450.50" parses to 45050. Listing prices on the site are
/// whole euro amounts, so decimals do not occur in practice.
pub fn parse_price(text: &str) -> i64 {
    let text = text.replace('\u{a0}', " ");
    let Some(start) = text.find(|c: char| c.is_ascii_digit()) else {
        return 0;
    };
    let run: String = text[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.' || *c == ' ')
        .filter(|c| c.is_ascii_digit())
        .collect();
    run.parse().unwrap_or(0)
}
