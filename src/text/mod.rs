//! Canonical text forms of a risk.
//!
//! Two forms are produced and they feed different consumers:
//!
//! - [`normalize`]: lower-cased fields joined by blank lines, truncated to a maximum
//!   character count. This is what gets embedded, on both the write path and the query path.
//! - [`labeled_text`]: `Title: … Threat: … Description: …` with original casing. This is
//!   the literal text shown to the chat backend.
//!
//! An empty normalized string means "not comparable"; callers skip embedding it.


use crate::risk::RiskText;

const FIELD_SEPARATOR: &str = "\n\n";

/// Normalizes the three fields of a risk into one embedding-ready string.
///
/// Fields are trimmed and lower-cased independently, empty fields are skipped,
/// and the result is cut to at most `max_chars` characters.
pub fn normalize(
    title: &str,
    threat_description: Option<&str>,
    description: Option<&str>,
    max_chars: usize,
) -> String {
    let joined = [Some(title), threat_description, description]
        .into_iter()
        .flatten()
        .map(|field| field.trim().to_lowercase())
        .filter(|field| !field.is_empty())
        .collect::<Vec<_>>()
        .join(FIELD_SEPARATOR);

    truncate_chars(joined, max_chars)
}

/// [`normalize`] over a [`RiskText`].
pub fn normalize_risk(risk: &RiskText, max_chars: usize) -> String {
    normalize(
        &risk.title,
        risk.threat_description.as_deref(),
        risk.description.as_deref(),
        max_chars,
    )
}

/// Labels each non-empty field and joins them with spaces.
pub fn labeled_text(
    title: &str,
    threat_description: Option<&str>,
    description: Option<&str>,
) -> String {
    [
        ("Title", Some(title)),
        ("Threat", threat_description),
        ("Description", description),
    ]
    .into_iter()
    .filter_map(|(label, value)| {
        let value = value?.trim();
        (!value.is_empty()).then(|| format!("{label}: {value}"))
    })
    .collect::<Vec<_>>()
    .join(" ")
}

/// [`labeled_text`] over a [`RiskText`].
pub fn labeled_risk(risk: &RiskText) -> String {
    labeled_text(
        &risk.title,
        risk.threat_description.as_deref(),
        risk.description.as_deref(),
    )
}

/// Prefix truncation by character count (never splits a code point).
pub fn truncate_chars(mut text: String, max_chars: usize) -> String {
    if let Some((byte_idx, _)) = text.char_indices().nth(max_chars) {
        text.truncate(byte_idx);
    }
    text
}

/// Trimmed, lower-cased form used for equality checks between fields.
pub fn canonical_field(value: &str) -> String {
    value.trim().to_lowercase()
}
