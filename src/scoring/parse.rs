//! Reading a similarity judgement out of free-form chat output.
//!
//! Two ordinary strategies are tried in order: the first JSON object in the text,
//! then the first standalone 1–3 digit integer. If neither applies the score is 0.

use regex::Regex;
use serde_json::Value;
use std::collections::BTreeSet;
use std::sync::LazyLock;

use crate::risk::RiskField;

static FIRST_SMALL_INTEGER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(\d{1,3})\b").expect("static regex is valid")
});

type ParseStrategy = fn(&str) -> Option<ChatJudgement>;

const STRATEGIES: [ParseStrategy; 2] = [from_json_object, from_first_integer];

#[derive(Debug, Clone, PartialEq, Default)]
/// Judgement as reported by the chat backend, before any penalties.
pub struct ChatJudgement {
    /// Raw score; not yet clamped.
    pub score: f32,
    pub matched_fields: BTreeSet<RiskField>,
    pub reasoning: Option<String>,
}

/// Parses `text` with each strategy in turn; score 0 if none applies.
pub fn parse_judgement(text: &str) -> ChatJudgement {
    STRATEGIES
        .iter()
        .find_map(|strategy| strategy(text))
        .unwrap_or_default()
}

/// First `{...}` in `text` that parses as a JSON object carrying a numeric `score`.
pub fn from_json_object(text: &str) -> Option<ChatJudgement> {
    text.match_indices('{').find_map(|(start, _)| {
        let mut stream = serde_json::Deserializer::from_str(&text[start..]).into_iter::<Value>();
        match stream.next() {
            Some(Ok(Value::Object(object))) => judgement_from_object(&object),
            _ => None,
        }
    })
}

/// First standalone integer of one to three digits anywhere in `text`.
pub fn from_first_integer(text: &str) -> Option<ChatJudgement> {
    let captures = FIRST_SMALL_INTEGER.captures(text)?;
    let score: f32 = captures.get(1)?.as_str().parse().ok()?;

    Some(ChatJudgement {
        score,
        ..Default::default()
    })
}

fn judgement_from_object(object: &serde_json::Map<String, Value>) -> Option<ChatJudgement> {
    let score = match object.get("score")? {
        Value::Number(number) => number.as_f64()? as f32,
        Value::String(raw) => raw.trim().parse().ok()?,
        _ => return None,
    };

    let matched_fields = object
        .get("matchedFields")
        .or_else(|| object.get("matched_fields"))
        .and_then(|v| v.as_array())
        .map(|fields| {
            fields
                .iter()
                .filter_map(|field| field.as_str())
                .filter_map(RiskField::parse)
                .collect()
        })
        .unwrap_or_default();

    let reasoning = object
        .get("reasoning")
        .and_then(|v| v.as_str())
        .map(str::to_string);

    Some(ChatJudgement {
        score,
        matched_fields,
        reasoning,
    })
}
