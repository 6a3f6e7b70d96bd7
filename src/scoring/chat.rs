use tracing::{debug, warn};

use super::lexical::jaccard_similarity;
use super::parse::parse_judgement;
use super::types::{PairScore, ScoringStrategy, clamp_score};
use crate::inference::{ChatBackend, ChatMessage};
use crate::risk::{RiskField, RiskText};
use crate::text::{canonical_field, labeled_risk};

pub const EXACT_MATCH_SCORE: f32 = 100.0;

pub const TITLE_AND_BODY_MATCH_SCORE: f32 = 95.0;
pub const TITLE_AND_PARTIAL_BODY_SCORE: f32 = 85.0;
pub const TITLE_ONLY_SCORE: f32 = 70.0;

const STRONG_LEXICAL_OVERLAP: f32 = 0.8;
const PARTIAL_LEXICAL_OVERLAP: f32 = 0.7;

pub const INCOMPLETE_RISK_PENALTY: f32 = 15.0;

pub const GENERIC_TITLE_PENALTY: f32 = 10.0;
/// The generic-title penalty only applies above this score...
pub const GENERIC_TITLE_PENALTY_ABOVE: f32 = 70.0;
/// ...and never pushes a score below this one.
pub const GENERIC_TITLE_FLOOR: f32 = 50.0;

const GENERIC_TITLE_MAX_TOKENS: usize = 3;
const GENERIC_TITLE_TERMS: [&str; 6] = [
    "risk",
    "security",
    "threat",
    "vulnerability",
    "breach",
    "attack",
];

const SYSTEM_PROMPT: &str = "You are a security risk analyst reviewing a risk register for duplicate entries. \
You compare two risks and judge whether they describe the same specific threat scenario. \
You answer with strict JSON only.";

/// Pairwise scorer for one-off duplicate checks outside the batch path.
///
/// Cheap deterministic rules run first; the chat backend is consulted only when
/// titles differ. Never fails: the worst case is score 0 with no matched fields.
#[derive(Debug, Clone)]
pub struct ChatFallbackScorer<C> {
    backend: C,
}

impl<C: ChatBackend> ChatFallbackScorer<C> {
    pub fn new(backend: C) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &C {
        &self.backend
    }

    /// Scores how much `a` and `b` describe the same risk.
    pub async fn score_chat(&self, a: &RiskText, b: &RiskText) -> PairScore {
        if let Some(result) = deterministic_score(a, b) {
            debug!(
                strategy = %result.strategy,
                score = result.score,
                "Pair scored without chat backend"
            );
            return result;
        }

        self.semantic_score(a, b).await
    }

    async fn semantic_score(&self, a: &RiskText, b: &RiskText) -> PairScore {
        let incomplete = !a.is_complete() || !b.is_complete();
        let messages = build_messages(a, b);

        let reply = match self.backend.chat(&messages).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(error = %e, "Chat backend unavailable, scoring pair as 0");
                return PairScore::zero(ScoringStrategy::Semantic);
            }
        };

        let judgement = parse_judgement(&reply);
        let raw = clamp_score(judgement.score.round());
        let score = apply_penalties(raw, incomplete, has_generic_title(a) || has_generic_title(b));

        debug!(
            raw_score = raw,
            score = score,
            incomplete = incomplete,
            reasoning = judgement.reasoning.as_deref().unwrap_or(""),
            "Pair scored by chat backend"
        );

        PairScore::new(score, judgement.matched_fields, ScoringStrategy::Semantic)
    }
}

/// Rules that settle a pair without the chat backend, tried in order.
pub fn deterministic_score(a: &RiskText, b: &RiskText) -> Option<PairScore> {
    exact_match(a, b).or_else(|| title_identical(a, b))
}

/// All three fields identical (trimmed, case-insensitive) with a non-empty title.
pub fn exact_match(a: &RiskText, b: &RiskText) -> Option<PairScore> {
    if canonical_field(&a.title).is_empty() {
        return None;
    }

    let identical = RiskField::ALL
        .into_iter()
        .all(|field| canonical_field(a.field(field)) == canonical_field(b.field(field)));

    identical.then(|| {
        PairScore::new(
            EXACT_MATCH_SCORE,
            a.present_fields(),
            ScoringStrategy::ExactMatch,
        )
    })
}

/// Same non-empty title; bodies compared by token-set overlap.
pub fn title_identical(a: &RiskText, b: &RiskText) -> Option<PairScore> {
    let title = canonical_field(&a.title);
    if title.is_empty() || title != canonical_field(&b.title) {
        return None;
    }

    let description_overlap = jaccard_similarity(a.description(), b.description());
    let threat_overlap = jaccard_similarity(a.threat(), b.threat());

    let result = if description_overlap > STRONG_LEXICAL_OVERLAP
        && threat_overlap > STRONG_LEXICAL_OVERLAP
    {
        PairScore::new(
            TITLE_AND_BODY_MATCH_SCORE,
            RiskField::ALL,
            ScoringStrategy::TitleIdentical,
        )
    } else if description_overlap > PARTIAL_LEXICAL_OVERLAP
        || threat_overlap > PARTIAL_LEXICAL_OVERLAP
    {
        PairScore::new(
            TITLE_AND_PARTIAL_BODY_SCORE,
            [RiskField::Title],
            ScoringStrategy::TitleIdentical,
        )
    } else {
        PairScore::new(
            TITLE_ONLY_SCORE,
            [RiskField::Title],
            ScoringStrategy::TitleIdentical,
        )
    };

    Some(result)
}

/// A short title made of a generic security word says little about the scenario.
pub fn has_generic_title(risk: &RiskText) -> bool {
    let title = risk.title.trim().to_lowercase();
    if title.is_empty() || title.split_whitespace().count() > GENERIC_TITLE_MAX_TOKENS {
        return false;
    }
    GENERIC_TITLE_TERMS.iter().any(|term| title.contains(term))
}

/// Completeness penalty, then generic-title penalty, on an already clamped score.
pub fn apply_penalties(score: f32, incomplete: bool, generic_title: bool) -> f32 {
    let mut score = score;

    if incomplete {
        score = (score - INCOMPLETE_RISK_PENALTY).max(0.0);
    }

    if generic_title && score > GENERIC_TITLE_PENALTY_ABOVE {
        score = (score - GENERIC_TITLE_PENALTY).max(GENERIC_TITLE_FLOOR);
    }

    clamp_score(score)
}

/// System and user messages asking the backend for a JSON judgement.
pub fn build_messages(a: &RiskText, b: &RiskText) -> Vec<ChatMessage> {
    let prompt = format!(
        "Rate from 0 to 100 how much these two risks describe the SAME specific threat scenario.

Risk A: {risk_a}
Risk B: {risk_b}

Scoring guidance:
- 90-100: identical scenario, only the wording differs
- 80-89: same threat with a minor variation (different asset, slightly different vector)
- 70-79: related, but a different aspect of the threat
- 50-69: same category, different threat
- 30-49: both are security risks but otherwise unrelated
- 0-29: unrelated

Do not reward shared generic words such as \"risk\", \"security\" or \"breach\". \
Judge the concrete scenario.

Respond with JSON only, in exactly this shape:
{{\"score\": <integer 0-100>, \"matchedFields\": [<any of \"title\", \"threatDescription\", \"description\">], \"reasoning\": \"<one sentence>\"}}",
        risk_a = labeled_risk(a),
        risk_b = labeled_risk(b),
    );

    vec![ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(prompt)]
}
