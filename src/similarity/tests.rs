use super::*;
use crate::config::Config;
use crate::inference::MockEmbeddingBackend;
use crate::risk::{DraftRisk, MockRiskRepository, RiskField, RiskId, RiskRecord, RiskText};

/// Unit vector at the given cosine to `[1, 0]`.
fn at_cosine(cosine: f32) -> Vec<f32> {
    vec![cosine, (1.0 - cosine * cosine).sqrt()]
}

fn stored(id: &str, title: &str, cosine: f32) -> RiskRecord {
    RiskRecord::new(id, RiskText::new(title)).with_embedding(at_cosine(cosine))
}

fn service(
    risks: Vec<RiskRecord>,
    backend: MockEmbeddingBackend,
) -> SimilarityService<MockRiskRepository, MockEmbeddingBackend> {
    SimilarityService::new(
        MockRiskRepository::with_risks(risks),
        backend,
        Config::default(),
    )
}

fn ids(results: &[SimilarRiskResult]) -> Vec<&str> {
    results.iter().map(|r| r.risk.id.as_str()).collect()
}

#[tokio::test]
async fn test_existing_risk_not_found() {
    let service = service(vec![], MockEmbeddingBackend::with_fallback(vec![1.0, 0.0]));

    let err = service
        .for_existing_risk(&RiskId::from("missing"), 10)
        .await
        .unwrap_err();

    assert!(matches!(err, SimilarityError::RiskNotFound { ref id } if id.as_str() == "missing"));
    assert_eq!(service.repository().find_many_calls(), 0);
}

#[tokio::test]
async fn test_existing_risk_uses_stored_embedding() {
    let service = service(
        vec![
            stored("query", "Phishing emails", 1.0),
            stored("close", "Spear phishing", 0.92),
            stored("far", "Flooding", 0.2),
        ],
        MockEmbeddingBackend::failing(500),
    );

    let results = service
        .for_existing_risk(&RiskId::from("query"), 10)
        .await
        .unwrap();

    assert_eq!(ids(&results), vec!["close"]);
    assert!((results[0].score - 92.0).abs() < 1e-3);
    assert_eq!(service.matcher().embeddings().backend().calls(), 0);
}

#[tokio::test]
async fn test_existing_risk_excludes_itself_and_archived() {
    let service = service(
        vec![
            stored("query", "Phishing emails", 1.0),
            stored("twin", "Phishing emails", 1.0),
            stored("old", "Phishing", 0.99).archived(),
        ],
        MockEmbeddingBackend::new(),
    );

    let results = service
        .for_existing_risk(&RiskId::from("query"), 10)
        .await
        .unwrap();

    assert_eq!(ids(&results), vec!["twin"]);
    assert!(results[0].matched_fields.contains(&RiskField::Title));

    let filter = service.repository().last_filter().unwrap();
    assert_eq!(filter.exclude_id, Some(RiskId::from("query")));
    assert!(!filter.include_archived);
}

#[tokio::test]
async fn test_existing_risk_embeds_when_no_stored_vector() {
    let service = service(
        vec![
            RiskRecord::new("query", RiskText::new("Phishing").with_threat("Lures")),
            stored("close", "Spear phishing", 0.8),
        ],
        MockEmbeddingBackend::new(),
    );
    service
        .matcher()
        .embeddings()
        .backend()
        .insert("phishing\n\nlures", vec![1.0, 0.0]);

    let results = service
        .for_existing_risk(&RiskId::from("query"), 10)
        .await
        .unwrap();

    assert_eq!(ids(&results), vec!["close"]);
    assert_eq!(
        service.matcher().embeddings().backend().requests(),
        vec!["phishing\n\nlures".to_string()]
    );
}

#[tokio::test]
async fn test_existing_risk_degrades_on_backend_failure() {
    let service = service(
        vec![
            RiskRecord::new("query", RiskText::new("Phishing emails")),
            stored("close", "Spear phishing", 0.95),
        ],
        MockEmbeddingBackend::failing(500),
    );

    let results = service
        .for_existing_risk(&RiskId::from("query"), 10)
        .await
        .unwrap();

    assert!(results.is_empty());
    assert_eq!(service.matcher().embeddings().backend().calls(), 1);
}

#[tokio::test]
async fn test_existing_risk_degrades_on_candidate_failure() {
    let service = service(
        vec![stored("query", "Phishing emails", 1.0)],
        MockEmbeddingBackend::new(),
    );
    service.repository().fail_find_many();

    let results = service
        .for_existing_risk(&RiskId::from("query"), 10)
        .await
        .unwrap();

    assert!(results.is_empty());
}

#[tokio::test]
async fn test_existing_risk_degrades_on_dimension_mismatch() {
    let service = service(
        vec![
            stored("query", "Phishing emails", 1.0),
            RiskRecord::new("corrupt", RiskText::new("Phishing")).with_embedding(vec![1.0_f32; 3]),
        ],
        MockEmbeddingBackend::new(),
    );

    let results = service
        .for_existing_risk(&RiskId::from("query"), 10)
        .await
        .unwrap();

    assert!(results.is_empty());
}

#[tokio::test]
async fn test_threshold_filters_results() {
    let service = service(
        vec![
            stored("query", "Data exfiltration", 1.0),
            stored("a", "Alpha", 0.95),
            stored("b", "Bravo", 0.72),
            stored("c", "Charlie", 0.71),
            stored("d", "Delta", 0.65),
            stored("e", "Echo", 0.4),
        ],
        MockEmbeddingBackend::new(),
    );

    let results = service
        .for_existing_risk(&RiskId::from("query"), 10)
        .await
        .unwrap();

    assert_eq!(ids(&results), vec!["a", "b", "c"]);
    assert!(results.iter().all(|r| r.score >= 70.0));
    assert!(results.windows(2).all(|w| w[0].score >= w[1].score));
}

#[tokio::test]
async fn test_custom_threshold() {
    let config = Config {
        similarity_threshold: 90,
        ..Config::default()
    };
    let service = SimilarityService::new(
        MockRiskRepository::with_risks(vec![
            stored("query", "Data exfiltration", 1.0),
            stored("a", "Alpha", 0.95),
            stored("b", "Bravo", 0.8),
        ]),
        MockEmbeddingBackend::new(),
        config,
    );

    let results = service
        .for_existing_risk(&RiskId::from("query"), 10)
        .await
        .unwrap();

    assert_eq!(service.threshold(), 90);
    assert_eq!(ids(&results), vec!["a"]);
}

#[tokio::test]
async fn test_limit_truncates_after_filtering() {
    let risks = std::iter::once(stored("query", "Query", 1.0))
        .chain((0..8).map(|i| stored(&format!("r{i}"), "Candidate", 0.99 - i as f32 * 0.01)))
        .collect();
    let service = service(risks, MockEmbeddingBackend::new());

    let results = service
        .for_existing_risk(&RiskId::from("query"), 3)
        .await
        .unwrap();

    assert_eq!(ids(&results), vec!["r0", "r1", "r2"]);
}

#[tokio::test]
async fn test_results_carry_full_record() {
    let mut twin = stored("twin", "Phishing", 0.9);
    twin.owner = Some("Security team".to_string());
    twin.category = Some("Cyber".to_string());
    let service = service(
        vec![stored("query", "Phishing", 1.0), twin],
        MockEmbeddingBackend::new(),
    );

    let results = service
        .for_existing_risk(&RiskId::from("query"), 10)
        .await
        .unwrap();

    assert_eq!(results[0].risk.owner.as_deref(), Some("Security team"));
    assert_eq!(results[0].risk.category.as_deref(), Some("Cyber"));
}

#[tokio::test]
async fn test_draft_short_title_skips_everything() {
    let service = service(
        vec![stored("a", "Hi there", 1.0)],
        MockEmbeddingBackend::with_fallback(vec![1.0, 0.0]),
    );

    for title in ["Hi", "  Hi  ", "", "ab"] {
        let draft = DraftRisk::new(RiskText::new(title).with_threat("Something long enough"));
        assert!(service.for_draft_risk(&draft, 5).await.is_empty());
    }

    assert_eq!(service.repository().find_many_calls(), 0);
    assert_eq!(service.matcher().embeddings().backend().calls(), 0);
}

#[tokio::test]
async fn test_draft_matches_against_active_candidates() {
    let service = service(
        vec![
            stored("close", "Phishing", 0.9),
            stored("editing", "Phishing", 1.0),
            stored("far", "Earthquake", 0.1),
        ],
        MockEmbeddingBackend::with_fallback(vec![1.0, 0.0]),
    );
    let draft = DraftRisk::new(RiskText::new("Phishing campaign")).excluding("editing");

    let results = service.for_draft_risk(&draft, 5).await;

    assert_eq!(ids(&results), vec!["close"]);
    assert!(results[0].matched_fields.contains(&RiskField::Title));

    let filter = service.repository().last_filter().unwrap();
    assert_eq!(filter.exclude_id, Some(RiskId::from("editing")));
    assert_eq!(filter.limit, Some(100));
    assert_eq!(
        service.matcher().embeddings().backend().requests(),
        vec!["phishing campaign".to_string()]
    );
}

#[tokio::test]
async fn test_draft_without_candidates_never_embeds() {
    let service = service(vec![], MockEmbeddingBackend::with_fallback(vec![1.0, 0.0]));
    let draft = DraftRisk::new(RiskText::new("Ransomware outbreak"));

    assert!(service.for_draft_risk(&draft, 5).await.is_empty());
    assert_eq!(service.repository().find_many_calls(), 1);
    assert_eq!(service.matcher().embeddings().backend().calls(), 0);
}

#[tokio::test]
async fn test_draft_degrades_on_backend_failure() {
    let service = service(
        vec![stored("close", "Phishing", 0.9)],
        MockEmbeddingBackend::failing(503),
    );
    let draft = DraftRisk::new(RiskText::new("Phishing campaign"));

    assert!(service.for_draft_risk(&draft, 5).await.is_empty());
}

#[tokio::test]
async fn test_embed_risk_uses_normalized_text() {
    let service = service(vec![], MockEmbeddingBackend::with_fallback(vec![0.25, 0.75]));
    let text = RiskText::new("  Phishing ").with_description("Targeted EMAILS");

    let embedding = service.embed_risk(&text).await.unwrap();

    assert_eq!(embedding.as_slice(), &[0.25, 0.75]);
    assert_eq!(
        service.matcher().embeddings().backend().requests(),
        vec!["phishing\n\ntargeted emails".to_string()]
    );
}

#[tokio::test]
async fn test_embed_risk_failure_is_none() {
    let service = service(vec![], MockEmbeddingBackend::failing(404));

    assert!(service.embed_risk(&RiskText::new("Phishing")).await.is_none());
}

#[test]
fn test_result_serializes_camel_case_without_embedding() {
    let record = stored("r1", "Phishing", 0.9);
    let result = SimilarRiskResult {
        risk: record,
        score: 90.0,
        matched_fields: [RiskField::Title].into_iter().collect(),
    };

    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(json["score"], 90.0);
    assert_eq!(json["matchedFields"], serde_json::json!(["title"]));
    assert_eq!(json["risk"]["id"], "r1");
    assert_eq!(json["risk"]["title"], "Phishing");
    assert!(json["risk"].get("embedding").is_none());
}
