//! Risk similarity command-line entrypoint.

use std::path::Path;

use anyhow::{Context, bail};
use serde_json::json;

use risk_similarity::config::Config;
use risk_similarity::inference::{EmbeddingClient, InferenceClient};
use risk_similarity::risk::RiskText;
use risk_similarity::scoring::ChatFallbackScorer;
use risk_similarity::text::normalize_risk;

const USAGE: &str =
    "usage: risk-similarity [--health-check] | compare <a.json> <b.json> | embed <text>";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if std::env::args().any(|arg| arg == "--health-check") {
        std::process::exit(run_health_check());
    }

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;
    config.validate()?;

    tracing::debug!(
        base_url = %config.inference_base_url,
        threshold = config.similarity_threshold,
        "Configuration loaded"
    );

    let args: Vec<String> = std::env::args().skip(1).collect();
    let args: Vec<&str> = args.iter().map(String::as_str).collect();

    match args.as_slice() {
        ["compare", a, b] => compare(&config, Path::new(a), Path::new(b)).await,
        ["embed", words @ ..] if !words.is_empty() => embed(&config, &words.join(" ")).await,
        _ => bail!("{USAGE}"),
    }
}

async fn compare(config: &Config, a: &Path, b: &Path) -> anyhow::Result<()> {
    let a = read_risk(a)?;
    let b = read_risk(b)?;

    let scorer = ChatFallbackScorer::new(InferenceClient::new(config.inference())?);
    let result = scorer.score_chat(&a, &b).await;

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

async fn embed(config: &Config, text: &str) -> anyhow::Result<()> {
    let normalized = normalize_risk(&RiskText::new(text), config.max_text_length);

    let embeddings = EmbeddingClient::new(InferenceClient::new(config.inference())?);
    let report = match embeddings.embed(&normalized).await {
        Some(vector) => json!({
            "normalizedLength": normalized.chars().count(),
            "dimensions": vector.dimensions(),
        }),
        None => json!({
            "normalizedLength": normalized.chars().count(),
            "available": false,
        }),
    };

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn read_risk(path: &Path) -> anyhow::Result<RiskText> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("invalid risk JSON in {}", path.display()))
}

fn run_health_check() -> i32 {
    let result = Config::from_env().and_then(|config| config.validate());

    match result {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("configuration invalid: {e}");
            1
        }
    }
}
