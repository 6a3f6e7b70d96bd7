use super::*;
use serial_test::serial;
use std::env;

fn with_env_vars<F, R>(vars: &[(&str, &str)], f: F) -> R
where
    F: FnOnce() -> R,
{
    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    for (key, value) in vars {
        unsafe { env::set_var(key, value) };
    }

    let result = f();

    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    for (key, _) in vars {
        unsafe { env::remove_var(key) };
    }

    result
}

fn clear_risk_env() {
    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    unsafe {
        env::remove_var("RISK_SIMILARITY_THRESHOLD");
        env::remove_var("RISK_SIMILARITY_MAX_TEXT_LENGTH");
        env::remove_var("RISK_INFERENCE_BASE_URL");
        env::remove_var("RISK_EMBEDDING_MODEL");
        env::remove_var("RISK_CHAT_MODEL");
        env::remove_var("RISK_INFERENCE_TIMEOUT_MS");
    }
}

#[test]
fn test_default_config() {
    let config = Config::default();

    assert_eq!(config.similarity_threshold, 70);
    assert_eq!(config.max_text_length, 8000);
    assert_eq!(config.inference_base_url, "http://localhost:11434");
    assert_eq!(config.embedding_model, "nomic-embed-text");
    assert_eq!(config.chat_model, "llama3.2");
    assert_eq!(config.inference_timeout_ms, 30_000);
    assert!(config.validate().is_ok());
}

#[test]
#[serial]
fn test_from_env_with_defaults() {
    clear_risk_env();

    let config = Config::from_env().expect("should parse with defaults");

    assert_eq!(config, Config::default());
}

#[test]
#[serial]
fn test_from_env_overrides() {
    clear_risk_env();

    let config = with_env_vars(
        &[
            ("RISK_SIMILARITY_THRESHOLD", "85"),
            ("RISK_SIMILARITY_MAX_TEXT_LENGTH", "2048"),
            ("RISK_INFERENCE_BASE_URL", "https://inference.internal:8443/"),
            ("RISK_EMBEDDING_MODEL", "mxbai-embed-large"),
            ("RISK_CHAT_MODEL", "qwen2.5"),
            ("RISK_INFERENCE_TIMEOUT_MS", "5000"),
        ],
        Config::from_env,
    )
    .expect("should parse overrides");

    assert_eq!(config.similarity_threshold, 85);
    assert_eq!(config.max_text_length, 2048);
    assert_eq!(config.embedding_model, "mxbai-embed-large");
    assert_eq!(config.chat_model, "qwen2.5");
    assert_eq!(config.inference_timeout_ms, 5000);
    assert!(config.validate().is_ok());
}

#[test]
#[serial]
fn test_threshold_out_of_range() {
    clear_risk_env();

    let result = with_env_vars(&[("RISK_SIMILARITY_THRESHOLD", "101")], Config::from_env);

    assert!(matches!(result, Err(ConfigError::InvalidThreshold { .. })));
}

#[test]
#[serial]
fn test_threshold_not_a_number() {
    clear_risk_env();

    let result = with_env_vars(&[("RISK_SIMILARITY_THRESHOLD", "high")], Config::from_env);

    match result {
        Err(ConfigError::ThresholdParseError { value, .. }) => assert_eq!(value, "high"),
        other => panic!("expected ThresholdParseError, got {:?}", other),
    }
}

#[test]
#[serial]
fn test_threshold_boundaries() {
    clear_risk_env();

    let zero = with_env_vars(&[("RISK_SIMILARITY_THRESHOLD", "0")], Config::from_env)
        .expect("0 is valid");
    assert_eq!(zero.similarity_threshold, 0);

    let hundred = with_env_vars(&[("RISK_SIMILARITY_THRESHOLD", " 100 ")], Config::from_env)
        .expect("100 is valid");
    assert_eq!(hundred.similarity_threshold, 100);
}

#[test]
#[serial]
fn test_invalid_timeout() {
    clear_risk_env();

    let result = with_env_vars(&[("RISK_INFERENCE_TIMEOUT_MS", "soon")], Config::from_env);

    match result {
        Err(ConfigError::NumberParseError { name, .. }) => {
            assert_eq!(name, "RISK_INFERENCE_TIMEOUT_MS")
        }
        other => panic!("expected NumberParseError, got {:?}", other),
    }
}

#[test]
#[serial]
fn test_blank_model_falls_back_to_default() {
    clear_risk_env();

    let config = with_env_vars(&[("RISK_CHAT_MODEL", "   ")], Config::from_env)
        .expect("blank model should use default");

    assert_eq!(config.chat_model, "llama3.2");
}

#[test]
fn test_validate_rejects_bad_base_url() {
    let config = Config {
        inference_base_url: "localhost:11434".to_string(),
        ..Default::default()
    };

    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidBaseUrl { .. })
    ));
}

#[test]
fn test_validate_rejects_empty_model() {
    let config = Config {
        embedding_model: " ".to_string(),
        ..Default::default()
    };

    assert!(matches!(
        config.validate(),
        Err(ConfigError::EmptyModel {
            name: "RISK_EMBEDDING_MODEL"
        })
    ));
}

#[test]
fn test_validate_rejects_zero_values() {
    let config = Config {
        max_text_length: 0,
        ..Default::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::ZeroValue { .. })
    ));

    let config = Config {
        inference_timeout_ms: 0,
        ..Default::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::ZeroValue { .. })
    ));
}

#[test]
fn test_inference_config_urls() {
    let config = Config {
        inference_base_url: "http://ollama:11434/".to_string(),
        inference_timeout_ms: 1500,
        ..Default::default()
    };

    let inference = config.inference();

    assert_eq!(inference.base_url, "http://ollama:11434");
    assert_eq!(inference.embeddings_url(), "http://ollama:11434/api/embeddings");
    assert_eq!(inference.chat_url(), "http://ollama:11434/api/chat");
    assert_eq!(inference.timeout, Duration::from_millis(1500));
}

#[test]
fn test_error_display() {
    let err = ConfigError::InvalidThreshold {
        value: "150".to_string(),
    };
    assert!(err.to_string().contains("150"));
    assert!(err.to_string().contains("between 0 and 100"));

    let err = ConfigError::ZeroValue {
        name: "RISK_INFERENCE_TIMEOUT_MS",
    };
    assert_eq!(
        err.to_string(),
        "RISK_INFERENCE_TIMEOUT_MS must be greater than zero"
    );
}
