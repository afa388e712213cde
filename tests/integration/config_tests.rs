//! Configuration loading and its effect on the engine

use journal_batch::config::{Config, env_keys};
use journal_batch::{EntryBuilder, JournalError};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::io::Write;
use tempfile::NamedTempFile;

const FULL_CONFIG: &str = r#"
api:
  endpoint: "https://erp.example.com/api/graphql"
  timeout_seconds: 30
  credentials:
    app_key: "app"
    client_id: "client"
    secret: "secret"
retry:
  max_attempts: 4
  base_delay_ms: 250
batch:
  concurrency: 6
  balance_tolerance: 0.005
  require_header: true
columns:
  account: "Nominal Code"
  amount: "Net"
logging:
  level: "debug"
  json: true
"#;

#[tokio::test]
async fn test_full_config_file() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(FULL_CONFIG.as_bytes()).unwrap();

    let config = Config::from_file(file.path()).await.unwrap();

    assert_eq!(config.api.timeout_seconds, 30);
    assert_eq!(config.retry.max_attempts, 4);
    assert_eq!(config.retry.max_delay_ms, 10_000);
    assert_eq!(config.batch.concurrency, 6);
    assert!(config.batch.require_header);
    assert!(config.logging.json);

    let builder = EntryBuilder::from_config(&config);
    assert_eq!(builder.tolerance(), Decimal::new(5, 3));
    assert_eq!(builder.columns().account, "Nominal Code");
    assert_eq!(builder.columns().debit, "debit");
}

#[tokio::test]
async fn test_invalid_endpoint_is_rejected() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"api:\n  endpoint: \"erp.example.com\"\n").unwrap();

    let result = Config::from_file(file.path()).await;
    assert!(matches!(result, Err(JournalError::Config(_))));
}

#[test]
fn test_environment_wins_over_file() {
    let env: HashMap<&str, &str> = [
        (env_keys::ENDPOINT, "https://override.example.com/graphql"),
        (env_keys::SECRET, "from-env"),
        (env_keys::CONCURRENCY, "2"),
    ]
    .into_iter()
    .collect();

    let config = Config::from_yaml_str(FULL_CONFIG)
        .unwrap()
        .apply_env(|key| env.get(key).map(|value| value.to_string()))
        .unwrap();

    assert_eq!(config.api.endpoint, "https://override.example.com/graphql");
    assert_eq!(config.api.credentials.secret, "from-env");
    assert_eq!(config.api.credentials.app_key, "app");
    assert_eq!(config.batch.concurrency, 2);
    assert!(config.validate().is_ok());
}

#[test]
fn test_credentials_are_redacted_in_debug_output() {
    let config = Config::from_yaml_str(FULL_CONFIG).unwrap();
    let debug = format!("{:?}", config);
    assert!(!debug.contains("secret\""));
    assert!(debug.contains("[REDACTED]"));
}

#[test]
fn test_example_config_is_valid() {
    let config = Config::from_yaml_str(include_str!("../../config/journal.example.yaml")).unwrap();
    assert!(config.validate().is_ok());
    assert_eq!(config.batch.balance_tolerance, Decimal::new(1, 2));
    assert_eq!(config.columns.dimensions.len(), 7);
}
