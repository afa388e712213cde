//! The GraphQL client against a mock server

use crate::common::{RowFactory, TableFactory};
use journal_batch::config::{ApiConfig, Credentials, RetryConfig};
use journal_batch::utils::auth::create_hmac_signature;
use journal_batch::{
    ApiError, BatchSubmitter, Config, EntryBuilder, GraphqlClient, JournalEntry, RowTable,
    SubmissionClient, group_rows,
};
use journal_batch::{BuildOutcome, DEFAULT_CREATED_STATUS, GroupOutcome};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn api_config(server: &MockServer) -> ApiConfig {
    ApiConfig {
        endpoint: format!("{}/graphql", server.uri()),
        timeout_seconds: 5,
        credentials: Credentials::new("app-key", "client-1", "s3cret"),
    }
}

fn fast_retry(max_attempts: u32) -> RetryConfig {
    RetryConfig {
        max_attempts,
        base_delay_ms: 10,
        max_delay_ms: 50,
        backoff_multiplier: 2.0,
        jitter: false,
    }
}

fn client(server: &MockServer, max_attempts: u32) -> GraphqlClient {
    GraphqlClient::new(&api_config(server), fast_retry(max_attempts)).unwrap()
}

fn sample_entry() -> JournalEntry {
    let rows = vec![
        RowFactory::header_line(0, "G", "4000", "100"),
        RowFactory::line(1, "", "2000", "-100"),
    ];
    let groups = group_rows(&rows);
    match EntryBuilder::default().build(&groups[0]) {
        BuildOutcome::Ready(entry) => entry,
        other => panic!("fixture should build, got {:?}", other),
    }
}

fn created(number: &str, status: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "data": {
            "createJournalEntry": {
                "journalEntryNumber": number,
                "journalEntryStatus": status
            }
        }
    }))
}

#[tokio::test]
async fn test_submit_entry_sends_signed_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(header("X-App-Key", "app-key"))
        .and(header("X-Client-Id", "client-1"))
        .and(header_exists("X-Timestamp"))
        .and(header_exists("X-Signature"))
        .and(header_exists("Idempotency-Key"))
        .and(body_partial_json(json!({
            "operationName": "CreateJournalEntry",
            "variables": {
                "input": {
                    "site": "FR01",
                    "documentType": "ODG",
                    "accountingDate": "2024-03-31",
                    "sourceCurrency": "EUR"
                }
            }
        })))
        .respond_with(created("JE-2024-0001", "Draft"))
        .expect(1)
        .mount(&server)
        .await;

    let receipt = client(&server, 3).submit_entry(&sample_entry()).await.unwrap();
    assert_eq!(receipt.document, "JE-2024-0001");
    assert_eq!(receipt.status, "Draft");

    let requests = server.received_requests().await.unwrap();
    let headers = &requests[0].headers;
    let value = |name: &str| headers.get(name).unwrap().to_str().unwrap().to_string();
    let expected = create_hmac_signature(
        "s3cret",
        &format!("app-keyclient-1{}", value("X-Timestamp")),
    )
    .unwrap();
    assert_eq!(value("X-Signature"), expected);
}

#[tokio::test]
async fn test_transient_errors_are_retried_with_same_idempotency_key() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .up_to_n_times(2)
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(created("JE-9", "Draft"))
        .mount(&server)
        .await;

    let receipt = client(&server, 3).submit_entry(&sample_entry()).await.unwrap();
    assert_eq!(receipt.document, "JE-9");

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 3);
    let keys: Vec<_> = requests
        .iter()
        .map(|request| request.headers.get("Idempotency-Key").unwrap().clone())
        .collect();
    assert!(keys.windows(2).all(|pair| pair[0] == pair[1]));
}

#[tokio::test]
async fn test_each_submission_gets_its_own_idempotency_key() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(created("JE-1", "Draft"))
        .mount(&server)
        .await;

    let client = client(&server, 1);
    client.submit_entry(&sample_entry()).await.unwrap();
    client.submit_entry(&sample_entry()).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_ne!(
        requests[0].headers.get("Idempotency-Key"),
        requests[1].headers.get("Idempotency-Key")
    );
}

#[tokio::test]
async fn test_retries_give_up_after_max_attempts() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502))
        .expect(2)
        .mount(&server)
        .await;

    let error = client(&server, 2)
        .submit_entry(&sample_entry())
        .await
        .unwrap_err();
    assert!(matches!(error, ApiError::Server { status: 502, .. }));
}

#[tokio::test]
async fn test_unauthorized_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad signature"))
        .expect(1)
        .mount(&server)
        .await;

    let error = client(&server, 3)
        .submit_entry(&sample_entry())
        .await
        .unwrap_err();
    assert!(matches!(error, ApiError::Unauthorized(_)));
}

#[tokio::test]
async fn test_graphql_errors_are_rejections() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": null,
            "errors": [
                { "message": "Account 4000 is closed" },
                { "message": "Period 2024-03 is locked" }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let error = client(&server, 3)
        .submit_entry(&sample_entry())
        .await
        .unwrap_err();
    assert_eq!(
        error,
        ApiError::Rejected("Account 4000 is closed; Period 2024-03 is locked".to_string())
    );
}

#[tokio::test]
async fn test_response_without_document_number_is_invalid() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "createJournalEntry": { "journalEntryStatus": "Draft" } }
        })))
        .mount(&server)
        .await;

    let error = client(&server, 3)
        .submit_entry(&sample_entry())
        .await
        .unwrap_err();
    assert!(matches!(error, ApiError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_missing_status_falls_back_to_created() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "createJournalEntry": { "journalEntryNumber": "JE-3", "journalEntryStatus": "" } }
        })))
        .mount(&server)
        .await;

    let receipt = client(&server, 1).submit_entry(&sample_entry()).await.unwrap();
    assert_eq!(receipt.document, "JE-3");
    assert_eq!(receipt.status, DEFAULT_CREATED_STATUS);
}

#[tokio::test]
async fn test_slow_server_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(created("JE-1", "Draft").set_delay(Duration::from_secs(3)))
        .mount(&server)
        .await;

    let mut api = api_config(&server);
    api.timeout_seconds = 1;
    let client = GraphqlClient::new(&api, fast_retry(1)).unwrap();

    let error = client.submit_entry(&sample_entry()).await.unwrap_err();
    assert!(matches!(error, ApiError::Timeout(_)));
}

#[tokio::test]
async fn test_query_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "operationName": "JournalEntryStatus",
            "variables": { "numbers": ["JE-5"] }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "journalEntries": [
                    { "number": "JE-5", "status": "Posted", "warning": "" }
                ]
            }
        })))
        .mount(&server)
        .await;

    let client = client(&server, 1);
    let status = client.query_status("JE-5").await.unwrap();
    assert_eq!(status.status, "Posted");
    assert_eq!(status.warning, None);
}

#[tokio::test]
async fn test_query_status_unknown_document() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "journalEntries": [] }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let error = client(&server, 3).query_status("JE-404").await.unwrap_err();
    assert_eq!(error, ApiError::NotFound("JE-404".to_string()));
}

#[tokio::test]
async fn test_batch_run_against_server() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "variables": { "input": { "reference": "G1" } }
        })))
        .respond_with(ResponseTemplate::new(400).set_body_string("duplicate reference"))
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(created("JE-100", "Draft"))
        .mount(&server)
        .await;

    let mut config = Config::default();
    config.api = api_config(&server);
    config.retry = fast_retry(2);

    let mut table: RowTable = TableFactory::balanced_groups(3)
        .into_rows()
        .into_iter()
        .map(|row| match row.index() {
            2 => row.with_field("reference", "G1"),
            _ => row,
        })
        .collect();

    let client = GraphqlClient::from_config(&config).unwrap();
    let report = BatchSubmitter::from_config(client, &config)
        .submit(&mut table)
        .await
        .unwrap();

    assert_eq!(report.succeeded, 2);
    assert_eq!(report.failed, 1);
    assert!(matches!(report.groups[1].outcome, GroupOutcome::Failed { .. }));
    assert_eq!(
        table.rows()[2].result().warning.as_deref(),
        Some("Rejected by server: HTTP 400: duplicate reference")
    );
    assert_eq!(table.rows()[0].result().document.as_deref(), Some("JE-100"));
}
