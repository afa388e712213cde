//! GraphQL implementation of the submission client

use super::error::ApiError;
use super::traits::SubmissionClient;
use super::types::{
    CreateJournalEntryData, DocumentStatus, GraphqlResponse, JournalEntriesData,
    SubmissionReceipt,
};
use crate::config::{ApiConfig, Config, Credentials};
use crate::core::entry::JournalEntry;
use crate::utils::auth::sign_request;
use crate::utils::error::{JournalError, Result, RetryConfig, RetryPolicy};
use crate::utils::{current_timestamp, truncate_string};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::time::Duration;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Header carrying the per-Group idempotency key
pub const IDEMPOTENCY_HEADER: &str = "Idempotency-Key";

/// Status recorded when the server creates an entry without reporting one
pub const DEFAULT_CREATED_STATUS: &str = "Created";

const CREATE_JOURNAL_ENTRY: &str = r#"mutation CreateJournalEntry($input: JournalEntryInput!) {
  createJournalEntry(input: $input) {
    journalEntryNumber
    journalEntryStatus
  }
}"#;

const JOURNAL_ENTRY_STATUS: &str = r#"query JournalEntryStatus($numbers: [String!]!) {
  journalEntries(filter: { numbers: $numbers }) {
    number
    status
    warning
  }
}"#;

/// Signed GraphQL client with retries
#[derive(Debug, Clone)]
pub struct GraphqlClient {
    http: Client,
    endpoint: String,
    credentials: Credentials,
    retry: RetryPolicy,
}

impl GraphqlClient {
    pub fn new(api: &ApiConfig, retry: RetryConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(api.timeout())
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| JournalError::config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            endpoint: api.endpoint.clone(),
            credentials: api.credentials.clone(),
            retry: RetryPolicy::new(retry),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(&config.api, config.retry.clone())
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// One signed POST; no retries
    async fn execute<T: DeserializeOwned>(
        &self,
        operation: &str,
        query: &str,
        variables: &Value,
        idempotency_key: Option<&str>,
        attempt: u32,
    ) -> std::result::Result<T, ApiError> {
        let auth = sign_request(&self.credentials, current_timestamp())
            .map_err(|e| ApiError::Signing(e.to_string()))?;

        let body = json!({
            "operationName": operation,
            "query": query,
            "variables": variables,
        });
        debug!(operation, attempt, "Sending GraphQL request");

        let mut request = self.http.post(&self.endpoint).json(&body);
        for (name, value) in auth.pairs() {
            request = request.header(name, value);
        }
        if let Some(key) = idempotency_key {
            request = request.header(IDEMPOTENCY_HEADER, key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::from_reqwest(&e))?;

        let status = response.status();
        if !status.is_success() {
            let retry_after = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.trim().parse::<u64>().ok())
                .map(Duration::from_secs);
            let text = response.text().await.unwrap_or_default();
            return Err(ApiError::from_status(status.as_u16(), &text, retry_after));
        }

        let text = response
            .text()
            .await
            .map_err(ApiError::unreadable_body)?;
        debug!(operation, response = %truncate_string(&text, 500), "GraphQL response received");

        let envelope: GraphqlResponse<T> = serde_json::from_str(&text).map_err(|e| {
            ApiError::InvalidResponse(format!("Failed to parse response: {}", e))
        })?;

        if !envelope.errors.is_empty() {
            return Err(ApiError::from_graphql(&envelope.errors));
        }

        envelope
            .data
            .ok_or_else(|| ApiError::InvalidResponse("Response carries no data".to_string()))
    }
}

#[async_trait]
impl SubmissionClient for GraphqlClient {
    async fn submit_entry(
        &self,
        entry: &JournalEntry,
    ) -> std::result::Result<SubmissionReceipt, ApiError> {
        let variables = json!({ "input": entry });
        let key = Uuid::new_v4().to_string();
        let (variables, key) = (&variables, key.as_str());

        let data: CreateJournalEntryData = self
            .retry
            .call(move |attempt| {
                self.execute(
                    "CreateJournalEntry",
                    CREATE_JOURNAL_ENTRY,
                    variables,
                    Some(key),
                    attempt,
                )
            })
            .await
            .inspect_err(|e| warn!(idempotency_key = key, "Submission failed: {}", e))?;

        let created = data.create_journal_entry.ok_or_else(|| {
            ApiError::InvalidResponse("createJournalEntry returned nothing".to_string())
        })?;
        let document = created
            .journal_entry_number
            .filter(|number| !number.trim().is_empty())
            .ok_or_else(|| {
                ApiError::InvalidResponse("Response has no journal entry number".to_string())
            })?;

        info!(document = %document, "Journal entry created");
        Ok(SubmissionReceipt {
            document,
            status: created
                .journal_entry_status
                .filter(|status| !status.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_CREATED_STATUS.to_string()),
        })
    }

    async fn query_status(&self, document: &str) -> std::result::Result<DocumentStatus, ApiError> {
        let variables = json!({ "numbers": [document] });
        let variables = &variables;

        let data: JournalEntriesData = self
            .retry
            .call(move |attempt| {
                self.execute(
                    "JournalEntryStatus",
                    JOURNAL_ENTRY_STATUS,
                    variables,
                    None,
                    attempt,
                )
            })
            .await?;

        data.journal_entries
            .into_iter()
            .find(|node| node.number == document)
            .map(|node| DocumentStatus {
                status: node.status.unwrap_or_default(),
                warning: node.warning.filter(|warning| !warning.trim().is_empty()),
            })
            .ok_or_else(|| ApiError::NotFound(document.to_string()))
    }
}
