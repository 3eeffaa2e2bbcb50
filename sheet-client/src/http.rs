// sheet-client/src/http.rs
// HTTP 客户端 - 表格端点通信

use crate::{ClientConfig, ClientError, ClientResult};
use async_trait::async_trait;
use reqwest::{Client, Url, header};
use serde::de::{DeserializeOwned, IgnoredAny};
use shared::request::READ_QUERY;
use shared::{Envelope, Record, RecordDraft, SheetRequest};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

/// POST bodies are declared as plain text so a browser origin does not need a
/// CORS preflight; the endpoint parses the text as JSON itself.
const POST_CONTENT_TYPE: &str = "text/plain;charset=utf-8";

/// Longest body excerpt carried in an error message
const BODY_EXCERPT_CHARS: usize = 200;

/// Remote record store
///
/// The backing endpoint serializes every call behind a single-writer lock and
/// has no batch API, so each method is one round trip. Nothing here retries:
/// a retried create after an ambiguous failure can leave a duplicate row.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Fetch every record, in sheet order
    async fn list(&self) -> ClientResult<Vec<Record>>;

    /// Insert a draft; the endpoint mints the `id`
    async fn create(&self, draft: &RecordDraft) -> ClientResult<Record>;

    /// Replace the row whose `id` matches
    async fn update(&self, record: &Record) -> ClientResult<Record>;

    /// Remove the row whose `id` matches
    async fn delete(&self, id: &str) -> ClientResult<()>;
}

#[async_trait]
impl<T: RemoteStore + ?Sized> RemoteStore for Arc<T> {
    async fn list(&self) -> ClientResult<Vec<Record>> {
        (**self).list().await
    }

    async fn create(&self, draft: &RecordDraft) -> ClientResult<Record> {
        (**self).create(draft).await
    }

    async fn update(&self, record: &Record) -> ClientResult<Record> {
        (**self).update(record).await
    }

    async fn delete(&self, id: &str) -> ClientResult<()> {
        (**self).delete(id).await
    }
}

/// 网络客户端 - one spreadsheet endpoint
#[derive(Debug, Clone)]
pub struct SheetClient {
    client: Client,
    endpoint: Url,
}

impl SheetClient {
    /// Create a new client from configuration
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let endpoint = Url::parse(config.endpoint.trim())
            .map_err(|e| ClientError::InvalidEndpoint(format!("{}: {e}", config.endpoint)))?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(ClientError::InvalidEndpoint(format!(
                "{}: scheme must be http or https",
                config.endpoint
            )));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self { client, endpoint })
    }

    async fn post<T: DeserializeOwned>(
        &self,
        request: &SheetRequest<'_>,
    ) -> ClientResult<Envelope<T>> {
        let body = serde_json::to_string(request)?;
        tracing::debug!(action = request.action(), "POST {}", self.endpoint);

        let response = self
            .client
            .post(self.endpoint.clone())
            .header(header::CONTENT_TYPE, POST_CONTENT_TYPE)
            .body(body)
            .send()
            .await?;
        Self::read_envelope(response).await
    }

    /// Decode the envelope regardless of HTTP status. A non-2xx answer that
    /// still carries an envelope is judged by the envelope; otherwise the
    /// status and a body excerpt are reported.
    async fn read_envelope<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> ClientResult<Envelope<T>> {
        let status = response.status();
        let text = response.text().await?;

        match serde_json::from_str::<Envelope<T>>(&text) {
            Ok(envelope) => Ok(envelope),
            Err(_) if !status.is_success() => Err(ClientError::InvalidResponse(format!(
                "HTTP {status}: {}",
                excerpt(&text)
            ))),
            Err(e) => Err(ClientError::InvalidResponse(format!(
                "{e} (body: {})",
                excerpt(&text)
            ))),
        }
    }
}

#[async_trait]
impl RemoteStore for SheetClient {
    async fn list(&self) -> ClientResult<Vec<Record>> {
        tracing::debug!(action = "read", "GET {}", self.endpoint);
        let response = self
            .client
            .get(self.endpoint.clone())
            .query(&READ_QUERY)
            .send()
            .await
            .inspect_err(|e| tracing::warn!(action = "read", error = %e, "request failed"))?;

        let rows: Vec<serde_json::Value> = payload(
            "read",
            Self::read_envelope(response).await,
            "Failed to fetch data",
            "missing record list",
        )?;

        let total = rows.len();
        let records = keep_usable_rows(rows);
        tracing::debug!(kept = records.len(), total, "read complete");
        Ok(records)
    }

    async fn create(&self, draft: &RecordDraft) -> ClientResult<Record> {
        let result = self.post(&SheetRequest::Create { data: draft }).await;
        let record: Record =
            payload("create", result, "Operation failed", "missing created record")?;

        if record.id.trim().is_empty() {
            return Err(ClientError::InvalidResponse(
                "created record has no id".into(),
            ));
        }
        tracing::debug!(id = %record.id, "record created");
        Ok(record)
    }

    async fn update(&self, record: &Record) -> ClientResult<Record> {
        let result = self.post(&SheetRequest::Update { data: record }).await;
        let updated: Record =
            payload("update", result, "Operation failed", "missing updated record")?;

        if updated.id != record.id {
            return Err(ClientError::InvalidResponse(format!(
                "updated record id '{}' does not match '{}'",
                updated.id, record.id
            )));
        }
        tracing::debug!(id = %updated.id, "record updated");
        Ok(updated)
    }

    async fn delete(&self, id: &str) -> ClientResult<()> {
        let result = self.post::<IgnoredAny>(&SheetRequest::Delete { id }).await;
        match result {
            Ok(Envelope::Success { .. }) => {
                tracing::debug!(id, "record deleted");
                Ok(())
            }
            Ok(Envelope::Error { message }) => {
                let message = message.unwrap_or_else(|| "Operation failed".into());
                tracing::warn!(action = "delete", id, %message, "endpoint error");
                Err(ClientError::Remote(message))
            }
            Err(e) => {
                tracing::warn!(action = "delete", id, error = %e, "request failed");
                Err(e)
            }
        }
    }
}

/// Decode sheet rows one at a time. Rows that do not decode, rows without an
/// id and repeated ids are dropped with a warning; the rest keep sheet order.
fn keep_usable_rows(rows: Vec<serde_json::Value>) -> Vec<Record> {
    let mut seen = HashSet::new();
    rows.into_iter()
        .enumerate()
        .filter_map(|(index, row)| match serde_json::from_value::<Record>(row) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!(row = index + 1, error = %e, "dropping undecodable row");
                None
            }
        })
        .filter(|r| {
            if r.id.trim().is_empty() {
                tracing::warn!(name = %r.name, "dropping row without id");
                return false;
            }
            if !seen.insert(r.id.clone()) {
                // The endpoint resolves an id to its first row, so later
                // duplicates are unreachable for update/delete.
                tracing::warn!(id = %r.id, "dropping duplicate row");
                return false;
            }
            true
        })
        .collect()
}

/// Unwrap a payload-bearing envelope
fn payload<T>(
    action: &'static str,
    result: ClientResult<Envelope<T>>,
    default_message: &str,
    missing: &str,
) -> ClientResult<T> {
    let outcome = result.and_then(|envelope| match envelope.into_result() {
        Ok(Some(data)) => Ok(data),
        Ok(None) => Err(ClientError::InvalidResponse(missing.to_string())),
        Err(message) => Err(ClientError::Remote(
            message.unwrap_or_else(|| default_message.to_string()),
        )),
    });
    if let Err(e) = &outcome {
        tracing::warn!(action, error = %e, "remote call failed");
    }
    outcome
}

fn excerpt(text: &str) -> String {
    let mut out: String = text.chars().take(BODY_EXCERPT_CHARS).collect();
    if text.chars().count() > BODY_EXCERPT_CHARS {
        out.push('…');
    }
    out
}
