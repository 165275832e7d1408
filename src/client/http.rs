//! reqwest-backed implementation of [`MaintenanceApi`].
//!
//! # Security note — logging
//!
//! The bearer token is held in a [`secrecy::SecretString`] and materialized
//! into a header through the `RedactedHeader` wrapper, whose `Display`/
//! `Debug` impls print `[REDACTED]`. Even with `RUST_LOG=reqwest=debug`
//! accidentally enabled, the Authorization value never reaches a log line.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header;
use reqwest::{Client, RequestBuilder, Response};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde_json::json;
use url::Url;

use crate::config::Config;
use crate::error::{BantayError, Result};
use crate::ticket::{
    Attachment, Event, MaintenancePriority, NewAttachment, NewTicket, Remark, Ticket,
};
use crate::types::TicketStatus;
use crate::upload::PendingAttachment;

use super::MaintenanceApi;
use super::error::ApiError;

/// Wrapper for sensitive header values that redacts the value when
/// formatted.
struct RedactedHeader {
    value: String,
}

impl RedactedHeader {
    fn bearer(token: &str) -> Self {
        Self {
            value: format!("Bearer {token}"),
        }
    }

    fn as_header_value(&self) -> Result<header::HeaderValue> {
        header::HeaderValue::from_str(&self.value)
            .map_err(|_| BantayError::Config("API token contains invalid characters".to_string()))
    }
}

impl fmt::Display for RedactedHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED]")
    }
}

impl fmt::Debug for RedactedHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedactedHeader")
            .field("value", &"[REDACTED]")
            .finish()
    }
}

/// HTTP client for the maintenance backend.
#[derive(Debug)]
pub struct HttpMaintenanceClient {
    client: Client,
    base_url: Url,
    token: Option<SecretString>,
}

impl HttpMaintenanceClient {
    /// Create a client from configuration.
    ///
    /// Configures the HTTP client with a 30s connect timeout and 60s total
    /// timeout.
    pub fn from_config(config: &Config) -> Result<Self> {
        let base_url = config.base_url().ok_or_else(|| {
            BantayError::Config(
                "API base URL not configured. Set BANTAY_API_URL or add base_url to .bantay/config.yaml"
                    .to_string(),
            )
        })?;

        Self::new(&base_url, config.api_token())
    }

    /// Create a client for an explicit base URL and optional bearer token.
    pub fn new(base_url: &str, token: Option<String>) -> Result<Self> {
        // A trailing slash makes Url::join treat the base as a directory.
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        let base_url = Url::parse(&normalized)
            .map_err(|e| BantayError::Config(format!("invalid base URL '{base_url}': {e}")))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .connect_timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            base_url,
            token: token.map(SecretString::from),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| BantayError::Config(format!("invalid endpoint path '{path}': {e}")))
    }

    /// Attach auth, send, and map non-2xx to [`ApiError`].
    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let request = if let Some(token) = &self.token {
            let auth = RedactedHeader::bearer(token.expose_secret());
            request.header(header::AUTHORIZATION, auth.as_header_value()?)
        } else {
            request
        };

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(ApiError::from_response(response).await.into());
        }
        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let url = self.endpoint(path)?;
        tracing::debug!("GET {path}");
        let response = self.send(self.client.get(url).query(query)).await?;
        Ok(response.json().await?)
    }

    async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<T> {
        let url = self.endpoint(path)?;
        tracing::debug!("POST {path}");
        let response = self.send(self.client.post(url).json(body)).await?;
        Ok(response.json().await?)
    }

    async fn put_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<T> {
        let url = self.endpoint(path)?;
        tracing::debug!("PUT {path}");
        let response = self.send(self.client.put(url).json(body)).await?;
        Ok(response.json().await?)
    }
}

fn before_query(before: Option<&str>) -> Vec<(&'static str, String)> {
    match before {
        Some(bound) => vec![("before", bound.to_string())],
        None => Vec::new(),
    }
}

/// Response of `POST /api/upload`.
#[derive(Debug, serde::Deserialize)]
struct UploadResponse {
    filepath: String,
}

#[async_trait]
impl MaintenanceApi for HttpMaintenanceClient {
    async fn list_priorities(&self) -> Result<Vec<MaintenancePriority>> {
        self.get_json("api/maintenance/priorities", &[]).await
    }

    async fn create_ticket(&self, new: &NewTicket) -> Result<Ticket> {
        self.post_json("api/maintenance", &serde_json::to_value(new)?)
            .await
    }

    async fn list_assigned(&self, operator_account_id: u64) -> Result<Vec<Ticket>> {
        self.get_json(
            "api/maintenance",
            &[("assigned_to", operator_account_id.to_string())],
        )
        .await
    }

    async fn list_created_by(
        &self,
        requester_account_id: u64,
        status: Option<TicketStatus>,
    ) -> Result<Vec<Ticket>> {
        let mut query = vec![("created_by", requester_account_id.to_string())];
        if let Some(status) = status {
            query.push(("status", status.as_wire().to_string()));
        }
        self.get_json("api/maintenance", &query).await
    }

    async fn cancelled_history(&self, operator_account_id: u64) -> Result<Vec<Ticket>> {
        self.get_json(
            "api/maintenance/operator-cancelled-history",
            &[("operator_account_id", operator_account_id.to_string())],
        )
        .await
    }

    async fn accept_ticket(&self, ticket_id: u64, operator_account_id: u64) -> Result<Ticket> {
        self.put_json(
            &format!("api/maintenance/{ticket_id}/ongoing"),
            &json!({ "operator_account_id": operator_account_id }),
        )
        .await
    }

    async fn mark_for_verification(
        &self,
        ticket_id: u64,
        operator_account_id: u64,
    ) -> Result<Ticket> {
        self.put_json(
            &format!("api/maintenance/{ticket_id}/for-verification"),
            &json!({ "operator_account_id": operator_account_id }),
        )
        .await
    }

    async fn request_cancel(
        &self,
        ticket_id: u64,
        actor_account_id: u64,
        reason: &str,
    ) -> Result<Ticket> {
        self.put_json(
            &format!("api/maintenance/{ticket_id}/cancel"),
            &json!({ "actor_account_id": actor_account_id, "reason": reason }),
        )
        .await
    }

    async fn list_remarks(&self, ticket_id: u64, before: Option<&str>) -> Result<Vec<Remark>> {
        self.get_json(
            &format!("api/maintenance/{ticket_id}/remarks"),
            &before_query(before),
        )
        .await
    }

    async fn create_remark(
        &self,
        ticket_id: u64,
        actor_account_id: u64,
        text: &str,
    ) -> Result<Remark> {
        self.post_json(
            &format!("api/maintenance/{ticket_id}/remarks"),
            &json!({ "Created_by": actor_account_id, "Remark_text": text }),
        )
        .await
    }

    async fn list_attachments(
        &self,
        ticket_id: u64,
        before: Option<&str>,
    ) -> Result<Vec<Attachment>> {
        self.get_json(
            &format!("api/maintenance/{ticket_id}/attachments"),
            &before_query(before),
        )
        .await
    }

    async fn create_attachment(
        &self,
        ticket_id: u64,
        meta: &NewAttachment,
    ) -> Result<Attachment> {
        self.post_json(
            &format!("api/maintenance/{ticket_id}/attachments"),
            &serde_json::to_value(meta)?,
        )
        .await
    }

    async fn list_events(&self, ticket_id: u64, before: Option<&str>) -> Result<Vec<Event>> {
        self.get_json(
            &format!("api/maintenance/{ticket_id}/events"),
            &before_query(before),
        )
        .await
    }

    async fn upload_file(&self, staged: &PendingAttachment) -> Result<String> {
        let bytes = tokio::fs::read(&staged.local_path).await?;
        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(staged.display_name.clone())
            .mime_str(&staged.mime_type)?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let url = self.endpoint("api/upload")?;
        tracing::debug!("POST api/upload ({})", staged.display_name);
        let response = self.send(self.client.post(url).multipart(form)).await?;
        let upload: UploadResponse = response.json().await?;
        Ok(upload.filepath)
    }
}
