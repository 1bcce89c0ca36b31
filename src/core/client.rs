use crate::domain::model::{
    Profile, Quote, QuoteRequest, Recipient, RecipientDetails, Transfer, TransferRequest,
};
use crate::domain::ports::PayoutApi;
use crate::utils::error::{PayoutError, Result};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

const TRACE_ID_HEADER: &str = "x-trace-id";

/// Authenticated JSON client for the provider's sandbox API.
///
/// Every non-success response becomes `PayoutError::Upstream` carrying the
/// HTTP status, the provider's trace id, and the verbatim body, so a failed
/// run can be escalated to provider support without re-running anything.
pub struct SandboxClient {
    client: Client,
    base_url: String,
    api_token: String,
}

impl SandboxClient {
    pub fn new(base_url: impl Into<String>, api_token: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            base_url,
            api_token: api_token.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        tracing::debug!("GET {}", path);
        let response = self
            .client
            .get(self.url(path))
            .header("Content-Type", "application/json")
            .bearer_auth(&self.api_token)
            .send()
            .await?;
        Self::decode(path, response).await
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        tracing::debug!("POST {}", path);
        let response = self
            .client
            .post(self.url(path))
            .bearer_auth(&self.api_token)
            .json(body)
            .send()
            .await?;
        Self::decode(path, response).await
    }

    async fn decode<T: DeserializeOwned>(path: &str, response: Response) -> Result<T> {
        let status = response.status();
        tracing::debug!("{} responded with status {}", path, status);

        if status.is_success() {
            return Ok(response.json().await?);
        }

        let trace_id = response
            .headers()
            .get(TRACE_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.text().await.unwrap_or_default();

        tracing::error!(
            "{} failed: status {}, trace id {}, body: {}",
            path,
            status.as_u16(),
            trace_id.as_deref().unwrap_or("unknown"),
            body
        );

        Err(PayoutError::Upstream {
            status: status.as_u16(),
            trace_id,
            body,
        })
    }
}

#[async_trait]
impl PayoutApi for SandboxClient {
    async fn list_profiles(&self) -> Result<Vec<Profile>> {
        self.get_json("/v2/profiles").await
    }

    async fn create_quote(&self, profile_id: i64, request: &QuoteRequest) -> Result<Quote> {
        self.post_json(&format!("/v3/profiles/{}/quotes", profile_id), request)
            .await
    }

    async fn create_recipient(&self, request: &RecipientDetails) -> Result<Recipient> {
        self.post_json("/v1/accounts", request).await
    }

    async fn create_transfer(&self, request: &TransferRequest) -> Result<Transfer> {
        self.post_json("/v1/transfers", request).await
    }
}
