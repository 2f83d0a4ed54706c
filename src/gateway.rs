//! Backend gateway for the financial-aggregation API
//!
//! Single chokepoint for all backend communication: issues POST requests to
//! the configured base URL, classifies error responses into typed failure
//! categories, and hands parsed JSON back to callers.
//! Uses a long-lived reqwest::Client for connection pooling.

use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::{error, info, warn};

use crate::config::GatewayConfig;
use crate::error::GatewayError;
use crate::models::{ChatReply, FinancialSummary};

/// Marker the backend puts in a 401 body when an external login is needed.
const AUTH_REQUIRED_MARKER: &str = "Authentication required";
/// Per-status-code substring the backend uses for rejected session ids.
const INVALID_SESSION_MARKER: &str = "Invalid session ID";

pub const CHAT_ENDPOINT: &str = "/chat";
pub const FINANCIAL_SUMMARY_ENDPOINT: &str = "/getFinancialSummary";

/// Error body shape for non-2xx responses: `{error, login_url?}`.
#[derive(Debug, serde::Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    login_url: Option<String>,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    message: &'a str,
    #[serde(rename = "userId")]
    user_id: &'a str,
}

#[derive(Debug, Serialize)]
struct SummaryRequest<'a> {
    #[serde(rename = "userId")]
    user_id: &'a str,
}

/// Reusable backend client (connection-pooled).
///
/// No retries, no caching: each call is one round trip, and the caller
/// decides what to do with a classified failure.
pub struct BackendGateway {
    client: Client,
    base_url: String,
}

impl BackendGateway {
    pub fn new(config: GatewayConfig) -> crate::Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|e| GatewayError::Transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POST `payload` as JSON to `base_url + endpoint`.
    ///
    /// On 2xx the parsed JSON body is returned unchanged; no schema
    /// validation happens here. Non-2xx responses are classified into
    /// `AuthRequired`, `InvalidSession`, or `Http`; a missing response is
    /// `Transport`.
    pub async fn call(&self, endpoint: &str, payload: &Value) -> crate::Result<Value> {
        let url = format!("{}{}", self.base_url, endpoint);
        info!(endpoint, "Calling backend");

        let response = self
            .client
            .post(&url)
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                error!(endpoint, "Backend request failed: {}", e);
                GatewayError::Transport(e.to_string())
            })?;

        let status = response.status();
        if status.is_success() {
            let body: Value = response.json().await.map_err(|e| {
                error!(endpoint, "Failed to parse backend response: {}", e);
                GatewayError::MalformedResponse(e.to_string())
            })?;
            return Ok(body);
        }

        let status_code = status.as_u16();
        let body_text = response.text().await.unwrap_or_default();
        warn!(endpoint, status = status_code, "Backend error response");

        Err(classify_failure(status_code, &body_text))
    }

    /// POST `/chat` with `{message, userId}`.
    pub async fn send_chat(&self, message: &str, user_id: &str) -> crate::Result<ChatReply> {
        let payload = serde_json::to_value(ChatRequest { message, user_id })?;
        let body = self.call(CHAT_ENDPOINT, &payload).await?;
        let reply: ChatReply = serde_json::from_value(body)?;
        Ok(reply)
    }

    /// POST `/getFinancialSummary` with `{userId}`.
    pub async fn fetch_financial_summary(
        &self,
        user_id: &str,
    ) -> crate::Result<FinancialSummary> {
        let payload = serde_json::to_value(SummaryRequest { user_id })?;
        let body = self.call(FINANCIAL_SUMMARY_ENDPOINT, &payload).await?;
        let summary: FinancialSummary = serde_json::from_value(body)?;
        Ok(summary)
    }
}

/// Map a non-2xx response to its typed failure.
///
/// A 401 carrying the authentication marker plus a login URL is the
/// recoverable redirect-to-login condition. An "Invalid session ID" message
/// wins over the generic bucket regardless of status code. Everything else
/// keeps the server message, or a fallback keyed by status.
fn classify_failure(status: u16, body_text: &str) -> GatewayError {
    let parsed: Option<ErrorBody> = serde_json::from_str(body_text).ok();
    let error_text = parsed
        .as_ref()
        .and_then(|b| b.error.clone())
        .unwrap_or_default();

    if status == 401 {
        if let Some(login_url) = parsed.as_ref().and_then(|b| b.login_url.clone()) {
            if error_text.contains(AUTH_REQUIRED_MARKER) {
                info!("Backend requires external login");
                return GatewayError::AuthRequired { login_url };
            }
        }
    }

    if error_text.contains(INVALID_SESSION_MARKER) {
        return GatewayError::InvalidSession(error_text);
    }

    let message = if error_text.is_empty() {
        fallback_message(status)
    } else {
        error_text
    };
    GatewayError::Http { status, message }
}

/// Generic user-facing message for a status code when the server gave none.
fn fallback_message(status: u16) -> String {
    match status {
        400 => "Bad request sent to the backend".to_string(),
        401 => "Authentication failed".to_string(),
        403 => "Access to financial data was denied".to_string(),
        404 => "Backend endpoint not found".to_string(),
        500..=599 => "The financial service is temporarily unavailable".to_string(),
        _ => format!("Unexpected backend response (status {})", status),
    }
}
