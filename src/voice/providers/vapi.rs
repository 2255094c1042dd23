//! Vapi provider implementation.
//!
//! Two endpoints are used:
//! - `POST /call` originates an outbound phone call through an assistant
//! - `GET /call?limit=N` lists recent calls for the history pane
//!
//! Both are bearer-token authenticated. Errors come back as JSON with a
//! `message` field that is either a string or a list of validation strings.

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::core::phone;
use crate::voice::{CallProvider, CallRecord, CallRequest, CreatedCall, ProviderError};

// ============================================================================
// Vapi API Types
// ============================================================================

#[derive(Serialize, Debug)]
struct CustomerPayload<'a> {
    number: &'a str,
}

/// The request body for `POST /call`
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct CreateCallBody<'a> {
    assistant_id: &'a str,
    phone_number_id: &'a str,
    customer: CustomerPayload<'a>,
}

/// `message` is a plain string for most errors, a list for validation errors.
#[derive(Deserialize, Debug)]
#[serde(untagged)]
enum ErrorMessage {
    One(String),
    Many(Vec<String>),
}

#[derive(Deserialize, Debug)]
struct ErrorBody {
    #[serde(default)]
    message: Option<ErrorMessage>,
}

/// Pulls a user-facing message out of an error response body.
/// Returns None for non-JSON bodies and for empty or missing messages.
fn extract_error_message(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    let message = match parsed.message? {
        ErrorMessage::One(s) => s,
        ErrorMessage::Many(list) => list.join("; "),
    };
    let message = message.trim().to_string();
    if message.is_empty() { None } else { Some(message) }
}

// ============================================================================
// Provider Implementation
// ============================================================================

pub struct VapiProvider {
    api_key: String,
    base_url: String,
    assistant_id: String,
    phone_number_id: String,
    client: reqwest::Client,
}

impl VapiProvider {
    pub fn new(
        api_key: String,
        base_url: String,
        assistant_id: String,
        phone_number_id: String,
    ) -> Self {
        Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            assistant_id,
            phone_number_id,
            client: reqwest::Client::new(),
        }
    }

    fn calls_url(&self) -> String {
        format!("{}/call", self.base_url)
    }

    /// Turns a non-2xx response into `ProviderError::Api`.
    async fn api_error(response: reqwest::Response) -> ProviderError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        warn!("Vapi API error: {} - {}", status, body);
        ProviderError::Api {
            status,
            message: extract_error_message(&body),
        }
    }
}

#[async_trait]
impl CallProvider for VapiProvider {
    fn name(&self) -> &str {
        "vapi"
    }

    async fn create_call(&self, request: CallRequest<'_>) -> Result<CreatedCall, ProviderError> {
        let body = CreateCallBody {
            assistant_id: &self.assistant_id,
            phone_number_id: &self.phone_number_id,
            customer: CustomerPayload {
                number: request.customer_number,
            },
        };

        info!(
            "Vapi create call: assistant={}, number={}",
            self.assistant_id,
            phone::redact(request.customer_number)
        );

        let response = self
            .client
            .post(self.calls_url())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        debug!("Vapi create call status: {}", response.status());

        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }

        // The call exists once we get a 2xx. A body we can't read doesn't undo that.
        let text = response.text().await.unwrap_or_default();
        let created = match serde_json::from_str::<CreatedCall>(&text) {
            Ok(created) => created,
            Err(e) => {
                warn!("Could not parse create call response ({}): {}", e, text);
                CreatedCall::default()
            }
        };
        info!(
            "Call created: id={}",
            created.id.as_deref().unwrap_or("<none>")
        );
        Ok(created)
    }

    async fn list_calls(&self, limit: u32) -> Result<Vec<CallRecord>, ProviderError> {
        debug!("Vapi list calls: limit={}", limit);

        let response = self
            .client
            .get(self.calls_url())
            .bearer_auth(&self.api_key)
            .query(&[("limit", limit)])
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }

        let calls: Vec<CallRecord> = response
            .json()
            .await
            .map_err(|e| ProviderError::Parse(e.to_string()))?;
        info!("Fetched {} calls", calls.len());
        Ok(calls)
    }
}
