use std::fmt;

use async_trait::async_trait;

use super::types::{CallRecord, CreatedCall};

/// Errors that can occur while talking to a voice provider.
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderError {
    /// Provider misconfigured (missing API key or identifiers).
    Config(String),
    /// The request never completed (DNS, connection refused, reset).
    Network(String),
    /// The provider answered with a non-2xx status.
    /// `message` is the provider's own explanation, when it sent one.
    Api { status: u16, message: Option<String> },
    /// A 2xx body we could not make sense of.
    Parse(String),
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderError::Config(msg) => write!(f, "config error: {msg}"),
            ProviderError::Network(msg) => write!(f, "network error: {msg}"),
            ProviderError::Api {
                status,
                message: Some(message),
            } => write!(f, "API error (HTTP {status}): {message}"),
            ProviderError::Api {
                status,
                message: None,
            } => write!(f, "API error (HTTP {status})"),
            ProviderError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for ProviderError {}

/// Everything a provider needs to originate one outbound call.
/// Assistant and phone-number identifiers belong to the provider's own config.
pub struct CallRequest<'a> {
    /// Destination in dialable form (`+<country><number>`).
    pub customer_number: &'a str,
}

#[async_trait]
pub trait CallProvider: Send + Sync {
    /// Returns the name of the provider.
    fn name(&self) -> &str;

    /// Issues exactly one call-creation request. No retries.
    async fn create_call(&self, request: CallRequest<'_>) -> Result<CreatedCall, ProviderError>;

    /// Fetches up to `limit` recent calls, in the order the provider returns them.
    async fn list_calls(&self, limit: u32) -> Result<Vec<CallRecord>, ProviderError>;
}
