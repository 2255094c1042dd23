//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Arc;

use async_trait::async_trait;

use crate::voice::{
    CallProvider, CallRecord, CallRequest, CallState, CreatedCall, Customer, ProviderError,
};

/// A no-op provider for tests that don't need real API calls.
pub struct NoopProvider;

#[async_trait]
impl CallProvider for NoopProvider {
    fn name(&self) -> &str {
        "noop"
    }

    async fn create_call(&self, _request: CallRequest<'_>) -> Result<CreatedCall, ProviderError> {
        Ok(CreatedCall::default())
    }

    async fn list_calls(&self, _limit: u32) -> Result<Vec<CallRecord>, ProviderError> {
        Ok(Vec::new())
    }
}

/// Creates a test App with a NoopProvider.
pub fn test_app() -> crate::core::state::App {
    crate::core::state::App::new(Arc::new(NoopProvider), "test-assistant".to_string())
}

/// A minimal call record with a customer number and the given status.
pub fn record(call_id: &str, status: &str) -> CallRecord {
    CallRecord {
        call_id: call_id.to_string(),
        customer: Some(Customer {
            number: Some(format!("+91987654{:04}", call_id.len())),
        }),
        status: CallState::from(status.to_string()),
        start_time: None,
        started_at: None,
        call_type: None,
        ended_reason: None,
        transcript: Vec::new(),
        recording_url: None,
    }
}
