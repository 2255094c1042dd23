//! Runs the effects that need I/O and turns their outcome back into an `Action`.
//!
//! Shared by the TUI event loop (which spawns these on tokio) and the
//! headless `--dial` mode (which awaits them directly).

use log::debug;

use crate::core::action::Action;
use crate::voice::{CallProvider, CallRequest};

/// Sends one call-creation request. The result carries `request_id` back so
/// the reducer can ignore answers to requests it no longer waits for.
pub async fn place_call(provider: &dyn CallProvider, request_id: u64, number: &str) -> Action {
    debug!("Call request #{} via {}", request_id, provider.name());
    match provider
        .create_call(CallRequest {
            customer_number: number,
        })
        .await
    {
        Ok(created) => Action::CallPlaced {
            request_id,
            call_id: created.id,
        },
        Err(error) => Action::CallFailed { request_id, error },
    }
}

pub async fn fetch_history(provider: &dyn CallProvider, limit: u32) -> Action {
    match provider.list_calls(limit).await {
        Ok(calls) => Action::HistoryLoaded(calls),
        Err(error) => Action::HistoryFailed(error),
    }
}
