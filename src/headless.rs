//! `--dial` mode: one submission through the reducer, no terminal UI.

use std::process::ExitCode;
use std::sync::Arc;

use log::info;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::{App, CallStatus};
use crate::effects;
use crate::voice::CallProvider;

/// Submit `raw_number` once and wait for the provider's answer.
///
/// Returns the final status, which is `Error` for both invalid input and
/// a failed request.
pub async fn dial_once(app: &mut App, raw_number: &str) -> CallStatus {
    if let Effect::PlaceCall { request_id, number } =
        update(app, Action::Submit(raw_number.to_string()))
    {
        let action = effects::place_call(app.provider.as_ref(), request_id, &number).await;
        // ClearInput has nothing to clear here
        update(app, action);
    }
    app.status.clone()
}

/// Dial, print the user-facing message and map the outcome to an exit code.
pub async fn run(
    config: &ResolvedConfig,
    provider: Arc<dyn CallProvider>,
    raw_number: &str,
) -> ExitCode {
    let mut app = App::from_config(provider, config);
    let status = dial_once(&mut app, raw_number).await;
    info!("Headless dial finished: {:?}", status);

    match status {
        CallStatus::Success(message) => {
            println!("{message}");
            ExitCode::SUCCESS
        }
        CallStatus::Error(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
        CallStatus::Idle | CallStatus::Loading => ExitCode::FAILURE,
    }
}
