pub mod provider;
pub mod providers;
pub mod types;

pub use provider::{CallProvider, CallRequest, ProviderError};
pub use providers::{VapiProvider, build_provider};
pub use types::{CallRecord, CallState, CreatedCall, Customer, Speaker, TranscriptEntry};
