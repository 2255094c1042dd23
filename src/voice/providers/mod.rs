pub mod vapi;

pub use vapi::VapiProvider;

use std::sync::Arc;

use crate::core::config::ResolvedConfig;
use crate::voice::{CallProvider, ProviderError};

/// Build the call provider from resolved credentials.
///
/// Fails with `ProviderError::Config` naming the first missing setting.
pub fn build_provider(config: &ResolvedConfig) -> Result<Arc<dyn CallProvider>, ProviderError> {
    let api_key = config.api_key.clone().ok_or_else(|| {
        ProviderError::Config(
            "Vapi API key is not set (config file [vapi] api_key or VAPI_API_KEY)".to_string(),
        )
    })?;
    let assistant_id = config.assistant_id.clone().ok_or_else(|| {
        ProviderError::Config(
            "assistant id is not set (--assistant-id, VAPI_ASSISTANT_ID or [vapi] assistant_id)"
                .to_string(),
        )
    })?;
    let phone_number_id = config.phone_number_id.clone().ok_or_else(|| {
        ProviderError::Config(
            "phone number id is not set (--phone-number-id, VAPI_PHONE_NUMBER_ID or [vapi] phone_number_id)"
                .to_string(),
        )
    })?;

    Ok(Arc::new(VapiProvider::new(
        api_key,
        config.base_url.clone(),
        assistant_id,
        phone_number_id,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{DEFAULT_HISTORY_LIMIT, DEFAULT_VAPI_BASE_URL};

    fn resolved() -> ResolvedConfig {
        ResolvedConfig {
            api_key: Some("key".to_string()),
            base_url: DEFAULT_VAPI_BASE_URL.to_string(),
            assistant_id: Some("asst".to_string()),
            phone_number_id: Some("pn".to_string()),
            history_limit: DEFAULT_HISTORY_LIMIT,
            fetch_history_on_start: true,
        }
    }

    #[test]
    fn test_build_provider_with_credentials() {
        let provider = build_provider(&resolved()).unwrap();
        assert_eq!(provider.name(), "vapi");
    }

    #[test]
    fn test_missing_api_key_is_config_error() {
        let mut config = resolved();
        config.api_key = None;
        match build_provider(&config) {
            Err(ProviderError::Config(msg)) => assert!(msg.contains("API key")),
            Err(other) => panic!("Expected Config error, got {:?}", other),
            Ok(_) => panic!("Expected Config error"),
        }
    }

    #[test]
    fn test_missing_phone_number_id_is_config_error() {
        let mut config = resolved();
        config.phone_number_id = None;
        assert!(matches!(
            build_provider(&config),
            Err(ProviderError::Config(_))
        ));
    }
}
