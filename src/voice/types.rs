use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Lifecycle state of a call as reported by the voice provider.
///
/// Unknown values are kept verbatim in `Other` so they can still be shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CallState {
    Queued,
    Ringing,
    InProgress,
    Completed,
    Failed,
    Busy,
    NoAnswer,
    Other(String),
}

impl CallState {
    pub fn as_str(&self) -> &str {
        match self {
            CallState::Queued => "queued",
            CallState::Ringing => "ringing",
            CallState::InProgress => "in-progress",
            CallState::Completed => "completed",
            CallState::Failed => "failed",
            CallState::Busy => "busy",
            CallState::NoAnswer => "no-answer",
            CallState::Other(s) => s,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, CallState::Completed)
    }
}

impl From<String> for CallState {
    fn from(value: String) -> Self {
        match value.as_str() {
            "queued" => CallState::Queued,
            "ringing" => CallState::Ringing,
            "in-progress" => CallState::InProgress,
            "completed" => CallState::Completed,
            "failed" => CallState::Failed,
            "busy" => CallState::Busy,
            "no-answer" => CallState::NoAnswer,
            _ => CallState::Other(value),
        }
    }
}

impl From<CallState> for String {
    fn from(value: CallState) -> Self {
        match value {
            CallState::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for CallState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Who spoke a transcript line. Roles other than the two parties
/// (system prompts, tool output) are kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Speaker {
    Assistant,
    Customer,
    Other(String),
}

impl From<String> for Speaker {
    fn from(value: String) -> Self {
        match value.as_str() {
            "assistant" | "bot" => Speaker::Assistant,
            "customer" | "user" => Speaker::Customer,
            _ => Speaker::Other(value),
        }
    }
}

impl From<Speaker> for String {
    fn from(value: Speaker) -> Self {
        match value {
            Speaker::Assistant => "assistant".to_string(),
            Speaker::Customer => "customer".to_string(),
            Speaker::Other(s) => s,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub role: Speaker,
    #[serde(default)]
    pub text: String,
}

/// Treats an explicit `null` list the same as a missing one.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    #[serde(default)]
    pub number: Option<String>,
}

/// One call as owned by the voice provider. Read-only on this side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallRecord {
    #[serde(alias = "id")]
    pub call_id: String,
    #[serde(default)]
    pub customer: Option<Customer>,
    pub status: CallState,
    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default, rename = "type")]
    pub call_type: Option<String>,
    #[serde(default)]
    pub ended_reason: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub transcript: Vec<TranscriptEntry>,
    #[serde(default)]
    pub recording_url: Option<String>,
}

impl CallRecord {
    pub fn customer_number(&self) -> Option<&str> {
        self.customer.as_ref().and_then(|c| c.number.as_deref())
    }

    /// `startedAt` when the provider set it, otherwise `startTime`.
    pub fn started(&self) -> Option<DateTime<Utc>> {
        self.started_at.or(self.start_time)
    }
}

/// What the provider tells us about a call it just created.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CreatedCall {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub status: Option<CallState>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_call_state_known_values() {
        for raw in [
            "queued",
            "ringing",
            "in-progress",
            "completed",
            "failed",
            "busy",
            "no-answer",
        ] {
            let state = CallState::from(raw.to_string());
            assert!(!matches!(state, CallState::Other(_)), "{raw} parsed as Other");
            assert_eq!(state.as_str(), raw);
        }
    }

    #[test]
    fn test_call_state_unknown_is_preserved() {
        let state: CallState = serde_json::from_str("\"forwarding\"").unwrap();
        assert_eq!(state, CallState::Other("forwarding".to_string()));
        assert_eq!(serde_json::to_string(&state).unwrap(), "\"forwarding\"");
    }

    #[test]
    fn test_call_record_full() {
        let json = r#"{
            "callId": "c1",
            "customer": { "number": "+919876543210" },
            "status": "completed",
            "startedAt": "2026-10-18T10:00:00Z",
            "type": "outboundPhoneCall",
            "endedReason": "customer-ended-call",
            "transcript": [
                { "role": "assistant", "text": "Hello!" },
                { "role": "customer", "text": "Hi." }
            ],
            "recordingUrl": "https://example.com/rec.mp3"
        }"#;
        let record: CallRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.call_id, "c1");
        assert_eq!(record.customer_number(), Some("+919876543210"));
        assert!(record.status.is_completed());
        assert_eq!(record.call_type.as_deref(), Some("outboundPhoneCall"));
        assert_eq!(record.transcript.len(), 2);
        assert_eq!(record.transcript[0].role, Speaker::Assistant);
        assert_eq!(record.transcript[1].text, "Hi.");
        assert!(record.started().is_some());
    }

    #[test]
    fn test_call_record_sparse_provider_shape() {
        // The provider's list endpoint uses `id` and omits most optionals
        let json = r#"{ "id": "abc", "status": "queued" }"#;
        let record: CallRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.call_id, "abc");
        assert_eq!(record.customer_number(), None);
        assert_eq!(record.status, CallState::Queued);
        assert!(record.transcript.is_empty());
        assert!(record.started().is_none());
        assert!(record.recording_url.is_none());
    }

    #[test]
    fn test_call_record_null_transcript_is_empty() {
        let json = r#"{ "id": "in_flight", "status": "ringing", "transcript": null }"#;
        let record: CallRecord = serde_json::from_str(json).unwrap();
        assert!(record.transcript.is_empty());
    }

    #[test]
    fn test_unknown_speaker_is_preserved() {
        let json = r#"{
            "id": "c4",
            "status": "completed",
            "transcript": [
                { "role": "system", "text": "You are a helpful assistant." },
                { "role": "bot", "text": "Hello!" },
                { "role": "user" }
            ]
        }"#;
        let record: CallRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.transcript[0].role, Speaker::Other("system".to_string()));
        assert_eq!(record.transcript[1].role, Speaker::Assistant);
        assert_eq!(record.transcript[2].role, Speaker::Customer);
        assert!(record.transcript[2].text.is_empty());
    }

    #[test]
    fn test_started_prefers_started_at() {
        let json = r#"{
            "callId": "c2",
            "status": "ringing",
            "startTime": "2026-10-18T09:00:00Z",
            "startedAt": "2026-10-18T09:00:05Z"
        }"#;
        let record: CallRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.started(), record.started_at);

        let json = r#"{ "callId": "c3", "status": "ringing", "startTime": "2026-10-18T09:00:00Z" }"#;
        let record: CallRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.started(), record.start_time);
    }

    #[test]
    fn test_created_call_tolerates_extra_fields() {
        let json = r#"{ "id": "new-call", "status": "queued", "orgId": "o1", "cost": 0 }"#;
        let created: CreatedCall = serde_json::from_str(json).unwrap();
        assert_eq!(created.id.as_deref(), Some("new-call"));
        assert_eq!(created.status, Some(CallState::Queued));
    }
}
