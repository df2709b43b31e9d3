use serde::{Deserialize, Serialize};

/// A composed notice, written to the outbox directory as one JSON document.
/// The outbox is the hand-off point for an external SMTP relay.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    pub id: String,
    pub recipients: Vec<String>,
    pub subject: String,
    pub message: String,
    pub html_body: String,
    pub attachment_url: Option<String>,
    /// Unix timestamp (seconds) at composition time.
    pub queued_at: u64,
}
