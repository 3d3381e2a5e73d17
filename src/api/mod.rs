use serde::{Deserialize, Serialize};

#[derive(Serialize, Clone, Debug)]
pub struct ChatRequest {
    pub query: String,
}

/// Reply envelope returned by `POST /chat`.
///
/// Backends disagree about which field carries the reply text; the widget
/// this client replaces accepted `reply`, `message`, or `response`, so all
/// three are modeled and [`ChatReply::text`] picks the first one present.
#[derive(Deserialize, Debug, Default)]
pub struct ChatReply {
    pub reply: Option<String>,
    pub message: Option<String>,
    pub response: Option<String>,
    #[serde(default)]
    pub sources: Vec<String>,
}

impl ChatReply {
    pub fn text(&self) -> Option<&str> {
        self.reply
            .as_deref()
            .or(self.message.as_deref())
            .or(self.response.as_deref())
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct UploadResponse {
    pub message: Option<String>,
    #[serde(rename = "fileName")]
    pub file_name: Option<String>,
    #[serde(rename = "fileId")]
    pub file_id: Option<String>,
}

/// Pull a human-readable message out of an HTTP error body.
///
/// Error payloads are JSON carrying `message` or `error` (a string, or an
/// object with its own `message`); anything else yields `None`.
pub fn error_summary(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    let value: serde_json::Value = serde_json::from_str(trimmed).ok()?;

    let summary = value
        .get("message")
        .and_then(|v| v.as_str().map(str::to_owned))
        .or_else(|| match value.get("error") {
            Some(serde_json::Value::String(s)) => Some(s.clone()),
            Some(serde_json::Value::Object(map)) => map
                .get("message")
                .and_then(|message| message.as_str().map(str::to_owned)),
            _ => None,
        })?;

    if summary.trim().is_empty() {
        return None;
    }
    // Collapse internal whitespace so multi-line payloads stay on one line.
    Some(summary.split_whitespace().collect::<Vec<_>>().join(" "))
}

/// [`error_summary`] with the chat endpoint's status-line fallback.
pub fn extract_error_message(body: &str, status: u16) -> String {
    error_summary(body).unwrap_or_else(|| format!("HTTP error! Status: {status}"))
}
