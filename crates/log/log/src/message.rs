use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::level::LogLevel;

/// Structured description of an error attached to a log message.
///
/// Mirrors the document shape indexed under the `error` field: the
/// discriminating `type` plus category, status and code classifiers, the
/// human-readable message, free-form details, and the captured cause chain.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ErrorDescription {
    /// Error type discriminator (serialized as `type`).
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Broad category (e.g. `Unknown`, `Misconfiguration`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// HTTP-like status code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<i64>,
    /// Machine-readable error code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Human-readable error message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Free-form structured details.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    /// Correlation id of the failed operation, when distinct from the message's.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<String>,
    /// Rendered source-error chain.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cause: Option<String>,
    /// Captured stack trace, when available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack_trace: Option<String>,
}

impl ErrorDescription {
    /// Build a description from any error, capturing the display message and
    /// the rendered source chain as `cause`.
    pub fn from_error(error: &(dyn std::error::Error + 'static)) -> Self {
        let mut cause = None;
        let mut source = error.source();
        let mut rendered = Vec::new();
        while let Some(inner) = source {
            rendered.push(inner.to_string());
            source = inner.source();
        }
        if !rendered.is_empty() {
            cause = Some(rendered.join(": "));
        }

        Self {
            kind: Some("Unknown".to_owned()),
            category: Some("Unknown".to_owned()),
            status: Some(500),
            code: Some("UNKNOWN".to_owned()),
            message: Some(error.to_string()),
            cause,
            ..Self::default()
        }
    }
}

/// A single buffered log message, serialized verbatim into the index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogMessage {
    /// When the message was produced (UTC).
    pub time: DateTime<Utc>,
    /// Source (context) name of the producing component.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Severity of the message.
    pub level: LogLevel,
    /// Transaction id tracing execution through the call chain.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<String>,
    /// Attached error description, for `Error`/`Fatal` messages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorDescription>,
    /// Message text.
    pub message: String,
}
