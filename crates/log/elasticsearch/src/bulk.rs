//! Bulk request body formatting.

use logship_log::{LogError, LogMessage};
use uuid::Uuid;

/// Serialize a batch into one newline-delimited bulk body: per message, an
/// `index` action line naming the target index and a fresh id, followed by
/// the JSON-encoded document.
pub(crate) fn bulk_body(index: &str, messages: &[LogMessage]) -> Result<String, LogError> {
    let mut buf = String::new();
    for message in messages {
        let action = serde_json::json!({
            "index": {
                "_index": index,
                "_type": "log_message",
                "_id": Uuid::new_v4().simple().to_string(),
            }
        });
        buf.push_str(
            &serde_json::to_string(&action).map_err(|e| LogError::Serialization(e.to_string()))?,
        );
        buf.push('\n');
        buf.push_str(
            &serde_json::to_string(message).map_err(|e| LogError::Serialization(e.to_string()))?,
        );
        buf.push('\n');
    }
    Ok(buf)
}
