//! Index naming and mapping for the log index.

use chrono::{DateTime, Utc};

/// Compute the index name for the given instant: the base name, or
/// `base-YYYYMMDD` (UTC) when daily rotation is on.
pub(crate) fn index_name(base: &str, daily: bool, now: DateTime<Utc>) -> String {
    if daily {
        format!("{base}-{}", now.format("%Y%m%d"))
    } else {
        base.to_owned()
    }
}

/// Settings and mappings body used when creating the log index.
///
/// One shard; classifier fields are indexed keywords, error payload fields
/// are stored unindexed, and indexing of the message text is configurable.
/// Kept under the legacy `log_message` mapping type to match the wire
/// behavior of existing deployments.
pub(crate) fn mapping_body(index_message: bool) -> serde_json::Value {
    serde_json::json!({
        "settings": {
            "number_of_shards": "1"
        },
        "mappings": {
            "log_message": {
                "properties": {
                    "time":           { "type": "date", "index": true },
                    "source":         { "type": "keyword", "index": true },
                    "level":          { "type": "keyword", "index": true },
                    "correlation_id": { "type": "text", "index": true },
                    "error": {
                        "type": "object",
                        "properties": {
                            "type":           { "type": "keyword", "index": true },
                            "category":       { "type": "keyword", "index": true },
                            "status":         { "type": "integer", "index": false },
                            "code":           { "type": "keyword", "index": true },
                            "message":        { "type": "text", "index": false },
                            "details":        { "type": "object" },
                            "correlation_id": { "type": "text", "index": false },
                            "cause":          { "type": "text", "index": false },
                            "stack_trace":    { "type": "text", "index": false }
                        }
                    },
                    "message": { "type": "text", "index": index_message }
                }
            }
        }
    })
}
