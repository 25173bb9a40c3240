//! Thin Elasticsearch REST wrapper over `reqwest`.

use std::time::Duration;

use logship_log::LogError;

/// HTTP client for the handful of Elasticsearch endpoints the logger uses.
pub(crate) struct EsClient {
    http: reqwest::Client,
    base_url: String,
    max_retries: u32,
}

impl EsClient {
    /// Build the client with the configured request timeout, idle-connection
    /// timeout and retry budget.
    pub(crate) fn new(
        base_url: &str,
        timeout_ms: u64,
        reconnect_ms: u64,
        max_retries: u32,
    ) -> Result<Self, LogError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .pool_idle_timeout(Duration::from_millis(reconnect_ms))
            .build()
            .map_err(|e| LogError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_owned(),
            max_retries,
        })
    }

    /// Whether the index exists (`HEAD /{index}`).
    pub(crate) async fn index_exists(&self, index: &str) -> Result<bool, LogError> {
        let url = format!("{}/{index}", self.base_url);
        let resp = self.send_with_retry(|| self.http.head(&url)).await?;
        Ok(resp.status().is_success())
    }

    /// Create the index with the given settings/mappings body
    /// (`PUT /{index}`). A remote `resource_already_exists` error counts as
    /// success; other remote errors are returned wrapped.
    pub(crate) async fn create_index(
        &self,
        index: &str,
        body: &serde_json::Value,
    ) -> Result<(), LogError> {
        let url = format!("{}/{index}", self.base_url);
        let resp = self
            .send_with_retry(|| self.http.put(&url).json(body))
            .await?;

        if resp.status().is_success() {
            return Ok(());
        }

        match remote_error(resp).await {
            LogError::Remote { kind, reason } => {
                if kind.contains("resource_already_exists") {
                    Ok(())
                } else {
                    Err(LogError::Remote { kind, reason })
                }
            }
            other => Err(other),
        }
    }

    /// Issue one bulk request (`POST /{index}/_bulk`) with a
    /// newline-delimited body.
    pub(crate) async fn bulk(
        &self,
        index: &str,
        body: String,
    ) -> Result<reqwest::Response, LogError> {
        let url = format!("{}/{index}/_bulk", self.base_url);
        self.send_with_retry(|| {
            self.http
                .post(&url)
                .header(reqwest::header::CONTENT_TYPE, "application/x-ndjson")
                .body(body.clone())
        })
        .await
    }

    /// Send a request, retrying transport-level failures up to the
    /// configured attempt budget.
    async fn send_with_retry<F>(&self, build: F) -> Result<reqwest::Response, LogError>
    where
        F: Fn() -> reqwest::RequestBuilder,
    {
        let attempts = self.max_retries.max(1);
        let mut last = String::new();
        for attempt in 1..=attempts {
            match build().send().await {
                Ok(resp) => return Ok(resp),
                Err(e) => {
                    last = e.to_string();
                    tracing::debug!(attempt, error = %last, "elasticsearch request failed");
                }
            }
        }
        Err(LogError::Transport(last))
    }
}

// ---------------------------------------------------------------------------
// Elasticsearch response types (internal)
// ---------------------------------------------------------------------------

#[derive(serde::Deserialize)]
struct ErrorResponse {
    error: RemoteError,
}

#[derive(serde::Deserialize)]
struct RemoteError {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    reason: String,
}

/// Turn a non-success response into a [`LogError::Remote`] carrying the
/// remote error's type and reason, falling back to the raw body when the
/// error object cannot be parsed.
pub(crate) async fn remote_error(resp: reqwest::Response) -> LogError {
    let status = resp.status();
    let body = resp.text().await.unwrap_or_default();
    match serde_json::from_str::<ErrorResponse>(&body) {
        Ok(parsed) => LogError::Remote {
            kind: parsed.error.kind,
            reason: parsed.error.reason,
        },
        Err(_) => LogError::Remote {
            kind: status.to_string(),
            reason: body,
        },
    }
}
