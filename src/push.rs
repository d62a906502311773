//! HTTP sender for Dashing widget endpoints.

use reqwest::Client;
use tracing::{debug, info};

use crate::error::PushError;
use crate::payload::Payload;

/// Posts payloads to `base_url + widget`.
///
/// The base URL is used verbatim, so it normally ends with `/widgets/`.
#[derive(Debug, Clone)]
pub struct PushClient {
    base_url: String,
    client: Client,
}

impl PushClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Reuse an existing reqwest client (shared connection pool).
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        Self {
            base_url: base_url.into(),
            client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn widget_url(&self, widget: &str) -> String {
        format!("{}{}", self.base_url, widget)
    }

    /// Send `payload` to `widget` as a single JSON POST.
    ///
    /// # Returns
    /// - `Ok(())` on any 2xx answer. The body is not read.
    /// - `Err(PushError::EmptyWidgetName)` before any I/O when `widget` is blank.
    /// - `Err(PushError::Transport)` on connect / DNS / TLS failure.
    /// - `Err(PushError::RemoteRejected)` on a non-2xx answer.
    pub async fn push(&self, widget: &str, payload: &Payload) -> Result<(), PushError> {
        if widget.trim().is_empty() {
            return Err(PushError::EmptyWidgetName);
        }

        let url = self.widget_url(widget);
        debug!(%url, "pushing widget payload");

        let resp = self
            .client
            .post(&url)
            .json(payload)
            .send()
            .await
            .map_err(|e| PushError::Transport {
                url: url.clone(),
                detail: e.to_string(),
            })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(PushError::RemoteRejected {
                status: status.as_u16(),
                url,
            });
        }

        info!(widget, status = status.as_u16(), "widget updated");
        Ok(())
    }
}
