use anyhow::Context;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::dto::RowData;
use super::model::SheetRow;

/// Payload forwarded to the webhook. The webhook performs the write and is
/// expected to check that `user_email` owns `row`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RowUpdate {
    pub action: &'static str,
    pub row: SheetRow,
    pub data: RowData,
    pub user_email: String,
}

impl RowUpdate {
    pub fn new(row: SheetRow, data: RowData, user_email: String) -> Self {
        Self {
            action: "update",
            row,
            data,
            user_email,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WebhookReply {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}

/// External endpoint that applies row updates to the sheet.
#[async_trait]
pub trait RowWebhook: Send + Sync {
    async fn forward(&self, update: &RowUpdate) -> anyhow::Result<WebhookReply>;
}

pub struct AppsScriptWebhook {
    http: reqwest::Client,
    url: String,
}

impl AppsScriptWebhook {
    pub fn new(http: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            http,
            url: url.into(),
        }
    }
}

#[async_trait]
impl RowWebhook for AppsScriptWebhook {
    async fn forward(&self, update: &RowUpdate) -> anyhow::Result<WebhookReply> {
        let resp = self
            .http
            .post(&self.url)
            .json(update)
            .send()
            .await
            .context("forward update to Apps Script")?;

        let status = resp.status();
        let reply: WebhookReply = resp
            .json()
            .await
            .with_context(|| format!("decode Apps Script reply (HTTP {status})"))?;
        debug!(%status, success = reply.success, "Apps Script replied");
        if reply.success && !status.is_success() {
            anyhow::bail!("Apps Script reported success with HTTP {status}");
        }
        Ok(reply)
    }
}
