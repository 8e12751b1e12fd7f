use anyhow::Context;
use async_trait::async_trait;
use tracing::debug;

/// Where the sheet's CSV text comes from.
#[async_trait]
pub trait SheetSource: Send + Sync {
    async fn fetch_csv(&self) -> anyhow::Result<String>;
}

/// Public CSV export, fetched without credentials.
pub struct CsvExport {
    http: reqwest::Client,
    url: String,
}

impl CsvExport {
    pub fn new(http: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            http,
            url: url.into(),
        }
    }
}

#[async_trait]
impl SheetSource for CsvExport {
    async fn fetch_csv(&self) -> anyhow::Result<String> {
        let resp = self
            .http
            .get(&self.url)
            .send()
            .await
            .context("request sheet export")?;

        let status = resp.status();
        if !status.is_success() {
            anyhow::bail!("sheet export returned {status}");
        }

        let text = resp.text().await.context("read sheet export body")?;
        debug!(bytes = text.len(), "sheet export fetched");
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::get, Router};

    async fn spawn_export() -> String {
        let app = Router::new()
            .route("/export", get(|| async { "email,name\r\na@x.com,A\r\n" }))
            .route("/private", get(|| async { (StatusCode::FORBIDDEN, "no") }));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn loopback_client() -> reqwest::Client {
        reqwest::Client::builder().no_proxy().build().unwrap()
    }

    #[tokio::test]
    async fn fetches_export_text() {
        let base = spawn_export().await;
        let source = CsvExport::new(loopback_client(), format!("{base}/export"));
        let text = source.fetch_csv().await.expect("fetch");
        assert_eq!(text, "email,name\r\na@x.com,A\r\n");
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let base = spawn_export().await;
        let source = CsvExport::new(loopback_client(), format!("{base}/private"));
        let err = source.fetch_csv().await.unwrap_err();
        assert!(err.to_string().contains("403"));
    }
}
