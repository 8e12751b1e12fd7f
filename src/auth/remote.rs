use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use super::services::{Identity, IdentityProvider};

/// Asks the identity provider's user endpoint who owns a token.
pub struct RemoteIdentity {
    http: reqwest::Client,
    user_url: String,
    api_key: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UserInfo {
    id: String,
    #[serde(default)]
    email: Option<String>,
}

impl RemoteIdentity {
    pub fn new(http: reqwest::Client, user_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            http,
            user_url: user_url.into(),
            api_key,
        }
    }
}

#[async_trait]
impl IdentityProvider for RemoteIdentity {
    async fn verify(&self, token: &str) -> anyhow::Result<Identity> {
        let mut req = self.http.get(&self.user_url).bearer_auth(token);
        if let Some(key) = &self.api_key {
            req = req.header("apikey", key);
        }

        let resp = req.send().await.context("request identity provider")?;
        let status = resp.status();
        if !status.is_success() {
            anyhow::bail!("identity provider rejected token: {status}");
        }

        let user: UserInfo = resp.json().await.context("decode identity provider reply")?;
        debug!(user_id = %user.id, "remote identity resolved");
        let email = user.email.context("identity has no email")?;
        Identity::new(user.id, &email).context("identity email is not a valid address")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::HeaderMap, http::StatusCode, routing::get, Json, Router};
    use serde_json::json;

    const USER_ID: &str = "6f1c7f4e-2f43-4d39-9a55-2d8c1b6c0a11";

    async fn user_endpoint(headers: HeaderMap) -> Result<Json<serde_json::Value>, StatusCode> {
        let auth = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        let key = headers
            .get("apikey")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        match (auth, key) {
            ("Bearer good-token", "anon-key") => {
                Ok(Json(json!({ "id": USER_ID, "email": "Dana@Example.com" })))
            }
            ("Bearer no-email", "anon-key") => Ok(Json(json!({ "id": USER_ID }))),
            ("Bearer numeric-id", "anon-key") => {
                Ok(Json(json!({ "id": "1042", "email": "fay@example.com" })))
            }
            _ => Err(StatusCode::UNAUTHORIZED),
        }
    }

    fn loopback_client() -> reqwest::Client {
        reqwest::Client::builder().no_proxy().build().unwrap()
    }

    async fn spawn_provider() -> String {
        let app = Router::new().route("/auth/v1/user", get(user_endpoint));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}/auth/v1/user")
    }

    #[tokio::test]
    async fn resolves_identity_from_user_endpoint() {
        let url = spawn_provider().await;
        let provider = RemoteIdentity::new(loopback_client(), url, Some("anon-key".into()));
        let identity = provider.verify("good-token").await.expect("verify");
        assert_eq!(identity.user_id, USER_ID);
        assert_eq!(identity.email, "dana@example.com");
    }

    #[tokio::test]
    async fn accepts_non_uuid_user_id() {
        let url = spawn_provider().await;
        let provider = RemoteIdentity::new(loopback_client(), url, Some("anon-key".into()));
        let identity = provider.verify("numeric-id").await.expect("verify");
        assert_eq!(identity.user_id, "1042");
        assert_eq!(identity.email, "fay@example.com");
    }

    #[tokio::test]
    async fn rejected_token_is_an_error() {
        let url = spawn_provider().await;
        let provider = RemoteIdentity::new(loopback_client(), url, Some("anon-key".into()));
        let err = provider.verify("bad-token").await.unwrap_err();
        assert!(err.to_string().contains("401"));
    }

    #[tokio::test]
    async fn identity_without_email_is_an_error() {
        let url = spawn_provider().await;
        let provider = RemoteIdentity::new(loopback_client(), url, Some("anon-key".into()));
        assert!(provider.verify("no-email").await.is_err());
    }
}
