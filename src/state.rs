use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use crate::auth::{jwt::JwtIdentity, remote::RemoteIdentity, IdentityProvider};
use crate::config::{AppConfig, AuthConfig};
use crate::sheet::{
    source::{CsvExport, SheetSource},
    webhook::{AppsScriptWebhook, RowWebhook},
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub identity: Arc<dyn IdentityProvider>,
    pub sheet: Arc<dyn SheetSource>,
    pub webhook: Option<Arc<dyn RowWebhook>>,
}

impl AppState {
    pub fn init(config: AppConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("sheetgate/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("build http client")?;

        let identity = match &config.auth {
            AuthConfig::Jwt { secret, audience } => {
                Arc::new(JwtIdentity::new(secret, audience)) as Arc<dyn IdentityProvider>
            }
            AuthConfig::Remote { user_url, api_key } => Arc::new(RemoteIdentity::new(
                http.clone(),
                user_url.clone(),
                api_key.clone(),
            )) as Arc<dyn IdentityProvider>,
        };

        let sheet = Arc::new(CsvExport::new(http.clone(), config.sheet_csv_url.clone()))
            as Arc<dyn SheetSource>;

        let webhook = config
            .apps_script_url
            .as_ref()
            .map(|url| Arc::new(AppsScriptWebhook::new(http.clone(), url.clone())) as Arc<dyn RowWebhook>);

        let auth_mode = match config.auth {
            AuthConfig::Jwt { .. } => "jwt",
            AuthConfig::Remote { .. } => "remote",
        };
        info!(
            auth = auth_mode,
            webhook_configured = webhook.is_some(),
            enforce_row_ownership = config.enforce_row_ownership,
            "state initialized"
        );

        Ok(Self::from_parts(Arc::new(config), identity, sheet, webhook))
    }

    pub fn from_parts(
        config: Arc<AppConfig>,
        identity: Arc<dyn IdentityProvider>,
        sheet: Arc<dyn SheetSource>,
        webhook: Option<Arc<dyn RowWebhook>>,
    ) -> Self {
        Self {
            config,
            identity,
            sheet,
            webhook,
        }
    }
}
