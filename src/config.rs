use std::net::SocketAddr;

use anyhow::Context;

const GOOGLE_EXPORT_BASE: &str = "https://docs.google.com/spreadsheets/d";

/// How bearer tokens are turned into identities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthConfig {
    /// Verify HS256 access tokens locally with the provider's shared secret.
    Jwt { secret: String, audience: String },
    /// Ask the provider's user endpoint who the token belongs to.
    Remote {
        user_url: String,
        api_key: Option<String>,
    },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub sheet_csv_url: String,
    pub apps_script_url: Option<String>,
    pub auth: AuthConfig,
    pub enforce_row_ownership: bool,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let port = match get("APP_PORT") {
            Some(p) => p
                .parse::<u16>()
                .with_context(|| format!("APP_PORT is not a port number: {p}"))?,
            None => 8080,
        };

        let sheet_csv_url = match (get("SHEET_CSV_URL"), get("SHEET_ID")) {
            (Some(url), _) => url,
            (None, Some(id)) => {
                let gid = get("SHEET_GID").unwrap_or_else(|| "0".into());
                format!("{GOOGLE_EXPORT_BASE}/{id}/export?format=csv&gid={gid}")
            }
            (None, None) => anyhow::bail!("either SHEET_CSV_URL or SHEET_ID must be set"),
        };

        let auth = match get("AUTH_USER_URL") {
            Some(user_url) => AuthConfig::Remote {
                user_url,
                api_key: get("AUTH_API_KEY"),
            },
            None => AuthConfig::Jwt {
                secret: get("JWT_SECRET")
                    .context("JWT_SECRET is required when AUTH_USER_URL is not set")?,
                audience: get("JWT_AUDIENCE").unwrap_or_else(|| "authenticated".into()),
            },
        };

        Ok(Self {
            host: get("APP_HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port,
            sheet_csv_url,
            apps_script_url: get("APPS_SCRIPT_URL"),
            auth,
            enforce_row_ownership: get("ENFORCE_ROW_OWNERSHIP")
                .map(|v| parse_flag(&v))
                .unwrap_or(false),
        })
    }

    pub fn listen_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid listen address {}:{}", self.host, self.port))
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
