use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Normalizes an email for ownership comparisons.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// The verified caller for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: String,
    pub email: String,
}

impl Identity {
    /// Returns `None` when the provider handed back something that is not an email.
    pub fn new(user_id: impl Into<String>, email: &str) -> Option<Self> {
        let email = normalize_email(email);
        if !is_valid_email(&email) {
            return None;
        }
        Some(Self {
            user_id: user_id.into(),
            email,
        })
    }

    /// Whether a sheet cell (column 0 of a row) names this caller.
    pub fn owns(&self, cell: &str) -> bool {
        normalize_email(cell) == self.email
    }
}

/// Turns a bearer token into an [`Identity`].
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn verify(&self, token: &str) -> anyhow::Result<Identity>;
}
