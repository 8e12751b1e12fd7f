use serde::{Deserialize, Serialize};

/// Access-token payload issued by the identity provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,           // provider user ID, opaque
    pub exp: usize,            // expires at (unix timestamp)
    pub aud: String,           // audience
    #[serde(default)]
    pub email: Option<String>, // account email, the ownership key
}
