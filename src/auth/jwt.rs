use anyhow::Context;
use async_trait::async_trait;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use tracing::debug;

use super::claims::Claims;
use super::services::{Identity, IdentityProvider};

/// Verifies provider-issued HS256 access tokens with the shared secret.
#[derive(Clone)]
pub struct JwtIdentity {
    decoding: DecodingKey,
    audience: String,
}

impl JwtIdentity {
    pub fn new(secret: &str, audience: &str) -> Self {
        Self {
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            audience: audience.to_string(),
        }
    }

    pub fn verify_claims(&self, token: &str) -> anyhow::Result<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(std::slice::from_ref(&self.audience));
        let data = decode::<Claims>(token, &self.decoding, &validation)?;
        debug!(user_id = %data.claims.sub, "jwt verified");
        Ok(data.claims)
    }
}

#[async_trait]
impl IdentityProvider for JwtIdentity {
    async fn verify(&self, token: &str) -> anyhow::Result<Identity> {
        let claims = self.verify_claims(token)?;
        let email = claims.email.context("token carries no email claim")?;
        Identity::new(claims.sub, &email).context("token email is not a valid address")
    }
}
