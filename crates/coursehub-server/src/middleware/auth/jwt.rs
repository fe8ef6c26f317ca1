//! Identity token verification.

use super::types::Claims;
use crate::config::AuthConfig;
use anyhow::Context;
use async_trait::async_trait;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use std::str::FromStr;
use thiserror::Error;

/// Why a presented token was rejected.
#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("token expired")]
    Expired,

    #[error("invalid token: {0}")]
    Invalid(String),
}

impl From<jsonwebtoken::errors::Error> for VerifyError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => VerifyError::Expired,
            _ => VerifyError::Invalid(err.to_string()),
        }
    }
}

/// Verifies raw bearer tokens against the identity provider.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    /// Verify `token` and return its claims.
    async fn verify(&self, token: &str) -> Result<Claims, VerifyError>;
}

/// Verifier for provider tokens signed with a shared HMAC secret.
pub struct JwtVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl JwtVerifier {
    /// Create a verifier for tokens signed with `secret` using `algorithm`.
    pub fn new(secret: &str, algorithm: Algorithm) -> Self {
        let mut validation = Validation::new(algorithm);
        validation.validate_exp = true;
        validation.validate_aud = false;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Require the `iss` claim to equal `issuer`.
    pub fn with_issuer(mut self, issuer: &str) -> Self {
        self.validation.set_issuer(&[issuer]);
        self.validation.required_spec_claims.insert("iss".to_string());
        self
    }

    /// Require the `aud` claim to equal `audience`.
    pub fn with_audience(mut self, audience: &str) -> Self {
        self.validation.set_audience(&[audience]);
        self.validation.validate_aud = true;
        self.validation.required_spec_claims.insert("aud".to_string());
        self
    }

    /// Allow `secs` of clock skew when checking expiry.
    pub fn with_leeway(mut self, secs: u64) -> Self {
        self.validation.leeway = secs;
        self
    }

    /// Build a verifier from the `auth` configuration section.
    pub fn from_config(config: &AuthConfig) -> anyhow::Result<Self> {
        let algorithm = Algorithm::from_str(&config.algorithm.to_uppercase())
            .with_context(|| format!("Unsupported token algorithm {}", config.algorithm))?;

        let mut verifier =
            Self::new(&config.jwt_secret, algorithm).with_leeway(config.leeway_secs);
        if let Some(issuer) = &config.issuer {
            verifier = verifier.with_issuer(issuer);
        }
        if let Some(audience) = &config.audience {
            verifier = verifier.with_audience(audience);
        }
        Ok(verifier)
    }
}

#[async_trait]
impl TokenVerifier for JwtVerifier {
    async fn verify(&self, token: &str) -> Result<Claims, VerifyError> {
        let claims = decode::<Claims>(token, &self.key, &self.validation)?.claims;

        if claims.sub.trim().is_empty() {
            return Err(VerifyError::Invalid("missing subject".to_string()));
        }

        Ok(claims)
    }
}

/// Encode claims into an HS256 token. Used to mint tokens for local
/// development and tests.
pub fn encode_token(claims: &Claims, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}
