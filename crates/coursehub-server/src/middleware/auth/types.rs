//! Authentication types.

use crate::profiles::UserProfile;
use chrono::Utc;
use serde::{Deserialize, Deserializer, Serialize};

/// Roles this server recognises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Instructor,
    Learner,
}

impl Role {
    /// Parse a role name. Only the exact lowercase names are recognised.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(Self::Admin),
            "instructor" => Some(Self::Instructor),
            "learner" => Some(Self::Learner),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Instructor => "instructor",
            Self::Learner => "learner",
        }
    }
}

/// Where an identity's role was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoleSource {
    /// Role claim carried by the token.
    #[serde(rename = "custom-claims")]
    CustomClaims,
    /// Role field of the caller's profile document.
    #[serde(rename = "firestore-document")]
    ProfileDocument,
    /// Neither source named a role.
    #[serde(rename = "default")]
    Default,
}

/// Claims carried by a verified identity token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user uid).
    pub sub: String,
    /// User email.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Role claim. Non-string values are dropped rather than rejected.
    #[serde(
        default,
        deserialize_with = "string_claim",
        skip_serializing_if = "Option::is_none"
    )]
    pub role: Option<String>,
    /// Sign-in provider, e.g. `password` or `google.com`.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Issued at timestamp.
    pub iat: i64,
    /// Expiration timestamp.
    pub exp: i64,
    /// Issuer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
    /// Audience.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aud: Option<String>,
}

fn string_claim<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<serde_json::Value>::deserialize(deserializer)? {
        Some(serde_json::Value::String(value)) => Some(value),
        _ => None,
    })
}

fn default_provider() -> String {
    "unknown".to_string()
}

impl Claims {
    /// Claims for `uid` valid for `expires_in` seconds from now.
    pub fn new(uid: impl Into<String>, expires_in: i64) -> Self {
        let now = Utc::now().timestamp();
        Self {
            sub: uid.into(),
            email: None,
            role: None,
            provider: "password".to_string(),
            iat: now,
            exp: now + expires_in,
            iss: None,
            aud: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = provider.into();
        self
    }

    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.iss = Some(issuer.into());
        self
    }

    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.aud = Some(audience.into());
        self
    }

    /// The role claim, if it names a known role.
    pub fn role(&self) -> Option<Role> {
        self.role.as_deref().and_then(Role::parse)
    }
}

/// The caller of a request, rebuilt from its token on every request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    pub uid: String,
    pub email: Option<String>,
    pub role: Option<Role>,
    pub provider: String,
}

impl Identity {
    /// Check if the identity holds the admin role.
    pub fn is_admin(&self) -> bool {
        self.role == Some(Role::Admin)
    }
}

/// Authenticated request context.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub identity: Identity,
    pub role_source: RoleSource,
    pub claims: Claims,
    /// Profile document read during role resolution, if one was read.
    pub profile: Option<UserProfile>,
}
