//! Authorization decisions and their audit trail in the logs.

use crate::error::ApiError;
use crate::middleware::auth::types::{Identity, Role};
use serde::Serialize;
use tracing::info;

/// Outcome of an authorization check. Logged, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorizationDecision {
    pub allowed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl AuthorizationDecision {
    pub fn allow() -> Self {
        Self {
            allowed: true,
            reason: None,
        }
    }

    pub fn deny(reason: impl Into<String>) -> Self {
        Self {
            allowed: false,
            reason: Some(reason.into()),
        }
    }

    /// Decide whether `identity` may perform admin actions.
    pub fn for_admin(identity: &Identity) -> Self {
        match identity.role {
            Some(Role::Admin) => Self::allow(),
            Some(role) => Self::deny(format!("role '{}' is not admin", role.as_str())),
            None => Self::deny("no role assigned"),
        }
    }

    pub fn log(&self, identity: &Identity) {
        if self.allowed {
            info!(
                event = "authz_granted",
                uid = %identity.uid,
                role = ?identity.role,
                "Authorization granted"
            );
        } else {
            info!(
                event = "authz_denied",
                uid = %identity.uid,
                role = ?identity.role,
                reason = ?self.reason,
                "Authorization denied"
            );
        }
    }
}

/// Admin gate: `Ok` iff the identity holds the admin role.
pub fn require_admin(identity: &Identity) -> Result<(), ApiError> {
    let decision = AuthorizationDecision::for_admin(identity);
    decision.log(identity);

    if decision.allowed {
        Ok(())
    } else {
        Err(ApiError::Forbidden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(role: Option<Role>) -> Identity {
        Identity {
            uid: "u1".into(),
            email: None,
            role,
            provider: "password".into(),
        }
    }

    #[test]
    fn test_only_admin_is_allowed() {
        assert!(require_admin(&identity(Some(Role::Admin))).is_ok());
        for role in [Some(Role::Instructor), Some(Role::Learner), None] {
            assert!(matches!(
                require_admin(&identity(role)),
                Err(ApiError::Forbidden)
            ));
        }
    }

    #[test]
    fn test_decision_reason() {
        let granted = AuthorizationDecision::for_admin(&identity(Some(Role::Admin)));
        assert_eq!(granted, AuthorizationDecision::allow());

        let denied = AuthorizationDecision::for_admin(&identity(None));
        assert!(!denied.allowed);
        assert_eq!(denied.reason.as_deref(), Some("no role assigned"));

        let json = serde_json::to_value(&granted).unwrap();
        assert!(json.get("reason").is_none());
    }
}
