//! Middleware for the Coursehub API server.

pub mod auth;
pub mod authz;
pub mod logging;

pub use auth::{AdminAuth, Auth, AuthUser, Authenticator, MaybeAuth};
pub use authz::{require_admin, AuthorizationDecision};
pub use logging::LoggingLayer;
