//! Identity verification for the Coursehub API server.
//!
//! A request is authenticated by verifying its bearer token and resolving
//! the caller's role, first from the token's role claim and then from the
//! caller's profile document.

pub mod authenticator;
pub mod extractor;
pub mod jwt;
pub mod types;

pub use authenticator::{bearer_token, Authenticator};
pub use extractor::{AdminAuth, Auth, MaybeAuth};
pub use jwt::{encode_token, JwtVerifier, TokenVerifier, VerifyError};
pub use types::{AuthUser, Claims, Identity, Role, RoleSource};
