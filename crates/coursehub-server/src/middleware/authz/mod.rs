//! Role-based authorization.
//!
//! Authorization is a pure function of the verified identity: only the
//! `admin` role passes the admin gate, and an identity without a role is
//! treated like any other non-admin.

pub mod decision;

pub use decision::{require_admin, AuthorizationDecision};
