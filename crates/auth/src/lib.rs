//! `sproutstand-auth`: authentication/authorization boundary.
//!
//! This crate is intentionally decoupled from HTTP and storage: the policy
//! module is pure, and the credential service is a trait the process entry
//! point wires up.

pub mod claims;
pub mod credentials;
pub mod policy;
pub mod roles;

pub use claims::{AccessClaims, TokenValidationError, validate_claims};
pub use credentials::{ArgonHs256Credentials, CredentialError, CredentialService};
pub use policy::{AuthzError, require_guardian, require_owner, require_role};
pub use roles::Role;
