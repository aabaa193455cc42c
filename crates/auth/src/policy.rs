//! Authorization policy: pure functions of (caller role, caller id, resource
//! ownership chain) → allow/deny.
//!
//! - No IO
//! - No panics
//! - No business logic beyond the policy table

use thiserror::Error;

use sproutstand_core::{DomainError, UserId};

use crate::Role;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("forbidden: requires role '{required}'")]
    RoleRequired { required: Role },

    #[error("forbidden: caller does not own this resource")]
    NotOwner,

    #[error("forbidden: caller is not the linked guardian of this seller")]
    NotGuardian,
}

impl From<AuthzError> for DomainError {
    fn from(err: AuthzError) -> Self {
        DomainError::forbidden(err.to_string())
    }
}

/// Require the caller to hold an exact role.
pub fn require_role(caller: Role, required: Role) -> Result<(), AuthzError> {
    if caller == required {
        Ok(())
    } else {
        Err(AuthzError::RoleRequired { required })
    }
}

/// Require the caller to be the owner in a resolved ownership chain
/// (product → storefront → kid, or storefront → kid).
pub fn require_owner(caller: UserId, owner: UserId) -> Result<(), AuthzError> {
    if caller == owner {
        Ok(())
    } else {
        Err(AuthzError::NotOwner)
    }
}

/// Require the caller to be the guardian linked to a kid seller.
///
/// A kid with no linked guardian denies every caller.
pub fn require_guardian(caller: UserId, parent_id: Option<UserId>) -> Result<(), AuthzError> {
    match parent_id {
        Some(parent) if parent == caller => Ok(()),
        _ => Err(AuthzError::NotGuardian),
    }
}
