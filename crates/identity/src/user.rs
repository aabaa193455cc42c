use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use sproutstand_auth::Role;
use sproutstand_core::{DomainError, DomainResult, Entity, UserId};

/// A marketplace user of any role.
///
/// # Invariants
/// - `email` is unique across the user collection (enforced at insert).
/// - `parent_id` is set only for kid sellers and references an existing
///   parent_guardian; it is fixed at creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub display_name: String,
    pub role: Role,
    /// Weak reference to the linked guardian (kid sellers only).
    pub parent_id: Option<UserId>,
    /// Birthday, kept for display only.
    pub birthday: Option<NaiveDate>,
    pub password_hash: String,
}

impl User {
    pub fn is_kid_seller(&self) -> bool {
        self.role == Role::KidSeller
    }
}

impl Entity for User {
    type Id = UserId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Signup input, validated before any storage access.
#[derive(Debug, Clone, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub display_name: String,
    pub role: Role,
    pub password: String,
    /// Required for kid sellers; resolved to the guardian's user record.
    pub parent_email: Option<String>,
    pub birthday: Option<NaiveDate>,
}

impl SignupRequest {
    /// Field-level validation. Guardian resolution needs the store and happens
    /// in the accounts engine.
    pub fn validate(&self) -> DomainResult<()> {
        if self.email.trim().is_empty() || !self.email.contains('@') {
            return Err(DomainError::invalid_input("a valid email is required"));
        }
        if self.display_name.trim().is_empty() {
            return Err(DomainError::invalid_input("display_name is required"));
        }
        if self.password.is_empty() {
            return Err(DomainError::invalid_input("password is required"));
        }
        if self.role == Role::KidSeller
            && self.parent_email.as_deref().map_or(true, |e| e.trim().is_empty())
        {
            return Err(DomainError::invalid_input(
                "parent email is required for kid accounts",
            ));
        }
        Ok(())
    }
}

/// Partial self-service profile update. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserPatch {
    pub display_name: Option<String>,
    /// Plaintext; the accounts engine re-hashes before storage.
    pub password: Option<String>,
}

impl UserPatch {
    pub fn is_empty(&self) -> bool {
        self.display_name.is_none() && self.password.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signup(role: Role, parent_email: Option<&str>) -> SignupRequest {
        SignupRequest {
            email: "kid@example.com".to_string(),
            display_name: "Mina".to_string(),
            role,
            password: "hunter22".to_string(),
            parent_email: parent_email.map(str::to_string),
            birthday: None,
        }
    }

    #[test]
    fn buyer_signup_needs_no_parent() {
        assert!(signup(Role::Buyer, None).validate().is_ok());
    }

    #[test]
    fn kid_signup_requires_parent_email() {
        let err = signup(Role::KidSeller, None).validate().unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));
        let err = signup(Role::KidSeller, Some("  ")).validate().unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));
        assert!(signup(Role::KidSeller, Some("mom@example.com")).validate().is_ok());
    }

    #[test]
    fn malformed_email_is_rejected() {
        let mut req = signup(Role::Buyer, None);
        req.email = "not-an-email".to_string();
        assert!(req.validate().is_err());
    }

    #[test]
    fn empty_password_is_rejected() {
        let mut req = signup(Role::Buyer, None);
        req.password = String::new();
        assert!(req.validate().is_err());
    }
}
