use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use sproutstand_auth::{AccessClaims, CredentialError, CredentialService, Role};
use sproutstand_core::{DomainError, DomainResult};
use sproutstand_identity::{SignupRequest, User, UserPatch};
use sproutstand_core::UserId;

use crate::store::UserStore;

/// Identity operations: signup, login, caller resolution, profile updates.
pub struct AccountsEngine {
    users: Arc<dyn UserStore>,
    credentials: Arc<dyn CredentialService>,
    token_ttl: Duration,
}

impl AccountsEngine {
    pub fn new(
        users: Arc<dyn UserStore>,
        credentials: Arc<dyn CredentialService>,
        token_ttl: Duration,
    ) -> Self {
        Self {
            users,
            credentials,
            token_ttl,
        }
    }

    /// Register a new user.
    ///
    /// Kid sellers must name an existing parent_guardian by email; the link is
    /// fixed at creation and never updated afterwards.
    pub fn signup(&self, req: SignupRequest) -> DomainResult<User> {
        req.validate()?;

        if self.users.find_by_email(&req.email)?.is_some() {
            return Err(DomainError::conflict("email already registered"));
        }

        let parent_id = match (req.role, &req.parent_email) {
            (Role::KidSeller, Some(parent_email)) => {
                let parent = self
                    .users
                    .find_by_email(parent_email)?
                    .filter(|u| u.role == Role::ParentGuardian)
                    .ok_or_else(|| {
                        DomainError::invalid_input("parent account not found with provided email")
                    })?;
                Some(parent.id)
            }
            _ => None,
        };

        let password_hash = self
            .credentials
            .hash_password(&req.password)
            .map_err(internal)?;

        let user = User {
            id: UserId::new(),
            email: req.email,
            display_name: req.display_name,
            role: req.role,
            parent_id,
            birthday: req.birthday,
            password_hash,
        };
        self.users.insert(user.clone())?;
        tracing::info!(user_id = %user.id, role = %user.role, "user signed up");
        Ok(user)
    }

    /// Verify a password and issue a bearer token.
    ///
    /// Wrong email and wrong password are indistinguishable to the caller.
    pub fn login(&self, email: &str, password: &str) -> DomainResult<(String, User)> {
        let user = self
            .users
            .find_by_email(email)?
            .ok_or(DomainError::Unauthorized)?;
        if !self.credentials.verify_password(password, &user.password_hash) {
            return Err(DomainError::Unauthorized);
        }

        let claims = AccessClaims::new(user.id, user.role, Utc::now(), self.token_ttl);
        let token = self.credentials.issue_token(&claims).map_err(internal)?;
        Ok((token, user))
    }

    /// Resolve a bearer token to a live user record.
    pub fn resolve_caller(&self, token: &str, now: DateTime<Utc>) -> DomainResult<User> {
        let claims = self
            .credentials
            .resolve_token(token, now)
            .map_err(|_| DomainError::Unauthorized)?;
        self.users.get(claims.sub)?.ok_or(DomainError::Unauthorized)
    }

    /// Partial self-service update; a new password is re-hashed.
    pub fn update_profile(&self, caller: &User, patch: UserPatch) -> DomainResult<User> {
        if patch.is_empty() {
            return Ok(caller.clone());
        }
        let password_hash = match &patch.password {
            Some(password) if password.is_empty() => {
                return Err(DomainError::invalid_input("password must not be empty"));
            }
            Some(password) => Some(self.credentials.hash_password(password).map_err(internal)?),
            None => None,
        };
        self.users
            .update_profile(caller.id, patch.display_name, password_hash)?
            .ok_or_else(|| DomainError::not_found("user"))
    }
}

fn internal(err: CredentialError) -> DomainError {
    DomainError::store(err.to_string())
}
