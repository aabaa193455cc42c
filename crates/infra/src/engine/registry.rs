use std::sync::Arc;

use sproutstand_auth::{Role, require_owner, require_role};
use sproutstand_core::{DomainError, DomainResult, StorefrontId};
use sproutstand_identity::User;
use sproutstand_storefront::{NewStorefront, Storefront, StorefrontPatch};

use crate::store::StorefrontStore;

/// Storefront registry: one storefront per kid seller.
pub struct RegistryEngine {
    storefronts: Arc<dyn StorefrontStore>,
}

impl RegistryEngine {
    pub fn new(storefronts: Arc<dyn StorefrontStore>) -> Self {
        Self { storefronts }
    }

    /// Create the caller's storefront. Check-then-insert enforces the
    /// one-per-kid invariant.
    pub fn create(&self, caller: &User, req: NewStorefront) -> DomainResult<Storefront> {
        require_role(caller.role, Role::KidSeller)?;
        req.validate()?;

        if self.storefronts.find_by_kid(caller.id)?.is_some() {
            return Err(DomainError::conflict("you already have a storefront"));
        }

        let storefront = Storefront {
            id: StorefrontId::new(),
            kid_id: caller.id,
            display_name: req.display_name,
            description: req.description,
            status: req.status,
        };
        self.storefronts.insert(storefront.clone())?;
        tracing::info!(storefront_id = %storefront.id, kid_id = %caller.id, "storefront created");
        Ok(storefront)
    }

    pub fn mine(&self, caller: &User) -> DomainResult<Storefront> {
        require_role(caller.role, Role::KidSeller)?;
        self.storefronts
            .find_by_kid(caller.id)?
            .ok_or_else(|| DomainError::not_found("storefront"))
    }

    /// Public read.
    pub fn get(&self, id: StorefrontId) -> DomainResult<Storefront> {
        self.storefronts
            .get(id)?
            .ok_or_else(|| DomainError::not_found("storefront"))
    }

    pub fn update(
        &self,
        caller: &User,
        id: StorefrontId,
        patch: StorefrontPatch,
    ) -> DomainResult<Storefront> {
        let storefront = self.get(id)?;
        require_owner(caller.id, storefront.kid_id)?;

        self.storefronts
            .update(id, &patch)?
            .ok_or_else(|| DomainError::not_found("storefront"))
    }
}
