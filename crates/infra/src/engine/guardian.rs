use std::sync::Arc;

use serde::Serialize;

use sproutstand_auth::{Role, require_role};
use sproutstand_catalog::{ProductFilter, ProductStatus};
use sproutstand_core::{DomainResult, StorefrontId, UserId};
use sproutstand_identity::User;

use crate::engine::lifecycle::{LifecycleEngine, ProductListing};
use crate::store::{OrderStore, ProductStore, StorefrontStore, UserStore};

/// Guardian dashboard numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GuardianStats {
    pub linked_kid_sellers: usize,
    pub pending_approvals_count: usize,
    pub total_child_earnings_cents: u64,
}

/// Guardian dashboard reads: children, pending approvals, earnings.
///
/// Everything here is a three-stage fan-out: kids → storefronts → matching
/// products or order items. Read-only; eventual consistency is fine.
pub struct GuardianEngine {
    users: Arc<dyn UserStore>,
    storefronts: Arc<dyn StorefrontStore>,
    products: Arc<dyn ProductStore>,
    orders: Arc<dyn OrderStore>,
    lifecycle: Arc<LifecycleEngine>,
}

impl GuardianEngine {
    pub fn new(
        users: Arc<dyn UserStore>,
        storefronts: Arc<dyn StorefrontStore>,
        products: Arc<dyn ProductStore>,
        orders: Arc<dyn OrderStore>,
        lifecycle: Arc<LifecycleEngine>,
    ) -> Self {
        Self {
            users,
            storefronts,
            products,
            orders,
            lifecycle,
        }
    }

    pub fn children(&self, caller: &User) -> DomainResult<Vec<User>> {
        require_role(caller.role, Role::ParentGuardian)?;
        self.users.children_of(caller.id).map_err(Into::into)
    }

    /// Pending products across all of the caller's kids, enriched with
    /// storefront names.
    pub fn approvals(&self, caller: &User) -> DomainResult<Vec<ProductListing>> {
        require_role(caller.role, Role::ParentGuardian)?;

        let storefront_ids = self.kid_storefront_ids(caller.id)?;
        if storefront_ids.is_empty() {
            return Ok(Vec::new());
        }

        let filter = ProductFilter {
            storefront_ids: Some(storefront_ids),
            status: Some(ProductStatus::PendingApproval),
            ..ProductFilter::default()
        };
        let pending = self.products.find(&filter)?;
        self.lifecycle.enrich(pending)
    }

    pub fn stats(&self, caller: &User) -> DomainResult<GuardianStats> {
        require_role(caller.role, Role::ParentGuardian)?;

        let children = self.users.children_of(caller.id)?;
        let linked_kid_sellers = children.len();

        let storefront_ids = self.kid_storefront_ids(caller.id)?;
        if storefront_ids.is_empty() {
            return Ok(GuardianStats {
                linked_kid_sellers,
                pending_approvals_count: 0,
                total_child_earnings_cents: 0,
            });
        }

        let filter = ProductFilter {
            storefront_ids: Some(storefront_ids.clone()),
            status: Some(ProductStatus::PendingApproval),
            ..ProductFilter::default()
        };
        let pending_approvals_count = self.products.count(&filter)?;
        let total_child_earnings_cents = self.orders.completed_earnings_cents(&storefront_ids)?;

        Ok(GuardianStats {
            linked_kid_sellers,
            pending_approvals_count,
            total_child_earnings_cents,
        })
    }

    fn kid_storefront_ids(&self, guardian: UserId) -> DomainResult<Vec<StorefrontId>> {
        let children = self.users.children_of(guardian)?;
        let kid_ids: Vec<UserId> = children.iter().map(|c| c.id).collect();
        if kid_ids.is_empty() {
            return Ok(Vec::new());
        }
        let storefronts = self.storefronts.find_by_kids(&kid_ids)?;
        Ok(storefronts.into_iter().map(|s| s.id).collect())
    }
}
