use std::sync::Arc;

use chrono::Utc;

use sproutstand_auth::{Role, require_guardian, require_owner, require_role};
use sproutstand_catalog::{
    DecisionOutcome, GuardianAction, NewProduct, Product, ProductFilter, ProductPatch,
    ProductStatus,
};
use sproutstand_core::{DomainError, DomainResult, ProductId, StorefrontId, UserId};
use sproutstand_identity::User;

use crate::store::{ProductStore, StorefrontStore, UserStore};

/// A product enriched with its storefront's display name.
///
/// The name is a read-side projection computed per query from a batch lookup;
/// it is never persisted on the product.
#[derive(Debug, Clone)]
pub struct ProductListing {
    pub product: Product,
    pub storefront_name: Option<String>,
}

/// Public listing query.
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    /// A kid's user id or a storefront id (both accepted, kid id wins).
    pub seller_id: Option<String>,
    /// Defaults to `active` when absent (public view).
    pub status: Option<ProductStatus>,
    /// Case-insensitive substring on name.
    pub search: Option<String>,
}

/// Product lifecycle: creation, guardian decisions, edits, listings, deletion.
pub struct LifecycleEngine {
    users: Arc<dyn UserStore>,
    storefronts: Arc<dyn StorefrontStore>,
    products: Arc<dyn ProductStore>,
}

impl LifecycleEngine {
    pub fn new(
        users: Arc<dyn UserStore>,
        storefronts: Arc<dyn StorefrontStore>,
        products: Arc<dyn ProductStore>,
    ) -> Self {
        Self {
            users,
            storefronts,
            products,
        }
    }

    /// Create a product under the caller's storefront, always in
    /// `pending_approval` regardless of input.
    pub fn create(&self, caller: &User, req: NewProduct) -> DomainResult<Product> {
        require_role(caller.role, Role::KidSeller)?;
        req.validate()?;

        let storefront = self.storefronts.find_by_kid(caller.id)?.ok_or_else(|| {
            DomainError::invalid_input("you must create a storefront before adding products")
        })?;

        let product = req.into_product(ProductId::new(), storefront.id);
        self.products.insert(product.clone())?;
        tracing::info!(product_id = %product.id, storefront_id = %storefront.id, "product created, pending approval");
        Ok(product)
    }

    /// Guardian decision. Resolves product → storefront → kid → linked
    /// guardian and denies everyone else.
    pub fn decide(
        &self,
        caller: &User,
        product_id: ProductId,
        action: GuardianAction,
    ) -> DomainResult<Product> {
        require_role(caller.role, Role::ParentGuardian)?;

        let product = self.get(product_id)?;
        let storefront = self
            .storefronts
            .get(product.storefront_id)?
            .ok_or_else(|| DomainError::not_found("storefront"))?;
        let kid = self
            .users
            .get(storefront.kid_id)?
            .ok_or_else(|| DomainError::not_found("kid account"))?;
        require_guardian(caller.id, kid.parent_id)?;

        match product.decision_outcome(action)? {
            DecisionOutcome::Transition(status) => {
                let updated = self
                    .products
                    .record_decision(product_id, status, caller.id, Utc::now())?
                    .ok_or_else(|| DomainError::not_found("product"))?;
                tracing::info!(product_id = %product_id, status = ?status, "guardian decision recorded");
                Ok(updated)
            }
            DecisionOutcome::AlreadyDecided => Ok(product),
        }
    }

    /// Public listing. Without an explicit status filter only `active`
    /// products are visible.
    pub fn list(&self, query: ListQuery) -> DomainResult<Vec<Product>> {
        let storefront_ids = match query.seller_id.as_deref() {
            Some(seller_id) => Some(vec![self.resolve_seller(seller_id)?]),
            None => None,
        };

        let filter = ProductFilter {
            storefront_ids,
            status: Some(query.status.unwrap_or(ProductStatus::Active)),
            name_contains: query.search,
            ..ProductFilter::default()
        };
        self.products.find(&filter).map_err(Into::into)
    }

    /// Marketplace-wide search: active, in stock, name-or-description match,
    /// enriched with storefront names.
    pub fn marketplace(&self, search: Option<String>) -> DomainResult<Vec<ProductListing>> {
        let search = search.filter(|s| !s.trim().is_empty());
        let filter = ProductFilter {
            status: Some(ProductStatus::Active),
            in_stock_only: true,
            text_search: search,
            ..ProductFilter::default()
        };
        let products = self.products.find(&filter)?;
        self.enrich(products)
    }

    /// The caller's own products, all statuses. No storefront yet means an
    /// empty list, not an error.
    pub fn mine(&self, caller: &User) -> DomainResult<Vec<Product>> {
        require_role(caller.role, Role::KidSeller)?;
        let Some(storefront) = self.storefronts.find_by_kid(caller.id)? else {
            return Ok(Vec::new());
        };
        let filter = ProductFilter {
            storefront_ids: Some(vec![storefront.id]),
            ..ProductFilter::default()
        };
        self.products.find(&filter).map_err(Into::into)
    }

    /// Public read.
    pub fn get(&self, id: ProductId) -> DomainResult<Product> {
        self.products
            .get(id)?
            .ok_or_else(|| DomainError::not_found("product"))
    }

    /// Owner-only partial update. Field edits never reset the approval
    /// decision; a restock may flip `sold_out` back to `active`.
    pub fn update(
        &self,
        caller: &User,
        id: ProductId,
        patch: ProductPatch,
    ) -> DomainResult<Product> {
        self.ensure_owner(caller, id)?;
        self.products
            .update(id, &patch)?
            .ok_or_else(|| DomainError::not_found("product"))
    }

    /// Owner-only hard delete.
    pub fn delete(&self, caller: &User, id: ProductId) -> DomainResult<()> {
        self.ensure_owner(caller, id)?;
        if self.products.delete(id)? {
            Ok(())
        } else {
            Err(DomainError::not_found("product"))
        }
    }

    /// Batch storefront-name enrichment: distinct ids, one lookup, map back.
    pub(crate) fn enrich(&self, products: Vec<Product>) -> DomainResult<Vec<ProductListing>> {
        let mut ids: Vec<StorefrontId> = products.iter().map(|p| p.storefront_id).collect();
        ids.sort_unstable();
        ids.dedup();
        let names = self.storefronts.display_names(&ids)?;

        Ok(products
            .into_iter()
            .map(|product| {
                let storefront_name = Some(
                    names
                        .get(&product.storefront_id)
                        .cloned()
                        .unwrap_or_else(|| "Unknown Store".to_string()),
                );
                ProductListing {
                    product,
                    storefront_name,
                }
            })
            .collect())
    }

    fn ensure_owner(&self, caller: &User, id: ProductId) -> DomainResult<()> {
        let product = self.get(id)?;
        let storefront = self
            .storefronts
            .get(product.storefront_id)?
            .ok_or_else(|| DomainError::not_found("storefront"))?;
        require_owner(caller.id, storefront.kid_id)?;
        Ok(())
    }

    /// `seller_id` may be a kid's user id (resolved through the registry) or
    /// a storefront id used directly.
    fn resolve_seller(&self, seller_id: &str) -> DomainResult<StorefrontId> {
        let uuid: uuid::Uuid = seller_id
            .parse()
            .map_err(|_| DomainError::invalid_input("invalid seller id"))?;
        if let Some(storefront) = self.storefronts.find_by_kid(UserId::from_uuid(uuid))? {
            return Ok(storefront.id);
        }
        Ok(StorefrontId::from_uuid(uuid))
    }
}
