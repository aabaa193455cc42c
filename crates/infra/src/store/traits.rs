use std::collections::HashMap;

use chrono::{DateTime, Utc};
use thiserror::Error;

use sproutstand_catalog::{Product, ProductFilter, ProductPatch, ProductStatus};
use sproutstand_core::{DomainError, OrderId, ProductId, StorefrontId, UserId};
use sproutstand_identity::User;
use sproutstand_orders::Order;
use sproutstand_storefront::{Storefront, StorefrontPatch};

/// Store operation error.
///
/// These are infrastructure failures; business failures (missing documents,
/// lost stock races) are reported through the operation's return value so the
/// engines can attach domain meaning.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("lock poisoned: {0}")]
    Poisoned(String),

    #[error("storage backend failure: {0}")]
    Backend(String),
}

impl From<StoreError> for DomainError {
    fn from(err: StoreError) -> Self {
        DomainError::store(err.to_string())
    }
}

/// `users` collection.
pub trait UserStore: Send + Sync {
    fn insert(&self, user: User) -> Result<(), StoreError>;

    fn get(&self, id: UserId) -> Result<Option<User>, StoreError>;

    fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// All users whose `parent_id` is the given guardian.
    fn children_of(&self, parent_id: UserId) -> Result<Vec<User>, StoreError>;

    /// Set-present-fields profile update, applied atomically. Returns the
    /// updated document, or `None` if the user does not exist.
    fn update_profile(
        &self,
        id: UserId,
        display_name: Option<String>,
        password_hash: Option<String>,
    ) -> Result<Option<User>, StoreError>;

    fn list(&self) -> Result<Vec<User>, StoreError>;
}

/// `storefronts` collection.
pub trait StorefrontStore: Send + Sync {
    fn insert(&self, storefront: Storefront) -> Result<(), StoreError>;

    fn get(&self, id: StorefrontId) -> Result<Option<Storefront>, StoreError>;

    fn find_by_kid(&self, kid_id: UserId) -> Result<Option<Storefront>, StoreError>;

    fn find_by_kids(&self, kid_ids: &[UserId]) -> Result<Vec<Storefront>, StoreError>;

    /// Patch applied atomically. Returns the updated document, or `None` if
    /// the storefront does not exist.
    fn update(
        &self,
        id: StorefrontId,
        patch: &StorefrontPatch,
    ) -> Result<Option<Storefront>, StoreError>;

    /// Batch lookup of display names for read-side enrichment (one call for
    /// all distinct ids, never N+1).
    fn display_names(
        &self,
        ids: &[StorefrontId],
    ) -> Result<HashMap<StorefrontId, String>, StoreError>;

    fn list(&self) -> Result<Vec<Storefront>, StoreError>;
}

/// Outcome of the conditional stock decrement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockDecrement {
    /// Stock was taken; `remaining` is the post-decrement quantity.
    Applied { remaining: u32 },
    /// Current quantity was below the requested amount at write time.
    Insufficient,
    /// The product no longer exists.
    Missing,
}

/// `products` collection.
pub trait ProductStore: Send + Sync {
    fn insert(&self, product: Product) -> Result<(), StoreError>;

    fn get(&self, id: ProductId) -> Result<Option<Product>, StoreError>;

    fn find(&self, filter: &ProductFilter) -> Result<Vec<Product>, StoreError>;

    fn count(&self, filter: &ProductFilter) -> Result<usize, StoreError>;

    /// Patch applied atomically (field-set semantics; never touches fields
    /// absent from the patch). Returns the updated document, or `None` if the
    /// product does not exist.
    fn update(&self, id: ProductId, patch: &ProductPatch) -> Result<Option<Product>, StoreError>;

    /// Record a guardian decision: status, approver, timestamp in one write.
    fn record_decision(
        &self,
        id: ProductId,
        status: ProductStatus,
        approver: UserId,
        decided_at: DateTime<Utc>,
    ) -> Result<Option<Product>, StoreError>;

    /// Atomic conditional decrement: take `quantity` units only if the
    /// current quantity covers them at the moment of the write. Reaching zero
    /// flips the status to `sold_out` in the same operation.
    fn try_decrement_stock(
        &self,
        id: ProductId,
        quantity: u32,
    ) -> Result<StockDecrement, StoreError>;

    /// Compensating restock for a settlement that failed part-way. Restores
    /// `active` if the product had been flipped to `sold_out`. A missing
    /// product is a no-op.
    fn restore_stock(&self, id: ProductId, quantity: u32) -> Result<(), StoreError>;

    fn delete(&self, id: ProductId) -> Result<bool, StoreError>;
}

/// `orders` collection. Orders are append-only; no update surface exists.
pub trait OrderStore: Send + Sync {
    fn insert(&self, order: Order) -> Result<(), StoreError>;

    fn get(&self, id: OrderId) -> Result<Option<Order>, StoreError>;

    fn find_by_buyer(&self, buyer_id: UserId) -> Result<Vec<Order>, StoreError>;

    /// Orders whose item list references the given storefront.
    fn find_touching_storefront(
        &self,
        storefront_id: StorefrontId,
    ) -> Result<Vec<Order>, StoreError>;

    /// Aggregation: Σ(price × quantity) over items of completed orders whose
    /// `storefront_id` is in the given set.
    fn completed_earnings_cents(
        &self,
        storefront_ids: &[StorefrontId],
    ) -> Result<u64, StoreError>;

    fn list(&self) -> Result<Vec<Order>, StoreError>;
}
