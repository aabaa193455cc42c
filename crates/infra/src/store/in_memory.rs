use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};

use sproutstand_catalog::{Product, ProductFilter, ProductPatch, ProductStatus};
use sproutstand_core::{Entity, OrderId, ProductId, StorefrontId, UserId};
use sproutstand_identity::User;
use sproutstand_orders::{Order, OrderStatus};
use sproutstand_storefront::{Storefront, StorefrontPatch};

use super::traits::{
    OrderStore, ProductStore, StockDecrement, StoreError, StorefrontStore, UserStore,
};

/// In-memory document store holding all four collections.
///
/// Intended for tests/dev. Writes that must be atomic (conditional stock
/// decrement, field-set patches) run inside a single write-lock section.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    users: RwLock<HashMap<UserId, User>>,
    storefronts: RwLock<HashMap<StorefrontId, Storefront>>,
    products: RwLock<HashMap<ProductId, Product>>,
    orders: RwLock<HashMap<OrderId, Order>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: T) -> StoreError {
    StoreError::Poisoned("lock poisoned".to_string())
}

fn all<E: Entity + Clone>(map: &HashMap<E::Id, E>) -> Vec<E> {
    map.values().cloned().collect()
}

impl UserStore for InMemoryStore {
    fn insert(&self, user: User) -> Result<(), StoreError> {
        self.users.write().map_err(poisoned)?.insert(user.id, user);
        Ok(())
    }

    fn get(&self, id: UserId) -> Result<Option<User>, StoreError> {
        Ok(self.users.read().map_err(poisoned)?.get(&id).cloned())
    }

    fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(self
            .users
            .read()
            .map_err(poisoned)?
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    fn children_of(&self, parent_id: UserId) -> Result<Vec<User>, StoreError> {
        Ok(self
            .users
            .read()
            .map_err(poisoned)?
            .values()
            .filter(|u| u.parent_id == Some(parent_id))
            .cloned()
            .collect())
    }

    fn update_profile(
        &self,
        id: UserId,
        display_name: Option<String>,
        password_hash: Option<String>,
    ) -> Result<Option<User>, StoreError> {
        let mut users = self.users.write().map_err(poisoned)?;
        let Some(user) = users.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(display_name) = display_name {
            user.display_name = display_name;
        }
        if let Some(password_hash) = password_hash {
            user.password_hash = password_hash;
        }
        Ok(Some(user.clone()))
    }

    fn list(&self) -> Result<Vec<User>, StoreError> {
        Ok(all(&*self.users.read().map_err(poisoned)?))
    }
}

impl StorefrontStore for InMemoryStore {
    fn insert(&self, storefront: Storefront) -> Result<(), StoreError> {
        self.storefronts
            .write()
            .map_err(poisoned)?
            .insert(storefront.id, storefront);
        Ok(())
    }

    fn get(&self, id: StorefrontId) -> Result<Option<Storefront>, StoreError> {
        Ok(self.storefronts.read().map_err(poisoned)?.get(&id).cloned())
    }

    fn find_by_kid(&self, kid_id: UserId) -> Result<Option<Storefront>, StoreError> {
        Ok(self
            .storefronts
            .read()
            .map_err(poisoned)?
            .values()
            .find(|s| s.kid_id == kid_id)
            .cloned())
    }

    fn find_by_kids(&self, kid_ids: &[UserId]) -> Result<Vec<Storefront>, StoreError> {
        Ok(self
            .storefronts
            .read()
            .map_err(poisoned)?
            .values()
            .filter(|s| kid_ids.contains(&s.kid_id))
            .cloned()
            .collect())
    }

    fn update(
        &self,
        id: StorefrontId,
        patch: &StorefrontPatch,
    ) -> Result<Option<Storefront>, StoreError> {
        let mut storefronts = self.storefronts.write().map_err(poisoned)?;
        let Some(storefront) = storefronts.get_mut(&id) else {
            return Ok(None);
        };
        storefront.apply(patch);
        Ok(Some(storefront.clone()))
    }

    fn display_names(
        &self,
        ids: &[StorefrontId],
    ) -> Result<HashMap<StorefrontId, String>, StoreError> {
        let storefronts = self.storefronts.read().map_err(poisoned)?;
        Ok(ids
            .iter()
            .filter_map(|id| storefronts.get(id).map(|s| (*id, s.display_name.clone())))
            .collect())
    }

    fn list(&self) -> Result<Vec<Storefront>, StoreError> {
        Ok(all(&*self.storefronts.read().map_err(poisoned)?))
    }
}

impl ProductStore for InMemoryStore {
    fn insert(&self, product: Product) -> Result<(), StoreError> {
        self.products
            .write()
            .map_err(poisoned)?
            .insert(product.id, product);
        Ok(())
    }

    fn get(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        Ok(self.products.read().map_err(poisoned)?.get(&id).cloned())
    }

    fn find(&self, filter: &ProductFilter) -> Result<Vec<Product>, StoreError> {
        Ok(self
            .products
            .read()
            .map_err(poisoned)?
            .values()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect())
    }

    fn count(&self, filter: &ProductFilter) -> Result<usize, StoreError> {
        Ok(self
            .products
            .read()
            .map_err(poisoned)?
            .values()
            .filter(|p| filter.matches(p))
            .count())
    }

    fn update(&self, id: ProductId, patch: &ProductPatch) -> Result<Option<Product>, StoreError> {
        let mut products = self.products.write().map_err(poisoned)?;
        let Some(product) = products.get_mut(&id) else {
            return Ok(None);
        };
        product.apply(patch);
        Ok(Some(product.clone()))
    }

    fn record_decision(
        &self,
        id: ProductId,
        status: ProductStatus,
        approver: UserId,
        decided_at: DateTime<Utc>,
    ) -> Result<Option<Product>, StoreError> {
        let mut products = self.products.write().map_err(poisoned)?;
        let Some(product) = products.get_mut(&id) else {
            return Ok(None);
        };
        product.status = status;
        product.approver_id = Some(approver);
        product.approved_at = Some(decided_at);
        Ok(Some(product.clone()))
    }

    fn try_decrement_stock(
        &self,
        id: ProductId,
        quantity: u32,
    ) -> Result<StockDecrement, StoreError> {
        // Check and write under one lock: the compare-and-swap the settlement
        // engine relies on.
        let mut products = self.products.write().map_err(poisoned)?;
        let Some(product) = products.get_mut(&id) else {
            return Ok(StockDecrement::Missing);
        };
        if product.quantity < quantity {
            return Ok(StockDecrement::Insufficient);
        }
        product.quantity -= quantity;
        if product.quantity == 0 && product.status == ProductStatus::Active {
            product.status = ProductStatus::SoldOut;
        }
        Ok(StockDecrement::Applied {
            remaining: product.quantity,
        })
    }

    fn restore_stock(&self, id: ProductId, quantity: u32) -> Result<(), StoreError> {
        let mut products = self.products.write().map_err(poisoned)?;
        let Some(product) = products.get_mut(&id) else {
            return Ok(());
        };
        product.quantity += quantity;
        if product.status == ProductStatus::SoldOut && product.quantity > 0 {
            product.status = ProductStatus::Active;
        }
        Ok(())
    }

    fn delete(&self, id: ProductId) -> Result<bool, StoreError> {
        Ok(self.products.write().map_err(poisoned)?.remove(&id).is_some())
    }
}

impl OrderStore for InMemoryStore {
    fn insert(&self, order: Order) -> Result<(), StoreError> {
        self.orders.write().map_err(poisoned)?.insert(order.id, order);
        Ok(())
    }

    fn get(&self, id: OrderId) -> Result<Option<Order>, StoreError> {
        Ok(self.orders.read().map_err(poisoned)?.get(&id).cloned())
    }

    fn find_by_buyer(&self, buyer_id: UserId) -> Result<Vec<Order>, StoreError> {
        Ok(self
            .orders
            .read()
            .map_err(poisoned)?
            .values()
            .filter(|o| o.buyer_id == buyer_id)
            .cloned()
            .collect())
    }

    fn find_touching_storefront(
        &self,
        storefront_id: StorefrontId,
    ) -> Result<Vec<Order>, StoreError> {
        Ok(self
            .orders
            .read()
            .map_err(poisoned)?
            .values()
            .filter(|o| o.touches_storefront(storefront_id))
            .cloned()
            .collect())
    }

    fn completed_earnings_cents(
        &self,
        storefront_ids: &[StorefrontId],
    ) -> Result<u64, StoreError> {
        let orders = self.orders.read().map_err(poisoned)?;
        Ok(orders
            .values()
            .filter(|o| o.status == OrderStatus::Completed)
            .flat_map(|o| o.items.iter())
            .filter(|i| storefront_ids.contains(&i.storefront_id))
            // Settlement rejects overflowing line items, so saturation only
            // guards records written by another backend.
            .fold(0u64, |acc, i| {
                acc.saturating_add(i.subtotal_cents().unwrap_or(u64::MAX))
            }))
    }

    fn list(&self) -> Result<Vec<Order>, StoreError> {
        Ok(all(&*self.orders.read().map_err(poisoned)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(quantity: u32) -> Product {
        Product {
            id: ProductId::new(),
            storefront_id: StorefrontId::new(),
            name: "Birdhouse".to_string(),
            description: String::new(),
            price_cents: 2500,
            quantity,
            images: vec![],
            image_names: vec![],
            size: None,
            materials: None,
            time_required: None,
            status: ProductStatus::Active,
            approver_id: None,
            approved_at: None,
        }
    }

    #[test]
    fn decrement_takes_stock_and_flips_sold_out_at_zero() {
        let store = InMemoryStore::new();
        let p = product(3);
        let id = p.id;
        ProductStore::insert(&store, p).unwrap();

        assert_eq!(
            store.try_decrement_stock(id, 2).unwrap(),
            StockDecrement::Applied { remaining: 1 }
        );
        assert_eq!(
            store.try_decrement_stock(id, 1).unwrap(),
            StockDecrement::Applied { remaining: 0 }
        );
        let p = ProductStore::get(&store, id).unwrap().unwrap();
        assert_eq!(p.status, ProductStatus::SoldOut);
    }

    #[test]
    fn decrement_refuses_when_stock_is_short() {
        let store = InMemoryStore::new();
        let p = product(1);
        let id = p.id;
        ProductStore::insert(&store, p).unwrap();

        assert_eq!(
            store.try_decrement_stock(id, 2).unwrap(),
            StockDecrement::Insufficient
        );
        assert_eq!(
            ProductStore::get(&store, id).unwrap().unwrap().quantity,
            1
        );
        assert_eq!(
            store.try_decrement_stock(ProductId::new(), 1).unwrap(),
            StockDecrement::Missing
        );
    }

    #[test]
    fn restore_undoes_a_decrement_including_sold_out() {
        let store = InMemoryStore::new();
        let p = product(2);
        let id = p.id;
        ProductStore::insert(&store, p).unwrap();

        store.try_decrement_stock(id, 2).unwrap();
        store.restore_stock(id, 2).unwrap();
        let p = ProductStore::get(&store, id).unwrap().unwrap();
        assert_eq!(p.quantity, 2);
        assert_eq!(p.status, ProductStatus::Active);

        // Restoring a deleted product is a quiet no-op.
        store.restore_stock(ProductId::new(), 1).unwrap();
    }

    #[test]
    fn email_lookup_is_case_insensitive() {
        let store = InMemoryStore::new();
        let user = User {
            id: UserId::new(),
            email: "Kid@Example.com".to_string(),
            display_name: "Kid".to_string(),
            role: sproutstand_auth::Role::KidSeller,
            parent_id: None,
            birthday: None,
            password_hash: String::new(),
        };
        UserStore::insert(&store, user).unwrap();
        assert!(store.find_by_email("kid@example.com").unwrap().is_some());
        assert!(store.find_by_email("other@example.com").unwrap().is_none());
    }
}
