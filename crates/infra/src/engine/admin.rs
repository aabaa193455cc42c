use std::sync::Arc;

use sproutstand_auth::{Role, require_role};
use sproutstand_core::DomainResult;
use sproutstand_identity::User;
use sproutstand_orders::Order;
use sproutstand_storefront::Storefront;

use sproutstand_catalog::{Product, ProductFilter};

use crate::store::{OrderStore, ProductStore, StorefrontStore, UserStore};

/// Unscoped listings for the admin role.
pub struct AdminEngine {
    users: Arc<dyn UserStore>,
    storefronts: Arc<dyn StorefrontStore>,
    products: Arc<dyn ProductStore>,
    orders: Arc<dyn OrderStore>,
}

impl AdminEngine {
    pub fn new(
        users: Arc<dyn UserStore>,
        storefronts: Arc<dyn StorefrontStore>,
        products: Arc<dyn ProductStore>,
        orders: Arc<dyn OrderStore>,
    ) -> Self {
        Self {
            users,
            storefronts,
            products,
            orders,
        }
    }

    pub fn users(&self, caller: &User) -> DomainResult<Vec<User>> {
        require_role(caller.role, Role::Admin)?;
        self.users.list().map_err(Into::into)
    }

    pub fn storefronts(&self, caller: &User) -> DomainResult<Vec<Storefront>> {
        require_role(caller.role, Role::Admin)?;
        self.storefronts.list().map_err(Into::into)
    }

    pub fn products(&self, caller: &User) -> DomainResult<Vec<Product>> {
        require_role(caller.role, Role::Admin)?;
        self.products.find(&ProductFilter::default()).map_err(Into::into)
    }

    pub fn orders(&self, caller: &User) -> DomainResult<Vec<Order>> {
        require_role(caller.role, Role::Admin)?;
        self.orders.list().map_err(Into::into)
    }
}
