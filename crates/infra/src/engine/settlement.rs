use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;

use sproutstand_core::{DomainError, DomainResult, OrderId, ProductId};
use sproutstand_identity::User;
use sproutstand_orders::{ItemRequest, Order, OrderItem, OrderStatus, order_total, sort_by_recency};

use crate::store::{OrderStore, ProductStore, StockDecrement, StorefrontStore};

/// Order settlement: convert a cart of item requests into a completed order
/// with decremented stock.
pub struct SettlementEngine {
    products: Arc<dyn ProductStore>,
    storefronts: Arc<dyn StorefrontStore>,
    orders: Arc<dyn OrderStore>,
}

impl SettlementEngine {
    pub fn new(
        products: Arc<dyn ProductStore>,
        storefronts: Arc<dyn StorefrontStore>,
        orders: Arc<dyn OrderStore>,
    ) -> Self {
        Self {
            products,
            storefronts,
            orders,
        }
    }

    /// Settle a cart, processing items in input order.
    ///
    /// Per item: resolve the product, check stock, then take stock with an
    /// atomic conditional decrement. Losing the decrement race is
    /// `StockConflict`. Any failure rolls back the decrements already taken
    /// in this call, so a failed order never leaves stock missing.
    ///
    /// Prices, names and storefront ids are snapshotted at purchase time;
    /// the live product is never consulted again downstream.
    pub fn create_order(&self, caller: &User, items: Vec<ItemRequest>) -> DomainResult<Order> {
        if items.is_empty() {
            return Err(DomainError::invalid_input("order must contain at least one item"));
        }
        if items.iter().any(|i| i.quantity == 0) {
            return Err(DomainError::invalid_input("item quantity must be at least 1"));
        }

        let mut taken: Vec<(ProductId, u32)> = Vec::with_capacity(items.len());
        let mut order_items: Vec<OrderItem> = Vec::with_capacity(items.len());

        for request in &items {
            let snapshot = match self.settle_item(request) {
                Ok(snapshot) => snapshot,
                Err(err) => {
                    self.roll_back(&taken);
                    return Err(err);
                }
            };
            taken.push((request.product_id, request.quantity));
            order_items.push(snapshot);
        }

        let total_cents = match order_total(&order_items) {
            Some(total) => total,
            None => {
                self.roll_back(&taken);
                return Err(DomainError::invalid_input(
                    "order total overflows the supported amount",
                ));
            }
        };

        let order = Order {
            id: OrderId::new(),
            buyer_id: caller.id,
            total_cents,
            items: order_items,
            status: OrderStatus::Completed,
            created_at: Utc::now(),
        };
        if let Err(err) = self.orders.insert(order.clone()) {
            self.roll_back(&taken);
            return Err(err.into());
        }
        tracing::info!(order_id = %order.id, buyer_id = %caller.id, total_cents = order.total_cents, "order settled");
        Ok(order)
    }

    /// Union of the caller's purchases and, for kid sellers, orders touching
    /// their storefront; deduplicated by order id, newest first.
    pub fn my_orders(&self, caller: &User) -> DomainResult<Vec<Order>> {
        let mut by_id: HashMap<OrderId, Order> = self
            .orders
            .find_by_buyer(caller.id)?
            .into_iter()
            .map(|o| (o.id, o))
            .collect();

        if caller.is_kid_seller() {
            if let Some(storefront) = self.storefronts.find_by_kid(caller.id)? {
                for order in self.orders.find_touching_storefront(storefront.id)? {
                    by_id.entry(order.id).or_insert(order);
                }
            }
        }

        let mut orders: Vec<Order> = by_id.into_values().collect();
        sort_by_recency(&mut orders);
        Ok(orders)
    }

    fn settle_item(&self, request: &ItemRequest) -> DomainResult<OrderItem> {
        let product = self
            .products
            .get(request.product_id)?
            .ok_or_else(|| DomainError::not_found(format!("product {}", request.product_id)))?;

        if product.quantity < request.quantity {
            return Err(DomainError::insufficient_stock(product.name));
        }

        match self.products.try_decrement_stock(request.product_id, request.quantity)? {
            StockDecrement::Applied { .. } => Ok(OrderItem {
                product_id: product.id,
                quantity: request.quantity,
                price_cents: product.price_cents,
                product_name: product.name,
                storefront_id: product.storefront_id,
            }),
            StockDecrement::Insufficient => Err(DomainError::stock_conflict(product.name)),
            StockDecrement::Missing => {
                Err(DomainError::not_found(format!("product {}", request.product_id)))
            }
        }
    }

    /// Compensating rollback of decrements taken earlier in a failed call.
    fn roll_back(&self, taken: &[(ProductId, u32)]) {
        for &(product_id, quantity) in taken {
            if let Err(err) = self.products.restore_stock(product_id, quantity) {
                tracing::error!(product_id = %product_id, quantity, %err, "failed to restore stock after aborted settlement");
            }
        }
        if !taken.is_empty() {
            tracing::warn!(items = taken.len(), "settlement aborted, stock restored");
        }
    }
}
