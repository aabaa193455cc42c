use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use sproutstand_core::{Entity, OrderId, ProductId, StorefrontId, UserId};

/// Order status. Settlement is simulated as immediately successful, so every
/// order this system writes is `completed`; `pending` exists for records the
/// store may hold from elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Completed,
    Pending,
}

/// One settled line of an order.
///
/// `price_cents` and `product_name` are snapshots taken at purchase time and
/// never re-derived from the live product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: ProductId,
    pub quantity: u32,
    pub price_cents: u64,
    pub product_name: String,
    pub storefront_id: StorefrontId,
}

impl OrderItem {
    /// `None` when price times quantity overflows u64.
    pub fn subtotal_cents(&self) -> Option<u64> {
        self.price_cents.checked_mul(u64::from(self.quantity))
    }
}

/// An append-only settlement record. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub buyer_id: UserId,
    pub items: Vec<OrderItem>,
    pub total_cents: u64,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

impl Order {
    pub fn touches_storefront(&self, storefront_id: StorefrontId) -> bool {
        self.items.iter().any(|i| i.storefront_id == storefront_id)
    }
}

impl Entity for Order {
    type Id = OrderId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// A buyer's requested line before settlement.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ItemRequest {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// Sum of item subtotals. `None` when any subtotal, or the running sum,
/// overflows u64; callers reject such carts instead of wrapping.
pub fn order_total(items: &[OrderItem]) -> Option<u64> {
    items
        .iter()
        .try_fold(0u64, |acc, item| acc.checked_add(item.subtotal_cents()?))
}

/// Newest first. `created_at` is server-assigned and always present, so no
/// fallback ordering key is needed.
pub fn sort_by_recency(orders: &mut [Order]) {
    orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use proptest::prelude::*;

    fn item(price_cents: u64, quantity: u32) -> OrderItem {
        OrderItem {
            product_id: ProductId::new(),
            quantity,
            price_cents,
            product_name: "Painted Rock".to_string(),
            storefront_id: StorefrontId::new(),
        }
    }

    fn order_at(created_at: DateTime<Utc>) -> Order {
        Order {
            id: OrderId::new(),
            buyer_id: UserId::new(),
            items: vec![item(100, 1)],
            total_cents: 100,
            status: OrderStatus::Completed,
            created_at,
        }
    }

    #[test]
    fn total_is_sum_of_subtotals() {
        let items = vec![item(500, 2), item(1200, 1)];
        assert_eq!(order_total(&items), Some(2200));
        assert_eq!(order_total(&[]), Some(0));
    }

    #[test]
    fn overflowing_total_is_detected() {
        assert_eq!(item(u64::MAX, 2).subtotal_cents(), None);
        assert_eq!(order_total(&[item(u64::MAX, 2)]), None);
        // Each subtotal fits but the running sum does not.
        assert_eq!(order_total(&[item(u64::MAX, 1), item(1, 1)]), None);
        assert_eq!(order_total(&[item(u64::MAX, 1)]), Some(u64::MAX));
    }

    #[test]
    fn recency_sort_is_newest_first() {
        let now = Utc::now();
        let mut orders = vec![
            order_at(now - Duration::hours(2)),
            order_at(now),
            order_at(now - Duration::hours(1)),
        ];
        sort_by_recency(&mut orders);
        assert_eq!(orders[0].created_at, now);
        assert_eq!(orders[2].created_at, now - Duration::hours(2));
    }

    #[test]
    fn touches_storefront_scans_items() {
        let order = order_at(Utc::now());
        let mine = order.items[0].storefront_id;
        assert!(order.touches_storefront(mine));
        assert!(!order.touches_storefront(StorefrontId::new()));
    }

    proptest! {
        #[test]
        fn total_matches_item_arithmetic(
            lines in prop::collection::vec((0u64..100_000, 1u32..100), 0..20)
        ) {
            let items: Vec<OrderItem> = lines
                .iter()
                .map(|&(price_cents, quantity)| item(price_cents, quantity))
                .collect();
            let expected: u64 = lines
                .iter()
                .map(|&(price_cents, quantity)| price_cents * u64::from(quantity))
                .sum();
            prop_assert_eq!(order_total(&items), Some(expected));
        }
    }
}
