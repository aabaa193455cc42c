//! `sproutstand-orders`: immutable settlement records.

pub mod order;

pub use order::{ItemRequest, Order, OrderItem, OrderStatus, order_total, sort_by_recency};
