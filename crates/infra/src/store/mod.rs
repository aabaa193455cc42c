//! Document-store boundary: one trait per collection, plus the in-memory
//! backend used for dev and tests.

mod in_memory;
mod traits;

pub use in_memory::InMemoryStore;
pub use traits::{
    OrderStore, ProductStore, StockDecrement, StoreError, StorefrontStore, UserStore,
};
