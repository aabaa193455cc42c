//! `sproutstand-infra`: document store + the engines over it.
//!
//! The store traits are the storage boundary; `InMemoryStore` is the
//! dev/test backend. Engines are stateless between calls and hold injected
//! store handles.

pub mod engine;
pub mod store;


pub use engine::{
    AccountsEngine, AdminEngine, GuardianEngine, GuardianStats, LifecycleEngine, ListQuery,
    ProductListing, RegistryEngine, SettlementEngine,
};
pub use store::{
    InMemoryStore, OrderStore, ProductStore, StockDecrement, StoreError, StorefrontStore,
    UserStore,
};
