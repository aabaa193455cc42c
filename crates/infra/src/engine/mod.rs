//! Engines: stateless services over the document store.
//!
//! Each engine takes a resolved caller plus typed parameters and returns a
//! domain value or a typed `DomainError`; the HTTP layer only maps verbs and
//! status codes onto these calls.

mod accounts;
mod admin;
mod guardian;
mod lifecycle;
mod registry;
mod settlement;

pub use accounts::AccountsEngine;
pub use admin::AdminEngine;
pub use guardian::{GuardianEngine, GuardianStats};
pub use lifecycle::{LifecycleEngine, ListQuery, ProductListing};
pub use registry::RegistryEngine;
pub use settlement::SettlementEngine;
