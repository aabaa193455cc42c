//! Store + engine wiring.
//!
//! One in-memory store backs every collection trait; engines receive their
//! handles here and nowhere else.

use std::sync::Arc;

use chrono::Duration;

use sproutstand_auth::{ArgonHs256Credentials, CredentialService};
use sproutstand_infra::{
    AccountsEngine, AdminEngine, GuardianEngine, InMemoryStore, LifecycleEngine, RegistryEngine,
    SettlementEngine,
};

/// Everything the route handlers need, bundled behind one `Extension`.
pub struct AppServices {
    pub accounts: Arc<AccountsEngine>,
    pub registry: RegistryEngine,
    pub lifecycle: Arc<LifecycleEngine>,
    pub guardian: GuardianEngine,
    pub settlement: SettlementEngine,
    pub admin: AdminEngine,
}

pub fn build_services(jwt_secret: String) -> AppServices {
    let store = Arc::new(InMemoryStore::new());
    let credentials: Arc<dyn CredentialService> =
        Arc::new(ArgonHs256Credentials::new(jwt_secret.as_bytes()));

    let accounts = Arc::new(AccountsEngine::new(
        store.clone(),
        credentials,
        Duration::hours(24),
    ));
    let lifecycle = Arc::new(LifecycleEngine::new(
        store.clone(),
        store.clone(),
        store.clone(),
    ));

    AppServices {
        accounts,
        registry: RegistryEngine::new(store.clone()),
        guardian: GuardianEngine::new(
            store.clone(),
            store.clone(),
            store.clone(),
            store.clone(),
            lifecycle.clone(),
        ),
        settlement: SettlementEngine::new(store.clone(), store.clone(), store.clone()),
        admin: AdminEngine::new(store.clone(), store.clone(), store.clone(), store),
        lifecycle,
    }
}
