// =============================================================================
// Storedesk Web - Global Application State
// =============================================================================
// Table of Contents:
// 1. Submodules
// 2. App State
// =============================================================================

pub mod auth;
pub mod inventory;
pub mod menu;
pub mod sales;
pub mod signup;
pub mod storage;

pub use auth::{AuthStore, SessionState, UserInfo, UserProfile};
pub use inventory::{InventoryDetail, InventoryStore};
pub use menu::{Category, InventoryOption, MenuStore};
pub use sales::SaleStore;
pub use signup::{PasswordResetStore, SignupForm, SignupStore};
pub use storage::{BrowserStorage, KeyValueStore, MemoryStorage, StorageError};

use std::sync::Arc;

use leptos::prelude::*;

use crate::api::{FetchTransport, Gateway, Navigator, RouterNavigator, Transport};
use crate::config::ApiConfig;

// -----------------------------------------------------------------------------
// 2. App State
// -----------------------------------------------------------------------------

/// Global application state provided via Leptos context.
#[derive(Clone)]
pub struct AppState {
    /// The three area clients.
    pub gateway: Arc<Gateway>,

    pub auth: AuthStore,
    pub menu: MenuStore,
    pub inventory: InventoryStore,
    pub sales: SaleStore,
    pub signup: SignupStore,
    pub password_reset: PasswordResetStore,

    /// Redirects requested by the interceptor, consumed inside the router.
    pub redirects: RouterNavigator,

    /// Global loading state.
    pub loading: RwSignal<bool>,

    /// Global error message.
    pub error: RwSignal<Option<String>>,
}

impl AppState {
    /// Create the browser state: fetch transport, router navigation and
    /// `localStorage`.
    pub fn new() -> Self {
        let config = ApiConfig::from_env();
        log::debug!("API base URL: {}", config.base_url());
        let redirects = RouterNavigator::new();
        Self {
            redirects,
            ..Self::with_services(
                &config,
                Arc::new(FetchTransport),
                Arc::new(redirects),
                Arc::new(BrowserStorage),
            )
        }
    }

    /// Create the state over explicit services.
    pub fn with_services(
        config: &ApiConfig,
        transport: Arc<dyn Transport>,
        navigator: Arc<dyn Navigator>,
        storage: Arc<dyn KeyValueStore>,
    ) -> Self {
        let gateway = Arc::new(Gateway::new(config, transport, navigator));
        Self {
            auth: AuthStore::new(gateway.clone(), storage),
            menu: MenuStore::new(gateway.clone()),
            inventory: InventoryStore::new(gateway.clone()),
            sales: SaleStore::new(gateway.clone()),
            signup: SignupStore::new(gateway.clone()),
            password_reset: PasswordResetStore::new(gateway.clone()),
            redirects: RouterNavigator::new(),
            gateway,
            loading: RwSignal::new(false),
            error: RwSignal::new(None),
        }
    }

    /// Set a global error message.
    pub fn set_error(&self, message: impl Into<String>) {
        self.error.set(Some(message.into()));
    }

    /// Clear the global error message.
    pub fn clear_error(&self) {
        self.error.set(None);
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
