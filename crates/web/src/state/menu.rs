// =============================================================================
// Storedesk Web - Menu Store
// =============================================================================
// Categories, ingredient choices and options used by the menu editor.
// The three loaders are independent; they share one error slot and the last
// failure to finish is the one shown.
// =============================================================================

use std::sync::Arc;

use leptos::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::menu::{self, PageQuery};
use crate::api::Gateway;

/// Name of the pseudo-category for menus without one.
pub const UNCATEGORIZED: &str = "카테고리 없음";

const CATEGORIES_FAILED: &str = "카테고리 로딩 실패";
const INVENTORY_FAILED: &str = "재고 목록 로딩 실패";
const OPTIONS_FAILED: &str = "옵션 목록 로딩 실패";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: Option<i64>,
    pub name: String,
}

impl Category {
    pub fn uncategorized() -> Self {
        Self {
            id: None,
            name: UNCATEGORIZED.to_string(),
        }
    }
}

/// An ingredient offered when composing a recipe.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryOption {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub unit: String,
}

#[derive(Clone, Copy)]
pub struct MenuStore {
    pub categories: RwSignal<Vec<Category>>,
    pub inventory_options: RwSignal<Vec<InventoryOption>>,
    pub option_list: RwSignal<Vec<Value>>,
    pub loading_categories: RwSignal<bool>,
    pub loading_inventory: RwSignal<bool>,
    pub loading_options: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
    gateway: StoredValue<Arc<Gateway>>,
}

impl MenuStore {
    pub fn new(gateway: Arc<Gateway>) -> Self {
        Self {
            categories: RwSignal::new(Vec::new()),
            inventory_options: RwSignal::new(Vec::new()),
            option_list: RwSignal::new(Vec::new()),
            loading_categories: RwSignal::new(false),
            loading_inventory: RwSignal::new(false),
            loading_options: RwSignal::new(false),
            error: RwSignal::new(None),
            gateway: StoredValue::new(gateway),
        }
    }

    fn gateway(&self) -> Arc<Gateway> {
        self.gateway.get_value()
    }

    /// First page of categories followed by [`UNCATEGORIZED`].
    pub async fn load_categories(&self) {
        self.loading_categories.set(true);
        self.error.set(None);

        let gateway = self.gateway();
        let loaded = menu::get_category_list(&gateway.menu, &PageQuery::default())
            .await
            .and_then(|page| content::<Category>(&page));
        match loaded {
            Some(mut categories) => {
                categories.push(Category::uncategorized());
                self.categories.set(categories);
            }
            None => {
                log::error!("{}", CATEGORIES_FAILED);
                self.error.set(Some(CATEGORIES_FAILED.to_string()));
            }
        }

        self.loading_categories.set(false);
    }

    /// Store inventory items reduced to `{id, name, unit}`.
    pub async fn load_inventory_options(&self) {
        self.loading_inventory.set(true);
        self.error.set(None);

        let gateway = self.gateway();
        let loaded = menu::get_store_inventory_list(&gateway.menu, &PageQuery::default())
            .await
            .and_then(|items| serde_json::from_value::<Vec<InventoryOption>>(items).ok());
        match loaded {
            Some(options) => {
                log::debug!("Loaded {} inventory options", options.len());
                self.inventory_options.set(options);
            }
            None => {
                log::error!("{}", INVENTORY_FAILED);
                self.error.set(Some(INVENTORY_FAILED.to_string()));
            }
        }

        self.loading_inventory.set(false);
    }

    pub async fn load_option_list(&self) {
        self.loading_options.set(true);
        self.error.set(None);

        let gateway = self.gateway();
        let loaded = menu::get_option_list(&gateway.menu, &PageQuery::default())
            .await
            .and_then(|page| content::<Value>(&page));
        match loaded {
            Some(options) => self.option_list.set(options),
            None => {
                log::error!("{}", OPTIONS_FAILED);
                self.error.set(Some(OPTIONS_FAILED.to_string()));
            }
        }

        self.loading_options.set(false);
    }

    /// Load categories and inventory options concurrently.
    pub async fn initialize(&self) {
        self.error.set(None);
        futures::join!(self.load_categories(), self.load_inventory_options());
    }

    pub async fn initialize_options(&self) {
        self.error.set(None);
        self.load_option_list().await;
    }
}

/// `content` array of a page payload.
fn content<T: serde::de::DeserializeOwned>(page: &Value) -> Option<Vec<T>> {
    let items = page.get("content")?.clone();
    serde_json::from_value(items).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Method;
    use crate::test_support::{block_on, gateway, MockTransport, RecordingNavigator};
    use serde_json::json;

    fn store(transport: &Arc<MockTransport>) -> MenuStore {
        let navigator = Arc::new(RecordingNavigator::default());
        MenuStore::new(gateway(transport, &navigator))
    }

    fn inventory_page(transport: &MockTransport) {
        transport.respond(
            Method::Get,
            "/api/inventory/storeInventory/getList",
            200,
            json!({
                "code": 200,
                "data": {
                    "content": [
                        { "id": 1, "name": "우유", "unit": "ml", "quantity": 3000 },
                        { "id": 2, "name": "원두", "unit": "g", "quantity": 500 }
                    ]
                }
            }),
        );
    }

    #[test]
    fn categories_end_with_uncategorized() {
        let transport = MockTransport::new();
        transport.respond(
            Method::Get,
            "/api/category/getList",
            200,
            json!({ "code": 200, "data": { "content": [{ "id": 4, "name": "음료" }] } }),
        );
        let store = store(&transport);

        block_on(store.load_categories());

        assert_eq!(
            store.categories.get_untracked(),
            vec![
                Category { id: Some(4), name: "음료".into() },
                Category::uncategorized()
            ]
        );
        assert!(!store.loading_categories.get_untracked());
    }

    #[test]
    fn initialize_keeps_partial_results_and_the_failure() {
        let transport = MockTransport::new();
        transport.fail(Method::Get, "/api/category/getList", "connection reset");
        inventory_page(&transport);
        let store = store(&transport);

        block_on(store.initialize());

        assert!(!store.loading_categories.get_untracked());
        assert!(!store.loading_inventory.get_untracked());
        assert_eq!(store.error.get_untracked().as_deref(), Some("카테고리 로딩 실패"));
        assert_eq!(
            store.inventory_options.get_untracked(),
            vec![
                InventoryOption { id: 1, name: "우유".into(), unit: "ml".into() },
                InventoryOption { id: 2, name: "원두".into(), unit: "g".into() }
            ]
        );
    }

    #[test]
    fn failed_load_keeps_previous_options() {
        let transport = MockTransport::new();
        transport.respond(
            Method::Get,
            "/api/option/list",
            200,
            json!({ "code": 200, "data": { "content": [{ "id": 1, "name": "샷 추가" }] } }),
        );
        let store = store(&transport);
        block_on(store.initialize_options());

        transport.respond(Method::Get, "/api/option/list", 200, json!({ "code": 500 }));
        block_on(store.initialize_options());

        assert_eq!(store.option_list.get_untracked().len(), 1);
        assert_eq!(store.error.get_untracked().as_deref(), Some("옵션 목록 로딩 실패"));
        assert!(!store.loading_options.get_untracked());
    }
}
