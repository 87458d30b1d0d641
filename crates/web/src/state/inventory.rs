// =============================================================================
// Storedesk Web - Inventory Store
// =============================================================================

use std::sync::Arc;

use leptos::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::menu::{self, PageQuery};
use crate::api::{Gateway, Lookup};

const SEARCH_FAILED: &str = "검색 실패 또는 결과가 없습니다.";

/// Store inventory item shown in the detail panel.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InventoryDetail {
    pub store_inventory_id: Option<i64>,
    pub name: String,
    pub expiry_date: Option<String>,
    pub miniquantity: Option<f64>,
    pub unit: String,
}

#[derive(Clone, Copy)]
pub struct InventoryStore {
    pub detail: RwSignal<InventoryDetail>,
    pub inventory_list: RwSignal<Vec<Value>>,
    pub selected: RwSignal<Option<Value>>,
    pub error: RwSignal<Option<String>>,
    gateway: StoredValue<Arc<Gateway>>,
}

impl InventoryStore {
    pub fn new(gateway: Arc<Gateway>) -> Self {
        Self {
            detail: RwSignal::new(InventoryDetail::default()),
            inventory_list: RwSignal::new(Vec::new()),
            selected: RwSignal::new(None),
            error: RwSignal::new(None),
            gateway: StoredValue::new(gateway),
        }
    }

    /// Register an ingredient. Returns the server's envelope, or `None` when
    /// the request never got a response.
    pub async fn register_store_inventory(&self, data: &Value) -> Option<Value> {
        let gateway = self.gateway.get_value();
        match menu::register_inventory(&gateway.menu, data).await {
            Ok(body) => Some(body),
            Err(e) => {
                log::error!("registerStoreInventory failed: {}", e);
                None
            }
        }
    }

    /// Record stock received.
    pub async fn total_store_inventory(&self, data: &Value) -> bool {
        let gateway = self.gateway.get_value();
        let received = menu::total_store_inventory(&gateway.menu, data).await.is_some();
        if !received {
            log::error!("totalStoreInventory failed");
        }
        received
    }

    /// Look up an item and show it in the detail panel.
    pub async fn search_inventory(&self, inventory_id: i64) -> Option<InventoryDetail> {
        let gateway = self.gateway.get_value();
        let found = match menu::search_inventory(&gateway.menu, inventory_id).await {
            Lookup::Found(data) => serde_json::from_value::<InventoryDetail>(data).ok(),
            Lookup::NotFound => None,
        };

        match found {
            Some(detail) => {
                self.error.set(None);
                self.set_inventory_detail(detail.clone());
                Some(detail)
            }
            None => {
                log::warn!("No inventory found for {}", inventory_id);
                self.error.set(Some(SEARCH_FAILED.to_string()));
                None
            }
        }
    }

    /// Reload the first page of store inventory. A failed load keeps the
    /// current list.
    pub async fn load_inventory_list(&self) {
        let gateway = self.gateway.get_value();
        let items = menu::get_store_inventory_list(&gateway.menu, &PageQuery::default())
            .await
            .and_then(|content| serde_json::from_value::<Vec<Value>>(content).ok());
        match items {
            Some(items) => self.inventory_list.set(items),
            None => log::error!("Failed to fetch inventory list"),
        }
    }

    /// Select a loaded item by `id`; unknown ids clear the selection.
    pub fn select_inventory(&self, inventory_id: i64) {
        let found = self.inventory_list.with_untracked(|items| {
            items
                .iter()
                .find(|item| item.get("id").and_then(Value::as_i64) == Some(inventory_id))
                .cloned()
        });
        self.selected.set(found);
    }

    pub fn set_inventory_detail(&self, detail: InventoryDetail) {
        self.detail.set(detail);
    }
}
