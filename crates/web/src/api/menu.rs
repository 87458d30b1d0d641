// =============================================================================
// Storedesk Web - Menu Area API
// =============================================================================
// Table of Contents:
// 1. Paging
// 2. Categories
// 3. Options
// 4. Menus
// 5. Store Inventory
// 6. Ingredient Inventory
// =============================================================================

use serde::Serialize;
use serde_json::{json, Value};

use super::envelope::{FailureMessages, SERVER_ERROR_MESSAGE};
use super::{ApiClient, ApiError, ApiRequest, Envelope, Lookup, Outcome};

// -----------------------------------------------------------------------------
// 1. Paging
// -----------------------------------------------------------------------------

/// Page request shared by every list endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageQuery {
    pub page: u32,
    pub size: u32,
    pub keyword: String,
}

impl PageQuery {
    pub fn new(page: u32, size: u32) -> Self {
        Self {
            page,
            size,
            keyword: String::new(),
        }
    }

    pub fn keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = keyword.into();
        self
    }

    /// `page` and `size`, plus `keyword` when it is not blank.
    fn apply(&self, request: ApiRequest) -> ApiRequest {
        let request = request.query("page", self.page).query("size", self.size);
        if self.keyword.trim().is_empty() {
            request
        } else {
            request.query("keyword", &self.keyword)
        }
    }

    /// `page`, `size` and `keyword`, even when the keyword is empty.
    fn apply_all(&self, request: ApiRequest) -> ApiRequest {
        request
            .query("page", self.page)
            .query("size", self.size)
            .query("keyword", &self.keyword)
    }
}

impl Default for PageQuery {
    fn default() -> Self {
        Self::new(0, 10)
    }
}

/// Body of the recipe lookup.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct RecipeRequest {
    inventory_id: i64,
}

// -----------------------------------------------------------------------------
// 2. Categories
// -----------------------------------------------------------------------------

/// Register a category.
pub async fn register_category(client: &ApiClient, data: &Value) -> Outcome {
    log::debug!("registerCategory data {}", data);
    let messages = FailureMessages {
        rejected: "카테고리 등록 실패",
        failed: SERVER_ERROR_MESSAGE,
    };
    client
        .mutate(
            "registerCategory",
            ApiRequest::post("/category/register").json(data),
            messages,
        )
        .await
        .without_data()
}

/// One page of categories.
pub async fn get_category_list(client: &ApiClient, page: &PageQuery) -> Option<Value> {
    client
        .fetch(
            "getCategoryList",
            page.apply(ApiRequest::get("/category/getList")),
        )
        .await
}

/// Delete categories; the body names them.
pub async fn delete_category(client: &ApiClient, data: &Value) -> Result<Value, ApiError> {
    client
        .raw(
            "deleteCategory",
            ApiRequest::delete("/category/delete").json(data),
        )
        .await
}

/// Category detail, with the caller's query parameters.
pub async fn get_category(
    client: &ApiClient,
    params: &[(&str, String)],
) -> Result<Value, ApiError> {
    let request = params
        .iter()
        .fold(ApiRequest::get("/category/detail"), |request, (key, value)| {
            request.query(*key, value)
        });
    client.raw("getCategory", request).await
}

/// Category detail for the POS screen.
pub async fn get_pos_category(client: &ApiClient, category_id: i64) -> Result<Value, ApiError> {
    client
        .raw(
            "getPOSCategory",
            ApiRequest::get("/category/detail").query("id", category_id),
        )
        .await
}

/// Rename or reorder a category. Returns the updated category on success.
pub async fn update_category(client: &ApiClient, data: &Value) -> Outcome {
    let messages = FailureMessages {
        rejected: "카테고리 수정 실패",
        failed: SERVER_ERROR_MESSAGE,
    };
    client
        .mutate(
            "updateCategory",
            ApiRequest::put("/category/update").json(data),
            messages,
        )
        .await
}

pub async fn get_pos_category_list(client: &ApiClient) -> Option<Value> {
    client
        .passthrough(
            "getPOSCategoryList",
            ApiRequest::get("/category/getPOSCategoryList"),
        )
        .await
}

// -----------------------------------------------------------------------------
// 3. Options
// -----------------------------------------------------------------------------

/// Register an option.
pub async fn register_option(client: &ApiClient, data: &Value) -> Outcome {
    log::debug!("registerOption data {}", data);
    let messages = FailureMessages {
        rejected: "옵션 등록 실패",
        failed: "옵션 등록 중 오류 발생",
    };
    client
        .mutate(
            "registerOption",
            ApiRequest::post("/option/register").json(data),
            messages,
        )
        .await
        .without_data()
}

pub async fn get_option_list(client: &ApiClient, page: &PageQuery) -> Option<Value> {
    client
        .fetch("getOptionList", page.apply(ApiRequest::get("/option/list")))
        .await
}

/// Delete several options at once.
pub async fn delete_options(client: &ApiClient, option_ids: &[i64]) -> bool {
    client
        .flag(
            "deleteOptions",
            ApiRequest::post("/option/delete/batch").json(option_ids),
        )
        .await
}

pub async fn update_option(client: &ApiClient, data: &Value) -> Outcome {
    let messages = FailureMessages {
        rejected: "옵션 수정 실패",
        failed: SERVER_ERROR_MESSAGE,
    };
    client
        .mutate("updateOption", ApiRequest::put("/option").json(data), messages)
        .await
}

pub async fn get_option_by_id(client: &ApiClient, option_id: i64) -> Option<Value> {
    client
        .fetch(
            "getOptionById",
            ApiRequest::get(format!("/option/{}", option_id)),
        )
        .await
}

// -----------------------------------------------------------------------------
// 4. Menus
// -----------------------------------------------------------------------------

/// One page of menus. A rejected response's body is returned as well.
pub async fn get_menu_page(client: &ApiClient, page: &PageQuery) -> Result<Value, ApiError> {
    log::debug!("Menu page {} size {}", page.page, page.size);
    client
        .settle("getMenuList", page.apply(ApiRequest::get("/menu/getList")))
        .await
}

pub async fn get_pos_menu_list(client: &ApiClient) -> Option<Value> {
    client
        .passthrough("getPOSMenuList", ApiRequest::get("/menu/getPOSList"))
        .await
}

pub async fn get_menu_detail(client: &ApiClient, menu_id: i64) -> Option<Value> {
    client
        .fetch("getMenuDetail", ApiRequest::get(format!("/menu/{}", menu_id)))
        .await
}

/// Register a menu. Returns the created menu on success.
pub async fn register_menu(client: &ApiClient, data: &Value) -> Outcome {
    let messages = FailureMessages {
        rejected: "메뉴 등록 실패",
        failed: SERVER_ERROR_MESSAGE,
    };
    client
        .mutate("registerMenu", ApiRequest::post("/menu/register").json(data), messages)
        .await
}

pub async fn update_menu(client: &ApiClient, data: &Value) -> Outcome {
    let messages = FailureMessages {
        rejected: "메뉴 수정 실패",
        failed: SERVER_ERROR_MESSAGE,
    };
    client
        .mutate("updateMenu", ApiRequest::put("/menu/update").json(data), messages)
        .await
}

pub async fn delete_menus(client: &ApiClient, menu_ids: &[i64]) -> bool {
    client
        .flag("deleteMenus", ApiRequest::delete("/menu").json(menu_ids))
        .await
}

/// Ask the server whether an order can be served from current stock.
///
/// Always yields an envelope: on failure a synthetic code-500 one.
pub async fn check_stock_availability(client: &ApiClient, order: &Value) -> Value {
    client
        .passthrough(
            "checkStockAvailability",
            ApiRequest::post("/order/validateOrder").json(order),
        )
        .await
        .unwrap_or_else(|| json!({ "code": 500, "message": SERVER_ERROR_MESSAGE, "data": null }))
}

// -----------------------------------------------------------------------------
// 5. Store Inventory
// -----------------------------------------------------------------------------

pub async fn register_store_inventory(client: &ApiClient, data: &Value) -> Result<Value, ApiError> {
    log::debug!("registerStoreInventory data {}", data);
    client
        .settle(
            "registerStoreInventory",
            ApiRequest::post("/inventory/registerStoreInventory").json(data),
        )
        .await
}

pub async fn update_store_inventory(client: &ApiClient, data: &Value) -> Result<Value, ApiError> {
    client
        .settle(
            "updateStoreInventory",
            ApiRequest::put("/inventory/storeInventory").json(data),
        )
        .await
}

pub async fn get_inventory_list(client: &ApiClient) -> Option<Value> {
    client
        .passthrough("getInvenList", ApiRequest::get("/inventory/inventoryList"))
        .await
}

/// Totals of one store inventory item across purchases.
pub async fn get_inventory_totals(client: &ApiClient, store_inventory_id: i64) -> Option<Value> {
    client
        .passthrough(
            "getPartiInvenList",
            ApiRequest::get(format!("/inventory/totalInventory/{}", store_inventory_id)),
        )
        .await
}

/// Store inventory item by `inventoryId`, or the 404 sentinel.
pub async fn search_inventory(client: &ApiClient, inventory_id: i64) -> Lookup {
    client
        .lookup(
            "searchInventory",
            ApiRequest::get(format!("/inventory/storeInventory/{}", inventory_id)),
        )
        .await
}

/// Record a purchase against a store inventory item.
pub async fn total_store_inventory(client: &ApiClient, data: &Value) -> Option<Value> {
    client
        .fetch(
            "totalStoreInventory",
            ApiRequest::post("/inventory/totalInventory").json(data),
        )
        .await
}

/// The `content` of one page of store inventory.
pub async fn get_store_inventory_list(client: &ApiClient, page: &PageQuery) -> Option<Value> {
    let data = client
        .fetch(
            "getStoreInventoryList",
            page.apply_all(ApiRequest::get("/inventory/storeInventory/getList")),
        )
        .await?;
    data.get("content").cloned()
}

/// One page of store inventory with its paging envelope.
pub async fn get_store_inventory_page_list(
    client: &ApiClient,
    page: &PageQuery,
) -> Option<Envelope> {
    client
        .envelope(
            "getStoreInventoryPageList",
            page.apply_all(ApiRequest::get("/inventory/storeInventory/getList")),
        )
        .await
}

pub async fn delete_store_inventories(client: &ApiClient, ids: &[i64]) -> Result<Value, ApiError> {
    client
        .settle(
            "deleteStoreInventories",
            ApiRequest::delete("/inventory/storeInventory").json(ids),
        )
        .await
}

// -----------------------------------------------------------------------------
// 6. Ingredient Inventory
// -----------------------------------------------------------------------------

/// Menus using an ingredient. Empty `menuItems` on failure.
pub async fn get_recipes(client: &ApiClient, inventory_id: i64) -> Value {
    let body = RecipeRequest { inventory_id };
    client
        .fetch("getRecipes", ApiRequest::post("/inventory/getRecipes").json(&body))
        .await
        .unwrap_or_else(|| json!({ "menuItems": [] }))
}

pub async fn register_inventory(client: &ApiClient, data: &Value) -> Result<Value, ApiError> {
    client
        .settle(
            "registerInventory",
            ApiRequest::post("/inventory/registerInventory").json(data),
        )
        .await
}

pub async fn get_inventory(client: &ApiClient, inventory_id: i64) -> Result<Value, ApiError> {
    client
        .settle(
            "getInventory",
            ApiRequest::get(format!("/inventory/DetailInventory/{}", inventory_id)),
        )
        .await
}

pub async fn update_inventory(client: &ApiClient, data: &Value) -> Result<Value, ApiError> {
    client
        .settle("updateInventory", ApiRequest::put("/inventory/inventory").json(data))
        .await
}

pub async fn delete_inventory_list(client: &ApiClient, data: &Value) -> Result<Value, ApiError> {
    client
        .settle(
            "deleteListInventory",
            ApiRequest::delete("/inventory/inventory").json(data),
        )
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Method, RequestBody};
    use crate::test_support::{block_on, gateway, MockTransport, RecordingNavigator};
    use std::sync::Arc;

    fn setup() -> (Arc<MockTransport>, Arc<crate::api::Gateway>) {
        let transport = MockTransport::new();
        let navigator = Arc::new(RecordingNavigator::default());
        let gateway = gateway(&transport, &navigator);
        (transport, gateway)
    }

    #[test]
    fn register_category_outcomes() {
        let (transport, gateway) = setup();
        let category = json!({ "name": "Drinks" });

        transport.respond(Method::Post, "/api/category/register", 200, json!({ "code": 200 }));
        assert_eq!(
            block_on(register_category(&gateway.menu, &category)),
            Outcome::Success(None)
        );

        transport.respond(
            Method::Post,
            "/api/category/register",
            200,
            json!({ "code": 400, "message": "dup" }),
        );
        assert_eq!(
            block_on(register_category(&gateway.menu, &category)),
            Outcome::failure("dup")
        );

        transport.respond(Method::Post, "/api/category/register", 200, json!({ "code": 400 }));
        assert_eq!(
            block_on(register_category(&gateway.menu, &category)),
            Outcome::failure("카테고리 등록 실패")
        );

        transport.fail(Method::Post, "/api/category/register", "connection refused");
        assert_eq!(
            block_on(register_category(&gateway.menu, &category)),
            Outcome::failure("서버 오류가 발생했습니다.")
        );
    }

    #[test]
    fn register_option_prefers_rejection_message_from_failed_response() {
        let (transport, gateway) = setup();
        let option = json!({ "name": "Shot" });

        transport.respond(
            Method::Post,
            "/api/option/register",
            409,
            json!({ "code": 409, "message": "이미 존재하는 옵션" }),
        );
        assert_eq!(
            block_on(register_option(&gateway.menu, &option)),
            Outcome::failure("이미 존재하는 옵션")
        );

        transport.fail(Method::Post, "/api/option/register", "offline");
        assert_eq!(
            block_on(register_option(&gateway.menu, &option)),
            Outcome::failure("옵션 등록 중 오류 발생")
        );
    }

    #[test]
    fn update_menu_keeps_returned_data() {
        let (transport, gateway) = setup();
        transport.respond(
            Method::Put,
            "/api/menu/update",
            200,
            json!({ "code": 200, "data": { "id": 3, "name": "Latte" } }),
        );

        let outcome = block_on(update_menu(&gateway.menu, &json!({ "id": 3 })));

        assert_eq!(outcome.data(), Some(&json!({ "id": 3, "name": "Latte" })));
    }

    #[test]
    fn category_list_sends_keyword_only_when_present() {
        let (transport, gateway) = setup();
        transport.respond(Method::Get, "/api/category/getList", 200, json!({ "code": 200, "data": [] }));

        block_on(get_category_list(&gateway.menu, &PageQuery::new(0, 10).keyword("  ")));
        assert_eq!(
            transport.last_request().unwrap().url,
            "/api/category/getList?page=0&size=10"
        );

        block_on(get_category_list(&gateway.menu, &PageQuery::new(2, 10).keyword("커피")));
        assert_eq!(
            transport.last_request().unwrap().url,
            "/api/category/getList?page=2&size=10&keyword=%EC%BB%A4%ED%94%BC"
        );
    }

    #[test]
    fn store_inventory_list_always_sends_keyword() {
        let (transport, gateway) = setup();
        transport.respond(
            Method::Get,
            "/api/inventory/storeInventory/getList",
            200,
            json!({ "code": 200, "data": { "content": [{ "id": 1 }], "totalPages": 1 } }),
        );

        let content = block_on(get_store_inventory_list(&gateway.menu, &PageQuery::default()));

        assert_eq!(content, Some(json!([{ "id": 1 }])));
        assert_eq!(
            transport.last_request().unwrap().url,
            "/api/inventory/storeInventory/getList?page=0&size=10&keyword="
        );
    }

    #[test]
    fn data_fetch_returns_data_unchanged() {
        let (transport, gateway) = setup();
        let data = json!({ "id": 9, "name": "Extra shot", "price": 500 });
        transport.respond(Method::Get, "/api/option/9", 200, json!({ "code": 200, "data": data.clone() }));
        assert_eq!(block_on(get_option_by_id(&gateway.menu, 9)), Some(data));

        transport.respond(Method::Get, "/api/option/9", 200, json!({ "code": 404 }));
        assert_eq!(block_on(get_option_by_id(&gateway.menu, 9)), None);
    }

    #[test]
    fn search_inventory_returns_sentinel() {
        let (transport, gateway) = setup();
        transport.respond(
            Method::Get,
            "/api/inventory/storeInventory/5",
            500,
            json!({ "code": 500 }),
        );

        let result = block_on(search_inventory(&gateway.menu, 5));

        assert_eq!(result, Lookup::NotFound);
        assert_eq!(result.sentinel(), Some(404));
    }

    #[test]
    fn recipes_and_stock_check_have_fallback_bodies() {
        let (transport, gateway) = setup();

        transport.fail(Method::Post, "/api/inventory/getRecipes", "offline");
        assert_eq!(
            block_on(get_recipes(&gateway.menu, 4)),
            json!({ "menuItems": [] })
        );

        transport.fail(Method::Post, "/api/order/validateOrder", "offline");
        assert_eq!(
            block_on(check_stock_availability(&gateway.menu, &json!({ "items": [] }))),
            json!({ "code": 500, "message": "서버 오류가 발생했습니다.", "data": null })
        );

        transport.respond(
            Method::Post,
            "/api/order/validateOrder",
            200,
            json!({ "code": 409, "message": "재고 부족" }),
        );
        assert_eq!(
            block_on(check_stock_availability(&gateway.menu, &json!({ "items": [] })))["message"],
            "재고 부족"
        );
    }

    #[test]
    fn delete_menus_sends_ids_as_body() {
        let (transport, gateway) = setup();
        transport.respond(Method::Delete, "/api/menu", 200, json!({ "code": 200 }));

        assert!(block_on(delete_menus(&gateway.menu, &[1, 2])));
        assert_eq!(
            transport.last_request().unwrap().body,
            RequestBody::Json(json!([1, 2]))
        );
    }

    #[test]
    fn settle_returns_rejection_body() {
        let (transport, gateway) = setup();
        transport.respond(
            Method::Get,
            "/api/inventory/DetailInventory/3",
            400,
            json!({ "code": 400, "message": "없는 재고" }),
        );

        let body = block_on(get_inventory(&gateway.menu, 3)).unwrap();
        assert_eq!(body["message"], "없는 재고");

        transport.fail(Method::Get, "/api/inventory/DetailInventory/3", "offline");
        assert!(block_on(get_inventory(&gateway.menu, 3)).is_err());
    }

    #[test]
    fn category_detail_forwards_caller_params() {
        let (transport, gateway) = setup();
        transport.respond(
            Method::Get,
            "/api/category/detail",
            200,
            json!({ "code": 200, "data": { "id": 3 } }),
        );

        let body = block_on(get_category(&gateway.menu, &[("id", "3".to_string())])).unwrap();

        assert_eq!(body["data"]["id"], 3);
        assert_eq!(
            transport.last_request().unwrap().url,
            "/api/category/detail?id=3"
        );
    }

    #[test]
    fn inventory_mutations_return_rejection_body() {
        let (transport, gateway) = setup();
        transport.respond(
            Method::Put,
            "/api/inventory/storeInventory",
            409,
            json!({ "code": 409, "message": "중복된 품목" }),
        );
        let body = block_on(update_store_inventory(&gateway.menu, &json!({ "id": 1 }))).unwrap();
        assert_eq!(body["message"], "중복된 품목");

        transport.respond(Method::Put, "/api/inventory/inventory", 200, json!({ "code": 200 }));
        assert!(block_on(update_inventory(&gateway.menu, &json!({ "id": 2 }))).is_ok());

        transport.fail(Method::Delete, "/api/inventory/inventory", "offline");
        assert!(block_on(delete_inventory_list(&gateway.menu, &json!([2, 3]))).is_err());
    }
}
