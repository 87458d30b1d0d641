// =============================================================================
// Storedesk Web - Market Area API
// =============================================================================
// Table of Contents:
// 1. Sales & Uploads
// 2. Purchases
// 3. Stores & Notifications
// =============================================================================
//
// Second-hand ingredient market between nearby stores.

use serde_json::Value;

use super::{ApiClient, ApiError, ApiRequest, ApiResponse, FormPart, Lookup};

// -----------------------------------------------------------------------------
// 1. Sales & Uploads
// -----------------------------------------------------------------------------

/// Upload sale images as `multipart/form-data`. Failures are returned.
pub async fn upload_images(client: &ApiClient, files: Vec<FormPart>) -> Result<Value, ApiError> {
    let request = ApiRequest::post("/market/images/upload")
        .multipart(files)
        .header("Content-Type", "multipart/form-data");
    client.raw("uploadImages", request).await
}

/// Get presigned upload URLs, or the 404 sentinel.
pub async fn get_presigned_urls(client: &ApiClient, data: &Value) -> Lookup {
    client
        .lookup("getPresignedUrls", ApiRequest::post("/user/presign").json(data))
        .await
}

/// Put an ingredient up for sale. A rejected response's body is returned.
pub async fn register_inventory_sale(client: &ApiClient, data: &Value) -> Result<Value, ApiError> {
    log::debug!("registerInventorySale data {}", data);
    client
        .settle(
            "registerInventorySale",
            ApiRequest::post("/market/registerSale").json(data),
        )
        .await
}

pub async fn get_inventory_sale_list(client: &ApiClient) -> Option<Value> {
    client
        .passthrough("getInventorySaleList", ApiRequest::get("/market/getList"))
        .await
}

pub async fn get_inventory_sale_detail(client: &ApiClient, sale_id: i64) -> Option<Value> {
    client
        .passthrough(
            "getInventorySaleDetail",
            ApiRequest::get(format!("/market/get/{}/detail", sale_id)),
        )
        .await
}

pub async fn get_transaction_list(client: &ApiClient) -> Option<Value> {
    client
        .passthrough("getTransactionList", ApiRequest::get("/market/transaction"))
        .await
}

// -----------------------------------------------------------------------------
// 2. Purchases
// -----------------------------------------------------------------------------

pub async fn get_purchase_list(client: &ApiClient, sale_id: i64) -> Option<Value> {
    client
        .passthrough(
            "getPurchaseList",
            ApiRequest::get(format!("/market/get/{}/purchaseList", sale_id)),
        )
        .await
}

/// Request to buy from a sale. Returns the whole response, status included.
pub async fn register_purchase(client: &ApiClient, data: &Value) -> Option<ApiResponse> {
    log::debug!("registerPurchase data {}", data);
    match client
        .send(ApiRequest::post("/market/registerPurchase").json(data))
        .await
    {
        Ok(response) => Some(response),
        Err(err) => {
            log::error!("Error in registerPurchase: {}", err);
            None
        }
    }
}

/// Seller accepts a purchase request.
pub async fn approve_purchase(client: &ApiClient, sale_id: i64, purchase_id: i64) -> bool {
    client
        .flag(
            "approvePurchase",
            ApiRequest::get("/market/approve")
                .query("saleId", sale_id)
                .query("purchaseId", purchase_id),
        )
        .await
}

pub async fn reject_purchase(client: &ApiClient, purchase_id: i64) -> bool {
    client
        .flag(
            "rejectPurchase",
            ApiRequest::get("/market/reject").query("purchaseId", purchase_id),
        )
        .await
}

/// Buyer confirms the goods arrived.
pub async fn confirm_delivery(client: &ApiClient, purchase_id: i64) -> bool {
    client
        .flag(
            "confirmDelivery",
            ApiRequest::put("/market/confirm").query("purchaseId", purchase_id),
        )
        .await
}

// -----------------------------------------------------------------------------
// 3. Stores & Notifications
// -----------------------------------------------------------------------------

pub async fn get_my_store(client: &ApiClient) -> Option<Value> {
    client
        .passthrough("getMyStore", ApiRequest::get("/store/getAddress"))
        .await
}

pub async fn get_nearby_store(client: &ApiClient) -> Option<Value> {
    client
        .passthrough("getNearbyStore", ApiRequest::get("/market/getNearbyStores"))
        .await
}

pub async fn get_notification(client: &ApiClient) -> Option<Value> {
    client
        .passthrough("getNotification", ApiRequest::get("/notification/get"))
        .await
}

pub async fn post_notification(client: &ApiClient) -> Option<Value> {
    client
        .passthrough("postNotification", ApiRequest::post("/notification/post"))
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Method, RequestBody};
    use crate::test_support::{block_on, gateway, MockTransport, RecordingNavigator};
    use serde_json::json;
    use std::sync::Arc;

    fn setup() -> (Arc<MockTransport>, Arc<crate::api::Gateway>) {
        let transport = MockTransport::new();
        let navigator = Arc::new(RecordingNavigator::default());
        let gateway = gateway(&transport, &navigator);
        (transport, gateway)
    }

    #[test]
    fn upload_overrides_content_type_for_that_call_only() {
        let (transport, gateway) = setup();
        transport.respond(
            Method::Post,
            "/api/market/images/upload",
            200,
            json!({ "code": 200, "data": ["https://cdn/1.png"] }),
        );
        transport.respond(Method::Get, "/api/market/getList", 200, json!({ "code": 200 }));

        let part = FormPart::file("images", "1.png", "image/png", vec![0x89, 0x50]);
        let body = block_on(upload_images(&gateway.market, vec![part.clone()])).unwrap();
        assert_eq!(body["data"][0], "https://cdn/1.png");

        let upload = transport.last_request().unwrap();
        assert_eq!(upload.header("content-type"), Some("multipart/form-data"));
        assert_eq!(upload.body, RequestBody::Multipart(vec![part]));

        block_on(get_inventory_sale_list(&gateway.market));
        let next = transport.last_request().unwrap();
        assert_eq!(next.header("content-type"), Some("application/json"));
    }

    #[test]
    fn upload_failure_is_returned() {
        let (transport, gateway) = setup();
        transport.respond(Method::Post, "/api/market/images/upload", 413, json!({}));

        let result = block_on(upload_images(&gateway.market, Vec::new()));

        assert_eq!(result.unwrap_err().status(), Some(413));
    }

    #[test]
    fn approve_sends_both_ids() {
        let (transport, gateway) = setup();
        transport.respond(Method::Get, "/api/market/approve", 200, json!({ "code": 200 }));

        assert!(block_on(approve_purchase(&gateway.market, 7, 42)));
        assert_eq!(
            transport.last_request().unwrap().url,
            "/api/market/approve?saleId=7&purchaseId=42"
        );
    }

    #[test]
    fn confirm_delivery_is_false_on_rejection() {
        let (transport, gateway) = setup();
        transport.respond(Method::Put, "/api/market/confirm", 200, json!({ "code": 400 }));

        assert!(!block_on(confirm_delivery(&gateway.market, 42)));
        assert_eq!(transport.last_request().unwrap().body, RequestBody::Empty);
    }

    #[test]
    fn passthrough_returns_none_on_failure() {
        let (transport, gateway) = setup();
        let body = json!({ "code": 200, "data": [{ "storeId": 1 }] });
        transport.respond(Method::Get, "/api/market/getNearbyStores", 200, body.clone());
        assert_eq!(block_on(get_nearby_store(&gateway.market)), Some(body));

        transport.fail(Method::Get, "/api/market/getNearbyStores", "offline");
        assert_eq!(block_on(get_nearby_store(&gateway.market)), None);
    }

    #[test]
    fn register_purchase_keeps_status() {
        let (transport, gateway) = setup();
        transport.respond(Method::Post, "/api/market/registerPurchase", 201, json!({ "code": 200 }));

        let response = block_on(register_purchase(&gateway.market, &json!({ "saleId": 7 }))).unwrap();

        assert_eq!(response.status, 201);
    }

    #[test]
    fn presigned_urls_use_sentinel() {
        let (transport, gateway) = setup();
        let request = json!({ "fileNames": ["a.png"] });
        transport.respond(
            Method::Post,
            "/api/user/presign",
            200,
            json!({ "code": 200, "data": ["https://bucket/a.png?sig"] }),
        );
        assert_eq!(
            block_on(get_presigned_urls(&gateway.market, &request)),
            Lookup::Found(json!(["https://bucket/a.png?sig"]))
        );

        transport.fail(Method::Post, "/api/user/presign", "offline");
        assert_eq!(
            block_on(get_presigned_urls(&gateway.market, &request)).sentinel(),
            Some(404)
        );
    }
}
