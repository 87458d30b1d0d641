// =============================================================================
// Storedesk Web - User Area API
// =============================================================================
// Table of Contents:
// 1. Request Types
// 2. Account & Verification
// 3. Store & Profile
// 4. Orders & Sales
// 5. Analytics Searches
// =============================================================================

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::envelope::{FailureMessages, SUCCESS_CODE};
use super::{ApiClient, ApiError, ApiRequest, Envelope, Lookup, Outcome};

/// Envelope code for "no account is registered with this e-mail".
pub const EMAIL_NOT_REGISTERED: i64 = 1016;

const EMAIL_NOT_REGISTERED_MESSAGE: &str = "해당 이메일로 가입된 계정이 없습니다.";
const UNKNOWN_ERROR_MESSAGE: &str = "알 수 없는 오류가 발생했습니다. 다시 시도해주세요.";
const SIGN_UP_FAILED: &str = "회원가입에 실패하였습니다.";
const PAYMENT_FAILED: &str = "결제 처리 중 오류가 발생했습니다.";

// -----------------------------------------------------------------------------
// 1. Request Types
// -----------------------------------------------------------------------------

/// Login request payload.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// E-mail verification code request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailCodeRequest {
    pub email_url: String,
}

/// E-mail verification code check.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailAuthRequest {
    pub code: String,
    pub email_url: String,
}

/// SMS verification code request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhoneCodeRequest {
    pub phone_num: String,
}

/// SMS verification code check.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhoneAuthRequest {
    pub code: String,
    pub phone_num: String,
}

/// New password for an account identified by e-mail.
#[derive(Debug, Clone, Serialize)]
pub struct PasswordUpdateRequest {
    pub email: String,
    pub password: String,
}

/// A calendar month for sales queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

/// Inclusive date range (`YYYY-MM-DD`) for sales queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodRange {
    pub start_date: String,
    pub end_date: String,
}

// -----------------------------------------------------------------------------
// 2. Account & Verification
// -----------------------------------------------------------------------------

/// Verify a payment.
pub async fn verify(client: &ApiClient, data: &Value) -> bool {
    log::debug!("Verify data {}", data);
    client
        .flag("verify", ApiRequest::post("/payments/verify").json(data))
        .await
}

/// Register a new account.
pub async fn sign_up<B: Serialize + ?Sized>(client: &ApiClient, data: &B) -> Outcome {
    let messages = FailureMessages {
        rejected: SIGN_UP_FAILED,
        failed: SIGN_UP_FAILED,
    };
    client
        .mutate("signUp", ApiRequest::post("/user/signup").json(data), messages)
        .await
        .without_data()
}

/// Send a sign-up verification code by e-mail.
pub async fn email_send(client: &ApiClient, email: &str) -> bool {
    let body = EmailCodeRequest {
        email_url: email.to_string(),
    };
    client
        .flag("emailSend", ApiRequest::post("/email/sendcode").json(&body))
        .await
}

/// Send a password-reset code by e-mail.
///
/// Failures are returned for the caller to show: an unregistered address
/// gets its own fixed message.
pub async fn email_send_if_pw_find(client: &ApiClient, email: &str) -> Result<bool, ApiError> {
    let body = EmailCodeRequest {
        email_url: email.to_string(),
    };
    let response = client
        .raw(
            "emailSendIfPwFind",
            ApiRequest::post("/email/sendcodeifpwfind").json(&body),
        )
        .await?;

    let envelope = Envelope::<Value>::from_value(response)?;
    match envelope.code {
        SUCCESS_CODE => Ok(true),
        EMAIL_NOT_REGISTERED => Err(ApiError::Application {
            code: EMAIL_NOT_REGISTERED,
            message: EMAIL_NOT_REGISTERED_MESSAGE.to_string(),
        }),
        code => Err(ApiError::Application {
            code,
            message: UNKNOWN_ERROR_MESSAGE.to_string(),
        }),
    }
}

/// Check an e-mail verification code.
pub async fn email_auth(client: &ApiClient, code: &str, email: &str) -> bool {
    let body = EmailAuthRequest {
        code: code.to_string(),
        email_url: email.to_string(),
    };
    client
        .flag("emailAuth", ApiRequest::post("/email/authcode").json(&body))
        .await
}

/// Send an SMS verification code. Returns the raw response body.
pub async fn phone_send(client: &ApiClient, phone: &str) -> Option<Value> {
    let body = PhoneCodeRequest {
        phone_num: phone.to_string(),
    };
    client
        .passthrough("phoneSend", ApiRequest::post("/user/smssend").json(&body))
        .await
}

/// Check an SMS verification code.
pub async fn phone_auth(client: &ApiClient, code: &str, phone: &str) -> bool {
    let body = PhoneAuthRequest {
        code: code.to_string(),
        phone_num: phone.to_string(),
    };
    client
        .flag("phoneAuth", ApiRequest::post("/user/phoneverify").json(&body))
        .await
}

/// Log in. The rejected response's body is returned like a success so the
/// caller can read its `code` and `message`.
pub async fn login(client: &ApiClient, request: &LoginRequest) -> Result<Value, ApiError> {
    client
        .settle("login", ApiRequest::post("/user/login").json(request))
        .await
}

/// Ask whether the session cookie is still valid.
pub async fn is_login(client: &ApiClient) -> Result<Value, ApiError> {
    client.settle("isLogin", ApiRequest::get("/user/isLogin")).await
}

/// Session check that keeps the HTTP status of a rejection.
pub async fn check_session(client: &ApiClient) -> Result<Value, ApiError> {
    client.raw("isLogin", ApiRequest::get("/user/isLogin")).await
}

/// Replace the account password.
pub async fn update_password(client: &ApiClient, request: &PasswordUpdateRequest) -> bool {
    client
        .flag(
            "updatePassword",
            ApiRequest::put("/user/updatepassword").json(request),
        )
        .await
}

/// Whether the account has completed registration.
pub async fn is_registered(client: &ApiClient) -> bool {
    client
        .flag("isRegistered", ApiRequest::get("/user/isRegistered"))
        .await
}

/// Log out on the server.
pub async fn logout(client: &ApiClient) -> Result<Value, ApiError> {
    client.raw("logout", ApiRequest::post("/user/logout")).await
}

// -----------------------------------------------------------------------------
// 3. Store & Profile
// -----------------------------------------------------------------------------

/// Register the store of the logged-in owner.
pub async fn register_store(client: &ApiClient, data: &Value) -> Result<Value, ApiError> {
    log::debug!("Register store data {}", data);
    client
        .raw("registerStore", ApiRequest::post("/store/register").json(data))
        .await
}

/// Fetch the profile. Returns the whole envelope on success.
pub async fn get_user_info(client: &ApiClient) -> Option<Envelope> {
    client
        .envelope("getUserInfo", ApiRequest::get("/user/searchinfo"))
        .await
}

/// Update the profile; a rejected response's body is returned as well.
pub async fn update_user_info(client: &ApiClient, data: &Value) -> Result<Value, ApiError> {
    client
        .settle("updateUserInfo", ApiRequest::put("/user/updateinfo").json(data))
        .await
}

/// Register a store inventory item. Returns `data` on success.
pub async fn register_inventory(client: &ApiClient, data: &Value) -> Option<Value> {
    client
        .fetch(
            "registerInventory",
            ApiRequest::post("/inventory/registerStoreInventory").json(data),
        )
        .await
}

/// Update a store inventory item by its `inventoryId`.
pub async fn update_inventory(client: &ApiClient, inventory_id: i64, data: &Value) -> Lookup {
    client
        .lookup(
            "updateInventory",
            ApiRequest::put(format!("/inventory/storeInventory/{}", inventory_id)).json(data),
        )
        .await
}

/// Look up a store inventory item by its `inventoryId`.
pub async fn search_inventory(client: &ApiClient, inventory_id: i64) -> Lookup {
    client
        .lookup(
            "searchInventory",
            ApiRequest::get(format!("/inventory/storeInventory/{}", inventory_id)),
        )
        .await
}

/// Inventory totals (legacy endpoint); failures are returned.
pub async fn total_store_inventory(client: &ApiClient, data: &Value) -> Result<Value, ApiError> {
    client
        .raw("totalStoreInventory", ApiRequest::post("/inventory").json(data))
        .await
}

/// Menu list (legacy endpoint).
pub async fn get_menu_list(client: &ApiClient) -> Option<Value> {
    client.fetch("getMenuList", ApiRequest::get("/menu/list")).await
}

/// Register a menu (legacy endpoint). Returns `data` on success.
pub async fn register_menu(client: &ApiClient, data: &Value) -> Option<Value> {
    client
        .fetch("registerMenu", ApiRequest::post("menu/register").json(data))
        .await
}

/// Update a menu (legacy endpoint). Returns `data` on success.
pub async fn update_menu(client: &ApiClient, data: &Value) -> Option<Value> {
    client
        .fetch("updateMenu", ApiRequest::post("menu/update").json(data))
        .await
}

// -----------------------------------------------------------------------------
// 4. Orders & Sales
// -----------------------------------------------------------------------------

/// Place a POS order. Any failure comes back as [`ApiError::Application`]
/// carrying the message to show.
pub async fn pos_order(client: &ApiClient, data: &Value) -> Result<Value, ApiError> {
    log::debug!("Sending order data: {}", data);
    let result = client
        .raw("posOrder", ApiRequest::post("/order/create").json(data))
        .await;

    match result {
        Ok(body) => {
            let envelope = Envelope::<Value>::from_value(body.clone())
                .map_err(|err| ApiError::Application {
                    code: 0,
                    message: err.to_string(),
                })?;
            if envelope.is_success() {
                Ok(body)
            } else {
                Err(ApiError::Application {
                    code: envelope.code,
                    message: envelope.message().unwrap_or(PAYMENT_FAILED).to_string(),
                })
            }
        }
        Err(err) => {
            let message = err.response_message().unwrap_or_else(|| err.to_string());
            log::error!("{}", message);
            Err(ApiError::Application {
                code: err.status().map_or(0, i64::from),
                message,
            })
        }
    }
}

pub async fn get_today_sales(client: &ApiClient) -> Result<Value, ApiError> {
    client
        .raw("getTodaySales", ApiRequest::get("order/todaySales"))
        .await
}

/// Best three menus of the week.
pub async fn get_best_top3(client: &ApiClient) -> Result<Value, ApiError> {
    client
        .raw("getBestTop3", ApiRequest::get("order/weekbestmenu"))
        .await
}

pub async fn get_sales_data(client: &ApiClient, range: &PeriodRange) -> Result<Value, ApiError> {
    client
        .raw("getSalesData", ApiRequest::post("order/saleDetail").json(range))
        .await
}

pub async fn get_inventory_call(client: &ApiClient) -> Result<Value, ApiError> {
    client
        .raw("getInventoryCall", ApiRequest::get("inventory/inventoryCall"))
        .await
}

pub async fn get_orders_list(client: &ApiClient) -> Result<Value, ApiError> {
    client
        .raw("getOrdersList", ApiRequest::get("order/getList"))
        .await
}

// -----------------------------------------------------------------------------
// 5. Analytics Searches
// -----------------------------------------------------------------------------

pub async fn search_month_sales(client: &ApiClient, month: &YearMonth) -> Lookup {
    client
        .lookup("searchMonthSales", ApiRequest::post("/order/monthSales").json(month))
        .await
}

pub async fn search_sale_detail(client: &ApiClient, range: &PeriodRange) -> Lookup {
    client
        .lookup("searchSaleDetail", ApiRequest::post("/order/saleDetail").json(range))
        .await
}

pub async fn search_menu_list(client: &ApiClient) -> Lookup {
    client
        .lookup("searchMenuList", ApiRequest::get("/menu/menuList"))
        .await
}

pub async fn search_menu_sale(client: &ApiClient, range: &PeriodRange) -> Lookup {
    client
        .lookup("searchMenuSale", ApiRequest::post("/menu/menuSale").json(range))
        .await
}

pub async fn search_stock_list(client: &ApiClient) -> Lookup {
    client
        .lookup("searchStockList", ApiRequest::get("/inventory/inventoryList"))
        .await
}

pub async fn search_inventory_update(client: &ApiClient, range: &PeriodRange) -> Lookup {
    client
        .lookup(
            "searchInventoryUpdate",
            ApiRequest::post("/inventory/updateSolo").json(range),
        )
        .await
}

pub async fn get_best_market(client: &ApiClient) -> Lookup {
    client
        .lookup("getBestMarket", ApiRequest::get("/inventory/marketAmount"))
        .await
}

pub async fn get_one_total_inventory(client: &ApiClient) -> Lookup {
    client
        .lookup(
            "getOneTotalInventory",
            ApiRequest::get("/inventory/totalInventory"),
        )
        .await
}

pub async fn get_stock_change(client: &ApiClient) -> Lookup {
    client
        .lookup("getStockChange", ApiRequest::get("/inventory/inventoryAmount"))
        .await
}

pub async fn search_menu_market(client: &ApiClient, range: &PeriodRange) -> Lookup {
    client
        .lookup("searchMenuMarket", ApiRequest::post("/inventory/menuMarket").json(range))
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Method;
    use crate::routes::NamedRoute;
    use crate::test_support::{block_on, gateway, MockTransport, RecordingNavigator};
    use serde_json::json;
    use std::sync::Arc;

    fn setup() -> (Arc<MockTransport>, Arc<RecordingNavigator>, Arc<crate::api::Gateway>) {
        let transport = MockTransport::new();
        let navigator = Arc::new(RecordingNavigator::default());
        let gateway = gateway(&transport, &navigator);
        (transport, navigator, gateway)
    }

    #[test]
    fn boolean_operations_follow_envelope_code() {
        let (transport, _, gateway) = setup();

        transport.respond(Method::Post, "/api/email/sendcode", 200, json!({ "code": 200 }));
        assert!(block_on(email_send(&gateway.user, "owner@example.com")));

        transport.respond(Method::Post, "/api/email/sendcode", 200, json!({ "code": 409 }));
        assert!(!block_on(email_send(&gateway.user, "owner@example.com")));

        transport.fail(Method::Post, "/api/email/sendcode", "offline");
        assert!(!block_on(email_send(&gateway.user, "owner@example.com")));
    }

    #[test]
    fn email_send_wraps_address() {
        let (transport, _, gateway) = setup();
        transport.respond(Method::Post, "/api/email/sendcode", 200, json!({ "code": 200 }));

        block_on(email_send(&gateway.user, "owner@example.com"));

        let request = transport.last_request().unwrap();
        assert_eq!(
            request.body,
            crate::api::RequestBody::Json(json!({ "emailUrl": "owner@example.com" }))
        );
    }

    #[test]
    fn password_reset_code_distinguishes_unregistered_email() {
        let (transport, _, gateway) = setup();
        let path = "/api/email/sendcodeifpwfind";

        transport.respond(Method::Post, path, 200, json!({ "code": 200 }));
        assert_eq!(block_on(email_send_if_pw_find(&gateway.user, "a@b.c")), Ok(true));

        transport.respond(Method::Post, path, 200, json!({ "code": 1016 }));
        assert_eq!(
            block_on(email_send_if_pw_find(&gateway.user, "a@b.c")),
            Err(ApiError::Application {
                code: 1016,
                message: "해당 이메일로 가입된 계정이 없습니다.".into()
            })
        );

        transport.respond(Method::Post, path, 200, json!({ "code": 500 }));
        let err = block_on(email_send_if_pw_find(&gateway.user, "a@b.c")).unwrap_err();
        assert_eq!(err.to_string(), "알 수 없는 오류가 발생했습니다. 다시 시도해주세요.");

        transport.fail(Method::Post, path, "offline");
        assert!(matches!(
            block_on(email_send_if_pw_find(&gateway.user, "a@b.c")),
            Err(ApiError::Network(_))
        ));
    }

    #[test]
    fn sign_up_reports_server_message_or_fallback() {
        let (transport, _, gateway) = setup();
        let form = json!({ "email": "a@b.c" });

        transport.respond(Method::Post, "/api/user/signup", 200, json!({ "code": 200, "data": 7 }));
        assert_eq!(block_on(sign_up(&gateway.user, &form)), Outcome::Success(None));

        transport.respond(
            Method::Post,
            "/api/user/signup",
            200,
            json!({ "code": 409, "message": "이미 가입된 이메일입니다." }),
        );
        assert_eq!(
            block_on(sign_up(&gateway.user, &form)),
            Outcome::failure("이미 가입된 이메일입니다.")
        );

        transport.fail(Method::Post, "/api/user/signup", "offline");
        assert_eq!(
            block_on(sign_up(&gateway.user, &form)),
            Outcome::failure("회원가입에 실패하였습니다.")
        );
    }

    #[test]
    fn searches_return_404_for_both_failure_kinds() {
        let (transport, _, gateway) = setup();
        let month = YearMonth { year: 2024, month: 5 };

        transport.respond(
            Method::Post,
            "/api/order/monthSales",
            200,
            json!({ "code": 200, "data": [{ "day": 1, "total": 12000 }] }),
        );
        assert_eq!(
            block_on(search_month_sales(&gateway.user, &month)),
            Lookup::Found(json!([{ "day": 1, "total": 12000 }]))
        );

        transport.respond(Method::Post, "/api/order/monthSales", 200, json!({ "code": 1 }));
        let rejected = block_on(search_month_sales(&gateway.user, &month));
        assert_eq!(rejected.sentinel(), Some(404));

        transport.fail(Method::Post, "/api/order/monthSales", "offline");
        let failed = block_on(search_month_sales(&gateway.user, &month));
        assert_eq!(failed, rejected);
    }

    #[test]
    fn login_returns_rejection_body() {
        let (transport, navigator, gateway) = setup();
        let request = LoginRequest {
            email: "a@b.c".into(),
            password: "wrong".into(),
        };
        transport.respond(
            Method::Post,
            "/api/user/login",
            401,
            json!({ "code": 401, "message": "비밀번호가 틀렸습니다." }),
        );

        let body = block_on(login(&gateway.user, &request)).unwrap();

        assert_eq!(body["message"], "비밀번호가 틀렸습니다.");
        assert_eq!(navigator.visits(), vec![NamedRoute::Login]);
    }

    #[test]
    fn pos_order_surfaces_server_message() {
        let (transport, _, gateway) = setup();
        let order = json!({ "items": [] });

        transport.respond(Method::Post, "/api/order/create", 200, json!({ "code": 200, "data": 1 }));
        assert!(block_on(pos_order(&gateway.user, &order)).is_ok());

        transport.respond(
            Method::Post,
            "/api/order/create",
            200,
            json!({ "code": 422, "message": "재고가 부족합니다." }),
        );
        assert_eq!(
            block_on(pos_order(&gateway.user, &order)).unwrap_err().to_string(),
            "재고가 부족합니다."
        );

        transport.respond(Method::Post, "/api/order/create", 200, json!({ "code": 422 }));
        assert_eq!(
            block_on(pos_order(&gateway.user, &order)).unwrap_err().to_string(),
            "결제 처리 중 오류가 발생했습니다."
        );

        transport.respond(
            Method::Post,
            "/api/order/create",
            500,
            json!({ "code": 500, "message": "주문 실패" }),
        );
        assert_eq!(
            block_on(pos_order(&gateway.user, &order)),
            Err(ApiError::Application {
                code: 500,
                message: "주문 실패".into()
            })
        );
    }

    #[test]
    fn user_info_keeps_whole_envelope() {
        let (transport, _, gateway) = setup();
        transport.respond(
            Method::Get,
            "/api/user/searchinfo",
            200,
            json!({ "code": 200, "message": "ok", "data": { "name": "Kim" } }),
        );

        let envelope = block_on(get_user_info(&gateway.user)).unwrap();
        assert_eq!(envelope.message.as_deref(), Some("ok"));
        assert_eq!(envelope.data, Some(json!({ "name": "Kim" })));

        transport.respond(Method::Get, "/api/user/searchinfo", 200, json!({ "code": 403 }));
        assert_eq!(block_on(get_user_info(&gateway.user)), None);
    }

    #[test]
    fn legacy_inventory_endpoints() {
        let (transport, _, gateway) = setup();
        let item = json!({ "name": "우유", "quantity": 10 });

        transport.respond(
            Method::Put,
            "/api/inventory/storeInventory/5",
            200,
            json!({ "code": 200, "data": { "id": 5 } }),
        );
        assert_eq!(
            block_on(update_inventory(&gateway.user, 5, &item)),
            Lookup::Found(json!({ "id": 5 }))
        );
        assert_eq!(block_on(update_inventory(&gateway.user, 6, &item)), Lookup::NotFound);

        transport.respond(Method::Post, "/api/inventory", 500, json!({ "code": 500 }));
        assert_eq!(
            block_on(total_store_inventory(&gateway.user, &item)).unwrap_err().status(),
            Some(500)
        );
    }

    #[test]
    fn legacy_menu_list_returns_data() {
        let (transport, _, gateway) = setup();
        transport.respond(
            Method::Get,
            "/api/menu/list",
            200,
            json!({ "code": 200, "data": [{ "menuName": "라떼" }] }),
        );
        assert_eq!(
            block_on(get_menu_list(&gateway.user)),
            Some(json!([{ "menuName": "라떼" }]))
        );

        transport.respond(Method::Post, "/api/menu/register", 200, json!({ "code": 400 }));
        assert_eq!(block_on(register_menu(&gateway.user, &json!({}))), None);
    }

    #[test]
    fn session_check_and_sales_data() {
        let (transport, navigator, gateway) = setup();
        transport.respond(Method::Get, "/api/user/isLogin", 200, json!({ "code": 200, "data": true }));
        assert_eq!(
            block_on(is_login(&gateway.user)).unwrap(),
            json!({ "code": 200, "data": true })
        );

        // a rejected check still hands back the body after redirecting
        transport.respond(Method::Get, "/api/user/isLogin", 403, json!({ "code": 403 }));
        assert_eq!(block_on(is_login(&gateway.user)).unwrap()["code"], 403);
        assert_eq!(navigator.visits(), vec![NamedRoute::Login]);

        let range = PeriodRange {
            start_date: "2024-05-01".into(),
            end_date: "2024-05-31".into(),
        };
        transport.respond(
            Method::Post,
            "/api/order/saleDetail",
            200,
            json!({ "code": 200, "data": { "totalSales": 90000 } }),
        );
        let body = block_on(get_sales_data(&gateway.user, &range)).unwrap();
        assert_eq!(body["data"]["totalSales"], 90000);
        assert_eq!(
            transport.last_request().unwrap().body,
            crate::api::RequestBody::Json(json!({ "startDate": "2024-05-01", "endDate": "2024-05-31" }))
        );
    }
}
