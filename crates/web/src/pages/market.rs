// =============================================================================
// Storedesk Web - Ingredient Market Pages
// =============================================================================
// Table of Contents:
// 1. Nearby Stores
// 2. Sale Posts
// 3. Transactions
// =============================================================================

use leptos::html::Input;
use leptos::prelude::*;
use leptos::task::spawn_local;
use serde_json::{json, Value};
use web_sys::HtmlInputElement;

use crate::api::{market, FormPart};
use crate::components::{cell_text, Card, DataTable, Layout, Notice, TextInput};
use crate::state::AppState;

/// Read the files picked in a file input as multipart parts named `images`.
async fn selected_images(input: &HtmlInputElement) -> Vec<FormPart> {
    let Some(files) = input.files() else {
        return Vec::new();
    };
    let mut parts = Vec::new();
    for index in 0..files.length() {
        let Some(file) = files.get(index) else {
            continue;
        };
        match wasm_bindgen_futures::JsFuture::from(file.array_buffer()).await {
            Ok(buffer) => parts.push(FormPart::file(
                "images",
                file.name(),
                file.type_(),
                js_sys::Uint8Array::new(&buffer).to_vec(),
            )),
            Err(e) => log::error!("Could not read {}: {:?}", file.name(), e),
        }
    }
    parts
}

fn data_of(body: Option<Value>) -> Value {
    body.map(|body| body["data"].clone()).unwrap_or_default()
}

// -----------------------------------------------------------------------------
// 1. Nearby Stores
// -----------------------------------------------------------------------------

#[component]
pub fn MarketMapPage() -> impl IntoView {
    let app_state = expect_context::<AppState>();
    let gateway = app_state.gateway.clone();

    let my_store = RwSignal::new(Value::Null);
    let nearby = RwSignal::new(Value::Null);

    spawn_local(async move {
        let (mine, stores) = futures::join!(
            market::get_my_store(&gateway.market),
            market::get_nearby_store(&gateway.market),
        );
        my_store.set(data_of(mine));
        nearby.set(data_of(stores));
    });

    view! {
        <Layout>
            <div class="page page-market-map">
                <h1>"주변 매장"</h1>
                <Card title="내 매장">
                    {move || my_store.with(|store| view! {
                        <p>{cell_text(store, "name")}" · "{cell_text(store, "address")}</p>
                    })}
                </Card>
                <DataTable
                    rows=nearby
                    columns=vec![("name", "매장"), ("address", "주소"), ("distance", "거리(m)")]
                />
            </div>
        </Layout>
    }
}

// -----------------------------------------------------------------------------
// 2. Sale Posts
// -----------------------------------------------------------------------------

#[component]
pub fn MarketListPage() -> impl IntoView {
    let app_state = expect_context::<AppState>();
    let gateway = app_state.gateway.clone();

    let sales = RwSignal::new(Vec::<Value>::new());
    let reload = RwSignal::new(0u32);
    let selected = RwSignal::new(Option::<i64>::None);
    let detail = RwSignal::new(Value::Null);
    let purchases = RwSignal::new(Vec::<Value>::new());
    let notice = RwSignal::new(Option::<String>::None);

    // new post
    let title = RwSignal::new(String::new());
    let inventory_id = RwSignal::new(String::new());
    let quantity = RwSignal::new(String::new());
    let price = RwSignal::new(String::new());
    let images: NodeRef<Input> = NodeRef::new();

    // purchase request
    let purchase_quantity = RwSignal::new(String::new());

    let list_gateway = gateway.clone();
    Effect::new(move |_| {
        reload.track();
        let gateway = list_gateway.clone();
        spawn_local(async move {
            let list = data_of(market::get_inventory_sale_list(&gateway.market).await);
            sales.set(list.as_array().cloned().unwrap_or_default());
        });
    });

    let open_gateway = gateway.clone();
    let open = move |sale_id: i64| {
        let gateway = open_gateway.clone();
        selected.set(Some(sale_id));
        spawn_local(async move {
            let (sale, requests) = futures::join!(
                market::get_inventory_sale_detail(&gateway.market, sale_id),
                market::get_purchase_list(&gateway.market, sale_id),
            );
            detail.set(data_of(sale));
            purchases.set(data_of(requests).as_array().cloned().unwrap_or_default());
        });
    };

    let post_gateway = gateway.clone();
    let post = move |_| {
        let gateway = post_gateway.clone();
        let input = images.get();
        let body = json!({
            "title": title.get(),
            "inventoryId": inventory_id.get().trim().parse::<i64>().ok(),
            "quantity": quantity.get().trim().parse::<f64>().unwrap_or(0.0),
            "price": price.get().trim().parse::<i64>().unwrap_or(0),
        });
        spawn_local(async move {
            let parts = match &input {
                Some(input) => selected_images(input).await,
                None => Vec::new(),
            };
            let mut body = body;
            if !parts.is_empty() {
                match market::upload_images(&gateway.market, parts).await {
                    Ok(uploaded) => body["imageUrls"] = uploaded["data"].clone(),
                    Err(e) => {
                        notice.set(Some(format!("파일 업로드 실패: {}", e)));
                        return;
                    }
                }
            }
            match market::register_inventory_sale(&gateway.market, &body).await {
                Ok(result) if result["code"] == 200 => {
                    notice.set(Some("판매글이 등록되었습니다.".to_string()));
                    reload.update(|n| *n += 1);
                }
                Ok(result) => notice.set(Some(cell_text(&result, "message"))),
                Err(e) => notice.set(Some(e.to_string())),
            }
        });
    };

    let request_gateway = gateway.clone();
    let request_purchase = move |_: leptos::ev::MouseEvent| {
        let Some(sale_id) = selected.get_untracked() else {
            return;
        };
        let gateway = request_gateway.clone();
        let body = json!({
            "saleId": sale_id,
            "quantity": purchase_quantity.get().trim().parse::<f64>().unwrap_or(0.0),
        });
        spawn_local(async move {
            let accepted = market::register_purchase(&gateway.market, &body)
                .await
                .is_some_and(|response| response.body["code"] == 200);
            notice.set(Some(
                if accepted { "구매 요청을 보냈습니다." } else { "구매 요청에 실패했습니다." }.to_string(),
            ));
        });
    };

    let decide = move |purchase_id: i64, approve: bool| {
        let Some(sale_id) = selected.get_untracked() else {
            return;
        };
        let gateway = gateway.clone();
        spawn_local(async move {
            let done = if approve {
                market::approve_purchase(&gateway.market, sale_id, purchase_id).await
            } else {
                market::reject_purchase(&gateway.market, purchase_id).await
            };
            if !done {
                notice.set(Some("처리에 실패했습니다.".to_string()));
            }
            let requests = market::get_purchase_list(&gateway.market, sale_id).await;
            purchases.set(data_of(requests).as_array().cloned().unwrap_or_default());
        });
    };

    view! {
        <Layout>
            <div class="page page-market-list">
                <h1>"재료 마켓"</h1>
                <Notice message=notice />

                <ul class="item-list">
                    <For
                        each=move || sales.get()
                        key=|row| cell_text(row, "id")
                        children=move |row| {
                            let id = row.get("id").and_then(Value::as_i64);
                            let open = open.clone();
                            view! {
                                <li class="item-row" on:click=move |_| {
                                    if let Some(id) = id { open(id) }
                                }>
                                    <span>{cell_text(&row, "title")}</span>
                                    <span>{cell_text(&row, "price")}</span>
                                </li>
                            }
                        }
                    />
                </ul>

                {move || selected.get().map(|_| {
                    let request_purchase = request_purchase.clone();
                    let decide = decide.clone();
                    view! {
                    <Card title="판매글 상세">
                        <p>{move || detail.with(|d| cell_text(d, "title"))}</p>
                        <p>{move || detail.with(|d| cell_text(d, "content"))}</p>
                        <TextInput label="구매 수량" value=purchase_quantity />
                        <button class="btn btn-primary" on:click=request_purchase>"구매 요청"</button>
                        <ul class="item-list">
                            <For
                                each=move || purchases.get()
                                key=|row| cell_text(row, "id")
                                children=move |row| {
                                    let id = row.get("id").and_then(Value::as_i64);
                                    let approve = decide.clone();
                                    let reject = decide.clone();
                                    view! {
                                        <li class="item-row">
                                            <span>{cell_text(&row, "storeName")}</span>
                                            <span>{cell_text(&row, "quantity")}</span>
                                            <span>{cell_text(&row, "status")}</span>
                                            <button class="btn btn-secondary" on:click=move |_| {
                                                if let Some(id) = id { approve(id, true) }
                                            }>"승인"</button>
                                            <button class="btn btn-danger" on:click=move |_| {
                                                if let Some(id) = id { reject(id, false) }
                                            }>"거절"</button>
                                        </li>
                                    }
                                }
                            />
                        </ul>
                    </Card>
                    }
                })}

                <Card title="판매글 등록">
                    <TextInput label="제목" value=title required=true />
                    <TextInput label="재고 번호" value=inventory_id />
                    <TextInput label="수량" value=quantity />
                    <TextInput label="가격" value=price />
                    <input type="file" accept="image/*" multiple node_ref=images />
                    <button class="btn btn-primary" on:click=post>"등록"</button>
                </Card>
            </div>
        </Layout>
    }
}

// -----------------------------------------------------------------------------
// 3. Transactions
// -----------------------------------------------------------------------------

#[component]
pub fn TransactionsPage() -> impl IntoView {
    let app_state = expect_context::<AppState>();
    let gateway = app_state.gateway.clone();

    let transactions = RwSignal::new(Vec::<Value>::new());
    let notifications = RwSignal::new(Value::Null);
    let reload = RwSignal::new(0u32);
    let notice = RwSignal::new(Option::<String>::None);

    let list_gateway = gateway.clone();
    Effect::new(move |_| {
        reload.track();
        let gateway = list_gateway.clone();
        spawn_local(async move {
            let (list, alerts) = futures::join!(
                market::get_transaction_list(&gateway.market),
                market::get_notification(&gateway.market),
            );
            transactions.set(data_of(list).as_array().cloned().unwrap_or_default());
            notifications.set(data_of(alerts));
        });
    });

    let read_gateway = gateway.clone();
    let mark_read = move |_| {
        let gateway = read_gateway.clone();
        spawn_local(async move {
            if market::post_notification(&gateway.market).await.is_some() {
                reload.update(|n| *n += 1);
            }
        });
    };

    let confirm = move |purchase_id: i64| {
        let gateway = gateway.clone();
        spawn_local(async move {
            if market::confirm_delivery(&gateway.market, purchase_id).await {
                reload.update(|n| *n += 1);
            } else {
                notice.set(Some("수령 확인에 실패했습니다.".to_string()));
            }
        });
    };

    view! {
        <Layout>
            <div class="page page-transactions">
                <h1>"거래 내역"</h1>
                <Notice message=notice />
                <Card title="알림">
                    <DataTable rows=notifications columns=vec![("message", "내용"), ("createdAt", "시각")] />
                    <button class="btn btn-secondary" on:click=mark_read>"모두 읽음"</button>
                </Card>
                <ul class="item-list">
                    <For
                        each=move || transactions.get()
                        key=|row| cell_text(row, "purchaseId")
                        children=move |row| {
                            let id = row.get("purchaseId").and_then(Value::as_i64);
                            let confirm = confirm.clone();
                            view! {
                                <li class="item-row">
                                    <span>{cell_text(&row, "title")}</span>
                                    <span>{cell_text(&row, "quantity")}</span>
                                    <span>{cell_text(&row, "status")}</span>
                                    <button class="btn btn-primary" on:click=move |_| {
                                        if let Some(id) = id { confirm(id) }
                                    }>"수령 확인"</button>
                                </li>
                            }
                        }
                    />
                </ul>
            </div>
        </Layout>
    }
}
