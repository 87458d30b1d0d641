// =============================================================================
// Storedesk Web - Inventory Pages
// =============================================================================
// Table of Contents:
// 1. Inventory Overview
// 2. Inventory Registration
// =============================================================================

use leptos::prelude::*;
use leptos::task::spawn_local;
use serde_json::{json, Value};

use crate::api::menu::{self, PageQuery};
use crate::components::{cell_text, Card, DataTable, Layout, Notice, Pager, TextInput};
use crate::state::AppState;

// -----------------------------------------------------------------------------
// 1. Inventory Overview
// -----------------------------------------------------------------------------

#[component]
pub fn InventoryPage() -> impl IntoView {
    let app_state = expect_context::<AppState>();
    let inventory = app_state.inventory;
    let gateway = app_state.gateway.clone();

    let page = RwSignal::new(0u32);
    let total_pages = RwSignal::new(1u32);
    let keyword = RwSignal::new(String::new());
    let rows = RwSignal::new(Value::Null);
    let reload = RwSignal::new(0u32);
    let search_id = RwSignal::new(String::new());
    let totals = RwSignal::new(Value::Null);
    let recipes = RwSignal::new(Value::Null);

    let list_gateway = gateway.clone();
    Effect::new(move |_| {
        reload.track();
        let query = PageQuery::new(page.get(), 10).keyword(keyword.get_untracked());
        let gateway = list_gateway.clone();
        spawn_local(async move {
            if let Some(envelope) = menu::get_store_inventory_page_list(&gateway.menu, &query).await {
                let data = envelope.data.unwrap_or_default();
                rows.set(data["content"].clone());
                total_pages.set(data["totalPages"].as_u64().unwrap_or(1) as u32);
            }
        });
    });

    let search = move |_| {
        let Ok(id) = search_id.get().trim().parse::<i64>() else {
            inventory.error.set(Some("재고 번호를 입력해주세요.".to_string()));
            return;
        };
        let gateway = gateway.clone();
        spawn_local(async move {
            if inventory.search_inventory(id).await.is_none() {
                return;
            }
            let (total, recipe) = futures::join!(
                menu::get_inventory_totals(&gateway.menu, id),
                menu::get_recipes(&gateway.menu, id),
            );
            totals.set(total.map(|body| body["data"].clone()).unwrap_or_default());
            recipes.set(recipe["menuItems"].clone());
        });
    };

    view! {
        <Layout>
            <div class="page page-inventory">
                <h1>"재고 현황"</h1>
                <Notice message=inventory.error />

                <div class="inline-form">
                    <TextInput label="품목 검색" value=keyword />
                    <button class="btn btn-secondary" on:click=move |_| {
                        page.set(0);
                        reload.update(|n| *n += 1);
                    }>"검색"</button>
                </div>
                <DataTable
                    rows=rows
                    columns=vec![("id", "번호"), ("name", "품목"), ("quantity", "수량"), ("unit", "단위"), ("expiryDate", "유통기한")]
                />
                <Pager page=page total_pages=total_pages />

                <Card title="재고 상세">
                    <div class="inline-form">
                        <TextInput label="재고 번호" value=search_id />
                        <button class="btn btn-secondary" on:click=search>"조회"</button>
                    </div>
                    {move || inventory.detail.with(|d| view! {
                        <dl class="detail">
                            <dt>"품목"</dt><dd>{d.name.clone()}</dd>
                            <dt>"단위"</dt><dd>{d.unit.clone()}</dd>
                            <dt>"최소 수량"</dt><dd>{d.miniquantity.map(|q| q.to_string()).unwrap_or_default()}</dd>
                            <dt>"유통기한"</dt><dd>{d.expiry_date.clone().unwrap_or_default()}</dd>
                        </dl>
                    })}
                    <DataTable rows=totals columns=vec![("purchaseDate", "입고일"), ("quantity", "수량"), ("unitPrice", "단가")] />
                    <DataTable rows=recipes columns=vec![("menuName", "사용 메뉴"), ("quantity", "사용량")] />
                </Card>
            </div>
        </Layout>
    }
}

// -----------------------------------------------------------------------------
// 2. Inventory Registration
// -----------------------------------------------------------------------------

#[component]
pub fn InventoryRegisterPage() -> impl IntoView {
    let app_state = expect_context::<AppState>();
    let inventory = app_state.inventory;
    let gateway = app_state.gateway.clone();

    let notice = RwSignal::new(Option::<String>::None);

    // new item
    let name = RwSignal::new(String::new());
    let unit = RwSignal::new(String::new());
    let minimum = RwSignal::new(String::new());

    // receipt
    let receipt_item = RwSignal::new(String::new());
    let receipt_quantity = RwSignal::new(String::new());
    let receipt_price = RwSignal::new(String::new());
    let receipt_expiry = RwSignal::new(String::new());

    spawn_local(async move { inventory.load_inventory_list().await });

    let register = move |_| {
        let body = json!({
            "name": name.get(),
            "unit": unit.get(),
            "miniquantity": minimum.get().trim().parse::<f64>().ok(),
        });
        spawn_local(async move {
            let message = match inventory.register_store_inventory(&body).await {
                Some(result) if result["code"] == 200 => {
                    inventory.load_inventory_list().await;
                    "재고 품목이 등록되었습니다.".to_string()
                }
                Some(result) => cell_text(&result, "message"),
                None => "재고 등록에 실패했습니다.".to_string(),
            };
            notice.set(Some(message));
        });
    };

    let receive = move |_| {
        let Ok(item_id) = receipt_item.get().parse::<i64>() else {
            notice.set(Some("입고할 품목을 선택해주세요.".to_string()));
            return;
        };
        inventory.select_inventory(item_id);
        let body = json!({
            "storeInventoryId": item_id,
            "quantity": receipt_quantity.get().trim().parse::<f64>().unwrap_or(0.0),
            "unitPrice": receipt_price.get().trim().parse::<i64>().unwrap_or(0),
            "expiryDate": receipt_expiry.get(),
        });
        spawn_local(async move {
            let received = inventory.total_store_inventory(&body).await;
            notice.set(Some(
                if received { "입고가 기록되었습니다." } else { "입고 실패" }.to_string(),
            ));
        });
    };

    let remove = move |id: i64| {
        let gateway = gateway.clone();
        spawn_local(async move {
            match menu::delete_store_inventories(&gateway.menu, &[id]).await {
                Ok(body) if body["code"] == 200 => inventory.load_inventory_list().await,
                Ok(body) => notice.set(Some(cell_text(&body, "message"))),
                Err(e) => notice.set(Some(e.to_string())),
            }
        });
    };

    view! {
        <Layout>
            <div class="page page-inventory-register">
                <h1>"재고 관리"</h1>
                <Notice message=notice />

                <Card title="품목 등록">
                    <TextInput label="품목 이름" value=name required=true />
                    <TextInput label="단위" value=unit placeholder="g, ml, 개" />
                    <TextInput label="최소 수량" value=minimum />
                    <button class="btn btn-primary" on:click=register>"등록"</button>
                </Card>

                <Card title="입고 기록">
                    <div class="form-field">
                        <label class="form-label">"품목"</label>
                        <select
                            class="form-select"
                            on:change=move |e| receipt_item.set(event_target_value(&e))
                        >
                            <option value="">"선택"</option>
                            <For
                                each=move || inventory.inventory_list.get()
                                key=|row| cell_text(row, "id")
                                children=move |row| view! {
                                    <option value=cell_text(&row, "id")>{cell_text(&row, "name")}</option>
                                }
                            />
                        </select>
                    </div>
                    <TextInput label="수량" value=receipt_quantity />
                    <TextInput label="단가" value=receipt_price />
                    <TextInput label="유통기한" value=receipt_expiry input_type="date" />
                    <button class="btn btn-primary" on:click=receive>"입고"</button>
                    {move || inventory.selected.get().map(|item| view! {
                        <p class="notice">{format!("선택: {}", cell_text(&item, "name"))}</p>
                    })}
                </Card>

                <Card title="등록된 품목">
                    <ul class="item-list">
                        <For
                            each=move || inventory.inventory_list.get()
                            key=|row| cell_text(row, "id")
                            children=move |row| {
                                let id = row.get("id").and_then(Value::as_i64);
                                let remove = remove.clone();
                                view! {
                                    <li class="item-row">
                                        <span>{cell_text(&row, "name")}</span>
                                        <span>{cell_text(&row, "unit")}</span>
                                        <button class="btn btn-danger" on:click=move |_| {
                                            if let Some(id) = id { remove(id) }
                                        }>"삭제"</button>
                                    </li>
                                }
                            }
                        />
                    </ul>
                </Card>
            </div>
        </Layout>
    }
}
