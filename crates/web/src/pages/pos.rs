// =============================================================================
// Storedesk Web - POS Pages
// =============================================================================
// Table of Contents:
// 1. Cart
// 2. POS Main
// 3. Menu Picker
// 4. Payment
// 5. Delivery & Stock Calls
// =============================================================================

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;
use serde::Serialize;
use serde_json::{json, Value};

use crate::api::{menu, user};
use crate::components::{cell_text, Button, Card, DataTable, Layout, Notice};
use crate::routes::NamedRoute;
use crate::state::AppState;
use crate::utils::format_won;

// -----------------------------------------------------------------------------
// 1. Cart
// -----------------------------------------------------------------------------

/// One menu in the cart.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub menu_id: i64,
    #[serde(skip)]
    pub name: String,
    #[serde(skip)]
    pub price: i64,
    pub quantity: u32,
}

impl CartLine {
    /// Build a line from a menu row (`menuId`/`id`, `menuName`/`name`, `price`).
    pub fn from_menu(row: &Value) -> Option<Self> {
        let menu_id = row.get("menuId").or_else(|| row.get("id"))?.as_i64()?;
        let name = row
            .get("menuName")
            .or_else(|| row.get("name"))
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        Some(Self {
            menu_id,
            name,
            price: row.get("price").and_then(Value::as_i64).unwrap_or(0),
            quantity: 1,
        })
    }

    pub fn subtotal(&self) -> i64 {
        self.price * i64::from(self.quantity)
    }
}

/// Cart shared by the POS routes.
#[derive(Clone, Copy)]
pub struct PosCart {
    pub lines: RwSignal<Vec<CartLine>>,
}

impl PosCart {
    pub fn new() -> Self {
        Self {
            lines: RwSignal::new(Vec::new()),
        }
    }

    /// Add one of `line`'s menu, merging with an existing line.
    pub fn add(&self, line: CartLine) {
        self.lines.update(|lines| add_line(lines, line));
    }

    /// Drop one of `menu_id`; the line goes away at zero.
    pub fn remove_one(&self, menu_id: i64) {
        self.lines.update(|lines| remove_one(lines, menu_id));
    }

    pub fn clear(&self) {
        self.lines.set(Vec::new());
    }

    pub fn total(&self) -> i64 {
        self.lines.with(|lines| total(lines))
    }

    pub fn order_body(&self) -> Value {
        self.lines.with(|lines| order_body(lines))
    }
}

impl Default for PosCart {
    fn default() -> Self {
        Self::new()
    }
}

fn add_line(lines: &mut Vec<CartLine>, line: CartLine) {
    match lines.iter_mut().find(|l| l.menu_id == line.menu_id) {
        Some(existing) => existing.quantity += line.quantity,
        None => lines.push(line),
    }
}

fn remove_one(lines: &mut Vec<CartLine>, menu_id: i64) {
    if let Some(line) = lines.iter_mut().find(|l| l.menu_id == menu_id) {
        line.quantity = line.quantity.saturating_sub(1);
    }
    lines.retain(|l| l.quantity > 0);
}

fn total(lines: &[CartLine]) -> i64 {
    lines.iter().map(CartLine::subtotal).sum()
}

/// Order payload sent for stock validation and order creation.
fn order_body(lines: &[CartLine]) -> Value {
    json!({
        "orderItems": lines,
        "totalPrice": total(lines),
    })
}

fn as_rows(value: Option<Value>) -> Vec<Value> {
    value
        .and_then(|body| body["data"].as_array().cloned())
        .unwrap_or_default()
}

#[component]
fn CartPanel(cart: PosCart) -> impl IntoView {
    view! {
        <Card title="주문 내역" class="pos-cart">
            <ul class="item-list">
                <For
                    each=move || cart.lines.get()
                    key=|line| (line.menu_id, line.quantity)
                    children=move |line| {
                        let menu_id = line.menu_id;
                        view! {
                            <li class="item-row">
                                <span>{line.name.clone()}</span>
                                <span>{format!("x{}", line.quantity)}</span>
                                <span>{format_won(line.subtotal())}</span>
                                <button class="btn btn-secondary" on:click=move |_| cart.remove_one(menu_id)>"-"</button>
                            </li>
                        }
                    }
                />
            </ul>
            <p class="stat-value">{move || format_won(cart.total())}</p>
        </Card>
    }
}

// -----------------------------------------------------------------------------
// 2. POS Main
// -----------------------------------------------------------------------------

#[component]
pub fn PosMainPage() -> impl IntoView {
    let app_state = expect_context::<AppState>();
    let cart = expect_context::<PosCart>();
    let gateway = app_state.gateway.clone();
    let navigate = use_navigate();

    let categories = RwSignal::new(Vec::<Value>::new());
    let menus = RwSignal::new(Vec::<Value>::new());
    let category = RwSignal::new(Option::<i64>::None);

    let load_gateway = gateway.clone();
    spawn_local(async move {
        let (category_list, menu_list) = futures::join!(
            menu::get_pos_category_list(&load_gateway.menu),
            menu::get_pos_menu_list(&load_gateway.menu),
        );
        categories.set(as_rows(category_list));
        menus.set(as_rows(menu_list));
    });

    let pick_category = move |category_id: Option<i64>| {
        category.set(category_id);
        let gateway = gateway.clone();
        spawn_local(async move {
            let rows = match category_id {
                Some(id) => match menu::get_pos_category(&gateway.menu, id).await {
                    Ok(body) => body["data"].as_array().cloned().unwrap_or_default(),
                    Err(e) => {
                        log::error!("Category menus unavailable: {}", e);
                        Vec::new()
                    }
                },
                None => as_rows(menu::get_pos_menu_list(&gateway.menu).await),
            };
            menus.set(rows);
        });
    };

    let all = pick_category.clone();

    view! {
        <Layout>
            <div class="page page-pos">
                <h1>"POS"</h1>
                <div class="pos-tabs">
                    <button
                        class=move || if category.get().is_none() { "tab active" } else { "tab" }
                        on:click=move |_| all(None)
                    >"전체"</button>
                    <For
                        each=move || categories.get()
                        key=|row| cell_text(row, "id")
                        children=move |row| {
                            let id = row.get("id").and_then(Value::as_i64);
                            let pick = pick_category.clone();
                            view! {
                                <button
                                    class=move || if category.get() == id { "tab active" } else { "tab" }
                                    on:click=move |_| pick(id)
                                >{cell_text(&row, "name")}</button>
                            }
                        }
                    />
                </div>
                <div class="pos-layout">
                    <div class="pos-grid">
                        <For
                            each=move || menus.get()
                            key=|row| cell_text(row, "id")
                            children=move |row| {
                                let line = CartLine::from_menu(&row);
                                view! {
                                    <button class="pos-item" on:click=move |_| {
                                        if let Some(line) = line.clone() { cart.add(line) }
                                    }>
                                        <span>{cell_text(&row, "name")}</span>
                                        <span>{cell_text(&row, "price")}</span>
                                    </button>
                                }
                            }
                        />
                    </div>
                    <div>
                        <CartPanel cart=cart />
                        <button
                            class="btn btn-primary"
                            disabled=move || cart.lines.with(Vec::is_empty)
                            on:click=move |_| navigate(NamedRoute::PosPay.path(), Default::default())
                        >"결제하기"</button>
                    </div>
                </div>
            </div>
        </Layout>
    }
}

// -----------------------------------------------------------------------------
// 3. Menu Picker
// -----------------------------------------------------------------------------

#[component]
pub fn PosMenuPage() -> impl IntoView {
    let app_state = expect_context::<AppState>();
    let cart = expect_context::<PosCart>();
    let gateway = app_state.gateway.clone();

    let menus = RwSignal::new(Vec::<Value>::new());
    let detail = RwSignal::new(Option::<Value>::None);

    let list_gateway = gateway.clone();
    spawn_local(async move {
        menus.set(as_rows(menu::get_pos_menu_list(&list_gateway.menu).await));
    });

    let open = move |menu_id: i64| {
        let gateway = gateway.clone();
        spawn_local(async move {
            detail.set(menu::get_menu_detail(&gateway.menu, menu_id).await);
        });
    };

    view! {
        <Layout>
            <div class="page page-pos-menu">
                <h1>"메뉴 선택"</h1>
                <div class="pos-layout">
                    <ul class="item-list">
                        <For
                            each=move || menus.get()
                            key=|row| cell_text(row, "id")
                            children=move |row| {
                                let id = row.get("id").and_then(Value::as_i64);
                                let open = open.clone();
                                view! {
                                    <li class="item-row" on:click=move |_| {
                                        if let Some(id) = id { open(id) }
                                    }>
                                        <span>{cell_text(&row, "name")}</span>
                                        <span>{cell_text(&row, "price")}</span>
                                    </li>
                                }
                            }
                        />
                    </ul>
                    {move || detail.get().map(|item| {
                        let line = CartLine::from_menu(&item);
                        let title = cell_text(&item, "menuName");
                        let description = cell_text(&item, "description");
                        let options = item["options"].clone();
                        view! {
                            <Card title=title>
                                <p>{description}</p>
                                <DataTable
                                    rows=Signal::derive(move || options.clone())
                                    columns=vec![("name", "옵션"), ("price", "추가 금액")]
                                />
                                <button class="btn btn-primary" on:click=move |_| {
                                    if let Some(line) = line.clone() { cart.add(line) }
                                }>"담기"</button>
                            </Card>
                        }
                    })}
                    <CartPanel cart=cart />
                </div>
            </div>
        </Layout>
    }
}

// -----------------------------------------------------------------------------
// 4. Payment
// -----------------------------------------------------------------------------

#[component]
pub fn PosPayPage() -> impl IntoView {
    let app_state = expect_context::<AppState>();
    let cart = expect_context::<PosCart>();
    let gateway = app_state.gateway.clone();

    let paying = RwSignal::new(false);
    let notice = RwSignal::new(Option::<String>::None);

    let pay = Callback::new(move |_| {
        if paying.get_untracked() || cart.lines.with_untracked(Vec::is_empty) {
            return;
        }
        let gateway = gateway.clone();
        let order = cart.order_body();
        paying.set(true);
        spawn_local(async move {
            let stock = menu::check_stock_availability(&gateway.menu, &order).await;
            if stock["code"] != 200 {
                notice.set(Some(cell_text(&stock, "message")));
                paying.set(false);
                return;
            }

            let payment = json!({ "amount": order["totalPrice"] });
            if !user::verify(&gateway.user, &payment).await {
                notice.set(Some("결제 검증에 실패했습니다.".to_string()));
                paying.set(false);
                return;
            }

            match user::pos_order(&gateway.user, &order).await {
                Ok(_) => {
                    cart.clear();
                    notice.set(Some("주문이 완료되었습니다.".to_string()));
                }
                Err(e) => notice.set(Some(e.to_string())),
            }
            paying.set(false);
        });
    });

    view! {
        <Layout>
            <div class="page page-pos-pay">
                <h1>"결제"</h1>
                <Notice message=notice />
                <CartPanel cart=cart />
                <Button label="결제하기" busy=paying on_click=pay />
            </div>
        </Layout>
    }
}

// -----------------------------------------------------------------------------
// 5. Delivery & Stock Calls
// -----------------------------------------------------------------------------

#[component]
pub fn PosDeliveryPage() -> impl IntoView {
    let app_state = expect_context::<AppState>();
    let gateway = app_state.gateway.clone();

    let orders = RwSignal::new(Value::Null);
    let calls = RwSignal::new(Value::Null);

    spawn_local(async move {
        let (order_list, stock_calls) = futures::join!(
            user::get_orders_list(&gateway.user),
            user::get_inventory_call(&gateway.user),
        );
        match order_list {
            Ok(body) => orders.set(body["data"].clone()),
            Err(e) => log::warn!("Order list unavailable: {}", e),
        }
        match stock_calls {
            Ok(body) => calls.set(body["data"].clone()),
            Err(e) => log::warn!("Stock calls unavailable: {}", e),
        }
    });

    view! {
        <Layout>
            <div class="page page-pos-delivery">
                <h1>"배달 및 재고 호출"</h1>
                <Card title="주문 목록">
                    <DataTable
                        rows=orders
                        columns=vec![("orderId", "주문번호"), ("orderedAt", "시각"), ("totalPrice", "금액"), ("status", "상태")]
                    />
                </Card>
                <Card title="재고 부족 알림">
                    <DataTable rows=calls columns=vec![("name", "품목"), ("quantity", "현재 수량"), ("miniquantity", "최소 수량")] />
                </Card>
            </div>
        </Layout>
    }
}
