// =============================================================================
// Storedesk Web - Sales Pages
// =============================================================================
// Table of Contents:
// 1. Dashboard (today)
// 2. Sales Analysis
// 3. Menu Analysis
// 4. Inventory Analysis
// =============================================================================

use leptos::prelude::*;
use leptos::task::spawn_local;
use serde_json::Value;

use crate::api::user::{self, PeriodRange, YearMonth};
use crate::components::{Card, DataTable, Layout, LoadingSpinner, Notice, TextInput};
use crate::state::AppState;
use crate::utils::format_won;

/// Current month in local time.
fn this_month() -> YearMonth {
    let now = js_sys::Date::new_0();
    YearMonth {
        year: now.get_full_year() as i32,
        month: now.get_month() + 1,
    }
}

// -----------------------------------------------------------------------------
// 1. Dashboard
// -----------------------------------------------------------------------------

#[component]
pub fn DashboardPage() -> impl IntoView {
    let app_state = expect_context::<AppState>();
    let gateway = app_state.gateway.clone();

    let today = RwSignal::new(Value::Null);
    let best = RwSignal::new(Value::Null);
    let orders = RwSignal::new(Value::Null);

    spawn_local(async move {
        // each panel degrades on its own
        match user::get_today_sales(&gateway.user).await {
            Ok(body) => today.set(body["data"].clone()),
            Err(e) => log::warn!("Today's sales unavailable: {}", e),
        }
        match user::get_best_top3(&gateway.user).await {
            Ok(body) => best.set(body["data"].clone()),
            Err(e) => log::warn!("Best menus unavailable: {}", e),
        }
        match user::get_orders_list(&gateway.user).await {
            Ok(body) => orders.set(body["data"].clone()),
            Err(e) => log::warn!("Order list unavailable: {}", e),
        }
    });

    let total = move || {
        today.with(|t| t["totalSales"].as_i64().map(format_won).unwrap_or_else(|| "-".to_string()))
    };

    view! {
        <Layout>
            <div class="page page-dashboard">
                <h1>"매출 현황"</h1>
                <div class="dashboard-grid">
                    <Card title="오늘 매출">
                        <p class="stat-value">{total}</p>
                    </Card>
                    <Card title="이번 주 인기 메뉴">
                        <DataTable rows=best columns=vec![("menuName", "메뉴"), ("quantity", "판매량")] />
                    </Card>
                </div>
                <Card title="최근 주문">
                    <DataTable
                        rows=orders
                        columns=vec![("orderId", "주문번호"), ("orderedAt", "시각"), ("totalPrice", "금액")]
                    />
                </Card>
            </div>
        </Layout>
    }
}

// -----------------------------------------------------------------------------
// 2. Sales Analysis
// -----------------------------------------------------------------------------

#[component]
pub fn SalesAnalysisPage() -> impl IntoView {
    let app_state = expect_context::<AppState>();
    let sales = app_state.sales;
    let gateway = app_state.gateway.clone();

    let month = this_month();
    let year_input = RwSignal::new(month.year.to_string());
    let month_input = RwSignal::new(month.month.to_string());
    let start = RwSignal::new(String::new());
    let end = RwSignal::new(String::new());

    spawn_local(async move { sales.fetch_month_sales(month).await });

    let load_month = move |_| {
        let (Ok(year), Ok(month)) = (year_input.get().parse(), month_input.get().parse()) else {
            sales.error.set(Some("연도와 월을 숫자로 입력해주세요.".to_string()));
            return;
        };
        spawn_local(async move { sales.fetch_month_sales(YearMonth { year, month }).await });
    };

    let period_total = RwSignal::new(Option::<i64>::None);

    let load_detail = move |_| {
        let range = PeriodRange {
            start_date: start.get(),
            end_date: end.get(),
        };
        let gateway = gateway.clone();
        spawn_local(async move {
            let (_, summary) = futures::join!(
                sales.fetch_sale_detail(range.clone()),
                user::get_sales_data(&gateway.user, &range),
            );
            match summary {
                Ok(body) => period_total.set(body["data"]["totalSales"].as_i64()),
                Err(e) => log::warn!("Period total unavailable: {}", e),
            }
        });
    };

    view! {
        <Layout>
            <div class="page page-sales">
                <h1>"매출 분석"</h1>
                <Notice message=sales.error />
                {move || sales.is_loading.get().then(|| view! { <LoadingSpinner message="불러오는 중..." /> })}

                <Card title="월별 매출">
                    <div class="inline-form">
                        <TextInput label="연도" value=year_input />
                        <TextInput label="월" value=month_input />
                        <button class="btn btn-secondary" on:click=load_month>"조회"</button>
                    </div>
                    <DataTable rows=sales.month_sales columns=vec![("date", "날짜"), ("totalSales", "매출")] />
                </Card>

                <Card title="기간별 상세">
                    <div class="inline-form">
                        <TextInput label="시작일" value=start input_type="date" />
                        <TextInput label="종료일" value=end input_type="date" />
                        <button class="btn btn-secondary" on:click=load_detail>"조회"</button>
                    </div>
                    {move || period_total.get().map(|total| view! {
                        <p class="stat-value">{format!("합계 {}", format_won(total))}</p>
                    })}
                    <DataTable
                        rows=sales.sale_detail
                        columns=vec![("date", "날짜"), ("menuName", "메뉴"), ("quantity", "수량"), ("totalPrice", "금액")]
                    />
                </Card>
            </div>
        </Layout>
    }
}

// -----------------------------------------------------------------------------
// 3. Menu Analysis
// -----------------------------------------------------------------------------

#[component]
pub fn MenuAnalysisPage() -> impl IntoView {
    let app_state = expect_context::<AppState>();
    let gateway = app_state.gateway.clone();

    let menus = RwSignal::new(Value::Null);
    let menu_sales = RwSignal::new(Value::Null);
    let start = RwSignal::new(String::new());
    let end = RwSignal::new(String::new());
    let notice = RwSignal::new(Option::<String>::None);

    let list_gateway = gateway.clone();
    spawn_local(async move {
        if let Some(list) = user::search_menu_list(&list_gateway.user).await.into_option() {
            menus.set(list);
        }
    });

    let search = move |_| {
        let gateway = gateway.clone();
        let range = PeriodRange {
            start_date: start.get(),
            end_date: end.get(),
        };
        spawn_local(async move {
            match user::search_menu_sale(&gateway.user, &range).await.into_option() {
                Some(data) => {
                    notice.set(None);
                    menu_sales.set(data);
                }
                None => notice.set(Some("메뉴별 매출을 불러오지 못했습니다.".to_string())),
            }
        });
    };

    view! {
        <Layout>
            <div class="page page-menu-analysis">
                <h1>"메뉴 분석"</h1>
                <Notice message=notice />
                <div class="inline-form">
                    <TextInput label="시작일" value=start input_type="date" />
                    <TextInput label="종료일" value=end input_type="date" />
                    <button class="btn btn-secondary" on:click=search>"조회"</button>
                </div>
                <Card title="메뉴별 매출">
                    <DataTable rows=menu_sales columns=vec![("menuName", "메뉴"), ("quantity", "판매량"), ("totalPrice", "매출")] />
                </Card>
                <Card title="판매 중인 메뉴">
                    <DataTable rows=menus columns=vec![("menuName", "메뉴"), ("price", "가격")] />
                </Card>
            </div>
        </Layout>
    }
}

// -----------------------------------------------------------------------------
// 4. Inventory Analysis
// -----------------------------------------------------------------------------

#[component]
pub fn InventoryAnalysisPage() -> impl IntoView {
    let app_state = expect_context::<AppState>();
    let gateway = app_state.gateway.clone();

    let stock = RwSignal::new(Value::Null);
    let changes = RwSignal::new(Value::Null);
    let market = RwSignal::new(Value::Null);
    let totals = RwSignal::new(Value::Null);
    let updates = RwSignal::new(Value::Null);
    let usage = RwSignal::new(Value::Null);
    let start = RwSignal::new(String::new());
    let end = RwSignal::new(String::new());

    let load_gateway = gateway.clone();
    spawn_local(async move {
        let client = &load_gateway.user;
        let (list, amount, best, total) = futures::join!(
            user::search_stock_list(client),
            user::get_stock_change(client),
            user::get_best_market(client),
            user::get_one_total_inventory(client),
        );
        stock.set(list.into_option().unwrap_or_default());
        changes.set(amount.into_option().unwrap_or_default());
        market.set(best.into_option().unwrap_or_default());
        totals.set(total.into_option().unwrap_or_default());
    });

    let search = move |_| {
        let gateway = gateway.clone();
        let range = PeriodRange {
            start_date: start.get(),
            end_date: end.get(),
        };
        spawn_local(async move {
            let (solo, menu_market) = futures::join!(
                user::search_inventory_update(&gateway.user, &range),
                user::search_menu_market(&gateway.user, &range),
            );
            updates.set(solo.into_option().unwrap_or_default());
            usage.set(menu_market.into_option().unwrap_or_default());
        });
    };

    view! {
        <Layout>
            <div class="page page-inventory-analysis">
                <h1>"재고 분석"</h1>
                <div class="dashboard-grid">
                    <Card title="재고 현황">
                        <DataTable rows=stock columns=vec![("name", "품목"), ("quantity", "수량"), ("unit", "단위")] />
                    </Card>
                    <Card title="재고 변동">
                        <DataTable rows=changes columns=vec![("date", "날짜"), ("amount", "변동량")] />
                    </Card>
                    <Card title="마켓 거래량">
                        <DataTable rows=market columns=vec![("name", "품목"), ("amount", "거래량")] />
                    </Card>
                    <Card title="총 재고">
                        <DataTable rows=totals columns=vec![("name", "품목"), ("totalQuantity", "총량")] />
                    </Card>
                </div>
                <div class="inline-form">
                    <TextInput label="시작일" value=start input_type="date" />
                    <TextInput label="종료일" value=end input_type="date" />
                    <button class="btn btn-secondary" on:click=search>"조회"</button>
                </div>
                <Card title="기간별 입고">
                    <DataTable rows=updates columns=vec![("name", "품목"), ("quantity", "입고량"), ("date", "날짜")] />
                </Card>
                <Card title="메뉴별 재료 사용">
                    <DataTable rows=usage columns=vec![("menuName", "메뉴"), ("name", "재료"), ("usedQuantity", "사용량")] />
                </Card>
            </div>
        </Layout>
    }
}
