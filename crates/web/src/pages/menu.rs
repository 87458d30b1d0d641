// =============================================================================
// Storedesk Web - Menu Management Pages
// =============================================================================
// Table of Contents:
// 1. Menus
// 2. Categories
// 3. Options
// =============================================================================

use leptos::prelude::*;
use leptos::task::spawn_local;
use serde_json::{json, Value};

use crate::api::menu::{self, PageQuery};
use crate::components::{
    cell_text, Card, Layout, LoadingSpinner, Notice, Pager, Select, SelectOption, TextInput,
};
use crate::state::AppState;

const PAGE_SIZE: u32 = 10;

/// `content` and `totalPages` of a page payload.
fn page_parts(data: &Value) -> (Vec<Value>, u32) {
    let rows = data["content"].as_array().cloned().unwrap_or_default();
    let total = data["totalPages"].as_u64().unwrap_or(1) as u32;
    (rows, total)
}

fn row_id(row: &Value) -> Option<i64> {
    row.get("id").and_then(Value::as_i64)
}

/// Tag an edited record with its id; new records go without one.
fn with_id(body: &mut Value, target: Option<i64>) {
    if let Some(id) = target {
        body["id"] = json!(id);
    }
}

fn option_body(name: &str, price: i64, target: Option<i64>) -> Value {
    let mut body = json!({ "name": name, "price": price });
    with_id(&mut body, target);
    body
}

// -----------------------------------------------------------------------------
// 1. Menus
// -----------------------------------------------------------------------------

#[component]
pub fn MenuPage() -> impl IntoView {
    let app_state = expect_context::<AppState>();
    let store = app_state.menu;
    let gateway = app_state.gateway.clone();

    let page = RwSignal::new(0u32);
    let total_pages = RwSignal::new(1u32);
    let keyword = RwSignal::new(String::new());
    let rows = RwSignal::new(Vec::<Value>::new());
    let reload = RwSignal::new(0u32);
    let notice = RwSignal::new(Option::<String>::None);

    // editor
    let editing = RwSignal::new(Option::<i64>::None);
    let name = RwSignal::new(String::new());
    let price = RwSignal::new(String::new());
    let category = RwSignal::new(String::new());
    let ingredient = RwSignal::new(String::new());
    let ingredient_amount = RwSignal::new(String::new());

    spawn_local(async move { store.initialize().await });

    let list_gateway = gateway.clone();
    Effect::new(move |_| {
        reload.track();
        let query = PageQuery::new(page.get(), 5).keyword(keyword.get_untracked());
        let gateway = list_gateway.clone();
        spawn_local(async move {
            match menu::get_menu_page(&gateway.menu, &query).await {
                Ok(body) if body["code"] == 200 => {
                    let (content, total) = page_parts(&body["data"]);
                    rows.set(content);
                    total_pages.set(total);
                }
                Ok(body) => notice.set(body["message"].as_str().map(str::to_string)),
                Err(e) => notice.set(Some(e.to_string())),
            }
        });
    });

    let category_options = Signal::derive(move || {
        store.categories.with(|categories| {
            categories
                .iter()
                .map(|c| SelectOption {
                    value: c.id.map(|id| id.to_string()).unwrap_or_default(),
                    label: c.name.clone(),
                })
                .collect::<Vec<_>>()
        })
    });

    let ingredient_options = Signal::derive(move || {
        store.inventory_options.with(|options| {
            options
                .iter()
                .map(|o| SelectOption {
                    value: o.id.to_string(),
                    label: format!("{} ({})", o.name, o.unit),
                })
                .collect::<Vec<_>>()
        })
    });

    let edit_gateway = gateway.clone();
    let start_edit = move |id: i64| {
        let gateway = edit_gateway.clone();
        spawn_local(async move {
            if let Some(detail) = menu::get_menu_detail(&gateway.menu, id).await {
                editing.set(Some(id));
                name.set(cell_text(&detail, "name"));
                price.set(cell_text(&detail, "price"));
                category.set(cell_text(&detail, "categoryId"));
            }
        });
    };

    let save_gateway = gateway.clone();
    let save = move |_| {
        let Ok(price_val) = price.get().trim().parse::<i64>() else {
            notice.set(Some("가격은 숫자로 입력해주세요.".to_string()));
            return;
        };
        let category_id = category.get().parse::<i64>().ok();
        let gateway = save_gateway.clone();
        let target = editing.get();
        let recipe = ingredient.get().parse::<i64>().ok().map(|inventory_id| {
            (inventory_id, ingredient_amount.get().trim().parse::<f64>().unwrap_or(0.0))
        });
        let mut body = json!({ "name": name.get(), "price": price_val, "categoryId": category_id });
        with_id(&mut body, target);
        if let Some((inventory_id, amount)) = recipe {
            body["recipes"] = json!([{ "inventoryId": inventory_id, "quantity": amount }]);
        }
        spawn_local(async move {
            let outcome = match target {
                Some(_) => menu::update_menu(&gateway.menu, &body).await,
                None => menu::register_menu(&gateway.menu, &body).await,
            };
            match outcome.message() {
                Some(message) => notice.set(Some(message.to_string())),
                None => {
                    notice.set(None);
                    editing.set(None);
                    name.set(String::new());
                    price.set(String::new());
                    reload.update(|n| *n += 1);
                }
            }
        });
    };

    let delete = move |id: i64| {
        let gateway = gateway.clone();
        spawn_local(async move {
            if menu::delete_menus(&gateway.menu, &[id]).await {
                reload.update(|n| *n += 1);
            } else {
                notice.set(Some("메뉴 삭제에 실패했습니다.".to_string()));
            }
        });
    };

    view! {
        <Layout>
            <div class="page page-menu">
                <h1>"메뉴 관리"</h1>
                <Notice message=notice />
                <Notice message=store.error />
                {move || (store.loading_categories.get() || store.loading_inventory.get())
                    .then(|| view! { <LoadingSpinner /> })}

                <div class="inline-form">
                    <TextInput label="검색" value=keyword />
                    <button class="btn btn-secondary" on:click=move |_| {
                        page.set(0);
                        reload.update(|n| *n += 1);
                    }>"검색"</button>
                </div>

                <table class="data-table">
                    <thead><tr><th>"메뉴"</th><th>"가격"</th><th>"카테고리"</th><th></th></tr></thead>
                    <tbody>
                        <For
                            each=move || rows.get()
                            key=|row| cell_text(row, "id")
                            children=move |row| {
                                let id = row_id(&row);
                                let start_edit = start_edit.clone();
                                let delete = delete.clone();
                                view! {
                                    <tr>
                                        <td>{cell_text(&row, "name")}</td>
                                        <td>{cell_text(&row, "price")}</td>
                                        <td>{cell_text(&row, "categoryName")}</td>
                                        <td>
                                            <button class="btn btn-secondary" on:click=move |_| {
                                                if let Some(id) = id { start_edit(id) }
                                            }>"수정"</button>
                                            <button class="btn btn-danger" on:click=move |_| {
                                                if let Some(id) = id { delete(id) }
                                            }>"삭제"</button>
                                        </td>
                                    </tr>
                                }
                            }
                        />
                    </tbody>
                </table>
                <Pager page=page total_pages=total_pages />

                <Card title="메뉴 등록 / 수정">
                    <TextInput label="메뉴 이름" value=name required=true />
                    <TextInput label="가격" value=price required=true />
                    <Select label="카테고리" value=category options=category_options />
                    <Select label="재료" value=ingredient options=ingredient_options />
                    <TextInput label="재료 사용량" value=ingredient_amount />
                    <button class="btn btn-primary" on:click=save>
                        {move || if editing.get().is_some() { "수정하기" } else { "등록하기" }}
                    </button>
                </Card>
            </div>
        </Layout>
    }
}

// -----------------------------------------------------------------------------
// 2. Categories
// -----------------------------------------------------------------------------

#[component]
pub fn CategoryPage() -> impl IntoView {
    let app_state = expect_context::<AppState>();
    let gateway = app_state.gateway.clone();

    let page = RwSignal::new(0u32);
    let total_pages = RwSignal::new(1u32);
    let rows = RwSignal::new(Vec::<Value>::new());
    let reload = RwSignal::new(0u32);
    let notice = RwSignal::new(Option::<String>::None);
    let name = RwSignal::new(String::new());
    let editing = RwSignal::new(Option::<i64>::None);

    let list_gateway = gateway.clone();
    Effect::new(move |_| {
        reload.track();
        let query = PageQuery::new(page.get(), PAGE_SIZE);
        let gateway = list_gateway.clone();
        spawn_local(async move {
            match menu::get_category_list(&gateway.menu, &query).await {
                Some(data) => {
                    let (content, total) = page_parts(&data);
                    rows.set(content);
                    total_pages.set(total);
                }
                None => notice.set(Some("카테고리 로딩 실패".to_string())),
            }
        });
    });

    let save_gateway = gateway.clone();
    let save = move |_| {
        let gateway = save_gateway.clone();
        let target = editing.get();
        let label = name.get();
        spawn_local(async move {
            let outcome = match target {
                Some(id) => {
                    menu::update_category(&gateway.menu, &json!({ "id": id, "name": label })).await
                }
                None => menu::register_category(&gateway.menu, &json!({ "name": label })).await,
            };
            match outcome.message() {
                Some(message) => notice.set(Some(message.to_string())),
                None => {
                    notice.set(None);
                    editing.set(None);
                    name.set(String::new());
                    reload.update(|n| *n += 1);
                }
            }
        });
    };

    let delete = move |id: i64| {
        let gateway = gateway.clone();
        spawn_local(async move {
            match menu::delete_category(&gateway.menu, &json!([id])).await {
                Ok(body) if body["code"] == 200 => reload.update(|n| *n += 1),
                Ok(body) => notice.set(body["message"].as_str().map(str::to_string)),
                Err(e) => notice.set(Some(
                    e.response_message().unwrap_or_else(|| "카테고리 삭제 실패".to_string()),
                )),
            }
        });
    };

    view! {
        <Layout>
            <div class="page page-category">
                <h1>"카테고리 관리"</h1>
                <Notice message=notice />
                <div class="inline-form">
                    <TextInput label="카테고리 이름" value=name />
                    <button class="btn btn-primary" on:click=save>
                        {move || if editing.get().is_some() { "수정" } else { "등록" }}
                    </button>
                </div>
                <ul class="item-list">
                    <For
                        each=move || rows.get()
                        key=|row| cell_text(row, "id")
                        children=move |row| {
                            let id = row_id(&row);
                            let label = cell_text(&row, "name");
                            let delete = delete.clone();
                            let edit_label = label.clone();
                            view! {
                                <li class="item-row">
                                    <span>{label}</span>
                                    <button class="btn btn-secondary" on:click=move |_| {
                                        editing.set(id);
                                        name.set(edit_label.clone());
                                    }>"수정"</button>
                                    <button class="btn btn-danger" on:click=move |_| {
                                        if let Some(id) = id { delete(id) }
                                    }>"삭제"</button>
                                </li>
                            }
                        }
                    />
                </ul>
                <Pager page=page total_pages=total_pages />
            </div>
        </Layout>
    }
}

// -----------------------------------------------------------------------------
// 3. Options
// -----------------------------------------------------------------------------

#[component]
pub fn OptionPage() -> impl IntoView {
    let app_state = expect_context::<AppState>();
    let store = app_state.menu;
    let gateway = app_state.gateway.clone();

    let name = RwSignal::new(String::new());
    let price = RwSignal::new(String::new());
    let editing = RwSignal::new(Option::<i64>::None);
    let notice = RwSignal::new(Option::<String>::None);

    spawn_local(async move { store.initialize_options().await });

    let edit_gateway = gateway.clone();
    let start_edit = move |id: i64| {
        let gateway = edit_gateway.clone();
        spawn_local(async move {
            if let Some(option) = menu::get_option_by_id(&gateway.menu, id).await {
                editing.set(Some(id));
                name.set(cell_text(&option, "name"));
                price.set(cell_text(&option, "price"));
            }
        });
    };

    let save_gateway = gateway.clone();
    let save = move |_| {
        let gateway = save_gateway.clone();
        let price_val = price.get().trim().parse::<i64>().unwrap_or(0);
        let target = editing.get();
        let body = option_body(&name.get(), price_val, target);
        spawn_local(async move {
            let outcome = match target {
                Some(_) => menu::update_option(&gateway.menu, &body).await,
                None => menu::register_option(&gateway.menu, &body).await,
            };
            match outcome.message() {
                Some(message) => notice.set(Some(message.to_string())),
                None => {
                    notice.set(None);
                    editing.set(None);
                    store.initialize_options().await;
                }
            }
        });
    };

    let delete = move |id: i64| {
        let gateway = gateway.clone();
        spawn_local(async move {
            if menu::delete_options(&gateway.menu, &[id]).await {
                store.initialize_options().await;
            } else {
                notice.set(Some("옵션 삭제에 실패했습니다.".to_string()));
            }
        });
    };

    view! {
        <Layout>
            <div class="page page-option">
                <h1>"옵션 관리"</h1>
                <Notice message=notice />
                <Notice message=store.error />
                <div class="inline-form">
                    <TextInput label="옵션 이름" value=name />
                    <TextInput label="추가 금액" value=price />
                    <button class="btn btn-primary" on:click=save>
                        {move || if editing.get().is_some() { "수정" } else { "등록" }}
                    </button>
                </div>
                <ul class="item-list">
                    <For
                        each=move || store.option_list.get()
                        key=|row| cell_text(row, "id")
                        children=move |row| {
                            let id = row_id(&row);
                            let start_edit = start_edit.clone();
                            let delete = delete.clone();
                            view! {
                                <li class="item-row">
                                    <span>{cell_text(&row, "name")}</span>
                                    <span>{cell_text(&row, "price")}</span>
                                    <button class="btn btn-secondary" on:click=move |_| {
                                        if let Some(id) = id { start_edit(id) }
                                    }>"수정"</button>
                                    <button class="btn btn-danger" on:click=move |_| {
                                        if let Some(id) = id { delete(id) }
                                    }>"삭제"</button>
                                </li>
                            }
                        }
                    />
                </ul>
            </div>
        </Layout>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_body_carries_id_only_when_editing() {
        assert_eq!(
            option_body("샷 추가", 500, None),
            json!({ "name": "샷 추가", "price": 500 })
        );
        assert_eq!(
            option_body("샷 추가", 500, Some(9)),
            json!({ "name": "샷 추가", "price": 500, "id": 9 })
        );
    }

    #[test]
    fn page_parts_defaults_to_one_page() {
        let (rows, total) = page_parts(&json!({ "content": [{ "id": 1 }], "totalPages": 3 }));
        assert_eq!(rows.len(), 1);
        assert_eq!(total, 3);

        assert_eq!(page_parts(&Value::Null), (Vec::new(), 1));
    }
}
