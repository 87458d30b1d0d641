// =============================================================================
// Storedesk Web - Layout Components
// =============================================================================
// Table of Contents:
// 1. Layout (Store Shell)
// 2. Header
// 3. Sidebar
// 4. Account Layout
// =============================================================================

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;

use super::ErrorDisplay;
use crate::routes::NamedRoute;
use crate::state::AppState;

// -----------------------------------------------------------------------------
// 1. Layout (Store Shell)
// -----------------------------------------------------------------------------

/// Shell of every store-management view: header, sidebar and content area.
#[component]
pub fn Layout(children: Children) -> impl IntoView {
    let app_state = expect_context::<AppState>();
    let error = app_state.error;

    view! {
        <div class="layout">
            <Header />
            <div class="layout-body">
                <Sidebar />
                <main class="layout-content">
                    {move || error.get().map(|message| view! {
                        <ErrorDisplay
                            message=message
                            on_dismiss=Callback::new(move |_| error.set(None))
                        />
                    })}
                    {children()}
                </main>
            </div>
        </div>
    }
}

// -----------------------------------------------------------------------------
// 2. Header
// -----------------------------------------------------------------------------

/// Top bar with the owner's name and logout.
#[component]
pub fn Header() -> impl IntoView {
    let app_state = expect_context::<AppState>();
    let session = app_state.auth.session();

    let user_display = move || {
        session.with(|s| {
            if s.logged_in {
                format!("{} 사장님", s.user_info.name)
            } else {
                "로그인이 필요합니다".to_string()
            }
        })
    };

    let auth = app_state.auth.clone();
    let navigate = use_navigate();
    let logout = move |_| {
        let auth = auth.clone();
        let navigate = navigate.clone();
        spawn_local(async move {
            auth.logout().await;
            navigate(NamedRoute::Login.path(), Default::default());
        });
    };

    view! {
        <header class="header">
            <div class="header-brand">
                <a href=NamedRoute::Dashboard.path() class="header-logo">
                    <span class="logo-text">"Storedesk"</span>
                </a>
            </div>

            <nav class="header-nav">
                <a href=NamedRoute::PosMain.path() class="nav-link">"POS"</a>
                <a href=NamedRoute::MyPage.path() class="nav-link">"마이페이지"</a>
            </nav>

            <div class="header-actions">
                <span class="user-name">{user_display}</span>
                <button class="btn btn-ghost" on:click=logout>"로그아웃"</button>
            </div>
        </header>
    }
}

// -----------------------------------------------------------------------------
// 3. Sidebar
// -----------------------------------------------------------------------------

const SIDEBAR_SECTIONS: &[(&str, &[(NamedRoute, &str)])] = &[
    (
        "매출",
        &[
            (NamedRoute::Dashboard, "매출 현황"),
            (NamedRoute::SalesAnalysis, "매출 분석"),
            (NamedRoute::MenuAnalysis, "메뉴 분석"),
            (NamedRoute::InventoryAnalysis, "재고 분석"),
        ],
    ),
    (
        "메뉴",
        &[
            (NamedRoute::MenuMain, "메뉴"),
            (NamedRoute::MenuCategory, "카테고리"),
            (NamedRoute::MenuOption, "옵션"),
        ],
    ),
    (
        "재고",
        &[
            (NamedRoute::InventoryMain, "재고 현황"),
            (NamedRoute::InventoryRegister, "재고 등록"),
        ],
    ),
    (
        "마켓",
        &[
            (NamedRoute::CommunityMap, "주변 매장"),
            (NamedRoute::CommunityList, "판매글"),
            (NamedRoute::CommunityTransactions, "거래 내역"),
        ],
    ),
];

/// Left sidebar navigation.
#[component]
pub fn Sidebar() -> impl IntoView {
    let current = crate::utils::get_pathname();

    view! {
        <aside class="sidebar">
            <nav class="sidebar-nav">
                {SIDEBAR_SECTIONS
                    .iter()
                    .map(|(title, links)| {
                        let links = links
                            .iter()
                            .map(|(route, label)| {
                                let active = route.path() == current;
                                view! {
                                    <a href=route.path() class="sidebar-link" class:active=active>
                                        <span class="sidebar-text">{*label}</span>
                                    </a>
                                }
                            })
                            .collect_view();
                        view! {
                            <div class="sidebar-section">
                                <h4 class="sidebar-title">{*title}</h4>
                                {links}
                            </div>
                        }
                    })
                    .collect_view()}
            </nav>
        </aside>
    }
}

// -----------------------------------------------------------------------------
// 4. Account Layout
// -----------------------------------------------------------------------------

/// Centered card used by login, sign-up and password reset.
#[component]
pub fn AccountLayout(#[prop(into)] title: String, children: Children) -> impl IntoView {
    view! {
        <div class="page page-account">
            <div class="account-card">
                <h1 class="account-title">{title}</h1>
                {children()}
            </div>
        </div>
    }
}
