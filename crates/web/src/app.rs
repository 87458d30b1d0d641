// =============================================================================
// Storedesk Web - Main App Component
// =============================================================================
// Table of Contents:
// 1. Imports
// 2. App Component
// 3. Router Configuration
// 4. Redirect Listener
// =============================================================================

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_meta::{provide_meta_context, Title};
use leptos_router::components::{Route, Router, Routes};
use leptos_router::hooks::{use_location, use_navigate};
use leptos_router::path;

use crate::pages::{
    CategoryPage, DashboardPage, FindPwd1Page, FindPwd2Page, InventoryAnalysisPage,
    InventoryPage, InventoryRegisterPage, LoginPage, MarketListPage, MarketMapPage,
    MenuAnalysisPage, MenuPage, MyPage, NotFoundPage, OptionPage, PosCart, PosDeliveryPage,
    PosMainPage, PosMenuPage, PosPayPage, SalesAnalysisPage, Signup1Page, Signup2Page,
    SignupDonePage, StoreDonePage, StoreRegisterPage, TransactionsPage,
};
use crate::api::{needs_redirect, RouterNavigator};
use crate::state::AppState;

// -----------------------------------------------------------------------------
// 2. App Component
// -----------------------------------------------------------------------------

/// Root application component with routing.
///
/// The session is restored from `localStorage` while the state is built.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();
    let app_state = AppState::new();

    // an expired session is dropped here and redirected once by the interceptor
    if app_state.auth.is_logged_in() {
        let auth = app_state.auth.clone();
        spawn_local(async move {
            auth.verify_session().await;
        });
    }
    let redirects = app_state.redirects;

    provide_context(app_state);
    provide_context(PosCart::new());

    // -------------------------------------------------------------------------
    // 3. Router Configuration
    // -------------------------------------------------------------------------
    // Paths mirror `NamedRoute::path`.
    view! {
        <Title text="Storedesk" />
        <Router>
            <RedirectListener redirects=redirects />
            <Routes fallback=|| view! { <NotFoundPage /> }>
                // Account
                <Route path=path!("/account/login") view=LoginPage />
                <Route path=path!("/account/signup1") view=Signup1Page />
                <Route path=path!("/account/signup2") view=Signup2Page />
                <Route path=path!("/account/sdone") view=SignupDonePage />
                <Route path=path!("/account/register") view=StoreRegisterPage />
                <Route path=path!("/account/rdone") view=StoreDonePage />
                <Route path=path!("/account/findpwd1") view=FindPwd1Page />
                <Route path=path!("/account/findpwd2") view=FindPwd2Page />

                // Store management
                <Route path=path!("/") view=DashboardPage />
                <Route path=path!("/menu") view=MenuPage />
                <Route path=path!("/category") view=CategoryPage />
                <Route path=path!("/option") view=OptionPage />
                <Route path=path!("/menuAnalysis") view=MenuAnalysisPage />
                <Route path=path!("/inventoryAnalysis") view=InventoryAnalysisPage />
                <Route path=path!("/salesAnalysis") view=SalesAnalysisPage />
                <Route path=path!("/inventory") view=InventoryPage />
                <Route path=path!("/inventoryregi") view=InventoryRegisterPage />

                // Ingredient market
                <Route path=path!("/map") view=MarketMapPage />
                <Route path=path!("/list") view=MarketListPage />
                <Route path=path!("/transactions") view=TransactionsPage />
                <Route path=path!("/mypage") view=MyPage />

                // POS
                <Route path=path!("/pos") view=PosMainPage />
                <Route path=path!("/posmenu") view=PosMenuPage />
                <Route path=path!("/pay") view=PosPayPage />
                <Route path=path!("/deliverypositem") view=PosDeliveryPage />
            </Routes>
        </Router>
    }
}

// -----------------------------------------------------------------------------
// 4. Redirect Listener
// -----------------------------------------------------------------------------

/// Performs interceptor redirects through the router, skipping the current page.
#[component]
fn RedirectListener(redirects: RouterNavigator) -> impl IntoView {
    let navigate = use_navigate();
    let location = use_location();
    let pending = redirects.pending();

    Effect::new(move |_| {
        let Some(route) = pending.get() else {
            return;
        };
        pending.set(None);
        if needs_redirect(&location.pathname.get_untracked(), route) {
            log::info!("Redirecting to {}", route.path());
            navigate(route.path(), Default::default());
        }
    });
}
