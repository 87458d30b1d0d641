// =============================================================================
// Storedesk Web - 404 Not Found Page
// =============================================================================

use leptos::prelude::*;

use crate::routes::NamedRoute;

/// 404 Not Found page.
#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <div class="page page-not-found">
            <div class="not-found-content">
                <span class="not-found-code">"404"</span>
                <h1>"페이지를 찾을 수 없습니다"</h1>
                <p>"주소가 잘못되었거나 이동된 페이지입니다."</p>
                <a href=NamedRoute::Dashboard.path() class="btn btn-primary">
                    "홈으로"
                </a>
            </div>
        </div>
    }
}
