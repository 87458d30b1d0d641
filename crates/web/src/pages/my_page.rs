// =============================================================================
// Storedesk Web - My Page
// =============================================================================

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;
use serde_json::json;

use crate::api::user;
use crate::components::{cell_text, Card, Layout, Notice, TextInput};
use crate::routes::NamedRoute;
use crate::state::AppState;

/// Profile view and edit for the logged-in owner.
#[component]
pub fn MyPage() -> impl IntoView {
    let app_state = expect_context::<AppState>();
    let auth = app_state.auth.clone();
    let gateway = app_state.gateway.clone();
    let navigate = use_navigate();

    let nickname = RwSignal::new(String::new());
    let phone = RwSignal::new(String::new());
    let has_store = RwSignal::new(true);
    let notice = RwSignal::new(Option::<String>::None);

    let load_auth = auth.clone();
    let load_gateway = gateway.clone();
    spawn_local(async move {
        let (refreshed, registered) = futures::join!(
            load_auth.refresh_profile(),
            user::is_registered(&load_gateway.user),
        );
        if !refreshed {
            notice.set(Some("회원 정보를 불러오지 못했습니다.".to_string()));
        }
        nickname.set(load_auth.session().with_untracked(|s| s.user_info.nickname.clone()));
        has_store.set(registered);
    });

    let save_auth = auth.clone();
    let save = move |_| {
        let auth = save_auth.clone();
        let gateway = gateway.clone();
        let body = json!({ "nickname": nickname.get(), "phoneNumber": phone.get() });
        spawn_local(async move {
            match user::update_user_info(&gateway.user, &body).await {
                Ok(result) if result["code"] == 200 => {
                    auth.refresh_profile().await;
                    notice.set(Some("저장되었습니다.".to_string()));
                }
                Ok(result) => notice.set(Some(cell_text(&result, "message"))),
                Err(e) => notice.set(Some(e.to_string())),
            }
        });
    };

    let session = auth.session();

    view! {
        <Layout>
            <div class="page page-mypage">
                <h1>"마이페이지"</h1>
                <Notice message=notice />
                <Card title="회원 정보">
                    <dl class="detail">
                        <dt>"이름"</dt><dd>{move || session.with(|s| s.user_info.name.clone())}</dd>
                        <dt>"이메일"</dt><dd>{move || session.with(|s| s.user_info.email.clone())}</dd>
                        <dt>"매장 번호"</dt><dd>{move || session.with(|s| s.store_id.clone())}</dd>
                    </dl>
                </Card>
                <Card title="정보 수정">
                    <TextInput label="닉네임" value=nickname />
                    <TextInput label="연락처" value=phone input_type="tel" />
                    <button class="btn btn-primary" on:click=save>"저장"</button>
                </Card>
                {move || (!has_store.get()).then(|| {
                    let navigate = navigate.clone();
                    view! {
                        <Card title="매장 등록">
                            <p>"등록된 매장이 없습니다."</p>
                            <button class="btn btn-secondary" on:click=move |_| {
                                navigate(NamedRoute::StoreRegister.path(), Default::default())
                            }>"매장 등록하기"</button>
                        </Card>
                    }
                })}
            </div>
        </Layout>
    }
}
