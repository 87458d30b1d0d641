// =============================================================================
// Storedesk Web - Account Pages
// =============================================================================
// Table of Contents:
// 1. Login
// 2. Sign-up (two steps + done)
// 3. Store Registration (+ done)
// 4. Password Reset (two steps)
// =============================================================================

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;
use serde_json::json;

use crate::api::user;
use crate::components::{AccountLayout, Notice, TextInput};
use crate::routes::NamedRoute;
use crate::state::AppState;
use crate::utils::{is_valid_business_number, is_valid_email, is_valid_password, is_valid_phone};

// -----------------------------------------------------------------------------
// 1. Login
// -----------------------------------------------------------------------------

#[component]
pub fn LoginPage() -> impl IntoView {
    let app_state = expect_context::<AppState>();
    let navigate = use_navigate();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let loading = RwSignal::new(false);
    let error = RwSignal::new(Option::<String>::None);

    view! {
        <AccountLayout title="로그인">
            <form class="account-form" on:submit=|e| e.prevent_default()>
                <Notice message=error />
                <TextInput label="이메일" value=email input_type="email" placeholder="you@example.com" />
                <TextInput label="비밀번호" value=password input_type="password" />

                <button
                    type="button"
                    class="btn btn-primary"
                    disabled=move || loading.get()
                    on:click=move |_| {
                        let email_val = email.get();
                        let password_val = password.get();
                        if email_val.is_empty() || password_val.is_empty() {
                            error.set(Some("이메일과 비밀번호를 입력해주세요.".to_string()));
                            return;
                        }

                        loading.set(true);
                        error.set(None);

                        let auth = app_state.auth.clone();
                        let nav = navigate.clone();
                        spawn_local(async move {
                            let outcome = auth.login(&email_val, &password_val).await;
                            loading.set(false);

                            match outcome.message() {
                                None if auth.store_id().is_empty() => {
                                    nav(NamedRoute::StoreRegister.path(), Default::default())
                                }
                                None => nav(NamedRoute::Dashboard.path(), Default::default()),
                                Some(message) => error.set(Some(message.to_string())),
                            }
                        });
                    }
                >
                    {move || if loading.get() { "로그인 중..." } else { "로그인" }}
                </button>

                <div class="account-links">
                    <a href=NamedRoute::Signup1.path()>"회원가입"</a>
                    <a href=NamedRoute::FindPwd1.path()>"비밀번호 찾기"</a>
                </div>
            </form>
        </AccountLayout>
    }
}

// -----------------------------------------------------------------------------
// 2. Sign-up
// -----------------------------------------------------------------------------

/// Step 1: name, e-mail (verified by code) and password.
#[component]
pub fn Signup1Page() -> impl IntoView {
    let app_state = expect_context::<AppState>();
    let navigate = use_navigate();
    let signup = app_state.signup;
    let gateway = app_state.gateway.clone();

    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let code = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let verified = RwSignal::new(false);
    let notice = RwSignal::new(Option::<String>::None);

    let send_gateway = gateway.clone();
    let send_code = move |_| {
        let address = email.get();
        if !is_valid_email(&address) {
            notice.set(Some("올바른 이메일을 입력해주세요.".to_string()));
            return;
        }
        let gateway = send_gateway.clone();
        spawn_local(async move {
            let sent = user::email_send(&gateway.user, &address).await;
            notice.set(Some(
                if sent { "인증번호를 보냈습니다." } else { "인증번호 전송에 실패했습니다." }.to_string(),
            ));
        });
    };

    let check_code = move |_| {
        let gateway = gateway.clone();
        let (code_val, address) = (code.get(), email.get());
        spawn_local(async move {
            let ok = user::email_auth(&gateway.user, &code_val, &address).await;
            verified.set(ok);
            notice.set(Some(
                if ok { "이메일이 인증되었습니다." } else { "인증번호가 올바르지 않습니다." }.to_string(),
            ));
        });
    };

    let next = move |_| {
        if !verified.get() {
            notice.set(Some("이메일 인증을 완료해주세요.".to_string()));
        } else if !is_valid_password(&password.get()) {
            notice.set(Some("비밀번호는 8자 이상이어야 합니다.".to_string()));
        } else if password.get() != confirm.get() {
            notice.set(Some("비밀번호가 일치하지 않습니다.".to_string()));
        } else {
            signup.set_step1(name.get(), email.get(), password.get());
            navigate(NamedRoute::Signup2.path(), Default::default());
        }
    };

    view! {
        <AccountLayout title="회원가입 (1/2)">
            <Notice message=notice />
            <TextInput label="이름" value=name required=true />
            <TextInput label="이메일" value=email input_type="email" required=true />
            <button type="button" class="btn btn-secondary" on:click=send_code>"인증번호 전송"</button>
            <TextInput label="인증번호" value=code />
            <button type="button" class="btn btn-secondary" on:click=check_code>"인증 확인"</button>
            <TextInput label="비밀번호" value=password input_type="password" required=true />
            <TextInput label="비밀번호 확인" value=confirm input_type="password" required=true />
            <button type="button" class="btn btn-primary" on:click=next>"다음"</button>
        </AccountLayout>
    }
}

/// Step 2: business number, phone (verified by SMS) and identity number.
#[component]
pub fn Signup2Page() -> impl IntoView {
    let app_state = expect_context::<AppState>();
    let navigate = use_navigate();
    let signup = app_state.signup;
    let gateway = app_state.gateway.clone();

    let business_number = RwSignal::new(String::new());
    let phone = RwSignal::new(String::new());
    let code = RwSignal::new(String::new());
    let ssn = RwSignal::new(String::new());
    let verified = RwSignal::new(false);
    let busy = RwSignal::new(false);
    let notice = RwSignal::new(Option::<String>::None);

    let send_gateway = gateway.clone();
    let send_sms = move |_| {
        let number = phone.get();
        if !is_valid_phone(&number) {
            notice.set(Some("올바른 휴대폰 번호를 입력해주세요.".to_string()));
            return;
        }
        let gateway = send_gateway.clone();
        spawn_local(async move {
            let sent = user::phone_send(&gateway.user, &number).await.is_some();
            notice.set(Some(
                if sent { "인증번호를 보냈습니다." } else { "인증번호 전송에 실패했습니다." }.to_string(),
            ));
        });
    };

    let check_sms = move |_| {
        let gateway = gateway.clone();
        let (code_val, number) = (code.get(), phone.get());
        spawn_local(async move {
            let ok = user::phone_auth(&gateway.user, &code_val, &number).await;
            verified.set(ok);
            if !ok {
                notice.set(Some("인증번호가 올바르지 않습니다.".to_string()));
            }
        });
    };

    let submit = move |_| {
        if !verified.get() {
            notice.set(Some("휴대폰 인증을 완료해주세요.".to_string()));
            return;
        }
        if !is_valid_business_number(&business_number.get()) {
            notice.set(Some("사업자 등록번호를 확인해주세요.".to_string()));
            return;
        }
        signup.set_step2(business_number.get(), phone.get(), ssn.get());
        busy.set(true);
        let nav = navigate.clone();
        spawn_local(async move {
            let outcome = signup.submit().await;
            busy.set(false);
            match outcome.message() {
                None => nav(NamedRoute::SignupDone.path(), Default::default()),
                Some(message) => notice.set(Some(message.to_string())),
            }
        });
    };

    view! {
        <AccountLayout title="회원가입 (2/2)">
            <Notice message=notice />
            <TextInput label="사업자 등록번호" value=business_number placeholder="000-00-00000" required=true />
            <TextInput label="휴대폰 번호" value=phone placeholder="010-0000-0000" required=true />
            <button type="button" class="btn btn-secondary" on:click=send_sms>"인증번호 전송"</button>
            <TextInput label="인증번호" value=code />
            <button type="button" class="btn btn-secondary" on:click=check_sms>"인증 확인"</button>
            <TextInput label="주민등록번호 앞자리" value=ssn required=true />
            <button type="button" class="btn btn-primary" disabled=move || busy.get() on:click=submit>
                "가입하기"
            </button>
        </AccountLayout>
    }
}

#[component]
pub fn SignupDonePage() -> impl IntoView {
    view! {
        <AccountLayout title="회원가입 완료">
            <p>"가입이 완료되었습니다. 로그인 후 매장을 등록해주세요."</p>
            <a href=NamedRoute::Login.path() class="btn btn-primary">"로그인하기"</a>
        </AccountLayout>
    }
}

// -----------------------------------------------------------------------------
// 3. Store Registration
// -----------------------------------------------------------------------------

/// Shown whenever the backend reports that the account has no store yet.
#[component]
pub fn StoreRegisterPage() -> impl IntoView {
    let app_state = expect_context::<AppState>();
    let navigate = use_navigate();

    let name = RwSignal::new(String::new());
    let address = RwSignal::new(String::new());
    let phone = RwSignal::new(String::new());
    let busy = RwSignal::new(false);
    let notice = RwSignal::new(Option::<String>::None);

    let submit = move |_| {
        if name.get().trim().is_empty() || address.get().trim().is_empty() {
            notice.set(Some("매장 이름과 주소를 입력해주세요.".to_string()));
            return;
        }
        let body = json!({
            "name": name.get(),
            "address": address.get(),
            "phoneNumber": phone.get(),
        });
        let auth = app_state.auth.clone();
        let gateway = app_state.gateway.clone();
        let nav = navigate.clone();
        busy.set(true);
        spawn_local(async move {
            let result = user::register_store(&gateway.user, &body).await;
            busy.set(false);
            match result {
                Ok(response) if response["code"] == 200 => {
                    if let Some(id) = response["data"]["storeId"].as_i64() {
                        auth.set_store_id(id.to_string());
                    }
                    nav(NamedRoute::StoreDone.path(), Default::default());
                }
                Ok(response) => notice.set(Some(
                    response["message"]
                        .as_str()
                        .unwrap_or("매장 등록에 실패했습니다.")
                        .to_string(),
                )),
                Err(e) => notice.set(Some(
                    e.response_message().unwrap_or_else(|| "매장 등록에 실패했습니다.".to_string()),
                )),
            }
        });
    };

    view! {
        <AccountLayout title="매장 등록">
            <Notice message=notice />
            <TextInput label="매장 이름" value=name required=true />
            <TextInput label="주소" value=address required=true />
            <TextInput label="매장 전화번호" value=phone />
            <button type="button" class="btn btn-primary" disabled=move || busy.get() on:click=submit>
                "등록하기"
            </button>
        </AccountLayout>
    }
}

#[component]
pub fn StoreDonePage() -> impl IntoView {
    view! {
        <AccountLayout title="매장 등록 완료">
            <p>"매장이 등록되었습니다."</p>
            <a href=NamedRoute::Dashboard.path() class="btn btn-primary">"시작하기"</a>
        </AccountLayout>
    }
}

// -----------------------------------------------------------------------------
// 4. Password Reset
// -----------------------------------------------------------------------------

/// Step 1: prove ownership of the account e-mail.
#[component]
pub fn FindPwd1Page() -> impl IntoView {
    let app_state = expect_context::<AppState>();
    let navigate = use_navigate();
    let reset = app_state.password_reset;
    let gateway = app_state.gateway.clone();

    let email = RwSignal::new(String::new());
    let code = RwSignal::new(String::new());
    let notice = RwSignal::new(Option::<String>::None);

    let send_code = move |_| {
        reset.set_step1(email.get());
        spawn_local(async move {
            match reset.send_code().await {
                Ok(_) => notice.set(Some("인증번호를 보냈습니다.".to_string())),
                Err(e) => notice.set(Some(e.to_string())),
            }
        });
    };

    let verify = move |_| {
        let gateway = gateway.clone();
        let nav = navigate.clone();
        let (code_val, address) = (code.get(), email.get());
        spawn_local(async move {
            if user::email_auth(&gateway.user, &code_val, &address).await {
                nav(NamedRoute::FindPwd2.path(), Default::default());
            } else {
                notice.set(Some("인증번호가 올바르지 않습니다.".to_string()));
            }
        });
    };

    view! {
        <AccountLayout title="비밀번호 찾기">
            <Notice message=notice />
            <TextInput label="가입한 이메일" value=email input_type="email" />
            <button type="button" class="btn btn-secondary" on:click=send_code>"인증번호 전송"</button>
            <TextInput label="인증번호" value=code />
            <button type="button" class="btn btn-primary" on:click=verify>"다음"</button>
        </AccountLayout>
    }
}

/// Step 2: choose the new password.
#[component]
pub fn FindPwd2Page() -> impl IntoView {
    let app_state = expect_context::<AppState>();
    let navigate = use_navigate();
    let reset = app_state.password_reset;

    let password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let notice = RwSignal::new(Option::<String>::None);

    let submit = move |_| {
        if !is_valid_password(&password.get()) {
            notice.set(Some("비밀번호는 8자 이상이어야 합니다.".to_string()));
            return;
        }
        if password.get() != confirm.get() {
            notice.set(Some("비밀번호가 일치하지 않습니다.".to_string()));
            return;
        }
        reset.set_step2(password.get());
        let nav = navigate.clone();
        spawn_local(async move {
            if reset.submit().await {
                nav(NamedRoute::Login.path(), Default::default());
            } else {
                notice.set(Some("비밀번호 변경에 실패했습니다.".to_string()));
            }
        });
    };

    view! {
        <AccountLayout title="새 비밀번호">
            <Notice message=notice />
            <TextInput label="새 비밀번호" value=password input_type="password" />
            <TextInput label="새 비밀번호 확인" value=confirm input_type="password" />
            <button type="button" class="btn btn-primary" on:click=submit>"변경하기"</button>
        </AccountLayout>
    }
}
