//! Login & Signup Pages
//!
//! Both store the returned session, make every cached query stale and leave
//! for the redirect target (login) or the home page (signup).

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{self, use_api};
use crate::components::NavLink;
use crate::context::use_app_context;
use crate::models::{AuthResponse, UserType};
use crate::query::use_query_client;
use crate::routes::{redirect_target, Route};
use crate::store::{store_login, use_app_store};
use crate::validation::{EmailCheck, LoginForm, SignupForm};

/// Store the session and refresh everything that depended on being anonymous
fn use_finish_login() -> impl Fn(AuthResponse, Route) + Clone + 'static {
    let store = use_app_store();
    let client = use_query_client();
    let ctx = use_app_context();
    move |response: AuthResponse, target: Route| {
        log::info!("logged in as user {}", response.user.user_id);
        store_login(&store, response.token, response.user);
        client.invalidate_all();
        ctx.navigate(target);
    }
}

#[component]
pub fn LoginPage(redirect: Option<String>) -> impl IntoView {
    let api = use_api();
    let finish = use_finish_login();
    let form = RwSignal::new(LoginForm::default());
    let (error, set_error) = signal::<Option<String>>(None);
    let (submitting, set_submitting) = signal(false);
    let target = redirect_target(redirect.as_deref());

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let request = match form.with_untracked(|f| f.validate()) {
            Ok(request) => request,
            Err(message) => {
                set_error.set(Some(message));
                return;
            }
        };
        let api = api.clone();
        let finish = finish.clone();
        let target = target.clone();
        set_error.set(None);
        set_submitting.set(true);
        spawn_local(async move {
            match api::login(&api, &request).await {
                Ok(response) => finish(response, target),
                Err(e) => set_error.set(Some(e.user_message())),
            }
            set_submitting.set(false);
        });
    };

    view! {
        <h1>"로그인"</h1>
        <form class="auth-form" on:submit=submit>
            <input
                type="email"
                placeholder="이메일"
                autocomplete="username"
                prop:value=move || form.with(|f| f.email.clone())
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    form.update(|f| f.email = value);
                }
            />
            <input
                type="password"
                placeholder="비밀번호"
                autocomplete="current-password"
                prop:value=move || form.with(|f| f.password.clone())
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    form.update(|f| f.password = value);
                }
            />
            <label class="checkbox">
                <input
                    type="checkbox"
                    prop:checked=move || form.with(|f| f.remember_me)
                    on:change=move |ev| {
                        let checked = event_target_checked(&ev);
                        form.update(|f| f.remember_me = checked);
                    }
                />
                "로그인 상태 유지"
            </label>
            {move || error.get().map(|e| view! { <p class="form-error">{e}</p> })}
            <button type="submit" class="btn primary" disabled=move || submitting.get()>
                {move || if submitting.get() { "로그인 중..." } else { "로그인" }}
            </button>
        </form>
        <p class="auth-switch">"아직 회원이 아니신가요? " <NavLink to=Route::Signup>"회원가입"</NavLink></p>
    }
}

#[component]
pub fn SignupPage() -> impl IntoView {
    let api = use_api();
    let finish = use_finish_login();
    let form = RwSignal::new(SignupForm::default());
    let (error, set_error) = signal::<Option<String>>(None);
    let (submitting, set_submitting) = signal(false);

    let check_email = {
        let api = api.clone();
        move |_: web_sys::MouseEvent| {
            let email = match form.with_untracked(|f| f.email_for_check()) {
                Ok(email) => email,
                Err(message) => {
                    set_error.set(Some(message));
                    return;
                }
            };
            let api = api.clone();
            spawn_local(async move {
                match api::check_email_availability(&api, &email).await {
                    Ok(available) => {
                        form.update(|f| f.record_email_check(email, available));
                        set_error.set(None);
                    }
                    Err(e) => set_error.set(Some(e.user_message())),
                }
            });
        }
    };

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let request = match form.with_untracked(|f| f.validate()) {
            Ok(request) => request,
            Err(message) => {
                set_error.set(Some(message));
                return;
            }
        };
        let api = api.clone();
        let finish = finish.clone();
        set_error.set(None);
        set_submitting.set(true);
        spawn_local(async move {
            match api::signup(&api, &request).await {
                Ok(response) => finish(response, Route::Home),
                Err(e) => set_error.set(Some(e.user_message())),
            }
            set_submitting.set(false);
        });
    };

    let field = move |placeholder: &'static str, kind: &'static str, get: fn(&SignupForm) -> String, set: fn(&mut SignupForm, String)| {
        view! {
            <input
                type=kind
                placeholder=placeholder
                prop:value=move || form.with(get)
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    form.update(|f| set(f, value));
                }
            />
        }
    };

    let email_status = move || {
        form.with(|f| match &f.email_check {
            EmailCheck::Available(checked) if *checked == f.email.trim() => Some(("hint ok", "사용 가능한 이메일입니다.")),
            EmailCheck::Taken(checked) if *checked == f.email.trim() => Some(("hint error", "이미 사용 중인 이메일입니다.")),
            _ => None,
        })
    };

    view! {
        <h1>"회원가입"</h1>
        <div class="user-type-toggle">
            {[UserType::Individual, UserType::Organization]
                .into_iter()
                .map(|t| view! {
                    <button
                        type="button"
                        class=move || if form.with(|f| f.user_type == t) { "toggle active" } else { "toggle" }
                        on:click=move |_| form.update(|f| f.user_type = t)
                    >
                        {t.label()}
                    </button>
                })
                .collect_view()}
        </div>
        <form class="auth-form" on:submit=submit>
            <div class="inline-field">
                {field("이메일", "email", |f| f.email.clone(), |f, v| f.email = v)}
                <button type="button" class="btn" on:click=check_email>"중복 확인"</button>
            </div>
            {move || email_status().map(|(class, text)| view! { <p class=class>{text}</p> })}
            {field("비밀번호 (8자 이상, 특수문자 포함)", "password", |f| f.password.clone(), |f, v| f.password = v)}
            {field("비밀번호 확인", "password", |f| f.password_confirm.clone(), |f, v| f.password_confirm = v)}
            {field("이름", "text", |f| f.user_name.clone(), |f, v| f.user_name = v)}
            {field("연락처", "tel", |f| f.phone.clone(), |f, v| f.phone = v)}
            <Show when=move || form.with(|f| f.user_type == UserType::Organization)>
                <fieldset class="org-fields">
                    <legend>"기관 정보"</legend>
                    {field("기관명", "text", |f| f.organization_name.clone(), |f, v| f.organization_name = v)}
                    {field("사업자등록번호", "text", |f| f.business_number.clone(), |f, v| f.business_number = v)}
                    {field("대표자명", "text", |f| f.representative_name.clone(), |f, v| f.representative_name = v)}
                </fieldset>
            </Show>
            {move || error.get().map(|e| view! { <p class="form-error">{e}</p> })}
            <button type="submit" class="btn primary" disabled=move || submitting.get()>
                {move || if submitting.get() { "가입 중..." } else { "가입하기" }}
            </button>
        </form>
        <p class="auth-switch">"이미 계정이 있으신가요? " <NavLink to=Route::Login { redirect: None }>"로그인"</NavLink></p>
    }
}
