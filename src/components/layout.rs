//! Layout Shells
//!
//! Main (header/footer), Admin (sidebar) and Auth (centered card) frames
//! around page content.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{self, use_api};
use crate::components::{NavLink, NotificationDropdown};
use crate::context::use_app_context;
use crate::models::UserType;
use crate::query::use_query_client;
use crate::routes::Route;
use crate::store::{store_logout, use_app_store, AppStateStoreFields};

/// Tell the server, then drop the local session and cache regardless
fn use_logout() -> impl Fn() + Clone + 'static {
    let api = use_api();
    let store = use_app_store();
    let client = use_query_client();
    let ctx = use_app_context();

    move || {
        let api = api.clone();
        spawn_local(async move {
            if let Err(e) = api::logout(&api).await {
                log::debug!("server logout failed: {}", e);
            }
        });
        store_logout(&store);
        client.clear();
        ctx.navigate(Route::Home);
    }
}

#[component]
fn Header() -> impl IntoView {
    let store = use_app_store();
    let logout = use_logout();

    let session = move || store.session().get();
    let user_type = move || store.session().with(|s| s.as_ref().map(|s| s.user.user_type));

    view! {
        <header class="site-header">
            <NavLink to=Route::Home class="logo">"함께기부"</NavLink>
            <nav class="main-nav">
                <NavLink to=Route::Projects>"프로젝트"</NavLink>
                <NavLink to=Route::Community>"커뮤니티"</NavLink>
                <Show when=move || matches!(user_type(), Some(UserType::Organization) | Some(UserType::Admin))>
                    <NavLink to=Route::ProjectCreate>"프로젝트 등록"</NavLink>
                </Show>
            </nav>
            <div class="header-actions">
                <Show
                    when=move || session().is_some()
                    fallback=|| view! {
                        <NavLink to=Route::Login { redirect: None } class="btn">"로그인"</NavLink>
                        <NavLink to=Route::Signup class="btn primary">"회원가입"</NavLink>
                    }
                >
                    <NotificationDropdown />
                    <div class="user-menu">
                        <span class="user-name">
                            {move || session().map(|s| format!("{}님", s.user.user_name)).unwrap_or_default()}
                        </span>
                        <NavLink to=Route::Profile>"내 정보"</NavLink>
                        <NavLink to=Route::Donations>"기부 내역"</NavLink>
                        <NavLink to=Route::Favorites>"관심 프로젝트"</NavLink>
                        <Show when=move || user_type() == Some(UserType::Organization)>
                            <NavLink to=Route::PiggyBank>"저금통"</NavLink>
                        </Show>
                        <Show when=move || user_type() == Some(UserType::Admin)>
                            <NavLink to=Route::AdminDashboard>"관리자"</NavLink>
                        </Show>
                        <button class="link-btn" on:click={
                            let logout = logout.clone();
                            move |_| logout()
                        }>"로그아웃"</button>
                    </div>
                </Show>
            </div>
        </header>
    }
}

#[component]
fn Footer() -> impl IntoView {
    view! {
        <footer class="site-footer">
            <p>"함께기부 · 투명한 기부 플랫폼"</p>
            <p class="muted">"모든 기부금 사용 내역은 저금통과 정산 기록으로 공개됩니다."</p>
        </footer>
    }
}

#[component]
pub fn MainLayout(children: Children) -> impl IntoView {
    view! {
        <div class="main-layout">
            <Header />
            <main class="page-content">{children()}</main>
            <Footer />
        </div>
    }
}

/// Admin menu entries in sidebar order
const ADMIN_MENU: [(Route, &str); 6] = [
    (Route::AdminDashboard, "대시보드"),
    (Route::AdminUsers, "회원 관리"),
    (Route::AdminOrganizations, "기관 승인"),
    (Route::AdminProjects, "프로젝트 관리"),
    (Route::AdminSettlements, "정산 관리"),
    (Route::AdminDiagnostics, "진단"),
];

#[component]
fn AdminSidebar() -> impl IntoView {
    let ctx = use_app_context();
    let logout = use_logout();

    view! {
        <aside class="admin-sidebar">
            <h2>"관리자"</h2>
            <nav>
                {ADMIN_MENU
                    .into_iter()
                    .map(|(route, label)| {
                        let target = route.clone();
                        let class = move || if ctx.route.get() == target { "sidebar-link active" } else { "sidebar-link" };
                        view! {
                            <div class=class>
                                <NavLink to=route>{label}</NavLink>
                            </div>
                        }
                    })
                    .collect_view()}
            </nav>
            <div class="sidebar-footer">
                <NavLink to=Route::Home>"사이트로 돌아가기"</NavLink>
                <button class="link-btn" on:click=move |_| logout()>"로그아웃"</button>
            </div>
        </aside>
    }
}

#[component]
pub fn AdminLayout(children: Children) -> impl IntoView {
    let ctx = use_app_context();
    view! {
        <div class="admin-layout">
            <AdminSidebar />
            <section class="admin-content">
                <h1 class="admin-title">{move || ctx.route.get().title()}</h1>
                {children()}
            </section>
        </div>
    }
}

#[component]
pub fn AuthLayout(children: Children) -> impl IntoView {
    view! {
        <div class="auth-layout">
            <NavLink to=Route::Home class="logo">"함께기부"</NavLink>
            <div class="auth-card">{children()}</div>
        </div>
    }
}
