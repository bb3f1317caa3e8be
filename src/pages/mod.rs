//! Pages
//!
//! One component per route. `page_view` picks the page for the current
//! route; layouts are applied by the app shell.

mod admin;
mod auth;
mod community;
mod donations;
mod favorites;
mod home;
mod notifications;
mod payment;
mod piggy_bank;
mod profile;
mod project_create;
mod project_detail;
mod projects;

use leptos::prelude::*;

use crate::components::{ErrorBanner, Loading, NavLink};
use crate::error::ApiResult;
use crate::routes::Route;

/// Loading, error or content for a query result
pub(crate) fn query_view<T, V>(result: Option<ApiResult<T>>, on_ok: impl FnOnce(T) -> V) -> AnyView
where
    V: IntoView + 'static,
{
    match result {
        None => view! { <Loading /> }.into_any(),
        Some(Err(error)) => view! { <ErrorBanner error=error /> }.into_any(),
        Some(Ok(value)) => on_ok(value).into_any(),
    }
}

#[component]
fn NotFoundPage() -> impl IntoView {
    view! {
        <div class="not-found">
            <h1>"404"</h1>
            <p>"요청하신 페이지를 찾을 수 없습니다."</p>
            <NavLink to=Route::Home class="btn primary">"홈으로"</NavLink>
        </div>
    }
}

/// Page component for a route
pub fn page_view(route: Route) -> AnyView {
    match route {
        Route::Home => view! { <home::HomePage /> }.into_any(),
        Route::Login { redirect } => view! { <auth::LoginPage redirect=redirect /> }.into_any(),
        Route::Signup => view! { <auth::SignupPage /> }.into_any(),
        Route::Projects => view! { <projects::ProjectListPage /> }.into_any(),
        Route::ProjectCreate => view! { <project_create::ProjectCreatePage /> }.into_any(),
        Route::ProjectDetail(id) => view! { <project_detail::ProjectDetailPage id=id /> }.into_any(),
        Route::Community => view! { <community::BoardPage /> }.into_any(),
        Route::CommunityWrite => view! { <community::PostEditorPage post_id=None /> }.into_any(),
        Route::CommunityPost(id) => view! { <community::PostDetailPage id=id /> }.into_any(),
        Route::CommunityEdit(id) => view! { <community::PostEditorPage post_id=Some(id) /> }.into_any(),
        Route::Profile => view! { <profile::ProfilePage /> }.into_any(),
        Route::Donations => view! { <donations::DonationHistoryPage /> }.into_any(),
        Route::Favorites => view! { <favorites::FavoritesPage /> }.into_any(),
        Route::PiggyBank => view! { <piggy_bank::PiggyBankPage /> }.into_any(),
        Route::Notifications => view! { <notifications::NotificationsPage /> }.into_any(),
        Route::PaymentSuccess { pg_token, order_id } => {
            view! { <payment::PaymentSuccessPage pg_token=pg_token order_id=order_id /> }.into_any()
        }
        Route::PaymentCancel { order_id } => view! { <payment::PaymentCancelPage order_id=order_id /> }.into_any(),
        Route::PaymentFail { order_id } => view! { <payment::PaymentFailPage order_id=order_id /> }.into_any(),
        Route::AdminDashboard => view! { <admin::DashboardPage /> }.into_any(),
        Route::AdminUsers => view! { <admin::UserManagementPage /> }.into_any(),
        Route::AdminOrganizations => view! { <admin::OrganizationApprovalPage /> }.into_any(),
        Route::AdminProjects => view! { <admin::ProjectManagementPage /> }.into_any(),
        Route::AdminSettlements => view! { <admin::SettlementManagementPage /> }.into_any(),
        Route::AdminDiagnostics => view! { <admin::DiagnosticsPage /> }.into_any(),
        Route::NotFound => view! { <NotFoundPage /> }.into_any(),
    }
}
