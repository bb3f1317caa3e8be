//! Admin Pages
//!
//! Back-office screens rendered inside the admin layout. Every approval or
//! status change refreshes its own list and the dashboard counters.

mod dashboard;
mod diagnostics;
mod organizations;
mod projects;
mod settlements;
mod users;

pub use dashboard::DashboardPage;
pub use diagnostics::DiagnosticsPage;
pub use organizations::OrganizationApprovalPage;
pub use projects::ProjectManagementPage;
pub use settlements::SettlementManagementPage;
pub use users::UserManagementPage;

use std::future::Future;

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::alert;
use crate::error::ApiResult;
use crate::query::QueryClient;

const DASHBOARD_KEY: &str = "admin-dashboard";
const PAGE_SIZE: u32 = 20;

/// Run an admin mutation, then refresh `keys` and the dashboard
fn run_admin_action<Fut>(client: QueryClient, keys: &'static [&'static str], done: &'static str, action: Fut)
where
    Fut: Future<Output = ApiResult<()>> + 'static,
{
    spawn_local(async move {
        match action.await {
            Ok(()) => {
                client.invalidate_many(keys);
                client.invalidate(DASHBOARD_KEY);
                alert(done);
            }
            Err(e) => {
                log::warn!("admin action on {:?} failed: {}", keys, e);
                alert(&e.user_message());
            }
        }
    });
}

/// Status select shared by the admin lists; the empty value means all
fn status_select(
    options: &'static [(&'static str, &'static str)],
    on_pick: impl Fn(Option<String>) + Copy + Send + Sync + 'static,
) -> impl IntoView {
    view! {
        <select on:change=move |ev| {
            let value = event_target_value(&ev);
            on_pick(Some(value).filter(|v| !v.is_empty()));
        }>
            <option value="">"전체 상태"</option>
            {options.iter().map(|(key, label)| view! { <option value=*key>{*label}</option> }).collect_view()}
        </select>
    }
}
