//! Admin Project Management
//!
//! Review queue for submitted projects. Rejecting asks for a reason, which
//! the organization sees on the project page.

use leptos::prelude::*;

use crate::api::{self, query_string, use_api};
use crate::components::{EmptyState, NavLink, Pagination};
use crate::context::prompt;
use crate::format::{category_label, format_won};
use crate::models::{AdminListFilters, ProjectStatus};
use crate::pages::query_view;
use crate::query::{use_query, use_query_client, QueryKey};
use crate::routes::Route;

use super::{run_admin_action, status_select, PAGE_SIZE};

const LIST_KEY: &str = "admin-projects";
/// Approval publishes the project, so the public lists change too
const APPROVE_KEYS: [&str; 4] = [LIST_KEY, "projects", "project", "popular-projects"];
const STATUS_OPTIONS: [(&str, &str); 3] = [("pending", "대기"), ("approved", "승인"), ("rejected", "반려")];

#[component]
pub fn ProjectManagementPage() -> impl IntoView {
    let api = use_api();
    let client = use_query_client();
    let filters = RwSignal::new(AdminListFilters {
        status: Some("pending".to_string()),
        size: PAGE_SIZE,
        ..Default::default()
    });

    let projects = use_query(
        move || QueryKey::new([LIST_KEY.to_string(), query_string(&filters.get().query_pairs())]),
        {
            let api = api.clone();
            move || {
                let api = api.clone();
                let filters = filters.get();
                async move { api::get_admin_projects(&api, &filters).await }
            }
        },
    );

    let approve = {
        let api = api.clone();
        move |id: u64| {
            let api = api.clone();
            run_admin_action(client, &APPROVE_KEYS, "프로젝트가 승인되었습니다.", async move {
                api::approve_project(&api, id, None).await
            });
        }
    };
    let reject = move |id: u64| {
        let Some(reason) = prompt("반려 사유를 입력해주세요.") else { return };
        let api = api.clone();
        run_admin_action(client, &[LIST_KEY, "project"], "프로젝트가 반려되었습니다.", async move {
            api::reject_project(&api, id, &reason).await
        });
    };

    view! {
        <div class="filter-bar">
            {status_select(&STATUS_OPTIONS, move |status| filters.update(|f| {
                f.status = status;
                f.page = 0;
            }))}
        </div>

        {move || query_view(projects.get(), {
            let approve = approve.clone();
            let reject = reject.clone();
            move |page| {
                if page.content.is_empty() {
                    return view! { <EmptyState message="해당하는 프로젝트가 없습니다." /> }.into_any();
                }
                let total_pages = page.total_pages;
                view! {
                    <table class="admin-table">
                        <thead>
                            <tr>
                                <th>"프로젝트"</th>
                                <th>"기관"</th>
                                <th>"카테고리"</th>
                                <th>"목표액"</th>
                                <th>"상태"</th>
                                <th>"처리"</th>
                            </tr>
                        </thead>
                        <tbody>
                            {page.content
                                .into_iter()
                                .map(|p| {
                                    let approve = approve.clone();
                                    let reject = reject.clone();
                                    let id = p.id;
                                    let pending = p.status == ProjectStatus::Pending;
                                    view! {
                                        <tr>
                                            <td>
                                                <NavLink to=Route::ProjectDetail(id)>{p.title.clone()}</NavLink>
                                            </td>
                                            <td>{p.organization.clone()}</td>
                                            <td>{category_label(&p.category).to_string()}</td>
                                            <td>{format_won(p.target_amount)}</td>
                                            <td>
                                                <span class="badge">{p.status.label()}</span>
                                                {p.rejection_reason.clone().map(|r| view! { <small class="rejection">{r}</small> })}
                                            </td>
                                            <td>
                                                {pending.then(|| view! {
                                                    <button class="btn primary" on:click=move |_| approve(id)>"승인"</button>
                                                    <button class="btn danger" on:click=move |_| reject(id)>"반려"</button>
                                                })}
                                                {(!pending).then(|| format!("D-{}", p.dday.max(0)))}
                                            </td>
                                        </tr>
                                    }
                                })
                                .collect_view()}
                        </tbody>
                    </table>
                    <Pagination
                        page=Signal::derive(move || filters.with(|f| f.page))
                        total_pages=Signal::derive(move || total_pages)
                        on_change=move |p: u32| filters.update(|f| f.page = p)
                    />
                }
                .into_any()
            }
        })}
    }
}
