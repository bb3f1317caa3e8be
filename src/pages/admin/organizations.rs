//! Organization Approval
//!
//! Organization accounts waiting for review, with approve and reject
//! actions. Shares the user list endpoint, filtered to organizations.

use leptos::prelude::*;

use crate::api::{self, query_string, use_api};
use crate::components::{EmptyState, Pagination};
use crate::context::confirm;
use crate::format::short_date;
use crate::models::{AdminListFilters, OrgApproval};
use crate::pages::query_view;
use crate::query::{use_query, use_query_client, QueryKey};

use super::{run_admin_action, PAGE_SIZE};

const LIST_KEY: &str = "admin-organizations";
const REFRESH_KEYS: [&str; 2] = [LIST_KEY, "admin-users"];

fn org_filters(stage: Option<OrgApproval>, page: u32) -> AdminListFilters {
    AdminListFilters {
        status: stage.map(|s| s.status().as_str().to_string()),
        user_type: Some("organization".to_string()),
        page,
        size: PAGE_SIZE,
        ..Default::default()
    }
}

#[component]
pub fn OrganizationApprovalPage() -> impl IntoView {
    let api = use_api();
    let client = use_query_client();
    let stage = RwSignal::new(Some(OrgApproval::Pending));
    let page = RwSignal::new(0u32);

    let orgs = use_query(
        move || QueryKey::new([LIST_KEY.to_string(), query_string(&org_filters(stage.get(), page.get()).query_pairs())]),
        {
            let api = api.clone();
            move || {
                let api = api.clone();
                let filters = org_filters(stage.get(), page.get());
                async move { api::get_admin_users(&api, &filters).await }
            }
        },
    );

    let decide = move |id: u64, name: String, target: OrgApproval| {
        let question = match target {
            OrgApproval::Approved => format!("{} 기관을 승인하시겠습니까?", name),
            _ => format!("{} 기관을 반려하시겠습니까?", name),
        };
        if !confirm(&question) {
            return;
        }
        let api = api.clone();
        let done = match target {
            OrgApproval::Approved => "기관이 승인되었습니다.",
            _ => "기관이 반려되었습니다.",
        };
        run_admin_action(client, &REFRESH_KEYS, done, async move {
            api::update_user_status(&api, id, target.status()).await
        });
    };

    view! {
        <div class="filter-bar">
            <select on:change=move |ev| {
                let value = event_target_value(&ev);
                stage.set(OrgApproval::ALL.into_iter().find(|s| s.status().as_str() == value));
                page.set(0);
            }>
                {OrgApproval::ALL
                    .into_iter()
                    .map(|s| view! {
                        <option value=s.status().as_str() selected=move || stage.get() == Some(s)>{s.label()}</option>
                    })
                    .collect_view()}
                <option value="">"전체"</option>
            </select>
        </div>

        {move || query_view(orgs.get(), {
            let decide = decide.clone();
            move |result| {
                if result.content.is_empty() {
                    return view! { <EmptyState message="해당하는 기관이 없습니다." /> }.into_any();
                }
                let counts = OrgApproval::tally(&result.content);
                let total_pages = result.total_pages;
                view! {
                    <div class="stat-cards">
                        {OrgApproval::ALL
                            .into_iter()
                            .zip(counts)
                            .map(|(s, n)| view! {
                                <div class="stat-card">
                                    <span class="stat-label">{s.label()}</span>
                                    <span class="stat-value">{n}</span>
                                </div>
                            })
                            .collect_view()}
                    </div>
                    <table class="admin-table">
                        <thead>
                            <tr>
                                <th>"기관명"</th>
                                <th>"이메일"</th>
                                <th>"가입일"</th>
                                <th>"상태"</th>
                                <th>"처리"</th>
                            </tr>
                        </thead>
                        <tbody>
                            {result.content
                                .into_iter()
                                .map(|u| {
                                    let current = OrgApproval::from_status(u.status);
                                    let approve = {
                                        let decide = decide.clone();
                                        let name = u.name.clone();
                                        let id = u.id;
                                        move |_| decide(id, name.clone(), OrgApproval::Approved)
                                    };
                                    let reject = {
                                        let decide = decide.clone();
                                        let name = u.name.clone();
                                        let id = u.id;
                                        move |_| decide(id, name.clone(), OrgApproval::Rejected)
                                    };
                                    view! {
                                        <tr>
                                            <td>{u.name}</td>
                                            <td>{u.email}</td>
                                            <td>{short_date(&u.registered_date)}</td>
                                            <td>{current.label()}</td>
                                            <td class="actions">
                                                {(current != OrgApproval::Approved).then(|| view! {
                                                    <button class="approve-btn" on:click=approve>"승인"</button>
                                                })}
                                                {(current != OrgApproval::Rejected).then(|| view! {
                                                    <button class="reject-btn" on:click=reject>"반려"</button>
                                                })}
                                            </td>
                                        </tr>
                                    }
                                })
                                .collect_view()}
                        </tbody>
                    </table>
                    <Pagination
                        page=Signal::derive(move || page.get())
                        total_pages=Signal::derive(move || total_pages)
                        on_change=move |p: u32| page.set(p)
                    />
                }
                .into_any()
            }
        })}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_org_filters_query() {
        let pairs = org_filters(Some(OrgApproval::Pending), 2).query_pairs();
        assert!(pairs.contains(&("userType", Some("organization".to_string()))));
        assert!(pairs.contains(&("status", Some("inactive".to_string()))));
        assert!(pairs.contains(&("page", Some("2".to_string()))));

        let all = org_filters(None, 0).query_pairs();
        assert!(all.contains(&("status", None)));
    }
}
