//! Admin Settlement Management
//!
//! Pending requests are approved or rejected; approved ones are marked
//! complete once the transfer has gone out.

use leptos::prelude::*;

use crate::api::{self, query_string, use_api};
use crate::components::{EmptyState, Pagination};
use crate::context::{confirm, prompt};
use crate::format::{format_won, short_date};
use crate::models::{AdminListFilters, SettlementStatus};
use crate::pages::query_view;
use crate::query::{use_query, use_query_client, QueryKey};

use super::{run_admin_action, status_select, PAGE_SIZE};

const LIST_KEY: &str = "admin-settlements";
const STATUS_OPTIONS: [(&str, &str); 4] =
    [("pending", "검토중"), ("approved", "승인"), ("completed", "송금완료"), ("rejected", "반려")];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Approve,
    Reject,
    Complete,
}

/// Actions available for a settlement in `status`
fn actions_for(status: SettlementStatus) -> &'static [Action] {
    match status {
        SettlementStatus::Pending => &[Action::Approve, Action::Reject],
        SettlementStatus::Approved => &[Action::Complete],
        SettlementStatus::Completed | SettlementStatus::Rejected => &[],
    }
}

impl Action {
    fn label(&self) -> &'static str {
        match self {
            Action::Approve => "승인",
            Action::Reject => "반려",
            Action::Complete => "송금 완료",
        }
    }
}

#[component]
pub fn SettlementManagementPage() -> impl IntoView {
    let api = use_api();
    let client = use_query_client();
    let filters = RwSignal::new(AdminListFilters { size: PAGE_SIZE, ..Default::default() });

    let settlements = use_query(
        move || QueryKey::new([LIST_KEY.to_string(), query_string(&filters.get().query_pairs())]),
        {
            let api = api.clone();
            move || {
                let api = api.clone();
                let filters = filters.get();
                async move { api::get_admin_settlements(&api, &filters).await }
            }
        },
    );

    let run = move |id: u64, action: Action| {
        let api = api.clone();
        match action {
            Action::Approve => run_admin_action(client, &[LIST_KEY], "정산이 승인되었습니다.", async move {
                api::approve_settlement(&api, id, None).await
            }),
            Action::Reject => {
                let Some(reason) = prompt("반려 사유를 입력해주세요.") else { return };
                run_admin_action(client, &[LIST_KEY], "정산이 반려되었습니다.", async move {
                    api::reject_settlement(&api, id, &reason).await
                })
            }
            Action::Complete => {
                if !confirm("송금을 완료 처리하시겠습니까?") {
                    return;
                }
                run_admin_action(client, &[LIST_KEY], "송금 완료 처리되었습니다.", async move {
                    api::complete_settlement(&api, id).await
                })
            }
        }
    };

    view! {
        <div class="filter-bar">
            {status_select(&STATUS_OPTIONS, move |status| filters.update(|f| {
                f.status = status;
                f.page = 0;
            }))}
        </div>

        {move || query_view(settlements.get(), {
            let run = run.clone();
            move |page| {
                if page.content.is_empty() {
                    return view! { <EmptyState message="정산 요청이 없습니다." /> }.into_any();
                }
                let total_pages = page.total_pages;
                view! {
                    <table class="admin-table">
                        <thead>
                            <tr>
                                <th>"요청일"</th>
                                <th>"프로젝트"</th>
                                <th>"기관"</th>
                                <th>"요청 금액"</th>
                                <th>"송금액"</th>
                                <th>"계좌"</th>
                                <th>"증빙"</th>
                                <th>"상태"</th>
                                <th>"처리"</th>
                            </tr>
                        </thead>
                        <tbody>
                            {page.content
                                .into_iter()
                                .map(|s| {
                                    let id = s.settlement_id;
                                    let run = run.clone();
                                    view! {
                                        <tr>
                                            <td>{short_date(&s.requested_at)}</td>
                                            <td>{s.project_title.clone()}</td>
                                            <td>{s.organization.clone().unwrap_or_default()}</td>
                                            <td>{format_won(s.request_amount)}</td>
                                            <td>{format_won(s.transfer_amount)}</td>
                                            <td>{format!("{} {} ({})", s.bank_name, s.account_number, s.account_holder)}</td>
                                            <td>
                                                {s.documents
                                                    .iter()
                                                    .map(|d| view! { <a href=d.file_url.clone() target="_blank" rel="noopener">{d.file_name.clone()}</a> })
                                                    .collect_view()}
                                            </td>
                                            <td><span class="badge">{s.status.label()}</span></td>
                                            <td>
                                                {actions_for(s.status)
                                                    .iter()
                                                    .map(|&action| {
                                                        let run = run.clone();
                                                        view! { <button class="btn" on:click=move |_| run(id, action)>{action.label()}</button> }
                                                    })
                                                    .collect_view()}
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_actions_follow_status() {
        assert_eq!(actions_for(SettlementStatus::Pending), &[Action::Approve, Action::Reject]);
        assert_eq!(actions_for(SettlementStatus::Approved), &[Action::Complete]);
        assert!(actions_for(SettlementStatus::Completed).is_empty());
        assert!(actions_for(SettlementStatus::Rejected).is_empty());
    }
}
