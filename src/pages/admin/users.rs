//! Admin User Management

use leptos::prelude::*;

use crate::api::{self, query_string, use_api};
use crate::components::{EmptyState, Pagination};
use crate::context::confirm;
use crate::format::short_date;
use crate::models::{AdminListFilters, UserStatus};
use crate::pages::query_view;
use crate::query::{use_query, use_query_client, QueryKey};

use super::{run_admin_action, status_select, PAGE_SIZE};

const LIST_KEY: &str = "admin-users";
const STATUS_OPTIONS: [(&str, &str); 3] = [("active", "활성"), ("inactive", "비활성"), ("suspended", "정지")];
const TYPE_OPTIONS: [(&str, &str); 3] = [("individual", "일반"), ("organization", "기관"), ("admin", "관리자")];

#[component]
pub fn UserManagementPage() -> impl IntoView {
    let api = use_api();
    let client = use_query_client();
    let filters = RwSignal::new(AdminListFilters { size: PAGE_SIZE, ..Default::default() });
    let (keyword, set_keyword) = signal(String::new());

    let users = use_query(
        move || QueryKey::new([LIST_KEY.to_string(), query_string(&filters.get().query_pairs())]),
        {
            let api = api.clone();
            move || {
                let api = api.clone();
                let filters = filters.get();
                async move { api::get_admin_users(&api, &filters).await }
            }
        },
    );

    let set_status = move |id: u64, name: String, status: UserStatus| {
        if status == UserStatus::Suspended && !confirm(&format!("{} 회원을 정지하시겠습니까?", name)) {
            return;
        }
        let api = api.clone();
        run_admin_action(client, &[LIST_KEY], "회원 상태가 변경되었습니다.", async move {
            api::update_user_status(&api, id, status).await
        });
    };

    view! {
        <div class="filter-bar">
            {status_select(&STATUS_OPTIONS, move |status| filters.update(|f| {
                f.status = status;
                f.page = 0;
            }))}
            <select on:change=move |ev| {
                let value = event_target_value(&ev);
                filters.update(|f| {
                    f.user_type = Some(value).filter(|v| !v.is_empty());
                    f.page = 0;
                });
            }>
                <option value="">"전체 유형"</option>
                {TYPE_OPTIONS.iter().map(|(key, label)| view! { <option value=*key>{*label}</option> }).collect_view()}
            </select>
            <form
                class="search-form"
                on:submit=move |ev: web_sys::SubmitEvent| {
                    ev.prevent_default();
                    let value = keyword.get_untracked().trim().to_string();
                    filters.update(|f| {
                        f.keyword = Some(value).filter(|k| !k.is_empty());
                        f.page = 0;
                    });
                }
            >
                <input
                    type="search"
                    placeholder="이름, 이메일 검색"
                    prop:value=move || keyword.get()
                    on:input=move |ev| set_keyword.set(event_target_value(&ev))
                />
                <button type="submit">"검색"</button>
            </form>
        </div>

        {move || query_view(users.get(), {
            let set_status = set_status.clone();
            move |page| {
                if page.content.is_empty() {
                    return view! { <EmptyState message="회원이 없습니다." /> }.into_any();
                }
                let total_pages = page.total_pages;
                view! {
                    <table class="admin-table">
                        <thead>
                            <tr>
                                <th>"이름"</th>
                                <th>"이메일"</th>
                                <th>"유형"</th>
                                <th>"가입일"</th>
                                <th>"최근 로그인"</th>
                                <th>"상태"</th>
                            </tr>
                        </thead>
                        <tbody>
                            {page.content
                                .into_iter()
                                .map(|u| {
                                    let set_status = set_status.clone();
                                    let id = u.id;
                                    let name = u.name.clone();
                                    let current = u.status;
                                    view! {
                                        <tr>
                                            <td>{u.name}</td>
                                            <td>{u.email}</td>
                                            <td>{u.user_type}</td>
                                            <td>{short_date(&u.registered_date)}</td>
                                            <td>{short_date(&u.last_login)}</td>
                                            <td>
                                                <select on:change=move |ev| {
                                                    let value = event_target_value(&ev);
                                                    if let Some(status) = UserStatus::ALL.into_iter().find(|s| s.as_str() == value) {
                                                        if status != current {
                                                            set_status(id, name.clone(), status);
                                                        }
                                                    }
                                                }>
                                                    {UserStatus::ALL
                                                        .into_iter()
                                                        .map(|s| view! { <option value=s.as_str() selected=s == current>{s.label()}</option> })
                                                        .collect_view()}
                                                </select>
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
