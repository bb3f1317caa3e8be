//! Donation History Page

use chrono::Datelike;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{self, query_string, use_api};
use crate::components::{EmptyState, Pagination};
use crate::context::alert;
use crate::format::{format_won, now, short_date};
use crate::models::{DonationFilters, DonationStatus, Receipt};
use crate::pages::query_view;
use crate::query::{use_query, QueryKey};

const PAGE_SIZE: u32 = 10;
const YEARS_SHOWN: i32 = 5;

/// Current year first
fn year_options(current: i32) -> Vec<String> {
    (0..YEARS_SHOWN).map(|offset| (current - offset).to_string()).collect()
}

#[component]
pub fn DonationHistoryPage() -> impl IntoView {
    let api = use_api();
    let filters = RwSignal::new(DonationFilters { size: PAGE_SIZE, ..Default::default() });
    let (keyword, set_keyword) = signal(String::new());
    let (receipt, set_receipt) = signal::<Option<Receipt>>(None);

    let donations = use_query(
        move || QueryKey::new(["my-donations".to_string(), query_string(&filters.get().query_pairs())]),
        {
            let api = api.clone();
            move || {
                let api = api.clone();
                let filters = filters.get();
                async move { api::get_my_donations(&api, &filters).await }
            }
        },
    );

    let open_receipt = move |number: String| {
        let api = api.clone();
        spawn_local(async move {
            match api::get_receipt(&api, &number).await {
                Ok(r) => set_receipt.set(Some(r)),
                Err(e) => alert(&e.user_message()),
            }
        });
    };

    view! {
        <h1>"기부 내역"</h1>

        <div class="filter-bar">
            <select on:change=move |ev| {
                let value = event_target_value(&ev);
                filters.update(|f| {
                    f.year = Some(value).filter(|v| !v.is_empty());
                    f.page = 0;
                });
            }>
                <option value="">"전체 연도"</option>
                {year_options(now().year())
                    .into_iter()
                    .map(|y| view! { <option value=y.clone()>{format!("{}년", y)}</option> })
                    .collect_view()}
            </select>
            <select on:change=move |ev| {
                let status = DonationStatus::from_str(&event_target_value(&ev));
                filters.update(|f| {
                    f.status = status;
                    f.page = 0;
                });
            }>
                <option value="">"전체 상태"</option>
                {DonationStatus::ALL
                    .into_iter()
                    .map(|s| view! { <option value=s.as_str()>{s.label()}</option> })
                    .collect_view()}
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
                    placeholder="프로젝트명 검색"
                    prop:value=move || keyword.get()
                    on:input=move |ev| set_keyword.set(event_target_value(&ev))
                />
                <button type="submit">"검색"</button>
            </form>
        </div>

        {move || query_view(donations.get(), {
            let open_receipt = open_receipt.clone();
            move |page| {
                if page.content.is_empty() {
                    return view! { <EmptyState message="기부 내역이 없습니다." /> }.into_any();
                }
                let total: i64 = page.content.iter().filter(|d| d.status == DonationStatus::Completed).map(|d| d.amount).sum();
                let total_pages = page.total_pages;
                view! {
                    <p class="result-count">{format!("이 페이지 완료 금액 {}", format_won(total))}</p>
                    <table class="donation-table">
                        <thead>
                            <tr>
                                <th>"날짜"</th>
                                <th>"프로젝트"</th>
                                <th>"기관"</th>
                                <th>"금액"</th>
                                <th>"상태"</th>
                                <th>"영수증"</th>
                            </tr>
                        </thead>
                        <tbody>
                            {page.content
                                .into_iter()
                                .map(|d| {
                                    let open_receipt = open_receipt.clone();
                                    let number = d.receipt_number.clone();
                                    let has_receipt = d.status == DonationStatus::Completed && !number.is_empty();
                                    view! {
                                        <tr>
                                            <td>{short_date(&d.date)}</td>
                                            <td>
                                                {d.project_title.clone()}
                                                {d.selected_option_name.clone().map(|o| view! { <small>{format!(" ({})", o)}</small> })}
                                            </td>
                                            <td>{d.organization.clone()}</td>
                                            <td>{format_won(d.amount)}</td>
                                            <td><span class="badge">{d.status.label()}</span></td>
                                            <td>
                                                {has_receipt.then(|| view! {
                                                    <button class="link-btn" on:click=move |_| open_receipt(number.clone())>"보기"</button>
                                                })}
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

        {move || receipt.get().map(|r| view! {
            <div class="modal-backdrop" on:click=move |_| set_receipt.set(None)>
                <div class="modal receipt" on:click=|ev| ev.stop_propagation()>
                    <h2>"기부금 영수증"</h2>
                    <dl>
                        <dt>"영수증 번호"</dt>
                        <dd>{r.receipt_number.clone()}</dd>
                        <dt>"프로젝트"</dt>
                        <dd>{r.donation.project_title.clone()}</dd>
                        <dt>"금액"</dt>
                        <dd>{format_won(r.donation.amount)}</dd>
                        <dt>"기부일"</dt>
                        <dd>{short_date(&r.donation.donated_at)}</dd>
                        <dt>"발급일"</dt>
                        <dd>{short_date(&r.issued_at)}</dd>
                    </dl>
                    <a class="btn primary" href=r.pdf_url.clone() target="_blank" rel="noopener">"PDF 다운로드"</a>
                    <button class="btn" on:click=move |_| set_receipt.set(None)>"닫기"</button>
                </div>
            </div>
        })}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_options_descend_from_current() {
        assert_eq!(year_options(2024), vec!["2024", "2023", "2022", "2021", "2020"]);
    }
}
