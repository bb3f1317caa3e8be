//! Piggy Bank Page
//!
//! Organization view of undisbursed balances. Picking a bank shows its
//! transactions; banks over the withdraw threshold open the settlement modal.
//! Below the banks sit the settlement requests and their history.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{self, query_string, use_api, ApiClient, UploadFile};
use crate::components::{selected_files, EmptyState, Pagination, ProgressBar, SettlementModal, SETTLEMENT_KEYS};
use crate::context::alert;
use crate::format::{format_won, now, short_date, time_ago_str};
use crate::models::{PiggyBank, SettlementFilters, SettlementStatus, TransactionType};
use crate::notification_center::DateRange;
use crate::pages::query_view;
use crate::query::{use_query, use_query_client, QueryKey};
use crate::settlement::{can_withdraw, total_balance, PiggyBankFilter, TransactionFilter, WITHDRAW_THRESHOLD};

const TRANSACTION_PAGE_SIZE: u32 = 50;
const SETTLEMENT_PAGE_SIZE: u32 = 10;

#[component]
pub fn PiggyBankPage() -> impl IntoView {
    let api = use_api();
    let (filter, set_filter) = signal(PiggyBankFilter::All);
    let (selected, set_selected) = signal::<Option<u64>>(None);
    let (withdrawing, set_withdrawing) = signal::<Option<PiggyBank>>(None);

    let banks = use_query(|| QueryKey::from("my-piggy-banks"), {
        let api = api.clone();
        move || {
            let api = api.clone();
            async move { api::get_my_piggy_banks(&api).await }
        }
    });

    let transactions_view = {
        let api = api.clone();
        move || {
            selected.get().map(|id| {
                let api = api.clone();
                view! { <TransactionPanel bank_id=id api=api /> }
            })
        }
    };

    view! {
        <h1>"저금통 관리"</h1>

        {move || query_view(banks.get(), move |list| {
            let total = total_balance(&list);
            let withdrawable = list.iter().filter(|b| can_withdraw(b)).count();
            let shown: Vec<PiggyBank> = filter.get().apply(&list).into_iter().cloned().collect();
            view! {
                <section class="piggy-summary">
                    <div class="stat">
                        <strong>{format_won(total)}</strong>
                        <span>"총 잔액"</span>
                    </div>
                    <div class="stat">
                        <strong>{list.len()}</strong>
                        <span>"저금통"</span>
                    </div>
                    <div class="stat">
                        <strong>{withdrawable}</strong>
                        <span>{format!("인출 가능 ({} 이상)", format_won(WITHDRAW_THRESHOLD))}</span>
                    </div>
                </section>

                <div class="category-chips">
                    {PiggyBankFilter::ALL
                        .into_iter()
                        .map(|f| view! {
                            <button
                                class=move || if filter.get() == f { "chip active" } else { "chip" }
                                on:click=move |_| set_filter.set(f)
                            >
                                {f.label()}
                            </button>
                        })
                        .collect_view()}
                </div>

                {if shown.is_empty() {
                    view! { <EmptyState message="해당하는 저금통이 없습니다." /> }.into_any()
                } else {
                    view! {
                        <div class="piggy-grid">
                            {shown
                                .into_iter()
                                .map(|bank| {
                                    let id = bank.piggy_bank_id;
                                    let withdrawable = can_withdraw(&bank);
                                    let for_modal = bank.clone();
                                    view! {
                                        <div
                                            class=move || if selected.get() == Some(id) { "piggy-card selected" } else { "piggy-card" }
                                            on:click=move |_| set_selected.set(Some(id))
                                        >
                                            <h3>{bank.project_title.clone()}</h3>
                                            <span class="badge">{bank.status.label()}</span>
                                            <p class="balance">{format_won(bank.balance)}</p>
                                            {bank.target_amount.map(|target| view! { <ProgressBar current=bank.total_amount target=target /> })}
                                            <dl>
                                                <dt>"총 모금"</dt>
                                                <dd>{format_won(bank.total_amount)}</dd>
                                                <dt>"인출"</dt>
                                                <dd>{format_won(bank.withdrawn_amount)}</dd>
                                                <dt>"기부자"</dt>
                                                <dd>{bank.donor_count.map(|n| format!("{}명", n)).unwrap_or_else(|| "-".to_string())}</dd>
                                            </dl>
                                            <button
                                                class="btn primary"
                                                disabled=!withdrawable
                                                on:click=move |ev| {
                                                    ev.stop_propagation();
                                                    set_withdrawing.set(Some(for_modal.clone()));
                                                }
                                            >
                                                "정산 요청"
                                            </button>
                                        </div>
                                    }
                                })
                                .collect_view()}
                        </div>
                    }
                    .into_any()
                }}
            }
        })}

        {transactions_view}

        {move || withdrawing.get().map(|bank| view! {
            <SettlementModal bank=bank on_close=move |_: ()| set_withdrawing.set(None) />
        })}

        <MySettlements api=api.clone() />
        <SettlementHistoryTable api=api />
    }
}

#[component]
fn TransactionPanel(bank_id: u64, api: ApiClient) -> impl IntoView {
    let filter = RwSignal::new(TransactionFilter::default());
    let transactions = use_query(
        move || QueryKey::new(["piggy-bank-transactions".to_string(), bank_id.to_string()]),
        move || {
            let api = api.clone();
            async move { api::get_piggy_bank_transactions(&api, bank_id, None, 0, TRANSACTION_PAGE_SIZE).await }
        },
    );

    let kind_options: [(Option<TransactionType>, &str); 3] =
        [(None, "전체"), (Some(TransactionType::Deposit), "입금"), (Some(TransactionType::Withdrawal), "출금")];

    view! {
        <section class="transactions">
            <h2>"거래 내역"</h2>
            <div class="filter-bar">
                {kind_options
                    .into_iter()
                    .map(|(kind, label)| view! {
                        <button
                            class=move || if filter.with(|f| f.kind == kind) { "chip active" } else { "chip" }
                            on:click=move |_| filter.update(|f| f.kind = kind)
                        >
                            {label}
                        </button>
                    })
                    .collect_view()}
                <select on:change=move |ev| {
                    let date = DateRange::from_str(&event_target_value(&ev));
                    filter.update(|f| f.date = date);
                }>
                    {DateRange::ALL
                        .into_iter()
                        .map(|d| view! { <option value=d.as_str()>{d.label()}</option> })
                        .collect_view()}
                </select>
            </div>
            {move || query_view(transactions.get(), move |page| {
                let now = now();
                let rows: Vec<_> = filter.get().apply(&page.content, now).into_iter().cloned().collect();
                if rows.is_empty() {
                    return view! { <EmptyState message="거래 내역이 없습니다." /> }.into_any();
                }
                view! {
                    <ul class="transaction-list">
                        {rows
                            .into_iter()
                            .map(|tx| {
                                let (class, sign) = match tx.kind {
                                    TransactionType::Deposit => ("deposit", "+"),
                                    TransactionType::Withdrawal => ("withdrawal", "-"),
                                };
                                let who = tx.donor.clone().or_else(|| tx.note.clone()).unwrap_or_default();
                                view! {
                                    <li class=class>
                                        <span>{who}</span>
                                        <strong>{format!("{}{}", sign, format_won(tx.amount))}</strong>
                                        <small>{time_ago_str(&tx.timestamp, now)}</small>
                                        {tx.message.clone().map(|m| view! { <p class="muted">{m}</p> })}
                                    </li>
                                }
                            })
                            .collect_view()}
                    </ul>
                }
                .into_any()
            })}
        </section>
    }
}

#[component]
fn MySettlements(api: ApiClient) -> impl IntoView {
    let client = use_query_client();
    let filters = RwSignal::new(SettlementFilters { size: SETTLEMENT_PAGE_SIZE, ..Default::default() });

    let settlements = use_query(
        move || QueryKey::new(["my-settlements".to_string(), query_string(&filters.get().query_pairs())]),
        {
            let api = api.clone();
            move || {
                let api = api.clone();
                let filters = filters.get();
                async move { api::get_my_settlements(&api, &filters).await }
            }
        },
    );

    let upload = move |id: u64, ev: web_sys::Event| {
        let Some(file) = selected_files(&ev).into_iter().next() else { return };
        let api = api.clone();
        spawn_local(async move {
            let result = match UploadFile::from_file(&file).await {
                Ok(upload) => api::upload_settlement_document(&api, id, upload).await.map_err(|e| e.user_message()),
                Err(e) => Err(e.user_message()),
            };
            match result {
                Ok(doc) => {
                    log::info!("settlement {} document {} uploaded", id, doc.document_id);
                    client.invalidate_many(&SETTLEMENT_KEYS);
                    alert("증빙 서류가 업로드되었습니다.");
                }
                Err(message) => alert(&message),
            }
        });
    };

    view! {
        <section class="my-settlements">
            <h2>"정산 요청"</h2>
            <select on:change=move |ev| {
                let value = event_target_value(&ev);
                filters.update(|f| {
                    f.status = SettlementStatus::ALL.into_iter().find(|s| s.as_filter() == value);
                    f.page = 0;
                });
            }>
                <option value="">"전체"</option>
                {SettlementStatus::ALL
                    .into_iter()
                    .map(|s| view! { <option value=s.as_filter()>{s.label()}</option> })
                    .collect_view()}
            </select>
            {move || query_view(settlements.get(), {
                let upload = upload.clone();
                move |page| {
                    if page.content.is_empty() {
                        return view! { <EmptyState message="정산 요청 내역이 없습니다." /> }.into_any();
                    }
                    let total_pages = page.total_pages;
                    view! {
                        <table class="settlement-table">
                            <thead>
                                <tr>
                                    <th>"요청일"</th>
                                    <th>"프로젝트"</th>
                                    <th>"요청 금액"</th>
                                    <th>"수수료"</th>
                                    <th>"송금액"</th>
                                    <th>"상태"</th>
                                    <th>"증빙"</th>
                                </tr>
                            </thead>
                            <tbody>
                                {page.content
                                    .into_iter()
                                    .map(|s| {
                                        let upload = upload.clone();
                                        let id = s.settlement_id;
                                        view! {
                                            <tr>
                                                <td>{short_date(&s.requested_at)}</td>
                                                <td>{s.project_title.clone()}</td>
                                                <td>{format_won(s.request_amount)}</td>
                                                <td>{format_won(s.fee)}</td>
                                                <td>{format_won(s.transfer_amount)}</td>
                                                <td>
                                                    <span class="badge">{s.status.label()}</span>
                                                    {s.rejection_reason.clone().map(|r| view! { <small class="rejection">{r}</small> })}
                                                </td>
                                                <td>
                                                    {s.documents
                                                        .iter()
                                                        .map(|d| view! { <a href=d.file_url.clone() target="_blank" rel="noopener">{d.file_name.clone()}</a> })
                                                        .collect_view()}
                                                    {(s.status == SettlementStatus::Pending).then(|| view! {
                                                        <input type="file" on:change=move |ev| upload(id, ev) />
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
        </section>
    }
}

#[component]
fn SettlementHistoryTable(api: ApiClient) -> impl IntoView {
    let history = use_query(|| QueryKey::from("settlement-history"), move || {
        let api = api.clone();
        async move { api::get_settlement_history(&api).await }
    });

    view! {
        <section class="settlement-history">
            <h2>"정산 이력"</h2>
            {move || query_view(history.get(), |rows| {
                if rows.is_empty() {
                    return view! { <EmptyState message="정산 이력이 없습니다." /> }.into_any();
                }
                view! {
                    <ul class="history-list">
                        {rows
                            .into_iter()
                            .map(|h| view! {
                                <li>
                                    <strong>{h.project_title.clone()}</strong>
                                    <span>{format_won(h.request_amount)}</span>
                                    <span class="badge">{h.status.label()}</span>
                                    <small>{short_date(&h.request_date)}</small>
                                    {h.transferred_amount.map(|t| view! { <span>{format!("송금 {}", format_won(t))}</span> })}
                                    {h.completed_date.clone().map(|d| view! { <small>{format!("완료 {}", short_date(&d))}</small> })}
                                    <small class="muted">{format!("{} {} ({})", h.bank_name, h.account_number, h.account_holder)}</small>
                                </li>
                            })
                            .collect_view()}
                    </ul>
                }
                .into_any()
            })}
        </section>
    }
}
