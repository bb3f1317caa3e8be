//! Settlement Modal Component
//!
//! Withdrawal request against one piggy bank, with a live fee preview.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{self, use_api};
use crate::context::alert;
use crate::format::format_won;
use crate::models::PiggyBank;
use crate::query::use_query_client;
use crate::settlement::{SettlementForm, FEE_PERCENT};

/// Queries a new settlement makes stale
pub const SETTLEMENT_KEYS: [&str; 3] = ["my-settlements", "settlement-history", "my-piggy-banks"];

#[component]
pub fn SettlementModal(bank: PiggyBank, #[prop(into)] on_close: Callback<()>) -> impl IntoView {
    let api = use_api();
    let client = use_query_client();
    let form = RwSignal::new(SettlementForm::for_bank(&bank));
    let (submitting, set_submitting) = signal(false);

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }
        let request = match form.with_untracked(|f| f.to_request()) {
            Ok(request) => request,
            Err(message) => {
                alert(&message);
                return;
            }
        };
        let api = api.clone();
        set_submitting.set(true);
        spawn_local(async move {
            match api::create_settlement(&api, &request).await {
                Ok(settlement) => {
                    log::info!("settlement {} requested", settlement.settlement_id);
                    client.invalidate_many(&SETTLEMENT_KEYS);
                    alert("정산 요청이 접수되었습니다.");
                    on_close.run(());
                }
                Err(e) => alert(&e.user_message()),
            }
            set_submitting.set(false);
        });
    };

    let text_input = move |placeholder: &'static str, get: fn(&SettlementForm) -> String, set: fn(&mut SettlementForm, String)| {
        view! {
            <input
                type="text"
                placeholder=placeholder
                prop:value=move || form.with(get)
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    form.update(|f| set(f, value));
                }
            />
        }
    };

    view! {
        <div class="modal-backdrop" on:click=move |_| on_close.run(())>
            <div class="modal" on:click=|ev| ev.stop_propagation()>
                <header class="modal-header">
                    <h2>"정산 요청"</h2>
                    <p class="muted">{bank.project_title.clone()}</p>
                    <button class="close-btn" aria-label="닫기" on:click=move |_| on_close.run(())>"×"</button>
                </header>
                <form class="settlement-form" on:submit=submit>
                    <p class="balance">"출금 가능 잔액: " <strong>{format_won(bank.balance)}</strong></p>
                    <label>
                        "요청 금액"
                        {text_input("금액 (원)", |f| f.amount.clone(), |f, v| f.amount = v)}
                    </label>
                    <button
                        type="button"
                        class="link-btn"
                        on:click=move |_| form.update(|f| f.amount = f.balance.to_string())
                    >
                        "전액"
                    </button>
                    <label>"은행명" {text_input("예: 국민은행", |f| f.bank_name.clone(), |f, v| f.bank_name = v)}</label>
                    <label>
                        "계좌번호"
                        {text_input("숫자와 하이픈(-)만", |f| f.account_number.clone(), |f, v| f.account_number = v)}
                    </label>
                    <label>"예금주" {text_input("예금주명", |f| f.account_holder.clone(), |f, v| f.account_holder = v)}</label>

                    <dl class="fee-preview">
                        <dt>{format!("수수료 ({}%)", FEE_PERCENT)}</dt>
                        <dd>{move || format_won(form.with(|f| f.fee()))}</dd>
                        <dt>"실 입금액"</dt>
                        <dd><strong>{move || format_won(form.with(|f| f.transfer()))}</strong></dd>
                    </dl>

                    <footer class="modal-footer">
                        <button type="button" class="btn" on:click=move |_| on_close.run(())>"취소"</button>
                        <button type="submit" class="btn primary" disabled=move || submitting.get()>
                            {move || if submitting.get() { "요청 중..." } else { "정산 요청" }}
                        </button>
                    </footer>
                </form>
            </div>
        </div>
    }
}
