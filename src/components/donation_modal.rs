//! Donation Modal Component
//!
//! Amount, donor details and payment method for one project. A valid form
//! creates a pending payment and hands the browser to the gateway.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{self, use_api};
use crate::context::{alert, redirect_external};
use crate::donation::DonationForm;
use crate::format::format_won;
use crate::models::{DonationOption, PaymentMethod};

#[component]
pub fn DonationModal(
    project_id: u64,
    #[prop(into)] project_title: String,
    options: Vec<DonationOption>,
    #[prop(into)] on_close: Callback<()>,
) -> impl IntoView {
    let api = use_api();
    let form = RwSignal::new(DonationForm::new(&options));
    let (submitting, set_submitting) = signal(false);

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }
        let request = match form.with_untracked(|f| f.to_request(project_id)) {
            Ok(request) => request,
            Err(message) => {
                alert(&message);
                return;
            }
        };
        let api = api.clone();
        set_submitting.set(true);
        spawn_local(async move {
            match api::kakao_ready(&api, &request).await {
                Ok(ready) => match ready.redirect_url() {
                    Some(url) => {
                        log::info!("payment {} ready, leaving for gateway", ready.tid);
                        redirect_external(url);
                    }
                    None => alert("결제 페이지 주소를 받지 못했습니다."),
                },
                Err(e) => {
                    log::warn!("payment ready failed: {}", e);
                    alert(&e.user_message());
                }
            }
            set_submitting.set(false);
        });
    };

    let option_buttons = move || {
        let (options, selected) = form.with(|f| (f.options.clone(), f.selected()));
        options
            .into_iter()
            .enumerate()
            .map(|(i, option)| {
                let class = if selected == Some(i) { "amount-option selected" } else { "amount-option" };
                view! {
                    <button type="button" class=class on:click=move |_| form.update(|f| f.select_option(i))>
                        {option.icon.clone().map(|icon| view! { <span class="icon">{icon}</span> })}
                        <strong>{option.name.clone()}</strong>
                        <span>{format_won(option.amount)}</span>
                        {option.description.clone().map(|d| view! { <small>{d}</small> })}
                    </button>
                }
            })
            .collect_view()
    };

    view! {
        <div class="modal-backdrop" on:click=move |_| on_close.run(())>
            <div class="modal" on:click=|ev| ev.stop_propagation()>
                <header class="modal-header">
                    <h2>"기부하기"</h2>
                    <p class="muted">{project_title}</p>
                    <button class="close-btn" aria-label="닫기" on:click=move |_| on_close.run(())>"×"</button>
                </header>
                <form class="donation-form" on:submit=submit>
                    <section>
                        <h3>"기부 금액"</h3>
                        <div class="amount-options">{option_buttons}</div>
                        <input
                            type="text"
                            inputmode="numeric"
                            placeholder="직접 입력 (원)"
                            prop:value=move || form.with(|f| f.custom_amount().to_string())
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                form.update(|f| f.set_custom_amount(&value));
                            }
                        />
                    </section>

                    <section>
                        <h3>"기부자 정보"</h3>
                        <label class="checkbox">
                            <input
                                type="checkbox"
                                prop:checked=move || form.with(|f| f.is_anonymous)
                                on:change=move |ev| {
                                    let checked = event_target_checked(&ev);
                                    form.update(|f| f.is_anonymous = checked);
                                }
                            />
                            "익명으로 기부하기"
                        </label>
                        <input
                            type="text"
                            placeholder="기부자명"
                            disabled=move || form.with(|f| f.is_anonymous)
                            prop:value=move || form.with(|f| f.donor_name.clone())
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                form.update(|f| f.donor_name = value);
                            }
                        />
                        <input
                            type="email"
                            placeholder="이메일 (선택)"
                            prop:value=move || form.with(|f| f.email.clone())
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                form.update(|f| f.email = value);
                            }
                        />
                        <input
                            type="tel"
                            placeholder="연락처 (선택)"
                            prop:value=move || form.with(|f| f.phone.clone())
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                form.update(|f| f.phone = value);
                            }
                        />
                        <textarea
                            placeholder="응원 메시지 (선택)"
                            prop:value=move || form.with(|f| f.message.clone())
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                form.update(|f| f.message = value);
                            }
                        ></textarea>
                    </section>

                    <section>
                        <h3>"결제 수단"</h3>
                        <div class="payment-methods">
                            {PaymentMethod::ALL
                                .into_iter()
                                .map(|method| {
                                    let class = move || {
                                        if form.with(|f| f.payment_method == Some(method)) {
                                            "payment-method selected"
                                        } else {
                                            "payment-method"
                                        }
                                    };
                                    view! {
                                        <button
                                            type="button"
                                            class=class
                                            on:click=move |_| form.update(|f| f.payment_method = Some(method))
                                        >
                                            {method.label()}
                                        </button>
                                    }
                                })
                                .collect_view()}
                        </div>
                    </section>

                    <footer class="modal-footer">
                        <span class="total">{move || format!("총 {}", format_won(form.with(|f| f.amount())))}</span>
                        <button type="submit" class="btn primary" disabled=move || submitting.get()>
                            {move || if submitting.get() { "처리 중..." } else { "기부하기" }}
                        </button>
                    </footer>
                </form>
            </div>
        </div>
    }
}
