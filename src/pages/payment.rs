//! Payment Result Pages
//!
//! Landing pages the payment gateway redirects back to. Success confirms the
//! payment with the backend; cancel and fail only report it.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{self, use_api, PaymentApproval};
use crate::components::{Loading, NavLink};
use crate::format::format_won;
use crate::query::use_query_client;
use crate::routes::Route;

/// Queries a completed donation changes
const DONATION_KEYS: [&str; 6] = [
    "my-donations",
    "projects",
    "project",
    "popular-projects",
    "recent-donations",
    "statistics-summary",
];

#[derive(Debug, Clone, PartialEq)]
enum Approval {
    Pending,
    Approved(Option<PaymentApproval>),
    Failed(String),
}

/// Both gateway parameters, or the message shown when one is missing
fn approval_params(pg_token: Option<String>, order_id: Option<String>) -> Result<(String, String), String> {
    match (pg_token.filter(|t| !t.is_empty()), order_id.filter(|o| !o.is_empty())) {
        (Some(token), Some(order)) => Ok((token, order)),
        _ => Err("결제 정보가 올바르지 않습니다.".to_string()),
    }
}

#[component]
pub fn PaymentSuccessPage(pg_token: Option<String>, order_id: Option<String>) -> impl IntoView {
    let api = use_api();
    let client = use_query_client();
    let (state, set_state) = signal(Approval::Pending);

    match approval_params(pg_token, order_id) {
        Err(message) => set_state.set(Approval::Failed(message)),
        Ok((token, order)) => spawn_local(async move {
            match api::kakao_success(&api, &token, &order).await {
                Ok(approval) => {
                    log::info!("payment {} approved", order);
                    client.invalidate_many(&DONATION_KEYS);
                    set_state.set(Approval::Approved(approval));
                }
                Err(e) => {
                    log::warn!("payment {} approval failed: {}", order, e);
                    set_state.set(Approval::Failed(e.user_message()));
                }
            }
        }),
    }

    view! {
        <div class="payment-result">
            {move || match state.get() {
                Approval::Pending => view! { <Loading message="결제를 확인하고 있습니다..." /> }.into_any(),
                Approval::Approved(approval) => {
                    let approval = approval.unwrap_or_default();
                    let total = approval.total();
                    let notice = approval.already_completed().then(|| approval.message.clone()).flatten();
                    view! {
                        <h1>"🎉 기부가 완료되었습니다"</h1>
                        {notice.map(|m| view! { <p class="muted">{m}</p> })}
                        {approval.item_name.map(|t| view! { <p class="project">{t}</p> })}
                        {total.map(|a| view! { <p class="amount">{format_won(a)}</p> })}
                        {approval.partner_order_id.map(|o| view! { <p class="muted">"주문 번호: " {o}</p> })}
                        <p>"따뜻한 마음에 감사드립니다."</p>
                        <div class="actions">
                            <NavLink to=Route::Donations class="btn primary">"기부 내역 보기"</NavLink>
                            <NavLink to=Route::Home class="btn">"홈으로"</NavLink>
                        </div>
                    }
                    .into_any()
                }
                Approval::Failed(message) => view! {
                    <h1>"결제 확인에 실패했습니다"</h1>
                    <p class="form-error">{message}</p>
                    <NavLink to=Route::Home class="btn">"홈으로"</NavLink>
                }
                .into_any(),
            }}
        </div>
    }
}

/// Tell the backend about an abandoned payment; failures are only logged
fn report_abandoned(order_id: Option<String>, failed: bool) {
    let Some(order) = order_id.filter(|o| !o.is_empty()) else { return };
    let api = use_api();
    spawn_local(async move {
        let result = if failed {
            api::kakao_fail(&api, &order).await
        } else {
            api::kakao_cancel(&api, &order).await
        };
        if let Err(e) = result {
            log::warn!("could not report payment {}: {}", order, e);
        }
    });
}

#[component]
pub fn PaymentCancelPage(order_id: Option<String>) -> impl IntoView {
    report_abandoned(order_id, false);
    view! {
        <div class="payment-result">
            <h1>"결제가 취소되었습니다"</h1>
            <p>"언제든 다시 참여하실 수 있습니다."</p>
            <div class="actions">
                <NavLink to=Route::Projects class="btn primary">"프로젝트 보기"</NavLink>
                <NavLink to=Route::Home class="btn">"홈으로"</NavLink>
            </div>
        </div>
    }
}

#[component]
pub fn PaymentFailPage(order_id: Option<String>) -> impl IntoView {
    report_abandoned(order_id, true);
    view! {
        <div class="payment-result">
            <h1>"결제에 실패했습니다"</h1>
            <p>"잠시 후 다시 시도해주세요. 문제가 계속되면 고객센터로 문의해주세요."</p>
            <div class="actions">
                <NavLink to=Route::Projects class="btn primary">"프로젝트 보기"</NavLink>
                <NavLink to=Route::Home class="btn">"홈으로"</NavLink>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_approval_params_require_both() {
        assert!(approval_params(None, Some("O1".to_string())).is_err());
        assert!(approval_params(Some(String::new()), Some("O1".to_string())).is_err());
        assert_eq!(
            approval_params(Some("tok".to_string()), Some("O1".to_string())),
            Ok(("tok".to_string(), "O1".to_string()))
        );
    }
}
