//! Payment Gateway Endpoints
//!
//! `ready` creates a pending donation and returns where to send the browser.
//! The gateway later lands on one of the payment pages, which report back
//! through `success`, `cancel` or `fail`.

use serde::Deserialize;

use super::{encode_component, ApiClient};
use crate::error::ApiResult;
use crate::models::{DonationRequest, PaymentReady};

/// Amount block of the gateway's approve response
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ApproveAmount {
    #[serde(default)]
    pub total: Option<i64>,
    #[serde(default)]
    pub tax_free: Option<i64>,
    #[serde(default)]
    pub vat: Option<i64>,
}

/// Result of the success callback: the gateway's approve response, or a
/// short `already_completed` status when the page is reloaded afterwards
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PaymentApproval {
    #[serde(default)]
    pub tid: Option<String>,
    #[serde(default, alias = "orderId")]
    pub partner_order_id: Option<String>,
    #[serde(default)]
    pub payment_method_type: Option<String>,
    #[serde(default)]
    pub amount: Option<ApproveAmount>,
    #[serde(default)]
    pub item_name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl PaymentApproval {
    pub fn total(&self) -> Option<i64> {
        self.amount.as_ref().and_then(|a| a.total)
    }

    pub fn already_completed(&self) -> bool {
        self.status.as_deref() == Some("already_completed")
    }
}

pub async fn kakao_ready(api: &ApiClient, request: &DonationRequest) -> ApiResult<PaymentReady> {
    api.post("/payments/kakao/ready", request).await
}

pub async fn kakao_success(api: &ApiClient, pg_token: &str, order_id: &str) -> ApiResult<Option<PaymentApproval>> {
    let path = format!(
        "/payments/kakao/success?pg_token={}&orderId={}",
        encode_component(pg_token),
        encode_component(order_id)
    );
    api.get(&path).await
}

pub async fn kakao_cancel(api: &ApiClient, order_id: &str) -> ApiResult<()> {
    api.get_no_content(&format!("/payments/kakao/cancel?orderId={}", encode_component(order_id))).await
}

pub async fn kakao_fail(api: &ApiClient, order_id: &str) -> ApiResult<()> {
    api.get_no_content(&format!("/payments/kakao/fail?orderId={}", encode_component(order_id))).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{decode_body, decode_status};

    #[test]
    fn test_approval_from_gateway_response() {
        let body = r#"{"aid":"A5678","tid":"T1234","cid":"TC0ONETIME","partner_order_id":"DON-20240601-0001",
            "partner_user_id":"DON-20240601-0001","payment_method_type":"MONEY",
            "amount":{"total":30000,"tax_free":0,"vat":2727,"point":0,"discount":0,"green_deposit":0},
            "item_name":"아동 급식 지원","quantity":1,"created_at":"2024-06-01T10:00:00","approved_at":"2024-06-01T10:01:00"}"#;
        let approval: Option<PaymentApproval> = decode_body(body).unwrap();
        let approval = approval.unwrap();
        assert_eq!(approval.total(), Some(30000));
        assert_eq!(approval.item_name.as_deref(), Some("아동 급식 지원"));
        assert_eq!(approval.partner_order_id.as_deref(), Some("DON-20240601-0001"));
        assert!(!approval.already_completed());
    }

    #[test]
    fn test_approval_already_completed() {
        let body = r#"{"status":"already_completed","message":"결제가 이미 완료되었습니다.","orderId":"DON-1"}"#;
        let approval: PaymentApproval = decode_body(body).unwrap();
        assert!(approval.already_completed());
        assert_eq!(approval.partner_order_id.as_deref(), Some("DON-1"));
        assert_eq!(approval.total(), None);
    }

    #[test]
    fn test_cancel_and_fail_replies_are_plain_text() {
        assert_eq!(decode_status("결제가 취소되었습니다."), Ok(()));
        assert_eq!(decode_status("결제에 실패했습니다."), Ok(()));
    }
}
