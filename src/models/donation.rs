use serde::{Deserialize, Serialize};

use super::de_amount;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DonationStatus {
    #[default]
    #[serde(alias = "COMPLETED")]
    Completed,
    #[serde(alias = "PENDING")]
    Pending,
    #[serde(alias = "FAILED", alias = "CANCELLED")]
    Failed,
}

impl DonationStatus {
    pub const ALL: [DonationStatus; 3] = [DonationStatus::Completed, DonationStatus::Pending, DonationStatus::Failed];

    pub fn as_str(&self) -> &'static str {
        match self {
            DonationStatus::Completed => "completed",
            DonationStatus::Pending => "pending",
            DonationStatus::Failed => "failed",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.as_str() == s)
    }

    pub fn label(&self) -> &'static str {
        match self {
            DonationStatus::Completed => "완료",
            DonationStatus::Pending => "처리중",
            DonationStatus::Failed => "실패",
        }
    }
}

/// Row in "my donations"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationHistory {
    pub id: u64,
    pub project_title: String,
    #[serde(default)]
    pub organization: String,
    #[serde(deserialize_with = "de_amount")]
    pub amount: i64,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub receipt_number: String,
    #[serde(default)]
    pub status: DonationStatus,
    #[serde(default)]
    pub donor_name: String,
    #[serde(default)]
    pub selected_option_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DonationFilters {
    pub year: Option<String>,
    pub status: Option<DonationStatus>,
    pub keyword: Option<String>,
    pub page: u32,
    pub size: u32,
}

impl DonationFilters {
    pub fn query_pairs(&self) -> Vec<(&'static str, Option<String>)> {
        vec![
            ("year", self.year.clone()),
            ("status", self.status.map(|s| s.as_str().to_string())),
            ("keyword", self.keyword.clone()),
            ("page", Some(self.page.to_string())),
            ("size", Some(self.size.max(1).to_string())),
        ]
    }
}

/// Public feed entry; the donor name is already masked server-side
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentDonation {
    pub donor_name: String,
    #[serde(deserialize_with = "de_amount")]
    pub amount: i64,
    pub project_title: String,
    #[serde(default)]
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptDonation {
    pub donation_id: u64,
    pub project_title: String,
    #[serde(deserialize_with = "de_amount")]
    pub amount: i64,
    pub donated_at: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub receipt_id: u64,
    pub receipt_number: String,
    pub pdf_url: String,
    pub issued_at: String,
    pub donation: ReceiptDonation,
}

/// Gateways the payment-ready endpoint accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    KakaoPay,
    TossPay,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 2] = [PaymentMethod::KakaoPay, PaymentMethod::TossPay];

    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::KakaoPay => "카카오페이",
            PaymentMethod::TossPay => "토스페이",
        }
    }
}

/// Body of the payment-ready call; creates a pending donation server-side
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationRequest {
    pub project_id: u64,
    pub amount: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub donor_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub donor_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub donor_phone: Option<String>,
    pub is_anonymous: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub payment_method: PaymentMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub option_id: Option<u64>,
}

/// Gateway redirect targets (snake_case, passed through from the gateway)
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PaymentReady {
    pub tid: String,
    #[serde(default)]
    pub next_redirect_pc_url: Option<String>,
    #[serde(default)]
    pub next_redirect_mobile_url: Option<String>,
    #[serde(default)]
    pub next_redirect_app_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl PaymentReady {
    /// Desktop page first, mobile web as fallback
    pub fn redirect_url(&self) -> Option<&str> {
        [&self.next_redirect_pc_url, &self.next_redirect_mobile_url]
            .into_iter()
            .filter_map(|url| url.as_deref())
            .find(|url| !url.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_donation_request_wire_format() {
        let request = DonationRequest {
            project_id: 7,
            amount: 30000,
            donor_name: None,
            donor_email: Some("donor@example.com".to_string()),
            donor_phone: None,
            is_anonymous: true,
            message: None,
            payment_method: PaymentMethod::KakaoPay,
            option_id: None,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["projectId"], 7);
        assert_eq!(json["paymentMethod"], "KAKAO_PAY");
        assert_eq!(json["isAnonymous"], true);
        assert!(json.get("donorName").is_none());
    }

    #[test]
    fn test_payment_ready_redirect_fallback() {
        let ready: PaymentReady = serde_json::from_str(
            r#"{"tid":"T1","next_redirect_pc_url":"","next_redirect_mobile_url":"https://m.pay/1"}"#,
        )
        .unwrap();
        assert_eq!(ready.redirect_url(), Some("https://m.pay/1"));

        let ready: PaymentReady =
            serde_json::from_str(r#"{"tid":"T2","next_redirect_pc_url":"https://pc.pay/2"}"#).unwrap();
        assert_eq!(ready.redirect_url(), Some("https://pc.pay/2"));

        let ready: PaymentReady = serde_json::from_str(r#"{"tid":"T3"}"#).unwrap();
        assert_eq!(ready.redirect_url(), None);
    }
}
