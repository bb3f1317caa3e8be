//! Donation Form
//!
//! State behind the donation modal: amount choice, donor fields and payment
//! method, checked before the payment-ready call.

use crate::api::sort_options;
use crate::models::{DonationOption, DonationRequest, PaymentMethod};
use crate::validation::is_valid_email;

/// Amounts offered when a project defines no options
pub const PRESET_AMOUNTS: [i64; 4] = [10_000, 30_000, 50_000, 100_000];

/// One selectable amount button
#[derive(Debug, Clone, PartialEq)]
pub struct AmountOption {
    pub option_id: Option<u64>,
    pub name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub amount: i64,
}

impl From<&DonationOption> for AmountOption {
    fn from(option: &DonationOption) -> Self {
        Self {
            option_id: option.option_id,
            name: option.option_name.clone(),
            description: option.option_description.clone(),
            icon: option.icon_emoji.clone(),
            amount: option.amount,
        }
    }
}

/// Project options in display order, or the presets when none are active
pub fn amount_options(options: &[DonationOption]) -> Vec<AmountOption> {
    let active = sort_options(options.to_vec());
    if active.is_empty() {
        return PRESET_AMOUNTS
            .iter()
            .map(|&amount| AmountOption {
                option_id: None,
                name: crate::format::format_won(amount),
                description: None,
                icon: None,
                amount,
            })
            .collect();
    }
    active.iter().map(AmountOption::from).collect()
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DonationForm {
    pub options: Vec<AmountOption>,
    selected: Option<usize>,
    custom_amount: String,
    pub donor_name: String,
    pub is_anonymous: bool,
    pub email: String,
    pub phone: String,
    pub message: String,
    pub payment_method: Option<PaymentMethod>,
}

impl DonationForm {
    pub fn new(options: &[DonationOption]) -> Self {
        Self { options: amount_options(options), ..Default::default() }
    }

    /// Pick a button; clears the typed amount
    pub fn select_option(&mut self, index: usize) {
        if index < self.options.len() {
            self.selected = Some(index);
            self.custom_amount.clear();
        }
    }

    /// Type an amount; clears the picked button
    pub fn set_custom_amount(&mut self, raw: &str) {
        self.custom_amount = raw.chars().filter(|c| c.is_ascii_digit()).collect();
        self.selected = None;
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn custom_amount(&self) -> &str {
        &self.custom_amount
    }

    /// Amount that would be charged, 0 when nothing is chosen
    pub fn amount(&self) -> i64 {
        match self.selected.and_then(|i| self.options.get(i)) {
            Some(option) => option.amount,
            None => self.custom_amount.parse().unwrap_or(0),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.amount() <= 0 {
            return Err("기부 금액을 입력해주세요.".to_string());
        }
        if !self.is_anonymous && self.donor_name.trim().is_empty() {
            return Err("기부자명을 입력하거나 익명을 선택해주세요.".to_string());
        }
        if self.payment_method.is_none() {
            return Err("결제 수단을 선택해주세요.".to_string());
        }
        if !self.email.trim().is_empty() && !is_valid_email(&self.email) {
            return Err("올바른 이메일 형식이 아닙니다.".to_string());
        }
        Ok(())
    }

    pub fn to_request(&self, project_id: u64) -> Result<DonationRequest, String> {
        self.validate()?;
        let non_empty = |s: &str| Some(s.trim().to_string()).filter(|s| !s.is_empty());
        Ok(DonationRequest {
            project_id,
            amount: self.amount(),
            donor_name: if self.is_anonymous { None } else { non_empty(&self.donor_name) },
            donor_email: non_empty(&self.email),
            donor_phone: non_empty(&self.phone),
            is_anonymous: self.is_anonymous,
            message: non_empty(&self.message),
            // validate() guarantees a method
            payment_method: self.payment_method.unwrap_or(PaymentMethod::KakaoPay),
            option_id: self.selected.and_then(|i| self.options.get(i)).and_then(|o| o.option_id),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn option(id: u64, name: &str, amount: i64, order: i32, active: bool) -> DonationOption {
        DonationOption {
            option_id: Some(id),
            project_id: Some(1),
            option_name: name.to_string(),
            option_description: None,
            amount,
            icon_emoji: None,
            display_order: Some(order),
            is_active: Some(active),
        }
    }

    fn ready_form() -> DonationForm {
        let mut form = DonationForm::new(&[]);
        form.select_option(1);
        form.donor_name = "김기부".to_string();
        form.payment_method = Some(PaymentMethod::KakaoPay);
        form
    }

    #[test]
    fn test_presets_when_no_active_options() {
        let form = DonationForm::new(&[option(1, "도시락", 5000, 1, false)]);
        let amounts: Vec<i64> = form.options.iter().map(|o| o.amount).collect();
        assert_eq!(amounts, PRESET_AMOUNTS.to_vec());
        assert_eq!(form.options[0].name, "10,000원");
    }

    #[test]
    fn test_options_sorted_and_filtered() {
        let form = DonationForm::new(&[
            option(1, "담요", 30000, 2, true),
            option(2, "숨김", 1000, 0, false),
            option(3, "도시락", 5000, 1, true),
        ]);
        let names: Vec<&str> = form.options.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["도시락", "담요"]);
    }

    #[test]
    fn test_option_and_custom_amount_exclusive() {
        let mut form = DonationForm::new(&[]);
        form.select_option(2);
        assert_eq!(form.amount(), 50_000);

        form.set_custom_amount("12,500");
        assert_eq!(form.selected(), None);
        assert_eq!(form.amount(), 12_500);

        form.select_option(0);
        assert_eq!(form.custom_amount(), "");
        assert_eq!(form.amount(), 10_000);

        form.select_option(99);
        assert_eq!(form.selected(), Some(0));
    }

    #[test]
    fn test_validation_order() {
        let mut form = DonationForm::new(&[]);
        assert_eq!(form.validate().unwrap_err(), "기부 금액을 입력해주세요.");

        form.set_custom_amount("5000");
        assert_eq!(form.validate().unwrap_err(), "기부자명을 입력하거나 익명을 선택해주세요.");

        form.is_anonymous = true;
        assert_eq!(form.validate().unwrap_err(), "결제 수단을 선택해주세요.");

        form.payment_method = Some(PaymentMethod::TossPay);
        form.email = "not-an-email".to_string();
        assert!(form.validate().is_err());

        form.email.clear();
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_to_request() {
        let mut form = ready_form();
        form.message = "  힘내세요 ".to_string();
        let request = form.to_request(42).unwrap();
        assert_eq!(request.project_id, 42);
        assert_eq!(request.amount, 30_000);
        assert_eq!(request.donor_name.as_deref(), Some("김기부"));
        assert_eq!(request.message.as_deref(), Some("힘내세요"));
        assert_eq!(request.option_id, None);
        assert_eq!(request.donor_email, None);
    }

    #[test]
    fn test_anonymous_drops_name_and_keeps_option_id() {
        let mut form = DonationForm::new(&[option(7, "도시락", 5000, 1, true)]);
        form.select_option(0);
        form.is_anonymous = true;
        form.donor_name = "숨길 이름".to_string();
        form.payment_method = Some(PaymentMethod::KakaoPay);
        let request = form.to_request(1).unwrap();
        assert_eq!(request.donor_name, None);
        assert!(request.is_anonymous);
        assert_eq!(request.option_id, Some(7));
    }
}
