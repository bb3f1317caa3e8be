//! Piggy Bank & Settlement
//!
//! List filters for piggy banks and their transactions, plus the settlement
//! request form with its fee calculation.

use chrono::NaiveDateTime;

use crate::format::days_elapsed;
use crate::models::{
    parse_timestamp, CreateSettlementRequest, PiggyBank, PiggyBankStatus, Transaction, TransactionType,
};
use crate::notification_center::DateRange;
use crate::validation::is_valid_account_number;

/// Balance above which an active piggy bank may be withdrawn
pub const WITHDRAW_THRESHOLD: i64 = 1_000_000;
/// Settlement fee in percent
pub const FEE_PERCENT: i64 = 3;

// ========================
// Piggy Banks
// ========================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PiggyBankFilter {
    #[default]
    All,
    Active,
    Withdrawn,
    CanWithdraw,
    PendingSettlement,
    Locked,
}

impl PiggyBankFilter {
    pub const ALL: [PiggyBankFilter; 6] = [
        PiggyBankFilter::All,
        PiggyBankFilter::Active,
        PiggyBankFilter::Withdrawn,
        PiggyBankFilter::CanWithdraw,
        PiggyBankFilter::PendingSettlement,
        PiggyBankFilter::Locked,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PiggyBankFilter::All => "전체",
            PiggyBankFilter::Active => "모금중",
            PiggyBankFilter::Withdrawn => "인출완료",
            PiggyBankFilter::CanWithdraw => "인출가능",
            PiggyBankFilter::PendingSettlement => "정산대기",
            PiggyBankFilter::Locked => "잠김",
        }
    }

    pub fn matches(&self, bank: &PiggyBank) -> bool {
        match self {
            PiggyBankFilter::All => true,
            PiggyBankFilter::Active => bank.status == PiggyBankStatus::Active,
            PiggyBankFilter::Withdrawn => bank.status == PiggyBankStatus::Withdrawn,
            PiggyBankFilter::CanWithdraw => can_withdraw(bank),
            PiggyBankFilter::PendingSettlement => bank.status == PiggyBankStatus::PendingSettlement,
            PiggyBankFilter::Locked => bank.status == PiggyBankStatus::Locked,
        }
    }

    pub fn apply<'a>(&self, banks: &'a [PiggyBank]) -> Vec<&'a PiggyBank> {
        banks.iter().filter(|b| self.matches(b)).collect()
    }
}

pub fn can_withdraw(bank: &PiggyBank) -> bool {
    bank.status == PiggyBankStatus::Active && bank.balance > WITHDRAW_THRESHOLD
}

pub fn total_balance(banks: &[PiggyBank]) -> i64 {
    banks.iter().map(|b| b.balance).sum()
}

// ========================
// Transactions
// ========================

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TransactionFilter {
    /// `None` means both deposits and withdrawals
    pub kind: Option<TransactionType>,
    pub date: DateRange,
}

impl TransactionFilter {
    pub fn matches(&self, tx: &Transaction, now: NaiveDateTime) -> bool {
        if self.kind.is_some_and(|k| k != tx.kind) {
            return false;
        }
        if self.date == DateRange::All {
            return true;
        }
        parse_timestamp(&tx.timestamp).is_some_and(|ts| self.date.contains(days_elapsed(ts, now)))
    }

    pub fn apply<'a>(&self, txs: &'a [Transaction], now: NaiveDateTime) -> Vec<&'a Transaction> {
        txs.iter().filter(|t| self.matches(t, now)).collect()
    }
}

// ========================
// Settlement Form
// ========================

/// 3% of the request, rounded down to the won. Split by hundreds so any
/// typed amount stays in range.
pub fn settlement_fee(amount: i64) -> i64 {
    let amount = amount.max(0);
    amount / 100 * FEE_PERCENT + amount % 100 * FEE_PERCENT / 100
}

pub fn transfer_amount(amount: i64) -> i64 {
    amount - settlement_fee(amount)
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettlementForm {
    pub piggy_bank_id: u64,
    pub balance: i64,
    pub amount: String,
    pub bank_name: String,
    pub account_number: String,
    pub account_holder: String,
}

impl SettlementForm {
    pub fn for_bank(bank: &PiggyBank) -> Self {
        Self { piggy_bank_id: bank.piggy_bank_id, balance: bank.balance, ..Default::default() }
    }

    pub fn amount(&self) -> Option<i64> {
        let digits: String = self.amount.chars().filter(|c| *c != ',' && !c.is_whitespace()).collect();
        digits.parse().ok()
    }

    pub fn fee(&self) -> i64 {
        self.amount().map(settlement_fee).unwrap_or(0)
    }

    pub fn transfer(&self) -> i64 {
        self.amount().map(transfer_amount).unwrap_or(0)
    }

    pub fn validate(&self) -> Result<i64, String> {
        let amount = match self.amount() {
            Some(a) if a >= 1 => a,
            _ => return Err("정산 요청 금액을 입력해주세요.".to_string()),
        };
        if amount > self.balance {
            return Err("정산 요청 금액이 잔액을 초과합니다.".to_string());
        }
        if [&self.bank_name, &self.account_number, &self.account_holder].iter().any(|f| f.trim().is_empty()) {
            return Err("은행명, 계좌번호, 예금주를 모두 입력해주세요.".to_string());
        }
        if !is_valid_account_number(&self.account_number) {
            return Err("계좌번호는 숫자와 하이픈(-)만 입력 가능합니다.".to_string());
        }
        Ok(amount)
    }

    pub fn to_request(&self) -> Result<CreateSettlementRequest, String> {
        let request_amount = self.validate()?;
        Ok(CreateSettlementRequest {
            piggy_bank_id: self.piggy_bank_id,
            request_amount,
            bank_name: self.bank_name.trim().to_string(),
            account_number: self.account_number.trim().to_string(),
            account_holder: self.account_holder.trim().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn bank(id: u64, status: PiggyBankStatus, balance: i64) -> PiggyBank {
        PiggyBank {
            piggy_bank_id: id,
            project_id: id,
            project_title: format!("프로젝트 {}", id),
            total_amount: balance,
            withdrawn_amount: 0,
            balance,
            status,
            created_at: "2024-01-01T00:00:00".to_string(),
            last_updated: "2024-06-01T00:00:00".to_string(),
            target_amount: None,
            achievement_rate: None,
            donor_count: None,
            recent_donations: None,
        }
    }

    fn tx(id: u64, kind: TransactionType, timestamp: &str) -> Transaction {
        Transaction {
            id,
            kind,
            amount: 10_000,
            donor: None,
            message: None,
            note: None,
            timestamp: timestamp.to_string(),
            receipt_number: None,
            settlement_id: None,
        }
    }

    fn banks() -> Vec<PiggyBank> {
        vec![
            bank(1, PiggyBankStatus::Active, 2_000_000),
            bank(2, PiggyBankStatus::Active, 1_000_000),
            bank(3, PiggyBankStatus::Withdrawn, 0),
            bank(4, PiggyBankStatus::PendingSettlement, 500_000),
            bank(5, PiggyBankStatus::Locked, 3_000_000),
        ]
    }

    fn ids(items: &[&PiggyBank]) -> Vec<u64> {
        items.iter().map(|b| b.piggy_bank_id).collect()
    }

    #[test]
    fn test_piggy_bank_filters() {
        let list = banks();
        assert_eq!(PiggyBankFilter::All.apply(&list).len(), 5);
        assert_eq!(ids(&PiggyBankFilter::Active.apply(&list)), vec![1, 2]);
        assert_eq!(ids(&PiggyBankFilter::CanWithdraw.apply(&list)), vec![1]);
        assert_eq!(ids(&PiggyBankFilter::Withdrawn.apply(&list)), vec![3]);
        assert_eq!(ids(&PiggyBankFilter::PendingSettlement.apply(&list)), vec![4]);
        assert_eq!(ids(&PiggyBankFilter::Locked.apply(&list)), vec![5]);
        assert_eq!(total_balance(&list), 6_500_000);
    }

    #[test]
    fn test_transaction_filter() {
        let now = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap().and_hms_opt(12, 0, 0).unwrap();
        let list = vec![
            tx(1, TransactionType::Deposit, "2024-06-30T10:00:00"),
            tx(2, TransactionType::Withdrawal, "2024-06-25T10:00:00"),
            tx(3, TransactionType::Deposit, "2024-05-01T10:00:00"),
        ];
        let deposits = TransactionFilter { kind: Some(TransactionType::Deposit), ..Default::default() };
        assert_eq!(deposits.apply(&list, now).len(), 2);

        let week = TransactionFilter { date: DateRange::Week, ..Default::default() };
        let ids: Vec<u64> = week.apply(&list, now).iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2]);

        let today_deposits = TransactionFilter { kind: Some(TransactionType::Deposit), date: DateRange::Today };
        assert_eq!(today_deposits.apply(&list, now).len(), 1);
    }

    #[test]
    fn test_fee_rounds_down() {
        assert_eq!(settlement_fee(1_000_000), 30_000);
        assert_eq!(settlement_fee(33), 0);
        assert_eq!(settlement_fee(1_234_567), 37_037);
        assert_eq!(transfer_amount(1_234_567), 1_197_530);
    }

    #[test]
    fn test_fee_on_huge_amounts() {
        assert_eq!(settlement_fee(4_000_000_000_000_000_000), 120_000_000_000_000_000);
        assert_eq!(settlement_fee(i64::MAX), 276_701_161_105_643_274);
        assert_eq!(transfer_amount(i64::MAX), 8_946_670_875_749_132_533);
        assert_eq!(settlement_fee(-5_000), 0);

        let mut form = SettlementForm::for_bank(&bank(1, PiggyBankStatus::Active, 2_000_000));
        form.amount = "4,000,000,000,000,000,000".to_string();
        assert_eq!(form.fee(), 120_000_000_000_000_000);
        assert!(form.validate().unwrap_err().contains("잔액"));
    }

    #[test]
    fn test_settlement_form_validation() {
        let mut form = SettlementForm::for_bank(&bank(1, PiggyBankStatus::Active, 2_000_000));
        assert!(form.validate().is_err());

        form.amount = "2,000,001".to_string();
        assert!(form.validate().unwrap_err().contains("잔액"));

        form.amount = "2,000,000".to_string();
        assert!(form.validate().unwrap_err().contains("은행명"));

        form.bank_name = "국민은행".to_string();
        form.account_holder = "희망재단".to_string();
        form.account_number = "123-abc".to_string();
        assert!(form.validate().unwrap_err().contains("계좌번호"));

        form.account_number = "123-456-789".to_string();
        let request = form.to_request().unwrap();
        assert_eq!(request.request_amount, 2_000_000);
        assert_eq!(request.piggy_bank_id, 1);
        assert_eq!(form.fee(), 60_000);
        assert_eq!(form.transfer(), 1_940_000);
    }

    #[test]
    fn test_zero_amount_rejected() {
        let mut form = SettlementForm::for_bank(&bank(1, PiggyBankStatus::Active, 100));
        form.amount = "0".to_string();
        assert!(form.validate().is_err());
    }
}
