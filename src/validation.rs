//! Auth Form Validation
//!
//! Login and signup field checks run before any request is sent.

use std::sync::OnceLock;

use regex::Regex;

use crate::api::{LoginRequest, SignupRequest};
use crate::models::UserType;

pub const MIN_PASSWORD_LEN: usize = 8;

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
static SPECIAL_CHAR_RE: OnceLock<Regex> = OnceLock::new();
static ACCOUNT_NUMBER_RE: OnceLock<Regex> = OnceLock::new();

fn email_re() -> &'static Regex {
    EMAIL_RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap())
}

fn special_char_re() -> &'static Regex {
    SPECIAL_CHAR_RE.get_or_init(|| Regex::new(r#"[!@#$%^&*(),.?":{}|<>]"#).unwrap())
}

fn account_number_re() -> &'static Regex {
    ACCOUNT_NUMBER_RE.get_or_init(|| Regex::new(r"^[0-9]+(-[0-9]+)*$").unwrap())
}

pub fn is_valid_email(email: &str) -> bool {
    email_re().is_match(email.trim())
}

/// Digits, optionally grouped with single dashes
pub fn is_valid_account_number(number: &str) -> bool {
    account_number_re().is_match(number.trim())
}

pub fn validate_password(password: &str) -> Result<(), String> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(format!("비밀번호는 {}자 이상이어야 합니다.", MIN_PASSWORD_LEN));
    }
    if !special_char_re().is_match(password) {
        return Err("비밀번호는 특수문자를 포함해야 합니다.".to_string());
    }
    Ok(())
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub remember_me: bool,
}

impl LoginForm {
    pub fn validate(&self) -> Result<LoginRequest, String> {
        if self.email.trim().is_empty() || self.password.is_empty() {
            return Err("이메일과 비밀번호를 입력해주세요.".to_string());
        }
        Ok(LoginRequest {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            remember_me: self.remember_me,
        })
    }
}

/// Result of the duplicate-email check for the address currently typed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EmailCheck {
    #[default]
    Unchecked,
    Available(String),
    Taken(String),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SignupForm {
    pub user_type: UserType,
    pub email: String,
    pub email_check: EmailCheck,
    pub password: String,
    pub password_confirm: String,
    /// Person name, or organization name for organization accounts
    pub user_name: String,
    pub phone: String,
    pub organization_name: String,
    pub business_number: String,
    pub representative_name: String,
}

impl SignupForm {
    /// Format check before calling the availability endpoint
    pub fn email_for_check(&self) -> Result<String, String> {
        let email = self.email.trim();
        if !is_valid_email(email) {
            return Err("올바른 이메일 형식이 아닙니다.".to_string());
        }
        Ok(email.to_string())
    }

    /// Record the availability answer for `email`
    pub fn record_email_check(&mut self, email: String, available: bool) {
        self.email_check = if available { EmailCheck::Available(email) } else { EmailCheck::Taken(email) };
    }

    pub fn validate(&self) -> Result<SignupRequest, String> {
        let email = self.email_for_check()?;
        match &self.email_check {
            EmailCheck::Available(checked) if *checked == email => {}
            EmailCheck::Taken(checked) if *checked == email => {
                return Err("사용할 수 없는 이메일입니다.".to_string());
            }
            _ => return Err("이메일 중복 확인을 해주세요.".to_string()),
        }
        validate_password(&self.password)?;
        if self.password != self.password_confirm {
            return Err("비밀번호가 일치하지 않습니다.".to_string());
        }
        if self.user_name.trim().is_empty() {
            return Err("이름을 입력해주세요.".to_string());
        }

        let is_org = self.user_type == UserType::Organization;
        if is_org
            && [&self.organization_name, &self.business_number, &self.representative_name]
                .iter()
                .any(|f| f.trim().is_empty())
        {
            return Err("기관명, 사업자등록번호, 대표자명을 모두 입력해주세요.".to_string());
        }
        let org_field = |value: &str| is_org.then(|| value.trim().to_string());

        Ok(SignupRequest {
            email,
            password: self.password.clone(),
            user_name: self.user_name.trim().to_string(),
            phone: Some(self.phone.trim().to_string()).filter(|p| !p.is_empty()),
            user_type: self.user_type,
            organization_name: org_field(&self.organization_name),
            business_number: org_field(&self.business_number),
            representative_name: org_field(&self.representative_name),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> SignupForm {
        let mut form = SignupForm {
            email: "donor@example.com".to_string(),
            password: "secret!23".to_string(),
            password_confirm: "secret!23".to_string(),
            user_name: "김기부".to_string(),
            ..Default::default()
        };
        form.record_email_check("donor@example.com".to_string(), true);
        form
    }

    #[test]
    fn test_email_format() {
        assert!(is_valid_email("a@b.co"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@c.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_password_rules() {
        assert!(validate_password("short!1").is_err());
        assert!(validate_password("longenough1").unwrap_err().contains("특수문자"));
        assert!(validate_password("longenough?").is_ok());
    }

    #[test]
    fn test_login_requires_both_fields() {
        assert!(LoginForm { email: "a@b.com".to_string(), ..Default::default() }.validate().is_err());
        let request = LoginForm {
            email: " a@b.com ".to_string(),
            password: "pw".to_string(),
            remember_me: true,
        }
        .validate()
        .unwrap();
        assert_eq!(request.email, "a@b.com");
        assert!(request.remember_me);
    }

    #[test]
    fn test_signup_valid() {
        let request = valid_form().validate().unwrap();
        assert_eq!(request.user_type, UserType::Individual);
        assert_eq!(request.phone, None);
        assert_eq!(request.organization_name, None);
    }

    #[test]
    fn test_signup_requires_email_check_for_current_address() {
        let mut form = valid_form();
        form.email = "other@example.com".to_string();
        assert_eq!(form.validate().unwrap_err(), "이메일 중복 확인을 해주세요.");

        form.record_email_check("other@example.com".to_string(), false);
        assert_eq!(form.validate().unwrap_err(), "사용할 수 없는 이메일입니다.");
    }

    #[test]
    fn test_signup_password_mismatch() {
        let mut form = valid_form();
        form.password_confirm = "different!1".to_string();
        assert_eq!(form.validate().unwrap_err(), "비밀번호가 일치하지 않습니다.");
    }

    #[test]
    fn test_signup_organization_fields() {
        let mut form = valid_form();
        form.user_type = UserType::Organization;
        assert!(form.validate().is_err());

        form.organization_name = "희망재단".to_string();
        form.business_number = "123-45-67890".to_string();
        form.representative_name = "홍길동".to_string();
        let request = form.validate().unwrap();
        assert_eq!(request.business_number.as_deref(), Some("123-45-67890"));
    }

    #[test]
    fn test_account_number() {
        assert!(is_valid_account_number("110-123-456789"));
        assert!(is_valid_account_number("1234567890"));
        assert!(!is_valid_account_number("12a-34"));
        assert!(!is_valid_account_number("-123"));
        assert!(!is_valid_account_number(""));
    }
}
