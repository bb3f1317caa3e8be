//! Auth Endpoints
//!
//! Login, signup and account security. Responses come wrapped in the
//! `{ success, data, message, errorCode }` envelope.

use serde::Serialize;

use super::{encode_component, ApiClient};
use crate::error::ApiResult;
use crate::models::{AuthResponse, UserType};

// ========================
// Request Bodies
// ========================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    pub remember_me: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub user_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(serialize_with = "ser_user_type_upper")]
    pub user_type: UserType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub representative_name: Option<String>,
}

/// Signup wants `INDIVIDUAL` / `ORGANIZATION` / `ADMIN`
fn ser_user_type_upper<S: serde::Serializer>(user_type: &UserType, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(user_type.as_wire())
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

// ========================
// Commands
// ========================

pub async fn login(api: &ApiClient, request: &LoginRequest) -> ApiResult<AuthResponse> {
    api.post_enveloped("/auth/login", request).await
}

pub async fn signup(api: &ApiClient, request: &SignupRequest) -> ApiResult<AuthResponse> {
    api.post_enveloped("/auth/signup", request).await
}

pub async fn logout(api: &ApiClient) -> ApiResult<()> {
    api.post_empty_no_content("/auth/logout").await
}

pub async fn refresh_token(api: &ApiClient) -> ApiResult<AuthResponse> {
    api.post_empty_enveloped("/auth/refresh").await
}

pub async fn change_password(api: &ApiClient, request: &ChangePasswordRequest) -> ApiResult<()> {
    api.post_no_content("/auth/change-password", request).await
}

/// `true` when the address is not registered yet
pub async fn check_email_availability(api: &ApiClient, email: &str) -> ApiResult<bool> {
    let path = format!("/auth/check-email?email={}", encode_component(email));
    api.get_enveloped(&path).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signup_user_type_upper_cased() {
        let request = SignupRequest {
            email: "org@example.com".to_string(),
            password: "secret!123".to_string(),
            user_name: "희망재단".to_string(),
            phone: None,
            user_type: UserType::Organization,
            organization_name: Some("희망재단".to_string()),
            business_number: Some("123-45-67890".to_string()),
            representative_name: Some("홍길동".to_string()),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["userType"], "ORGANIZATION");
        assert_eq!(json["businessNumber"], "123-45-67890");
        assert!(json.get("phone").is_none());
    }
}
