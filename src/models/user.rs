use serde::{Deserialize, Serialize};

/// Account kind; the server sends either case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum UserType {
    #[default]
    #[serde(rename = "individual", alias = "INDIVIDUAL")]
    Individual,
    #[serde(rename = "organization", alias = "ORGANIZATION")]
    Organization,
    #[serde(rename = "admin", alias = "ADMIN")]
    Admin,
}

impl UserType {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::Individual => "individual",
            UserType::Organization => "organization",
            UserType::Admin => "admin",
        }
    }

    /// Upper-case form the signup endpoint expects
    pub fn as_wire(&self) -> &'static str {
        match self {
            UserType::Individual => "INDIVIDUAL",
            UserType::Organization => "ORGANIZATION",
            UserType::Admin => "ADMIN",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            UserType::Individual => "일반",
            UserType::Organization => "기관",
            UserType::Admin => "관리자",
        }
    }
}

/// Logged-in user as returned by login/signup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    pub user_id: u64,
    pub email: String,
    pub user_name: String,
    #[serde(default)]
    pub user_type: UserType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image_url: Option<String>,
}

/// Partial update applied to the stored user after a profile edit
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthUserPatch {
    pub user_name: Option<String>,
    pub phone: Option<String>,
    pub profile_image_url: Option<String>,
}

impl AuthUser {
    pub fn apply(&mut self, patch: AuthUserPatch) {
        if let Some(name) = patch.user_name {
            self.user_name = name;
        }
        if let Some(phone) = patch.phone {
            self.phone = Some(phone);
        }
        if let Some(url) = patch.profile_image_url {
            self.profile_image_url = Some(url);
        }
    }
}

/// Persisted login state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthSession {
    pub token: String,
    pub user: AuthUser,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: AuthUser,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub user_id: u64,
    pub email: String,
    pub user_name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub user_type: UserType,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub birth_date: Option<String>,
    #[serde(default)]
    pub profile_image_url: Option<String>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub last_login_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ChannelSettings {
    pub enabled: bool,
    pub email: bool,
    pub sms: bool,
    pub push: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NotificationSettings {
    #[serde(default)]
    pub donation: ChannelSettings,
    #[serde(default)]
    pub comment: ChannelSettings,
    #[serde(default)]
    pub project: ChannelSettings,
    #[serde(default)]
    pub settlement: ChannelSettings,
    #[serde(default)]
    pub deadline: ChannelSettings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    #[default]
    #[serde(alias = "ACTIVE")]
    Active,
    #[serde(alias = "INACTIVE")]
    Inactive,
    #[serde(alias = "SUSPENDED")]
    Suspended,
}

impl UserStatus {
    pub const ALL: [UserStatus; 3] = [UserStatus::Active, UserStatus::Inactive, UserStatus::Suspended];

    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Active => "active",
            UserStatus::Inactive => "inactive",
            UserStatus::Suspended => "suspended",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            UserStatus::Active => "활성",
            UserStatus::Inactive => "비활성",
            UserStatus::Suspended => "정지",
        }
    }
}

/// Where an organization account stands in admin review.
///
/// Organizations sign up inactive; approving activates the account and
/// rejecting suspends it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrgApproval {
    Pending,
    Approved,
    Rejected,
}

impl OrgApproval {
    pub const ALL: [OrgApproval; 3] = [OrgApproval::Pending, OrgApproval::Approved, OrgApproval::Rejected];

    pub fn from_status(status: UserStatus) -> Self {
        match status {
            UserStatus::Inactive => OrgApproval::Pending,
            UserStatus::Active => OrgApproval::Approved,
            UserStatus::Suspended => OrgApproval::Rejected,
        }
    }

    /// Account status the admin sets to reach this stage
    pub fn status(&self) -> UserStatus {
        match self {
            OrgApproval::Pending => UserStatus::Inactive,
            OrgApproval::Approved => UserStatus::Active,
            OrgApproval::Rejected => UserStatus::Suspended,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OrgApproval::Pending => "승인 대기",
            OrgApproval::Approved => "승인 완료",
            OrgApproval::Rejected => "반려",
        }
    }

    /// Per-stage counts for the summary cards, in `ALL` order
    pub fn tally(users: &[AdminUser]) -> [usize; 3] {
        let mut counts = [0; 3];
        for user in users {
            let stage = OrgApproval::from_status(user.status);
            if let Some(i) = OrgApproval::ALL.iter().position(|s| *s == stage) {
                counts[i] += 1;
            }
        }
        counts
    }
}

/// Row in the admin user table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUser {
    pub id: u64,
    pub name: String,
    pub email: String,
    #[serde(rename = "type", default)]
    pub user_type: String,
    #[serde(default)]
    pub status: UserStatus,
    #[serde(default)]
    pub registered_date: String,
    #[serde(default)]
    pub last_login: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_type_accepts_both_cases() {
        let lower: UserType = serde_json::from_str(r#""organization""#).unwrap();
        let upper: UserType = serde_json::from_str(r#""ADMIN""#).unwrap();
        assert_eq!(lower, UserType::Organization);
        assert_eq!(upper, UserType::Admin);
        assert_eq!(serde_json::to_string(&UserType::Admin).unwrap(), r#""admin""#);
        assert_eq!(UserType::Organization.as_wire(), "ORGANIZATION");
    }

    #[test]
    fn test_auth_user_patch() {
        let mut user = AuthUser {
            user_id: 1,
            email: "user@example.com".to_string(),
            user_name: "홍길동".to_string(),
            user_type: UserType::Individual,
            phone: None,
            profile_image_url: None,
        };
        user.apply(AuthUserPatch {
            user_name: Some("김철수".to_string()),
            phone: Some("010-1234-5678".to_string()),
            profile_image_url: None,
        });
        assert_eq!(user.user_name, "김철수");
        assert_eq!(user.phone.as_deref(), Some("010-1234-5678"));
        assert_eq!(user.profile_image_url, None);
    }

    #[test]
    fn test_org_approval_follows_account_status() {
        let rows: Vec<AdminUser> = serde_json::from_str(
            r#"[
                {"id": 1, "name": "희망나눔재단", "email": "hope@example.com", "type": "organization", "status": "INACTIVE"},
                {"id": 2, "name": "아이사랑재단", "email": "kids@example.com", "type": "organization", "status": "active"},
                {"id": 3, "name": "동물사랑협회", "email": "pets@example.com", "type": "organization", "status": "inactive"}
            ]"#,
        )
        .unwrap();
        assert_eq!(OrgApproval::from_status(rows[0].status), OrgApproval::Pending);
        assert_eq!(OrgApproval::tally(&rows), [2, 1, 0]);
        for stage in OrgApproval::ALL {
            assert_eq!(OrgApproval::from_status(stage.status()), stage);
        }
        assert_eq!(OrgApproval::Rejected.status(), UserStatus::Suspended);
    }
}
