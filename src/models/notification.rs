use serde::{Deserialize, Serialize};

use super::parse_timestamp;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NotificationCategory {
    #[serde(alias = "DONATION")]
    Donation,
    #[serde(alias = "COMMUNITY")]
    Community,
    #[default]
    #[serde(alias = "PROJECT")]
    Project,
    #[serde(alias = "SETTLEMENT")]
    Settlement,
}

impl NotificationCategory {
    pub const ALL: [NotificationCategory; 4] = [
        NotificationCategory::Donation,
        NotificationCategory::Community,
        NotificationCategory::Project,
        NotificationCategory::Settlement,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            NotificationCategory::Donation => "기부",
            NotificationCategory::Community => "커뮤니티",
            NotificationCategory::Project => "프로젝트",
            NotificationCategory::Settlement => "정산",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    #[default]
    Normal,
    High,
}

/// Free-form extras; only the fields the UI reads are typed
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NotificationMetadata {
    pub project_name: Option<String>,
    pub amount: Option<serde_json::Value>,
    pub author: Option<String>,
    pub post_title: Option<String>,
    pub days_left: Option<i64>,
    pub progress: Option<f64>,
    pub reason: Option<String>,
    pub priority: Option<Priority>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    #[serde(alias = "id")]
    pub notification_id: u64,
    /// donation, comment, reply, project_approval, goal_achieved, deadline_soon, ...
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub category: NotificationCategory,
    pub title: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub is_read: bool,
    #[serde(default)]
    pub is_archived: bool,
    #[serde(default, alias = "timestamp")]
    pub created_at: String,
    #[serde(default)]
    pub metadata: Option<NotificationMetadata>,
}

impl Notification {
    pub fn timestamp(&self) -> Option<chrono::NaiveDateTime> {
        parse_timestamp(&self.created_at)
    }

    pub fn project_name(&self) -> Option<&str> {
        self.metadata.as_ref().and_then(|m| m.project_name.as_deref())
    }

    pub fn priority(&self) -> Priority {
        self.metadata.as_ref().and_then(|m| m.priority).unwrap_or_default()
    }

    /// Icon shown next to the notification
    pub fn icon(&self) -> &'static str {
        match self.kind.as_str() {
            "donation" => "💝",
            "comment" | "reply" => "💬",
            "project_approval" => "✅",
            "project_rejection" => "⛔",
            "goal_achieved" => "🎉",
            "deadline_soon" => "⏰",
            "settlement" => "💰",
            _ => "🔔",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct UnreadCount {
    pub count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_from_server_shape() {
        let json = r#"{
            "notificationId": 11,
            "type": "donation",
            "category": "DONATION",
            "title": "새 기부",
            "message": "30,000원이 기부되었습니다",
            "isRead": false,
            "createdAt": "2024-06-01T12:00:00",
            "metadata": {"projectName": "급식 지원", "amount": "30,000", "priority": "high"}
        }"#;
        let n: Notification = serde_json::from_str(json).unwrap();
        assert_eq!(n.category, NotificationCategory::Donation);
        assert!(!n.is_archived);
        assert_eq!(n.project_name(), Some("급식 지원"));
        assert_eq!(n.priority(), Priority::High);
        assert!(n.timestamp().is_some());
        assert_eq!(n.icon(), "💝");
    }
}
