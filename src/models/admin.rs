use serde::{Deserialize, Serialize};

use super::de_amount;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardStats {
    #[serde(deserialize_with = "de_amount")]
    pub today_donation: i64,
    pub donation_change: f64,
    pub new_users: u64,
    pub user_change: f64,
    pub pending_approvals: u64,
    pub pending_settlements: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardProject {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub org: String,
    #[serde(default, deserialize_with = "de_amount")]
    pub amount: i64,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryShare {
    pub name: String,
    pub percent: f64,
    #[serde(default)]
    pub color: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdminDashboard {
    pub stats: DashboardStats,
    pub recent_projects: Vec<DashboardProject>,
    pub weekly_donations: Vec<f64>,
    pub category_distribution: Vec<CategoryShare>,
}

impl AdminDashboard {
    /// Bar heights in percent of the busiest day
    pub fn weekly_bar_heights(&self) -> Vec<u32> {
        let max = self.weekly_donations.iter().cloned().fold(0.0_f64, f64::max);
        self.weekly_donations
            .iter()
            .map(|v| if max <= 0.0 { 0 } else { ((v / max) * 100.0).round() as u32 })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MetricsPeriod {
    #[default]
    Daily,
    Weekly,
    Monthly,
}

impl MetricsPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricsPeriod::Daily => "daily",
            MetricsPeriod::Weekly => "weekly",
            MetricsPeriod::Monthly => "monthly",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyMetric {
    pub date: String,
    #[serde(default)]
    pub new_users: u64,
    #[serde(default)]
    pub new_projects: u64,
    #[serde(default, deserialize_with = "de_amount")]
    pub total_donations: i64,
    #[serde(default)]
    pub donation_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyMetric {
    pub week_start: String,
    #[serde(default, deserialize_with = "de_amount")]
    pub total_donations: i64,
    #[serde(default, deserialize_with = "de_amount")]
    pub avg_donation: i64,
    #[serde(default)]
    pub new_projects: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyMetric {
    pub month: String,
    #[serde(default, deserialize_with = "de_amount")]
    pub total_donations: i64,
    #[serde(default)]
    pub new_users: u64,
    #[serde(default)]
    pub completed_projects: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Metrics {
    pub daily: Vec<DailyMetric>,
    pub weekly: Vec<WeeklyMetric>,
    pub monthly: Vec<MonthlyMetric>,
}

/// Status filter shared by the admin lists; `None` means all
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdminListFilters {
    pub status: Option<String>,
    pub category: Option<String>,
    pub user_type: Option<String>,
    pub keyword: Option<String>,
    pub page: u32,
    pub size: u32,
}

impl AdminListFilters {
    pub fn query_pairs(&self) -> Vec<(&'static str, Option<String>)> {
        vec![
            ("status", self.status.clone().filter(|s| s != "all")),
            ("category", self.category.clone().filter(|s| s != "all")),
            ("userType", self.user_type.clone().filter(|s| s != "all")),
            ("keyword", self.keyword.clone()),
            ("page", Some(self.page.to_string())),
            ("size", Some(self.size.max(1).to_string())),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approval_note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RejectionRequest {
    pub rejection_reason: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dashboard_defaults_on_partial_payload() {
        let dashboard: AdminDashboard =
            serde_json::from_str(r#"{"stats":{"todayDonation":1250000.0,"pendingApprovals":4},"weeklyDonations":[10,40,20]}"#)
                .unwrap();
        assert_eq!(dashboard.stats.today_donation, 1_250_000);
        assert_eq!(dashboard.stats.pending_approvals, 4);
        assert!(dashboard.recent_projects.is_empty());
        assert_eq!(dashboard.weekly_bar_heights(), vec![25, 100, 50]);
    }

    #[test]
    fn test_bar_heights_all_zero() {
        let dashboard = AdminDashboard { weekly_donations: vec![0.0, 0.0], ..Default::default() };
        assert_eq!(dashboard.weekly_bar_heights(), vec![0, 0]);
    }

    #[test]
    fn test_admin_filters_drop_all() {
        let filters = AdminListFilters {
            status: Some("all".to_string()),
            user_type: Some("organization".to_string()),
            size: 10,
            ..Default::default()
        };
        let pairs = filters.query_pairs();
        assert!(pairs.contains(&("status", None)));
        assert!(pairs.contains(&("userType", Some("organization".to_string()))));
    }
}
