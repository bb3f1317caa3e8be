use serde::{Deserialize, Serialize};

use super::{de_amount, de_opt_amount};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    #[serde(alias = "APPROVED")]
    Approved,
    #[default]
    #[serde(alias = "PENDING")]
    Pending,
    #[serde(alias = "REJECTED")]
    Rejected,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Approved => "approved",
            ProjectStatus::Pending => "pending",
            ProjectStatus::Rejected => "rejected",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProjectStatus::Approved => "승인",
            ProjectStatus::Pending => "대기",
            ProjectStatus::Rejected => "반려",
        }
    }
}

/// Preset contribution tier offered for a project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationOption {
    #[serde(default)]
    pub option_id: Option<u64>,
    #[serde(default)]
    pub project_id: Option<u64>,
    pub option_name: String,
    #[serde(default)]
    pub option_description: Option<String>,
    #[serde(deserialize_with = "de_amount")]
    pub amount: i64,
    #[serde(default)]
    pub icon_emoji: Option<String>,
    #[serde(default)]
    pub display_order: Option<i32>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

impl DonationOption {
    /// Options without an explicit flag count as active
    pub fn active(&self) -> bool {
        self.is_active.unwrap_or(true)
    }
}

/// Project card / list row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub category: String,
    #[serde(default, deserialize_with = "de_amount")]
    pub current_amount: i64,
    #[serde(default, deserialize_with = "de_amount")]
    pub target_amount: i64,
    #[serde(default)]
    pub dday: i64,
    #[serde(default)]
    pub donors: u64,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub organization: String,
    #[serde(default)]
    pub status: ProjectStatus,
    #[serde(default)]
    pub rejection_reason: Option<String>,
    #[serde(default)]
    pub user_id: Option<u64>,
    #[serde(default)]
    pub budget_plan: Option<String>,
    #[serde(default)]
    pub plan_document_url: Option<String>,
    #[serde(default)]
    pub is_plan_public: Option<bool>,
    #[serde(default)]
    pub donation_options: Vec<DonationOption>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationInfo {
    #[serde(default)]
    pub organization_id: u64,
    pub name: String,
    #[serde(default)]
    pub introduction: String,
    #[serde(default)]
    pub website_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectImage {
    pub image_id: u64,
    pub image_url: String,
    #[serde(default)]
    pub caption: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDocument {
    pub document_id: u64,
    pub file_name: String,
    pub file_url: String,
    #[serde(default)]
    pub file_size: u64,
}

/// Full project page payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDetail {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub category: String,
    #[serde(default, deserialize_with = "de_amount")]
    pub current_amount: i64,
    #[serde(default, deserialize_with = "de_amount")]
    pub target_amount: i64,
    #[serde(default)]
    pub dday: i64,
    #[serde(default)]
    pub donors: u64,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: ProjectStatus,
    #[serde(default)]
    pub rejection_reason: Option<String>,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    pub organization: Option<OrganizationInfo>,
    #[serde(default)]
    pub images: Vec<ProjectImage>,
    #[serde(default)]
    pub documents: Vec<ProjectDocument>,
    #[serde(default)]
    pub budget_plan: Option<String>,
    #[serde(default)]
    pub plan_document_url: Option<String>,
    #[serde(default)]
    pub is_plan_public: Option<bool>,
}

impl ProjectDetail {
    pub fn organization_name(&self) -> &str {
        self.organization.as_ref().map(|o| o.name.as_str()).unwrap_or("")
    }
}

/// Donor list row, also used for support messages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Donor {
    pub id: u64,
    pub name: String,
    #[serde(deserialize_with = "de_amount")]
    pub amount: i64,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub is_anonymous: bool,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub category_id: u64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon_name: String,
    #[serde(default)]
    pub color_class: String,
}

/// Sort orders the project list offers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProjectSort {
    #[default]
    Latest,
    Popular,
    Deadline,
    Achievement,
}

impl ProjectSort {
    pub const ALL: [ProjectSort; 4] = [
        ProjectSort::Latest,
        ProjectSort::Popular,
        ProjectSort::Deadline,
        ProjectSort::Achievement,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectSort::Latest => "latest",
            ProjectSort::Popular => "popular",
            ProjectSort::Deadline => "deadline",
            ProjectSort::Achievement => "achievement",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProjectSort::Latest => "최신순",
            ProjectSort::Popular => "인기순",
            ProjectSort::Deadline => "마감임박순",
            ProjectSort::Achievement => "달성률순",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "popular" => ProjectSort::Popular,
            "deadline" => ProjectSort::Deadline,
            "achievement" => ProjectSort::Achievement,
            _ => ProjectSort::Latest,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectFilters {
    pub category: Option<String>,
    pub status: Option<String>,
    pub sort: ProjectSort,
    pub keyword: Option<String>,
    pub page: u32,
    pub size: u32,
}

impl ProjectFilters {
    pub fn query_pairs(&self) -> Vec<(&'static str, Option<String>)> {
        vec![
            ("category", self.category.clone()),
            ("status", self.status.clone()),
            ("sort", Some(self.sort.as_str().to_string())),
            ("keyword", self.keyword.clone()),
            ("page", Some(self.page.to_string())),
            ("size", Some(self.size.max(1).to_string())),
        ]
    }
}

/// Update body for an existing project
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProjectRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_amount: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

/// Returned by image upload endpoints
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedImage {
    pub image_url: String,
}

/// Statistics shown on the home page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsSummary {
    #[serde(default)]
    pub total_projects: u64,
    #[serde(default)]
    pub total_donors: u64,
    #[serde(default, deserialize_with = "de_amount")]
    pub total_donation_amount: i64,
    #[serde(default)]
    pub active_projects: u64,
    #[serde(default)]
    pub completed_projects: u64,
}

/// Favorites page card, resolved from the id list the server keeps
#[derive(Debug, Clone, PartialEq)]
pub struct FavoriteProject {
    pub project_id: u64,
    pub title: String,
    pub image: String,
    pub current_amount: i64,
    pub target_amount: i64,
}

impl From<ProjectDetail> for FavoriteProject {
    fn from(detail: ProjectDetail) -> Self {
        Self {
            project_id: detail.id,
            title: detail.title,
            image: detail.image,
            current_amount: detail.current_amount,
            target_amount: detail.target_amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_from_minimal_json() {
        let json = r#"{"id":3,"title":"아이들에게 급식을","currentAmount":1500000.00,"targetAmount":3000000,"status":"APPROVED"}"#;
        let project: Project = serde_json::from_str(json).unwrap();
        assert_eq!(project.current_amount, 1_500_000);
        assert_eq!(project.status, ProjectStatus::Approved);
        assert!(project.donation_options.is_empty());
    }

    #[test]
    fn test_option_active_default() {
        let json = r#"{"optionName":"급식 1회","amount":10000}"#;
        let option: DonationOption = serde_json::from_str(json).unwrap();
        assert!(option.active());
    }

    #[test]
    fn test_filters_query_pairs() {
        let filters = ProjectFilters {
            category: Some("Education".to_string()),
            sort: ProjectSort::Deadline,
            size: 0,
            ..Default::default()
        };
        let pairs = filters.query_pairs();
        assert!(pairs.contains(&("sort", Some("deadline".to_string()))));
        assert!(pairs.contains(&("size", Some("1".to_string()))));
        assert!(pairs.contains(&("keyword", None)));
    }
}
