//! Admin Endpoints
//!
//! Back-office lists and approval actions. Only admin sessions reach these;
//! the server enforces it again.

use serde::Serialize;

use super::{query_string, ApiClient};
use crate::error::ApiResult;
use crate::models::{
    AdminDashboard, AdminListFilters, AdminUser, ApprovalRequest, CategoryShare, Metrics, MetricsPeriod,
    PageResponse, Project, RejectionRequest, Settlement, UserStatus,
};

#[derive(Serialize)]
struct StatusBody {
    status: UserStatus,
}

// ========================
// Dashboard & Metrics
// ========================

pub async fn get_admin_dashboard(api: &ApiClient) -> ApiResult<AdminDashboard> {
    api.get("/admin/dashboard").await
}

pub async fn get_metrics(api: &ApiClient, period: MetricsPeriod) -> ApiResult<Metrics> {
    api.get(&format!("/admin/metrics/{}", period.as_str())).await
}

pub async fn get_category_distribution(api: &ApiClient) -> ApiResult<Vec<CategoryShare>> {
    api.get("/admin/metrics/category-distribution").await
}

// ========================
// Projects
// ========================

pub async fn get_admin_projects(api: &ApiClient, filters: &AdminListFilters) -> ApiResult<PageResponse<Project>> {
    api.get(&format!("/admin/projects{}", query_string(&filters.query_pairs()))).await
}

pub async fn approve_project(api: &ApiClient, id: u64, note: Option<String>) -> ApiResult<()> {
    api.put_no_content(&format!("/admin/projects/{}/approve", id), &ApprovalRequest { approval_note: note }).await
}

pub async fn reject_project(api: &ApiClient, id: u64, reason: &str) -> ApiResult<()> {
    let body = RejectionRequest { rejection_reason: reason.to_string() };
    api.put_no_content(&format!("/admin/projects/{}/reject", id), &body).await
}

// ========================
// Users
// ========================

pub async fn get_admin_users(api: &ApiClient, filters: &AdminListFilters) -> ApiResult<PageResponse<AdminUser>> {
    api.get(&format!("/admin/users{}", query_string(&filters.query_pairs()))).await
}

pub async fn update_user_status(api: &ApiClient, id: u64, status: UserStatus) -> ApiResult<()> {
    api.put_no_content(&format!("/admin/users/{}/status", id), &StatusBody { status }).await
}

// ========================
// Settlements
// ========================

pub async fn get_admin_settlements(api: &ApiClient, filters: &AdminListFilters) -> ApiResult<PageResponse<Settlement>> {
    api.get(&format!("/admin/settlements{}", query_string(&filters.query_pairs()))).await
}

pub async fn approve_settlement(api: &ApiClient, id: u64, note: Option<String>) -> ApiResult<()> {
    api.put_no_content(&format!("/admin/settlements/{}/approve", id), &ApprovalRequest { approval_note: note }).await
}

pub async fn reject_settlement(api: &ApiClient, id: u64, reason: &str) -> ApiResult<()> {
    let body = RejectionRequest { rejection_reason: reason.to_string() };
    api.put_no_content(&format!("/admin/settlements/{}/reject", id), &body).await
}

pub async fn complete_settlement(api: &ApiClient, id: u64) -> ApiResult<()> {
    api.put_empty_no_content(&format!("/admin/settlements/{}/complete", id)).await
}
