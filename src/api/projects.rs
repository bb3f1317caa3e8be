//! Project Endpoints
//!
//! Lists and details come back bare; creation, donation options and
//! favorites use the `{ success, data, ... }` envelope.

use futures::future::join_all;

use super::{query_string, ApiClient, MultipartBody};
use crate::error::ApiResult;
use crate::models::{
    Category, DonationOption, Donor, FavoriteProject, PageResponse, Project, ProjectDetail, ProjectFilters,
    UpdateProjectRequest,
};

pub async fn get_projects(api: &ApiClient, filters: &ProjectFilters) -> ApiResult<PageResponse<Project>> {
    api.get(&format!("/projects{}", query_string(&filters.query_pairs()))).await
}

pub async fn get_popular_projects(api: &ApiClient, limit: u32) -> ApiResult<Vec<Project>> {
    api.get(&format!("/projects/popular?limit={}", limit)).await
}

pub async fn get_project(api: &ApiClient, id: u64) -> ApiResult<ProjectDetail> {
    api.get(&format!("/projects/{}", id)).await
}

/// Create a project from the wizard's multipart body
pub async fn create_project(api: &ApiClient, body: MultipartBody) -> ApiResult<Project> {
    api.upload_enveloped("/projects", body).await
}

pub async fn update_project(api: &ApiClient, id: u64, request: &UpdateProjectRequest) -> ApiResult<Project> {
    api.put(&format!("/projects/{}", id), request).await
}

pub async fn delete_project(api: &ApiClient, id: u64) -> ApiResult<()> {
    api.delete(&format!("/projects/{}", id)).await
}

pub async fn get_project_donors(api: &ApiClient, id: u64, show_anonymous: bool) -> ApiResult<Vec<Donor>> {
    api.get(&format!("/projects/{}/donors?showAnonymous={}", id, show_anonymous)).await
}

pub async fn get_project_messages(api: &ApiClient, id: u64) -> ApiResult<Vec<Donor>> {
    api.get(&format!("/projects/{}/messages", id)).await
}

/// Active options in display order
pub async fn get_donation_options(api: &ApiClient, id: u64) -> ApiResult<Vec<DonationOption>> {
    let options: Vec<DonationOption> = api.get_enveloped(&format!("/projects/{}/options", id)).await?;
    Ok(sort_options(options))
}

pub fn sort_options(options: Vec<DonationOption>) -> Vec<DonationOption> {
    let mut options: Vec<DonationOption> = options.into_iter().filter(|o| o.active()).collect();
    options.sort_by_key(|o| o.display_order.unwrap_or(i32::MAX));
    options
}

pub async fn get_categories(api: &ApiClient) -> ApiResult<Vec<Category>> {
    api.get("/categories").await
}

pub async fn toggle_favorite_project(api: &ApiClient, id: u64) -> ApiResult<()> {
    api.post_empty_no_content(&format!("/projects/{}/favorite", id)).await
}

/// Ids of the projects the current user favorited
pub async fn get_favorite_project_ids(api: &ApiClient) -> ApiResult<Vec<u64>> {
    api.get_enveloped("/favorites/projects").await
}

/// Cards for every favorited project, in favorite order
pub async fn get_favorite_projects(api: &ApiClient) -> ApiResult<Vec<FavoriteProject>> {
    let ids = get_favorite_project_ids(api).await?;
    let details = join_all(ids.iter().map(|&id| get_project(api, id))).await;
    Ok(collect_favorites(&ids, details))
}

/// Projects that no longer load (deleted, hidden) are left out
fn collect_favorites(ids: &[u64], details: Vec<ApiResult<ProjectDetail>>) -> Vec<FavoriteProject> {
    ids.iter()
        .zip(details)
        .filter_map(|(id, detail)| match detail {
            Ok(detail) => Some(FavoriteProject::from(detail)),
            Err(e) => {
                log::warn!("favorite project {} skipped: {}", id, e);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{decode_body, unwrap_envelope};
    use crate::error::ApiError;

    fn option(name: &str, order: Option<i32>, active: Option<bool>) -> DonationOption {
        DonationOption {
            option_id: None,
            project_id: None,
            option_name: name.to_string(),
            option_description: None,
            amount: 10000,
            icon_emoji: None,
            display_order: order,
            is_active: active,
        }
    }

    fn detail(id: u64, title: &str) -> ProjectDetail {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "title": title,
            "currentAmount": 250000.00,
            "targetAmount": 1000000,
            "organization": null
        }))
        .unwrap()
    }

    #[test]
    fn test_options_come_in_envelope() {
        let body = r#"{"success":true,"message":"기부 옵션 조회 성공","data":[
            {"optionId":2,"projectId":7,"optionName":"한 끼","amount":10000,"displayOrder":2,"isActive":true},
            {"optionId":1,"projectId":7,"optionName":"한 달","amount":300000,"displayOrder":1,"isActive":true}
        ],"errorCode":null}"#;
        let envelope = decode_body(body).unwrap();
        let options: Vec<DonationOption> = sort_options(unwrap_envelope(envelope).unwrap());
        let names: Vec<&str> = options.iter().map(|o| o.option_name.as_str()).collect();
        assert_eq!(names, vec!["한 달", "한 끼"]);
    }

    #[test]
    fn test_favorite_ids_come_in_envelope() {
        let body = r#"{"success":true,"message":"관심 프로젝트 목록 조회 성공","data":[3,7,12],"errorCode":null}"#;
        let ids: Vec<u64> = unwrap_envelope(decode_body(body).unwrap()).unwrap();
        assert_eq!(ids, vec![3, 7, 12]);
    }

    #[test]
    fn test_created_project_comes_in_envelope() {
        let body = r#"{"success":true,"message":"프로젝트가 등록되었습니다","data":
            {"id":41,"title":"겨울 난방비 지원","category":"Welfare","currentAmount":0,"targetAmount":5000000.00,"dday":30}}"#;
        let project: Project = unwrap_envelope(decode_body(body).unwrap()).unwrap();
        assert_eq!(project.id, 41);
        assert_eq!(project.target_amount, 5_000_000);
    }

    #[test]
    fn test_collect_favorites_skips_failed_lookups() {
        let favorites = collect_favorites(
            &[3, 7, 12],
            vec![Ok(detail(3, "급식")), Err(ApiError::NotFound), Ok(detail(12, "교육"))],
        );
        let ids: Vec<u64> = favorites.iter().map(|f| f.project_id).collect();
        assert_eq!(ids, vec![3, 12]);
        assert_eq!(favorites[0].current_amount, 250_000);
    }

    #[test]
    fn test_sort_options_filters_inactive() {
        let sorted = sort_options(vec![
            option("c", None, None),
            option("a", Some(1), Some(true)),
            option("hidden", Some(0), Some(false)),
            option("b", Some(2), None),
        ]);
        let names: Vec<&str> = sorted.iter().map(|o| o.option_name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }
}
