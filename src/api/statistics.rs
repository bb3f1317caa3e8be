//! Statistics Endpoints

use super::ApiClient;
use crate::error::ApiResult;
use crate::models::StatisticsSummary;

pub async fn get_statistics_summary(api: &ApiClient) -> ApiResult<StatisticsSummary> {
    api.get("/statistics/summary").await
}
