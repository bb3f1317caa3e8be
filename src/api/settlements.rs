//! Settlement Endpoints

use super::{query_string, ApiClient, MultipartBody, UploadFile};
use crate::error::ApiResult;
use crate::models::{
    CreateSettlementRequest, PageResponse, Settlement, SettlementFilters, SettlementHistory, UploadedDocument,
};

pub async fn create_settlement(api: &ApiClient, request: &CreateSettlementRequest) -> ApiResult<Settlement> {
    api.post("/settlements", request).await
}

pub async fn get_my_settlements(api: &ApiClient, filters: &SettlementFilters) -> ApiResult<PageResponse<Settlement>> {
    api.get(&format!("/settlements{}", query_string(&filters.query_pairs()))).await
}

pub async fn get_settlement(api: &ApiClient, id: u64) -> ApiResult<Settlement> {
    api.get(&format!("/settlements/{}", id)).await
}

pub async fn get_settlement_history(api: &ApiClient) -> ApiResult<Vec<SettlementHistory>> {
    api.get("/settlements/history").await
}

pub async fn upload_settlement_document(api: &ApiClient, id: u64, file: UploadFile) -> ApiResult<UploadedDocument> {
    let body = MultipartBody::default().file("file", file);
    api.upload(&format!("/settlements/{}/documents", id), body).await
}
