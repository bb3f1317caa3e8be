//! Piggy Bank Endpoints

use super::{query_string, ApiClient};
use crate::error::ApiResult;
use crate::models::{PageResponse, PiggyBank, Transaction};

pub async fn get_my_piggy_banks(api: &ApiClient) -> ApiResult<Vec<PiggyBank>> {
    api.get("/piggy-banks").await
}

pub async fn get_piggy_bank(api: &ApiClient, id: u64) -> ApiResult<PiggyBank> {
    api.get(&format!("/piggy-banks/{}", id)).await
}

pub async fn get_piggy_bank_transactions(
    api: &ApiClient,
    id: u64,
    kind: Option<&str>,
    page: u32,
    size: u32,
) -> ApiResult<PageResponse<Transaction>> {
    let query = query_string(&[
        ("type", kind.map(str::to_string)),
        ("page", Some(page.to_string())),
        ("size", Some(size.max(1).to_string())),
    ]);
    api.get(&format!("/piggy-banks/{}/transactions{}", id, query)).await
}
