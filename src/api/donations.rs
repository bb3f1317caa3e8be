//! Donation History Endpoints

use super::{encode_component, query_string, ApiClient};
use crate::error::ApiResult;
use crate::models::{DonationFilters, DonationHistory, PageResponse, Receipt, RecentDonation};

pub async fn get_my_donations(api: &ApiClient, filters: &DonationFilters) -> ApiResult<PageResponse<DonationHistory>> {
    api.get(&format!("/donations/my{}", query_string(&filters.query_pairs()))).await
}

pub async fn get_recent_donations(api: &ApiClient, limit: u32) -> ApiResult<Vec<RecentDonation>> {
    api.get(&format!("/donations/recent?limit={}", limit)).await
}

pub async fn get_receipt(api: &ApiClient, receipt_number: &str) -> ApiResult<Receipt> {
    api.get(&format!("/receipts/{}", encode_component(receipt_number))).await
}
