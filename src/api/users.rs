//! User Profile Endpoints

use super::{ApiClient, MultipartBody, UploadFile};
use crate::error::ApiResult;
use crate::models::{NotificationSettings, UpdateProfileRequest, UploadedImage, UserProfile};

pub async fn get_my_profile(api: &ApiClient) -> ApiResult<UserProfile> {
    api.get("/users/profile").await
}

pub async fn update_profile(api: &ApiClient, request: &UpdateProfileRequest) -> ApiResult<UserProfile> {
    api.put("/users/profile", request).await
}

pub async fn upload_profile_image(api: &ApiClient, file: UploadFile) -> ApiResult<UploadedImage> {
    api.upload("/users/profile/image", MultipartBody::default().file("file", file)).await
}

pub async fn get_notification_settings(api: &ApiClient) -> ApiResult<NotificationSettings> {
    api.get("/users/notification-settings").await
}

pub async fn update_notification_settings(
    api: &ApiClient,
    settings: &NotificationSettings,
) -> ApiResult<NotificationSettings> {
    api.put("/users/notification-settings", settings).await
}
