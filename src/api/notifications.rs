//! Notification Endpoints
//!
//! Read and delete calls answer with a plain-text status line.

use super::ApiClient;
use crate::error::ApiResult;
use crate::models::{Notification, UnreadCount};

pub async fn get_my_notifications(api: &ApiClient) -> ApiResult<Vec<Notification>> {
    api.get("/notifications").await
}

pub async fn get_unread_count(api: &ApiClient) -> ApiResult<u64> {
    let count: UnreadCount = api.get("/notifications/unread-count").await?;
    Ok(count.count)
}

pub async fn mark_as_read(api: &ApiClient, id: u64) -> ApiResult<()> {
    api.put_empty_no_content(&format!("/notifications/{}/read", id)).await
}

pub async fn mark_all_as_read(api: &ApiClient) -> ApiResult<()> {
    api.put_empty_no_content("/notifications/read-all").await
}

pub async fn delete_notification(api: &ApiClient, id: u64) -> ApiResult<()> {
    api.delete(&format!("/notifications/{}", id)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::decode_status;

    #[test]
    fn test_status_replies_decode_as_success() {
        for reply in ["알림을 읽음으로 표시했습니다.", "모든 알림을 읽음으로 표시했습니다.", "알림이 삭제되었습니다."] {
            assert_eq!(decode_status(reply), Ok(()));
        }
    }

    #[test]
    fn test_unread_count_body() {
        let count: UnreadCount = crate::api::decode_body(r#"{"count":4}"#).unwrap();
        assert_eq!(count.count, 4);
    }
}
