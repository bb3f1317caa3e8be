//! Community Endpoints

use serde::Serialize;

use super::{query_string, ApiClient};
use crate::error::ApiResult;
use crate::models::{
    thread_comments, Comment, CreateCommentRequest, CreatePostRequest, LikeCount, PageResponse, Post, PostFilters,
    UpdatePostRequest,
};

#[derive(Serialize)]
struct ContentBody<'a> {
    content: &'a str,
}

// ========================
// Posts
// ========================

pub async fn get_posts(api: &ApiClient, filters: &PostFilters) -> ApiResult<PageResponse<Post>> {
    api.get(&format!("/posts{}", query_string(&filters.query_pairs()))).await
}

pub async fn get_post(api: &ApiClient, id: u64) -> ApiResult<Post> {
    api.get(&format!("/posts/{}", id)).await
}

pub async fn create_post(api: &ApiClient, request: &CreatePostRequest) -> ApiResult<Post> {
    api.post("/posts", request).await
}

pub async fn update_post(api: &ApiClient, id: u64, request: &UpdatePostRequest) -> ApiResult<Post> {
    api.put(&format!("/posts/{}", id), request).await
}

pub async fn delete_post(api: &ApiClient, id: u64) -> ApiResult<()> {
    api.delete(&format!("/posts/{}", id)).await
}

pub async fn like_post(api: &ApiClient, id: u64) -> ApiResult<u64> {
    let count: LikeCount = api.post_empty(&format!("/posts/{}/like", id)).await?;
    Ok(count.like_count)
}

// ========================
// Comments
// ========================

/// Comments with replies nested under their parent
pub async fn get_comments(api: &ApiClient, post_id: u64) -> ApiResult<Vec<Comment>> {
    let comments: Vec<Comment> = api.get(&format!("/posts/{}/comments", post_id)).await?;
    Ok(thread_comments(comments))
}

pub async fn create_comment(api: &ApiClient, post_id: u64, request: &CreateCommentRequest) -> ApiResult<Comment> {
    api.post(&format!("/posts/{}/comments", post_id), request).await
}

pub async fn update_comment(api: &ApiClient, id: u64, content: &str) -> ApiResult<Comment> {
    api.put(&format!("/comments/{}", id), &ContentBody { content }).await
}

pub async fn delete_comment(api: &ApiClient, id: u64) -> ApiResult<()> {
    api.delete(&format!("/comments/{}", id)).await
}

pub async fn like_comment(api: &ApiClient, id: u64) -> ApiResult<u64> {
    let count: LikeCount = api.post_empty(&format!("/comments/{}/like", id)).await?;
    Ok(count.like_count)
}
