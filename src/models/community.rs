use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum PostType {
    Notice,
    Question,
    Support,
    #[default]
    General,
}

impl PostType {
    pub const ALL: [PostType; 4] = [PostType::Notice, PostType::Question, PostType::Support, PostType::General];

    pub fn as_str(&self) -> &'static str {
        match self {
            PostType::Notice => "NOTICE",
            PostType::Question => "QUESTION",
            PostType::Support => "SUPPORT",
            PostType::General => "GENERAL",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PostType::Notice => "공지",
            PostType::Question => "질문",
            PostType::Support => "응원",
            PostType::General => "일반",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str().eq_ignore_ascii_case(s))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub user_id: u64,
    pub user_name: String,
    #[serde(default)]
    pub user_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostImage {
    pub image_id: u64,
    pub image_url: String,
    #[serde(default)]
    pub caption: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub post_id: u64,
    #[serde(rename = "type", default)]
    pub post_type: PostType,
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub author: Author,
    #[serde(default)]
    pub view_count: u64,
    #[serde(default)]
    pub like_count: u64,
    #[serde(default)]
    pub comment_count: u64,
    #[serde(default)]
    pub is_pinned: bool,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub images: Vec<PostImage>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub comment_id: u64,
    #[serde(default)]
    pub post_id: u64,
    pub content: String,
    pub author: Author,
    #[serde(default)]
    pub like_count: u64,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub parent_comment_id: Option<u64>,
    #[serde(default)]
    pub replies: Vec<Comment>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    #[serde(rename = "type")]
    pub post_type: PostType,
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePostRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_comment_id: Option<u64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeCount {
    pub like_count: u64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostFilters {
    pub post_type: Option<PostType>,
    pub keyword: Option<String>,
    pub page: u32,
    pub size: u32,
}

impl PostFilters {
    pub fn query_pairs(&self) -> Vec<(&'static str, Option<String>)> {
        vec![
            ("type", self.post_type.map(|t| t.as_str().to_string())),
            ("keyword", self.keyword.clone()),
            ("page", Some(self.page.to_string())),
            ("size", Some(self.size.max(1).to_string())),
        ]
    }
}

/// Pinned posts first, then newest first; stable otherwise
pub fn order_posts(posts: &mut [Post]) {
    posts.sort_by(|a, b| {
        b.is_pinned
            .cmp(&a.is_pinned)
            .then_with(|| b.created_at.cmp(&a.created_at))
    });
}

/// Rebuild one level of threading when the server returns a flat list
pub fn thread_comments(comments: Vec<Comment>) -> Vec<Comment> {
    if comments.iter().all(|c| c.parent_comment_id.is_none()) {
        return comments;
    }
    let (mut roots, replies): (Vec<Comment>, Vec<Comment>) =
        comments.into_iter().partition(|c| c.parent_comment_id.is_none());
    let mut orphans = Vec::new();
    for reply in replies {
        match roots
            .iter_mut()
            .find(|root| Some(root.comment_id) == reply.parent_comment_id)
        {
            Some(root) => root.replies.push(reply),
            None => orphans.push(reply),
        }
    }
    // Replies whose parent is gone still show at top level
    roots.extend(orphans);
    roots
}

#[cfg(test)]
mod tests {
    use super::*;

    fn author() -> Author {
        Author { user_id: 1, user_name: "작성자".to_string(), user_type: "individual".to_string() }
    }

    fn make_post(id: u64, pinned: bool, created_at: &str) -> Post {
        Post {
            post_id: id,
            post_type: PostType::General,
            title: format!("Post {}", id),
            content: String::new(),
            author: author(),
            view_count: 0,
            like_count: 0,
            comment_count: 0,
            is_pinned: pinned,
            created_at: created_at.to_string(),
            updated_at: None,
            images: vec![],
        }
    }

    fn make_comment(id: u64, parent: Option<u64>) -> Comment {
        Comment {
            comment_id: id,
            post_id: 1,
            content: format!("Comment {}", id),
            author: author(),
            like_count: 0,
            created_at: String::new(),
            updated_at: None,
            parent_comment_id: parent,
            replies: vec![],
        }
    }

    #[test]
    fn test_order_posts_pinned_first() {
        let mut posts = vec![
            make_post(1, false, "2024-01-03T00:00:00"),
            make_post(2, true, "2024-01-01T00:00:00"),
            make_post(3, false, "2024-01-05T00:00:00"),
        ];
        order_posts(&mut posts);
        let ids: Vec<u64> = posts.iter().map(|p| p.post_id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn test_thread_flat_comments() {
        let threaded = thread_comments(vec![
            make_comment(1, None),
            make_comment(2, Some(1)),
            make_comment(3, None),
            make_comment(4, Some(99)),
        ]);
        assert_eq!(threaded.len(), 3);
        assert_eq!(threaded[0].replies.len(), 1);
        assert_eq!(threaded[0].replies[0].comment_id, 2);
        assert_eq!(threaded[2].comment_id, 4);
    }

    #[test]
    fn test_post_type_parse() {
        assert_eq!(PostType::from_str("notice"), Some(PostType::Notice));
        assert_eq!(PostType::from_str("unknown"), None);
    }
}
