use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Stored post. Likes are kept as the set of liking user ids so the post
/// itself stays viewer-neutral; the viewer-relative shape is
/// [`CommunityPostView`].
#[derive(Debug, Clone)]
pub struct CommunityPost {
    pub id: Uuid,
    pub user_id: Uuid,
    /// Denormalized author nickname at posting time.
    pub nickname: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub liked_by: HashSet<Uuid>,
    pub comment_count: usize,
}

impl CommunityPost {
    pub fn view_for(&self, viewer: Uuid) -> CommunityPostView {
        CommunityPostView {
            id: self.id,
            user_id: self.user_id,
            nickname: self.nickname.clone(),
            content: self.content.clone(),
            created_at: self.created_at,
            likes: self.liked_by.len(),
            comment_count: self.comment_count,
            is_liked: self.liked_by.contains(&viewer),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CommunityPostView {
    pub id: Uuid,
    pub user_id: Uuid,
    pub nickname: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub likes: usize,
    pub comment_count: usize,
    pub is_liked: bool,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreatePostRequest {
    #[validate(length(min = 1, max = 500, message = "Content must be 1-500 characters"))]
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct BlockUserRequest {
    pub user_id: Uuid,
}
