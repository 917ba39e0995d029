use std::collections::HashSet;

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::auth::middleware::AuthUser;
use crate::error::{AppError, AppResult};
use crate::handlers::simulate_latency;
use crate::models::community::{
    BlockUserRequest, CommunityPost, CommunityPostView, CreatePostRequest,
};
use crate::AppState;

/// Feed visible to the caller: blocked authors filtered out, newest first.
pub async fn list_posts(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<Vec<CommunityPostView>>> {
    Ok(Json(state.store.community_posts_for(auth_user.id).await))
}

pub async fn create_post(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<CreatePostRequest>,
) -> AppResult<Json<CommunityPostView>> {
    body.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    if body.content.trim().is_empty() {
        return Err(AppError::Validation("Content must not be blank".into()));
    }

    let user = state
        .store
        .find_user(auth_user.id)
        .await
        .ok_or(AppError::Unauthorized)?;

    simulate_latency(&state.config).await;

    let post = CommunityPost {
        id: Uuid::new_v4(),
        user_id: user.id,
        nickname: user.nickname,
        content: body.content,
        created_at: Utc::now(),
        liked_by: HashSet::new(),
        comment_count: 0,
    };
    let view = post.view_for(auth_user.id);
    state.store.add_community_post(post).await;

    Ok(Json(view))
}

pub async fn toggle_like(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(post_id): Path<Uuid>,
) -> AppResult<Json<CommunityPostView>> {
    state
        .store
        .toggle_like(auth_user.id, post_id)
        .await
        .map(Json)
        .ok_or(AppError::NotFound("Post not found".into()))
}

/// Idempotent delete, restricted to the post's author.
pub async fn delete_post(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(post_id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    match state.store.delete_community_post(auth_user.id, post_id).await {
        Ok(_) => Ok(Json(serde_json::json!({ "deleted": true }))),
        Err(()) => Err(AppError::Forbidden),
    }
}

/// Mock moderation intake: always acknowledges, nothing is queued.
pub async fn flag_post(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(post_id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    tracing::info!(user_id = %auth_user.id, post_id = %post_id, "Post flagged");
    Ok(Json(serde_json::json!({
        "flagged": true,
        "review_within_hours": 24,
    })))
}

/// Hide every post by the given author for the caller.
pub async fn block_user(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<BlockUserRequest>,
) -> AppResult<Json<serde_json::Value>> {
    if body.user_id == auth_user.id {
        return Err(AppError::Validation("Cannot block yourself".into()));
    }
    state.store.block_user(auth_user.id, body.user_id).await;
    Ok(Json(serde_json::json!({ "blocked": true })))
}
