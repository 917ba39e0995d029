use axum::{extract::State, Extension, Json};
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::jwt::{create_token_pair, hash_token, verify_token, TokenPair, TokenType};
use crate::auth::middleware::AuthUser;
use crate::auth::password::verify_password;
use crate::error::{AppError, AppResult};
use crate::handlers::simulate_latency;
use crate::models::user::{RefreshToken, UserProfile};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub company_id: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Deserialize)]
pub struct LogoutRequest {
    pub refresh_token: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
    pub user: UserProfile,
}

/// Company-issued ids are `EMP` followed by exactly three digits.
fn is_valid_company_id(id: &str) -> bool {
    id.len() == 6 && id.starts_with("EMP") && id[3..].chars().all(|c| c.is_ascii_digit())
}

/// Create a token pair AND remember the refresh token hash for rotation.
async fn issue_token_pair(
    state: &AppState,
    user_id: Uuid,
    company_id: &str,
) -> AppResult<TokenPair> {
    let tokens = create_token_pair(user_id, company_id, &state.config)?;
    state
        .store
        .insert_refresh_token(RefreshToken {
            id: Uuid::new_v4(),
            user_id,
            token_hash: hash_token(&tokens.refresh_token),
            expires_at: Utc::now() + Duration::seconds(state.config.jwt_refresh_ttl_secs),
            revoked: false,
            created_at: Utc::now(),
        })
        .await;
    Ok(tokens)
}

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    // Format checks run before any credential lookup; no state is touched
    // on failure.
    if body.company_id.trim().is_empty() {
        return Err(AppError::Validation("Company id is required".into()));
    }
    if !is_valid_company_id(body.company_id.trim()) {
        return Err(AppError::Validation(
            "Invalid company id format (expected e.g. EMP001)".into(),
        ));
    }
    if body.password.is_empty() {
        return Err(AppError::Validation("Password is required".into()));
    }

    simulate_latency(&state.config).await;

    let user = state
        .store
        .find_user_by_company_id(body.company_id.trim())
        .await
        .ok_or(AppError::Unauthorized)?;

    if !verify_password(&body.password, &user.password_hash) {
        return Err(AppError::Unauthorized);
    }

    let tokens = issue_token_pair(&state, user.id, &user.company_id).await?;

    tracing::info!(user_id = %user.id, company_id = %user.company_id, "User logged in");

    Ok(Json(AuthResponse {
        access_token: tokens.access_token,
        refresh_token: tokens.refresh_token,
        expires_in: tokens.expires_in,
        user: user.into(),
    }))
}

/// Rotate a refresh token: the presented token is revoked and a fresh pair
/// is issued.
pub async fn refresh(
    State(state): State<AppState>,
    Json(body): Json<RefreshRequest>,
) -> AppResult<Json<TokenPair>> {
    let token_data = verify_token(&body.refresh_token, &state.config)?;
    if token_data.claims.token_type != TokenType::Refresh {
        return Err(AppError::Unauthorized);
    }

    let token_hash = hash_token(&body.refresh_token);
    let stored = state
        .store
        .find_live_refresh_token(&token_hash, Utc::now())
        .await
        .ok_or(AppError::Unauthorized)?;

    state.store.revoke_refresh_token(&token_hash).await;
    let tokens = issue_token_pair(&state, stored.user_id, &token_data.claims.company_id).await?;

    Ok(Json(tokens))
}

pub async fn logout(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<LogoutRequest>,
) -> AppResult<Json<serde_json::Value>> {
    state
        .store
        .revoke_refresh_token(&hash_token(&body.refresh_token))
        .await;
    tracing::info!(user_id = %auth_user.id, "User logged out");
    Ok(Json(serde_json::json!({ "logged_out": true })))
}

pub async fn me(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<UserProfile>> {
    let user = state
        .store
        .find_user(auth_user.id)
        .await
        .ok_or(AppError::NotFound("User not found".into()))?;
    Ok(Json(user.into()))
}
