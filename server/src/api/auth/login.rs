use super::normalize_email;
use crate::api::ErrorResponse;
use crate::auth::{create_session, verify_password};
use crate::config::Settings;
use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::queries;
use axum::{extract::State, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub access_token: String,
    /// Always `bearer`
    pub token_type: String,
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "auth",
    request_body(content = LoginRequest, example = json!({"email": "cook@example.com", "password": "correct horse"})),
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse)
    )
)]
pub async fn login(
    State(pool): State<DbPool>,
    State(settings): State<Arc<Settings>>,
    Json(req): Json<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    let mut conn = pool.get()?;

    let user = queries::users::get_by_email(&mut conn, &normalize_email(&req.email))?
        .ok_or(AppError::InvalidCredentials)?;

    // Inactive accounts get the same answer as a wrong password
    if !user.is_active || !verify_password(&req.password, &user.hashed_password) {
        return Err(AppError::InvalidCredentials);
    }

    let access_token =
        create_session(&mut conn, user.id, settings.access_token.lifetime_seconds)?;

    Ok(Json(LoginResponse {
        access_token,
        token_type: "bearer".to_string(),
    }))
}
