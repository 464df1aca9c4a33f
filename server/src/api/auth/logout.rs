use crate::api::ErrorResponse;
use crate::auth::{bearer_token, delete_session, AuthUser};
use crate::db::DbPool;
use crate::error::AppResult;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
};

#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = "auth",
    responses(
        (status = 204, description = "Session ended"),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn logout(
    AuthUser(user): AuthUser,
    State(pool): State<DbPool>,
    headers: HeaderMap,
) -> AppResult<StatusCode> {
    let mut conn = pool.get()?;
    if let Ok(token) = bearer_token(&headers) {
        delete_session(&mut conn, token)?;
    }
    tracing::info!(user_id = user.id, "logged out");
    Ok(StatusCode::NO_CONTENT)
}
