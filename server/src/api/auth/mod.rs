pub mod login;
pub mod logout;
pub mod register;

use crate::AppState;
use axum::routing::post;
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for /api/auth endpoints (mounted at /api/auth)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register::register))
        .route("/login", post(login::login))
        .route("/logout", post(logout::logout))
}

#[derive(OpenApi)]
#[openapi(
    paths(register::register, login::login, logout::logout),
    components(schemas(
        register::RegisterRequest,
        login::LoginRequest,
        login::LoginResponse,
    ))
)]
pub struct ApiDoc;

/// Emails are matched case-insensitively.
pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
