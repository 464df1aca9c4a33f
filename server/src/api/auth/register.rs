use super::normalize_email;
use crate::api::users::me::UserResponse;
use crate::api::ErrorResponse;
use crate::auth::hash_password;
use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::{NewUser, User};
use crate::schema::users;
use crate::validation;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use diesel::prelude::*;
use serde::Deserialize;
use utoipa::ToSchema;

pub const MIN_PASSWORD_LEN: usize = 8;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

impl RegisterRequest {
    fn validate(&self) -> AppResult<()> {
        let email = self.email.trim();
        if !email.contains('@') || email.starts_with('@') || email.ends_with('@') {
            return Err(AppError::validation("email is not a valid address"));
        }
        validation::short_text("email", email)?;
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AppError::validation(format!(
                "password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }
        validation::short_text("first_name", &self.first_name)?;
        validation::short_text("last_name", &self.last_name)
    }
}

#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "auth",
    request_body(content = RegisterRequest, example = json!({
        "email": "cook@example.com",
        "password": "correct horse",
        "first_name": "Ada",
        "last_name": "Cook"
    })),
    responses(
        (status = 201, description = "User created successfully", body = UserResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse),
        (status = 422, description = "Invalid request", body = ErrorResponse)
    )
)]
pub async fn register(
    State(pool): State<DbPool>,
    Json(req): Json<RegisterRequest>,
) -> AppResult<impl IntoResponse> {
    req.validate()?;

    let hashed_password = hash_password(&req.password).map_err(|e| {
        tracing::error!("Failed to hash password: {}", e);
        AppError::Internal("Failed to hash password".to_string())
    })?;
    let email = normalize_email(&req.email);

    let mut conn = pool.get()?;
    let user: User = diesel::insert_into(users::table)
        .values(NewUser {
            email: &email,
            hashed_password: &hashed_password,
            first_name: &req.first_name,
            last_name: &req.last_name,
        })
        .returning(User::as_returning())
        .get_result(&mut conn)
        .map_err(|e| AppError::conflict_on_unique(e, "Email already registered"))?;

    tracing::info!(user_id = user.id, "registered user");

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}
