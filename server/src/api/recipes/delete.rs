use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::queries;
use crate::repositories::recipes;
use axum::{
    extract::{Path, State},
    http::StatusCode,
};

#[utoipa::path(
    delete,
    path = "/api/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = i32, Path, description = "Recipe ID")
    ),
    responses(
        (status = 204, description = "Recipe deleted successfully"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Only the author may delete a recipe", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_recipe(
    AuthUser(user): AuthUser,
    State(pool): State<DbPool>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    let mut conn = pool.get()?;

    let existing =
        queries::recipes::get_by_id(&mut conn, id)?.ok_or(AppError::NotFound("Recipe"))?;
    if existing.author_id != user.id {
        return Err(AppError::Forbidden("Only the author may delete this recipe"));
    }

    if !recipes::delete(&mut conn, id)? {
        return Err(AppError::NotFound("Recipe"));
    }
    tracing::info!(recipe_id = id, author_id = user.id, "deleted recipe");

    Ok(StatusCode::NO_CONTENT)
}
