use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::queries;
use crate::repositories::recipes::{self, UpdateRecipeRequest};
use crate::services::recipes::{compose_full, RecipeResponse};
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};

#[utoipa::path(
    put,
    path = "/api/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = i32, Path, description = "Recipe ID")
    ),
    request_body = UpdateRecipeRequest,
    responses(
        (status = 200, description = "Recipe updated successfully", body = RecipeResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Only the author may edit a recipe", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse),
        (status = 422, description = "Invalid request", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_recipe(
    AuthUser(user): AuthUser,
    State(pool): State<DbPool>,
    Path(id): Path<i32>,
    Json(request): Json<UpdateRecipeRequest>,
) -> AppResult<impl IntoResponse> {
    let mut conn = pool.get()?;

    let existing =
        queries::recipes::get_by_id(&mut conn, id)?.ok_or(AppError::NotFound("Recipe"))?;
    if existing.author_id != user.id {
        return Err(AppError::Forbidden("Only the author may edit this recipe"));
    }
    request.validate()?;

    let recipe = recipes::update(&mut conn, id, &request)?.ok_or(AppError::NotFound("Recipe"))?;
    Ok(Json(compose_full(&mut conn, recipe)?))
}
