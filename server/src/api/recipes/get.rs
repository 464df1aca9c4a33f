use crate::api::ErrorResponse;
use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::queries;
use crate::services::recipes::{compose_full, RecipeResponse};
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};

#[utoipa::path(
    get,
    path = "/api/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = i32, Path, description = "Recipe ID")
    ),
    responses(
        (status = 200, description = "Recipe details", body = RecipeResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    )
)]
pub async fn get_recipe(
    State(pool): State<DbPool>,
    Path(id): Path<i32>,
) -> AppResult<impl IntoResponse> {
    let mut conn = pool.get()?;
    let recipe = queries::recipes::get_by_id(&mut conn, id)?.ok_or(AppError::NotFound("Recipe"))?;
    Ok(Json(compose_full(&mut conn, recipe)?))
}
