use crate::api::{ErrorResponse, ListParams};
use crate::db::DbPool;
use crate::error::AppResult;
use crate::queries;
use crate::services::recipes::{compose_full_many, RecipeResponse};
use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};

#[utoipa::path(
    get,
    path = "/api/recipes",
    tag = "recipes",
    params(ListParams),
    responses(
        (status = 200, description = "Recipes ordered by id", body = Vec<RecipeResponse>),
        (status = 422, description = "Invalid skip or limit", body = ErrorResponse)
    )
)]
pub async fn list_recipes(
    State(pool): State<DbPool>,
    Query(params): Query<ListParams>,
) -> AppResult<impl IntoResponse> {
    let (offset, limit) = params.window()?;

    let mut conn = pool.get()?;
    let rows = queries::recipes::get_all(&mut conn, offset, limit)?;
    Ok(Json(compose_full_many(&mut conn, rows)?))
}
