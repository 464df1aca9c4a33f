use crate::api::ErrorResponse;
use crate::db::DbPool;
use crate::error::AppResult;
use crate::services::pagination::{Page, PageParams, PageRequest};
use crate::services::recipes::{self, RecipeResponse};
use axum::{extract::State, response::IntoResponse, Json};
use axum_extra::extract::Query;
use serde::Deserialize;
use utoipa::IntoParams;

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaginatedQuery {
    /// Case-insensitive substring of the title
    #[serde(rename = "name__like")]
    pub name_like: Option<String>,
    /// Keep recipes using any of these ingredients (repeatable)
    #[serde(default)]
    pub ingredient_id: Vec<i32>,
    /// Recipe column to order by, `-` prefix for descending (default `-id`)
    pub sort: Option<String>,
    /// Page number, starting at 1
    #[param(minimum = 1)]
    pub page: Option<i64>,
    /// Items per page (default 50, max 100)
    #[param(minimum = 1, maximum = 100)]
    pub size: Option<i64>,
}

#[utoipa::path(
    get,
    path = "/api/recipes/paginated",
    tag = "recipes",
    params(PaginatedQuery),
    responses(
        (status = 200, description = "One page of recipes", body = Page<RecipeResponse>),
        (status = 422, description = "Invalid page or size", body = ErrorResponse)
    )
)]
pub async fn list_recipes_paginated(
    State(pool): State<DbPool>,
    Query(query): Query<PaginatedQuery>,
) -> AppResult<impl IntoResponse> {
    let page = PageRequest::try_from(PageParams {
        page: query.page,
        size: query.size,
    })?;

    let mut conn = pool.get()?;
    let result = recipes::list_paginated(
        &mut conn,
        query.name_like.as_deref(),
        &query.ingredient_id,
        query.sort.as_deref(),
        page,
    )?;

    Ok(Json(result))
}
