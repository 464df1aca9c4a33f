use crate::api::{ErrorResponse, ListParams};
use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::Ingredient;
use crate::queries;
use crate::repositories::{self, NamedInput};
use crate::services;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use utoipa::{IntoParams, OpenApi};

/// Returns the router for /api/ingredients endpoints (mounted at /api/ingredients)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_ingredients).post(create_ingredient))
        .route(
            "/{id}",
            get(get_ingredient)
                .put(update_ingredient)
                .delete(delete_ingredient),
        )
        .route("/{id}/recipes", get(list_ingredient_recipes))
}

#[derive(OpenApi)]
#[openapi(
    paths(
        list_ingredients,
        create_ingredient,
        get_ingredient,
        update_ingredient,
        delete_ingredient,
        list_ingredient_recipes,
    ),
    components(schemas(Ingredient, NamedInput))
)]
pub struct ApiDoc;

#[utoipa::path(
    get,
    path = "/api/ingredients",
    tag = "ingredients",
    params(ListParams),
    responses(
        (status = 200, description = "Ingredients ordered by id", body = Vec<Ingredient>),
        (status = 422, description = "Invalid skip or limit", body = ErrorResponse)
    )
)]
pub async fn list_ingredients(
    State(pool): State<DbPool>,
    Query(params): Query<ListParams>,
) -> AppResult<impl IntoResponse> {
    let (offset, limit) = params.window()?;
    let mut conn = pool.get()?;
    Ok(Json(queries::ingredients::get_all(&mut conn, offset, limit)?))
}

#[utoipa::path(
    post,
    path = "/api/ingredients",
    tag = "ingredients",
    request_body(content = NamedInput, example = json!({"name": "Tomato"})),
    responses(
        (status = 201, description = "Ingredient created successfully", body = Ingredient),
        (status = 409, description = "Name already taken", body = ErrorResponse),
        (status = 422, description = "Invalid request", body = ErrorResponse)
    )
)]
pub async fn create_ingredient(
    State(pool): State<DbPool>,
    Json(input): Json<NamedInput>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let mut conn = pool.get()?;
    let created = repositories::ingredients::create(&mut conn, &input.name)?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get,
    path = "/api/ingredients/{id}",
    tag = "ingredients",
    params(
        ("id" = i32, Path, description = "Ingredient ID")
    ),
    responses(
        (status = 200, description = "Ingredient details", body = Ingredient),
        (status = 404, description = "Ingredient not found", body = ErrorResponse)
    )
)]
pub async fn get_ingredient(
    State(pool): State<DbPool>,
    Path(id): Path<i32>,
) -> AppResult<impl IntoResponse> {
    let mut conn = pool.get()?;
    let found =
        queries::ingredients::get_by_id(&mut conn, id)?
            .ok_or(AppError::NotFound("Ingredient"))?;
    Ok(Json(found))
}

#[utoipa::path(
    put,
    path = "/api/ingredients/{id}",
    tag = "ingredients",
    params(
        ("id" = i32, Path, description = "Ingredient ID")
    ),
    request_body = NamedInput,
    responses(
        (status = 200, description = "Ingredient updated successfully", body = Ingredient),
        (status = 404, description = "Ingredient not found", body = ErrorResponse),
        (status = 409, description = "Name already taken", body = ErrorResponse),
        (status = 422, description = "Invalid request", body = ErrorResponse)
    )
)]
pub async fn update_ingredient(
    State(pool): State<DbPool>,
    Path(id): Path<i32>,
    Json(input): Json<NamedInput>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let mut conn = pool.get()?;
    let updated = repositories::ingredients::update(&mut conn, id, &input.name)?
        .ok_or(AppError::NotFound("Ingredient"))?;
    Ok(Json(updated))
}

#[utoipa::path(
    delete,
    path = "/api/ingredients/{id}",
    tag = "ingredients",
    params(
        ("id" = i32, Path, description = "Ingredient ID")
    ),
    responses(
        (status = 204, description = "Ingredient deleted successfully"),
        (status = 404, description = "Ingredient not found", body = ErrorResponse)
    )
)]
pub async fn delete_ingredient(
    State(pool): State<DbPool>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    let mut conn = pool.get()?;
    if !repositories::ingredients::delete(&mut conn, id)? {
        return Err(AppError::NotFound("Ingredient"));
    }
    tracing::info!(ingredient_id = id, "deleted ingredient");
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct IngredientRecipesQuery {
    /// Comma-separated relation groups to embed: cuisine, author, allergens, ingredients
    pub include: Option<String>,
    /// Comma-separated keys to keep in each recipe object
    pub select: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/ingredients/{id}/recipes",
    tag = "ingredients",
    params(
        ("id" = i32, Path, description = "Ingredient ID"),
        IngredientRecipesQuery
    ),
    responses(
        (status = 200, description = "Recipes using the ingredient", body = Vec<serde_json::Value>),
        (status = 404, description = "Ingredient not found", body = ErrorResponse)
    )
)]
pub async fn list_ingredient_recipes(
    State(pool): State<DbPool>,
    Path(id): Path<i32>,
    Query(query): Query<IngredientRecipesQuery>,
) -> AppResult<impl IntoResponse> {
    let mut conn = pool.get()?;
    let recipes = services::recipes::list_by_ingredient(
        &mut conn,
        id,
        query.include.as_deref(),
        query.select.as_deref(),
    )?;
    Ok(Json(recipes))
}
