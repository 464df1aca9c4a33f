use crate::api::{ErrorResponse, ListParams};
use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::Cuisine;
use crate::queries;
use crate::repositories::{self, NamedInput};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use utoipa::OpenApi;

/// Returns the router for /api/cuisines endpoints (mounted at /api/cuisines)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_cuisines).post(create_cuisine))
        .route(
            "/{id}",
            get(get_cuisine)
                .put(update_cuisine)
                .delete(delete_cuisine),
        )
}

#[derive(OpenApi)]
#[openapi(
    paths(
        list_cuisines,
        create_cuisine,
        get_cuisine,
        update_cuisine,
        delete_cuisine,
    ),
    components(schemas(Cuisine, NamedInput))
)]
pub struct ApiDoc;

#[utoipa::path(
    get,
    path = "/api/cuisines",
    tag = "cuisines",
    params(ListParams),
    responses(
        (status = 200, description = "Cuisines ordered by id", body = Vec<Cuisine>),
        (status = 422, description = "Invalid skip or limit", body = ErrorResponse)
    )
)]
pub async fn list_cuisines(
    State(pool): State<DbPool>,
    Query(params): Query<ListParams>,
) -> AppResult<impl IntoResponse> {
    let (offset, limit) = params.window()?;
    let mut conn = pool.get()?;
    Ok(Json(queries::cuisines::get_all(&mut conn, offset, limit)?))
}

#[utoipa::path(
    post,
    path = "/api/cuisines",
    tag = "cuisines",
    request_body(content = NamedInput, example = json!({"name": "Italian"})),
    responses(
        (status = 201, description = "Cuisine created successfully", body = Cuisine),
        (status = 409, description = "Name already taken", body = ErrorResponse),
        (status = 422, description = "Invalid request", body = ErrorResponse)
    )
)]
pub async fn create_cuisine(
    State(pool): State<DbPool>,
    Json(input): Json<NamedInput>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let mut conn = pool.get()?;
    let created = repositories::cuisines::create(&mut conn, &input.name)?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get,
    path = "/api/cuisines/{id}",
    tag = "cuisines",
    params(
        ("id" = i32, Path, description = "Cuisine ID")
    ),
    responses(
        (status = 200, description = "Cuisine details", body = Cuisine),
        (status = 404, description = "Cuisine not found", body = ErrorResponse)
    )
)]
pub async fn get_cuisine(
    State(pool): State<DbPool>,
    Path(id): Path<i32>,
) -> AppResult<impl IntoResponse> {
    let mut conn = pool.get()?;
    let found =
        queries::cuisines::get_by_id(&mut conn, id)?
            .ok_or(AppError::NotFound("Cuisine"))?;
    Ok(Json(found))
}

#[utoipa::path(
    put,
    path = "/api/cuisines/{id}",
    tag = "cuisines",
    params(
        ("id" = i32, Path, description = "Cuisine ID")
    ),
    request_body = NamedInput,
    responses(
        (status = 200, description = "Cuisine updated successfully", body = Cuisine),
        (status = 404, description = "Cuisine not found", body = ErrorResponse),
        (status = 409, description = "Name already taken", body = ErrorResponse),
        (status = 422, description = "Invalid request", body = ErrorResponse)
    )
)]
pub async fn update_cuisine(
    State(pool): State<DbPool>,
    Path(id): Path<i32>,
    Json(input): Json<NamedInput>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let mut conn = pool.get()?;
    let updated = repositories::cuisines::update(&mut conn, id, &input.name)?
        .ok_or(AppError::NotFound("Cuisine"))?;
    Ok(Json(updated))
}

#[utoipa::path(
    delete,
    path = "/api/cuisines/{id}",
    tag = "cuisines",
    params(
        ("id" = i32, Path, description = "Cuisine ID")
    ),
    description = "Recipes of the cuisine are kept with no cuisine.",
    responses(
        (status = 204, description = "Cuisine deleted successfully"),
        (status = 404, description = "Cuisine not found", body = ErrorResponse)
    )
)]
pub async fn delete_cuisine(
    State(pool): State<DbPool>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    let mut conn = pool.get()?;
    if !repositories::cuisines::delete(&mut conn, id)? {
        return Err(AppError::NotFound("Cuisine"));
    }
    tracing::info!(cuisine_id = id, "deleted cuisine");
    Ok(StatusCode::NO_CONTENT)
}
