use crate::api::{ErrorResponse, ListParams};
use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::Allergen;
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

/// Returns the router for /api/allergens endpoints (mounted at /api/allergens)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_allergens).post(create_allergen))
        .route(
            "/{id}",
            get(get_allergen)
                .put(update_allergen)
                .delete(delete_allergen),
        )
}

#[derive(OpenApi)]
#[openapi(
    paths(
        list_allergens,
        create_allergen,
        get_allergen,
        update_allergen,
        delete_allergen,
    ),
    components(schemas(Allergen, NamedInput))
)]
pub struct ApiDoc;

#[utoipa::path(
    get,
    path = "/api/allergens",
    tag = "allergens",
    params(ListParams),
    responses(
        (status = 200, description = "Allergens ordered by id", body = Vec<Allergen>),
        (status = 422, description = "Invalid skip or limit", body = ErrorResponse)
    )
)]
pub async fn list_allergens(
    State(pool): State<DbPool>,
    Query(params): Query<ListParams>,
) -> AppResult<impl IntoResponse> {
    let (offset, limit) = params.window()?;
    let mut conn = pool.get()?;
    Ok(Json(queries::allergens::get_all(&mut conn, offset, limit)?))
}

#[utoipa::path(
    post,
    path = "/api/allergens",
    tag = "allergens",
    request_body(content = NamedInput, example = json!({"name": "Gluten"})),
    responses(
        (status = 201, description = "Allergen created successfully", body = Allergen),
        (status = 409, description = "Name already taken", body = ErrorResponse),
        (status = 422, description = "Invalid request", body = ErrorResponse)
    )
)]
pub async fn create_allergen(
    State(pool): State<DbPool>,
    Json(input): Json<NamedInput>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let mut conn = pool.get()?;
    let created = repositories::allergens::create(&mut conn, &input.name)?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get,
    path = "/api/allergens/{id}",
    tag = "allergens",
    params(
        ("id" = i32, Path, description = "Allergen ID")
    ),
    responses(
        (status = 200, description = "Allergen details", body = Allergen),
        (status = 404, description = "Allergen not found", body = ErrorResponse)
    )
)]
pub async fn get_allergen(
    State(pool): State<DbPool>,
    Path(id): Path<i32>,
) -> AppResult<impl IntoResponse> {
    let mut conn = pool.get()?;
    let found =
        queries::allergens::get_by_id(&mut conn, id)?
            .ok_or(AppError::NotFound("Allergen"))?;
    Ok(Json(found))
}

#[utoipa::path(
    put,
    path = "/api/allergens/{id}",
    tag = "allergens",
    params(
        ("id" = i32, Path, description = "Allergen ID")
    ),
    request_body = NamedInput,
    responses(
        (status = 200, description = "Allergen updated successfully", body = Allergen),
        (status = 404, description = "Allergen not found", body = ErrorResponse),
        (status = 409, description = "Name already taken", body = ErrorResponse),
        (status = 422, description = "Invalid request", body = ErrorResponse)
    )
)]
pub async fn update_allergen(
    State(pool): State<DbPool>,
    Path(id): Path<i32>,
    Json(input): Json<NamedInput>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let mut conn = pool.get()?;
    let updated = repositories::allergens::update(&mut conn, id, &input.name)?
        .ok_or(AppError::NotFound("Allergen"))?;
    Ok(Json(updated))
}

#[utoipa::path(
    delete,
    path = "/api/allergens/{id}",
    tag = "allergens",
    params(
        ("id" = i32, Path, description = "Allergen ID")
    ),
    description = "Also unlinks the allergen from every recipe.",
    responses(
        (status = 204, description = "Allergen deleted successfully"),
        (status = 404, description = "Allergen not found", body = ErrorResponse)
    )
)]
pub async fn delete_allergen(
    State(pool): State<DbPool>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    let mut conn = pool.get()?;
    if !repositories::allergens::delete(&mut conn, id)? {
        return Err(AppError::NotFound("Allergen"));
    }
    tracing::info!(allergen_id = id, "deleted allergen");
    Ok(StatusCode::NO_CONTENT)
}
