use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::error::AppResult;
use crate::repositories::recipes::{self, CreateRecipeRequest};
use crate::services::recipes::{compose_full, RecipeResponse};
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

#[utoipa::path(
    post,
    path = "/api/recipes",
    tag = "recipes",
    request_body(content = CreateRecipeRequest, example = json!({
        "title": "Spaghetti Carbonara",
        "description": "Classic Roman pasta",
        "cooking_time": 30,
        "difficulty": 2,
        "cuisine_id": 1,
        "allergen_ids": [1, 2],
        "ingredients": [
            {"ingredient_id": 1, "quantity": 200.0, "measurement": 1}
        ]
    })),
    responses(
        (status = 201, description = "Recipe created successfully", body = RecipeResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Referenced cuisine, allergen or ingredient not found", body = ErrorResponse),
        (status = 422, description = "Invalid request", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_recipe(
    AuthUser(user): AuthUser,
    State(pool): State<DbPool>,
    Json(request): Json<CreateRecipeRequest>,
) -> AppResult<impl IntoResponse> {
    request.validate()?;

    let mut conn = pool.get()?;
    let recipe = recipes::create(&mut conn, user.id, &request)?;
    tracing::info!(recipe_id = recipe.id, author_id = user.id, "created recipe");

    let response = compose_full(&mut conn, recipe)?;
    Ok((StatusCode::CREATED, Json(response)))
}
