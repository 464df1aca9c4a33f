pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod paginated;
pub mod update;

use crate::AppState;
use axum::routing::get;
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for /api/recipes endpoints (mounted at /api/recipes)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list::list_recipes).post(create::create_recipe))
        .route("/paginated", get(paginated::list_recipes_paginated))
        .route(
            "/{id}",
            get(get::get_recipe)
                .put(update::update_recipe)
                .delete(delete::delete_recipe),
        )
}

#[derive(OpenApi)]
#[openapi(
    paths(
        create::create_recipe,
        list::list_recipes,
        paginated::list_recipes_paginated,
        get::get_recipe,
        update::update_recipe,
        delete::delete_recipe,
    ),
    components(schemas(
        crate::repositories::recipes::CreateRecipeRequest,
        crate::repositories::recipes::RecipeIngredientInput,
        crate::repositories::recipes::UpdateRecipeRequest,
        crate::services::recipes::RecipeResponse,
        crate::services::recipes::AuthorRef,
        crate::services::recipes::RecipeIngredientView,
        crate::models::Cuisine,
        crate::models::Allergen,
        crate::services::pagination::Page<crate::services::recipes::RecipeResponse>,
    ))
)]
pub struct ApiDoc;
