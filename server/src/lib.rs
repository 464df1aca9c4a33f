pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod queries;
pub mod repositories;
pub mod schema;
pub mod services;
pub mod telemetry;
pub mod validation;

#[cfg(test)]
mod test_fixtures;

use axum::extract::FromRef;
use axum::Router;
use config::Settings;
use std::sync::Arc;
use tower_http::services::ServeDir;
use utoipa_swagger_ui::SwaggerUi;

/// Application state shared across all handlers
#[derive(Clone, FromRef)]
pub struct AppState {
    pub pool: db::DbPool,
    pub settings: Arc<Settings>,
}

impl AppState {
    pub fn new(pool: db::DbPool, settings: Settings) -> Self {
        Self {
            pool,
            settings: Arc::new(settings),
        }
    }
}

/// The full application: every `/api` router, uploaded files under
/// `/uploads`, Swagger UI, and request tracing.
pub fn app(state: AppState) -> Router {
    let uploads = ServeDir::new(&state.settings.upload_dir);

    let api = Router::new()
        .nest("/api/test", api::testing::router())
        .nest("/api/auth", api::auth::router())
        .nest("/api/users", api::users::router())
        .nest("/api/recipes", api::recipes::router())
        .nest("/api/cuisines", api::cuisines::router())
        .nest("/api/allergens", api::allergens::router())
        .nest("/api/ingredients", api::ingredients::router())
        .nest("/api/posts", api::posts::router())
        .nest("/api/uploads", api::uploads::router());

    let swagger_ui = SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api::openapi());

    let router = Router::new()
        .merge(api)
        .merge(swagger_ui)
        .nest_service("/uploads", uploads)
        .with_state(state);

    telemetry::trace_requests(router)
}
