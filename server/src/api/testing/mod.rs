pub mod hello;

use crate::AppState;
use axum::routing::get;
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for /api/test endpoints (mounted at /api/test)
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(hello::hello))
}

#[derive(OpenApi)]
#[openapi(paths(hello::hello), components(schemas(hello::HelloResponse)))]
pub struct ApiDoc;
