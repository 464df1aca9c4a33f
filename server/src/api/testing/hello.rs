use axum::{response::IntoResponse, Json};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HelloResponse {
    pub message: String,
}

#[utoipa::path(
    get,
    path = "/api/test",
    tag = "testing",
    responses(
        (status = 200, description = "Service is up", body = HelloResponse)
    )
)]
pub async fn hello() -> impl IntoResponse {
    Json(HelloResponse {
        message: "Hello, World!".to_string(),
    })
}
