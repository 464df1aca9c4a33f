use crate::api::ErrorResponse;
use crate::config::Settings;
use crate::error::{AppError, AppResult};
use crate::AppState;
use axum::{
    extract::{Multipart, State},
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{OpenApi, ToSchema};
use uuid::Uuid;

pub const ALLOWED_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "webp"];

/// Returns the router for /api/uploads endpoints (mounted at /api/uploads)
pub fn router() -> Router<AppState> {
    Router::new().route("/images", post(upload_image))
}

#[derive(OpenApi)]
#[openapi(
    paths(upload_image),
    components(schemas(UploadImageRequest, UploadImageResponse))
)]
pub struct ApiDoc;

#[derive(ToSchema)]
#[allow(dead_code)]
pub struct UploadImageRequest {
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UploadImageResponse {
    /// Where the stored file is served from
    pub url: String,
}

/// Lower-cased text after the last `.` of `filename` when it is an accepted
/// image type. A bare `.png` counts.
pub fn image_extension(filename: &str) -> Option<String> {
    let (_, ext) = filename.rsplit_once('.')?;
    let ext = ext.to_ascii_lowercase();
    ALLOWED_EXTENSIONS
        .contains(&ext.as_str())
        .then_some(ext)
}

#[utoipa::path(
    post,
    path = "/api/uploads/images",
    tag = "uploads",
    request_body(content_type = "multipart/form-data", content = UploadImageRequest),
    responses(
        (status = 200, description = "Image stored", body = UploadImageResponse),
        (status = 400, description = "Missing file or unsupported extension", body = ErrorResponse)
    )
)]
pub async fn upload_image(
    State(settings): State<Arc<Settings>>,
    mut multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        tracing::warn!("Multipart read error: {}", e);
        AppError::BadUpload(format!("Failed to read multipart data: {}", e.body_text()))
    })? {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        let ext = image_extension(&filename).ok_or_else(|| {
            AppError::BadUpload(format!(
                "Unsupported file type; allowed: {}",
                ALLOWED_EXTENSIONS.join(", ")
            ))
        })?;

        let data = field.bytes().await.map_err(|e| {
            tracing::warn!("Field read error: {}", e);
            AppError::BadUpload(format!("Failed to read file data: {}", e.body_text()))
        })?;

        let name = format!("{}.{}", Uuid::new_v4(), ext);
        tokio::fs::create_dir_all(&settings.upload_dir)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to create upload dir: {e}")))?;
        tokio::fs::write(settings.upload_dir.join(&name), &data)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to store upload: {e}")))?;

        tracing::info!(file = %name, bytes = data.len(), "stored upload");

        return Ok(Json(UploadImageResponse {
            url: format!("/uploads/{name}"),
        }));
    }

    Err(AppError::BadUpload("No file provided".to_string()))
}
