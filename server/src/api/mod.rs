pub mod allergens;
pub mod auth;
pub mod cuisines;
pub mod ingredients;
pub mod posts;
pub mod recipes;
pub mod testing;
pub mod uploads;
pub mod users;

use crate::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{IntoParams, OpenApi, ToSchema};

/// Shared error response used by all endpoints
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

pub const DEFAULT_LIST_LIMIT: i64 = 100;

/// Offset window for the plain list endpoints.
#[derive(Debug, Clone, Copy, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListParams {
    /// Rows to skip (default 0)
    #[param(minimum = 0)]
    pub skip: Option<i64>,
    /// Maximum rows to return (default 100)
    #[param(minimum = 0)]
    pub limit: Option<i64>,
}

impl ListParams {
    /// `(offset, limit)` with defaults applied.
    pub fn window(&self) -> AppResult<(i64, i64)> {
        let skip = self.skip.unwrap_or(0);
        let limit = self.limit.unwrap_or(DEFAULT_LIST_LIMIT);
        if skip < 0 || limit < 0 {
            return Err(AppError::validation("skip and limit must not be negative"));
        }
        Ok((skip, limit))
    }
}

/// Generate the complete OpenAPI spec by merging all module specs
pub fn openapi() -> utoipa::openapi::OpenApi {
    // Base spec with shared components and security
    #[derive(OpenApi)]
    #[openapi(
        info(title = "Recipe Lab API"),
        components(schemas(ErrorResponse))
    )]
    struct BaseApi;

    let mut spec = BaseApi::openapi();

    if let Some(components) = spec.components.as_mut() {
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }

    let modules: Vec<utoipa::openapi::OpenApi> = vec![
        testing::ApiDoc::openapi(),
        auth::ApiDoc::openapi(),
        users::ApiDoc::openapi(),
        recipes::ApiDoc::openapi(),
        cuisines::ApiDoc::openapi(),
        allergens::ApiDoc::openapi(),
        ingredients::ApiDoc::openapi(),
        posts::ApiDoc::openapi(),
        uploads::ApiDoc::openapi(),
    ];

    for module_spec in modules {
        spec.paths.paths.extend(module_spec.paths.paths);

        if let Some(module_components) = module_spec.components {
            if let Some(spec_components) = spec.components.as_mut() {
                spec_components.schemas.extend(module_components.schemas);
            }
        }
    }

    spec
}
