//! Simple posts, kept separate from the recipe catalog.

use crate::api::{ErrorResponse, ListParams};
use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::{NewPost, Post};
use crate::schema::posts;
use crate::validation;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use diesel::prelude::*;
use serde::Deserialize;
use utoipa::{OpenApi, ToSchema};

/// Returns the router for /api/posts endpoints (mounted at /api/posts)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_posts).post(create_post))
        .route(
            "/{id}",
            get(get_post).put(update_post).delete(delete_post),
        )
}

#[derive(OpenApi)]
#[openapi(
    paths(list_posts, create_post, get_post, update_post, delete_post),
    components(schemas(Post, PostInput))
)]
pub struct ApiDoc;

#[derive(Debug, Deserialize, ToSchema)]
pub struct PostInput {
    pub title: String,
    pub description: String,
}

impl PostInput {
    fn validate(&self) -> AppResult<()> {
        validation::short_text("title", &self.title)?;
        validation::non_empty("description", &self.description)
    }

    fn as_new(&self) -> NewPost<'_> {
        NewPost {
            title: &self.title,
            description: &self.description,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/posts",
    tag = "posts",
    params(ListParams),
    responses(
        (status = 200, description = "Posts ordered by id", body = Vec<Post>),
        (status = 422, description = "Invalid skip or limit", body = ErrorResponse)
    )
)]
pub async fn list_posts(
    State(pool): State<DbPool>,
    Query(params): Query<ListParams>,
) -> AppResult<impl IntoResponse> {
    let (offset, limit) = params.window()?;
    let mut conn = pool.get()?;

    let rows = posts::table
        .select(Post::as_select())
        .order(posts::id)
        .offset(offset)
        .limit(limit)
        .load(&mut conn)?;

    Ok(Json(rows))
}

#[utoipa::path(
    post,
    path = "/api/posts",
    tag = "posts",
    request_body(content = PostInput, example = json!({"title": "Welcome", "description": "First post"})),
    responses(
        (status = 201, description = "Post created successfully", body = Post),
        (status = 422, description = "Invalid request", body = ErrorResponse)
    )
)]
pub async fn create_post(
    State(pool): State<DbPool>,
    Json(input): Json<PostInput>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let mut conn = pool.get()?;

    let post = diesel::insert_into(posts::table)
        .values(input.as_new())
        .returning(Post::as_returning())
        .get_result(&mut conn)?;

    Ok((StatusCode::CREATED, Json(post)))
}

#[utoipa::path(
    get,
    path = "/api/posts/{id}",
    tag = "posts",
    params(
        ("id" = i32, Path, description = "Post ID")
    ),
    responses(
        (status = 200, description = "Post details", body = Post),
        (status = 404, description = "Post not found", body = ErrorResponse)
    )
)]
pub async fn get_post(
    State(pool): State<DbPool>,
    Path(id): Path<i32>,
) -> AppResult<impl IntoResponse> {
    let mut conn = pool.get()?;

    let post = posts::table
        .find(id)
        .select(Post::as_select())
        .first(&mut conn)
        .optional()?
        .ok_or(AppError::NotFound("Post"))?;

    Ok(Json(post))
}

#[utoipa::path(
    put,
    path = "/api/posts/{id}",
    tag = "posts",
    params(
        ("id" = i32, Path, description = "Post ID")
    ),
    request_body = PostInput,
    responses(
        (status = 200, description = "Post updated successfully", body = Post),
        (status = 404, description = "Post not found", body = ErrorResponse),
        (status = 422, description = "Invalid request", body = ErrorResponse)
    )
)]
pub async fn update_post(
    State(pool): State<DbPool>,
    Path(id): Path<i32>,
    Json(input): Json<PostInput>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let mut conn = pool.get()?;

    let post = diesel::update(posts::table.find(id))
        .set(input.as_new())
        .returning(Post::as_returning())
        .get_result(&mut conn)
        .optional()?
        .ok_or(AppError::NotFound("Post"))?;

    Ok(Json(post))
}

#[utoipa::path(
    delete,
    path = "/api/posts/{id}",
    tag = "posts",
    params(
        ("id" = i32, Path, description = "Post ID")
    ),
    responses(
        (status = 204, description = "Post deleted successfully"),
        (status = 404, description = "Post not found", body = ErrorResponse)
    )
)]
pub async fn delete_post(
    State(pool): State<DbPool>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    let mut conn = pool.get()?;

    let deleted = diesel::delete(posts::table.find(id)).execute(&mut conn)?;
    if deleted == 0 {
        return Err(AppError::NotFound("Post"));
    }

    Ok(StatusCode::NO_CONTENT)
}
