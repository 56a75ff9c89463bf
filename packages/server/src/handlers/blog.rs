use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::prelude::Uuid;
use sea_orm::*;
use tracing::instrument;

use crate::entity::blog;
use crate::error::{AppError, ErrorBody};
use crate::extractors::id::RecordId;
use crate::extractors::json::AppJson;
use crate::extractors::token::BearerToken;
use crate::models::blog::*;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/",
    tag = "Blogs",
    operation_id = "listBlogs",
    summary = "List all blogs",
    responses(
        (status = 200, description = "Every stored blog, oldest first", body = Vec<BlogResponse>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_blogs(State(state): State<AppState>) -> Result<Json<Vec<BlogResponse>>, AppError> {
    let blogs = blog::Entity::find()
        .order_by_asc(blog::Column::Id)
        .all(&state.db)
        .await?;

    Ok(Json(blogs.into_iter().map(BlogResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Blogs",
    operation_id = "getBlog",
    summary = "Get a blog by id",
    params(("id" = String, Path, description = "Blog id (UUID)")),
    responses(
        (status = 200, description = "Blog found", body = BlogResponse),
        (status = 400, description = "Malformed id", body = ErrorBody),
        (status = 404, description = "No blog with this id"),
    ),
)]
#[instrument(skip(state))]
pub async fn get_blog(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> Result<Json<BlogResponse>, AppError> {
    let model = find_blog(&state.db, id).await?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Blogs",
    operation_id = "createBlog",
    summary = "Create a blog",
    description = "`title` and `url` are required. `likes` defaults to 0.",
    request_body = BlogRequest,
    responses(
        (status = 201, description = "Blog created", body = BlogResponse),
        (status = 400, description = "Validation error", body = ErrorBody),
    ),
)]
#[instrument(
    skip(state, token, payload),
    fields(title = ?payload.title, authenticated = token.is_present())
)]
pub async fn create_blog(
    State(state): State<AppState>,
    token: BearerToken,
    AppJson(payload): AppJson<BlogRequest>,
) -> Result<impl IntoResponse, AppError> {
    let new_blog = payload.validate()?;

    let model = blog::ActiveModel {
        id: Set(Uuid::now_v7()),
        title: Set(new_blog.title),
        author: Set(new_blog.author),
        url: Set(new_blog.url),
        likes: Set(new_blog.likes),
        version: Set(0),
    }
    .insert(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(BlogResponse::from(model))))
}

#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Blogs",
    operation_id = "updateBlog",
    summary = "Update a blog",
    description = "Coalescing update: a supplied field replaces the stored one only when it is truthy (non-empty string, non-zero number). Empty strings and 0 leave the stored value untouched.",
    params(("id" = String, Path, description = "Blog id (UUID)")),
    request_body = BlogRequest,
    responses(
        (status = 200, description = "Blog updated", body = BlogResponse),
        (status = 400, description = "Malformed id or validation error", body = ErrorBody),
        (status = 404, description = "No blog with this id"),
    ),
)]
#[instrument(skip(state, token, payload), fields(authenticated = token.is_present()))]
pub async fn update_blog(
    State(state): State<AppState>,
    RecordId(id): RecordId,
    token: BearerToken,
    AppJson(payload): AppJson<BlogRequest>,
) -> Result<Json<BlogResponse>, AppError> {
    let txn = state.db.begin().await?;

    let existing = find_blog(&txn, id).await?;
    let merged = payload.coalesce(&existing)?;
    let version = existing.version + 1;

    let mut active: blog::ActiveModel = existing.into();
    active.title = Set(merged.title);
    active.author = Set(merged.author);
    active.url = Set(merged.url);
    active.likes = Set(merged.likes);
    active.version = Set(version);

    let model = active.update(&txn).await?;
    txn.commit().await?;

    Ok(Json(model.into()))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Blogs",
    operation_id = "deleteBlog",
    summary = "Delete a blog",
    params(("id" = String, Path, description = "Blog id (UUID)")),
    responses(
        (status = 204, description = "Blog deleted"),
        (status = 400, description = "Malformed id", body = ErrorBody),
        (status = 404, description = "No blog with this id"),
    ),
)]
#[instrument(skip(state, token), fields(authenticated = token.is_present()))]
pub async fn delete_blog(
    State(state): State<AppState>,
    RecordId(id): RecordId,
    token: BearerToken,
) -> Result<StatusCode, AppError> {
    let res = blog::Entity::delete_by_id(id).exec(&state.db).await?;
    if res.rows_affected == 0 {
        return Err(AppError::NotFound);
    }
    Ok(StatusCode::NO_CONTENT)
}

async fn find_blog<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<blog::Model, AppError> {
    blog::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(AppError::NotFound)
}
