use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};
use sea_orm::prelude::Uuid;
use sea_orm::*;
use tracing::instrument;

use crate::entity::note;
use crate::error::{AppError, ErrorBody};
use crate::extractors::id::RecordId;
use crate::extractors::json::AppJson;
use crate::models::note::*;
use crate::state::AppState;

/// Landing page of the notes service.
pub async fn hello() -> Html<&'static str> {
    Html("<h1>Hello World!</h1>")
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Notes",
    operation_id = "listNotes",
    summary = "List all notes",
    responses(
        (status = 200, description = "Every stored note, oldest first", body = Vec<NoteResponse>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_notes(State(state): State<AppState>) -> Result<Json<Vec<NoteResponse>>, AppError> {
    let notes = note::Entity::find()
        .order_by_asc(note::Column::Id)
        .all(&state.db)
        .await?;

    Ok(Json(notes.into_iter().map(NoteResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Notes",
    operation_id = "getNote",
    summary = "Get a note by id",
    params(("id" = String, Path, description = "Note id (UUID)")),
    responses(
        (status = 200, description = "Note found", body = NoteResponse),
        (status = 400, description = "Malformed id", body = ErrorBody),
        (status = 404, description = "No note with this id"),
    ),
)]
#[instrument(skip(state))]
pub async fn get_note(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> Result<Json<NoteResponse>, AppError> {
    let model = find_note(&state.db, id).await?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Notes",
    operation_id = "createNote",
    summary = "Create a note",
    description = "`content` is required (at least 5 characters). `important` defaults to false.",
    request_body = NoteRequest,
    responses(
        (status = 201, description = "Note created", body = NoteResponse),
        (status = 400, description = "Validation error", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn create_note(
    State(state): State<AppState>,
    AppJson(payload): AppJson<NoteRequest>,
) -> Result<impl IntoResponse, AppError> {
    let new_note = payload.validate()?;

    let model = note::ActiveModel {
        id: Set(Uuid::now_v7()),
        content: Set(new_note.content),
        important: Set(new_note.important),
        version: Set(0),
    }
    .insert(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(NoteResponse::from(model))))
}

#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Notes",
    operation_id = "replaceNote",
    summary = "Replace a note",
    description = "Every field is overwritten and re-validated exactly as on create.",
    params(("id" = String, Path, description = "Note id (UUID)")),
    request_body = NoteRequest,
    responses(
        (status = 200, description = "Note replaced", body = NoteResponse),
        (status = 400, description = "Malformed id or validation error", body = ErrorBody),
        (status = 404, description = "No note with this id"),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn update_note(
    State(state): State<AppState>,
    RecordId(id): RecordId,
    AppJson(payload): AppJson<NoteRequest>,
) -> Result<Json<NoteResponse>, AppError> {
    let replacement = payload.validate()?;

    let txn = state.db.begin().await?;

    let existing = find_note(&txn, id).await?;
    let version = existing.version + 1;

    let mut active: note::ActiveModel = existing.into();
    active.content = Set(replacement.content);
    active.important = Set(replacement.important);
    active.version = Set(version);

    let model = active.update(&txn).await?;
    txn.commit().await?;

    Ok(Json(model.into()))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Notes",
    operation_id = "deleteNote",
    summary = "Delete a note",
    params(("id" = String, Path, description = "Note id (UUID)")),
    responses(
        (status = 204, description = "Note deleted"),
        (status = 400, description = "Malformed id", body = ErrorBody),
        (status = 404, description = "No note with this id"),
    ),
)]
#[instrument(skip(state))]
pub async fn delete_note(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> Result<StatusCode, AppError> {
    let res = note::Entity::delete_by_id(id).exec(&state.db).await?;
    if res.rows_affected == 0 {
        return Err(AppError::NotFound);
    }
    Ok(StatusCode::NO_CONTENT)
}

async fn find_note<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<note::Model, AppError> {
    note::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(AppError::NotFound)
}
