use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};
use sea_orm::prelude::Uuid;
use sea_orm::*;
use tracing::instrument;

use crate::entity::person;
use crate::error::{AppError, ErrorBody};
use crate::extractors::id::RecordId;
use crate::extractors::json::AppJson;
use crate::models::person::*;
use crate::state::AppState;

/// Phonebook summary page: number of stored people and the server time.
#[instrument(skip(state))]
pub async fn info(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let count = person::Entity::find().count(&state.db).await?;
    let now = chrono::Utc::now().to_rfc2822();

    Ok(Html(format!(
        "<p>Phonebook has info for {count} people</p><p>{now}</p>"
    )))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Persons",
    operation_id = "listPersons",
    summary = "List the phonebook",
    responses(
        (status = 200, description = "Every stored person, oldest first", body = Vec<PersonResponse>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_persons(
    State(state): State<AppState>,
) -> Result<Json<Vec<PersonResponse>>, AppError> {
    let persons = person::Entity::find()
        .order_by_asc(person::Column::Id)
        .all(&state.db)
        .await?;

    Ok(Json(persons.into_iter().map(PersonResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Persons",
    operation_id = "getPerson",
    summary = "Get a person by id",
    params(("id" = String, Path, description = "Person id (UUID)")),
    responses(
        (status = 200, description = "Person found", body = PersonResponse),
        (status = 400, description = "Malformed id", body = ErrorBody),
        (status = 404, description = "No person with this id"),
    ),
)]
#[instrument(skip(state))]
pub async fn get_person(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> Result<Json<PersonResponse>, AppError> {
    let model = find_person(&state.db, id).await?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Persons",
    operation_id = "createPerson",
    summary = "Add a person to the phonebook",
    description = "`name` must be unique and at least 3 characters after trimming. `number` must look like `09-1234556` or `040-22334455`.",
    request_body = PersonRequest,
    responses(
        (status = 201, description = "Person created", body = PersonResponse),
        (status = 400, description = "Validation error", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(name = ?payload.name))]
pub async fn create_person(
    State(state): State<AppState>,
    AppJson(payload): AppJson<PersonRequest>,
) -> Result<impl IntoResponse, AppError> {
    let new_person = payload.validate()?;
    ensure_unique_name(&state.db, &new_person.name, None).await?;

    let model = person::ActiveModel {
        id: Set(Uuid::now_v7()),
        name: Set(new_person.name),
        number: Set(new_person.number),
        version: Set(0),
    }
    .insert(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(PersonResponse::from(model))))
}

#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Persons",
    operation_id = "replacePerson",
    summary = "Replace a person",
    description = "Both fields are overwritten and re-validated exactly as on create, including the uniqueness of `name`.",
    params(("id" = String, Path, description = "Person id (UUID)")),
    request_body = PersonRequest,
    responses(
        (status = 200, description = "Person replaced", body = PersonResponse),
        (status = 400, description = "Malformed id or validation error", body = ErrorBody),
        (status = 404, description = "No person with this id"),
    ),
)]
#[instrument(skip(state, payload), fields(name = ?payload.name))]
pub async fn update_person(
    State(state): State<AppState>,
    RecordId(id): RecordId,
    AppJson(payload): AppJson<PersonRequest>,
) -> Result<Json<PersonResponse>, AppError> {
    let replacement = payload.validate()?;

    let txn = state.db.begin().await?;

    let existing = find_person(&txn, id).await?;
    ensure_unique_name(&txn, &replacement.name, Some(id)).await?;
    let version = existing.version + 1;

    let mut active: person::ActiveModel = existing.into();
    active.name = Set(replacement.name);
    active.number = Set(replacement.number);
    active.version = Set(version);

    let model = active.update(&txn).await?;
    txn.commit().await?;

    Ok(Json(model.into()))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Persons",
    operation_id = "deletePerson",
    summary = "Remove a person from the phonebook",
    params(("id" = String, Path, description = "Person id (UUID)")),
    responses(
        (status = 204, description = "Person deleted"),
        (status = 400, description = "Malformed id", body = ErrorBody),
        (status = 404, description = "No person with this id"),
    ),
)]
#[instrument(skip(state))]
pub async fn delete_person(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> Result<StatusCode, AppError> {
    let res = person::Entity::delete_by_id(id).exec(&state.db).await?;
    if res.rows_affected == 0 {
        return Err(AppError::NotFound);
    }
    Ok(StatusCode::NO_CONTENT)
}

async fn find_person<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<person::Model, AppError> {
    person::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(AppError::NotFound)
}

/// Fail with a validation error if someone other than `except` already uses `name`.
async fn ensure_unique_name<C: ConnectionTrait>(
    db: &C,
    name: &str,
    except: Option<Uuid>,
) -> Result<(), AppError> {
    let mut select = person::Entity::find().filter(person::Column::Name.eq(name));
    if let Some(id) = except {
        select = select.filter(person::Column::Id.ne(id));
    }

    if select.one(db).await?.is_some() {
        return Err(duplicate_name(name).into());
    }
    Ok(())
}
