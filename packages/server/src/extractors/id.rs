use std::str::FromStr;

use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use sea_orm::prelude::Uuid;
use thiserror::Error;

use crate::error::AppError;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("malformatted id: {0:?}")]
pub struct IdError(pub String);

/// The `{id}` path segment of a resource route, parsed as a record handle.
///
/// Anything that is not a UUID is rejected with `AppError::MalformedId`
/// before the store is touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordId(pub Uuid);

impl FromStr for RecordId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::try_parse(s)
            .map(RecordId)
            .map_err(|_| IdError(s.to_string()))
    }
}

impl<S> FromRequestParts<S> for RecordId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::MalformedId)?;

        raw.parse().map_err(|e: IdError| {
            tracing::debug!("{e}");
            AppError::MalformedId
        })
    }
}
