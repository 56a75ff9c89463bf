use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::entity::person;

use super::schema::{FieldError, Schema, ValidationError};

static PHONE_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{2,3}-\d{6,8}$").expect("valid phone number regex"));

#[derive(Deserialize, Default, Clone, Debug, utoipa::ToSchema)]
pub struct PersonRequest {
    #[schema(example = "Arto Hellas")]
    pub name: Option<String>,
    #[schema(example = "040-1234567")]
    pub number: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPerson {
    pub name: String,
    pub number: String,
}

#[derive(Serialize, Debug, utoipa::ToSchema)]
pub struct PersonResponse {
    pub id: String,
    pub name: String,
    pub number: String,
}

impl PersonRequest {
    /// Names are trimmed before the length check. Uniqueness needs the store
    /// and is checked by the caller; see [`duplicate_name`].
    pub fn validate(self) -> Result<NewPerson, ValidationError> {
        let mut schema = Schema::new("Person");

        let name = schema
            .required_nonblank("name", self.name, "Name required")
            .map(|n| n.trim().to_string());
        schema.min_length(
            "name",
            name.as_deref(),
            3,
            "Name must be at least 3 characters long",
        );

        let number = schema.required("number", self.number, "Phone number required");
        let number_ref = number.as_deref();
        schema.min_length(
            "number",
            number_ref,
            8,
            "Number must be at least 8 characters long",
        );
        schema.pattern(
            "number",
            number_ref,
            &PHONE_NUMBER_RE,
            format!("{} is not a valid phone number!", number_ref.unwrap_or_default()),
        );
        schema.finish()?;

        Ok(NewPerson {
            name: name.unwrap_or_default(),
            number: number.unwrap_or_default(),
        })
    }
}

/// Error reported when another person already owns `name`.
pub fn duplicate_name(name: &str) -> ValidationError {
    ValidationError {
        entity: "Person",
        errors: vec![FieldError {
            field: "name",
            message: format!("Error, expected `name` to be unique. Value: `{name}`"),
        }],
    }
}

impl From<person::Model> for PersonResponse {
    fn from(m: person::Model) -> Self {
        Self {
            id: m.id.to_string(),
            name: m.name,
            number: m.number,
        }
    }
}
