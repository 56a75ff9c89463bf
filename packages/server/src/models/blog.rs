use serde::{Deserialize, Serialize};

use crate::entity::blog;

use super::schema::{Schema, ValidationError};

/// Body accepted by `POST /api/blogs` and `PUT /api/blogs/{id}`.
#[derive(Deserialize, Default, Clone, Debug, utoipa::ToSchema)]
pub struct BlogRequest {
    #[schema(example = "Go To Statement Considered Harmful")]
    pub title: Option<String>,
    pub author: Option<String>,
    pub url: Option<String>,
    pub likes: Option<i64>,
}

/// A validated blog, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBlog {
    pub title: String,
    pub author: Option<String>,
    pub url: String,
    pub likes: i64,
}

#[derive(Serialize, Debug, utoipa::ToSchema)]
pub struct BlogResponse {
    pub id: String,
    pub title: String,
    pub author: Option<String>,
    pub url: String,
    pub likes: i64,
}

impl BlogRequest {
    /// Validate a create payload. `likes` defaults to 0.
    pub fn validate(self) -> Result<NewBlog, ValidationError> {
        let mut schema = Schema::new("Blog");
        let title = schema.required_nonblank("title", self.title, "title is required");
        let url = schema.required_nonblank("url", self.url, "url is required");
        schema.finish()?;

        Ok(NewBlog {
            title: title.unwrap_or_default(),
            author: self.author,
            url: url.unwrap_or_default(),
            likes: self.likes.unwrap_or(0),
        })
    }

    /// Merge onto a stored blog: a supplied value wins only when it is truthy
    /// (non-empty string, non-zero number), so `""` and `0` cannot clear a field.
    pub fn coalesce(self, existing: &blog::Model) -> Result<NewBlog, ValidationError> {
        let merged = BlogRequest {
            title: truthy(self.title).or_else(|| Some(existing.title.clone())),
            author: truthy(self.author).or_else(|| existing.author.clone()),
            url: truthy(self.url).or_else(|| Some(existing.url.clone())),
            likes: self.likes.filter(|&n| n != 0).or(Some(existing.likes)),
        };
        merged.validate()
    }
}

fn truthy(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

impl From<blog::Model> for BlogResponse {
    fn from(m: blog::Model) -> Self {
        Self {
            id: m.id.to_string(),
            title: m.title,
            author: m.author,
            url: m.url,
            likes: m.likes,
        }
    }
}
