use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "blog")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub title: String,
    pub author: Option<String>,
    pub url: String,
    pub likes: i64,

    pub version: i32, // bumped on every write, never serialized
}

impl ActiveModelBehavior for ActiveModel {}
