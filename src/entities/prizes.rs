use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Maximum prize title length, matches the column definition.
pub const MAX_TITLE_LEN: usize = 52;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "prizes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
