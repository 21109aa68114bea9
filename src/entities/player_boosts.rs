use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One boost grant to one player. The grant is consumable exactly once:
/// applying it flips `active` to false in the same transaction that
/// credits the effect.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "player_boosts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub player_id: i64,
    pub boost_id: i64,
    pub active: bool,
    pub applied_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::players::Entity",
        from = "Column::PlayerId",
        to = "super::players::Column::Id",
        on_delete = "Cascade"
    )]
    Player,
    #[sea_orm(
        belongs_to = "super::boosts::Entity",
        from = "Column::BoostId",
        to = "super::boosts::Column::Id",
        on_delete = "Cascade"
    )]
    Boost,
}

impl ActiveModelBehavior for ActiveModel {}
