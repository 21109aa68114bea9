use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::{
    level_entity as levels, player_level_entity as player_levels, prize_entity as prizes,
};

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct CreateLevelRequest {
    pub title: String,
    /// Position in the level sequence
    #[serde(default)]
    pub order: i32,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LevelResponse {
    pub id: i64,
    pub title: String,
    pub order: i32,
}

impl From<levels::Model> for LevelResponse {
    fn from(m: levels::Model) -> Self {
        LevelResponse {
            id: m.id,
            title: m.title,
            order: m.order,
        }
    }
}

/// Attach a prize to a level's draw pool (creates the prize and the
/// eligibility link)
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct AttachPrizeRequest {
    pub title: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PrizeResponse {
    pub id: i64,
    pub title: String,
}

impl From<prizes::Model> for PrizeResponse {
    fn from(m: prizes::Model) -> Self {
        PrizeResponse {
            id: m.id,
            title: m.title,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PlayerLevelResponse {
    pub id: i64,
    pub player_id: i64,
    pub level_id: i64,
    pub completed: Option<NaiveDate>,
    pub is_completed: bool,
    pub score: i64,
}

impl From<player_levels::Model> for PlayerLevelResponse {
    fn from(m: player_levels::Model) -> Self {
        PlayerLevelResponse {
            id: m.id,
            player_id: m.player_id,
            level_id: m.level_id,
            completed: m.completed,
            is_completed: m.is_completed,
            score: m.score,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct CompleteLevelRequest {
    /// Final score for the run, must be non-negative
    pub score: i64,
}

/// Result of a prize award: the won title, or null when the level is
/// incomplete or its pool is exhausted
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AwardPrizeResponse {
    pub prize: Option<String>,
}
