use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::{boost_entity as boosts, player_boost_entity as player_boosts};

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct CreateBoostRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Signed point modifier, negative values drain points
    pub effect: i64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BoostResponse {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub effect: i64,
}

impl From<boosts::Model> for BoostResponse {
    fn from(m: boosts::Model) -> Self {
        BoostResponse {
            id: m.id,
            title: m.title,
            description: m.description,
            effect: m.effect,
        }
    }
}

/// Grant request: which catalog boost to hand to the player
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct GrantBoostRequest {
    pub boost_id: i64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PlayerBoostResponse {
    pub id: i64,
    pub player_id: i64,
    pub boost_id: i64,
    pub active: bool,
    pub applied_at: DateTime<Utc>,
}

impl From<player_boosts::Model> for PlayerBoostResponse {
    fn from(m: player_boosts::Model) -> Self {
        PlayerBoostResponse {
            id: m.id,
            player_id: m.player_id,
            boost_id: m.boost_id,
            active: m.active,
            applied_at: m.applied_at,
        }
    }
}

/// Result of applying a granted boost
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ApplyBoostResponse {
    pub player_id: i64,
    /// Effect that was credited (signed)
    pub effect: i64,
    /// Player points after the effect was applied
    pub points: i64,
}
