use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::player_entity as players;

/// Registration request: the external identity this player maps to
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct RegisterPlayerRequest {
    pub player_id: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PlayerResponse {
    pub id: i64,
    /// External identity reference
    pub player_id: String,
    pub first_login: DateTime<Utc>,
    pub last_login: DateTime<Utc>,
    pub points: i64,
}

impl From<players::Model> for PlayerResponse {
    fn from(m: players::Model) -> Self {
        PlayerResponse {
            id: m.id,
            player_id: m.player_id,
            first_login: m.first_login,
            last_login: m.last_login,
            points: m.points,
        }
    }
}

/// Result of a successful daily-login claim
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DailyLoginResponse {
    /// Points after the bonus was credited
    pub points: i64,
    /// Bonus credited by this call
    pub bonus: i64,
}
