use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Player record: external identity reference plus the accumulated
/// points counter. `last_login` is restamped on every points write.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "players")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// External identity reference (unique)
    pub player_id: String,
    pub first_login: DateTime<Utc>,
    pub last_login: DateTime<Utc>,
    /// Accumulated points, never negative
    pub points: i64,
}

impl Model {
    /// The daily bonus is claimable only when the calendar date has moved
    /// past the last recorded login. Same-day and backwards clocks are
    /// both rejected.
    pub fn can_claim_daily_bonus(&self, today: NaiveDate) -> bool {
        today > self.last_login.date_naive()
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn player_logged_in_at(last_login: DateTime<Utc>) -> Model {
        Model {
            id: 1,
            player_id: "p1".to_string(),
            first_login: last_login,
            last_login,
            points: 0,
        }
    }

    #[test]
    fn test_bonus_claimable_on_a_later_date() {
        let player = player_logged_in_at(Utc.with_ymd_and_hms(2026, 8, 19, 23, 59, 0).unwrap());
        let today = NaiveDate::from_ymd_opt(2026, 8, 20).unwrap();
        assert!(player.can_claim_daily_bonus(today));
    }

    #[test]
    fn test_bonus_rejected_on_the_same_date() {
        let player = player_logged_in_at(Utc.with_ymd_and_hms(2026, 8, 20, 0, 1, 0).unwrap());
        let today = NaiveDate::from_ymd_opt(2026, 8, 20).unwrap();
        assert!(!player.can_claim_daily_bonus(today));
    }

    #[test]
    fn test_bonus_rejected_when_clock_moved_backwards() {
        let player = player_logged_in_at(Utc.with_ymd_and_hms(2026, 8, 21, 12, 0, 0).unwrap());
        let today = NaiveDate::from_ymd_opt(2026, 8, 20).unwrap();
        assert!(!player.can_claim_daily_bonus(today));
    }
}
