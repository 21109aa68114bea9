use crate::entities::player_entity as players;
use crate::error::{AppError, AppResult};
use crate::models::{DailyLoginResponse, PlayerResponse, RegisterPlayerRequest};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    Set,
};
use std::sync::Arc;

/// Fixed bonus credited once per calendar date.
pub const DAILY_LOGIN_BONUS: i64 = 5;

#[derive(Clone)]
pub struct PlayerService {
    pool: Arc<DatabaseConnection>,
}

impl PlayerService {
    pub fn new(pool: Arc<DatabaseConnection>) -> Self {
        Self { pool }
    }

    /// Create the player record for an external identity.
    /// Each identity maps to at most one player.
    pub async fn register(&self, request: RegisterPlayerRequest) -> AppResult<PlayerResponse> {
        let player_ref = request.player_id.trim();
        if player_ref.is_empty() {
            return Err(AppError::ValidationError(
                "player_id must not be empty".to_string(),
            ));
        }

        let existing = players::Entity::find()
            .filter(players::Column::PlayerId.eq(player_ref))
            .one(&*self.pool)
            .await?;
        if existing.is_some() {
            return Err(AppError::ValidationError(
                "Player already registered".to_string(),
            ));
        }

        let now = Utc::now();
        let created = players::ActiveModel {
            player_id: Set(player_ref.to_string()),
            first_login: Set(now),
            last_login: Set(now),
            points: Set(0),
            ..Default::default()
        }
        .insert(&*self.pool)
        .await?;

        log::info!("Registered player {} (#{})", created.player_id, created.id);
        Ok(created.into())
    }

    pub async fn get_player(&self, id: i64) -> AppResult<PlayerResponse> {
        let player = players::Entity::find_by_id(id)
            .one(&*self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Player not found".to_string()))?;
        Ok(player.into())
    }

    /// Credit the daily-login bonus.
    ///
    /// The bonus is claimable once per calendar date: a second call on the
    /// same date fails and leaves points untouched. Points and `last_login`
    /// move in a single update.
    pub async fn daily_login(&self, id: i64) -> AppResult<DailyLoginResponse> {
        let player = players::Entity::find_by_id(id)
            .one(&*self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Player not found".to_string()))?;

        let today = Utc::now().date_naive();
        if !player.can_claim_daily_bonus(today) {
            return Err(AppError::ValidationError(
                "Bonus already claimed today".to_string(),
            ));
        }

        let new_points = player.points.saturating_add(DAILY_LOGIN_BONUS);
        let mut am = player.into_active_model();
        am.points = Set(new_points);
        am.last_login = Set(Utc::now());
        let updated = am.update(&*self.pool).await?;

        Ok(DailyLoginResponse {
            points: updated.points,
            bonus: DAILY_LOGIN_BONUS,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn player(points: i64, last_login: chrono::DateTime<Utc>) -> players::Model {
        players::Model {
            id: 1,
            player_id: "p1".to_string(),
            first_login: last_login,
            last_login,
            points,
        }
    }

    #[tokio::test]
    async fn test_daily_login_awards_fixed_bonus() {
        let yesterday = Utc::now() - Duration::days(1);
        let before = player(7, yesterday);
        let after = players::Model {
            points: 12,
            last_login: Utc::now(),
            ..before.clone()
        };

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results(vec![vec![before]])
                .append_query_results(vec![vec![after]])
                .into_connection(),
        );

        let service = PlayerService::new(db.clone());
        let result = service.daily_login(1).await.unwrap();
        assert_eq!(result.bonus, DAILY_LOGIN_BONUS);
        assert_eq!(result.points, 12);

        // Points and last_login must move in the same update statement
        drop(service);
        let log = format!(
            "{:?}",
            Arc::try_unwrap(db).unwrap().into_transaction_log()
        );
        assert!(log.contains(r#"UPDATE "players" SET "last_login""#), "{log}");
        assert!(log.contains(r#""points""#), "{log}");
    }

    #[tokio::test]
    async fn test_daily_login_rejects_second_claim_same_day() {
        let today_player = player(12, Utc::now());

        // No update result is queued: the service must not write anything
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![today_player]])
            .into_connection();

        let service = PlayerService::new(Arc::new(db));
        let err = service.daily_login(1).await.unwrap_err();
        match err {
            AppError::ValidationError(msg) => assert_eq!(msg, "Bonus already claimed today"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_daily_login_rejects_backwards_clock() {
        let tomorrow_player = player(0, Utc::now() + Duration::days(1));

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![tomorrow_player]])
            .into_connection();

        let service = PlayerService::new(Arc::new(db));
        let err = service.daily_login(1).await.unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_daily_login_saturates_near_the_points_ceiling() {
        let yesterday = Utc::now() - Duration::days(1);
        let before = player(i64::MAX - 1, yesterday);
        let after = players::Model {
            points: i64::MAX,
            last_login: Utc::now(),
            ..before.clone()
        };

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![before]])
            .append_query_results(vec![vec![after]])
            .into_connection();

        let service = PlayerService::new(Arc::new(db));
        let result = service.daily_login(1).await.unwrap();
        assert_eq!(result.points, i64::MAX);
    }

    #[tokio::test]
    async fn test_daily_login_unknown_player() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<players::Model>::new()])
            .into_connection();

        let service = PlayerService::new(Arc::new(db));
        let err = service.daily_login(42).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
