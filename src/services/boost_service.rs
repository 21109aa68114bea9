use crate::entities::{
    boost_entity as boosts, player_boost_entity as player_boosts, player_entity as players,
};
use crate::error::{AppError, AppResult};
use crate::models::{
    ApplyBoostResponse, BoostResponse, CreateBoostRequest, GrantBoostRequest, PlayerBoostResponse,
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryOrder, Set,
    TransactionTrait,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct BoostService {
    pool: Arc<DatabaseConnection>,
}

impl BoostService {
    pub fn new(pool: Arc<DatabaseConnection>) -> Self {
        Self { pool }
    }

    pub async fn create_boost(&self, request: CreateBoostRequest) -> AppResult<BoostResponse> {
        if request.title.trim().is_empty() {
            return Err(AppError::ValidationError(
                "Boost title must not be empty".to_string(),
            ));
        }

        let created = boosts::ActiveModel {
            title: Set(request.title),
            description: Set(request.description),
            effect: Set(request.effect),
            ..Default::default()
        }
        .insert(&*self.pool)
        .await?;

        Ok(created.into())
    }

    pub async fn list_boosts(&self) -> AppResult<Vec<BoostResponse>> {
        let list = boosts::Entity::find()
            .order_by_asc(boosts::Column::Id)
            .all(&*self.pool)
            .await?;
        Ok(list.into_iter().map(Into::into).collect())
    }

    /// Hand a catalog boost to a player. The grant starts active and can
    /// be applied once.
    pub async fn grant_boost(
        &self,
        player_id: i64,
        request: GrantBoostRequest,
    ) -> AppResult<PlayerBoostResponse> {
        players::Entity::find_by_id(player_id)
            .one(&*self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Player not found".to_string()))?;
        boosts::Entity::find_by_id(request.boost_id)
            .one(&*self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Boost not found".to_string()))?;

        let created = player_boosts::ActiveModel {
            player_id: Set(player_id),
            boost_id: Set(request.boost_id),
            active: Set(true),
            applied_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&*self.pool)
        .await?;

        Ok(created.into())
    }

    /// Apply a granted boost to its player.
    ///
    /// Credits the boost's signed effect to the player's points (floored
    /// at zero) and deactivates the grant. Both writes happen in one
    /// transaction, so a spent grant can never re-award its effect.
    pub async fn apply_boost(&self, player_boost_id: i64) -> AppResult<ApplyBoostResponse> {
        let txn = self.pool.begin().await?;

        let grant = player_boosts::Entity::find_by_id(player_boost_id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound("Boost grant not found".to_string()))?;

        if !grant.active {
            return Err(AppError::ValidationError(
                "Boost inactive for this player".to_string(),
            ));
        }

        let boost = boosts::Entity::find_by_id(grant.boost_id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound("Boost not found".to_string()))?;
        let player = players::Entity::find_by_id(grant.player_id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound("Player not found".to_string()))?;

        // Points stay non-negative even for draining effects; the addition
        // saturates since effect is arbitrary client input
        let new_points = player.points.saturating_add(boost.effect).max(0);
        let player_id = player.id;
        let mut player_am = player.into_active_model();
        player_am.points = Set(new_points);
        player_am.last_login = Set(Utc::now());
        player_am.update(&txn).await?;

        let mut grant_am = grant.into_active_model();
        grant_am.active = Set(false);
        grant_am.applied_at = Set(Utc::now());
        grant_am.update(&txn).await?;

        txn.commit().await?;

        log::info!(
            "Applied boost #{} to player #{player_id}: effect {}, points {new_points}",
            boost.id,
            boost.effect
        );
        Ok(ApplyBoostResponse {
            player_id,
            effect: boost.effect,
            points: new_points,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn grant(active: bool) -> player_boosts::Model {
        player_boosts::Model {
            id: 10,
            player_id: 1,
            boost_id: 2,
            active,
            applied_at: Utc::now(),
        }
    }

    fn boost(effect: i64) -> boosts::Model {
        boosts::Model {
            id: 2,
            title: "Double trouble".to_string(),
            description: String::new(),
            effect,
        }
    }

    fn player(points: i64) -> players::Model {
        players::Model {
            id: 1,
            player_id: "p1".to_string(),
            first_login: Utc::now(),
            last_login: Utc::now(),
            points,
        }
    }

    fn apply_mock(
        grant_row: player_boosts::Model,
        boost_row: boosts::Model,
        player_row: players::Model,
        points_after: i64,
    ) -> Arc<DatabaseConnection> {
        let updated_player = players::Model {
            points: points_after,
            ..player_row.clone()
        };
        let spent_grant = player_boosts::Model {
            active: false,
            ..grant_row.clone()
        };

        Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results(vec![vec![grant_row]])
                .append_query_results(vec![vec![boost_row]])
                .append_query_results(vec![vec![player_row]])
                .append_query_results(vec![vec![updated_player]])
                .append_query_results(vec![vec![spent_grant]])
                .into_connection(),
        )
    }

    #[tokio::test]
    async fn test_apply_boost_credits_effect_and_deactivates() {
        let db = apply_mock(grant(true), boost(10), player(20), 30);

        let service = BoostService::new(db.clone());
        let result = service.apply_boost(10).await.unwrap();
        assert_eq!(result.player_id, 1);
        assert_eq!(result.effect, 10);
        assert_eq!(result.points, 30);

        // The deactivation write must actually be issued, in the same
        // transaction as the points update
        drop(service);
        let log = format!(
            "{:?}",
            Arc::try_unwrap(db).unwrap().into_transaction_log()
        );
        assert!(log.contains(r#"UPDATE "players" SET"#), "{log}");
        assert!(
            log.contains(r#"UPDATE "player_boosts" SET "active""#),
            "{log}"
        );
    }

    #[tokio::test]
    async fn test_apply_boost_negative_effect_floors_at_zero() {
        let db = apply_mock(grant(true), boost(-50), player(20), 0);

        let service = BoostService::new(db);
        let result = service.apply_boost(10).await.unwrap();
        assert_eq!(result.effect, -50);
        assert_eq!(result.points, 0);
    }

    #[tokio::test]
    async fn test_apply_boost_huge_effect_saturates() {
        let db = apply_mock(grant(true), boost(i64::MAX), player(1), i64::MAX);

        let service = BoostService::new(db);
        let result = service.apply_boost(10).await.unwrap();
        assert_eq!(result.points, i64::MAX);
    }

    #[tokio::test]
    async fn test_apply_boost_rejects_inactive_grant() {
        // Only the grant lookup is queued: the service must bail out
        // before touching the player
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![grant(false)]])
            .into_connection();

        let service = BoostService::new(Arc::new(db));
        let err = service.apply_boost(10).await.unwrap_err();
        match err {
            AppError::ValidationError(msg) => {
                assert_eq!(msg, "Boost inactive for this player")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_apply_boost_unknown_grant() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<player_boosts::Model>::new()])
            .into_connection();

        let service = BoostService::new(Arc::new(db));
        let err = service.apply_boost(99).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
