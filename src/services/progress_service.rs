use crate::entities::{
    level_entity as levels, level_prize_entity as level_prizes,
    player_level_entity as player_levels, player_entity as players, prize_entity as prizes,
};
use crate::error::{AppError, AppResult};
use crate::models::{
    AttachPrizeRequest, CompleteLevelRequest, CreateLevelRequest, LevelResponse,
    PlayerLevelResponse, PrizeResponse,
};
use chrono::Utc;
use rand::Rng;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use std::sync::Arc;

/// Picks the winning index out of a non-empty draw pool. The production
/// selector is uniform; tests inject a deterministic one.
pub trait PrizeSelector: Send + Sync {
    /// Returns an index in `0..len`. Callers guarantee `len > 0`.
    fn pick(&self, len: usize) -> usize;
}

pub struct UniformSelector;

impl PrizeSelector for UniformSelector {
    fn pick(&self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}

#[derive(Clone)]
pub struct ProgressService {
    pool: Arc<DatabaseConnection>,
    selector: Arc<dyn PrizeSelector>,
}

impl ProgressService {
    pub fn new(pool: Arc<DatabaseConnection>) -> Self {
        Self::with_selector(pool, Arc::new(UniformSelector))
    }

    pub fn with_selector(pool: Arc<DatabaseConnection>, selector: Arc<dyn PrizeSelector>) -> Self {
        Self { pool, selector }
    }

    pub async fn create_level(&self, request: CreateLevelRequest) -> AppResult<LevelResponse> {
        if request.title.trim().is_empty() {
            return Err(AppError::ValidationError(
                "Level title must not be empty".to_string(),
            ));
        }

        let created = levels::ActiveModel {
            title: Set(request.title),
            order: Set(request.order),
            ..Default::default()
        }
        .insert(&*self.pool)
        .await?;

        Ok(created.into())
    }

    pub async fn list_levels(&self) -> AppResult<Vec<LevelResponse>> {
        let list = levels::Entity::find()
            .order_by_asc(levels::Column::Order)
            .order_by_asc(levels::Column::Id)
            .all(&*self.pool)
            .await?;
        Ok(list.into_iter().map(Into::into).collect())
    }

    /// Create a prize and add it to the level's draw pool.
    pub async fn attach_prize(
        &self,
        level_id: i64,
        request: AttachPrizeRequest,
    ) -> AppResult<PrizeResponse> {
        let title = request.title.trim().to_string();
        if title.is_empty() {
            return Err(AppError::ValidationError(
                "Prize title must not be empty".to_string(),
            ));
        }
        if title.chars().count() > prizes::MAX_TITLE_LEN {
            return Err(AppError::ValidationError(format!(
                "Prize title must be at most {} characters",
                prizes::MAX_TITLE_LEN
            )));
        }

        let txn = self.pool.begin().await?;

        levels::Entity::find_by_id(level_id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound("Level not found".to_string()))?;

        let prize = prizes::ActiveModel {
            title: Set(title),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        level_prizes::ActiveModel {
            level_id: Set(level_id),
            prize_id: Set(prize.id),
            received: Set(None),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;
        Ok(prize.into())
    }

    /// Create the progress record for a player starting a level.
    pub async fn start_level(&self, player_id: i64, level_id: i64) -> AppResult<PlayerLevelResponse> {
        players::Entity::find_by_id(player_id)
            .one(&*self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Player not found".to_string()))?;
        levels::Entity::find_by_id(level_id)
            .one(&*self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Level not found".to_string()))?;

        let existing = player_levels::Entity::find()
            .filter(player_levels::Column::PlayerId.eq(player_id))
            .filter(player_levels::Column::LevelId.eq(level_id))
            .one(&*self.pool)
            .await?;
        if existing.is_some() {
            return Err(AppError::ValidationError(
                "Level already started".to_string(),
            ));
        }

        let created = player_levels::ActiveModel {
            player_id: Set(player_id),
            level_id: Set(level_id),
            completed: Set(None),
            is_completed: Set(false),
            score: Set(0),
            ..Default::default()
        }
        .insert(&*self.pool)
        .await?;

        Ok(created.into())
    }

    /// Mark a progress record finished with its final score.
    pub async fn complete_level(
        &self,
        player_level_id: i64,
        request: CompleteLevelRequest,
    ) -> AppResult<PlayerLevelResponse> {
        if request.score < 0 {
            return Err(AppError::ValidationError(
                "Score must be non-negative".to_string(),
            ));
        }

        let progress = player_levels::Entity::find_by_id(player_level_id)
            .one(&*self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Level progress not found".to_string()))?;
        if progress.is_completed {
            return Err(AppError::ValidationError(
                "Level already completed".to_string(),
            ));
        }

        let mut am = progress.into_active_model();
        am.is_completed = Set(true);
        am.completed = Set(Some(Utc::now().date_naive()));
        am.score = Set(request.score);
        let updated = am.update(&*self.pool).await?;

        Ok(updated.into())
    }

    /// Randomly award one of the level's unclaimed prizes.
    ///
    /// Returns `None` without touching anything when the level is not
    /// completed or its pool is exhausted. A candidate is claimed with a
    /// compare-and-swap on `received IS NULL`, so two racing award calls
    /// can never claim the same row; losing a race drops that candidate
    /// and redraws from the rest.
    pub async fn award_prize(&self, player_level_id: i64) -> AppResult<Option<String>> {
        let txn = self.pool.begin().await?;

        let progress = player_levels::Entity::find_by_id(player_level_id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound("Level progress not found".to_string()))?;

        if !progress.is_completed {
            return Ok(None);
        }

        let mut pool_rows = level_prizes::Entity::find()
            .filter(level_prizes::Column::LevelId.eq(progress.level_id))
            .filter(level_prizes::Column::Received.is_null())
            .all(&txn)
            .await?;

        let today = Utc::now().date_naive();
        while !pool_rows.is_empty() {
            let index = self.selector.pick(pool_rows.len());
            let candidate = pool_rows.swap_remove(index);

            let claim = level_prizes::Entity::update_many()
                .col_expr(level_prizes::Column::Received, Expr::value(today))
                .filter(level_prizes::Column::Id.eq(candidate.id))
                .filter(level_prizes::Column::Received.is_null())
                .exec(&txn)
                .await?;

            if claim.rows_affected == 1 {
                let prize = prizes::Entity::find_by_id(candidate.prize_id)
                    .one(&txn)
                    .await?
                    .ok_or_else(|| {
                        AppError::InternalError("Prize row missing for claimed award".to_string())
                    })?;
                txn.commit().await?;
                log::info!(
                    "Awarded prize '{}' for level progress #{player_level_id}",
                    prize.title
                );
                return Ok(Some(prize.title));
            }
            // Lost the claim race on this row, redraw from the rest
        }

        txn.commit().await?;
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    struct FixedSelector(usize);

    impl PrizeSelector for FixedSelector {
        fn pick(&self, len: usize) -> usize {
            self.0.min(len - 1)
        }
    }

    fn progress(is_completed: bool) -> player_levels::Model {
        player_levels::Model {
            id: 7,
            player_id: 1,
            level_id: 3,
            completed: is_completed.then(|| NaiveDate::from_ymd_opt(2026, 8, 20).unwrap()),
            is_completed,
            score: 100,
        }
    }

    fn pool_row(id: i64, prize_id: i64) -> level_prizes::Model {
        level_prizes::Model {
            id,
            level_id: 3,
            prize_id,
            received: None,
        }
    }

    #[test]
    fn test_uniform_selector_stays_in_bounds() {
        let selector = UniformSelector;
        for len in 1..=20 {
            for _ in 0..50 {
                assert!(selector.pick(len) < len);
            }
        }
    }

    #[tokio::test]
    async fn test_award_prize_returns_none_for_incomplete_level() {
        // Only the progress lookup is queued: no pool read, no write
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![progress(false)]])
            .into_connection();

        let service = ProgressService::with_selector(Arc::new(db), Arc::new(FixedSelector(0)));
        let result = service.award_prize(7).await.unwrap();
        assert_eq!(result, None);
    }

    #[tokio::test]
    async fn test_award_prize_claims_the_single_eligible_prize() {
        let gold = prizes::Model {
            id: 5,
            title: "Gold".to_string(),
        };

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![progress(true)]])
            .append_query_results(vec![vec![pool_row(11, 5)]])
            .append_exec_results(vec![MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .append_query_results(vec![vec![gold]])
            .into_connection();

        let service = ProgressService::with_selector(Arc::new(db), Arc::new(FixedSelector(0)));
        let result = service.award_prize(7).await.unwrap();
        assert_eq!(result.as_deref(), Some("Gold"));
    }

    #[tokio::test]
    async fn test_award_prize_returns_none_for_empty_pool() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![progress(true)]])
            .append_query_results(vec![Vec::<level_prizes::Model>::new()])
            .into_connection();

        let service = ProgressService::with_selector(Arc::new(db), Arc::new(FixedSelector(0)));
        let result = service.award_prize(7).await.unwrap();
        assert_eq!(result, None);
    }

    #[tokio::test]
    async fn test_award_prize_redraws_after_losing_the_claim_race() {
        let silver = prizes::Model {
            id: 6,
            title: "Silver".to_string(),
        };

        // First claim loses the compare-and-swap (0 rows), second wins
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![progress(true)]])
            .append_query_results(vec![vec![pool_row(11, 5), pool_row(12, 6)]])
            .append_exec_results(vec![
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 0,
                },
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
            ])
            .append_query_results(vec![vec![silver]])
            .into_connection();

        let service = ProgressService::with_selector(Arc::new(db), Arc::new(FixedSelector(0)));
        let result = service.award_prize(7).await.unwrap();
        assert_eq!(result.as_deref(), Some("Silver"));
    }

    #[tokio::test]
    async fn test_complete_level_rejects_negative_score() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let service = ProgressService::new(Arc::new(db));
        let err = service
            .complete_level(7, CompleteLevelRequest { score: -1 })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }
}
