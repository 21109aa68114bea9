use crate::entities::{
    level_entity as levels, level_prize_entity as level_prizes,
    player_level_entity as player_levels, player_entity as players, prize_entity as prizes,
};
use crate::error::{AppError, AppResult};
use actix_web::web::Bytes;
use futures_util::{Stream, stream};
use sea_orm::{
    DatabaseConnection, EntityTrait, JoinType, QueryOrder, QuerySelect, RelationTrait,
};
use std::collections::VecDeque;
use std::sync::Arc;

pub const CSV_HEADER: &str = "Player ID,Level Title,Is Completed,Prize\n";

/// Rows are fetched in fixed-size pages so the stream never holds more
/// than one page in memory.
const EXPORT_PAGE_SIZE: u64 = 256;

/// One joined (player, level, completion, prize-title) tuple. A progress
/// row repeats once per prize linked to its level; the prize is None
/// when the level has no linked prizes.
type ExportRow = (String, String, bool, Option<String>);

#[derive(Clone)]
pub struct ExportService {
    pool: Arc<DatabaseConnection>,
}

impl ExportService {
    pub fn new(pool: Arc<DatabaseConnection>) -> Self {
        Self { pool }
    }

    /// Lazily streamed CSV body for the `users.csv` report: the header
    /// line, then one line per joined tuple. Consumed once; a fresh
    /// stream is created per request.
    pub fn stream_users_csv(&self) -> impl Stream<Item = Result<Bytes, AppError>> + 'static {
        csv_stream(self.pool.clone())
    }
}

/// Comma-joined line, no quoting. Booleans render as True/False to keep
/// the historical report format stable for downstream consumers.
fn render_line(row: ExportRow) -> String {
    let (player_ref, level_title, is_completed, prize) = row;
    format!(
        "{},{},{},{}\n",
        player_ref,
        level_title,
        if is_completed { "True" } else { "False" },
        prize.unwrap_or_default()
    )
}

async fn fetch_page(db: &DatabaseConnection, page: u64) -> AppResult<Vec<ExportRow>> {
    let rows = player_levels::Entity::find()
        .select_only()
        .column_as(players::Column::PlayerId, "player_ref")
        .column_as(levels::Column::Title, "level_title")
        .column(player_levels::Column::IsCompleted)
        .column_as(prizes::Column::Title, "prize_title")
        .join(JoinType::InnerJoin, player_levels::Relation::Player.def())
        .join(JoinType::InnerJoin, player_levels::Relation::Level.def())
        .join(
            JoinType::LeftJoin,
            level_prizes::Relation::Level.def().rev(),
        )
        .join(JoinType::LeftJoin, level_prizes::Relation::Prize.def())
        .order_by_asc(player_levels::Column::Id)
        .order_by_asc(level_prizes::Column::Id)
        .offset(page * EXPORT_PAGE_SIZE)
        .limit(EXPORT_PAGE_SIZE)
        .into_tuple::<ExportRow>()
        .all(db)
        .await?;
    Ok(rows)
}

struct CsvStreamState {
    db: Arc<DatabaseConnection>,
    page: u64,
    lines: VecDeque<String>,
    header_sent: bool,
    exhausted: bool,
}

fn csv_stream(db: Arc<DatabaseConnection>) -> impl Stream<Item = Result<Bytes, AppError>> + 'static {
    let state = CsvStreamState {
        db,
        page: 0,
        lines: VecDeque::new(),
        header_sent: false,
        exhausted: false,
    };

    stream::unfold(state, |mut state| async move {
        if !state.header_sent {
            state.header_sent = true;
            return Some((Ok(Bytes::from_static(CSV_HEADER.as_bytes())), state));
        }

        loop {
            if let Some(line) = state.lines.pop_front() {
                return Some((Ok(Bytes::from(line)), state));
            }
            if state.exhausted {
                return None;
            }
            match fetch_page(&state.db, state.page).await {
                Ok(rows) => {
                    if (rows.len() as u64) < EXPORT_PAGE_SIZE {
                        state.exhausted = true;
                    }
                    state.page += 1;
                    state.lines.extend(rows.into_iter().map(render_line));
                }
                Err(e) => {
                    // Terminate after surfacing the error once
                    state.exhausted = true;
                    state.lines.clear();
                    return Some((Err(e), state));
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_line_with_prize() {
        let row = (
            "p1".to_string(),
            "Intro".to_string(),
            true,
            Some("Gold".to_string()),
        );
        assert_eq!(render_line(row), "p1,Intro,True,Gold\n");
    }

    #[test]
    fn test_render_line_without_prize() {
        let row = ("p2".to_string(), "Caves".to_string(), false, None);
        assert_eq!(render_line(row), "p2,Caves,False,\n");
    }

    #[test]
    fn test_header_matches_report_contract() {
        assert_eq!(CSV_HEADER, "Player ID,Level Title,Is Completed,Prize\n");
    }

    #[test]
    fn test_single_completed_row_scenario() {
        // One player, one completed level, one linked prize
        let rows = vec![(
            "p1".to_string(),
            "Intro".to_string(),
            true,
            Some("Gold".to_string()),
        )];
        let body: String = std::iter::once(CSV_HEADER.to_string())
            .chain(rows.into_iter().map(render_line))
            .collect();
        assert_eq!(
            body,
            "Player ID,Level Title,Is Completed,Prize\np1,Intro,True,Gold\n"
        );
    }
}
