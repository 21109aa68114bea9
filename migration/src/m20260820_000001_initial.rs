use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum Players {
    Table,
    Id,
    PlayerId,
    FirstLogin,
    LastLogin,
    Points,
}

#[derive(DeriveIden)]
enum Boosts {
    Table,
    Id,
    Title,
    Description,
    Effect,
}

#[derive(DeriveIden)]
enum PlayerBoosts {
    Table,
    Id,
    PlayerId,
    BoostId,
    Active,
    AppliedAt,
}

#[derive(DeriveIden)]
enum Levels {
    Table,
    Id,
    Title,
    Ord,
}

/// Prize titles are capped at 52 characters.
#[derive(DeriveIden)]
enum Prizes {
    Table,
    Id,
    Title,
}

/// Eligibility link between a level and a prize.
/// `received` stays NULL until an award event claims the row.
#[derive(DeriveIden)]
enum LevelPrizes {
    Table,
    Id,
    LevelId,
    PrizeId,
    Received,
}

#[derive(DeriveIden)]
enum PlayerLevels {
    Table,
    Id,
    PlayerId,
    LevelId,
    Completed,
    IsCompleted,
    Score,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Players (points ledger)
        manager
            .create_table(
                Table::create()
                    .table(Players::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Players::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Players::PlayerId).string_len(100).not_null())
                    .col(
                        ColumnDef::new(Players::FirstLogin)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .col(
                        ColumnDef::new(Players::LastLogin)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .col(
                        ColumnDef::new(Players::Points)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .to_owned(),
            )
            .await?;

        // One record per external identity
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_players_player_id_unique")
                    .table(Players::Table)
                    .col(Players::PlayerId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Boost catalog
        manager
            .create_table(
                Table::create()
                    .table(Boosts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Boosts::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Boosts::Title).string_len(100).not_null())
                    .col(
                        ColumnDef::new(Boosts::Description)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Boosts::Effect).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // Boost grants
        manager
            .create_table(
                Table::create()
                    .table(PlayerBoosts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PlayerBoosts::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(PlayerBoosts::PlayerId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PlayerBoosts::BoostId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PlayerBoosts::Active)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(PlayerBoosts::AppliedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_player_boosts_player")
                            .from(PlayerBoosts::Table, PlayerBoosts::PlayerId)
                            .to(Players::Table, Players::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_player_boosts_boost")
                            .from(PlayerBoosts::Table, PlayerBoosts::BoostId)
                            .to(Boosts::Table, Boosts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Level catalog
        manager
            .create_table(
                Table::create()
                    .table(Levels::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Levels::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Levels::Title).string_len(100).not_null())
                    .col(ColumnDef::new(Levels::Ord).integer().not_null().default(0))
                    .to_owned(),
            )
            .await?;

        // Prize catalog
        manager
            .create_table(
                Table::create()
                    .table(Prizes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Prizes::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Prizes::Title).string_len(52).not_null())
                    .to_owned(),
            )
            .await?;

        // Level/prize eligibility
        manager
            .create_table(
                Table::create()
                    .table(LevelPrizes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(LevelPrizes::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(LevelPrizes::LevelId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(LevelPrizes::PrizeId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(LevelPrizes::Received).date())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_level_prizes_level")
                            .from(LevelPrizes::Table, LevelPrizes::LevelId)
                            .to(Levels::Table, Levels::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_level_prizes_prize")
                            .from(LevelPrizes::Table, LevelPrizes::PrizeId)
                            .to(Prizes::Table, Prizes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Per-player level progress
        manager
            .create_table(
                Table::create()
                    .table(PlayerLevels::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PlayerLevels::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(PlayerLevels::PlayerId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PlayerLevels::LevelId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(PlayerLevels::Completed).date())
                    .col(
                        ColumnDef::new(PlayerLevels::IsCompleted)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(PlayerLevels::Score)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_player_levels_player")
                            .from(PlayerLevels::Table, PlayerLevels::PlayerId)
                            .to(Players::Table, Players::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_player_levels_level")
                            .from(PlayerLevels::Table, PlayerLevels::LevelId)
                            .to(Levels::Table, Levels::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One progress record per (player, level) pair
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_player_levels_player_level_unique")
                    .table(PlayerLevels::Table)
                    .col(PlayerLevels::PlayerId)
                    .col(PlayerLevels::LevelId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PlayerLevels::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(LevelPrizes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Prizes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Levels::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PlayerBoosts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Boosts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Players::Table).to_owned())
            .await?;
        Ok(())
    }
}
