pub mod boosts;
pub mod level_prizes;
pub mod levels;
pub mod player_boosts;
pub mod player_levels;
pub mod players;
pub mod prizes;

pub use boosts as boost_entity;
pub use level_prizes as level_prize_entity;
pub use levels as level_entity;
pub use player_boosts as player_boost_entity;
pub use player_levels as player_level_entity;
pub use players as player_entity;
pub use prizes as prize_entity;
