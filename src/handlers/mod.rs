pub mod boost;
pub mod export;
pub mod player;
pub mod progress;

pub use boost::boost_config;
pub use export::export_config;
pub use player::player_config;
pub use progress::progress_config;
