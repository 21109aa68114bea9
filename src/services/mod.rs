pub mod boost_service;
pub mod export_service;
pub mod player_service;
pub mod progress_service;

pub use boost_service::*;
pub use export_service::*;
pub use player_service::*;
pub use progress_service::*;
