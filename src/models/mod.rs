pub mod boost;
pub mod player;
pub mod progress;

pub use boost::*;
pub use player::*;
pub use progress::*;
