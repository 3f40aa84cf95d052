pub mod ai;
pub mod club;
pub mod history;
pub mod player;
pub mod tactics;

pub use ai::*;
pub use club::*;
pub use history::*;
pub use player::*;
pub use tactics::*;
