pub mod commentary;
pub mod duel;
pub mod engine;

pub use commentary::*;
pub use duel::*;
pub use engine::*;
