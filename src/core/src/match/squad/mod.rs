pub mod selector;
pub mod squad;

pub use selector::*;
pub use squad::*;
