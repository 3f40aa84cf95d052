mod calculator;
mod evolution;

pub use calculator::*;
pub use evolution::*;
