pub mod bracket;
pub mod cup;

pub use bracket::*;
pub use cup::*;
