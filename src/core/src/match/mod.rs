pub mod engine;
pub mod fixture;
pub mod result;
pub mod squad;

pub use engine::*;
pub use fixture::*;
pub use result::*;
pub use squad::*;
