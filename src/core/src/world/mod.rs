pub mod lookup;
pub mod notification;
pub mod phase;
pub mod production;
pub mod world;

pub use lookup::*;
pub use notification::*;
pub use phase::*;
pub use production::*;
pub use world::*;
