pub mod attributes;
pub mod badges;
pub mod builder;
pub mod calculators;
pub mod contract;
pub mod player;
pub mod positions;
pub mod statistics;

pub use attributes::*;
pub use badges::*;
pub use builder::*;
pub use calculators::*;
pub use contract::*;
pub use player::*;
pub use positions::*;
pub use statistics::*;
