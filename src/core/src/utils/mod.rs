mod logging;
mod random;
mod weighted;

pub use logging::*;
pub use random::*;
pub use weighted::*;
