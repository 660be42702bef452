pub mod geneset;
pub use geneset::*;

pub mod population;
pub use population::*;
