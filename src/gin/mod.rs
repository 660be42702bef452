pub mod group;
pub use group::*;

pub mod meld;
pub use meld::*;

pub mod cache;
pub use cache::*;

pub mod solver;
pub use solver::*;

pub mod hand;
pub use hand::*;
