pub mod action;
pub use action::*;

pub mod observation;
pub use observation::*;

pub mod strategy;
pub use strategy::*;

pub mod player;
pub use player::*;

pub mod table;
pub use table::*;

pub mod matchup;
pub use matchup::*;
