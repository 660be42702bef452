pub mod config;
pub use config::*;

pub mod progress;
pub use progress::*;

pub mod trainer;
pub use trainer::*;
