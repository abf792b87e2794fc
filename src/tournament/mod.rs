//! The tournament aggregate and its progress counters.

pub mod progress;
pub mod state;

pub use progress::RoundProgress;
pub use state::Tournament;
