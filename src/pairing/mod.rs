//! Main-phase pairing: Swiss (result-driven) and round robin (fixed).

pub mod round_robin;
pub mod swiss;

pub use round_robin::RoundRobinSchedule;
pub use swiss::{pair_swiss_round, PairingHistory};
