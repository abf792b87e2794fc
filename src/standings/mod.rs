//! Standings: records, points and resistance tiebreakers.

pub mod calculator;

pub use calculator::{Standings, StandingRow, WIN_PCT_CAP, WIN_PCT_FLOOR};
