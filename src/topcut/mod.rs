//! Single-elimination bracket played after the main phase.

pub mod bracket;

pub use bracket::{advance, fold_pairings, seed_bracket, stage_label, BracketState, StageAdvance};
