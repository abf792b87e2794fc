//! Draft/commit editing of round results.
//!
//! Result entry never writes to a round directly. Edits go into a
//! `RoundDraft`, and `DraftController::commit` swaps the whole round in one
//! step once every buffered outcome is legal.

pub mod controller;
pub mod round_draft;

pub use controller::{CommitReceipt, DraftController, DraftState};
pub use round_draft::RoundDraft;
