//! Round counters for list and header views.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How far the main phase has come.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundProgress {
    /// Main-phase rounds generated so far.
    pub generated: u32,
    /// Main-phase rounds the tournament plans to play.
    pub planned: u32,
    /// Generated rounds whose results are all in.
    pub counted: u32,
}

impl RoundProgress {
    /// Every planned round generated and fully reported.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.generated >= self.planned && self.counted == self.generated
    }

    /// Planned rounds not generated yet.
    #[must_use]
    pub fn remaining(&self) -> u32 {
        self.planned.saturating_sub(self.generated)
    }
}

impl fmt::Display for RoundProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Round {} of {} ({} counted)",
            self.generated, self.planned, self.counted
        )
    }
}
