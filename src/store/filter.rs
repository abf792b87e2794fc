//! Tournament list: filtering and one-line summaries.

use chrono::{DateTime, Utc};

use super::{StoreError, TournamentStore};
use crate::core::{EventKind, Format, TournamentId};
use crate::tournament::{RoundProgress, Tournament};

/// Criteria for the tournament list. Empty fields match everything.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TournamentFilter {
    /// Case-insensitive substring of the name.
    pub query: Option<String>,
    pub format: Option<Format>,
    pub kind: Option<EventKind>,
    /// Exact number of planned rounds.
    pub rounds: Option<u32>,
}

impl TournamentFilter {
    #[must_use]
    pub fn with_query(mut self, query: &str) -> Self {
        let query = query.trim().to_lowercase();
        self.query = (!query.is_empty()).then_some(query);
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: Format) -> Self {
        self.format = Some(format);
        self
    }

    #[must_use]
    pub fn with_kind(mut self, kind: EventKind) -> Self {
        self.kind = Some(kind);
        self
    }

    #[must_use]
    pub fn with_rounds(mut self, rounds: u32) -> Self {
        self.rounds = Some(rounds);
        self
    }

    #[must_use]
    pub fn matches(&self, tournament: &Tournament) -> bool {
        let config = tournament.config();
        if let Some(query) = &self.query {
            if !config.name.to_lowercase().contains(&query.to_lowercase()) {
                return false;
            }
        }
        self.format.map_or(true, |f| f == config.format)
            && self.kind.map_or(true, |k| k == config.kind)
            && self.rounds.map_or(true, |r| r == tournament.rounds_planned())
    }
}

/// One row of the tournament list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TournamentSummary {
    pub id: TournamentId,
    pub name: String,
    pub format: Format,
    pub kind: EventKind,
    pub players: usize,
    pub progress: RoundProgress,
    pub finalized: bool,
    pub updated_at: DateTime<Utc>,
}

impl TournamentSummary {
    #[must_use]
    pub fn of(tournament: &Tournament) -> Self {
        let config = tournament.config();
        Self {
            id: tournament.id(),
            name: config.name.clone(),
            format: config.format,
            kind: config.kind,
            players: tournament.roster().len(),
            progress: tournament.progress(),
            finalized: tournament.is_finalized(),
            updated_at: tournament.updated_at(),
        }
    }

    /// "Cup • Bo1 • 5 rounds • Updated 3h ago"
    #[must_use]
    pub fn meta_line(&self, now: DateTime<Utc>) -> String {
        format!(
            "{} • {} • {} rounds • Updated {}",
            self.kind,
            self.format,
            self.progress.planned,
            age_label(self.updated_at, now)
        )
    }
}

/// Short relative age: "just now", "12m ago", "5h ago", "3d ago".
///
/// Hours are shown up to 48 before switching to days.
#[must_use]
pub fn age_label(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let mins = (now - then).num_minutes();
    if mins < 1 {
        return "just now".to_string();
    }
    if mins < 60 {
        return format!("{}m ago", mins);
    }
    let hours = mins / 60;
    if hours < 48 {
        return format!("{}h ago", hours);
    }
    format!("{}d ago", hours / 24)
}

/// Matching tournaments, most recently updated first.
pub fn list<S: TournamentStore + ?Sized>(
    store: &S,
    filter: &TournamentFilter,
) -> Result<Vec<TournamentSummary>, StoreError> {
    Ok(store
        .get_all()?
        .iter()
        .filter(|t| filter.matches(t))
        .map(TournamentSummary::of)
        .collect())
}
