use std::collections::HashSet;

use chrono::NaiveDate;
use serde::Serialize;

use crate::model::Match;

const FRIENDLY_MARKERS: &[&str] = &["friendly", "friendlies", "amichevole", "amichevoli"];

/// Keeps matches from the tracked competitions and drops friendlies.
/// Matches without a competition name are dropped too.
pub fn filter_competitions(matches: Vec<Match>, tracked: &[String]) -> Vec<Match> {
    matches
        .into_iter()
        .filter(|m| {
            let Some(name) = m.competition.as_deref() else {
                return false;
            };
            let lowered = name.to_lowercase();
            let friendly = FRIENDLY_MARKERS.iter().any(|f| lowered.contains(f));
            !friendly && tracked.iter().any(|t| lowered.contains(t.as_str()))
        })
        .collect()
}

/// Oldest first; matches without a kickoff keep their order at the end.
pub fn sort_by_kickoff(matches: &mut [Match]) {
    matches.sort_by_key(|m| (m.kickoff.is_none(), m.kickoff));
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DaySummary {
    pub live: usize,
    pub competitions: usize,
    pub today: usize,
}

pub fn day_summary(matches: &[Match], today: NaiveDate) -> DaySummary {
    let live = matches.iter().filter(|m| m.is_live()).count();
    let competitions = matches
        .iter()
        .filter_map(|m| m.competition.as_deref())
        .collect::<HashSet<_>>()
        .len();
    let today = matches
        .iter()
        .filter(|m| m.kickoff.is_some_and(|k| k.date_naive() == today))
        .count();
    DaySummary {
        live,
        competitions,
        today,
    }
}
