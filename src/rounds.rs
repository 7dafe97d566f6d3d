use serde::Serialize;

use crate::model::Match;
use crate::status::MatchStatus;

pub const DEFAULT_ROUND: u32 = 1;

/// Round picked for default display plus the neighbour the view can toggle to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoundWindow {
    pub current: u32,
    pub last_completed: Option<u32>,
    pub next: Option<u32>,
}

impl RoundWindow {
    /// Flips between the current round and the frontier round.
    pub fn toggle(&self, shown: u32) -> u32 {
        match self.next {
            Some(next) if shown == self.current && next != self.current => next,
            _ => self.current,
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct RoundScan {
    max_live: Option<u32>,
    max_finished: Option<u32>,
    min_scheduled: Option<u32>,
}

fn scan<'a, I>(entries: I) -> RoundScan
where
    I: IntoIterator<Item = (u32, &'a MatchStatus)>,
{
    let mut out = RoundScan::default();
    for (round, status) in entries {
        if round == 0 {
            continue;
        }
        if status.is_live_family() {
            out.max_live = Some(out.max_live.map_or(round, |r| r.max(round)));
        } else if status.is_finished() {
            out.max_finished = Some(out.max_finished.map_or(round, |r| r.max(round)));
        } else if status.is_scheduled() {
            out.min_scheduled = Some(out.min_scheduled.map_or(round, |r| r.min(round)));
        }
    }
    out
}

/// Live rounds win (highest), then the latest finished round, then the
/// earliest scheduled one, then round 1.
pub fn resolve_current_round<'a, I>(entries: I) -> u32
where
    I: IntoIterator<Item = (u32, &'a MatchStatus)>,
{
    let s = scan(entries);
    s.max_live
        .or(s.max_finished)
        .or(s.min_scheduled)
        .unwrap_or(DEFAULT_ROUND)
}

pub fn resolve_window<'a, I>(entries: I) -> RoundWindow
where
    I: IntoIterator<Item = (u32, &'a MatchStatus)>,
{
    let s = scan(entries);
    let current = s
        .max_live
        .or(s.max_finished)
        .or(s.min_scheduled)
        .unwrap_or(DEFAULT_ROUND);
    let next = match s.max_finished {
        Some(done) => {
            let after = done.saturating_add(1);
            Some(s.max_live.map_or(after, |live| live.max(after)))
        }
        None => s.max_live.or(s.min_scheduled),
    };
    RoundWindow {
        current,
        last_completed: s.max_finished,
        next,
    }
}

fn round_entries(matches: &[Match]) -> impl Iterator<Item = (u32, &MatchStatus)> {
    matches
        .iter()
        .filter_map(|m| m.round.map(|r| (r, &m.status)))
}

pub fn current_round_for(matches: &[Match]) -> u32 {
    resolve_current_round(round_entries(matches))
}

pub fn window_for(matches: &[Match]) -> RoundWindow {
    resolve_window(round_entries(matches))
}

#[derive(Debug, Clone, Serialize)]
pub struct RoundView<'a> {
    pub round: u32,
    pub live: Vec<&'a Match>,
    pub others: Vec<&'a Match>,
}

impl RoundView<'_> {
    pub fn is_empty(&self) -> bool {
        self.live.is_empty() && self.others.is_empty()
    }

    pub fn len(&self) -> usize {
        self.live.len() + self.others.len()
    }
}

/// Matches of one round, live ones first; both groups keep upstream order.
pub fn round_view(matches: &[Match], round: u32) -> RoundView<'_> {
    let (live, others): (Vec<&Match>, Vec<&Match>) = matches
        .iter()
        .filter(|m| m.round == Some(round))
        .partition(|m| m.is_live());
    RoundView {
        round,
        live,
        others,
    }
}

/// One display group: a numbered round, or a named stage ("Round of 16",
/// "Final") when the label carries no number.
#[derive(Debug, Clone, Serialize)]
pub struct RoundGroup<'a> {
    pub round: Option<u32>,
    pub label: Option<String>,
    pub matches: Vec<&'a Match>,
}

impl RoundGroup<'_> {
    fn same_key(&self, m: &Match) -> bool {
        match m.round {
            Some(round) => self.round == Some(round),
            None => self.round.is_none() && self.label == m.round_label,
        }
    }
}

/// Numbered rounds ascending, then named stages in label order, then matches
/// with neither. Upstream order is kept inside each group.
pub fn group_by_round(matches: &[Match]) -> Vec<RoundGroup<'_>> {
    let mut groups: Vec<RoundGroup<'_>> = Vec::new();
    for m in matches {
        match groups.iter_mut().find(|g| g.same_key(m)) {
            Some(group) => group.matches.push(m),
            None => groups.push(RoundGroup {
                round: m.round,
                label: m.round_label.clone(),
                matches: vec![m],
            }),
        }
    }
    groups.sort_by(|a, b| {
        let rank = |g: &RoundGroup<'_>| match (g.round, &g.label) {
            (Some(_), _) => 0,
            (None, Some(_)) => 1,
            (None, None) => 2,
        };
        rank(a)
            .cmp(&rank(b))
            .then(a.round.cmp(&b.round))
            .then_with(|| a.label.cmp(&b.label))
    });
    groups
}

/// Trailing matchday number of labels like "Regular Season - 12",
/// "Matchday 3" or plain "12". Knockout labels ("Round of 16", "Final")
/// have none.
pub fn parse_round_number(label: &str) -> Option<u32> {
    let trimmed = label.trim();
    if trimmed.to_ascii_lowercase().contains("round of") {
        return None;
    }
    let last = trimmed
        .rsplit(|c: char| c.is_whitespace() || c == '-')
        .find(|part| !part.is_empty())?;
    last.parse::<u32>().ok().filter(|n| *n > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::LivePhase;

    const LIVE: MatchStatus = MatchStatus::Live(LivePhase::InPlay);

    #[test]
    fn zero_rounds_are_ignored() {
        let entries = [(0, &MatchStatus::Finished), (3, &MatchStatus::Scheduled)];
        assert_eq!(resolve_current_round(entries), 3);
    }

    #[test]
    fn halftime_counts_as_live() {
        let entries = [(4, &MatchStatus::Finished), (2, &MatchStatus::Halftime)];
        assert_eq!(resolve_current_round(entries), 2);
    }

    #[test]
    fn live_frontier_beyond_completed_becomes_next() {
        let entries = [(1, &MatchStatus::Finished), (3, &LIVE)];
        let window = resolve_window(entries);
        assert_eq!(window.current, 3);
        assert_eq!(window.last_completed, Some(1));
        assert_eq!(window.next, Some(3));
    }

    #[test]
    fn round_labels() {
        assert_eq!(parse_round_number("Regular Season - 12"), Some(12));
        assert_eq!(parse_round_number("Matchday 3"), Some(3));
        assert_eq!(parse_round_number("League Stage - 8"), Some(8));
        assert_eq!(parse_round_number("7"), Some(7));
        assert_eq!(parse_round_number("Round of 16"), None);
        assert_eq!(parse_round_number("Final"), None);
        assert_eq!(parse_round_number("0"), None);
    }

    #[test]
    fn toggle_switches_between_current_and_next() {
        let window = RoundWindow {
            current: 2,
            last_completed: Some(2),
            next: Some(3),
        };
        assert_eq!(window.toggle(2), 3);
        assert_eq!(window.toggle(3), 2);
        let flat = RoundWindow {
            current: 1,
            last_completed: None,
            next: None,
        };
        assert_eq!(flat.toggle(1), 1);
    }
}
