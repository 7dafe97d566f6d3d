use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::status::MatchStatus;

pub const PLACEHOLDER_TEAM: &str = "TBD";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRef {
    pub id: String,
    pub name: String,
    pub crest: Option<String>,
}

impl TeamRef {
    pub fn new(id: impl Into<String>, name: impl Into<String>, crest: Option<String>) -> Self {
        let name = name.into();
        let name = if name.trim().is_empty() {
            PLACEHOLDER_TEAM.to_string()
        } else {
            name.trim().to_string()
        };
        Self {
            id: id.into(),
            name,
            crest: crest.filter(|c| !c.trim().is_empty()),
        }
    }

    /// Crest fallback: first letters of the name words, up to three.
    pub fn initials(&self) -> String {
        initials(&self.name)
    }
}

pub fn initials(name: &str) -> String {
    let trimmed = name.trim();
    let mut abbr = String::new();
    for part in trimmed.split_whitespace() {
        if let Some(ch) = part.chars().find(|c| c.is_alphanumeric()) {
            abbr.extend(ch.to_uppercase());
        }
        if abbr.chars().count() >= 3 {
            break;
        }
    }
    if abbr.is_empty() {
        return "?".to_string();
    }
    abbr
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub home: u32,
    pub away: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: String,
    pub home: TeamRef,
    pub away: TeamRef,
    pub status: MatchStatus,
    pub kickoff: Option<DateTime<Utc>>,
    pub round: Option<u32>,
    pub round_label: Option<String>,
    pub minute: Option<u16>,
    pub competition: Option<String>,
    pub venue: Option<String>,
    pub score: Option<Score>,
}

impl Match {
    pub fn is_live(&self) -> bool {
        self.status.is_live_family()
    }
}

/// Keeps the score only when the status says play has started. Unknown
/// statuses keep whatever pair the provider sent.
pub fn score_for_status(status: &MatchStatus, home: Option<u32>, away: Option<u32>) -> Option<Score> {
    let (home, away) = (home?, away?);
    match status.has_started() {
        Some(false) => None,
        Some(true) | None => Some(Score { home, away }),
    }
}

/// Fallback when the table omits the difference. Saturates instead of
/// wrapping on absurd goal counts.
pub fn goal_difference(goals_for: u32, goals_against: u32) -> i32 {
    let diff = i64::from(goals_for) - i64::from(goals_against);
    i32::try_from(diff).unwrap_or(if diff < 0 { i32::MIN } else { i32::MAX })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandingRow {
    pub team: TeamRef,
    pub rank: u32,
    pub played: u32,
    pub won: u32,
    pub drawn: u32,
    pub lost: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub goal_difference: i32,
    pub points: u32,
    pub form: Option<String>,
    pub group: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRef {
    pub id: String,
    pub name: String,
    pub photo: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStatRow {
    pub player: PlayerRef,
    pub team: TeamRef,
    pub goals: Option<u32>,
    pub assists: Option<u32>,
    pub appearances: Option<u32>,
    pub position: Option<String>,
    pub rating: Option<f32>,
    pub age: Option<u32>,
    pub nationality: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    Goal,
    Card,
    Sub,
    Var,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub minute: u16,
    pub extra: Option<u16>,
    pub kind: EventKind,
    pub team: String,
    pub player: Option<String>,
    pub assist: Option<String>,
    pub detail: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSlot {
    pub id: Option<u32>,
    pub name: String,
    pub number: Option<u32>,
    pub pos: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineupSide {
    pub team: TeamRef,
    pub formation: String,
    pub starting: Vec<PlayerSlot>,
    pub subs: Vec<PlayerSlot>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchLineups {
    pub sides: Vec<LineupSide>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatRow {
    pub name: String,
    pub home: String,
    pub away: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchDetail {
    pub fixture: Match,
    pub events: Vec<Event>,
    pub lineups: Option<MatchLineups>,
    pub stats: Vec<StatRow>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initials_take_first_letters() {
        assert_eq!(initials("Hellas Verona"), "HV");
        assert_eq!(initials("Paris Saint Germain FC"), "PSG");
        assert_eq!(initials("napoli"), "N");
        assert_eq!(initials("   "), "?");
    }

    #[test]
    fn blank_names_become_placeholder() {
        let team = TeamRef::new("1", "  ", Some(String::new()));
        assert_eq!(team.name, PLACEHOLDER_TEAM);
        assert!(team.crest.is_none());
    }

    #[test]
    fn goal_difference_saturates() {
        assert_eq!(goal_difference(5, 2), 3);
        assert_eq!(goal_difference(0, u32::MAX), i32::MIN);
        assert_eq!(goal_difference(u32::MAX, 0), i32::MAX);
    }

    #[test]
    fn score_dropped_before_kickoff() {
        assert_eq!(score_for_status(&MatchStatus::Scheduled, Some(0), Some(0)), None);
        assert_eq!(
            score_for_status(&MatchStatus::Finished, Some(0), Some(0)),
            Some(Score { home: 0, away: 0 })
        );
        assert_eq!(score_for_status(&MatchStatus::Finished, None, Some(1)), None);
    }
}
