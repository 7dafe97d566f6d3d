use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LivePhase {
    FirstHalf,
    SecondHalf,
    ExtraTime,
    Penalties,
    InPlay,
}

/// Canonical match state after normalization. Codes no provider table knows
/// about are kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    Scheduled,
    Live(LivePhase),
    Halftime,
    Finished,
    Postponed,
    Cancelled,
    Suspended,
    Other(String),
}

impl MatchStatus {
    pub fn is_live_family(&self) -> bool {
        matches!(self, MatchStatus::Live(_) | MatchStatus::Halftime)
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, MatchStatus::Finished)
    }

    pub fn is_scheduled(&self) -> bool {
        matches!(self, MatchStatus::Scheduled)
    }

    /// Whether a score is meaningful for this state. Unknown codes defer to
    /// whatever the provider sent.
    pub fn has_started(&self) -> Option<bool> {
        match self {
            MatchStatus::Live(_)
            | MatchStatus::Halftime
            | MatchStatus::Finished
            | MatchStatus::Suspended => Some(true),
            MatchStatus::Scheduled | MatchStatus::Postponed | MatchStatus::Cancelled => {
                Some(false)
            }
            MatchStatus::Other(_) => None,
        }
    }

    pub fn canonical_name(&self) -> &str {
        match self {
            MatchStatus::Scheduled => "scheduled",
            MatchStatus::Live(_) => "live",
            MatchStatus::Halftime => "halftime",
            MatchStatus::Finished => "finished",
            MatchStatus::Postponed => "postponed",
            MatchStatus::Cancelled => "cancelled",
            MatchStatus::Suspended => "suspended",
            MatchStatus::Other(code) => code.as_str(),
        }
    }

    /// Italian display label, as shown on the match cards.
    pub fn label(&self) -> &str {
        match self {
            MatchStatus::Scheduled => "Non Iniziata",
            MatchStatus::Live(LivePhase::FirstHalf) => "Primo Tempo",
            MatchStatus::Live(LivePhase::SecondHalf) => "Secondo Tempo",
            MatchStatus::Live(LivePhase::ExtraTime) => "Tempi Supplementari",
            MatchStatus::Live(LivePhase::Penalties) => "Rigori in Corso",
            MatchStatus::Live(LivePhase::InPlay) => "In Diretta",
            MatchStatus::Halftime => "Intervallo",
            MatchStatus::Finished => "Partita Finita",
            MatchStatus::Postponed => "Partita Rimandata",
            MatchStatus::Cancelled => "Partita Annullata",
            MatchStatus::Suspended => "Partita Sospesa",
            MatchStatus::Other(code) => code.as_str(),
        }
    }
}

/// Status codes every provider table covers. Short API-Football codes,
/// football-data enum values and TheSportsDB / long-form strings share one
/// table because none of them collide.
pub const KNOWN_STATUS_CODES: &[&str] = &[
    "TBD",
    "NS",
    "1H",
    "HT",
    "2H",
    "ET",
    "BT",
    "P",
    "LIVE",
    "FT",
    "AET",
    "PEN",
    "PST",
    "CANC",
    "ABD",
    "SUSP",
    "INT",
    "AWD",
    "WO",
    "SCHEDULED",
    "TIMED",
    "IN_PLAY",
    "PAUSED",
    "EXTRA_TIME",
    "PENALTY_SHOOTOUT",
    "FINISHED",
    "AWARDED",
    "POSTPONED",
    "SUSPENDED",
    "CANCELLED",
    "Not Started",
    "Time to be defined",
    "First Half",
    "Halftime",
    "Second Half",
    "Extra Time",
    "Break Time",
    "Penalty In Progress",
    "Live",
    "Match Finished",
    "Match Finished After Extra Time",
    "Match Finished After Penalty",
    "Match Postponed",
    "Postponed",
    "Match Cancelled",
    "Cancelled",
    "Match Abandoned",
    "Match Suspended",
    "Match Interrupted",
    "Technical Loss",
    "WalkOver",
];

pub fn canonical_status(code: &str) -> MatchStatus {
    let trimmed = code.trim();
    let key = trimmed.to_ascii_uppercase();
    match key.as_str() {
        "TBD" | "NS" | "SCHEDULED" | "TIMED" | "NOT STARTED" | "TIME TO BE DEFINED" => {
            MatchStatus::Scheduled
        }
        "1H" | "FIRST HALF" => MatchStatus::Live(LivePhase::FirstHalf),
        "2H" | "SECOND HALF" => MatchStatus::Live(LivePhase::SecondHalf),
        "ET" | "BT" | "EXTRA_TIME" | "EXTRA TIME" | "BREAK TIME" => {
            MatchStatus::Live(LivePhase::ExtraTime)
        }
        "P" | "PENALTY_SHOOTOUT" | "PENALTY IN PROGRESS" => {
            MatchStatus::Live(LivePhase::Penalties)
        }
        "LIVE" | "IN_PLAY" => MatchStatus::Live(LivePhase::InPlay),
        "HT" | "PAUSED" | "HALFTIME" => MatchStatus::Halftime,
        "FT"
        | "AET"
        | "PEN"
        | "AWD"
        | "WO"
        | "FINISHED"
        | "AWARDED"
        | "MATCH FINISHED"
        | "MATCH FINISHED AFTER EXTRA TIME"
        | "MATCH FINISHED AFTER PENALTY"
        | "TECHNICAL LOSS"
        | "WALKOVER" => MatchStatus::Finished,
        "PST" | "POSTPONED" | "MATCH POSTPONED" => MatchStatus::Postponed,
        "CANC" | "ABD" | "CANCELLED" | "MATCH CANCELLED" | "MATCH ABANDONED" => {
            MatchStatus::Cancelled
        }
        "SUSP" | "INT" | "SUSPENDED" | "MATCH SUSPENDED" | "MATCH INTERRUPTED" => {
            MatchStatus::Suspended
        }
        _ => MatchStatus::Other(trimmed.to_string()),
    }
}
