use anyhow::{Result, anyhow};
use serde_json::Value;

use crate::json_util::{
    as_i32_lenient, minute_of, parse_body, parse_kickoff, pick_string, pick_u32,
};
use crate::model::{Match, StandingRow, TeamRef, goal_difference, score_for_status};
use crate::status::{MatchStatus, canonical_status};

/// `"events": null` is how TheSportsDB says "nothing in this round"; only a
/// missing key counts as a broken payload.
fn list<'a>(root: &'a Value, key: &str) -> Result<&'a [Value]> {
    match root.get(key) {
        Some(Value::Array(items)) => Ok(items.as_slice()),
        Some(Value::Null) => Ok(Default::default()),
        _ => Err(anyhow!("thesportsdb payload has no `{key}` list")),
    }
}

pub fn parse_events_json(raw: &str) -> Result<Vec<Match>> {
    events_from_value(&parse_body(raw)?)
}

pub fn events_from_value(root: &Value) -> Result<Vec<Match>> {
    Ok(list(root, "events")?
        .iter()
        .filter(|item| item.is_object())
        .map(parse_event)
        .collect())
}

fn parse_event(item: &Value) -> Match {
    let home_score = pick_u32(item, &["intHomeScore"]);
    let away_score = pick_u32(item, &["intAwayScore"]);
    let status = match pick_string(item, &["strStatus"]) {
        Some(code) => canonical_status(&code),
        // Older seasons leave the status blank; a recorded score means it was played.
        None if home_score.is_some() && away_score.is_some() => MatchStatus::Finished,
        None => MatchStatus::Scheduled,
    };
    let round_label = pick_string(item, &["intRound"]);
    let round = pick_u32(item, &["intRound"]).filter(|r| *r > 0);
    let kickoff = pick_string(item, &["strTimestamp"])
        .and_then(|raw| parse_kickoff(&raw))
        .or_else(|| {
            let date = pick_string(item, &["dateEvent"])?;
            let time = pick_string(item, &["strTime"]).unwrap_or_else(|| "00:00:00".to_string());
            parse_kickoff(&format!("{date}T{time}"))
        });

    Match {
        id: pick_string(item, &["idEvent"]).unwrap_or_default(),
        home: TeamRef::new(
            pick_string(item, &["idHomeTeam"]).unwrap_or_default(),
            pick_string(item, &["strHomeTeam"]).unwrap_or_default(),
            pick_string(item, &["strHomeTeamBadge"]),
        ),
        away: TeamRef::new(
            pick_string(item, &["idAwayTeam"]).unwrap_or_default(),
            pick_string(item, &["strAwayTeam"]).unwrap_or_default(),
            pick_string(item, &["strAwayTeamBadge"]),
        ),
        score: score_for_status(&status, home_score, away_score),
        minute: minute_of(pick_u32(item, &["strProgress"])),
        status,
        kickoff,
        round,
        round_label,
        competition: pick_string(item, &["strLeague"]),
        venue: pick_string(item, &["strVenue"]),
    }
}

pub fn parse_table_json(raw: &str) -> Result<Vec<StandingRow>> {
    table_from_value(&parse_body(raw)?)
}

pub fn table_from_value(root: &Value) -> Result<Vec<StandingRow>> {
    Ok(list(root, "table")?
        .iter()
        .filter(|item| item.is_object())
        .map(|row| {
            let goals_for = pick_u32(row, &["intGoalsFor"]).unwrap_or(0);
            let goals_against = pick_u32(row, &["intGoalsAgainst"]).unwrap_or(0);
            StandingRow {
                team: TeamRef::new(
                    pick_string(row, &["idTeam"]).unwrap_or_default(),
                    pick_string(row, &["strTeam"]).unwrap_or_default(),
                    pick_string(row, &["strBadge", "strTeamBadge"]),
                ),
                rank: pick_u32(row, &["intRank"]).unwrap_or(0),
                played: pick_u32(row, &["intPlayed"]).unwrap_or(0),
                won: pick_u32(row, &["intWin"]).unwrap_or(0),
                drawn: pick_u32(row, &["intDraw"]).unwrap_or(0),
                lost: pick_u32(row, &["intLoss"]).unwrap_or(0),
                goals_for,
                goals_against,
                goal_difference: row
                    .get("intGoalDifference")
                    .and_then(as_i32_lenient)
                    .unwrap_or_else(|| goal_difference(goals_for, goals_against)),
                points: pick_u32(row, &["intPoints"]).unwrap_or(0),
                form: pick_string(row, &["strForm"]),
                group: pick_string(row, &["strGroup"]),
            }
        })
        .collect())
}
