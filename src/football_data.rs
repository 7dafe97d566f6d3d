use anyhow::{Result, anyhow};
use serde_json::Value;

use crate::json_util::{
    as_i32_lenient, at, id_at, minute_of, parse_body, parse_kickoff, pick_string, pick_u32,
    string_at, u32_at,
};
use crate::model::{
    Match, PlayerRef, PlayerStatRow, StandingRow, TeamRef, goal_difference, score_for_status,
};
use crate::status::canonical_status;

fn team_ref(value: Option<&Value>) -> TeamRef {
    let Some(team) = value else {
        return TeamRef::new("", "", None);
    };
    TeamRef::new(
        id_at(team, &["id"]),
        pick_string(team, &["shortName", "name", "tla"]).unwrap_or_default(),
        pick_string(team, &["crest"]),
    )
}

pub fn parse_matches_json(raw: &str) -> Result<Vec<Match>> {
    matches_from_value(&parse_body(raw)?)
}

pub fn matches_from_value(root: &Value) -> Result<Vec<Match>> {
    let list = root
        .get("matches")
        .and_then(|v| v.as_array())
        .ok_or_else(|| anyhow!("football-data payload has no `matches` array"))?;
    let competition = string_at(root, &["competition", "name"]);
    Ok(list
        .iter()
        .filter(|item| item.is_object())
        .map(|item| parse_match(item, competition.as_deref()))
        .collect())
}

fn parse_match(item: &Value, competition: Option<&str>) -> Match {
    let status = canonical_status(&pick_string(item, &["status"]).unwrap_or_default());
    let round = pick_u32(item, &["matchday"]).filter(|r| *r > 0);
    let score = score_for_status(
        &status,
        u32_at(item, &["score", "fullTime", "home"]),
        u32_at(item, &["score", "fullTime", "away"]),
    );
    Match {
        id: id_at(item, &["id"]),
        home: team_ref(item.get("homeTeam")),
        away: team_ref(item.get("awayTeam")),
        status,
        kickoff: pick_string(item, &["utcDate"]).and_then(|raw| parse_kickoff(&raw)),
        round,
        round_label: round.map(|r| format!("Matchday {r}")),
        minute: minute_of(pick_u32(item, &["minute"])),
        competition: string_at(item, &["competition", "name"])
            .or_else(|| competition.map(str::to_string)),
        venue: pick_string(item, &["venue"]),
        score,
    }
}

pub fn parse_standings_json(raw: &str) -> Result<Vec<StandingRow>> {
    standings_from_value(&parse_body(raw)?)
}

/// Only `TOTAL` tables are read; HOME/AWAY splits would duplicate teams.
pub fn standings_from_value(root: &Value) -> Result<Vec<StandingRow>> {
    let tables = root
        .get("standings")
        .and_then(|v| v.as_array())
        .ok_or_else(|| anyhow!("football-data payload has no `standings` array"))?;
    let totals: Vec<&Value> = tables
        .iter()
        .filter(|t| pick_string(t, &["type"]).is_none_or(|kind| kind == "TOTAL"))
        .collect();
    let grouped = totals.len() > 1;

    let mut rows = Vec::new();
    for table in totals {
        let group = if grouped {
            pick_string(table, &["group"])
        } else {
            None
        };
        let Some(entries) = table.get("table").and_then(|v| v.as_array()) else {
            continue;
        };
        for entry in entries {
            let goals_for = pick_u32(entry, &["goalsFor"]).unwrap_or(0);
            let goals_against = pick_u32(entry, &["goalsAgainst"]).unwrap_or(0);
            rows.push(StandingRow {
                team: team_ref(entry.get("team")),
                rank: pick_u32(entry, &["position"]).unwrap_or(0),
                played: pick_u32(entry, &["playedGames"]).unwrap_or(0),
                won: pick_u32(entry, &["won"]).unwrap_or(0),
                drawn: pick_u32(entry, &["draw"]).unwrap_or(0),
                lost: pick_u32(entry, &["lost"]).unwrap_or(0),
                goals_for,
                goals_against,
                goal_difference: entry
                    .get("goalDifference")
                    .and_then(as_i32_lenient)
                    .unwrap_or_else(|| goal_difference(goals_for, goals_against)),
                points: pick_u32(entry, &["points"]).unwrap_or(0),
                form: pick_string(entry, &["form"]),
                group: group.clone(),
            });
        }
    }
    Ok(rows)
}

pub fn parse_scorers_json(raw: &str) -> Result<Vec<PlayerStatRow>> {
    scorers_from_value(&parse_body(raw)?)
}

pub fn scorers_from_value(root: &Value) -> Result<Vec<PlayerStatRow>> {
    let list = root
        .get("scorers")
        .and_then(|v| v.as_array())
        .ok_or_else(|| anyhow!("football-data payload has no `scorers` array"))?;
    Ok(list
        .iter()
        .filter(|item| item.is_object())
        .map(|item| {
            let player = item.get("player").unwrap_or(&Value::Null);
            PlayerStatRow {
                player: PlayerRef {
                    id: id_at(player, &["id"]),
                    name: pick_string(player, &["name"]).unwrap_or_else(|| "Unknown".to_string()),
                    photo: None,
                },
                team: team_ref(item.get("team")),
                goals: pick_u32(item, &["goals"]),
                assists: pick_u32(item, &["assists"]),
                appearances: pick_u32(item, &["playedMatches"]),
                position: at(player, &["section"])
                    .or_else(|| at(player, &["position"]))
                    .and_then(|v| v.as_str())
                    .map(str::to_string),
                rating: None,
                age: None,
                nationality: pick_string(player, &["nationality"]),
            }
        })
        .collect())
}
