use anyhow::{Result, anyhow};
use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::json_util::{
    as_u32_lenient, at, id_at, minute_of, parse_body, pick_string, pick_u32, string_at, u32_at,
};
use crate::model::{
    Event, EventKind, LineupSide, Match, PlayerRef, PlayerSlot, PlayerStatRow, StandingRow,
    StatRow, TeamRef, goal_difference, score_for_status,
};
use crate::rounds::parse_round_number;
use crate::status::canonical_status;
use crate::team_stats::{StatSample, TeamStatBlock};

fn response_array(root: &Value) -> Result<&Vec<Value>> {
    root.get("response")
        .and_then(|v| v.as_array())
        .ok_or_else(|| anyhow!("api-football payload has no `response` array"))
}

pub fn parse_matches_json(raw: &str) -> Result<Vec<Match>> {
    matches_from_value(&parse_body(raw)?)
}

pub fn matches_from_value(root: &Value) -> Result<Vec<Match>> {
    Ok(response_array(root)?
        .iter()
        .filter(|item| item.is_object())
        .map(parse_fixture)
        .collect())
}

fn team_ref(value: Option<&Value>) -> TeamRef {
    let Some(team) = value else {
        return TeamRef::new("", "", None);
    };
    TeamRef::new(
        id_at(team, &["id"]),
        pick_string(team, &["name"]).unwrap_or_default(),
        pick_string(team, &["logo"]),
    )
}

fn parse_fixture(item: &Value) -> Match {
    let fixture = item.get("fixture").unwrap_or(&Value::Null);
    let league = item.get("league").unwrap_or(&Value::Null);

    let code = string_at(fixture, &["status", "short"])
        .or_else(|| string_at(fixture, &["status", "long"]))
        .unwrap_or_default();
    let status = canonical_status(&code);

    let kickoff = string_at(fixture, &["date"])
        .and_then(|raw| crate::json_util::parse_kickoff(&raw))
        .or_else(|| {
            at(fixture, &["timestamp"])
                .and_then(|v| v.as_i64())
                .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
        });

    let round_label = string_at(league, &["round"]);
    let round = round_label.as_deref().and_then(parse_round_number);

    let id = id_at(fixture, &["id"]);
    if id.is_empty() {
        log::warn!("api-football fixture without id");
    }

    let score = score_for_status(
        &status,
        u32_at(item, &["goals", "home"]),
        u32_at(item, &["goals", "away"]),
    );

    Match {
        id,
        home: team_ref(at(item, &["teams", "home"])),
        away: team_ref(at(item, &["teams", "away"])),
        minute: minute_of(u32_at(fixture, &["status", "elapsed"])),
        status,
        kickoff,
        round,
        round_label,
        competition: string_at(league, &["name"]),
        venue: string_at(fixture, &["venue", "name"]),
        score,
    }
}

pub fn parse_standings_json(raw: &str) -> Result<Vec<StandingRow>> {
    standings_from_value(&parse_body(raw)?)
}

/// Flattens every table; tables are labelled with their group name only when
/// the competition has more than one.
pub fn standings_from_value(root: &Value) -> Result<Vec<StandingRow>> {
    let mut rows = Vec::new();
    for entry in response_array(root)? {
        let Some(tables) = at(entry, &["league", "standings"]).and_then(|v| v.as_array()) else {
            continue;
        };
        let grouped = tables.len() > 1;
        for table in tables {
            let Some(table) = table.as_array() else {
                continue;
            };
            for row in table {
                rows.push(parse_standing(row, grouped));
            }
        }
    }
    Ok(rows)
}

fn parse_standing(row: &Value, grouped: bool) -> StandingRow {
    let goals_for = u32_at(row, &["all", "goals", "for"]).unwrap_or(0);
    let goals_against = u32_at(row, &["all", "goals", "against"]).unwrap_or(0);
    StandingRow {
        team: team_ref(row.get("team")),
        rank: pick_u32(row, &["rank"]).unwrap_or(0),
        played: u32_at(row, &["all", "played"]).unwrap_or(0),
        won: u32_at(row, &["all", "win"]).unwrap_or(0),
        drawn: u32_at(row, &["all", "draw"]).unwrap_or(0),
        lost: u32_at(row, &["all", "lose"]).unwrap_or(0),
        goals_for,
        goals_against,
        goal_difference: row
            .get("goalsDiff")
            .and_then(crate::json_util::as_i32_lenient)
            .unwrap_or_else(|| goal_difference(goals_for, goals_against)),
        points: pick_u32(row, &["points"]).unwrap_or(0),
        form: pick_string(row, &["form"]),
        group: if grouped {
            pick_string(row, &["group"])
        } else {
            None
        },
    }
}

pub fn parse_players_json(raw: &str) -> Result<Vec<PlayerStatRow>> {
    players_from_value(&parse_body(raw)?)
}

/// Top scorers, top assists and squad listings share this shape; only the
/// first statistics block (the requested competition) is read.
pub fn players_from_value(root: &Value) -> Result<Vec<PlayerStatRow>> {
    Ok(response_array(root)?
        .iter()
        .filter(|item| item.is_object())
        .map(parse_player)
        .collect())
}

fn parse_player(item: &Value) -> PlayerStatRow {
    let player = item.get("player").unwrap_or(&Value::Null);
    let stats = at(item, &["statistics"])
        .and_then(|v| v.as_array())
        .and_then(|list| list.first())
        .unwrap_or(&Value::Null);
    PlayerStatRow {
        player: PlayerRef {
            id: id_at(player, &["id"]),
            name: pick_string(player, &["name"]).unwrap_or_else(|| "Unknown".to_string()),
            photo: pick_string(player, &["photo"]),
        },
        team: team_ref(stats.get("team")),
        goals: u32_at(stats, &["goals", "total"]),
        assists: u32_at(stats, &["goals", "assists"]),
        appearances: u32_at(stats, &["games", "appearences"])
            .or_else(|| u32_at(stats, &["games", "appearances"])),
        position: string_at(stats, &["games", "position"]),
        rating: string_at(stats, &["games", "rating"]).and_then(|r| r.parse::<f32>().ok()),
        age: pick_u32(player, &["age"]),
        nationality: pick_string(player, &["nationality"]),
    }
}

pub fn parse_fixture_statistics_json(raw: &str) -> Result<Vec<TeamStatBlock>> {
    fixture_statistics_from_value(&parse_body(raw)?)
}

pub fn fixture_statistics_from_value(root: &Value) -> Result<Vec<TeamStatBlock>> {
    let mut blocks = Vec::new();
    for entry in response_array(root)? {
        let team = team_ref(entry.get("team"));
        let samples = entry
            .get("statistics")
            .and_then(|v| v.as_array())
            .map(|list| {
                list.iter()
                    .filter_map(|stat| {
                        let label = pick_string(stat, &["type"])?;
                        Some(StatSample::parse(label, stat.get("value")))
                    })
                    .collect()
            })
            .unwrap_or_default();
        blocks.push(TeamStatBlock { team, samples });
    }
    Ok(blocks)
}

/// Side-by-side rows in the order the home block lists them.
pub fn stat_rows(blocks: &[TeamStatBlock], home_id: &str) -> Vec<StatRow> {
    let home = blocks.iter().find(|b| b.team.id == home_id);
    let away = blocks.iter().find(|b| b.team.id != home_id);
    let Some(home) = home.or_else(|| blocks.first()) else {
        return Vec::new();
    };
    home.samples
        .iter()
        .map(|sample| {
            let other = away
                .and_then(|b| b.samples.iter().find(|s| s.label == sample.label))
                .map(|s| s.raw.clone())
                .unwrap_or_else(|| "-".to_string());
            StatRow {
                name: sample.label.clone(),
                home: sample.raw.clone(),
                away: other,
            }
        })
        .collect()
}

pub fn lineups_from_value(root: &Value) -> Result<Vec<LineupSide>> {
    let mut sides = Vec::new();
    for entry in response_array(root)? {
        sides.push(LineupSide {
            team: team_ref(entry.get("team")),
            formation: pick_string(entry, &["formation"]).unwrap_or_default(),
            starting: parse_slots(entry.get("startXI")),
            subs: parse_slots(entry.get("substitutes")),
        });
    }
    Ok(sides)
}

fn parse_slots(value: Option<&Value>) -> Vec<PlayerSlot> {
    let Some(list) = value.and_then(|v| v.as_array()) else {
        return Vec::new();
    };
    list.iter()
        .filter_map(|entry| {
            let player = entry.get("player").unwrap_or(entry);
            let name = pick_string(player, &["name"])?;
            Some(PlayerSlot {
                id: pick_u32(player, &["id"]),
                name,
                number: pick_u32(player, &["number"]),
                pos: pick_string(player, &["pos"]),
            })
        })
        .collect()
}

pub fn events_from_value(root: &Value) -> Result<Vec<Event>> {
    Ok(response_array(root)?
        .iter()
        .filter_map(parse_event)
        .collect())
}

fn parse_event(entry: &Value) -> Option<Event> {
    let kind = parse_event_kind(entry.get("type").and_then(|v| v.as_str()))?;
    Some(Event {
        minute: minute_of(u32_at(entry, &["time", "elapsed"])).unwrap_or(0),
        extra: minute_of(at(entry, &["time", "extra"]).and_then(as_u32_lenient)),
        kind,
        team: string_at(entry, &["team", "name"]).unwrap_or_default(),
        player: string_at(entry, &["player", "name"]),
        assist: string_at(entry, &["assist", "name"]),
        detail: pick_string(entry, &["detail", "type"]).unwrap_or_default(),
    })
}

fn parse_event_kind(event_type: Option<&str>) -> Option<EventKind> {
    let lowered = event_type?.to_lowercase();
    if lowered.contains("goal") {
        Some(EventKind::Goal)
    } else if lowered.contains("card") {
        Some(EventKind::Card)
    } else if lowered.contains("subst") {
        Some(EventKind::Sub)
    } else if lowered.contains("var") {
        Some(EventKind::Var)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_response_fails_the_batch() {
        assert!(matches_from_value(&json!({ "results": 0 })).is_err());
        assert!(matches_from_value(&json!(null)).is_err());
    }

    #[test]
    fn malformed_record_degrades_to_placeholders() {
        let rows = matches_from_value(&json!({
            "response": [{ "fixture": { "id": 7, "status": { "short": "NS" } } }]
        }))
        .expect("batch parses");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, "7");
        assert_eq!(rows[0].home.name, "TBD");
        assert_eq!(rows[0].home.initials(), "T");
        assert!(rows[0].kickoff.is_none());
        assert!(rows[0].round.is_none());
        assert!(rows[0].score.is_none());
    }

    #[test]
    fn event_kinds() {
        assert_eq!(parse_event_kind(Some("Goal")), Some(EventKind::Goal));
        assert_eq!(parse_event_kind(Some("subst")), Some(EventKind::Sub));
        assert_eq!(parse_event_kind(Some("Var")), Some(EventKind::Var));
        assert_eq!(parse_event_kind(Some("Card")), Some(EventKind::Card));
        assert_eq!(parse_event_kind(None), None);
    }
}
