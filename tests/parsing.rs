use std::fs;
use std::path::PathBuf;

use calcio_scores::model::{EventKind, PLACEHOLDER_TEAM};
use calcio_scores::status::{LivePhase, MatchStatus};
use calcio_scores::{api_football, football_data, sportsdb};

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

#[test]
fn parses_api_football_fixtures() {
    let raw = read_fixture("api_football_fixtures.json");
    let rows = api_football::parse_matches_json(&raw).expect("fixture should parse");
    assert_eq!(rows.len(), 4);

    let first = &rows[0];
    assert_eq!(first.id, "1377001");
    assert_eq!(first.status, MatchStatus::Finished);
    assert_eq!(first.round, Some(1));
    assert_eq!(first.round_label.as_deref(), Some("Regular Season - 1"));
    assert_eq!(first.score.map(|s| (s.home, s.away)), Some((2, 0)));
    assert_eq!(first.home.name, "Napoli");
    assert_eq!(first.competition.as_deref(), Some("Serie A"));
    assert_eq!(
        first.venue.as_deref(),
        Some("Stadio Diego Armando Maradona")
    );
    assert_eq!(
        first.kickoff.map(|k| k.to_rfc3339()),
        Some("2025-08-23T16:30:00+00:00".to_string())
    );

    let live = &rows[1];
    assert_eq!(live.status, MatchStatus::Live(LivePhase::SecondHalf));
    assert_eq!(live.minute, Some(67));
    assert!(live.is_live());

    let scheduled = &rows[2];
    assert!(scheduled.score.is_none());
    assert!(scheduled.home.crest.is_none());
    assert!(scheduled.away.crest.is_none());

    let unknown_away = &rows[3];
    assert_eq!(unknown_away.away.name, PLACEHOLDER_TEAM);
    assert!(unknown_away.venue.is_none());
}

#[test]
fn parses_api_football_standings() {
    let raw = read_fixture("api_football_standings.json");
    let rows = api_football::parse_standings_json(&raw).expect("fixture should parse");
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].team.name, "Napoli");
    assert_eq!(rows[0].points, 6);
    assert_eq!(rows[0].goal_difference, 4);
    assert_eq!(rows[0].form.as_deref(), Some("WW"));
    // Single table: no group label.
    assert!(rows[0].group.is_none());
    // Missing goalsDiff falls back to for - against.
    assert_eq!(rows[2].goal_difference, -4);
    assert_eq!(rows[2].lost, 2);
}

#[test]
fn api_football_group_tables_carry_group_labels() {
    let raw = read_fixture("api_football_standings_groups.json");
    let rows = api_football::parse_standings_json(&raw).expect("fixture should parse");
    assert_eq!(rows.len(), 4);
    let groups: Vec<Option<&str>> = rows.iter().map(|r| r.group.as_deref()).collect();
    assert_eq!(
        groups,
        vec![
            Some("Group A"),
            Some("Group A"),
            Some("Group B"),
            Some("Group B")
        ]
    );
    assert_eq!(rows[3].team.name, "Napoli");
    assert_eq!(rows[3].rank, 2);
}

#[test]
fn parses_api_football_top_scorers() {
    let raw = read_fixture("api_football_topscorers.json");
    let rows = api_football::parse_players_json(&raw).expect("fixture should parse");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].player.name, "R. Lukaku");
    assert_eq!(rows[0].goals, Some(3));
    assert_eq!(rows[0].assists, Some(1));
    assert_eq!(rows[0].appearances, Some(2));
    assert_eq!(rows[0].team.name, "Napoli");
    assert!(rows[0].rating.is_some_and(|r| (r - 7.65).abs() < 0.01));
    assert_eq!(rows[1].assists, None);
    assert_eq!(rows[1].appearances, None);
    assert!(rows[1].player.photo.is_none());
}

#[test]
fn parses_api_football_fixture_extras() {
    let stats = api_football::parse_fixture_statistics_json(&read_fixture(
        "api_football_statistics.json",
    ))
    .expect("statistics should parse");
    assert_eq!(stats.len(), 2);
    let rows = api_football::stat_rows(&stats, "492");
    let possession = rows
        .iter()
        .find(|r| r.name == "Ball Possession")
        .expect("possession row");
    assert_eq!(possession.home, "58%");
    assert_eq!(possession.away, "42%");
    let corners = rows.iter().find(|r| r.name == "Corner Kicks").expect("corners");
    assert_eq!(corners.away, "-");

    let body = serde_json::from_str(&read_fixture("api_football_lineups.json")).unwrap();
    let sides = api_football::lineups_from_value(&body).expect("lineups should parse");
    assert_eq!(sides.len(), 2);
    assert_eq!(sides[0].formation, "4-3-3");
    assert_eq!(sides[0].starting.len(), 2);
    assert_eq!(sides[0].subs[0].name, "G. Raspadori");
    assert_eq!(sides[1].starting[0].number, Some(30));

    let body = serde_json::from_str(&read_fixture("api_football_events.json")).unwrap();
    let events = api_football::events_from_value(&body).expect("events should parse");
    assert_eq!(events.len(), 3);
    assert_eq!(events[0].kind, EventKind::Goal);
    assert_eq!(events[0].assist.as_deref(), Some("K. De Bruyne"));
    assert_eq!(events[1].kind, EventKind::Card);
    assert_eq!(events[1].extra, Some(2));
    assert!(events[1].assist.is_none());
    assert_eq!(events[2].kind, EventKind::Sub);
}

#[test]
fn parses_football_data_matches() {
    let raw = read_fixture("football_data_matches.json");
    let rows = football_data::parse_matches_json(&raw).expect("fixture should parse");
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[0].home.name, "Napoli");
    assert_eq!(rows[0].competition.as_deref(), Some("Serie A"));
    assert_eq!(rows[0].round_label.as_deref(), Some("Matchday 1"));
    assert_eq!(rows[1].score.map(|s| (s.home, s.away)), Some((1, 1)));
    assert_eq!(rows[2].status, MatchStatus::Scheduled);
    assert!(rows[2].score.is_none());
    assert_eq!(rows[3].status, MatchStatus::Postponed);
    assert_eq!(rows[3].round, Some(2));
}

#[test]
fn parses_football_data_standings_total_only() {
    let raw = read_fixture("football_data_standings.json");
    let rows = football_data::parse_standings_json(&raw).expect("fixture should parse");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].team.name, "Napoli");
    assert_eq!(rows[0].played, 1);
    assert_eq!(rows[1].drawn, 1);
    assert!(rows.iter().all(|r| r.group.is_none()));
}

#[test]
fn football_data_group_tables_carry_group_labels() {
    let raw = read_fixture("football_data_standings_groups.json");
    let rows = football_data::parse_standings_json(&raw).expect("fixture should parse");
    // The HOME split of group A is skipped.
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].team.name, "Bayern");
    assert_eq!(rows[0].group.as_deref(), Some("GROUP_A"));
    assert_eq!(rows[0].played, 6);
    assert_eq!(rows[2].team.name, "Napoli");
    assert_eq!(rows[2].group.as_deref(), Some("GROUP_C"));
    assert_eq!(rows[2].points, 10);
}

#[test]
fn parses_football_data_scorers() {
    let raw = read_fixture("football_data_scorers.json");
    let rows = football_data::parse_scorers_json(&raw).expect("fixture should parse");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].goals, Some(3));
    assert_eq!(rows[0].appearances, Some(2));
    assert_eq!(rows[0].position.as_deref(), Some("Offence"));
    assert_eq!(rows[1].assists, None);
    assert_eq!(rows[1].team.name, "Inter");
}

#[test]
fn parses_sportsdb_events() {
    let raw = read_fixture("sportsdb_events.json");
    let rows = sportsdb::parse_events_json(&raw).expect("fixture should parse");
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].status, MatchStatus::Finished);
    assert_eq!(rows[0].round, Some(1));
    assert!(rows[0].home.crest.is_some());
    assert!(rows[0].away.crest.is_none());

    let live = &rows[1];
    assert_eq!(live.status, MatchStatus::Live(LivePhase::SecondHalf));
    assert_eq!(live.minute, Some(67));
    assert_eq!(
        live.kickoff.map(|k| k.to_rfc3339()),
        Some("2025-08-30T18:45:00+00:00".to_string())
    );

    assert_eq!(rows[2].status, MatchStatus::Scheduled);
    assert!(rows[2].score.is_none());
}

#[test]
fn parses_sportsdb_table() {
    let raw = read_fixture("sportsdb_table.json");
    let rows = sportsdb::parse_table_json(&raw).expect("fixture should parse");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].points, 4);
    assert_eq!(rows[1].goal_difference, -4);
    assert!(rows[1].team.crest.is_none());
}

#[test]
fn empty_bodies_are_errors() {
    assert!(api_football::parse_matches_json("").is_err());
    assert!(football_data::parse_matches_json("  ").is_err());
    assert!(sportsdb::parse_events_json("not json").is_err());
}
