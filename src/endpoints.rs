//! Endpoint paths handed to the proxy, relative to each provider's API root.

use crate::config::Competition;

pub fn api_football_fixtures(c: &Competition, round: Option<u32>) -> String {
    let mut path = format!(
        "fixtures?league={}&season={}",
        c.api_football_league, c.season
    );
    if let Some(round) = round {
        let prefix = c.api_football_round_prefix.replace(' ', "%20");
        path.push_str(&format!("&round={prefix}%20-%20{round}"));
    }
    path
}

pub fn api_football_fixtures_between(c: &Competition, from: &str, to: &str) -> String {
    format!(
        "fixtures?league={}&season={}&from={from}&to={to}",
        c.api_football_league, c.season
    )
}

pub fn api_football_team_fixtures(team_id: u32, season: u32) -> String {
    format!("fixtures?team={team_id}&season={season}")
}

pub fn api_football_team_finished(c: &Competition, team_id: &str) -> String {
    format!(
        "fixtures?team={team_id}&league={}&season={}&status=FT",
        c.api_football_league, c.season
    )
}

pub fn api_football_standings(c: &Competition) -> String {
    format!(
        "standings?league={}&season={}",
        c.api_football_league, c.season
    )
}

pub fn api_football_top_scorers(c: &Competition) -> String {
    format!(
        "players/topscorers?league={}&season={}",
        c.api_football_league, c.season
    )
}

pub fn api_football_top_assists(c: &Competition) -> String {
    format!(
        "players/topassists?league={}&season={}",
        c.api_football_league, c.season
    )
}

pub fn api_football_squad(team_id: u32, season: u32) -> String {
    format!("players?team={team_id}&season={season}")
}

pub fn api_football_fixture(fixture_id: &str) -> String {
    format!("fixtures?id={fixture_id}")
}

pub fn api_football_fixture_statistics(fixture_id: &str) -> String {
    format!("fixtures/statistics?fixture={fixture_id}")
}

pub fn api_football_fixture_lineups(fixture_id: &str) -> String {
    format!("fixtures/lineups?fixture={fixture_id}")
}

pub fn api_football_fixture_events(fixture_id: &str) -> String {
    format!("fixtures/events?fixture={fixture_id}")
}

pub fn football_data_matches(c: &Competition, matchday: Option<u32>) -> String {
    match matchday {
        Some(day) => format!("competitions/{}/matches?matchday={day}", c.football_data_code),
        None => format!("competitions/{}/matches", c.football_data_code),
    }
}

pub fn football_data_matches_between(c: &Competition, from: &str, to: &str) -> String {
    format!(
        "competitions/{}/matches?dateFrom={from}&dateTo={to}",
        c.football_data_code
    )
}

pub fn football_data_standings(c: &Competition) -> String {
    format!("competitions/{}/standings", c.football_data_code)
}

pub fn football_data_scorers(c: &Competition) -> String {
    format!("competitions/{}/scorers", c.football_data_code)
}

pub fn sportsdb_season_events(c: &Competition) -> String {
    format!(
        "eventsseason.php?id={}&s={}",
        c.sportsdb_league,
        c.sportsdb_season()
    )
}

pub fn sportsdb_round_events(c: &Competition, round: u32) -> String {
    format!(
        "eventsround.php?id={}&r={round}&s={}",
        c.sportsdb_league,
        c.sportsdb_season()
    )
}

pub fn sportsdb_table(c: &Competition) -> String {
    format!(
        "lookuptable.php?l={}&s={}",
        c.sportsdb_league,
        c.sportsdb_season()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_use_competition_ids() {
        let c = Competition::default();
        assert_eq!(
            api_football_fixtures(&c, Some(3)),
            "fixtures?league=135&season=2025&round=Regular%20Season%20-%203"
        );
        assert_eq!(football_data_matches(&c, None), "competitions/SA/matches");
        assert_eq!(
            sportsdb_round_events(&c, 12),
            "eventsround.php?id=4332&r=12&s=2025-2026"
        );
    }

    #[test]
    fn round_filter_follows_competition_prefix() {
        let c = Competition {
            api_football_league: 2,
            api_football_round_prefix: "League Stage".to_string(),
            ..Competition::default()
        };
        assert_eq!(
            api_football_fixtures(&c, Some(8)),
            "fixtures?league=2&season=2025&round=League%20Stage%20-%208"
        );
    }
}
