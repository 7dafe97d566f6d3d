use anyhow::{Context, Result, anyhow};
use chrono::{Duration, NaiveDate, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::api_football;
use crate::config::AppConfig;
use crate::endpoints;
use crate::football_data;
use crate::model::{Match, MatchDetail, MatchLineups, PlayerStatRow, StandingRow};
use crate::provider::Provider;
use crate::proxy::Proxy;
use crate::schedule::{self, DaySummary};
use crate::sportsdb;
use crate::team_stats::{self, TeamStatistics};

/// Everything a screen can ask for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feed {
    Matches { provider: Provider, round: Option<u32> },
    TeamMatches,
    Standings { provider: Provider },
    TopScorers { provider: Provider },
    TopAssists,
    Squad,
    TeamStatistics,
    MatchDetail { fixture_id: String },
    DaySummary { provider: Provider },
}

impl Feed {
    pub fn empty_message(&self) -> &'static str {
        match self {
            Feed::Matches { .. } | Feed::TeamMatches | Feed::DaySummary { .. } => {
                "No matches available"
            }
            Feed::Standings { .. } => "No standings available",
            Feed::TopScorers { .. } | Feed::TopAssists | Feed::Squad => {
                "No player statistics available"
            }
            Feed::TeamStatistics => "No team statistics available",
            Feed::MatchDetail { .. } => "Match not found",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum Payload {
    Matches(Vec<Match>),
    Standings(Vec<StandingRow>),
    Players(Vec<PlayerStatRow>),
    TeamStatistics(Vec<TeamStatistics>),
    MatchDetail(Option<Box<MatchDetail>>),
    DaySummary(DaySummary),
}

impl Payload {
    pub fn is_empty(&self) -> bool {
        match self {
            Payload::Matches(list) => list.is_empty(),
            Payload::Standings(list) => list.is_empty(),
            Payload::Players(list) => list.is_empty(),
            Payload::TeamStatistics(list) => list.is_empty(),
            Payload::MatchDetail(detail) => detail.is_none(),
            Payload::DaySummary(_) => false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Fetched {
    pub payload: Payload,
    /// Partial failures that did not sink the whole request.
    pub warnings: Vec<String>,
}

impl From<Payload> for Fetched {
    fn from(payload: Payload) -> Self {
        Self {
            payload,
            warnings: Vec::new(),
        }
    }
}

fn get(proxy: &dyn Proxy, provider: Provider, endpoint: &str) -> Result<Value> {
    proxy
        .fetch(provider, endpoint)
        .with_context(|| format!("{provider} {endpoint}"))
}

pub fn fetch_feed(proxy: &dyn Proxy, cfg: &AppConfig, feed: &Feed) -> Result<Fetched> {
    let c = &cfg.competition;
    match feed {
        Feed::Matches { provider, round } => {
            Ok(Payload::Matches(fetch_matches(proxy, cfg, *provider, *round)?).into())
        }
        Feed::TeamMatches => {
            let body = get(
                proxy,
                Provider::ApiFootball,
                &endpoints::api_football_team_fixtures(cfg.tracked_team_id, c.season),
            )?;
            let all = api_football::matches_from_value(&body)?;
            let mut kept = schedule::filter_competitions(all, &cfg.tracked_competitions);
            schedule::sort_by_kickoff(&mut kept);
            Ok(Payload::Matches(kept).into())
        }
        Feed::Standings { provider } => {
            let rows = match provider {
                Provider::ApiFootball => api_football::standings_from_value(&get(
                    proxy,
                    *provider,
                    &endpoints::api_football_standings(c),
                )?)?,
                Provider::FootballData => football_data::standings_from_value(&get(
                    proxy,
                    *provider,
                    &endpoints::football_data_standings(c),
                )?)?,
                Provider::TheSportsDb => sportsdb::table_from_value(&get(
                    proxy,
                    *provider,
                    &endpoints::sportsdb_table(c),
                )?)?,
            };
            Ok(Payload::Standings(rows).into())
        }
        Feed::TopScorers { provider } => {
            let rows = match provider {
                Provider::ApiFootball => api_football::players_from_value(&get(
                    proxy,
                    *provider,
                    &endpoints::api_football_top_scorers(c),
                )?)?,
                Provider::FootballData => football_data::scorers_from_value(&get(
                    proxy,
                    *provider,
                    &endpoints::football_data_scorers(c),
                )?)?,
                Provider::TheSportsDb => {
                    return Err(anyhow!("{provider} does not provide top scorers"));
                }
            };
            Ok(Payload::Players(rows).into())
        }
        Feed::TopAssists => {
            let body = get(
                proxy,
                Provider::ApiFootball,
                &endpoints::api_football_top_assists(c),
            )?;
            Ok(Payload::Players(api_football::players_from_value(&body)?).into())
        }
        Feed::Squad => {
            let body = get(
                proxy,
                Provider::ApiFootball,
                &endpoints::api_football_squad(cfg.tracked_team_id, c.season),
            )?;
            Ok(Payload::Players(api_football::players_from_value(&body)?).into())
        }
        Feed::TeamStatistics => {
            let fetched = team_stats::collect_team_statistics(proxy, cfg)?;
            Ok(Fetched {
                payload: Payload::TeamStatistics(fetched.teams),
                warnings: fetched.errors,
            })
        }
        Feed::MatchDetail { fixture_id } => fetch_match_detail(proxy, fixture_id),
        Feed::DaySummary { provider } => {
            let today = Utc::now().date_naive();
            let matches = fetch_around(proxy, cfg, *provider, today)?;
            Ok(Payload::DaySummary(schedule::day_summary(&matches, today)).into())
        }
    }
}

fn fetch_matches(
    proxy: &dyn Proxy,
    cfg: &AppConfig,
    provider: Provider,
    round: Option<u32>,
) -> Result<Vec<Match>> {
    let c = &cfg.competition;
    match provider {
        Provider::ApiFootball => api_football::matches_from_value(&get(
            proxy,
            provider,
            &endpoints::api_football_fixtures(c, round),
        )?),
        Provider::FootballData => football_data::matches_from_value(&get(
            proxy,
            provider,
            &endpoints::football_data_matches(c, round),
        )?),
        Provider::TheSportsDb => {
            let endpoint = match round {
                Some(round) => endpoints::sportsdb_round_events(c, round),
                None => endpoints::sportsdb_season_events(c),
            };
            sportsdb::events_from_value(&get(proxy, provider, &endpoint)?)
        }
    }
}

/// Yesterday through tomorrow, so late kickoffs across midnight still count.
fn fetch_around(
    proxy: &dyn Proxy,
    cfg: &AppConfig,
    provider: Provider,
    today: NaiveDate,
) -> Result<Vec<Match>> {
    let c = &cfg.competition;
    let from = (today - Duration::days(1)).format("%Y-%m-%d").to_string();
    let to = (today + Duration::days(1)).format("%Y-%m-%d").to_string();
    match provider {
        Provider::ApiFootball => api_football::matches_from_value(&get(
            proxy,
            provider,
            &endpoints::api_football_fixtures_between(c, &from, &to),
        )?),
        Provider::FootballData => football_data::matches_from_value(&get(
            proxy,
            provider,
            &endpoints::football_data_matches_between(c, &from, &to),
        )?),
        Provider::TheSportsDb => fetch_matches(proxy, cfg, provider, None),
    }
}

/// Lineups, events and statistics only exist once the match has started;
/// each of them failing just leaves that section empty.
fn fetch_match_detail(proxy: &dyn Proxy, fixture_id: &str) -> Result<Fetched> {
    let provider = Provider::ApiFootball;
    let body = get(proxy, provider, &endpoints::api_football_fixture(fixture_id))?;
    let Some(fixture) = api_football::matches_from_value(&body)?.into_iter().next() else {
        return Ok(Payload::MatchDetail(None).into());
    };

    let mut warnings = Vec::new();
    let mut detail = MatchDetail {
        fixture,
        events: Vec::new(),
        lineups: None,
        stats: Vec::new(),
    };
    if detail.fixture.status.has_started() != Some(true) {
        return Ok(Payload::MatchDetail(Some(Box::new(detail))).into());
    }

    match get(proxy, provider, &endpoints::api_football_fixture_lineups(fixture_id))
        .and_then(|v| api_football::lineups_from_value(&v))
    {
        Ok(sides) if !sides.is_empty() => detail.lineups = Some(MatchLineups { sides }),
        Ok(_) => {}
        Err(err) => warnings.push(format!("lineups unavailable: {err}")),
    }
    match get(proxy, provider, &endpoints::api_football_fixture_events(fixture_id))
        .and_then(|v| api_football::events_from_value(&v))
    {
        Ok(events) => detail.events = events,
        Err(err) => warnings.push(format!("events unavailable: {err}")),
    }
    match get(
        proxy,
        provider,
        &endpoints::api_football_fixture_statistics(fixture_id),
    )
    .and_then(|v| api_football::fixture_statistics_from_value(&v))
    {
        Ok(blocks) => detail.stats = api_football::stat_rows(&blocks, &detail.fixture.home.id),
        Err(err) => warnings.push(format!("statistics unavailable: {err}")),
    }

    Ok(Fetched {
        payload: Payload::MatchDetail(Some(Box::new(detail))),
        warnings,
    })
}
