use std::env;
use std::time::Duration;

use anyhow::{Result, anyhow};

pub const DEFAULT_TRACKED_COMPETITIONS: &[&str] = &[
    "serie a",
    "coppa italia",
    "supercoppa",
    "champions league",
];

/// Identifiers of the followed competition on each provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Competition {
    pub season: u32,
    pub api_football_league: u32,
    /// Label prefix of numbered rounds: "Regular Season" for domestic
    /// leagues, "League Stage" for the Champions League.
    pub api_football_round_prefix: String,
    pub football_data_code: String,
    pub sportsdb_league: u32,
}

impl Competition {
    /// TheSportsDB names seasons "2025-2026".
    pub fn sportsdb_season(&self) -> String {
        format!("{}-{}", self.season, self.season + 1)
    }
}

impl Default for Competition {
    fn default() -> Self {
        Self {
            season: 2025,
            api_football_league: 135,
            api_football_round_prefix: "Regular Season".to_string(),
            football_data_code: "SA".to_string(),
            sportsdb_league: 4332,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub proxy_base_url: String,
    pub proxy_api_key: Option<String>,
    pub request_timeout: Duration,
    pub fetch_parallelism: usize,
    pub competition: Competition,
    pub tracked_team_id: u32,
    pub tracked_competitions: Vec<String>,
    pub api_football_function: String,
    pub football_data_function: String,
    pub sportsdb_function: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let number = |key: &str, default: u64| {
            get(key)
                .and_then(|val| val.parse::<u64>().ok())
                .unwrap_or(default)
        };
        let id = |key: &str, default: u32| {
            get(key)
                .and_then(|val| val.parse::<u32>().ok())
                .unwrap_or(default)
        };

        let proxy_base_url =
            get("SCORES_PROXY_URL").ok_or_else(|| anyhow!("SCORES_PROXY_URL is not set"))?;
        let defaults = Competition::default();
        let competition = Competition {
            season: id("SEASON", defaults.season),
            api_football_league: id("API_FOOTBALL_LEAGUE", defaults.api_football_league),
            api_football_round_prefix: get("API_FOOTBALL_ROUND_PREFIX")
                .unwrap_or(defaults.api_football_round_prefix),
            football_data_code: get("FOOTBALL_DATA_COMPETITION")
                .unwrap_or(defaults.football_data_code),
            sportsdb_league: id("SPORTSDB_LEAGUE", defaults.sportsdb_league),
        };
        let tracked_competitions = get("TRACKED_COMPETITIONS")
            .map(|raw| {
                raw.split(',')
                    .map(|s| s.trim().to_lowercase())
                    .filter(|s| !s.is_empty())
                    .collect::<Vec<_>>()
            })
            .filter(|list| !list.is_empty())
            .unwrap_or_else(|| {
                DEFAULT_TRACKED_COMPETITIONS
                    .iter()
                    .map(|s| s.to_string())
                    .collect()
            });

        Ok(Self {
            proxy_base_url,
            proxy_api_key: get("SCORES_PROXY_KEY"),
            request_timeout: Duration::from_secs(number("REQUEST_TIMEOUT_SECS", 10).clamp(2, 120)),
            fetch_parallelism: number("FETCH_PARALLELISM", 6).clamp(1, 32) as usize,
            competition,
            tracked_team_id: id("TRACKED_TEAM_ID", 492),
            tracked_competitions,
            api_football_function: get("API_FOOTBALL_FUNCTION")
                .unwrap_or_else(|| "api-football".to_string()),
            football_data_function: get("FOOTBALL_DATA_FUNCTION")
                .unwrap_or_else(|| "football-data".to_string()),
            sportsdb_function: get("SPORTSDB_FUNCTION")
                .unwrap_or_else(|| "thesportsdb".to_string()),
        })
    }

    /// Config for offline use (replay, tests): no proxy URL needed.
    pub fn offline() -> Self {
        Self {
            proxy_base_url: String::new(),
            proxy_api_key: None,
            request_timeout: Duration::from_secs(10),
            fetch_parallelism: 2,
            competition: Competition::default(),
            tracked_team_id: 492,
            tracked_competitions: DEFAULT_TRACKED_COMPETITIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            api_football_function: "api-football".to_string(),
            football_data_function: "football-data".to_string(),
            sportsdb_function: "thesportsdb".to_string(),
        }
    }
}
