use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Provider {
    ApiFootball,
    FootballData,
    TheSportsDb,
}

impl Provider {
    pub const ALL: [Provider; 3] = [
        Provider::ApiFootball,
        Provider::FootballData,
        Provider::TheSportsDb,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Provider::ApiFootball => "api-football",
            Provider::FootballData => "football-data",
            Provider::TheSportsDb => "thesportsdb",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Provider::ApiFootball => "API-Football",
            Provider::FootballData => "Football-Data",
            Provider::TheSportsDb => "TheSportsDB",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Provider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        match lowered.as_str() {
            "api-football" | "apifootball" | "af" => Ok(Provider::ApiFootball),
            "football-data" | "footballdata" | "fd" => Ok(Provider::FootballData),
            "thesportsdb" | "sportsdb" | "tsdb" => Ok(Provider::TheSportsDb),
            _ => Err(anyhow::anyhow!("unknown provider: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_round_trip_through_from_str() {
        for provider in Provider::ALL {
            assert_eq!(provider.key().parse::<Provider>().ok(), Some(provider));
        }
        assert!("espn".parse::<Provider>().is_err());
    }
}
