use std::collections::BTreeMap;

use anyhow::{Context, Result};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api_football;
use crate::config::AppConfig;
use crate::endpoints;
use crate::json_util::{as_f64_lenient, display_value};
use crate::model::{StandingRow, TeamRef};
use crate::provider::Provider;
use crate::proxy::Proxy;

pub const POSSESSION: &str = "Ball Possession";
pub const SHOTS_ON_GOAL: &str = "Shots on Goal";
pub const TOTAL_SHOTS: &str = "Total Shots";
pub const CORNERS: &str = "Corner Kicks";
pub const FOULS: &str = "Fouls";
pub const EXPECTED_GOALS: &str = "expected_goals";

pub const DEFAULT_POSSESSION: f64 = 50.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatSample {
    pub label: String,
    pub raw: String,
    pub value: Option<f64>,
}

impl StatSample {
    /// `"55%"` reads as 55, `null` and non-numeric text as unset.
    pub fn parse(label: impl Into<String>, value: Option<&Value>) -> Self {
        Self {
            label: label.into(),
            raw: display_value(value),
            value: value.and_then(as_f64_lenient),
        }
    }
}

/// One team's statistic list for one fixture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamStatBlock {
    pub team: TeamRef,
    pub samples: Vec<StatSample>,
}

#[derive(Debug, Default, Clone, Copy, PartialEq)]
struct Totals {
    sum: f64,
    count: u32,
}

/// Per-label running sums. A label missing from a fixture (or unset there)
/// contributes to neither the sum nor the count.
#[derive(Debug, Default, Clone)]
pub struct StatAggregate {
    totals: BTreeMap<String, Totals>,
    fixtures: u32,
}

impl StatAggregate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_fixture(&mut self, samples: &[StatSample]) {
        self.fixtures += 1;
        for sample in samples {
            let Some(value) = sample.value else {
                continue;
            };
            let entry = self.totals.entry(sample.label.clone()).or_default();
            entry.sum += value;
            entry.count += 1;
        }
    }

    pub fn fixtures(&self) -> u32 {
        self.fixtures
    }

    pub fn samples(&self, label: &str) -> u32 {
        self.totals.get(label).map_or(0, |t| t.count)
    }

    pub fn average(&self, label: &str) -> Option<f64> {
        let totals = self.totals.get(label)?;
        if totals.count == 0 {
            return None;
        }
        Some(totals.sum / totals.count as f64)
    }

    pub fn average_or(&self, label: &str, default: f64) -> f64 {
        self.average(label).unwrap_or(default)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamStatistics {
    pub team: TeamRef,
    pub matches_played: u32,
    pub matches_sampled: u32,
    pub possession: f64,
    pub shots_on_goal: f64,
    pub total_shots: f64,
    pub corners: f64,
    pub fouls: f64,
    pub expected_goals: f64,
}

impl TeamStatistics {
    pub fn from_aggregate(team: TeamRef, matches_played: u32, agg: &StatAggregate) -> Self {
        Self {
            team,
            matches_played,
            matches_sampled: agg.fixtures(),
            possession: agg.average_or(POSSESSION, DEFAULT_POSSESSION),
            shots_on_goal: agg.average_or(SHOTS_ON_GOAL, 0.0),
            total_shots: agg.average_or(TOTAL_SHOTS, 0.0),
            corners: agg.average_or(CORNERS, 0.0),
            fouls: agg.average_or(FOULS, 0.0),
            expected_goals: agg.average_or(EXPECTED_GOALS, 0.0),
        }
    }
}

pub struct TeamStatsFetch {
    pub teams: Vec<TeamStatistics>,
    pub errors: Vec<String>,
}

/// Standings give the team list; each team's finished fixtures are then
/// sampled one statistics request at a time. Per-team and per-fixture
/// failures are reported in `errors` and skipped.
pub fn collect_team_statistics(proxy: &dyn Proxy, cfg: &AppConfig) -> Result<TeamStatsFetch> {
    let standings_body = proxy
        .fetch(
            Provider::ApiFootball,
            &endpoints::api_football_standings(&cfg.competition),
        )
        .context("standings request failed")?;
    let standings = api_football::standings_from_value(&standings_body)?;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(cfg.fetch_parallelism)
        .build()
        .ok();
    let work = || {
        standings
            .par_iter()
            .map(|row| team_statistics_for(proxy, cfg, row))
            .collect::<Vec<_>>()
    };
    let results = match pool.as_ref() {
        Some(pool) => pool.install(work),
        None => work(),
    };

    let mut teams = Vec::with_capacity(results.len());
    let mut errors = Vec::new();
    for (stats, errs) in results {
        errors.extend(errs);
        teams.push(stats);
    }
    Ok(TeamStatsFetch { teams, errors })
}

fn team_statistics_for(
    proxy: &dyn Proxy,
    cfg: &AppConfig,
    row: &StandingRow,
) -> (TeamStatistics, Vec<String>) {
    let mut errors = Vec::new();
    let mut agg = StatAggregate::new();

    let fixtures = proxy
        .fetch(
            Provider::ApiFootball,
            &endpoints::api_football_team_finished(&cfg.competition, &row.team.id),
        )
        .map_err(anyhow::Error::from)
        .and_then(|body| api_football::matches_from_value(&body));
    let fixtures = match fixtures {
        Ok(list) => list,
        Err(err) => {
            errors.push(format!("{} fixtures failed: {err}", row.team.name));
            Vec::new()
        }
    };

    for fixture in fixtures.iter().filter(|m| m.status.is_finished()) {
        let blocks = proxy
            .fetch(
                Provider::ApiFootball,
                &endpoints::api_football_fixture_statistics(&fixture.id),
            )
            .map_err(anyhow::Error::from)
            .and_then(|body| api_football::fixture_statistics_from_value(&body));
        match blocks {
            Ok(blocks) => {
                if let Some(block) = blocks.iter().find(|b| b.team.id == row.team.id) {
                    agg.add_fixture(&block.samples);
                }
            }
            Err(err) => errors.push(format!("fixture {} statistics failed: {err}", fixture.id)),
        }
    }

    (
        TeamStatistics::from_aggregate(row.team.clone(), row.played, &agg),
        errors,
    )
}
