use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use serde_json::json;

use calcio_scores::api_football;
use calcio_scores::football_data;
use calcio_scores::provider::Provider;
use calcio_scores::rounds::{group_by_round, round_view, window_for};
use calcio_scores::sportsdb;

/// Normalizes a recorded fixtures payload and prints how the round resolver
/// reads it. No network access.
fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let provider: Provider = args
        .next()
        .ok_or_else(|| anyhow!("usage: replay_round <provider> <file.json>"))?
        .parse()?;
    let path = args
        .next()
        .map(PathBuf::from)
        .ok_or_else(|| anyhow!("usage: replay_round <provider> <file.json>"))?;

    let raw = fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
    let matches = match provider {
        Provider::ApiFootball => api_football::parse_matches_json(&raw)?,
        Provider::FootballData => football_data::parse_matches_json(&raw)?,
        Provider::TheSportsDb => sportsdb::parse_events_json(&raw)?,
    };
    log::info!("{} matches normalized from {}", matches.len(), path.display());

    let window = window_for(&matches);
    let rounds: Vec<_> = group_by_round(&matches)
        .into_iter()
        .map(|g| json!({ "round": g.round, "label": g.label, "matches": g.matches.len() }))
        .collect();
    let out = json!({
        "provider": provider.key(),
        "window": window,
        "current": round_view(&matches, window.current),
        "rounds": rounds,
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}
