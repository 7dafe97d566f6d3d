use std::env;

use anyhow::{Context, Result, anyhow};
use serde_json::json;

use calcio_scores::config::AppConfig;
use calcio_scores::feeds::Feed;
use calcio_scores::provider::Provider;
use calcio_scores::proxy::HttpProxy;
use calcio_scores::screen::{Screen, ViewState};

const USAGE: &str = "usage: calcio_scores <command> [provider] [arg]

commands:
  matches [provider]         full season of the tracked competition
  round [provider] <n>       one round
  standings [provider]
  scorers [provider]         api-football or football-data
  assists                    api-football
  squad                      tracked team
  team-stats                 per-team averages over finished fixtures
  team-matches               tracked team across tracked competitions
  match <fixture-id>         detail with lineups, events and statistics
  summary [provider]         live / competitions / today counters

providers: api-football (default), football-data, thesportsdb";

fn provider_arg(arg: Option<&String>) -> Result<Provider> {
    arg.map_or(Ok(Provider::ApiFootball), |raw| raw.parse())
}

fn parse_feed(args: &[String]) -> Result<Feed> {
    let command = args.first().ok_or_else(|| anyhow!("missing command"))?;
    let feed = match command.as_str() {
        "matches" => Feed::Matches {
            provider: provider_arg(args.get(1))?,
            round: None,
        },
        "round" => {
            // `round 5` and `round thesportsdb 5` are both accepted.
            let (provider, raw) = match (args.get(1), args.get(2)) {
                (Some(p), Some(n)) => (p.parse()?, n),
                (Some(n), None) => (Provider::ApiFootball, n),
                _ => return Err(anyhow!("round needs a number")),
            };
            let round = raw
                .parse::<u32>()
                .with_context(|| format!("invalid round: {raw}"))?;
            Feed::Matches {
                provider,
                round: Some(round),
            }
        }
        "standings" => Feed::Standings {
            provider: provider_arg(args.get(1))?,
        },
        "scorers" => Feed::TopScorers {
            provider: provider_arg(args.get(1))?,
        },
        "assists" => Feed::TopAssists,
        "squad" => Feed::Squad,
        "team-stats" => Feed::TeamStatistics,
        "team-matches" => Feed::TeamMatches,
        "match" => Feed::MatchDetail {
            fixture_id: args
                .get(1)
                .cloned()
                .ok_or_else(|| anyhow!("match needs a fixture id"))?,
        },
        "summary" => Feed::DaySummary {
            provider: provider_arg(args.get(1))?,
        },
        other => return Err(anyhow!("unknown command: {other}")),
    };
    Ok(feed)
}

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = env::args().skip(1).collect();
    if args.is_empty() || args[0] == "-h" || args[0] == "--help" {
        println!("{USAGE}");
        return Ok(());
    }
    let feed = match parse_feed(&args) {
        Ok(feed) => feed,
        Err(err) => {
            eprintln!("{err}\n\n{USAGE}");
            std::process::exit(2);
        }
    };

    let cfg = AppConfig::from_env()?;
    let proxy = HttpProxy::from_config(&cfg)?;
    let mut screen = Screen::new(feed);
    screen.load(&proxy, &cfg);

    let mut out = json!({ "view": &screen.state });
    if let Some(window) = screen.round_window() {
        out["round_window"] = json!(window);
    }
    if let Some(view) = screen.visible_round() {
        out["visible_round"] = json!(view);
    }
    println!("{}", serde_json::to_string_pretty(&out)?);

    for line in &screen.logs {
        log::debug!("{line}");
    }
    if let ViewState::Failed(_) = screen.state {
        if let Some(last) = screen.logs.back() {
            eprintln!("{last}");
        }
        std::process::exit(1);
    }
    Ok(())
}
