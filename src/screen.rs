use std::collections::VecDeque;

use anyhow::Result;
use serde::Serialize;

use crate::config::AppConfig;
use crate::feeds::{Feed, Fetched, Payload, fetch_feed};
use crate::proxy::Proxy;
use crate::rounds::{DEFAULT_ROUND, RoundView, RoundWindow, round_view, window_for};

pub const DATA_UNAVAILABLE: &str = "Data unavailable";
const MAX_LOGS: usize = 200;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum ViewState {
    Loading,
    Ready(Payload),
    Empty(String),
    Failed(String),
}

/// One screen's feed, its latest result and its own log. Nothing here is
/// shared with other screens.
#[derive(Debug, Clone)]
pub struct Screen {
    pub feed: Feed,
    pub state: ViewState,
    pub logs: VecDeque<String>,
    pub shown_round: Option<u32>,
}

impl Screen {
    pub fn new(feed: Feed) -> Self {
        Self {
            feed,
            state: ViewState::Loading,
            logs: VecDeque::new(),
            shown_round: None,
        }
    }

    pub fn load(&mut self, proxy: &dyn Proxy, cfg: &AppConfig) {
        self.state = ViewState::Loading;
        self.push_log(format!("[INFO] Fetching {:?}", self.feed));
        let result = fetch_feed(proxy, cfg, &self.feed);
        self.apply(result);
    }

    /// Re-issues the same request; there is no automatic retry.
    pub fn retry(&mut self, proxy: &dyn Proxy, cfg: &AppConfig) {
        self.push_log("[INFO] Retry requested");
        self.load(proxy, cfg);
    }

    pub fn apply(&mut self, result: Result<Fetched>) {
        match result {
            Ok(fetched) => {
                for warning in &fetched.warnings {
                    log::warn!("{warning}");
                    self.push_log(format!("[WARN] {warning}"));
                }
                if fetched.payload.is_empty() {
                    self.shown_round = self.lists_matches().then_some(DEFAULT_ROUND);
                    self.state = ViewState::Empty(self.feed.empty_message().to_string());
                    return;
                }
                self.shown_round = match &fetched.payload {
                    Payload::Matches(list) => Some(window_for(list).current),
                    _ => None,
                };
                self.state = ViewState::Ready(fetched.payload);
            }
            Err(err) => {
                log::warn!("fetch failed: {err:#}");
                self.push_log(format!("[WARN] Fetch error: {err:#}"));
                self.shown_round = None;
                self.state = ViewState::Failed(DATA_UNAVAILABLE.to_string());
            }
        }
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        self.logs.push_back(msg.into());
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }

    pub fn matches(&self) -> Option<&[crate::model::Match]> {
        match &self.state {
            ViewState::Ready(Payload::Matches(list)) => Some(list.as_slice()),
            _ => None,
        }
    }

    fn lists_matches(&self) -> bool {
        matches!(self.feed, Feed::Matches { .. } | Feed::TeamMatches)
    }

    /// An empty match list still resolves to the default round.
    pub fn round_window(&self) -> Option<RoundWindow> {
        match &self.state {
            ViewState::Ready(Payload::Matches(list)) => Some(window_for(list)),
            ViewState::Empty(_) if self.lists_matches() => Some(window_for(&[])),
            _ => None,
        }
    }

    pub fn toggle_round(&mut self) {
        let Some(window) = self.round_window() else {
            return;
        };
        let shown = self.shown_round.unwrap_or(window.current);
        self.shown_round = Some(window.toggle(shown));
    }

    pub fn visible_round(&self) -> Option<RoundView<'_>> {
        let matches = self.matches()?;
        let round = self.shown_round?;
        Some(round_view(matches, round))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::Provider;

    #[test]
    fn log_ring_is_bounded() {
        let mut screen = Screen::new(Feed::TopAssists);
        for i in 0..(MAX_LOGS + 10) {
            screen.push_log(format!("line {i}"));
        }
        assert_eq!(screen.logs.len(), MAX_LOGS);
        assert_eq!(screen.logs.front().map(String::as_str), Some("line 10"));
    }

    #[test]
    fn errors_become_failed_state() {
        let mut screen = Screen::new(Feed::Standings {
            provider: Provider::FootballData,
        });
        screen.apply(Err(anyhow::anyhow!("http 403")));
        assert_eq!(screen.state, ViewState::Failed(DATA_UNAVAILABLE.to_string()));
        assert!(screen.logs.iter().any(|l| l.contains("http 403")));
    }
}
