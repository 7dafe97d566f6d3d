use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::Value;

use crate::provider::Provider;
use crate::proxy::{Proxy, ProxyError, check_envelope};

/// Serves recorded proxy responses. Lookups go to the in-memory table first,
/// then to `<dir>/<provider-key>/<endpoint-slug>.json` when a directory is set.
#[derive(Debug, Default, Clone)]
pub struct ReplayProxy {
    bodies: HashMap<(Provider, String), Value>,
    dir: Option<PathBuf>,
}

impl ReplayProxy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            bodies: HashMap::new(),
            dir: Some(dir.into()),
        }
    }

    pub fn with(mut self, provider: Provider, endpoint: &str, body: Value) -> Self {
        self.insert(provider, endpoint, body);
        self
    }

    pub fn insert(&mut self, provider: Provider, endpoint: &str, body: Value) {
        self.bodies.insert((provider, endpoint.to_string()), body);
    }

    fn read_recorded(&self, provider: Provider, endpoint: &str) -> Option<Result<Value>> {
        let dir = self.dir.as_ref()?;
        let path = recorded_path(dir, provider, endpoint);
        if !path.exists() {
            return None;
        }
        Some(
            fs::read_to_string(&path)
                .with_context(|| format!("read {}", path.display()))
                .and_then(|raw| {
                    serde_json::from_str(&raw).with_context(|| format!("parse {}", path.display()))
                }),
        )
    }
}

pub fn endpoint_slug(endpoint: &str) -> String {
    endpoint
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

pub fn recorded_path(dir: &Path, provider: Provider, endpoint: &str) -> PathBuf {
    dir.join(provider.key())
        .join(format!("{}.json", endpoint_slug(endpoint)))
}

impl Proxy for ReplayProxy {
    fn fetch(&self, provider: Provider, endpoint: &str) -> Result<Value, ProxyError> {
        if let Some(body) = self.bodies.get(&(provider, endpoint.to_string())) {
            return check_envelope(provider, body.clone());
        }
        match self.read_recorded(provider, endpoint) {
            Some(Ok(body)) => check_envelope(provider, body),
            Some(Err(err)) => Err(ProxyError::Decode {
                provider,
                message: format!("{err:#}"),
            }),
            None => Err(ProxyError::Status {
                status: 404,
                body: format!("no recording for {provider} {endpoint}"),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unknown_endpoint_is_a_404() {
        let proxy = ReplayProxy::new();
        let err = proxy
            .fetch(Provider::TheSportsDb, "lookuptable.php?l=4332")
            .unwrap_err();
        assert!(matches!(err, ProxyError::Status { status: 404, .. }));
    }

    #[test]
    fn recorded_envelopes_still_fail() {
        let proxy = ReplayProxy::new().with(
            Provider::ApiFootball,
            "standings",
            json!({ "error": "API_FOOTBALL_KEY non configurata" }),
        );
        assert!(proxy.fetch(Provider::ApiFootball, "standings").is_err());
    }

    #[test]
    fn slugs_are_filesystem_safe() {
        assert_eq!(
            endpoint_slug("fixtures?league=135&season=2025"),
            "fixtures_league_135_season_2025"
        );
    }
}
