use reqwest::blocking::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde_json::{Value, json};
use thiserror::Error;

use crate::config::AppConfig;
use crate::http_client::http_client;
use crate::provider::Provider;

#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("proxy request failed: {0}")]
    Transport(String),
    #[error("proxy returned http {status}: {body}")]
    Status { status: u16, body: String },
    #[error("{provider} reported an error: {message}")]
    Upstream { provider: Provider, message: String },
    #[error("invalid json from {provider}: {message}")]
    Decode { provider: Provider, message: String },
}

/// The backend boundary: one call, one JSON body or one error.
pub trait Proxy: Send + Sync {
    fn fetch(&self, provider: Provider, endpoint: &str) -> Result<Value, ProxyError>;
}

/// Rejects `{ "error": ... }` envelopes and API-Football's non-empty
/// `errors` member; anything else is handed back untouched.
pub fn check_envelope(provider: Provider, body: Value) -> Result<Value, ProxyError> {
    if let Some(message) = envelope_error(&body) {
        return Err(ProxyError::Upstream { provider, message });
    }
    Ok(body)
}

fn envelope_error(body: &Value) -> Option<String> {
    match body.get("error") {
        Some(Value::String(msg)) => {
            if !msg.trim().is_empty() {
                return Some(msg.trim().to_string());
            }
        }
        Some(Value::Null) | Some(Value::Bool(false)) | None => {}
        Some(other) => return Some(other.to_string()),
    }
    match body.get("errors") {
        Some(Value::Array(list)) if !list.is_empty() => Some(Value::Array(list.clone()).to_string()),
        Some(Value::Object(map)) if !map.is_empty() => {
            let parts: Vec<String> = map
                .iter()
                .map(|(k, v)| match v {
                    Value::String(s) => format!("{k}: {s}"),
                    other => format!("{k}: {other}"),
                })
                .collect();
            Some(parts.join("; "))
        }
        _ => None,
    }
}

pub struct HttpProxy {
    client: &'static Client,
    base_url: String,
    api_key: Option<String>,
    functions: [(Provider, String); 3],
}

impl HttpProxy {
    pub fn from_config(cfg: &AppConfig) -> anyhow::Result<Self> {
        let client = http_client(cfg.request_timeout)?;
        Ok(Self {
            client,
            base_url: cfg.proxy_base_url.trim_end_matches('/').to_string(),
            api_key: cfg.proxy_api_key.clone(),
            functions: [
                (Provider::ApiFootball, cfg.api_football_function.clone()),
                (Provider::FootballData, cfg.football_data_function.clone()),
                (Provider::TheSportsDb, cfg.sportsdb_function.clone()),
            ],
        })
    }

    fn function_url(&self, provider: Provider) -> String {
        let name = self
            .functions
            .iter()
            .find(|(p, _)| *p == provider)
            .map(|(_, name)| name.as_str())
            .unwrap_or(provider.key());
        format!("{}/{}", self.base_url, name)
    }
}

impl Proxy for HttpProxy {
    fn fetch(&self, provider: Provider, endpoint: &str) -> Result<Value, ProxyError> {
        let url = self.function_url(provider);
        log::info!("{provider} request: {endpoint}");

        let mut req = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .json(&json!({ "endpoint": endpoint }));
        if let Some(key) = self.api_key.as_deref() {
            req = req
                .header(AUTHORIZATION, format!("Bearer {key}"))
                .header("apikey", key);
        }

        let resp = req
            .send()
            .map_err(|err| ProxyError::Transport(err.to_string()))?;
        let status = resp.status();
        let body = resp
            .text()
            .map_err(|err| ProxyError::Transport(format!("failed reading body: {err}")))?;

        let parsed = serde_json::from_str::<Value>(body.trim());
        if !status.is_success() {
            // The proxy wraps most failures in an envelope; prefer its message.
            if let Ok(value) = parsed.as_ref()
                && let Some(message) = envelope_error(value)
            {
                return Err(ProxyError::Upstream { provider, message });
            }
            return Err(ProxyError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let value = parsed.map_err(|err| ProxyError::Decode {
            provider,
            message: err.to_string(),
        })?;
        check_envelope(provider, value)
    }
}
