use std::time::Duration;

use anyhow::{Context, Result};
use once_cell::sync::OnceCell;
use reqwest::blocking::Client;

const USER_AGENT: &str = concat!("calcio-scores/", env!("CARGO_PKG_VERSION"));

static PROXY_CLIENT: OnceCell<Client> = OnceCell::new();

/// Blocking client shared by every proxy call. Built once; later timeouts
/// are ignored.
pub fn http_client(timeout: Duration) -> Result<&'static Client> {
    PROXY_CLIENT.get_or_try_init(|| {
        Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(timeout.min(Duration::from_secs(5)))
            .timeout(timeout)
            .build()
            .with_context(|| format!("building proxy client (timeout {}s)", timeout.as_secs()))
    })
}
