use anyhow::{bail, Context, Result};
use reqwest::blocking::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use std::time::Duration;
use url::Url;

use super::entity::{parse_snapshot, Entity};
use super::service::ActionDescriptor;

/// Server URL and long-lived access token supplied by the host.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Preferences {
    pub url: String,
    pub key: String,
}

impl Preferences {
    pub fn new(url: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            key: key.into(),
        }
    }

    /// Server URL with surrounding whitespace and trailing slashes removed.
    pub fn base_url(&self) -> &str {
        self.url.trim().trim_end_matches('/')
    }

    /// True when the URL is a parseable absolute http(s) URL.
    pub fn has_valid_url(&self) -> bool {
        let base = self.base_url();
        if base.is_empty() {
            return false;
        }
        matches!(Url::parse(base), Ok(u) if matches!(u.scheme(), "http" | "https"))
    }

    pub fn has_key(&self) -> bool {
        !self.key.trim().is_empty()
    }

    pub fn authorization(&self) -> String {
        format!("Bearer {}", self.key.trim())
    }
}

/// Remote operations the launcher needs from Home Assistant.
pub trait HassApi: Send + Sync {
    /// Fetch the full entity snapshot.
    fn fetch_states(&self, prefs: &Preferences) -> Result<Vec<Entity>>;
    /// Issue the state-changing call described by `descriptor`.
    fn call_service(&self, descriptor: &ActionDescriptor) -> Result<()>;
}

/// [`HassApi`] over the Home Assistant REST API.
pub struct HttpApi {
    client: Client,
}

impl HttpApi {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent("hass-launcher")
            .build()?;
        Ok(Self { client })
    }
}

impl HassApi for HttpApi {
    fn fetch_states(&self, prefs: &Preferences) -> Result<Vec<Entity>> {
        fetch_snapshot(&self.client, prefs)
    }

    fn call_service(&self, descriptor: &ActionDescriptor) -> Result<()> {
        let resp = self
            .client
            .post(&descriptor.endpoint)
            .header(AUTHORIZATION, descriptor.authorization.as_str())
            .header(CONTENT_TYPE, "application/json")
            .body(descriptor.body()?)
            .send()
            .with_context(|| format!("request to {} failed", descriptor.endpoint))?;
        let status = resp.status();
        if !status.is_success() {
            bail!("service call returned {status}");
        }
        Ok(())
    }
}

/// `GET {url}/api/states` and parse the response into a snapshot.
///
/// A non-success status fails with the response body as the message, or the
/// status line when the body is empty.
pub fn fetch_snapshot(client: &Client, prefs: &Preferences) -> Result<Vec<Entity>> {
    let url = format!("{}/api/states", prefs.base_url());
    tracing::debug!(%url, "fetching entity states");
    let resp = client
        .get(&url)
        .header(AUTHORIZATION, prefs.authorization())
        .header(CONTENT_TYPE, "application/json")
        .send()
        .with_context(|| format!("request to {url} failed"))?;
    let status = resp.status();
    let body = resp.text().context("failed to read states response")?;
    if !status.is_success() {
        let detail = body.trim();
        if detail.is_empty() {
            bail!("{status}");
        }
        bail!("{detail}");
    }
    parse_snapshot(&body)
}
