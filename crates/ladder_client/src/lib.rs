//! Ladder backend access: the `LadderClient` boundary and its HTTP implementation.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use shared::{
    domain::{CharacterRecord, LadderMode},
    protocol::LadderResponse,
};
use tracing::{debug, warn};
use url::Url;

pub mod error;

pub use error::LadderClientError;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_USER_AGENT: &str = concat!("ladder-launcher/", env!("CARGO_PKG_VERSION"));

/// Retrieves the ranked characters of one ladder.
///
/// Calls may take seconds and may overlap, so implementations must be safe
/// to invoke concurrently. Bounding latency (timeouts) is up to the
/// implementation; callers never cancel an in-flight fetch.
#[async_trait]
pub trait LadderClient: Send + Sync {
    async fn fetch_characters(
        &self,
        mode: &LadderMode,
    ) -> Result<Vec<CharacterRecord>, LadderClientError>;
}

#[derive(Debug, Clone)]
pub struct LadderClientConfig {
    pub base_url: Url,
    pub timeout: Duration,
    pub user_agent: String,
}

impl LadderClientConfig {
    pub fn new(base_url: &str) -> Result<Self, LadderClientError> {
        let base_url = Url::parse(base_url.trim()).map_err(|err| LadderClientError::InvalidUrl {
            url: base_url.to_string(),
            reason: err.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(LadderClientError::InvalidUrl {
                url: base_url.to_string(),
                reason: "url cannot be used as a base".to_string(),
            });
        }

        Ok(Self {
            base_url,
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// Fetches `GET {base_url}/ladder/{mode}` and decodes the JSON character list.
#[derive(Debug, Clone)]
pub struct HttpLadderClient {
    http: Client,
    base_url: Url,
}

impl HttpLadderClient {
    pub fn new(config: LadderClientConfig) -> Result<Self, LadderClientError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent)
            .build()
            .map_err(LadderClientError::Transport)?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn ladder_url(&self, mode: &LadderMode) -> Result<Url, LadderClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| LadderClientError::InvalidUrl {
                url: self.base_url.to_string(),
                reason: "url cannot be used as a base".to_string(),
            })?
            .pop_if_empty()
            .push("ladder")
            .push(mode.as_str());
        Ok(url)
    }
}

#[async_trait]
impl LadderClient for HttpLadderClient {
    async fn fetch_characters(
        &self,
        mode: &LadderMode,
    ) -> Result<Vec<CharacterRecord>, LadderClientError> {
        if mode.is_blank() {
            return Err(LadderClientError::InvalidMode);
        }

        let url = self.ladder_url(mode)?;
        debug!(%mode, %url, "requesting ladder");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(LadderClientError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let err = LadderClientError::from_response(mode.as_str(), status.as_u16(), &body);
            warn!(%mode, status = status.as_u16(), error = %err, "ladder backend rejected request");
            return Err(err);
        }

        let body = response
            .bytes()
            .await
            .map_err(LadderClientError::Transport)?;
        let characters = serde_json::from_slice::<LadderResponse>(&body)?.into_characters();
        debug!(%mode, count = characters.len(), "ladder received");
        Ok(characters)
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
