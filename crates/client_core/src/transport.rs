//! Profile sources: the single network boundary of the profile view.

use std::time::Duration;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use shared::{
    error::{FetchFailure, ProfileUnavailable},
    protocol::{ProfileRecord, PROFILE_RESOURCE},
};
use tracing::debug;
use url::Url;

#[async_trait]
pub trait ProfileSource: Send + Sync {
    async fn fetch_profile(&self, username: &str) -> Result<ProfileRecord, ProfileUnavailable>;
}

pub struct MissingProfileSource;

#[async_trait]
impl ProfileSource for MissingProfileSource {
    async fn fetch_profile(&self, username: &str) -> Result<ProfileRecord, ProfileUnavailable> {
        Err(ProfileUnavailable::new(username, FetchFailure::Unavailable))
    }
}

/// Fetches profiles with `GET {api_base_url}/profile/{username}/`.
///
/// No retries are attempted and no timeout is applied unless one is passed
/// to [`HttpProfileSource::with_timeout`].
pub struct HttpProfileSource {
    http: Client,
    api_base_url: Url,
}

impl HttpProfileSource {
    pub fn new(api_base_url: &str) -> Result<Self> {
        Self::with_timeout(api_base_url, None)
    }

    pub fn with_timeout(api_base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let api_base_url = Url::parse(api_base_url)
            .with_context(|| format!("invalid profile api base url '{api_base_url}'"))?;
        if api_base_url.cannot_be_a_base() {
            bail!("profile api base url '{api_base_url}' cannot carry a path");
        }

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .context("failed to build profile http client")?;

        Ok(Self { http, api_base_url })
    }

    /// The username is lowercased and percent-encoded as a single segment.
    pub fn profile_url(&self, username: &str) -> Url {
        let mut url = self.api_base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .push(PROFILE_RESOURCE)
                .push(&username.to_lowercase())
                .push("");
        }
        url
    }
}

#[async_trait]
impl ProfileSource for HttpProfileSource {
    async fn fetch_profile(&self, username: &str) -> Result<ProfileRecord, ProfileUnavailable> {
        let url = self.profile_url(username);
        debug!(%url, "fetching profile");

        let unavailable = |failure: FetchFailure| ProfileUnavailable::new(username, failure);

        let res = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|err| unavailable(FetchFailure::Transport(err.to_string())))?;

        let status = res.status();
        if !status.is_success() {
            return Err(unavailable(FetchFailure::Status(status.as_u16())));
        }

        let body = res
            .bytes()
            .await
            .map_err(|err| unavailable(FetchFailure::Transport(err.to_string())))?;
        serde_json::from_slice(&body)
            .map_err(|err| unavailable(FetchFailure::Decode(err.to_string())))
    }
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
