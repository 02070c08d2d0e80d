use async_trait::async_trait;
use reqwest::Client;
use shared::protocol::{RandomizeResponse, SimulateRequest, SimulateResponse};
use tracing::{debug, warn};
use url::Url;

use crate::{error::SyncError, store::OutcomeStore};

/// The two server round-trips the surface depends on.
#[async_trait]
pub trait SyncTransport: Send + Sync {
    async fn randomize(&self) -> Result<RandomizeResponse, SyncError>;
    async fn simulate(&self, outcomes: &OutcomeStore) -> Result<SimulateResponse, SyncError>;
}

pub struct HttpSyncTransport {
    http: Client,
    base: Url,
}

impl HttpSyncTransport {
    pub fn new(server_url: &str) -> Result<Self, SyncError> {
        let mut base = Url::parse(server_url)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(Self {
            http: Client::new(),
            base,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, path: &str) -> Result<Url, SyncError> {
        Ok(self.base.join(path)?)
    }
}

#[async_trait]
impl SyncTransport for HttpSyncTransport {
    async fn randomize(&self) -> Result<RandomizeResponse, SyncError> {
        let url = self.endpoint("randomize")?;
        let res = self.http.get(url).send().await?;
        let status = res.status();
        if !status.is_success() {
            return Err(SyncError::Status(status.as_u16()));
        }
        let body = res.bytes().await?;
        let outcomes: RandomizeResponse = serde_json::from_slice(&body)?;
        debug!(entities = outcomes.len(), "randomize response decoded");
        Ok(outcomes)
    }

    async fn simulate(&self, outcomes: &OutcomeStore) -> Result<SimulateResponse, SyncError> {
        let url = self.endpoint("simulate")?;
        let res = self
            .http
            .post(url)
            .json(&SimulateRequest { teams: outcomes })
            .send()
            .await?;
        let status = res.status();
        let body = res.bytes().await?;

        // The server reports application failures as `success: false` bodies
        // on error statuses, so the body wins whenever it decodes.
        match serde_json::from_slice::<SimulateResponse>(&body) {
            Ok(response) => {
                if !status.is_success() {
                    warn!(%status, "simulate returned error status with a decodable body");
                }
                Ok(response)
            }
            Err(_) if !status.is_success() => Err(SyncError::Status(status.as_u16())),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
#[path = "tests/sync_tests.rs"]
mod tests;
