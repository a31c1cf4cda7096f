//! Gerrit REST client.
//!
//! Gerrit prefixes every JSON response body with `)]}'` to defeat XSSI;
//! the prefix is stripped before decoding. Non-2xx statuses and transport
//! failures surface as fetch errors, undecodable bodies as decode errors.

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::HookError;
use crate::types::{Change, ChangeId, CommitId};

use super::ReviewApi;

const XSSI_PREFIX: &str = ")]}'";

#[derive(Debug, Clone)]
pub struct GerritClient {
    http: reqwest::Client,
    base_url: String,
}

impl GerritClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        GerritClient {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: String) -> Result<T, HookError> {
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| HookError::UpstreamFetch {
                url: url.clone(),
                reason: e.to_string(),
            })?;
        let status = response.status();
        if !status.is_success() {
            return Err(HookError::UpstreamFetch {
                url,
                reason: format!("status {status}"),
            });
        }
        let body = response
            .text()
            .await
            .map_err(|e| HookError::UpstreamFetch {
                url: url.clone(),
                reason: e.to_string(),
            })?;
        let payload = body.strip_prefix(XSSI_PREFIX).unwrap_or(&body).trim_start();
        serde_json::from_str(payload).map_err(|e| HookError::UpstreamDecode {
            url,
            reason: e.to_string(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct CommitInfo {
    #[serde(default)]
    message: String,
}

impl ReviewApi for GerritClient {
    async fn fetch_change(&self, change: &ChangeId) -> Result<Change, HookError> {
        self.get_json(format!("{}/changes/{}/?o=LABELS", self.base_url, change))
            .await
    }

    async fn fetch_commit_message(
        &self,
        change: &ChangeId,
        commit: &CommitId,
    ) -> Result<String, HookError> {
        let info: CommitInfo = self
            .get_json(format!(
                "{}/changes/{}/revisions/{}/commit",
                self.base_url, change, commit
            ))
            .await?;
        Ok(info.message)
    }
}
