//! Jenkins trigger client.
//!
//! Parameterized builds go through `buildWithParameters` with HTTP basic
//! auth; the job parameters travel as query parameters. The response body
//! is not consumed.

use crate::error::HookError;
use crate::trigger::JobSpec;

use super::CiServer;

#[derive(Debug, Clone)]
pub struct JenkinsClient {
    http: reqwest::Client,
    base_url: String,
    username: String,
    token: String,
}

impl JenkinsClient {
    pub fn new(
        base_url: impl Into<String>,
        username: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        let base_url = base_url.into();
        JenkinsClient {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            username: username.into(),
            token: token.into(),
        }
    }
}

impl CiServer for JenkinsClient {
    async fn trigger_job(&self, job: &JobSpec) -> Result<(), HookError> {
        let url = format!("{}/job/{}/buildWithParameters", self.base_url, job.name());
        tracing::info!(job = job.name(), user = %self.username, url = %url, "firing CI trigger");
        let response = self
            .http
            .post(&url)
            .query(job.params())
            .basic_auth(&self.username, Some(&self.token))
            .send()
            .await
            .map_err(|e| HookError::Trigger {
                job: job.name().to_string(),
                reason: e.to_string(),
            })?;
        let status = response.status();
        if !status.is_success() {
            return Err(HookError::Trigger {
                job: job.name().to_string(),
                reason: format!("{url} returned status {status}"),
            });
        }
        Ok(())
    }
}
