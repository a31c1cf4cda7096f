//! GitHub issue-comment client backed by octocrab.

use octocrab::Octocrab;

use crate::error::HookError;

use super::IssueTracker;

#[derive(Clone)]
pub struct GithubTracker {
    client: Octocrab,
}

impl GithubTracker {
    /// Builds a tracker authenticated with a personal access token.
    pub fn from_token(token: impl Into<String>) -> Result<Self, octocrab::Error> {
        let client = Octocrab::builder().personal_token(token.into()).build()?;
        Ok(GithubTracker { client })
    }

    /// Wraps a pre-configured client (custom auth, alternate base URL).
    pub fn from_octocrab(client: Octocrab) -> Self {
        GithubTracker { client }
    }
}

impl std::fmt::Debug for GithubTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GithubTracker").finish_non_exhaustive()
    }
}

impl IssueTracker for GithubTracker {
    async fn post_comment(&self, repo: &str, issue: &str, body: &str) -> Result<(), HookError> {
        let Some((owner, name)) = repo.split_once('/') else {
            return Err(HookError::Notify {
                target: repo.to_string(),
                reason: "repository must be in owner/name form".to_string(),
            });
        };
        let number: u64 = issue.parse().map_err(|_| HookError::Notify {
            target: format!("{repo}#{issue}"),
            reason: "issue number is not numeric".to_string(),
        })?;
        self.client
            .issues(owner, name)
            .create_comment(number, body)
            .await
            .map(|_| ())
            .map_err(|e| HookError::Notify {
                target: format!("{repo}#{issue}"),
                reason: e.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anonymous() -> GithubTracker {
        GithubTracker::from_octocrab(Octocrab::builder().build().unwrap())
    }

    #[tokio::test]
    async fn rejects_a_repo_without_an_owner() {
        let err = anonymous()
            .post_comment("widgets", "42", "hi")
            .await
            .unwrap_err();
        match err {
            HookError::Notify { target, reason } => {
                assert_eq!(target, "widgets");
                assert!(reason.contains("owner/name"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn rejects_a_non_numeric_issue() {
        let err = anonymous()
            .post_comment("acme/widgets", "forty-two", "hi")
            .await
            .unwrap_err();
        assert!(matches!(err, HookError::Notify { .. }));
    }
}
