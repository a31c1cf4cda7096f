//! Capability interfaces over the review system, the CI server, and the
//! issue tracker.
//!
//! The decision subsystems depend only on these traits; the concrete
//! clients are injected at startup. Tests supply in-memory implementations
//! and never touch the network.

use std::future::Future;

use crate::error::HookError;
use crate::trigger::JobSpec;
use crate::types::{Change, ChangeId, CommitId};

mod gerrit;
mod github;
mod jenkins;

pub use gerrit::GerritClient;
pub use github::GithubTracker;
pub use jenkins::JenkinsClient;

/// Read side of the review system.
pub trait ReviewApi {
    /// Fetches the current label/vote snapshot of a change.
    fn fetch_change(
        &self,
        change: &ChangeId,
    ) -> impl Future<Output = Result<Change, HookError>> + Send;

    /// Fetches the full commit message of one patchset revision.
    fn fetch_commit_message(
        &self,
        change: &ChangeId,
        commit: &CommitId,
    ) -> impl Future<Output = Result<String, HookError>> + Send;
}

/// Fire-and-acknowledge CI job trigger. No response payload is consumed.
pub trait CiServer {
    fn trigger_job(&self, job: &JobSpec) -> impl Future<Output = Result<(), HookError>> + Send;
}

/// Comment sink of the issue tracker.
pub trait IssueTracker {
    /// Posts `body` as a comment on `repo`'s issue `issue`.
    fn post_comment(
        &self,
        repo: &str,
        issue: &str,
        body: &str,
    ) -> impl Future<Output = Result<(), HookError>> + Send;
}
