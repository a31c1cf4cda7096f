//! Posts "mentions this issue" comments for newly referenced issues.

use crate::boundary::{IssueTracker, ReviewApi};
use crate::error::HookError;
use crate::types::{ChangeId, CommitId, Project};

use super::diff::new_references;
use super::extract::extract_references;

/// Announces commit-message cross-references on the issue tracker.
///
/// Unlike the trigger side, posting is fail-fast: the first failed comment
/// aborts the remaining ones, so a flaky tracker cannot cause a comment
/// storm across reruns.
pub struct NotificationDispatcher<R, T> {
    review: R,
    tracker: T,
}

impl<R: ReviewApi, T: IssueTracker> NotificationDispatcher<R, T> {
    pub fn new(review: R, tracker: T) -> Self {
        NotificationDispatcher { review, tracker }
    }

    /// Announces the references a new patchset introduces.
    ///
    /// Each invocation starts from zero knowledge, so the baseline is the
    /// empty message and every extracted reference counts as new. A prior
    /// patchset's message can be supplied through [`announce_against`]
    /// once a caller has one.
    ///
    /// [`announce_against`]: Self::announce_against
    pub async fn announce_new_patchset(
        &self,
        project: &Project,
        change: &ChangeId,
        commit: &CommitId,
        change_url: Option<&str>,
    ) -> Result<(), HookError> {
        self.announce_against(project, change, commit, change_url, None)
            .await
    }

    /// Announces references, diffing against an explicit previous message.
    pub async fn announce_against(
        &self,
        project: &Project,
        change: &ChangeId,
        commit: &CommitId,
        change_url: Option<&str>,
        previous_message: Option<&str>,
    ) -> Result<(), HookError> {
        let message = self.review.fetch_commit_message(change, commit).await?;
        let current = extract_references(&message);
        let known = extract_references(previous_message.unwrap_or(""));
        let fresh = new_references(&current, &known);

        let link = change_url.unwrap_or(change.as_str());
        for reference in &fresh {
            let repo = reference.repo.as_deref().unwrap_or(project.as_str());
            let body = format!("Change {link} mentions this issue.");
            tracing::info!(repo, issue = %reference.number, "announcing cross-reference");
            self.tracker.post_comment(repo, &reference.number, &body).await?;
        }
        Ok(())
    }
}
