//! Maps hook events to conditional CI job triggers.

use crate::boundary::{CiServer, ReviewApi};
use crate::error::{self, HookError};
use crate::types::{ChangeId, CommitId, Project};

use super::conditions::Condition;
use super::job::{BuildKind, GERRIT_REF_PARAM, JobSpec, job_name};

/// Comment posted by the verify build when it succeeds.
const VERIFY_SUCCESS_MARKER: &str = "build verify is finished successfully";

/// Decides whether a CI job fires for an event and fires it.
///
/// Every decision re-fetches the change so it is made against current
/// label state. Only projects on the allow-list (matched by short name)
/// ever trigger builds; everything else is a successful no-op.
pub struct TriggerDispatcher<R, C> {
    review: R,
    ci: C,
    projects: Vec<String>,
}

impl<R: ReviewApi, C: CiServer> TriggerDispatcher<R, C> {
    pub fn new(review: R, ci: C, projects: Vec<String>) -> Self {
        TriggerDispatcher {
            review,
            ci,
            projects,
        }
    }

    fn eligible(&self, project: &Project) -> bool {
        self.projects.iter().any(|p| p == project.short_name())
    }

    /// A new patchset attempts the verify and premerge jobs independently.
    ///
    /// Both triggers run even when the first fails; their errors are
    /// reported together.
    pub async fn on_new_patchset(
        &self,
        project: &Project,
        change: &ChangeId,
        commit: &CommitId,
    ) -> Result<(), HookError> {
        if !self.eligible(project) {
            return Ok(());
        }
        let verify = self
            .trigger_job_if_required(
                change,
                commit,
                &job_name(project, BuildKind::Verify),
                Condition::VerifyNeeded,
            )
            .await;
        let premerge = self
            .trigger_job_if_required(
                change,
                commit,
                &job_name(project, BuildKind::Premerge),
                Condition::PremergeReady,
            )
            .await;
        error::combine([verify, premerge])
    }

    /// A successful verify build reports back as a review comment; that
    /// comment is the cue to attempt the premerge build.
    pub async fn on_verify_success(
        &self,
        project: &Project,
        change: &ChangeId,
        commit: &CommitId,
        comment: &str,
    ) -> Result<(), HookError> {
        if !self.eligible(project) || !comment.contains(VERIFY_SUCCESS_MARKER) {
            return Ok(());
        }
        self.trigger_job_if_required(
            change,
            commit,
            &job_name(project, BuildKind::Premerge),
            Condition::PremergeReady,
        )
        .await
    }

    /// Explicit `run jenkins …` requests in review comments.
    ///
    /// These bypass label gating entirely; a human asked for the build.
    pub async fn on_comment(
        &self,
        project: &Project,
        change: &ChangeId,
        commit: &CommitId,
        comment: &str,
    ) -> Result<(), HookError> {
        if !self.eligible(project) {
            return Ok(());
        }
        let Some(kind) = requested_build(comment) else {
            return Ok(());
        };
        tracing::info!(
            project = project.as_str(),
            change = change.as_str(),
            build = kind.as_str(),
            "build requested by review comment"
        );
        self.trigger_job_if_required(change, commit, &job_name(project, kind), Condition::Always)
            .await
    }

    /// Fetches the change's current label state and fires `job` when
    /// `condition` holds.
    ///
    /// A change that is not (yet) in a triggering state is the expected
    /// outcome, not an error.
    pub async fn trigger_job_if_required(
        &self,
        change: &ChangeId,
        commit: &CommitId,
        job: &str,
        condition: Condition,
    ) -> Result<(), HookError> {
        let snapshot = self.review.fetch_change(change).await?;
        if !condition.is_satisfied(&snapshot) {
            tracing::debug!(
                change = change.as_str(),
                job,
                condition = ?condition,
                "change is not in a triggering state"
            );
            return Ok(());
        }
        let spec = JobSpec::new(job).with_param(GERRIT_REF_PARAM, commit.as_str());
        tracing::info!(job, commit = commit.as_str(), "triggering CI job");
        self.ci.trigger_job(&spec).await
    }
}

/// Scans a comment for an explicit build request. First marker wins; the
/// bare `run jenkins` form defaults to a verify build.
fn requested_build(comment: &str) -> Option<BuildKind> {
    if comment.contains("run jenkins verify") {
        Some(BuildKind::Verify)
    } else if comment.contains("run jenkins premerge") {
        Some(BuildKind::Premerge)
    } else if comment.contains("run jenkins") {
        Some(BuildKind::Verify)
    } else {
        None
    }
}
