//! Routes one hook event to its dispatcher actions.

use crate::boundary::{CiServer, IssueTracker, ReviewApi};
use crate::crossref::NotificationDispatcher;
use crate::error::{self, HookError};
use crate::trigger::TriggerDispatcher;

use super::events::HookEvent;

/// Fans one event out to the trigger and notification dispatchers.
///
/// The actions under one event kind are independent: each is attempted
/// even when a sibling fails, and their errors are reported together.
pub struct EventRouter<R, C, T> {
    triggers: TriggerDispatcher<R, C>,
    notifier: NotificationDispatcher<R, T>,
}

impl<R, C, T> EventRouter<R, C, T>
where
    R: ReviewApi + Clone,
    C: CiServer,
    T: IssueTracker,
{
    pub fn new(review: R, ci: C, tracker: T, projects: Vec<String>) -> Self {
        EventRouter {
            triggers: TriggerDispatcher::new(review.clone(), ci, projects),
            notifier: NotificationDispatcher::new(review, tracker),
        }
    }

    pub async fn handle(&self, event: &HookEvent) -> Result<(), HookError> {
        match event {
            HookEvent::PatchsetCreated(e) => error::combine([
                self.notifier
                    .announce_new_patchset(
                        &e.project,
                        &e.change,
                        &e.commit,
                        e.change_url.as_deref(),
                    )
                    .await,
                self.triggers
                    .on_new_patchset(&e.project, &e.change, &e.commit)
                    .await,
            ]),
            HookEvent::CommentAdded(e) => error::combine([
                self.triggers
                    .on_comment(&e.project, &e.change, &e.commit, &e.comment)
                    .await,
                self.triggers
                    .on_verify_success(&e.project, &e.change, &e.commit, &e.comment)
                    .await,
            ]),
        }
    }
}
