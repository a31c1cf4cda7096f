//! Cross-reference extraction, diffing, and notification.
//!
//! A commit message may mention tracker issues (`#42`, `owner/repo#7`, or
//! full URLs). This module discovers those mentions, derives which of them
//! are new relative to a prior message revision, and posts a comment on
//! each newly referenced issue.

mod diff;
mod extract;
mod notify;

pub use diff::new_references;
pub use extract::{IssueReference, extract_references};
pub use notify::NotificationDispatcher;
