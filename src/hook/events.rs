//! Typed hook events.
//!
//! Only two event kinds drive any action; every other kind Gerrit can
//! deliver is accepted and ignored, which the parser signals with `None`.

use crate::types::{ChangeId, CommitId, Project};

use super::InvocationError;
use super::args::ArgMap;

/// One hook invocation's payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookEvent {
    /// A new patchset was uploaded to a change.
    PatchsetCreated(PatchsetCreated),
    /// A review comment was added to a change.
    CommentAdded(CommentAdded),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchsetCreated {
    pub project: Project,
    pub change: ChangeId,
    pub commit: CommitId,
    pub change_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentAdded {
    pub project: Project,
    pub change: ChangeId,
    pub commit: CommitId,
    /// The comment text; empty when the hook delivered none.
    pub comment: String,
    pub change_url: Option<String>,
}

/// Parses one hook invocation into a typed event.
///
/// Unrecognized kinds are a successful no-op (`Ok(None)`); a recognized
/// kind missing a required attribute is an invocation error.
pub fn parse_event(kind: &str, args: &ArgMap) -> Result<Option<HookEvent>, InvocationError> {
    match kind {
        "patchset-created" => Ok(Some(HookEvent::PatchsetCreated(PatchsetCreated {
            project: Project::new(required(kind, args, "project")?),
            change: ChangeId::new(required(kind, args, "change")?),
            commit: CommitId::new(required(kind, args, "commit")?),
            change_url: args.get("change-url").map(str::to_string),
        }))),
        "comment-added" => Ok(Some(HookEvent::CommentAdded(CommentAdded {
            project: Project::new(required(kind, args, "project")?),
            change: ChangeId::new(required(kind, args, "change")?),
            commit: CommitId::new(required(kind, args, "commit")?),
            comment: args.get("comment").unwrap_or_default().to_string(),
            change_url: args.get("change-url").map(str::to_string),
        }))),
        _ => Ok(None),
    }
}

fn required<'a>(
    kind: &str,
    args: &'a ArgMap,
    attribute: &'static str,
) -> Result<&'a str, InvocationError> {
    args.get(attribute)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| InvocationError::MissingAttribute {
            event: kind.to_string(),
            attribute,
        })
}
