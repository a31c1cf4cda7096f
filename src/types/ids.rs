//! Newtype wrappers for review-system identifiers.
//!
//! These types prevent accidental mixing of the identifiers a hook call
//! carries (e.g., passing a commit where a change id is expected) and make
//! signatures self-documenting.

use std::fmt;

/// A Gerrit change identifier as delivered by the hook (`--change`).
///
/// Usually the triplet form `project~branch~I<hash>`. The value is passed
/// through to the REST API verbatim; Gerrit delivers it already URL-safe.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChangeId(String);

impl ChangeId {
    pub fn new(s: impl Into<String>) -> Self {
        ChangeId(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChangeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ChangeId {
    fn from(s: &str) -> Self {
        ChangeId(s.to_string())
    }
}

/// A patchset revision identifier (`--commit`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CommitId(String);

impl CommitId {
    pub fn new(s: impl Into<String>) -> Self {
        CommitId(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CommitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CommitId {
    fn from(s: &str) -> Self {
        CommitId(s.to_string())
    }
}

/// A Gerrit project, possibly namespaced (e.g. `acme/widgets`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Project(String);

impl Project {
    pub fn new(s: impl Into<String>) -> Self {
        Project(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The text after the final `/`. Job names and the project allow-list
    /// operate on this short form.
    pub fn short_name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }
}

impl fmt::Display for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Project {
    fn from(s: &str) -> Self {
        Project(s.to_string())
    }
}
