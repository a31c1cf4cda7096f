//! CI job naming and parameter specs.

use std::collections::BTreeMap;
use std::fmt;

use crate::types::Project;

/// Parameter carrying the patchset revision to the build.
pub const GERRIT_REF_PARAM: &str = "GERRIT_REF";

/// Kind of build a trigger decision selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildKind {
    Verify,
    Premerge,
}

impl BuildKind {
    pub fn as_str(self) -> &'static str {
        match self {
            BuildKind::Verify => "verify",
            BuildKind::Premerge => "premerge",
        }
    }
}

impl fmt::Display for BuildKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The Jenkins job serving `kind` builds for a project.
pub fn job_name(project: &Project, kind: BuildKind) -> String {
    format!("{}-gerrit-{}", project.short_name(), kind)
}

/// One CI job invocation: a job name plus string parameters.
///
/// Built at the moment a condition is satisfied and consumed once by the
/// CI boundary call; never retained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobSpec {
    name: String,
    params: BTreeMap<String, String>,
}

impl JobSpec {
    pub fn new(name: impl Into<String>) -> Self {
        JobSpec {
            name: name.into(),
            params: BTreeMap::new(),
        }
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn params(&self) -> &BTreeMap<String, String> {
        &self.params
    }
}
