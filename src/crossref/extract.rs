//! Issue-reference discovery in commit messages.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

// Pre-compiled patterns; hard-coded and known-valid.
static SHORTHAND: LazyLock<Regex> = LazyLock::new(|| {
    match Regex::new(r"([A-Za-z0-9_.-]+/[A-Za-z0-9_.-]+)?#(\d+)") {
        Ok(re) => re,
        Err(_) => unreachable!("static regex pattern"),
    }
});

static TRACKER_URL: LazyLock<Regex> = LazyLock::new(|| {
    match Regex::new(r"https://github\.com/([A-Za-z0-9_.-]+/[A-Za-z0-9_.-]+)/(?:pull|issues)/(\d+)")
    {
        Ok(re) => re,
        Err(_) => unreachable!("static regex pattern"),
    }
});

/// A textual mention of a tracker issue or pull request.
///
/// `repo == None` means "the repository of the current project"; the
/// notifier substitutes it before posting. Equality is structural, which is
/// what the diff stage relies on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IssueReference {
    /// `owner/name`, when the mention spelled one out.
    pub repo: Option<String>,
    /// Issue or pull request number, kept as text.
    pub number: String,
}

impl IssueReference {
    /// A reference without an explicit repository (`#42`).
    pub fn local(number: impl Into<String>) -> Self {
        IssueReference {
            repo: None,
            number: number.into(),
        }
    }

    /// A reference naming its repository (`owner/name#42`).
    pub fn in_repo(repo: impl Into<String>, number: impl Into<String>) -> Self {
        IssueReference {
            repo: Some(repo.into()),
            number: number.into(),
        }
    }
}

impl fmt::Display for IssueReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.repo {
            Some(repo) => write!(f, "{}#{}", repo, self.number),
            None => write!(f, "#{}", self.number),
        }
    }
}

/// Scans a commit message for issue references, line by line.
///
/// A reference must sit entirely on one line, and each of the two patterns
/// (shorthand `owner/name#123` and full tracker URL) contributes at most
/// its first match per line. Discovery order is preserved; duplicates are
/// kept here and collapse at the diff stage.
pub fn extract_references(message: &str) -> Vec<IssueReference> {
    let mut refs = Vec::new();
    for line in message.lines() {
        if let Some(caps) = SHORTHAND.captures(line) {
            refs.push(IssueReference {
                repo: caps.get(1).map(|m| m.as_str().to_string()),
                number: caps[2].to_string(),
            });
        }
        if let Some(caps) = TRACKER_URL.captures(line) {
            refs.push(IssueReference {
                repo: Some(caps[1].to_string()),
                number: caps[2].to_string(),
            });
        }
    }
    refs
}
