//! Snapshot of a reviewed change and aggregation over its label votes.
//!
//! A `Change` is fetched fresh for every triggering decision and discarded
//! once the decision is made; nothing here is cached across hook calls.

use std::collections::BTreeMap;

use serde::Deserialize;

/// A reviewed change as returned by `GET /changes/{id}/?o=LABELS`.
///
/// Only the fields the decision logic reads are modeled; the status fields
/// are carried for logging. All fields default so that a sparse server
/// response still decodes.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Change {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub project: String,
    #[serde(default)]
    pub branch: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub labels: BTreeMap<String, LabelInfo>,
}

/// Vote state of one review label.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LabelInfo {
    /// Every vote cast on the label, in the order the server reports them.
    #[serde(default)]
    pub all: Vec<Vote>,
}

/// A single reviewer's vote on a label. Values are bounded by the label's
/// configured range, conventionally -2..=2.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct Vote {
    #[serde(rename = "_account_id", default)]
    pub account_id: u64,
    #[serde(default)]
    pub value: i32,
}

impl Change {
    fn votes(&self, label: &str) -> impl Iterator<Item = &Vote> {
        self.labels.get(label).into_iter().flat_map(|l| l.all.iter())
    }

    /// Highest vote cast on `label`; 0 when no votes exist.
    pub fn label_max(&self, label: &str) -> i32 {
        self.votes(label).map(|v| v.value).fold(0, i32::max)
    }

    /// Lowest vote cast on `label`; 0 when no votes exist.
    pub fn label_min(&self, label: &str) -> i32 {
        self.votes(label).map(|v| v.value).fold(0, i32::min)
    }

    /// Number of votes on `label` exactly equal to `value`.
    pub fn label_count(&self, label: &str, value: i32) -> usize {
        self.votes(label).filter(|v| v.value == value).count()
    }
}
