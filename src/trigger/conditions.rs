//! Label-state gates for CI jobs.
//!
//! Conditions form a small closed set so the dispatcher can stay
//! table-driven: an event kind maps to a job plus one of these, and the
//! pairing is testable without any global state.

use crate::types::Change;

/// A named predicate over a change's label state.
///
/// Evaluation is pure and total; it never fails and never performs I/O.
/// Conditions are always evaluated against a freshly fetched change, never
/// a cached one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    /// At least one successful verification, more than one maximal code
    /// review, and no veto-level rejection.
    PremergeReady,
    /// No successful verification vote yet; the first verify build is
    /// still outstanding.
    VerifyNeeded,
    /// No gating. Used for explicit human requests, which bypass label
    /// state.
    Always,
}

impl Condition {
    pub fn is_satisfied(self, change: &Change) -> bool {
        match self {
            Condition::PremergeReady => {
                change.label_max("Verified") == 1
                    && change.label_count("Code-Review", 2) > 1
                    && change.label_min("Code-Review") > -2
            }
            Condition::VerifyNeeded => change.label_max("Verified") == 0,
            Condition::Always => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    use crate::types::{LabelInfo, Vote};

    fn change(labels: &[(&str, &[i32])]) -> Change {
        let mut map = BTreeMap::new();
        for (name, values) in labels {
            let all = values
                .iter()
                .enumerate()
                .map(|(i, &value)| Vote {
                    account_id: i as u64 + 1,
                    value,
                })
                .collect();
            map.insert(name.to_string(), LabelInfo { all });
        }
        Change {
            labels: map,
            ..Change::default()
        }
    }

    #[test]
    fn premerge_ready_when_all_clauses_hold() {
        let c = change(&[("Verified", &[1]), ("Code-Review", &[2, 2])]);
        assert!(Condition::PremergeReady.is_satisfied(&c));
    }

    #[test]
    fn premerge_requires_a_successful_verification() {
        let c = change(&[("Code-Review", &[2, 2])]);
        assert!(!Condition::PremergeReady.is_satisfied(&c));
    }

    #[test]
    fn premerge_requires_more_than_one_maximal_review() {
        let c = change(&[("Verified", &[1]), ("Code-Review", &[2, 1])]);
        assert!(!Condition::PremergeReady.is_satisfied(&c));
    }

    #[test]
    fn premerge_is_blocked_by_a_veto() {
        let c = change(&[("Verified", &[1]), ("Code-Review", &[2, 2, -2])]);
        assert!(!Condition::PremergeReady.is_satisfied(&c));
    }

    #[test]
    fn a_minus_one_review_does_not_block_premerge() {
        let c = change(&[("Verified", &[1]), ("Code-Review", &[2, 2, -1])]);
        assert!(Condition::PremergeReady.is_satisfied(&c));
    }

    #[test]
    fn verify_needed_only_without_a_successful_verification() {
        assert!(Condition::VerifyNeeded.is_satisfied(&change(&[])));
        assert!(Condition::VerifyNeeded.is_satisfied(&change(&[("Verified", &[-1])])));
        assert!(!Condition::VerifyNeeded.is_satisfied(&change(&[("Verified", &[1])])));
        assert!(!Condition::VerifyNeeded.is_satisfied(&change(&[("Verified", &[1, -1])])));
    }

    #[test]
    fn always_ignores_label_state() {
        assert!(Condition::Always.is_satisfied(&change(&[])));
        assert!(Condition::Always.is_satisfied(&change(&[("Code-Review", &[-2])])));
    }
}
