//! Derives which references are newly introduced relative to a prior
//! message revision.

use super::extract::IssueReference;

/// Set subtraction: references in `current` that are not in `previous`.
///
/// Equality is structural. Duplicates within `current` collapse to a
/// single entry; first-occurrence order is kept so notification order is
/// deterministic.
pub fn new_references(
    current: &[IssueReference],
    previous: &[IssueReference],
) -> Vec<IssueReference> {
    let mut fresh: Vec<IssueReference> = Vec::new();
    for reference in current {
        if previous.contains(reference) || fresh.contains(reference) {
            continue;
        }
        fresh.push(reference.clone());
    }
    fresh
}

#[cfg(test)]
mod tests {
    use super::*;

    fn a() -> IssueReference {
        IssueReference::local("1")
    }

    fn b() -> IssueReference {
        IssueReference::in_repo("acme/widgets", "2")
    }

    #[test]
    fn subtracts_known_references() {
        assert_eq!(new_references(&[a(), b()], &[a()]), vec![b()]);
    }

    #[test]
    fn unchanged_set_yields_nothing() {
        assert_eq!(new_references(&[a()], &[a()]), vec![]);
        assert_eq!(new_references(&[], &[]), vec![]);
    }

    #[test]
    fn empty_baseline_passes_everything_through() {
        assert_eq!(new_references(&[a(), b()], &[]), vec![a(), b()]);
    }

    #[test]
    fn duplicates_collapse() {
        assert_eq!(new_references(&[a(), a(), b(), a()], &[]), vec![a(), b()]);
    }

    #[test]
    fn equality_is_structural_including_repo() {
        // Same number, different repo: both are new.
        let local = IssueReference::local("7");
        let qualified = IssueReference::in_repo("acme/widgets", "7");
        assert_eq!(
            new_references(&[local.clone(), qualified.clone()], &[]),
            vec![local, qualified]
        );
    }
}
