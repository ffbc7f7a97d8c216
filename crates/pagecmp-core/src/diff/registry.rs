//! Session state of one comparison run.

use crate::diff::model::{DiffCandidate, DiffCategory, Difference, DifferenceId};
use std::collections::HashSet;
use std::hash::Hash;

/// What a registered difference claims so it cannot be reported twice.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum ClaimKey<H> {
    Node(H),
    /// Removals have no node; they are keyed by what was removed.
    Removal(DiffCategory, String),
}

/// Numbers differences and remembers what has been reported.
///
/// Owned by a single comparison session. [`DiffRegistry::reset`] must run
/// before each new comparison; within a run, registering the same target
/// (or the same removal) twice is a no-op.
#[derive(Debug, Clone)]
pub struct DiffRegistry<H> {
    counter: u64,
    claimed: HashSet<ClaimKey<H>>,
    differences: Vec<Difference<H>>,
}

impl<H> Default for DiffRegistry<H> {
    fn default() -> Self {
        Self {
            counter: 0,
            claimed: HashSet::new(),
            differences: Vec::new(),
        }
    }
}

impl<H> DiffRegistry<H>
where
    H: Copy + Eq + Hash + std::fmt::Debug,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign the next id to `candidate` and claim its target.
    ///
    /// Returns `None` without side effects when the target (or removal key)
    /// is already claimed.
    pub fn register(&mut self, candidate: DiffCandidate<H>) -> Option<DifferenceId> {
        let key = match candidate.target {
            Some(node) => ClaimKey::Node(node),
            None => ClaimKey::Removal(candidate.category, candidate.detail.clone()),
        };
        if !self.claimed.insert(key) {
            tracing::trace!(
                category = ?candidate.category,
                target = ?candidate.target,
                "difference already claimed"
            );
            return None;
        }

        self.counter += 1;
        let id = DifferenceId::new(self.counter);
        self.differences.push(Difference {
            id,
            category: candidate.category,
            visual_kind: candidate.category.visual_kind(),
            detail: candidate.detail,
            target: candidate.target,
        });
        Some(id)
    }

    pub fn is_claimed(&self, node: H) -> bool {
        self.claimed.contains(&ClaimKey::Node(node))
    }

    /// Clear the counter, all claims and all results.
    pub fn reset(&mut self) {
        self.counter = 0;
        self.claimed.clear();
        self.differences.clear();
    }

    pub fn count(&self) -> usize {
        self.differences.len()
    }

    /// Registered differences in registration order.
    pub fn differences(&self) -> &[Difference<H>] {
        &self.differences
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn heading(node: usize) -> DiffCandidate<usize> {
        DiffCandidate::new(DiffCategory::HeadingChange, "Text changed in <H1>", Some(node))
    }

    #[test]
    fn test_ids_are_sequential() {
        let mut registry = DiffRegistry::new();
        assert_eq!(registry.register(heading(4)), Some(DifferenceId::new(1)));
        assert_eq!(registry.register(heading(7)), Some(DifferenceId::new(2)));
        assert_eq!(registry.count(), 2);
        assert_eq!(
            registry.differences()[1].visual_kind,
            DiffCategory::HeadingChange.visual_kind()
        );
    }

    #[test]
    fn test_claimed_target_is_skipped() {
        let mut registry = DiffRegistry::new();
        registry.register(heading(4));
        let again = DiffCandidate::new(DiffCategory::NewLink, "URL: x", Some(4));
        assert_eq!(registry.register(again), None);
        assert_eq!(registry.count(), 1);
        assert!(registry.is_claimed(4));
        assert!(!registry.is_claimed(5));
    }

    #[test]
    fn test_removals_claimed_by_key() {
        let mut registry: DiffRegistry<usize> = DiffRegistry::new();
        let removal = || {
            DiffCandidate::new(DiffCategory::RemovedText, "Text removed: \"offer\"", None)
        };
        assert!(registry.register(removal()).is_some());
        assert!(registry.register(removal()).is_none());
        let other = DiffCandidate::new(DiffCategory::RemovedLink, "Text removed: \"offer\"", None);
        assert!(registry.register(other).is_some());
        assert_eq!(registry.count(), 2);
    }

    #[test]
    fn test_reset_restarts_numbering() {
        let mut registry = DiffRegistry::new();
        registry.register(heading(1));
        registry.register(heading(2));
        registry.reset();
        assert_eq!(registry.count(), 0);
        assert!(!registry.is_claimed(1));
        assert_eq!(registry.register(heading(1)), Some(DifferenceId::new(1)));
    }
}
