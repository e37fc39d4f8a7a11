//! Partially assigned tuples and the greedy absorb rule.
//!
//! A tuple has one slot per domain. A slot starts out [`Slot::Unset`] and,
//! once committed, keeps its value for the rest of the run. The generator
//! packs requirements into tuples with [`Tuple::absorb`] and fills whatever
//! is left with [`Tuple::finish`].

use crate::domain::{Requirement, Value};

/// State of one domain position inside a tuple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Unset,
    Committed(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tuple {
    slots: Vec<Slot>,
}

impl Tuple {
    /// An all-unset tuple covering `domain_count` domains.
    pub fn empty(domain_count: usize) -> Self {
        Self {
            slots: vec![Slot::Unset; domain_count],
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slot(&self, domain: usize) -> Option<Slot> {
        self.slots.get(domain).copied()
    }

    /// True if this tuple has committed `value.index` for `value.domain`.
    pub fn matches(&self, value: Value) -> bool {
        self.slot(value.domain) == Some(Slot::Committed(value.index))
    }

    pub fn satisfies_fully(&self, requirement: &Requirement) -> bool {
        self.matches(requirement.a()) && self.matches(requirement.b())
    }

    pub fn has_committed_value_for(&self, domain: usize) -> bool {
        matches!(self.slot(domain), Some(Slot::Committed(_)))
    }

    pub fn is_finished(&self) -> bool {
        self.slots.iter().all(|s| matches!(s, Slot::Committed(_)))
    }

    /// Try to make this tuple carry both values of `requirement`.
    ///
    /// Returns `false` without touching the tuple when it is already
    /// finished or has committed a different value in either domain.
    pub fn absorb(&mut self, requirement: &Requirement) -> bool {
        let (a, b) = (requirement.a(), requirement.b());
        if self.satisfies_fully(requirement) {
            return true;
        }
        if self.is_finished() {
            return false;
        }
        // Both values would land in one slot; committing b would overwrite a.
        if a.domain == b.domain {
            return false;
        }
        if self.conflicts_with(a) || self.conflicts_with(b) {
            return false;
        }
        self.commit(a);
        self.commit(b);
        true
    }

    /// Commit index 0 to every unset slot. Committed slots are left alone.
    pub fn finish(&mut self) {
        for slot in &mut self.slots {
            if *slot == Slot::Unset {
                *slot = Slot::Committed(0);
            }
        }
    }

    /// Snapshot of the committed indices, or `None` while any slot is unset.
    pub fn to_index_array(&self) -> Option<Vec<usize>> {
        self.slots
            .iter()
            .map(|slot| match slot {
                Slot::Committed(index) => Some(*index),
                Slot::Unset => None,
            })
            .collect()
    }

    fn conflicts_with(&self, value: Value) -> bool {
        match self.slot(value.domain) {
            Some(Slot::Committed(index)) => index != value.index,
            Some(Slot::Unset) => false,
            // Out-of-range domain: nothing to commit into.
            None => true,
        }
    }

    fn commit(&mut self, value: Value) {
        // Only called after conflicts_with, so the slot exists and is either
        // unset or already holds this value.
        if let Some(slot) = self.slots.get_mut(value.domain) {
            *slot = Slot::Committed(value.index);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn req(d1: usize, v1: usize, d2: usize, v2: usize) -> Requirement {
        Requirement::new(Value::new(d1, v1), Value::new(d2, v2)).unwrap()
    }

    #[test]
    fn test_empty_tuple_has_no_commitments() {
        let tuple = Tuple::empty(3);
        assert_eq!(tuple.len(), 3);
        assert!(!tuple.is_finished());
        assert!(!tuple.has_committed_value_for(0));
        assert!(!tuple.matches(Value::new(0, 0)));
        assert_eq!(tuple.to_index_array(), None);
    }

    #[test]
    fn test_absorb_into_empty_tuple_commits_both_values() {
        let mut tuple = Tuple::empty(3);
        assert!(tuple.absorb(&req(0, 1, 2, 4)));
        assert!(tuple.matches(Value::new(0, 1)));
        assert!(tuple.matches(Value::new(2, 4)));
        assert!(!tuple.has_committed_value_for(1));
        assert!(tuple.satisfies_fully(&req(0, 1, 2, 4)));
    }

    #[test]
    fn test_absorb_already_satisfied_is_noop() {
        let mut tuple = Tuple::empty(2);
        assert!(tuple.absorb(&req(0, 0, 1, 1)));
        let before = tuple.clone();
        assert!(tuple.absorb(&req(0, 0, 1, 1)));
        assert_eq!(tuple, before);
    }

    #[test]
    fn test_absorb_rejects_conflict_on_first_value() {
        let mut tuple = Tuple::empty(3);
        assert!(tuple.absorb(&req(0, 0, 1, 0)));
        assert!(!tuple.absorb(&req(0, 1, 2, 0)));
        // Rejected absorb leaves domain 2 untouched.
        assert!(!tuple.has_committed_value_for(2));
    }

    #[test]
    fn test_absorb_rejects_conflict_on_second_value() {
        let mut tuple = Tuple::empty(3);
        assert!(tuple.absorb(&req(0, 0, 1, 0)));
        assert!(!tuple.absorb(&req(2, 1, 1, 2)));
        assert!(!tuple.has_committed_value_for(2));
    }

    #[test]
    fn test_absorb_extends_with_shared_value() {
        let mut tuple = Tuple::empty(3);
        assert!(tuple.absorb(&req(0, 1, 1, 0)));
        assert!(tuple.absorb(&req(0, 1, 2, 2)));
        assert_eq!(tuple.to_index_array(), Some(vec![1, 0, 2]));
    }

    #[test]
    fn test_finished_tuple_refuses_new_requirements() {
        let mut tuple = Tuple::empty(2);
        assert!(tuple.absorb(&req(0, 0, 1, 0)));
        assert!(tuple.is_finished());
        assert!(!tuple.absorb(&req(0, 0, 1, 1)));
        // ...but still reports requirements it already satisfies.
        assert!(tuple.absorb(&req(0, 0, 1, 0)));
    }

    #[test]
    fn test_finish_fills_unset_with_zero_only() {
        let mut tuple = Tuple::empty(4);
        assert!(tuple.absorb(&req(1, 3, 3, 2)));
        tuple.finish();
        assert!(tuple.is_finished());
        assert_eq!(tuple.to_index_array(), Some(vec![0, 3, 0, 2]));

        tuple.finish();
        assert_eq!(tuple.to_index_array(), Some(vec![0, 3, 0, 2]));
    }

    #[test]
    fn test_out_of_range_domain_is_not_absorbed() {
        let mut tuple = Tuple::empty(2);
        assert!(!tuple.absorb(&req(0, 0, 5, 0)));
        assert!(!tuple.has_committed_value_for(0));
        assert_eq!(tuple.slot(5), None);
    }

    #[test]
    fn test_same_domain_requirement_never_absorbed() {
        assert!(Requirement::new(Value::new(0, 0), Value::new(0, 1)).is_err());

        let same = Requirement::new_unchecked(Value::new(0, 0), Value::new(0, 1));
        let mut tuple = Tuple::empty(2);
        assert!(!tuple.absorb(&same));
        assert!(!tuple.has_committed_value_for(0));

        assert!(tuple.absorb(&req(0, 0, 1, 1)));
        assert!(!tuple.absorb(&same));
        assert_eq!(tuple.slot(0), Some(Slot::Committed(0)));
    }
}
