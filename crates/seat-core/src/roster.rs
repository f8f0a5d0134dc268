//! Random roster assignment onto student desks.
//!
//! The only source of non-determinism in the crate lives behind [`Shuffle`],
//! so callers can swap the uniform shuffle for a fixed permutation.

use crate::id::DeskId;
use crate::model::Desk;
use rand::RngCore;
use rand::seq::SliceRandom;
use std::collections::HashMap;

/// Permutes a roster in place before it is paired with desks.
pub trait Shuffle {
    fn shuffle(&mut self, names: &mut [String]);
}

/// Uniform shuffle from the thread-local RNG. No seed control.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomShuffle;

impl Shuffle for RandomShuffle {
    fn shuffle(&mut self, names: &mut [String]) {
        names.shuffle(&mut rand::thread_rng());
    }
}

/// Uniform shuffle driven by a caller-supplied RNG (e.g. a seeded `StdRng`).
#[derive(Debug, Clone)]
pub struct RngShuffle<R>(pub R);

impl<R: RngCore> Shuffle for RngShuffle<R> {
    fn shuffle(&mut self, names: &mut [String]) {
        names.shuffle(&mut self.0);
    }
}

/// Pairs shuffled names with student desks.
pub struct RosterAssigner {
    shuffle: Box<dyn Shuffle>,
}

impl Default for RosterAssigner {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RosterAssigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RosterAssigner").finish_non_exhaustive()
    }
}

impl RosterAssigner {
    pub fn new() -> Self {
        Self::with_shuffle(RandomShuffle)
    }

    pub fn with_shuffle(shuffle: impl Shuffle + 'static) -> Self {
        Self {
            shuffle: Box::new(shuffle),
        }
    }

    /// Map student desks (in collection order) to shuffled names by index.
    /// Whichever side is shorter wins: extra names are dropped, extra desks
    /// get no entry. Teacher desks never appear in the result.
    pub fn assign(&mut self, desks: &[Desk], names: &[String]) -> HashMap<DeskId, String> {
        let mut shuffled = names.to_vec();
        self.shuffle.shuffle(&mut shuffled);

        desks
            .iter()
            .filter(|d| d.is_student())
            .zip(shuffled)
            .map(|(desk, name)| (desk.id, name))
            .collect()
    }
}

/// Overwrite every student desk's assignment from `mapping`. Student desks
/// missing from the mapping are cleared, not left at their old value.
pub fn apply_assignment(desks: &mut [Desk], mapping: &HashMap<DeskId, String>) {
    for desk in desks.iter_mut().filter(|d| d.is_student()) {
        desk.assigned_student = mapping.get(&desk.id).cloned();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DeskKind, Position};
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    struct Reverse;

    impl Shuffle for Reverse {
        fn shuffle(&mut self, names: &mut [String]) {
            names.reverse();
        }
    }

    fn desk(name: &str, kind: DeskKind) -> Desk {
        Desk::new(DeskId::intern(name), kind, Position::ORIGIN)
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn pairs_by_index_after_shuffle() {
        let desks = vec![
            desk("ra_t", DeskKind::Teacher),
            desk("ra_1", DeskKind::Student),
            desk("ra_2", DeskKind::Student),
        ];
        let mut assigner = RosterAssigner::with_shuffle(Reverse);
        let mapping = assigner.assign(&desks, &names(&["Al", "Bo"]));

        assert_eq!(mapping.len(), 2);
        assert_eq!(mapping[&DeskId::intern("ra_1")], "Bo");
        assert_eq!(mapping[&DeskId::intern("ra_2")], "Al");
        assert!(!mapping.contains_key(&DeskId::intern("ra_t")));
    }

    #[test]
    fn extra_names_are_dropped() {
        let desks = vec![desk("rx_1", DeskKind::Student)];
        let mapping = RosterAssigner::with_shuffle(Reverse).assign(&desks, &names(&["A", "B", "C"]));
        assert_eq!(mapping.len(), 1);
        assert_eq!(mapping[&DeskId::intern("rx_1")], "C");
    }

    #[test]
    fn seeded_shuffle_is_a_permutation() {
        let desks: Vec<Desk> = (0..5)
            .map(|i| desk(&format!("rs_{i}"), DeskKind::Student))
            .collect();
        let roster = names(&["A", "B", "C", "D", "E"]);
        let mut assigner = RosterAssigner::with_shuffle(RngShuffle(StdRng::seed_from_u64(42)));
        let mapping = assigner.assign(&desks, &roster);

        let mut assigned: Vec<String> = mapping.into_values().collect();
        assigned.sort();
        assert_eq!(assigned, roster);
    }

    #[test]
    fn apply_clears_uncovered_student_desks() {
        let mut desks = vec![desk("ap_1", DeskKind::Student), desk("ap_t", DeskKind::Teacher)];
        desks[0].assigned_student = Some("Stale".into());
        desks[1].assigned_student = Some("Keep".into());

        apply_assignment(&mut desks, &HashMap::new());

        assert_eq!(desks[0].assigned_student, None);
        assert_eq!(desks[1].assigned_student.as_deref(), Some("Keep"));
    }
}
