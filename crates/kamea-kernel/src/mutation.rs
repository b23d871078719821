//! Nuclear mutation and chain resolution.
//!
//! Nuclear mutation rebuilds a ditrune from its two overlapping inner
//! triunes: the upper triune at digit positions (1,2,3) and the lower
//! triune at positions (2,3,4), concatenated:
//!
//! ```text
//! mutate(d0 d1 d2 d3 d4 d5) = d1 d2 d3 d2 d3 d4
//! ```
//!
//! The overlap is intentional: it is what collapses the 729-element
//! space into 9 families of 81 members rather than 243.
//!
//! Iterating mutation always settles into a fixed point or a 2-cycle.
//! [`MutationChain::resolve`] runs the iteration with an explicit
//! visited list, so termination follows from the finite domain rather
//! than from trust in the arithmetic.

use crate::ternary::{DITRUNE_SPACE, Ditrune, Triune};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Pigeonhole bound on chain length; observed chains are far shorter.
pub const MUTATION_BOUND: usize = DITRUNE_SPACE;

/// One application of nuclear mutation. Total over the space.
pub fn mutate(d: Ditrune) -> Ditrune {
    let (upper, lower) = inner_triunes(d);
    Ditrune::from_triunes(upper, lower)
}

/// The two overlapping inner triunes a mutation concatenates.
pub fn inner_triunes(d: Ditrune) -> (Triune, Triune) {
    let g = d.digits();
    let upper = Triune::from_valid_digits([g[1], g[2], g[3]]);
    let lower = Triune::from_valid_digits([g[2], g[3], g[4]]);
    (upper, lower)
}

/// Position of a value relative to the terminal cycle of its chain.
///
/// The role depends only on the value's distance to the cycle, so it is
/// the same whichever chain the value is observed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChainRole {
    /// Two or more mutations away from the terminal cycle.
    Concurrent,
    /// One mutation away from the terminal cycle.
    Composite,
    /// A member of the terminal cycle itself.
    Prime,
}

impl fmt::Display for ChainRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Concurrent => "concurrent",
            Self::Composite => "composite",
            Self::Prime => "prime",
        };
        write!(f, "{label}")
    }
}

/// The ordered values visited while iterating mutation from a start
/// value, ending where the terminal cycle closed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutationChain {
    steps: Vec<Ditrune>,
    cycle_start: usize,
}

impl MutationChain {
    /// Iterate mutation from `start` until a previously visited value
    /// recurs.
    ///
    /// A fixed point is a length-1 cycle; the only longer cycles in this
    /// space have length 2, between the two alternating patterns over a
    /// pair of distinct digits.
    pub fn resolve(start: Ditrune) -> Self {
        let mut steps: Vec<Ditrune> = Vec::new();
        let mut current = start;
        loop {
            if let Some(position) = steps.iter().position(|&seen| seen == current) {
                return Self {
                    steps,
                    cycle_start: position,
                };
            }
            // At most 729 distinct values can be appended before the
            // repeat test above must hit.
            debug_assert!(steps.len() < MUTATION_BOUND);
            steps.push(current);
            current = mutate(current);
        }
    }

    /// Every visited value, in visit order.
    pub fn steps(&self) -> &[Ditrune] {
        &self.steps
    }

    /// The value the chain started from.
    pub fn start(&self) -> Ditrune {
        self.steps[0]
    }

    /// The canonical prime of this chain: the first cycle member the
    /// chain reached.
    pub fn prime(&self) -> Ditrune {
        self.steps[self.cycle_start]
    }

    /// The terminal cycle, in visit order.
    pub fn cycle(&self) -> &[Ditrune] {
        &self.steps[self.cycle_start..]
    }

    /// Role of the visited value at `index`.
    pub fn role_at(&self, index: usize) -> ChainRole {
        match self.cycle_start.saturating_sub(index) {
            0 => ChainRole::Prime,
            1 => ChainRole::Composite,
            _ => ChainRole::Concurrent,
        }
    }

    /// Role of the start value within its own chain.
    pub fn start_role(&self) -> ChainRole {
        self.role_at(0)
    }

    /// Number of values visited before the chain closed.
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// Visited values paired with their chain roles.
    pub fn annotated_steps(&self) -> impl Iterator<Item = (Ditrune, ChainRole)> + '_ {
        self.steps
            .iter()
            .enumerate()
            .map(|(index, &d)| (d, self.role_at(index)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conrune::conrune;

    fn d(s: &str) -> Ditrune {
        s.parse().unwrap()
    }

    #[test]
    fn mutation_concatenates_inner_triunes() {
        assert_eq!(mutate(d("022101")), d("221210"));
        assert_eq!(mutate(d("221210")), d("212121"));
        assert_eq!(mutate(d("212121")), d("121212"));
        assert_eq!(mutate(d("121212")), d("212121"));
    }

    #[test]
    fn inner_triunes_overlap_on_center_digits() {
        let (upper, lower) = inner_triunes(d("022101"));
        assert_eq!(upper.to_string(), "221");
        assert_eq!(lower.to_string(), "210");
    }

    #[test]
    fn uniform_ditrunes_are_fixed_points() {
        for s in ["000000", "111111", "222222"] {
            let value = d(s);
            assert_eq!(mutate(value), value);
            let chain = MutationChain::resolve(value);
            assert_eq!(chain.step_count(), 1);
            assert_eq!(chain.prime(), value);
            assert_eq!(chain.start_role(), ChainRole::Prime);
        }
    }

    #[test]
    fn documented_two_cycle() {
        let chain = MutationChain::resolve(d("022101"));
        assert_eq!(
            chain.steps(),
            &[d("022101"), d("221210"), d("212121"), d("121212")]
        );
        assert_eq!(chain.prime(), d("212121"));
        assert_eq!(chain.cycle(), &[d("212121"), d("121212")]);
        assert_eq!(conrune(d("212121")), d("121212"));
    }

    #[test]
    fn two_cycle_members_are_both_prime_role() {
        let chain = MutationChain::resolve(d("121212"));
        assert_eq!(chain.step_count(), 2);
        assert_eq!(chain.prime(), d("121212"));
        assert_eq!(chain.role_at(0), ChainRole::Prime);
        assert_eq!(chain.role_at(1), ChainRole::Prime);
    }

    #[test]
    fn chain_roles_by_distance_to_cycle() {
        let chain = MutationChain::resolve(d("022101"));
        assert_eq!(chain.role_at(0), ChainRole::Concurrent);
        assert_eq!(chain.role_at(1), ChainRole::Composite);
        assert_eq!(chain.role_at(2), ChainRole::Prime);
        assert_eq!(chain.role_at(3), ChainRole::Prime);
    }

    #[test]
    fn every_chain_is_short_and_lands_in_a_small_cycle() {
        for start in Ditrune::all() {
            let chain = MutationChain::resolve(start);
            assert!(chain.step_count() <= 4, "chain from {start} has length {}", chain.step_count());
            let cycle = chain.cycle();
            assert!(cycle.len() == 1 || cycle.len() == 2);
            // The cycle really closes on its first member.
            assert_eq!(mutate(*cycle.last().unwrap()), chain.prime());
        }
    }
}
