//! Family resolution: the 729 → 9×81 partition.
//!
//! Every ditrune's mutation chain settles into a terminal cycle; the
//! first cycle member reached is the chain's prime, and ditrunes sharing
//! a prime form a family. [`FamilyPartition::build`] resolves the whole
//! space, groups it, and self-checks the partition shape before handing
//! anything out: exactly 9 families of exactly 81 members covering all
//! 729 values. A failed check is a defect in the build, not a user
//! error, and the partition is not published.
//!
//! Family ids follow the fixed 3×3 region-grid convention: ascending
//! numeric order of the nine primes, which is also the [`REGION_GRID`]
//! slot of each prime's repeating digit pair.

use crate::error::KameaError;
use crate::mutation::{ChainRole, MutationChain};
use crate::ternary::{DITRUNE_SPACE, Ditrune};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Number of families in the partition.
pub const FAMILY_COUNT: usize = 9;

/// Number of members in every family.
pub const FAMILY_SIZE: usize = 81;

/// Index of a family in the fixed 3×3 region grid, 0..=8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FamilyId(u8);

impl FamilyId {
    /// Wrap a region-grid index, rejecting values outside 0..=8.
    pub fn new(index: u8) -> Result<Self, KameaError> {
        if usize::from(index) >= FAMILY_COUNT {
            return Err(KameaError::LocatorOutOfRange {
                component: "family",
                value: index,
            });
        }
        Ok(Self(index))
    }

    pub fn index(self) -> u8 {
        self.0
    }

    /// All nine family ids in region-grid order.
    pub fn all() -> impl Iterator<Item = FamilyId> {
        (0..FAMILY_COUNT as u8).map(FamilyId)
    }

    pub(crate) fn from_grid_index(index: u8) -> Self {
        Self(index)
    }
}

impl fmt::Display for FamilyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for FamilyId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.0)
    }
}

impl<'de> Deserialize<'de> for FamilyId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let index = u8::deserialize(deserializer)?;
        FamilyId::new(index).map_err(D::Error::custom)
    }
}

/// The fixed 3×3 region-grid slot table: an ordered digit pair picks a
/// slot. Hardcoded, never derived from the mutation arithmetic.
pub const REGION_GRID: [[u8; 3]; 3] = [[0, 1, 2], [3, 4, 5], [6, 7, 8]];

/// The family's repeating digit pair: the center pair of its prime.
fn family_pair(family: FamilyId) -> (u8, u8) {
    (family.index() / 3, family.index() % 3)
}

/// Whether a member spells the family pair mirrored. Every member
/// carries the pair in one of the two orientations: chains that touch
/// the terminal cycle on its far side enter the family with the center
/// digits swapped.
fn mirrored(family: FamilyId, d: Ditrune) -> bool {
    let g = d.digits();
    (g[2], g[3]) != family_pair(family)
}

/// Column of a member in its family's 9×9 table: digits 1 and 4 pick a
/// [`REGION_GRID`] slot, read mirrored for members that carry the
/// mirrored center pair. The mirrored reading is what seats a family's
/// eight acolytes in its prime's column.
pub fn member_column(family: FamilyId, d: Ditrune) -> u8 {
    let g = d.digits();
    if mirrored(family, d) {
        REGION_GRID[usize::from(g[4])][usize::from(g[1])]
    } else {
        REGION_GRID[usize::from(g[1])][usize::from(g[4])]
    }
}

/// Row of a member in its family's 9×9 table: digits 0 and 5, read the
/// same way as [`member_column`].
pub fn member_row(family: FamilyId, d: Ditrune) -> u8 {
    let g = d.digits();
    if mirrored(family, d) {
        REGION_GRID[usize::from(g[5])][usize::from(g[0])]
    } else {
        REGION_GRID[usize::from(g[0])][usize::from(g[5])]
    }
}

/// One member of a family, tagged with its mutation-chain role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FamilyMember {
    pub ditrune: Ditrune,
    pub chain_role: ChainRole,
}

/// One of the nine 81-member equivalence classes.
#[derive(Debug, Clone)]
pub struct Family {
    id: FamilyId,
    prime: Ditrune,
    members: Vec<FamilyMember>,
}

impl Family {
    pub fn id(&self) -> FamilyId {
        self.id
    }

    /// The family's prime: the one terminal-cycle member it contains.
    pub fn prime(&self) -> Ditrune {
        self.prime
    }

    /// Members in ascending ditrune order.
    pub fn members(&self) -> &[FamilyMember] {
        &self.members
    }

    pub fn contains(&self, d: Ditrune) -> bool {
        self.members.binary_search_by_key(&d, |m| m.ditrune).is_ok()
    }
}

/// The full 729 → 9×81 partition, built once and then read-only.
#[derive(Debug, Clone)]
pub struct FamilyPartition {
    families: Vec<Family>,
    assignment: Vec<FamilyId>,
    chain_roles: Vec<ChainRole>,
}

impl FamilyPartition {
    /// Resolve every ditrune, group by prime, and self-check the
    /// partition shape.
    pub fn build() -> Result<Self, KameaError> {
        let mut groups: BTreeMap<Ditrune, Vec<FamilyMember>> = BTreeMap::new();
        for d in Ditrune::all() {
            let chain = MutationChain::resolve(d);
            groups.entry(chain.prime()).or_default().push(FamilyMember {
                ditrune: d,
                chain_role: chain.start_role(),
            });
        }

        if groups.len() != FAMILY_COUNT {
            return Err(KameaError::family_invariant(format!(
                "expected {FAMILY_COUNT} prime groups over the {DITRUNE_SPACE}-element space, found {}",
                groups.len()
            )));
        }

        let mut families = Vec::with_capacity(FAMILY_COUNT);
        let mut assignment = vec![FamilyId::from_grid_index(0); DITRUNE_SPACE];
        let mut chain_roles = vec![ChainRole::Concurrent; DITRUNE_SPACE];
        // BTreeMap iteration order is ascending prime value, which is the
        // canonical family ordering.
        for (grid_index, (prime, members)) in groups.into_iter().enumerate() {
            if members.len() != FAMILY_SIZE {
                return Err(KameaError::family_invariant(format!(
                    "family of prime {prime} has {} members, expected {FAMILY_SIZE}",
                    members.len()
                )));
            }
            let cycle_members: Vec<Ditrune> = members
                .iter()
                .filter(|m| m.chain_role == ChainRole::Prime)
                .map(|m| m.ditrune)
                .collect();
            if cycle_members != [prime] {
                return Err(KameaError::family_invariant(format!(
                    "family of prime {prime} contains cycle members {cycle_members:?}, expected exactly its own prime"
                )));
            }

            let id = FamilyId::from_grid_index(grid_index as u8);
            for member in &members {
                assignment[usize::from(member.ditrune.value())] = id;
                chain_roles[usize::from(member.ditrune.value())] = member.chain_role;
            }
            families.push(Family { id, prime, members });
        }

        Ok(Self {
            families,
            assignment,
            chain_roles,
        })
    }

    /// The family a ditrune belongs to.
    pub fn family_of(&self, d: Ditrune) -> FamilyId {
        self.assignment[usize::from(d.value())]
    }

    pub fn family(&self, id: FamilyId) -> &Family {
        &self.families[usize::from(id.index())]
    }

    /// All nine families in region-grid order.
    pub fn families(&self) -> &[Family] {
        &self.families
    }

    /// The chain-role tag recorded for a member at build time.
    pub fn chain_role_of(&self, d: Ditrune) -> ChainRole {
        self.chain_roles[usize::from(d.value())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Ditrune {
        s.parse().unwrap()
    }

    #[test]
    fn build_succeeds_and_partitions_the_space() {
        let partition = FamilyPartition::build().unwrap();
        assert_eq!(partition.families().len(), FAMILY_COUNT);
        for family in partition.families() {
            assert_eq!(family.members().len(), FAMILY_SIZE);
        }
    }

    #[test]
    fn primes_in_region_grid_order() {
        let partition = FamilyPartition::build().unwrap();
        let primes: Vec<String> = partition
            .families()
            .iter()
            .map(|f| f.prime().to_string())
            .collect();
        assert_eq!(
            primes,
            [
                "000000", "010101", "020202", "101010", "111111", "121212", "202020", "212121",
                "222222"
            ]
        );
    }

    #[test]
    fn members_carry_the_family_pair_or_its_mirror() {
        let partition = FamilyPartition::build().unwrap();
        for value in Ditrune::all() {
            let family = partition.family_of(value);
            let (a, b) = family_pair(family);
            let g = value.digits();
            assert!(
                (g[2], g[3]) == (a, b) || (g[2], g[3]) == (b, a),
                "{value} carries center pair ({}, {}) in family {family}",
                g[2],
                g[3]
            );
        }
    }

    #[test]
    fn each_family_contains_its_prime() {
        let partition = FamilyPartition::build().unwrap();
        for family in partition.families() {
            assert!(family.contains(family.prime()));
            assert_eq!(partition.family_of(family.prime()), family.id());
        }
    }

    #[test]
    fn chain_role_counts_per_family() {
        let partition = FamilyPartition::build().unwrap();
        for family in partition.families() {
            let mut primes = 0;
            let mut composites = 0;
            let mut concurrents = 0;
            for member in family.members() {
                match member.chain_role {
                    ChainRole::Prime => primes += 1,
                    ChainRole::Composite => composites += 1,
                    ChainRole::Concurrent => concurrents += 1,
                }
            }
            assert_eq!((primes, composites, concurrents), (1, 8, 72));
        }
    }

    #[test]
    fn two_cycle_primes_live_in_sibling_families() {
        let partition = FamilyPartition::build().unwrap();
        assert_eq!(partition.family_of(d("121212")).index(), 5);
        assert_eq!(partition.family_of(d("212121")).index(), 7);
        assert_eq!(partition.chain_role_of(d("121212")), ChainRole::Prime);
        assert_eq!(partition.chain_role_of(d("212121")), ChainRole::Prime);
    }

    #[test]
    fn coordinates_pair_the_outer_digits() {
        let partition = FamilyPartition::build().unwrap();
        // 022101 carries family 7's own center pair, so digits 1 and 4
        // read straight into the column and 0 and 5 into the row.
        let value = d("022101");
        let family = partition.family_of(value);
        assert_eq!(family.index(), 7);
        assert_eq!(member_column(family, value), 6);
        assert_eq!(member_row(family, value), 1);
    }

    #[test]
    fn mirrored_members_read_their_pairs_mirrored() {
        let partition = FamilyPartition::build().unwrap();
        // 221210 reaches 212121 in one step, so it sits in family 7 with
        // the mirrored center pair; 222110 shares the family but carries
        // the family's own pair. The two readings keep their cells apart.
        let mirrored_member = d("221210");
        let straight_member = d("222110");
        let family = partition.family_of(mirrored_member);
        assert_eq!(family.index(), 7);
        assert_eq!(partition.family_of(straight_member), family);
        assert_eq!(partition.chain_role_of(mirrored_member), ChainRole::Composite);
        assert_eq!(member_column(family, mirrored_member), 5);
        assert_eq!(member_row(family, mirrored_member), 2);
        assert_eq!(member_column(family, straight_member), 7);
        assert_eq!(member_row(family, straight_member), 6);
        // The mirrored reading lands on the prime's column.
        assert_eq!(
            member_column(family, mirrored_member),
            member_column(family, partition.family(family).prime())
        );
    }

    #[test]
    fn family_id_rejects_out_of_range() {
        assert!(FamilyId::new(8).is_ok());
        match FamilyId::new(9) {
            Err(KameaError::LocatorOutOfRange { component, value }) => {
                assert_eq!(component, "family");
                assert_eq!(value, 9);
            }
            other => panic!("expected range error, got {other:?}"),
        }
    }
}
