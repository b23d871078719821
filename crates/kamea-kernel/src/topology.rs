//! Family topology: structural types, roles, and lineage ownership.
//!
//! The nine families fall into four structural types, fixed by family
//! index (asserted by the source material, never derived at runtime):
//!
//! - `{0}` **Immutable** — self-paired under both mutation and conrune.
//! - `{4, 8}` **PureConrunePair** — mutation-fixed, conrune images of
//!   each other.
//! - `{5, 7}` **ComplementaryEntangledPair** — swapped by both mutation
//!   and conrune.
//! - `{1, 2, 3, 6}` **BigrammicQuadset** — a four-family orbit: conrune
//!   links 1↔2 and 3↔6, mutation links 1↔3 and 2↔6.
//!
//! Within each 9×9 family table the Prime's column is the lineage
//! column: the Prime plus its eight Acolytes. Every other cell is a
//! Temple, anchored by row to the lineage column. Temples of entangled
//! and quadset families are co-owned across families; co-ownership is a
//! small owner list on one canonical record, not a copy of the Temple
//! into several tables.

use crate::conrune::conrune;
use crate::error::KameaError;
use crate::family::{FAMILY_COUNT, FamilyId, FamilyPartition, member_column, member_row};
use crate::mutation::ChainRole;
use crate::ternary::{DITRUNE_SPACE, Ditrune};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The four quadset family indices, in region-grid order.
const QUADSET_FAMILIES: [u8; 4] = [1, 2, 3, 6];

/// Structural classification of a family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FamilyType {
    Immutable,
    PureConrunePair,
    ComplementaryEntangledPair,
    BigrammicQuadset,
}

impl FamilyType {
    /// Fixed classification by family index.
    pub fn of(family: FamilyId) -> Self {
        match family.index() {
            0 => Self::Immutable,
            4 | 8 => Self::PureConrunePair,
            5 | 7 => Self::ComplementaryEntangledPair,
            _ => Self::BigrammicQuadset,
        }
    }

    /// How many owner references a Temple of this family type carries.
    pub fn temple_owner_count(self) -> usize {
        match self {
            Self::Immutable | Self::PureConrunePair => 1,
            Self::ComplementaryEntangledPair => 2,
            Self::BigrammicQuadset => 4,
        }
    }
}

impl fmt::Display for FamilyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Immutable => "immutable",
            Self::PureConrunePair => "pure_conrune_pair",
            Self::ComplementaryEntangledPair => "complementary_entangled_pair",
            Self::BigrammicQuadset => "bigrammic_quadset",
        };
        write!(f, "{label}")
    }
}

/// Structural role of a member within its family table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Prime,
    Acolyte,
    Temple,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Prime => "prime",
            Self::Acolyte => "acolyte",
            Self::Temple => "temple",
        };
        write!(f, "{label}")
    }
}

/// Role and lineage links for a single ditrune.
#[derive(Debug, Clone, Serialize)]
pub struct RoleAssignment {
    pub family: FamilyId,
    pub role: Role,
    /// Lineage owners: empty for a Prime, the family's Prime for an
    /// Acolyte, and the row anchors for a Temple (1, 2 or 4 entries by
    /// family type).
    pub owners: Vec<Ditrune>,
}

/// Role and lineage annotation over a built family partition.
///
/// Does not copy family membership; it layers per-ditrune assignments
/// on top of the partition it was built from.
#[derive(Debug, Clone)]
pub struct FamilyTopology {
    partition: FamilyPartition,
    assignments: Vec<RoleAssignment>,
}

impl FamilyTopology {
    /// Assign roles and owners over a partition, self-checking the
    /// lineage layout as it goes.
    pub fn build(partition: FamilyPartition) -> Result<Self, KameaError> {
        let lineage = lineage_columns(&partition)?;

        let mut assignments: Vec<Option<RoleAssignment>> = Vec::with_capacity(DITRUNE_SPACE);
        assignments.resize_with(DITRUNE_SPACE, || None);

        for family in partition.families() {
            let family_type = FamilyType::of(family.id());
            let prime = family.prime();
            let prime_column = member_column(family.id(), prime);
            let mut role_counts = [0usize; 3];

            for member in family.members() {
                let d = member.ditrune;
                let role = if d == prime {
                    Role::Prime
                } else if member_column(family.id(), d) == prime_column {
                    Role::Acolyte
                } else {
                    Role::Temple
                };
                if role_disagrees_with_chain(role, member.chain_role) {
                    return Err(KameaError::family_invariant(format!(
                        "member {d} has structural role {role} but chain role {}",
                        member.chain_role
                    )));
                }
                role_counts[role as usize] += 1;

                let owners = match role {
                    Role::Prime => Vec::new(),
                    Role::Acolyte => vec![prime],
                    Role::Temple => {
                        temple_owners(family.id(), family_type, member_row(family.id(), d), &lineage)
                    }
                };
                assignments[usize::from(d.value())] = Some(RoleAssignment {
                    family: family.id(),
                    role,
                    owners,
                });
            }

            if role_counts != [1, 8, 72] {
                return Err(KameaError::family_invariant(format!(
                    "family {} has role counts {role_counts:?}, expected [1, 8, 72]",
                    family.id()
                )));
            }
        }

        let assignments = assignments
            .into_iter()
            .enumerate()
            .map(|(value, assignment)| {
                assignment.ok_or_else(|| {
                    KameaError::family_invariant(format!(
                        "ditrune {} received no role assignment",
                        Ditrune::from_value_unchecked(value as u16)
                    ))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            partition,
            assignments,
        })
    }

    pub fn assignment(&self, d: Ditrune) -> &RoleAssignment {
        &self.assignments[usize::from(d.value())]
    }

    pub fn role_of(&self, d: Ditrune) -> Role {
        self.assignment(d).role
    }

    pub fn partition(&self) -> &FamilyPartition {
        &self.partition
    }
}

/// The lineage column of every family: one member per row, sitting in
/// the Prime's column.
fn lineage_columns(
    partition: &FamilyPartition,
) -> Result<[[Ditrune; FAMILY_COUNT]; FAMILY_COUNT], KameaError> {
    let mut columns = [[None::<Ditrune>; FAMILY_COUNT]; FAMILY_COUNT];

    for family in partition.families() {
        let family_index = usize::from(family.id().index());
        let prime_column = member_column(family.id(), family.prime());
        for member in family.members() {
            if member_column(family.id(), member.ditrune) != prime_column {
                continue;
            }
            let row = usize::from(member_row(family.id(), member.ditrune));
            if columns[family_index][row].replace(member.ditrune).is_some() {
                return Err(KameaError::family_invariant(format!(
                    "family {} has two lineage members in row {row}",
                    family.id()
                )));
            }
        }
    }

    let mut resolved = [[Ditrune::from_value_unchecked(0); FAMILY_COUNT]; FAMILY_COUNT];
    for (family_index, column) in columns.iter().enumerate() {
        for (row, cell) in column.iter().enumerate() {
            resolved[family_index][row] = cell.ok_or_else(|| {
                KameaError::family_invariant(format!(
                    "family {family_index} has no lineage member in row {row}"
                ))
            })?;
        }
    }
    Ok(resolved)
}

/// Owners of a Temple in the given row.
///
/// Immutable and pure families anchor to their own lineage column. An
/// entangled family adds the conrune image of its anchor, which is the
/// paired Acolyte in the partner family. A quadset family anchors to
/// the same row of all four quadset lineage columns.
fn temple_owners(
    family: FamilyId,
    family_type: FamilyType,
    row: u8,
    lineage: &[[Ditrune; FAMILY_COUNT]; FAMILY_COUNT],
) -> Vec<Ditrune> {
    let own = lineage[usize::from(family.index())][usize::from(row)];
    match family_type {
        FamilyType::Immutable | FamilyType::PureConrunePair => vec![own],
        FamilyType::ComplementaryEntangledPair => vec![own, conrune(own)],
        FamilyType::BigrammicQuadset => QUADSET_FAMILIES
            .iter()
            .map(|&g| lineage[usize::from(g)][usize::from(row)])
            .collect(),
    }
}

fn role_disagrees_with_chain(role: Role, chain_role: ChainRole) -> bool {
    !matches!(
        (role, chain_role),
        (Role::Prime, ChainRole::Prime)
            | (Role::Acolyte, ChainRole::Composite)
            | (Role::Temple, ChainRole::Concurrent)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::family::FAMILY_SIZE;

    fn topology() -> FamilyTopology {
        FamilyTopology::build(FamilyPartition::build().unwrap()).unwrap()
    }

    fn d(s: &str) -> Ditrune {
        s.parse().unwrap()
    }

    #[test]
    fn family_type_table() {
        let types: Vec<FamilyType> = FamilyId::all().map(FamilyType::of).collect();
        use FamilyType::*;
        assert_eq!(
            types,
            [
                Immutable,
                BigrammicQuadset,
                BigrammicQuadset,
                BigrammicQuadset,
                PureConrunePair,
                ComplementaryEntangledPair,
                BigrammicQuadset,
                ComplementaryEntangledPair,
                PureConrunePair
            ]
        );
    }

    #[test]
    fn primes_have_no_owners() {
        let topology = topology();
        for family in topology.partition().families() {
            let assignment = topology.assignment(family.prime());
            assert_eq!(assignment.role, Role::Prime);
            assert!(assignment.owners.is_empty());
        }
    }

    #[test]
    fn acolytes_are_owned_by_their_prime() {
        let topology = topology();
        for family in topology.partition().families() {
            for member in family.members() {
                let assignment = topology.assignment(member.ditrune);
                if assignment.role == Role::Acolyte {
                    assert_eq!(assignment.owners, [family.prime()]);
                }
            }
        }
    }

    #[test]
    fn temple_owner_counts_match_family_type() {
        let topology = topology();
        for family in topology.partition().families() {
            let expected = FamilyType::of(family.id()).temple_owner_count();
            for member in family.members() {
                let assignment = topology.assignment(member.ditrune);
                if assignment.role == Role::Temple {
                    assert_eq!(assignment.owners.len(), expected);
                }
            }
        }
    }

    #[test]
    fn entangled_temple_owners_are_conrune_paired() {
        let topology = topology();
        // 022101 sits in family 7, the entangled partner of family 5.
        let assignment = topology.assignment(d("022101"));
        assert_eq!(assignment.family.index(), 7);
        assert_eq!(assignment.role, Role::Temple);
        let [own, paired] = assignment.owners[..] else {
            panic!("entangled temple must have two owners");
        };
        assert_eq!(conrune(own), paired);
        assert_eq!(topology.partition().family_of(own).index(), 7);
        assert_eq!(topology.partition().family_of(paired).index(), 5);
    }

    #[test]
    fn quadset_temple_owners_span_the_cohort() {
        let topology = topology();
        for family in topology.partition().families() {
            if FamilyType::of(family.id()) != FamilyType::BigrammicQuadset {
                continue;
            }
            for member in family.members() {
                let assignment = topology.assignment(member.ditrune);
                if assignment.role != Role::Temple {
                    continue;
                }
                let owner_families: Vec<u8> = assignment
                    .owners
                    .iter()
                    .map(|&o| topology.partition().family_of(o).index())
                    .collect();
                assert_eq!(owner_families, QUADSET_FAMILIES);
                // Anchoring is by row, replicated across columns; each
                // owner's row is read within its own family table.
                let row = member_row(family.id(), member.ditrune);
                for &owner in &assignment.owners {
                    let owner_family = topology.partition().family_of(owner);
                    assert_eq!(member_row(owner_family, owner), row);
                }
            }
        }
    }

    #[test]
    fn immutable_temples_anchor_to_their_row() {
        let topology = topology();
        let family = &topology.partition().families()[0];
        for member in family.members() {
            let assignment = topology.assignment(member.ditrune);
            if assignment.role == Role::Temple {
                let [owner] = assignment.owners[..] else {
                    panic!("immutable temple must have one owner");
                };
                assert_eq!(
                    member_row(family.id(), owner),
                    member_row(family.id(), member.ditrune)
                );
                assert_eq!(
                    member_column(family.id(), owner),
                    member_column(family.id(), family.prime())
                );
            }
        }
    }

    #[test]
    fn role_counts_per_family() {
        let topology = topology();
        for family in topology.partition().families() {
            let mut counts = [0usize; 3];
            for member in family.members() {
                counts[topology.role_of(member.ditrune) as usize] += 1;
            }
            assert_eq!(counts, [1, 8, 72]);
            assert_eq!(counts.iter().sum::<usize>(), FAMILY_SIZE);
        }
    }
}
