//! Kamea locators: the universal (family, column, row) address space.
//!
//! Every ditrune has exactly one cell in its family's 9×9 table, at the
//! fixed region-grid coordinates established by the resolver. The index
//! built here holds both directions of that correspondence and is the
//! public read surface of the kernel: build once, then share freely —
//! re-computation means constructing a new index, never mutating one.

use crate::error::KameaError;
use crate::family::{FamilyId, FamilyPartition, member_column, member_row};
use crate::mutation::{ChainRole, MutationChain};
use crate::ternary::{DITRUNE_SPACE, Ditrune};
use crate::topology::{FamilyTopology, FamilyType, Role};
use serde::Serialize;
use std::fmt;

/// Cells per table axis; also the number of rows and columns.
pub const TABLE_AXIS: usize = 9;

/// The (family, column, row) address of a ditrune.
///
/// Constructible only with all three components inside 0..=8, so a
/// held locator is always a valid address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct KameaLocator {
    family: FamilyId,
    column: u8,
    row: u8,
}

impl KameaLocator {
    /// Build a locator from raw components, validating each range.
    pub fn new(family: u8, column: u8, row: u8) -> Result<Self, KameaError> {
        let family = FamilyId::new(family)?;
        if usize::from(column) >= TABLE_AXIS {
            return Err(KameaError::LocatorOutOfRange {
                component: "column",
                value: column,
            });
        }
        if usize::from(row) >= TABLE_AXIS {
            return Err(KameaError::LocatorOutOfRange {
                component: "row",
                value: row,
            });
        }
        Ok(Self {
            family,
            column,
            row,
        })
    }

    /// Components already validated by the build.
    pub(crate) fn from_parts(family: FamilyId, column: u8, row: u8) -> Self {
        Self {
            family,
            column,
            row,
        }
    }

    pub fn family(self) -> FamilyId {
        self.family
    }

    pub fn column(self) -> u8 {
        self.column
    }

    pub fn row(self) -> u8 {
        self.row
    }

    fn slot(self) -> usize {
        usize::from(self.family.index()) * TABLE_AXIS * TABLE_AXIS
            + usize::from(self.column) * TABLE_AXIS
            + usize::from(self.row)
    }
}

impl fmt::Display for KameaLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.family, self.column, self.row)
    }
}

/// One step of a mutation chain, annotated with its chain role.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ChainStep {
    pub ditrune: Ditrune,
    pub role: ChainRole,
}

/// The full classification of one ditrune, as handed to collaborators.
#[derive(Debug, Clone, Serialize)]
pub struct Classification {
    pub ditrune: Ditrune,
    pub family: FamilyId,
    pub family_type: FamilyType,
    pub role: Role,
    pub chain_role: ChainRole,
    pub prime: Ditrune,
    pub locator: KameaLocator,
    pub owners: Vec<Ditrune>,
    pub chain: Vec<ChainStep>,
}

/// One cell of a rendered family table.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct TableCell {
    pub ditrune: Ditrune,
    pub role: Role,
    pub column: u8,
    pub row: u8,
}

/// A family's 9×9 table, cells in row-major order.
#[derive(Debug, Clone, Serialize)]
pub struct FamilyTable {
    pub family: FamilyId,
    pub family_type: FamilyType,
    pub prime: Ditrune,
    pub cells: Vec<TableCell>,
}

impl FamilyTable {
    /// The cell at (column, row); both components must be inside 0..=8.
    pub fn cell(&self, column: u8, row: u8) -> &TableCell {
        &self.cells[usize::from(row) * TABLE_AXIS + usize::from(column)]
    }
}

/// The build-once, read-only two-way locator index.
#[derive(Debug, Clone)]
pub struct KameaLocatorIndex {
    topology: FamilyTopology,
    forward: Vec<KameaLocator>,
    reverse: Vec<Ditrune>,
}

impl KameaLocatorIndex {
    /// Build the full index from scratch: resolve, annotate, address.
    pub fn build() -> Result<Self, KameaError> {
        let partition = FamilyPartition::build()?;
        let topology = FamilyTopology::build(partition)?;
        Self::from_topology(topology)
    }

    /// Address every ditrune over an already-built topology, verifying
    /// that the coordinates fill each family table exactly.
    pub fn from_topology(topology: FamilyTopology) -> Result<Self, KameaError> {
        let mut forward = Vec::with_capacity(DITRUNE_SPACE);
        let mut reverse: Vec<Option<Ditrune>> = vec![None; DITRUNE_SPACE];

        for d in Ditrune::all() {
            let family = topology.partition().family_of(d);
            let locator =
                KameaLocator::from_parts(family, member_column(family, d), member_row(family, d));
            if let Some(previous) = reverse[locator.slot()].replace(d) {
                return Err(KameaError::family_invariant(format!(
                    "locator {locator} is claimed by both {previous} and {d}"
                )));
            }
            forward.push(locator);
        }

        let reverse = reverse
            .into_iter()
            .enumerate()
            .map(|(slot, cell)| {
                cell.ok_or_else(|| {
                    KameaError::family_invariant(format!("locator slot {slot} was never filled"))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            topology,
            forward,
            reverse,
        })
    }

    /// The locator of a ditrune. Total: the index covers the space.
    pub fn locator_of(&self, d: Ditrune) -> KameaLocator {
        self.forward[usize::from(d.value())]
    }

    /// The ditrune at a locator. Total for the same reason: a
    /// constructed [`KameaLocator`] is always in range.
    pub fn ditrune_at(&self, locator: KameaLocator) -> Ditrune {
        self.reverse[locator.slot()]
    }

    /// Range-checked lookup from raw locator components.
    pub fn lookup(&self, family: u8, column: u8, row: u8) -> Result<Ditrune, KameaError> {
        Ok(self.ditrune_at(KameaLocator::new(family, column, row)?))
    }

    /// Classify a ternary string supplied by a collaborator.
    pub fn classify(&self, input: &str) -> Result<Classification, KameaError> {
        Ok(self.classify_ditrune(input.parse()?))
    }

    /// Classify an already-validated ditrune.
    pub fn classify_ditrune(&self, d: Ditrune) -> Classification {
        let assignment = self.topology.assignment(d);
        let family = self.topology.partition().family(assignment.family);
        let chain = MutationChain::resolve(d);
        Classification {
            ditrune: d,
            family: assignment.family,
            family_type: FamilyType::of(assignment.family),
            role: assignment.role,
            chain_role: self.topology.partition().chain_role_of(d),
            prime: family.prime(),
            locator: self.locator_of(d),
            owners: assignment.owners.clone(),
            chain: chain
                .annotated_steps()
                .map(|(ditrune, role)| ChainStep { ditrune, role })
                .collect(),
        }
    }

    /// The 9×9 table of one family, cells in row-major order.
    pub fn family_table(&self, family: FamilyId) -> FamilyTable {
        let prime = self.topology.partition().family(family).prime();
        let mut cells = Vec::with_capacity(TABLE_AXIS * TABLE_AXIS);
        for row in 0..TABLE_AXIS as u8 {
            for column in 0..TABLE_AXIS as u8 {
                let locator = KameaLocator::from_parts(family, column, row);
                let ditrune = self.ditrune_at(locator);
                cells.push(TableCell {
                    ditrune,
                    role: self.topology.role_of(ditrune),
                    column,
                    row,
                });
            }
        }
        FamilyTable {
            family,
            family_type: FamilyType::of(family),
            prime,
            cells,
        }
    }

    pub fn topology(&self) -> &FamilyTopology {
        &self.topology
    }

    pub fn partition(&self) -> &FamilyPartition {
        self.topology.partition()
    }
}
