//! # Kamea Kernel
//!
//! Deterministic classification of the 729-element ditrune space: every
//! 6-digit base-3 value belongs to exactly one of 9 families of 81,
//! resolved by iterating nuclear mutation to its terminal cycle, and
//! every family member has a structural role and a universal
//! (family, column, row) address in its family's 9×9 table.
//!
//! The whole domain is closed and finite, so every table is built once,
//! self-checked, and then shared as an immutable value.
//!
//! ## Architecture
//!
//! ```text
//! ternary            ← Ditrune / Triune codec over the base-3 alphabet
//!     │
//! conrune            ← Involutive digit substitution (1↔2, 0 fixed)
//!     │
//! mutation           ← Nuclear mutation, chains, terminal cycles
//!     │
//! family             ← The 729 → 9×81 partition, region-grid ids
//!     │
//! topology           ← Family types, Prime/Acolyte/Temple, lineage
//!     │
//! locator            ← The two-way 9×9×9 address index (read surface)
//!     │
//! projection         ← Headered, fingerprinted cache document
//! ```

pub mod conrune;
pub mod error;
pub mod family;
pub mod locator;
pub mod mutation;
pub mod projection;
pub mod ternary;
pub mod topology;

pub use conrune::{conrune, conrune_triune};
pub use error::KameaError;
pub use family::{FAMILY_COUNT, FAMILY_SIZE, Family, FamilyId, FamilyMember, FamilyPartition};
pub use locator::{
    ChainStep, Classification, FamilyTable, KameaLocator, KameaLocatorIndex, TABLE_AXIS, TableCell,
};
pub use mutation::{ChainRole, MutationChain, mutate};
pub use projection::{LocatorRecord, PROJECTION_KIND, PROJECTION_SCHEMA, Projection};
pub use ternary::{DITRUNE_SPACE, Ditrune, Triune};
pub use topology::{FamilyTopology, FamilyType, Role, RoleAssignment};
