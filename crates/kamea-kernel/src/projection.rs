//! The locator projection: the minimal persisted cache of a built index.
//!
//! A projection is a flat array of 729 records `{ditrune, family, role,
//! column, row}` in ascending ditrune order, wrapped in a headered
//! document carrying a schema tag, a kind tag, and a content
//! fingerprint of the canonical record stream. That is sufficient to
//! reconstruct every lookup without recomputation, and the header is
//! sufficient to refuse a stale or tampered cache instead of trusting
//! it.

use crate::error::KameaError;
use crate::family::FamilyId;
use crate::locator::KameaLocatorIndex;
use crate::ternary::{DITRUNE_SPACE, Ditrune};
use crate::topology::Role;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Schema version of the projection document.
pub const PROJECTION_SCHEMA: u64 = 1;

/// Kind tag of the projection document.
pub const PROJECTION_KIND: &str = "kamea.locator_projection.v1";

/// One persisted classification record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocatorRecord {
    pub ditrune: Ditrune,
    pub family: FamilyId,
    pub role: Role,
    pub column: u8,
    pub row: u8,
}

/// The headered projection document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projection {
    pub schema: u64,
    pub kind: String,
    pub fingerprint: String,
    pub records: Vec<LocatorRecord>,
}

impl Projection {
    /// Export a built index as a projection document.
    pub fn from_index(index: &KameaLocatorIndex) -> Self {
        let records: Vec<LocatorRecord> = Ditrune::all()
            .map(|d| {
                let locator = index.locator_of(d);
                LocatorRecord {
                    ditrune: d,
                    family: locator.family(),
                    role: index.topology().role_of(d),
                    column: locator.column(),
                    row: locator.row(),
                }
            })
            .collect();
        let fingerprint = fingerprint_of(&records);
        Self {
            schema: PROJECTION_SCHEMA,
            kind: PROJECTION_KIND.to_string(),
            fingerprint,
            records,
        }
    }

    /// Check the document's integrity before trusting any lookup.
    ///
    /// Header mismatches and broken fingerprints mean the cache cannot
    /// be trusted; incomplete coverage means some ditrune would be
    /// unanswerable.
    pub fn validate(&self) -> Result<(), KameaError> {
        if self.schema != PROJECTION_SCHEMA || self.kind != PROJECTION_KIND {
            return Err(KameaError::family_invariant(format!(
                "projection header mismatch: expected schema={PROJECTION_SCHEMA} kind={PROJECTION_KIND}, got schema={} kind={}",
                self.schema, self.kind
            )));
        }
        if self.records.len() != DITRUNE_SPACE {
            return Err(KameaError::family_invariant(format!(
                "projection holds {} records, expected {DITRUNE_SPACE}",
                self.records.len()
            )));
        }
        for (value, record) in self.records.iter().enumerate() {
            if usize::from(record.ditrune.value()) != value {
                return Err(KameaError::UnknownDitrune {
                    value: Ditrune::from_value_unchecked(value as u16).to_string(),
                });
            }
        }
        let expected = fingerprint_of(&self.records);
        if self.fingerprint != expected {
            return Err(KameaError::family_invariant(format!(
                "projection fingerprint mismatch: header says {}, records hash to {expected}",
                self.fingerprint
            )));
        }
        Ok(())
    }

    /// The record for one ditrune.
    ///
    /// Fails when the projection does not cover the requested value —
    /// the caller is querying a table that was never fully built.
    pub fn lookup(&self, d: Ditrune) -> Result<&LocatorRecord, KameaError> {
        self.records
            .binary_search_by_key(&d, |record| record.ditrune)
            .map(|index| &self.records[index])
            .map_err(|_| KameaError::UnknownDitrune {
                value: d.to_string(),
            })
    }

    /// Serialize the document as pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parse a document from JSON. Callers still run [`validate`]
    /// before trusting it.
    ///
    /// [`validate`]: Projection::validate
    pub fn from_json_str(input: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(input)
    }
}

/// Deterministic fingerprint of a record stream.
pub fn fingerprint_of(records: &[LocatorRecord]) -> String {
    let mut hasher = Sha256::new();
    for record in records {
        hasher.update(record.ditrune.to_string().as_bytes());
        hasher.update(b":");
        hasher.update(record.family.index().to_string().as_bytes());
        hasher.update(b":");
        hasher.update(record.role.to_string().as_bytes());
        hasher.update(b":");
        hasher.update(record.column.to_string().as_bytes());
        hasher.update(b":");
        hasher.update(record.row.to_string().as_bytes());
        hasher.update(b"\n");
    }
    let hash = hasher.finalize();
    format!("{hash:x}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn projection() -> Projection {
        Projection::from_index(&KameaLocatorIndex::build().unwrap())
    }

    #[test]
    fn export_validates() {
        projection().validate().unwrap();
    }

    #[test]
    fn json_round_trip_preserves_fingerprint() {
        let exported = projection();
        let text = exported.to_json_string().unwrap();
        let parsed = Projection::from_json_str(&text).unwrap();
        parsed.validate().unwrap();
        assert_eq!(parsed.fingerprint, exported.fingerprint);
        assert_eq!(parsed.records, exported.records);
    }

    #[test]
    fn lookup_round_trips_through_records() {
        let exported = projection();
        let record = exported.lookup("022101".parse().unwrap()).unwrap();
        assert_eq!(record.family.index(), 7);
        assert_eq!(record.column, 6);
        assert_eq!(record.row, 1);
    }

    #[test]
    fn truncation_is_rejected() {
        let mut exported = projection();
        exported.records.truncate(700);
        assert!(matches!(
            exported.validate(),
            Err(KameaError::FamilyInvariantViolation { .. })
        ));
    }

    #[test]
    fn missing_member_is_reported_as_unknown() {
        let mut exported = projection();
        exported.records.remove(10);
        exported.records.push(*exported.records.last().unwrap());
        match exported.validate() {
            Err(KameaError::UnknownDitrune { value }) => assert_eq!(value, "000101"),
            other => panic!("expected unknown-ditrune error, got {other:?}"),
        }
    }

    #[test]
    fn tampering_breaks_the_fingerprint() {
        let mut exported = projection();
        exported.records[3].column = 8;
        assert!(matches!(
            exported.validate(),
            Err(KameaError::FamilyInvariantViolation { .. })
        ));
    }

    #[test]
    fn lookup_fails_outside_coverage() {
        let mut exported = projection();
        exported.records.retain(|r| r.ditrune.value() != 42);
        let missing = Ditrune::all().nth(42).unwrap();
        assert!(matches!(
            exported.lookup(missing),
            Err(KameaError::UnknownDitrune { .. })
        ));
    }
}
