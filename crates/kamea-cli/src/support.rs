use kamea_kernel::{Ditrune, FamilyId, KameaLocatorIndex, Projection};
use std::fs;
use std::path::Path;

pub fn parse_ditrune_or_exit(input: &str) -> Ditrune {
    input.parse().unwrap_or_else(|e| {
        eprintln!("error: {e}");
        std::process::exit(1);
    })
}

pub fn family_id_or_exit(index: u8) -> FamilyId {
    FamilyId::new(index).unwrap_or_else(|e| {
        eprintln!("error: {e}");
        std::process::exit(1);
    })
}

pub fn build_index_or_exit() -> KameaLocatorIndex {
    KameaLocatorIndex::build().unwrap_or_else(|e| {
        eprintln!("error: table build failed its self-check: {e}");
        std::process::exit(1);
    })
}

/// Load and parse a projection document, without validating it; the
/// caller decides how a bad document is reported.
pub fn load_projection(path: &str) -> Result<Projection, String> {
    let text = fs::read_to_string(Path::new(path))
        .map_err(|e| format!("failed to read {path}: {e}"))?;
    Projection::from_json_str(&text).map_err(|e| format!("failed to parse {path}: {e}"))
}

pub fn yes_no(ok: bool) -> &'static str {
    if ok { "yes" } else { "no" }
}
