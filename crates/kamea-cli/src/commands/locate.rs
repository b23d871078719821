use crate::support::build_index_or_exit;
use serde_json::json;

pub fn run(family: u8, column: u8, row: u8, json_output: bool) {
    let index = build_index_or_exit();
    let ditrune = match index.lookup(family, column, row) {
        Ok(ditrune) => ditrune,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };
    let classification = index.classify_ditrune(ditrune);

    if json_output {
        let payload = json!({
            "family": family,
            "column": column,
            "row": row,
            "ditrune": ditrune.to_string(),
            "role": classification.role.to_string(),
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&payload).expect("json serialization")
        );
        return;
    }

    println!("kamea locate {family} {column} {row}");
    println!("  Ditrune: {ditrune}");
    println!("  Role: {}", classification.role);
    println!("  Prime: {}", classification.prime);
}
