use crate::support::build_index_or_exit;
use kamea_kernel::Projection;
use serde_json::json;
use std::fs;
use std::path::Path;

pub fn run(out: String, json_output: bool) {
    let index = build_index_or_exit();
    let projection = Projection::from_index(&index);
    let text = projection
        .to_json_string()
        .unwrap_or_else(|e| {
            eprintln!("error: failed to render projection: {e}");
            std::process::exit(2);
        });

    let path = Path::new(&out);
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && let Err(e) = fs::create_dir_all(parent)
    {
        eprintln!("error: failed to create {}: {e}", parent.display());
        std::process::exit(1);
    }
    if let Err(e) = fs::write(path, text) {
        eprintln!("error: failed to write {}: {e}", path.display());
        std::process::exit(1);
    }

    if json_output {
        let payload = json!({
            "path": out,
            "schema": projection.schema,
            "kind": projection.kind,
            "fingerprint": projection.fingerprint,
            "record_count": projection.records.len(),
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&payload).expect("json serialization")
        );
        return;
    }

    println!("kamea export");
    println!("  Path: {out}");
    println!("  Records: {}", projection.records.len());
    println!("  Fingerprint: {}", projection.fingerprint);
}
