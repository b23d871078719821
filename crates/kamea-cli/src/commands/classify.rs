use crate::support::build_index_or_exit;

pub fn run(ditrune: String, json_output: bool) {
    let index = build_index_or_exit();
    let classification = match index.classify(&ditrune) {
        Ok(classification) => classification,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    if json_output {
        println!(
            "{}",
            serde_json::to_string_pretty(&classification).expect("json serialization")
        );
        return;
    }

    println!("kamea classify {}", classification.ditrune);
    println!(
        "  Family: {} ({})",
        classification.family, classification.family_type
    );
    println!("  Role: {}", classification.role);
    println!("  Chain role: {}", classification.chain_role);
    println!("  Prime: {}", classification.prime);
    println!("  Locator: {}", classification.locator);
    if !classification.owners.is_empty() {
        let owners: Vec<String> = classification
            .owners
            .iter()
            .map(|o| o.to_string())
            .collect();
        println!("  Owners: {}", owners.join(", "));
    }
    let chain: Vec<String> = classification
        .chain
        .iter()
        .map(|step| format!("{} ({})", step.ditrune, step.role))
        .collect();
    println!("  Chain: {}", chain.join(" -> "));
}
