use crate::support::parse_ditrune_or_exit;
use serde_json::json;

pub fn run(ditrune: String, json_output: bool) {
    let input = parse_ditrune_or_exit(&ditrune);
    let output = kamea_kernel::conrune(input);

    if json_output {
        let payload = json!({
            "input": input.to_string(),
            "output": output.to_string(),
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&payload).expect("json serialization")
        );
        return;
    }

    println!("kamea conrune {input}");
    println!("  Output: {output}");
}
