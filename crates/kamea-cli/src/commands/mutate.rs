use crate::support::parse_ditrune_or_exit;
use kamea_kernel::mutation::inner_triunes;
use serde_json::json;

pub fn run(ditrune: String, json_output: bool) {
    let input = parse_ditrune_or_exit(&ditrune);
    let (upper, lower) = inner_triunes(input);
    let output = kamea_kernel::mutate(input);

    if json_output {
        let payload = json!({
            "input": input.to_string(),
            "upper_triune": upper.to_string(),
            "lower_triune": lower.to_string(),
            "output": output.to_string(),
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&payload).expect("json serialization")
        );
        return;
    }

    println!("kamea mutate {input}");
    println!("  Upper triune: {upper}");
    println!("  Lower triune: {lower}");
    println!("  Output: {output}");
}
