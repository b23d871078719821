use crate::support::{build_index_or_exit, family_id_or_exit};
use kamea_kernel::{Role, TABLE_AXIS};

pub fn run(family: u8, json_output: bool) {
    let index = build_index_or_exit();
    let family = family_id_or_exit(family);
    let table = index.family_table(family);

    if json_output {
        println!(
            "{}",
            serde_json::to_string_pretty(&table).expect("json serialization")
        );
        return;
    }

    println!("kamea table {}", table.family);
    println!("  Type: {}", table.family_type);
    println!("  Prime: {}", table.prime);
    for row in 0..TABLE_AXIS as u8 {
        let line: Vec<String> = (0..TABLE_AXIS as u8)
            .map(|column| {
                let cell = table.cell(column, row);
                let marker = match cell.role {
                    Role::Prime => "*",
                    Role::Acolyte => "+",
                    Role::Temple => " ",
                };
                format!("{}{marker}", cell.ditrune)
            })
            .collect();
        println!("  Row {row}: {}", line.join(" "));
    }
    println!("  Legend: * prime, + acolyte");
}
