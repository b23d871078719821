use crate::support::{build_index_or_exit, load_projection, yes_no};
use kamea_kernel::{Ditrune, FAMILY_SIZE, FamilyType, Projection, Role, conrune};
use serde_json::json;

pub fn run(projection_path: Option<String>, json_output: bool) {
    let index = build_index_or_exit();

    let family_count = index.partition().families().len();
    let sizes_ok = index
        .partition()
        .families()
        .iter()
        .all(|family| family.members().len() == FAMILY_SIZE);
    let involution_ok = Ditrune::all().all(|d| conrune(conrune(d)) == d);
    let bijection_ok = Ditrune::all().all(|d| index.ditrune_at(index.locator_of(d)) == d);
    let roles_ok = index.partition().families().iter().all(|family| {
        let owner_count = FamilyType::of(family.id()).temple_owner_count();
        let mut counts = [0usize; 3];
        for member in family.members() {
            let assignment = index.topology().assignment(member.ditrune);
            counts[assignment.role as usize] += 1;
            if assignment.role == Role::Temple && assignment.owners.len() != owner_count {
                return false;
            }
        }
        counts == [1, 8, 72]
    });

    let fresh = Projection::from_index(&index);

    let projection_state = projection_path.as_deref().map(|path| match load_projection(path) {
        Err(detail) => ("unreadable", Some(detail)),
        Ok(cached) => match cached.validate() {
            Err(e) => ("invalid", Some(e.to_string())),
            Ok(()) if cached.fingerprint != fresh.fingerprint => ("stale", None),
            Ok(()) => ("fresh", None),
        },
    });
    let projection_ok = matches!(projection_state, None | Some(("fresh", _)));

    let ok = sizes_ok && involution_ok && bijection_ok && roles_ok && projection_ok;

    if json_output {
        let payload = json!({
            "families": family_count,
            "family_sizes": sizes_ok,
            "involution": involution_ok,
            "locator_bijection": bijection_ok,
            "role_cardinality": roles_ok,
            "fingerprint": fresh.fingerprint,
            "projection": projection_path.as_deref().map(|path| {
                let (state, detail) = projection_state
                    .clone()
                    .unwrap_or(("unreadable", None));
                json!({
                    "path": path,
                    "state": state,
                    "detail": detail,
                })
            }),
            "ok": ok,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&payload).expect("json serialization")
        );
    } else {
        println!("kamea check");
        println!("  Families: {family_count}");
        println!("  Family sizes: {}", yes_no(sizes_ok));
        println!("  Involution: {}", yes_no(involution_ok));
        println!("  Locator bijection: {}", yes_no(bijection_ok));
        println!("  Role cardinality: {}", yes_no(roles_ok));
        println!("  Fingerprint: {}", fresh.fingerprint);
        if let Some(path) = projection_path.as_deref() {
            let (state, detail) = projection_state
                .clone()
                .unwrap_or(("unreadable", None));
            match detail {
                Some(detail) => println!("  Projection: {state} ({path}): {detail}"),
                None => println!("  Projection: {state} ({path})"),
            }
        }
        println!("  Result: {}", if ok { "ok" } else { "failed" });
    }

    if !ok {
        std::process::exit(1);
    }
}
