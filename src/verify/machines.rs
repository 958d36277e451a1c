//! Machine checks: ids, constraints and whether anything is placed on them

use std::collections::BTreeSet;

use super::Context;
use crate::bundle::UnitPlacement;
use crate::common::names::is_valid_machine_id;

pub(super) fn check(ctx: &Context<'_>) -> Vec<String> {
    let referenced = referenced_machines(ctx);
    let mut defects = Vec::new();

    for (id, machine) in &ctx.bundle.machines {
        if !is_valid_machine_id(id) {
            defects.push(format!("invalid machine id {id:?} found in machines"));
        }
        if let Err(err) = ctx.validators.validate_constraints(&machine.constraints) {
            defects.push(format!(
                "invalid constraints {:?} in machine {id:?}: {err}",
                machine.constraints
            ));
        }
        if !referenced.contains(id.as_str()) {
            defects.push(format!(
                "machine {id:?} is not referred to by a placement directive"
            ));
        }
    }

    defects
}

/// Machine ids named by any application's placement directives
fn referenced_machines(ctx: &Context<'_>) -> BTreeSet<String> {
    ctx.bundle
        .applications
        .values()
        .flat_map(|app| app.to.iter())
        .filter_map(|directive| UnitPlacement::parse(directive).ok())
        .filter(|placement| !placement.is_new_machine())
        .filter_map(|placement| placement.machine().map(str::to_string))
        .collect()
}
