//! Unit placement checks

use super::Context;
use crate::bundle::{PlacementTarget, UnitPlacement};
use crate::common::names::{DEPRECATED_CONTAINER_TYPE, is_valid_container_type};

pub(super) fn check(ctx: &Context<'_>) -> Vec<String> {
    let bundle = ctx.bundle;
    let mut defects = Vec::new();

    for (name, app) in &bundle.applications {
        for directive in &app.to {
            let placement = match UnitPlacement::parse(directive) {
                Ok(placement) => placement,
                Err(err) => {
                    defects.push(err.to_string());
                    continue;
                }
            };

            if let Some(container) = &placement.container_type {
                if !is_valid_container_type(container) {
                    defects.push(format!(
                        "placement {directive:?} specifies an unsupported container type {container:?}"
                    ));
                }
            }

            match &placement.target {
                PlacementTarget::Application { name: target, unit } => {
                    match bundle.applications.get(target) {
                        None => defects.push(format!(
                            "placement {directive:?} refers to an application not defined in this bundle"
                        )),
                        Some(target_app) => {
                            let started = target_app.unit_count();
                            if unit.is_some_and(|u| i64::from(u) >= started) {
                                defects.push(format!(
                                    "placement {directive:?} specifies a unit greater than the {started} unit(s) started by the target application"
                                ));
                            }
                        }
                    }
                }
                PlacementTarget::Machine(_) if placement.is_new_machine() => {}
                PlacementTarget::Machine(id) => {
                    if !bundle.machines.contains_key(id) {
                        defects.push(format!(
                            "placement {directive:?} refers to a machine not defined in this bundle"
                        ));
                    }
                }
            }
        }

        if i64::try_from(app.to.len()).unwrap_or(i64::MAX) > app.unit_count() {
            defects.push(format!(
                "too many units specified in unit placement for application {name:?}"
            ));
        }
    }

    defects
}

/// Placements using `lxc`, which is deployed as `lxd`
pub(super) fn deprecation_warnings(ctx: &Context<'_>) -> Vec<String> {
    ctx.bundle
        .applications
        .iter()
        .flat_map(|(name, app)| app.to.iter().map(move |directive| (name, directive)))
        .filter(|(_, directive)| {
            UnitPlacement::parse(directive).is_ok_and(|p| {
                p.container_type.as_deref() == Some(DEPRECATED_CONTAINER_TYPE)
            })
        })
        .map(|(name, directive)| {
            format!(
                "placement {directive:?} in application {name:?} uses deprecated lxc containers; lxd containers will be deployed instead"
            )
        })
        .collect()
}
