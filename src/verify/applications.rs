//! Per-application checks

use normpath::PathExt;

use super::Context;
use crate::bundle::{ApplicationSpec, ResourceRevision};
use crate::charm::url::{CharmUrl, is_local_path};
use crate::common::names::{is_valid_application_name, is_valid_storage_name};

pub(super) fn check(ctx: &Context<'_>) -> Vec<String> {
    let mut defects = Vec::new();
    for (name, app) in &ctx.bundle.applications {
        if !is_valid_application_name(name) {
            defects.push(format!("invalid application name {name:?}"));
        }
        defects.extend(charm_reference(ctx, name, app));
        if let Err(err) = ctx.validators.validate_constraints(&app.constraints) {
            defects.push(format!(
                "invalid constraints {:?} in application {name:?}: {err}",
                app.constraints
            ));
        }
        defects.extend(storage_and_devices(ctx, name, app));
        defects.extend(resources(name, app));
        if app.num_units.is_some_and(|n| n < 0) {
            defects.push(format!(
                "negative number of units specified on application {name:?}"
            ));
        }
        defects.extend(against_charm(ctx, name, app));
    }
    defects
}

fn charm_reference(ctx: &Context<'_>, name: &str, app: &ApplicationSpec) -> Option<String> {
    if let Some(base) = ctx.local_base {
        if is_local_path(&app.charm) {
            let path = base.join(&app.charm);
            return match path.normalize() {
                Ok(_) => None,
                Err(err) => Some(format!(
                    "charm path in application {name:?} does not exist: {}: {err}",
                    path.display()
                )),
            };
        }
    }
    CharmUrl::parse(&app.charm)
        .err()
        .map(|err| format!("invalid charm URL in application {name:?}: {err}"))
}

fn storage_and_devices(ctx: &Context<'_>, name: &str, app: &ApplicationSpec) -> Vec<String> {
    let mut defects = Vec::new();
    for (storage, directive) in &app.storage {
        if !is_valid_storage_name(storage) {
            defects.push(format!(
                "invalid storage name {storage:?} in application {name:?}"
            ));
        }
        if let Err(err) = ctx.validators.validate_storage(directive) {
            defects.push(format!(
                "invalid storage {storage:?} in application {name:?}: {err}"
            ));
        }
    }
    for (device, directive) in &app.devices {
        if !is_valid_storage_name(device) {
            defects.push(format!(
                "invalid device name {device:?} in application {name:?}"
            ));
        }
        if let Err(err) = ctx.validators.validate_devices(directive) {
            defects.push(format!(
                "invalid device {device:?} in application {name:?}: {err}"
            ));
        }
    }
    defects
}

fn resources(name: &str, app: &ApplicationSpec) -> Vec<String> {
    let mut defects = Vec::new();
    for (resource, value) in &app.resources {
        if resource.is_empty() {
            defects.push(format!("missing resource name on application {name:?}"));
        }
        if let Err(type_name) = ResourceRevision::from_value(value) {
            defects.push(format!(
                "resource {resource:?} on application {name:?} has invalid revision type {type_name}, expected int or string"
            ));
        }
    }
    defects
}

/// Checks that need the application's charm
fn against_charm(ctx: &Context<'_>, name: &str, app: &ApplicationSpec) -> Vec<String> {
    let Some(charms) = ctx.charms else {
        return Vec::new();
    };
    let Some(charm) = charms.charm_for(name) else {
        return vec![format!(
            "application {name:?} refers to charm {:?} which was not supplied",
            app.charm
        )];
    };

    let mut defects = Vec::new();
    if charm.is_subordinate() {
        if app.num_units.is_some_and(|n| n != 0) {
            defects.push(format!(
                "application {name:?} is subordinate but has non-zero num_units"
            ));
        }
        if !app.to.is_empty() {
            defects.push(format!(
                "application {name:?} is subordinate but specifies unit placement"
            ));
        }
    }
    if let Err(reason) = charm.config().validate_settings(&app.options) {
        defects.push(format!("cannot validate application {name:?}: {reason}"));
    }
    defects
}
