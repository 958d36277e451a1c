//! Endpoint binding checks

use super::Context;
use crate::charm::is_bindable;

pub(super) fn check(ctx: &Context<'_>) -> Vec<String> {
    let Some(charms) = ctx.charms else {
        return Vec::new();
    };

    let mut defects = Vec::new();
    for (name, app) in &ctx.bundle.applications {
        let Some(charm) = charms.charm_for(name) else {
            continue;
        };
        for (endpoint, space) in &app.endpoint_bindings {
            if !is_bindable(charm, endpoint) {
                defects.push(format!(
                    "application {name:?} wants to bind endpoint {endpoint:?} to space {space:?}, but the endpoint is not defined by the charm"
                ));
            }
        }
    }
    defects
}
