//! Relation checks
//!
//! Structural checks (arity, endpoint syntax, known applications, self
//! relations, duplicates) always run. When charms are available each entry
//! is also resolved against them: named relations must exist with matching
//! roles and interfaces, and missing names are inferred.

use std::collections::BTreeSet;

use super::Context;
use super::inference::{Resolution, infer_relation};
use crate::bundle::Endpoint;
use crate::charm::{RelationMeta, Role, find_relation};

pub(super) fn check(ctx: &Context<'_>) -> Vec<String> {
    let mut defects = Vec::new();
    let mut seen: BTreeSet<(Endpoint, Endpoint)> = BTreeSet::new();

    for entry in &ctx.bundle.relations {
        if entry.len() != 2 {
            defects.push(format!(
                "relation {entry:?} has {} endpoint(s), not 2",
                entry.len()
            ));
            continue;
        }

        let parsed: Result<Vec<Endpoint>, _> =
            entry.iter().map(String::as_str).map(Endpoint::parse).collect();
        let endpoints = match parsed {
            Ok(endpoints) => endpoints,
            Err(err) => {
                defects.push(err.to_string());
                continue;
            }
        };
        let [left, right] = endpoints.as_slice() else {
            continue;
        };

        let missing: BTreeSet<&str> = [left, right]
            .into_iter()
            .map(|ep| ep.application.as_str())
            .filter(|app| !ctx.bundle.applications.contains_key(*app))
            .collect();
        if !missing.is_empty() {
            defects.extend(missing.into_iter().map(|app| {
                format!("relation {entry:?} refers to application {app:?} not defined in this bundle")
            }));
            continue;
        }

        if left.application == right.application {
            defects.push(format!("relation {entry:?} relates an application to itself"));
            continue;
        }

        let (resolved, semantic) = resolve(ctx, entry, left, right);
        defects.extend(semantic);

        let key = if resolved.0 <= resolved.1 {
            (resolved.0, resolved.1)
        } else {
            (resolved.1, resolved.0)
        };
        if !seen.insert(key) {
            defects.push(format!("relation {entry:?} is defined more than once"));
        }
    }

    defects
}

/// Resolve an entry against the charms, if any.
///
/// Returns the endpoints to use for duplicate detection (resolved when
/// possible, as written otherwise) and any semantic defects.
fn resolve(
    ctx: &Context<'_>,
    entry: &[String],
    left: &Endpoint,
    right: &Endpoint,
) -> ((Endpoint, Endpoint), Vec<String>) {
    let as_written = (left.clone(), right.clone());
    let Some(charms) = ctx.charms else {
        return (as_written, Vec::new());
    };
    // A missing charm is reported by the application checks
    let (Some(left_charm), Some(right_charm)) = (
        charms.charm_for(&left.application),
        charms.charm_for(&right.application),
    ) else {
        return (as_written, Vec::new());
    };

    let undefined: Vec<String> = [(left, left_charm), (right, right_charm)]
        .into_iter()
        .filter_map(|(ep, charm)| {
            let name = ep.relation.as_ref()?;
            find_relation(charm, name)
                .is_none()
                .then(|| undefined_relation(ctx, ep, name))
        })
        .collect();
    if !undefined.is_empty() {
        return (as_written, undefined);
    }

    if let (Some(l), Some(r)) = (&left.relation, &right.relation) {
        let (Some(l), Some(r)) = (find_relation(left_charm, l), find_relation(right_charm, r))
        else {
            return (as_written, Vec::new());
        };
        return (as_written, named_pair(entry, left, &l, right, &r));
    }

    match infer_relation(left, left_charm, right, right_charm) {
        Resolution::Resolved(l, r) => ((l, r), Vec::new()),
        Resolution::NoMatch => (
            as_written,
            vec![format!(
                "relation {entry:?} cannot be inferred: no compatible endpoints"
            )],
        ),
        Resolution::Ambiguous(candidates) => {
            let quoted: Vec<String> = candidates.iter().map(|c| format!("{c:?}")).collect();
            (
                as_written,
                vec![format!(
                    "ambiguous relation {entry:?} could refer to {}",
                    quoted.join("; ")
                )],
            )
        }
    }
}

fn undefined_relation(ctx: &Context<'_>, ep: &Endpoint, name: &str) -> String {
    let charm = ctx
        .bundle
        .applications
        .get(&ep.application)
        .map_or("", |app| app.charm.as_str());
    format!(
        "charm {charm:?} used by application {:?} does not define relation {name:?}",
        ep.application
    )
}

/// Checks for an entry that names the relation on both sides
fn named_pair(
    entry: &[String],
    left: &Endpoint,
    l: &RelationMeta,
    right: &Endpoint,
    r: &RelationMeta,
) -> Vec<String> {
    let peers: Vec<String> = [(left, l), (right, r)]
        .into_iter()
        .filter(|(_, meta)| meta.role == Role::Peer)
        .map(|(ep, _)| format!("relation {entry:?} includes peer relation \"{ep}\""))
        .collect();
    if !peers.is_empty() {
        return peers;
    }

    let mut defects = Vec::new();
    if l.role == r.role {
        defects.push(format!(
            "relation {entry:?} relates two {} endpoints",
            l.role
        ));
    }
    if l.interface != r.interface {
        defects.push(format!(
            "mismatched interface between \"{left}\" and \"{right}\" ({:?} vs {:?})",
            l.interface, r.interface
        ));
    }
    defects
}
