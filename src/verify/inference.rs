//! Relation inference
//!
//! A bundle may relate two applications without naming the relations
//! (`[wordpress, mysql]`) or name only one side. The missing names are
//! deduced by pairing a provider on one side with a requirer of the same
//! interface on the other, in both directions.

use crate::bundle::Endpoint;
use crate::charm::{CharmCapabilities, RelationMeta, Role, visible_relations};

/// Outcome of inferring one relation entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Exactly one provider/requirer pairing fits
    Resolved(Endpoint, Endpoint),
    /// Nothing fits
    NoMatch,
    /// Several pairings fit, formatted as `"app1:rel app2:rel"` and sorted
    Ambiguous(Vec<String>),
}

struct Candidate {
    left: RelationMeta,
    right: RelationMeta,
}

impl Candidate {
    fn is_implicit(&self) -> bool {
        self.left.is_implicit() || self.right.is_implicit()
    }
}

/// Relation names visible on `endpoint`, restricted to its explicit name if any
fn options(endpoint: &Endpoint, charm: &dyn CharmCapabilities) -> Vec<RelationMeta> {
    visible_relations(charm)
        .into_iter()
        .filter(|rel| rel.role != Role::Peer)
        .filter(|rel| {
            endpoint
                .relation
                .as_ref()
                .is_none_or(|name| *name == rel.name)
        })
        .collect()
}

/// Deduce the relation names for a pair of endpoints.
///
/// When several pairings fit and some of them only go through the implicit
/// `juju-info` relation, those are dropped first.
pub fn infer_relation(
    left: &Endpoint,
    left_charm: &dyn CharmCapabilities,
    right: &Endpoint,
    right_charm: &dyn CharmCapabilities,
) -> Resolution {
    let right_options = options(right, right_charm);
    let mut candidates = Vec::new();
    for l in options(left, left_charm) {
        for r in &right_options {
            let complementary = matches!(
                (l.role, r.role),
                (Role::Provider, Role::Requirer) | (Role::Requirer, Role::Provider)
            );
            if complementary && l.interface == r.interface {
                candidates.push(Candidate {
                    left: l.clone(),
                    right: r.clone(),
                });
            }
        }
    }

    if candidates.len() > 1 && candidates.iter().any(|c| !c.is_implicit()) {
        candidates.retain(|c| !c.is_implicit());
    }

    match candidates.as_slice() {
        [] => Resolution::NoMatch,
        [only] => Resolution::Resolved(
            left.with_relation(&only.left.name),
            right.with_relation(&only.right.name),
        ),
        many => {
            let mut formatted: Vec<String> = many
                .iter()
                .map(|c| {
                    format!(
                        "{}:{} {}:{}",
                        left.application, c.left.name, right.application, c.right.name
                    )
                })
                .collect();
            formatted.sort();
            Resolution::Ambiguous(formatted)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charm::CharmMeta;

    fn symmetric(name: &str) -> CharmMeta {
        CharmMeta::new(name)
            .with_relation(RelationMeta::new("prova", "a", Role::Provider))
            .with_relation(RelationMeta::new("provb", "b", Role::Provider))
            .with_relation(RelationMeta::new("reqa", "a", Role::Requirer))
            .with_relation(RelationMeta::new("reqb", "b", Role::Requirer))
    }

    fn ep(spec: &str) -> Endpoint {
        Endpoint::parse(spec).unwrap()
    }

    #[test]
    fn test_ambiguous_lists_every_pairing_sorted() {
        let (c1, c2) = (symmetric("c1"), symmetric("c2"));
        assert_eq!(
            infer_relation(&ep("app1"), &c1, &ep("app2"), &c2),
            Resolution::Ambiguous(vec![
                "app1:prova app2:reqa".to_string(),
                "app1:provb app2:reqb".to_string(),
                "app1:reqa app2:prova".to_string(),
                "app1:reqb app2:provb".to_string(),
            ])
        );
    }

    #[test]
    fn test_one_named_side_narrows() {
        let (c1, c2) = (symmetric("c1"), symmetric("c2"));
        assert_eq!(
            infer_relation(&ep("app1:prova"), &c1, &ep("app2"), &c2),
            Resolution::Resolved(ep("app1:prova"), ep("app2:reqa"))
        );
        assert_eq!(
            infer_relation(&ep("app1"), &c1, &ep("app2:reqb"), &c2),
            Resolution::Resolved(ep("app1:provb"), ep("app2:reqb"))
        );
    }

    #[test]
    fn test_unique_match() {
        let wordpress = CharmMeta::new("wordpress")
            .with_relation(RelationMeta::new("db", "mysql", Role::Requirer))
            .with_relation(RelationMeta::new("website", "http", Role::Provider));
        let mysql = CharmMeta::new("mysql")
            .with_relation(RelationMeta::new("server", "mysql", Role::Provider));
        assert_eq!(
            infer_relation(&ep("wordpress"), &wordpress, &ep("mysql"), &mysql),
            Resolution::Resolved(ep("wordpress:db"), ep("mysql:server"))
        );
    }

    #[test]
    fn test_no_match() {
        let a = CharmMeta::new("a").with_relation(RelationMeta::new("x", "foo", Role::Requirer));
        let b = CharmMeta::new("b").with_relation(RelationMeta::new("y", "bar", Role::Provider));
        assert_eq!(
            infer_relation(&ep("a"), &a, &ep("b"), &b),
            Resolution::NoMatch
        );
    }

    #[test]
    fn test_implicit_juju_info_is_a_fallback() {
        let logger = CharmMeta::new("logger").with_relation(RelationMeta::new(
            "juju-info",
            "juju-info",
            Role::Requirer,
        ));
        let host = CharmMeta::new("host");
        assert_eq!(
            infer_relation(&ep("logger"), &logger, &ep("host"), &host),
            Resolution::Resolved(ep("logger:juju-info"), ep("host:juju-info"))
        );

        // an explicit pairing wins over the implicit one
        let logger = logger.with_relation(RelationMeta::new("logs", "syslog", Role::Requirer));
        let host = host.with_relation(RelationMeta::new("syslog", "syslog", Role::Provider));
        assert_eq!(
            infer_relation(&ep("logger"), &logger, &ep("host"), &host),
            Resolution::Resolved(ep("logger:logs"), ep("host:syslog"))
        );
    }

    #[test]
    fn test_peers_never_match() {
        let a = CharmMeta::new("a").with_relation(RelationMeta::new("ring", "p", Role::Peer));
        let b = CharmMeta::new("b").with_relation(RelationMeta::new("ring", "p", Role::Peer));
        assert_eq!(
            infer_relation(&ep("a"), &a, &ep("b"), &b),
            Resolution::NoMatch
        );
    }
}
