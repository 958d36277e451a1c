//! Charm-side collaborators of bundle verification
//!
//! Verification only ever asks a charm a handful of read-only questions,
//! captured by [`CharmCapabilities`]. [`CharmLookup`] maps an application
//! name to the charm it deploys.
//!
//! ## Module Organization
//!
//! - `url.rs`: charm identifier parsing
//! - `meta.rs`: `metadata.yaml` model, the stock [`CharmCapabilities`] implementation
//! - `config.rs`: `config.yaml` schema and settings type check

pub mod config;
pub mod meta;
pub mod url;

use std::collections::{BTreeMap, BTreeSet, HashMap};

pub use config::{ConfigOption, ConfigSchema, OptionType};
pub use meta::{CharmMeta, JUJU_INFO, RelationMeta, Role, Scope};
pub use url::{CharmUrl, Schema};

/// Read-only view of a charm used by the verifier
pub trait CharmCapabilities {
    /// Relations the charm provides, by relation name
    fn provides(&self) -> &BTreeMap<String, RelationMeta>;

    /// Relations the charm requires, by relation name
    fn requires(&self) -> &BTreeMap<String, RelationMeta>;

    /// Peer relations, by relation name
    fn peers(&self) -> &BTreeMap<String, RelationMeta>;

    /// Bindable names that are not relations
    fn extra_bindings(&self) -> &BTreeSet<String>;

    fn is_subordinate(&self) -> bool;

    fn config(&self) -> &ConfigSchema;
}

/// Finds the charm deployed by an application
pub trait CharmLookup {
    fn charm_for(&self, application: &str) -> Option<&dyn CharmCapabilities>;
}

impl<C: CharmCapabilities> CharmLookup for BTreeMap<String, C> {
    fn charm_for(&self, application: &str) -> Option<&dyn CharmCapabilities> {
        self.get(application).map(|c| c as &dyn CharmCapabilities)
    }
}

impl<C: CharmCapabilities> CharmLookup for HashMap<String, C> {
    fn charm_for(&self, application: &str) -> Option<&dyn CharmCapabilities> {
        self.get(application).map(|c| c as &dyn CharmCapabilities)
    }
}

/// Every relation visible on a charm: declared ones plus the implicit
/// `juju-info` provider, unless the charm declares a relation of that name.
pub fn visible_relations(charm: &dyn CharmCapabilities) -> Vec<RelationMeta> {
    let mut relations: Vec<RelationMeta> = charm
        .provides()
        .values()
        .chain(charm.requires().values())
        .chain(charm.peers().values())
        .cloned()
        .collect();
    if !relations.iter().any(|rel| rel.name == JUJU_INFO) {
        relations.push(RelationMeta::juju_info());
    }
    relations
}

/// Look a relation up by name across every role
pub fn find_relation(charm: &dyn CharmCapabilities, name: &str) -> Option<RelationMeta> {
    visible_relations(charm)
        .into_iter()
        .find(|rel| rel.name == name)
}

/// Whether `name` may be used as a binding key for this charm
pub fn is_bindable(charm: &dyn CharmCapabilities, name: &str) -> bool {
    name.is_empty() || charm.extra_bindings().contains(name) || find_relation(charm, name).is_some()
}
