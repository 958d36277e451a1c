//! Charm metadata (`metadata.yaml`)
//!
//! Only the parts the bundle verifier consults are modelled: relation
//! endpoints, extra bindings and the subordinate flag. The config schema is
//! read from a sibling `config.yaml` by [`CharmMeta::from_dir`].

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::Path;

use serde::Deserialize;

use super::CharmCapabilities;
use super::config::ConfigSchema;
use crate::common::names::is_valid_relation_name;
use crate::error::{CharmError, Result};

/// Which side of a relation an endpoint plays
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Role {
    Provider,
    Requirer,
    Peer,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Role::Provider => "provider",
            Role::Requirer => "requirer",
            Role::Peer => "peer",
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    #[default]
    Global,
    Container,
}

/// A relation endpoint declared by a charm
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationMeta {
    pub name: String,
    pub interface: String,
    pub role: Role,
    pub scope: Scope,
    pub limit: Option<u32>,
    pub optional: bool,
}

impl RelationMeta {
    pub fn new(name: impl Into<String>, interface: impl Into<String>, role: Role) -> Self {
        Self {
            name: name.into(),
            interface: interface.into(),
            role,
            scope: Scope::Global,
            limit: None,
            optional: false,
        }
    }

    /// The `juju-info` relation every charm provides without declaring it
    pub fn juju_info() -> Self {
        Self::new(JUJU_INFO, JUJU_INFO, Role::Provider)
    }

    pub fn is_implicit(&self) -> bool {
        self.name.starts_with(RESERVED_PREFIX)
    }
}

/// Name and interface of the implicit provider relation
pub const JUJU_INFO: &str = "juju-info";

const RESERVED_PREFIX: &str = "juju-";

#[derive(Deserialize)]
#[serde(untagged)]
enum RawRelation {
    Interface(String),
    Detailed {
        interface: String,
        #[serde(default)]
        scope: Scope,
        #[serde(default)]
        limit: Option<u32>,
        #[serde(default)]
        optional: bool,
    },
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
struct RawMeta {
    name: String,
    #[serde(default)]
    subordinate: bool,
    #[serde(default)]
    provides: Option<BTreeMap<String, RawRelation>>,
    #[serde(default)]
    requires: Option<BTreeMap<String, RawRelation>>,
    #[serde(default)]
    peers: Option<BTreeMap<String, RawRelation>>,
    #[serde(default)]
    extra_bindings: Option<BTreeMap<String, serde::de::IgnoredAny>>,
}

/// Parsed charm metadata plus config schema
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CharmMeta {
    pub name: String,
    pub subordinate: bool,
    pub provides: BTreeMap<String, RelationMeta>,
    pub requires: BTreeMap<String, RelationMeta>,
    pub peers: BTreeMap<String, RelationMeta>,
    pub extra_bindings: BTreeSet<String>,
    pub config: ConfigSchema,
}

impl CharmMeta {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Parse a `metadata.yaml` document
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let raw: RawMeta = serde_yaml::from_str(yaml).map_err(|e| CharmError::CharmMetadataInvalid {
            message: e.to_string(),
        })?;

        let mut meta = Self::new(raw.name);
        meta.subordinate = raw.subordinate;
        meta.provides = convert_relations(raw.provides, Role::Provider);
        meta.requires = convert_relations(raw.requires, Role::Requirer);
        meta.peers = convert_relations(raw.peers, Role::Peer);
        meta.extra_bindings = raw
            .extra_bindings
            .unwrap_or_default()
            .into_keys()
            .collect();
        meta.check()?;
        Ok(meta)
    }

    /// Load `metadata.yaml` and, when present, `config.yaml` from a charm directory
    pub fn from_dir(dir: &Path) -> Result<Self> {
        let metadata_path = dir.join("metadata.yaml");
        let metadata = std::fs::read_to_string(&metadata_path).map_err(|e| {
            CharmError::FileReadFailed {
                path: metadata_path.display().to_string(),
                reason: e.to_string(),
            }
        })?;
        let mut meta = Self::from_yaml(&metadata)?;

        let config_path = dir.join("config.yaml");
        if config_path.is_file() {
            let config =
                std::fs::read_to_string(&config_path).map_err(|e| CharmError::FileReadFailed {
                    path: config_path.display().to_string(),
                    reason: e.to_string(),
                })?;
            meta.config = ConfigSchema::from_yaml(&config)?;
        }
        tracing::debug!(charm = %meta.name, dir = %dir.display(), "loaded charm metadata");
        Ok(meta)
    }

    pub fn with_relation(mut self, relation: RelationMeta) -> Self {
        let map = match relation.role {
            Role::Provider => &mut self.provides,
            Role::Requirer => &mut self.requires,
            Role::Peer => &mut self.peers,
        };
        map.insert(relation.name.clone(), relation);
        self
    }

    pub fn with_extra_binding(mut self, name: impl Into<String>) -> Self {
        self.extra_bindings.insert(name.into());
        self
    }

    pub fn with_config(mut self, config: ConfigSchema) -> Self {
        self.config = config;
        self
    }

    pub fn subordinate(mut self, subordinate: bool) -> Self {
        self.subordinate = subordinate;
        self
    }

    fn check(&self) -> Result<()> {
        let invalid = |message: String| Err(CharmError::CharmMetadataInvalid { message });

        if self.name.is_empty() {
            return invalid("charm name cannot be empty".to_string());
        }

        let mut seen = BTreeSet::new();
        for rel in self.all_declared() {
            if !is_valid_relation_name(&rel.name) {
                return invalid(format!("relation name {:?} is not valid", rel.name));
            }
            if rel.interface.is_empty() {
                return invalid(format!("relation {:?} has no interface", rel.name));
            }
            if rel.role != Role::Requirer
                && (rel.name.starts_with(RESERVED_PREFIX)
                    || rel.interface.starts_with(RESERVED_PREFIX))
            {
                return invalid(format!(
                    "charm {:?} using a reserved {} relation name or interface: {:?}",
                    self.name, rel.role, rel.name
                ));
            }
            if !seen.insert(rel.name.as_str()) {
                return invalid(format!("relation {:?} is declared more than once", rel.name));
            }
        }

        if self.subordinate
            && !self
                .requires
                .values()
                .any(|rel| rel.scope == Scope::Container)
        {
            return invalid(format!(
                "subordinate charm {:?} lacks a \"requires\" relation with container scope",
                self.name
            ));
        }
        Ok(())
    }

    fn all_declared(&self) -> impl Iterator<Item = &RelationMeta> {
        self.provides
            .values()
            .chain(self.requires.values())
            .chain(self.peers.values())
    }
}

fn convert_relations(
    raw: Option<BTreeMap<String, RawRelation>>,
    role: Role,
) -> BTreeMap<String, RelationMeta> {
    raw
        .unwrap_or_default()
        .into_iter()
        .map(|(name, raw)| {
            let mut rel = match raw {
                RawRelation::Interface(interface) => RelationMeta::new(name.clone(), interface, role),
                RawRelation::Detailed {
                    interface,
                    scope,
                    limit,
                    optional,
                } => RelationMeta {
                    name: name.clone(),
                    interface,
                    role,
                    scope,
                    limit,
                    optional,
                },
            };
            // Peers are always global
            if role == Role::Peer {
                rel.scope = Scope::Global;
            }
            (name, rel)
        })
        .collect()
}

impl CharmCapabilities for CharmMeta {
    fn provides(&self) -> &BTreeMap<String, RelationMeta> {
        &self.provides
    }

    fn requires(&self) -> &BTreeMap<String, RelationMeta> {
        &self.requires
    }

    fn peers(&self) -> &BTreeMap<String, RelationMeta> {
        &self.peers
    }

    fn extra_bindings(&self) -> &BTreeSet<String> {
        &self.extra_bindings
    }

    fn is_subordinate(&self) -> bool {
        self.subordinate
    }

    fn config(&self) -> &ConfigSchema {
        &self.config
    }
}
