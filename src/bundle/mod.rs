//! Bundle descriptor data model
//!
//! A bundle describes a multi-application deployment: the applications to
//! deploy, the machines to place them on and the relations between them.
//!
//! ## Module Organization
//!
//! - `serialization.rs`: document parsing (legacy `services` alias, lenient
//!   scalar fields) and canonical output
//! - `placement.rs`: unit placement directive grammar
//! - `relation.rs`: relation endpoints and list-of-lists expansion
//! - `value.rs`: loosely-typed option and resource values

pub mod placement;
pub mod relation;
pub mod serialization;
pub mod value;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::bundle::serialization::{BundleDocument, serialize_bundle_data};
use crate::error::{CharmError, Result};

pub use placement::{PlacementTarget, UnitPlacement};
pub use relation::Endpoint;
pub use value::{OptionValue, ResourceRevision};

/// A parsed bundle descriptor
#[derive(Debug, Clone, Default)]
pub struct BundleData {
    /// Default series for applications and machines that do not set one
    pub series: Option<String>,

    /// Default base (`name@channel`) for applications and machines
    pub base: Option<String>,

    /// Applications keyed by application name
    pub applications: BTreeMap<String, ApplicationSpec>,

    /// Machines keyed by machine id
    pub machines: BTreeMap<String, MachineSpec>,

    /// Relation entries; each should hold exactly two endpoint specifiers
    pub relations: Vec<Vec<String>>,

    pub tags: Vec<String>,

    pub description: String,

    unmarshaled_with_services: bool,
}

/// One application of a bundle
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ApplicationSpec {
    /// Charm identifier, or a local path when verifying locally
    pub charm: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub series: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,

    /// `None` when the document does not say; distinct from an explicit 0
    #[serde(rename = "num_units", default, skip_serializing_if = "Option::is_none")]
    pub num_units: Option<i64>,

    /// Placement directives, one per unit
    #[serde(
        default,
        skip_serializing_if = "Vec::is_empty",
        deserialize_with = "serialization::string_list"
    )]
    pub to: Vec<String>,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub expose: bool,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub options: BTreeMap<String, OptionValue>,

    #[serde(
        default,
        skip_serializing_if = "BTreeMap::is_empty",
        deserialize_with = "serialization::string_map"
    )]
    pub annotations: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub constraints: String,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub storage: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub devices: BTreeMap<String, String>,

    /// Endpoint name to space name; the empty key sets the default space
    #[serde(rename = "bindings", default, skip_serializing_if = "BTreeMap::is_empty")]
    pub endpoint_bindings: BTreeMap<String, String>,

    /// Resource name to revision number or local path
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub resources: BTreeMap<String, OptionValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan: Option<String>,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub trust: bool,
}

impl ApplicationSpec {
    pub fn new(charm: impl Into<String>) -> Self {
        Self {
            charm: charm.into(),
            ..Self::default()
        }
    }

    /// Unit count used by placement checks; an unspecified count is 0
    pub fn unit_count(&self) -> i64 {
        self.num_units.unwrap_or(0)
    }
}

/// One machine of a bundle
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineSpec {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub constraints: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub series: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,

    #[serde(
        default,
        skip_serializing_if = "BTreeMap::is_empty",
        deserialize_with = "serialization::string_map"
    )]
    pub annotations: BTreeMap<String, String>,
}

// The legacy-section flag is parse metadata, not bundle content.
impl PartialEq for BundleData {
    fn eq(&self, other: &Self) -> bool {
        self.series == other.series
            && self.base == other.base
            && self.applications == other.applications
            && self.machines == other.machines
            && self.relations == other.relations
            && self.tags == other.tags
            && self.description == other.description
    }
}

impl Serialize for BundleData {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serialize_bundle_data(self, serializer)
    }
}

impl<'de> Deserialize<'de> for BundleData {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let document = BundleDocument::deserialize(deserializer)?;
        Self::try_from(document).map_err(serde::de::Error::custom)
    }
}

impl TryFrom<BundleDocument> for BundleData {
    type Error = CharmError;

    fn try_from(document: BundleDocument) -> Result<Self> {
        let (applications, unmarshaled_with_services) =
            match (document.applications, document.services) {
                (Some(_), Some(_)) => return Err(CharmError::ConflictingSections),
                (Some(applications), None) => (applications, false),
                (None, Some(services)) => (services, true),
                (None, None) => (BTreeMap::new(), false),
            };

        if applications.contains_key("") {
            return Err(CharmError::InvalidBundle {
                message: "application name cannot be empty".to_string(),
            });
        }

        Ok(Self {
            series: document.series,
            base: document.base,
            applications,
            machines: document.machines,
            relations: document.relations,
            tags: document.tags,
            description: document.description,
            unmarshaled_with_services,
        })
    }
}

impl BundleData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a bundle from YAML
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let document: BundleDocument = serde_yaml::from_str(yaml)?;
        let bundle = Self::try_from(document)?;
        tracing::debug!(
            applications = bundle.applications.len(),
            machines = bundle.machines.len(),
            relations = bundle.relations.len(),
            "parsed bundle"
        );
        Ok(bundle)
    }

    /// Serialize the bundle to YAML
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Parse a bundle from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let document: BundleDocument = serde_json::from_str(json)?;
        Self::try_from(document)
    }

    /// Serialize the bundle to pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Whether the document used the legacy `services` section
    pub fn unmarshaled_with_services(&self) -> bool {
        self.unmarshaled_with_services
    }

    /// Forget that the legacy `services` section was used
    pub fn clear_unmarshaled_with_services(&mut self) {
        self.unmarshaled_with_services = false;
    }

    /// Add an application, replacing any with the same name
    pub fn add_application(&mut self, name: impl Into<String>, spec: ApplicationSpec) {
        self.applications.insert(name.into(), spec);
    }

    /// Add a relation between two endpoint specifiers
    pub fn add_relation(&mut self, a: impl Into<String>, b: impl Into<String>) {
        self.relations.push(vec![a.into(), b.into()]);
    }
}
