//! Serialization implementations for BundleData
//!
//! Parsing goes through [`BundleDocument`], which keeps the `applications`
//! and legacy `services` sections apart so the conversion into
//! [`BundleData`](super::BundleData) can reject documents that use both.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serializer};

use super::relation::RawRelation;
use super::{ApplicationSpec, BundleData, MachineSpec};

macro_rules! serialize_optional_field {
    ($state:expr, $name:expr, $value:expr) => {
        if let Some(val) = $value {
            $state.serialize_field($name, val)?;
        }
    };
}

/// Serialize BundleData in canonical key order, omitting empty sections
pub fn serialize_bundle_data<S>(
    bundle: &BundleData,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let optional_count = [
        bundle.series.is_some(),
        bundle.base.is_some(),
        !bundle.description.is_empty(),
        !bundle.tags.is_empty(),
        !bundle.machines.is_empty(),
        !bundle.relations.is_empty(),
    ]
    .into_iter()
    .filter(|present| *present)
    .count();

    let mut state = serializer.serialize_struct("BundleData", 1 + optional_count)?;

    if !bundle.description.is_empty() {
        state.serialize_field("description", &bundle.description)?;
    }
    serialize_optional_field!(state, "series", &bundle.series);
    serialize_optional_field!(state, "base", &bundle.base);
    state.serialize_field("applications", &bundle.applications)?;
    if !bundle.machines.is_empty() {
        state.serialize_field("machines", &bundle.machines)?;
    }
    if !bundle.relations.is_empty() {
        state.serialize_field("relations", &bundle.relations)?;
    }
    if !bundle.tags.is_empty() {
        state.serialize_field("tags", &bundle.tags)?;
    }
    state.end()
}

/// Raw top-level sections of a bundle document
#[derive(Debug, Default)]
pub struct BundleDocument {
    pub series: Option<String>,
    pub base: Option<String>,
    pub applications: Option<BTreeMap<String, ApplicationSpec>>,
    pub services: Option<BTreeMap<String, ApplicationSpec>>,
    pub machines: BTreeMap<String, MachineSpec>,
    pub relations: Vec<Vec<String>>,
    pub tags: Vec<String>,
    pub description: String,
}

impl<'de> Deserialize<'de> for BundleDocument {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct BundleDocumentVisitor;

        impl<'de> Visitor<'de> for BundleDocumentVisitor {
            type Value = BundleDocument;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a bundle mapping")
            }

            fn visit_map<M>(self, mut map: M) -> std::result::Result<BundleDocument, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut document = BundleDocument::default();

                while let Some(key) = map.next_key::<String>()? {
                    match key.as_str() {
                        "series" => document.series = map.next_value()?,
                        "base" | "default-base" => document.base = map.next_value()?,
                        "applications" => {
                            document.applications = Some(map.next_value::<Applications>()?.0);
                        }
                        "services" => {
                            document.services = Some(map.next_value::<Applications>()?.0);
                        }
                        "machines" => document.machines = map.next_value::<Machines>()?.0,
                        "relations" => {
                            let raw: Option<Vec<RawRelation>> = map.next_value()?;
                            let raw = raw.unwrap_or_default();
                            if raw.iter().any(RawRelation::has_empty_list) {
                                return Err(de::Error::custom(
                                    "relation entry has an empty endpoint list",
                                ));
                            }
                            document.relations =
                                raw.into_iter().flat_map(RawRelation::expand).collect();
                        }
                        "tags" => document.tags = map.next_value::<Option<_>>()?.unwrap_or_default(),
                        "description" => {
                            document.description =
                                map.next_value::<Option<_>>()?.unwrap_or_default();
                        }
                        _ => {
                            // Sections this model does not carry (bundle type, saas, ...)
                            let _: de::IgnoredAny = map.next_value()?;
                        }
                    }
                }

                Ok(document)
            }
        }

        deserializer.deserialize_map(BundleDocumentVisitor)
    }
}

/// A scalar read as text; YAML often leaves ids and annotation values unquoted
struct ScalarText(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Str(String),
}

impl<'de> Deserialize<'de> for ScalarText {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = match Scalar::deserialize(deserializer)
            .map_err(|_| de::Error::custom("expected a string or number"))?
        {
            Scalar::Bool(b) => b.to_string(),
            Scalar::Int(n) => n.to_string(),
            Scalar::UInt(n) => n.to_string(),
            // Debug keeps the fractional part, so `1.0` stays "1.0"
            Scalar::Float(x) => format!("{x:?}"),
            Scalar::Str(s) => s,
        };
        Ok(ScalarText(text))
    }
}

/// Applications keyed by name; an empty section reads as no applications
struct Applications(BTreeMap<String, ApplicationSpec>);

impl<'de> Deserialize<'de> for Applications {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ApplicationsVisitor;

        impl<'de> Visitor<'de> for ApplicationsVisitor {
            type Value = Applications;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a mapping of application names to applications")
            }

            fn visit_unit<E>(self) -> std::result::Result<Applications, E>
            where
                E: de::Error,
            {
                Ok(Applications(BTreeMap::new()))
            }

            fn visit_map<M>(self, mut map: M) -> std::result::Result<Applications, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut applications = BTreeMap::new();
                while let Some((name, spec)) = map.next_entry::<String, ApplicationSpec>()? {
                    if applications.contains_key(&name) {
                        return Err(de::Error::custom(format!(
                            "duplicate application name {name:?}"
                        )));
                    }
                    applications.insert(name, spec);
                }
                Ok(Applications(applications))
            }
        }

        deserializer.deserialize_any(ApplicationsVisitor)
    }
}

/// Machines keyed by id; ids may be written as integers and bodies may be empty
struct Machines(BTreeMap<String, MachineSpec>);

impl<'de> Deserialize<'de> for Machines {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct MachinesVisitor;

        impl<'de> Visitor<'de> for MachinesVisitor {
            type Value = Machines;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a mapping of machine ids to machines")
            }

            fn visit_unit<E>(self) -> std::result::Result<Machines, E>
            where
                E: de::Error,
            {
                Ok(Machines(BTreeMap::new()))
            }

            fn visit_map<M>(self, mut map: M) -> std::result::Result<Machines, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut machines = BTreeMap::new();
                while let Some((ScalarText(id), spec)) =
                    map.next_entry::<ScalarText, Option<MachineSpec>>()?
                {
                    if machines.contains_key(&id) {
                        return Err(de::Error::custom(format!("duplicate machine id {id:?}")));
                    }
                    machines.insert(id, spec.unwrap_or_default());
                }
                Ok(Machines(machines))
            }
        }

        deserializer.deserialize_any(MachinesVisitor)
    }
}

/// Deserialize a string map whose values may be any scalar
pub fn string_map<'de, D>(deserializer: D) -> std::result::Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<BTreeMap<String, ScalarText>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(|(key, ScalarText(value))| (key, value))
        .collect())
}

/// Deserialize a list of strings; a single scalar counts as a one-element list
pub fn string_list<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        Many(Vec<ScalarText>),
        One(ScalarText),
    }

    let raw: Option<OneOrMany> = Option::deserialize(deserializer)?;
    Ok(match raw {
        None => Vec::new(),
        Some(OneOrMany::One(ScalarText(value))) => vec![value],
        Some(OneOrMany::Many(values)) => values.into_iter().map(|ScalarText(v)| v).collect(),
    })
}
