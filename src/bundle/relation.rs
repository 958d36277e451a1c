//! Relation entries and their endpoints

use std::fmt;

use serde::Deserialize;

use crate::common::names::is_valid_relation_name;
use crate::error::{CharmError, Result};

/// One side of a relation: `application[:relation]`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Endpoint {
    pub application: String,
    pub relation: Option<String>,
}

impl Endpoint {
    pub fn new(application: impl Into<String>, relation: Option<&str>) -> Self {
        Self {
            application: application.into(),
            relation: relation.map(str::to_string),
        }
    }

    /// Parse an endpoint specifier; at most one `:` is allowed and both parts
    /// must be non-empty when present.
    pub fn parse(spec: &str) -> Result<Self> {
        let invalid = || CharmError::InvalidEndpoint {
            endpoint: spec.to_string(),
        };
        let (application, relation) = match spec.split_once(':') {
            Some((app, rel)) => {
                if !is_valid_relation_name(rel) {
                    return Err(invalid());
                }
                (app, Some(rel))
            }
            None => (spec, None),
        };
        if application.is_empty() || application.chars().any(char::is_whitespace) {
            return Err(invalid());
        }
        Ok(Self::new(application, relation))
    }

    /// Same application with the relation name filled in
    pub fn with_relation(&self, relation: &str) -> Self {
        Self::new(self.application.clone(), Some(relation))
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.relation {
            Some(rel) => write!(f, "{}:{rel}", self.application),
            None => f.write_str(&self.application),
        }
    }
}

/// A relation entry as written in the document, before fan-out
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub(crate) struct RawRelation(Vec<RawRelationItem>);

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum RawRelationItem {
    One(String),
    Many(Vec<String>),
}

impl RawRelation {
    /// A nested list with no endpoints would expand to nothing
    pub(crate) fn has_empty_list(&self) -> bool {
        self.0
            .iter()
            .any(|item| matches!(item, RawRelationItem::Many(endpoints) if endpoints.is_empty()))
    }

    /// Expand nested lists into one entry per combination:
    /// `[a, [b, c]]` becomes `[a, b]` and `[a, c]`.
    pub(crate) fn expand(self) -> Vec<Vec<String>> {
        let mut expanded: Vec<Vec<String>> = vec![Vec::new()];
        for item in self.0 {
            let choices = match item {
                RawRelationItem::One(endpoint) => vec![endpoint],
                RawRelationItem::Many(endpoints) => endpoints,
            };
            expanded = expanded
                .into_iter()
                .flat_map(|prefix| {
                    choices.iter().map(move |choice| {
                        let mut entry = prefix.clone();
                        entry.push(choice.clone());
                        entry
                    })
                })
                .collect();
        }
        expanded
    }
}
