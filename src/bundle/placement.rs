//! Unit placement directives
//!
//! The `to` list of an application holds one directive per unit:
//!
//! - `new` / `lxd:new` - a new machine, optionally inside a new container
//! - `3` / `lxd:3` - an existing bundle machine, optionally in a container
//! - `mysql` / `lxd:mysql/1` - next to a unit of another application

use std::fmt;
use std::str::FromStr;

use crate::common::names::{is_number, is_valid_application_name};
use crate::error::{CharmError, Result};

/// Machine value used for "a new machine"
pub const NEW_MACHINE: &str = "new";

/// What a placement directive points at
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlacementTarget {
    /// A bundle machine id, or [`NEW_MACHINE`]
    Machine(String),
    /// A unit of another application; `unit` is `None` when unspecified
    Application { name: String, unit: Option<u32> },
}

/// Parsed form of a placement directive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitPlacement {
    /// Container type prefix (`lxd`, `kvm`, ...); not validated here
    pub container_type: Option<String>,
    pub target: PlacementTarget,
}

impl UnitPlacement {
    /// Parse a placement directive.
    ///
    /// Grammar: `[container:](number | new | application[/number])`. The
    /// container type is any run of lowercase alphanumerics; whether it is a
    /// supported type is decided by the verifier.
    pub fn parse(directive: &str) -> Result<Self> {
        let invalid = || CharmError::InvalidPlacement {
            placement: directive.to_string(),
        };

        let (container_type, rest) = match directive.split_once(':') {
            Some((container, rest)) => {
                let valid = !container.is_empty()
                    && container
                        .chars()
                        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit());
                if !valid {
                    return Err(invalid());
                }
                (Some(container.to_string()), rest)
            }
            None => (None, directive),
        };

        let target = if is_number(rest) || rest == NEW_MACHINE {
            PlacementTarget::Machine(rest.to_string())
        } else {
            let (name, unit) = match rest.split_once('/') {
                Some((name, unit)) if is_number(unit) => {
                    let unit = unit.parse::<u32>().map_err(|_| invalid())?;
                    (name, Some(unit))
                }
                Some(_) => return Err(invalid()),
                None => (rest, None),
            };
            // "new" cannot carry a unit index
            if name == NEW_MACHINE || !is_valid_application_name(name) {
                return Err(invalid());
            }
            PlacementTarget::Application {
                name: name.to_string(),
                unit,
            }
        };

        Ok(Self {
            container_type,
            target,
        })
    }

    /// Target machine id, if this directive points at a machine
    pub fn machine(&self) -> Option<&str> {
        match &self.target {
            PlacementTarget::Machine(id) => Some(id),
            PlacementTarget::Application { .. } => None,
        }
    }

    /// Target application name, if this directive points at a unit
    pub fn application(&self) -> Option<&str> {
        match &self.target {
            PlacementTarget::Application { name, .. } => Some(name),
            PlacementTarget::Machine(_) => None,
        }
    }

    /// Target unit index, if one was given
    pub fn unit(&self) -> Option<u32> {
        match &self.target {
            PlacementTarget::Application { unit, .. } => *unit,
            PlacementTarget::Machine(_) => None,
        }
    }

    pub fn is_new_machine(&self) -> bool {
        self.machine() == Some(NEW_MACHINE)
    }
}

impl FromStr for UnitPlacement {
    type Err = CharmError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for UnitPlacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(container) = &self.container_type {
            write!(f, "{container}:")?;
        }
        match &self.target {
            PlacementTarget::Machine(id) => f.write_str(id),
            PlacementTarget::Application { name, unit: None } => f.write_str(name),
            PlacementTarget::Application {
                name,
                unit: Some(unit),
            } => write!(f, "{name}/{unit}"),
        }
    }
}
