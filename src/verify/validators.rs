//! Constraint, storage and device validators
//!
//! The verifier does not know the constraint language of any particular
//! cloud; callers hand it three validator functions. [`Validators::basic`]
//! provides a reasonable default for tooling, and [`Validators::permissive`]
//! accepts everything.

use std::fmt;

/// Error returned by a validator; only its message is reported
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

type ValidateFn = Box<dyn Fn(&str) -> std::result::Result<(), BoxError> + Send + Sync>;

/// Constraint keys understood by [`Validators::basic`]
pub const CONSTRAINT_KEYS: &[&str] = &[
    "allocate-public-ip",
    "arch",
    "container",
    "cores",
    "cpu-power",
    "image-id",
    "instance-role",
    "instance-type",
    "mem",
    "root-disk",
    "root-disk-source",
    "spaces",
    "tags",
    "virt-type",
    "zones",
];

/// The three validators consulted during verification
pub struct Validators {
    constraints: ValidateFn,
    storage: ValidateFn,
    devices: ValidateFn,
}

impl Validators {
    /// Build from three validator functions
    pub fn new<C, S, D>(constraints: C, storage: S, devices: D) -> Self
    where
        C: Fn(&str) -> std::result::Result<(), BoxError> + Send + Sync + 'static,
        S: Fn(&str) -> std::result::Result<(), BoxError> + Send + Sync + 'static,
        D: Fn(&str) -> std::result::Result<(), BoxError> + Send + Sync + 'static,
    {
        Self {
            constraints: Box::new(constraints),
            storage: Box::new(storage),
            devices: Box::new(devices),
        }
    }

    /// Validators that accept every value
    pub fn permissive() -> Self {
        Self::new(|_| Ok(()), |_| Ok(()), |_| Ok(()))
    }

    /// Syntax-only validators for constraints, storage and device directives
    pub fn basic() -> Self {
        Self::new(
            basic_constraints,
            basic_storage_directive,
            basic_device_directive,
        )
    }

    pub fn with_constraints<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) -> std::result::Result<(), BoxError> + Send + Sync + 'static,
    {
        self.constraints = Box::new(f);
        self
    }

    pub fn with_storage<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) -> std::result::Result<(), BoxError> + Send + Sync + 'static,
    {
        self.storage = Box::new(f);
        self
    }

    pub fn with_devices<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) -> std::result::Result<(), BoxError> + Send + Sync + 'static,
    {
        self.devices = Box::new(f);
        self
    }

    pub fn validate_constraints(&self, constraints: &str) -> std::result::Result<(), BoxError> {
        (self.constraints)(constraints)
    }

    pub fn validate_storage(&self, storage: &str) -> std::result::Result<(), BoxError> {
        (self.storage)(storage)
    }

    pub fn validate_devices(&self, devices: &str) -> std::result::Result<(), BoxError> {
        (self.devices)(devices)
    }
}

impl Default for Validators {
    fn default() -> Self {
        Self::permissive()
    }
}

impl fmt::Debug for Validators {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validators").finish_non_exhaustive()
    }
}

/// `key=value` pairs separated by spaces, with known keys, each at most once
pub fn basic_constraints(constraints: &str) -> std::result::Result<(), BoxError> {
    let mut seen = Vec::new();
    for item in constraints.split_whitespace() {
        let Some((key, _value)) = item.split_once('=') else {
            return Err(format!("malformed constraint {item:?}").into());
        };
        if !CONSTRAINT_KEYS.contains(&key) {
            return Err(format!("unknown constraint {key:?}").into());
        }
        if seen.contains(&key) {
            return Err(format!("constraint {key:?} given more than once").into());
        }
        seen.push(key);
    }
    Ok(())
}

/// Storage directives: `[pool,][count,][size]`, e.g. `ebs,10G,2` or `3`
pub fn basic_storage_directive(directive: &str) -> std::result::Result<(), BoxError> {
    if directive.trim().is_empty() {
        return Err("storage directive is empty".into());
    }
    let mut count_seen = false;
    let mut size_seen = false;
    for (i, field) in directive.split(',').enumerate() {
        let field = field.trim();
        if field.is_empty() {
            return Err(format!("empty field in storage directive {directive:?}").into());
        }
        if field.bytes().all(|b| b.is_ascii_digit()) {
            if count_seen {
                return Err(format!("storage count given more than once in {directive:?}").into());
            }
            count_seen = true;
        } else if is_size(field) {
            if size_seen {
                return Err(format!("storage size given more than once in {directive:?}").into());
            }
            size_seen = true;
        } else if i != 0 {
            return Err(format!("unrecognized storage field {field:?}; the pool must come first").into());
        }
    }
    Ok(())
}

/// Device directives: `[count,]type[,attributes]`, e.g. `nvidia.com/gpu` or `2,nvidia.com/gpu`
pub fn basic_device_directive(directive: &str) -> std::result::Result<(), BoxError> {
    let mut fields = directive.split(',').map(str::trim);
    let first = fields.next().unwrap_or_default();
    let device_type = if first.bytes().all(|b| b.is_ascii_digit()) && !first.is_empty() {
        fields.next().unwrap_or_default()
    } else {
        first
    };
    if device_type.is_empty() {
        return Err(format!("device directive {directive:?} does not name a device type").into());
    }
    if device_type.contains(char::is_whitespace) {
        return Err(format!("device type {device_type:?} contains whitespace").into());
    }
    Ok(())
}

/// `10G`, `512M`, `1.5T`
fn is_size(field: &str) -> bool {
    let Some(number) = field.strip_suffix(['M', 'G', 'T', 'P', 'E']) else {
        return false;
    };
    !number.is_empty()
        && number.parse::<f64>().is_ok_and(|n| n >= 0.0)
        && !number.starts_with('-')
}
