//! Charm identifiers
//!
//! Supported formats:
//! - `mysql` - bare name, resolved from Charmhub
//! - `ch:mysql` / `ch:focal/mysql-12` - Charmhub
//! - `cs:~user/focal/mysql-12` - legacy charm store, optionally user-owned
//! - `local:focal/mysql` - a charm deployed from a local directory

use std::fmt;
use std::str::FromStr;

use crate::common::names::{is_number, is_valid_series};
use crate::error::{CharmError, Result};

/// Where a charm is resolved from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schema {
    Charmhub,
    CharmStore,
    Local,
}

impl Schema {
    pub fn prefix(self) -> &'static str {
        match self {
            Schema::Charmhub => "ch",
            Schema::CharmStore => "cs",
            Schema::Local => "local",
        }
    }
}

/// A parsed charm identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharmUrl {
    pub schema: Schema,
    pub user: Option<String>,
    pub series: Option<String>,
    pub name: String,
    pub revision: Option<u32>,
}

impl CharmUrl {
    /// Parse a charm identifier
    pub fn parse(input: &str) -> Result<Self> {
        let fail = |reason: &str| CharmError::InvalidCharmUrl {
            url: input.to_string(),
            reason: reason.to_string(),
        };

        if input.is_empty() {
            return Err(fail("charm URL is empty"));
        }
        if is_local_path(input) {
            return Err(fail("local charm paths are only accepted when verifying locally"));
        }

        let (schema, rest) = match input.split_once(':') {
            Some(("ch", rest)) => (Schema::Charmhub, rest),
            Some(("cs", rest)) => (Schema::CharmStore, rest),
            Some(("local", rest)) => (Schema::Local, rest),
            Some((other, _)) => {
                return Err(fail(&format!("schema {other:?} not valid")));
            }
            None => (Schema::Charmhub, input),
        };

        let mut parts: Vec<&str> = rest.split('/').collect();

        let user = match parts.first() {
            Some(first) if first.starts_with('~') => {
                if schema != Schema::CharmStore {
                    return Err(fail("only charm store URLs may name a user"));
                }
                let user = &first[1..];
                if !is_valid_user(user) {
                    return Err(fail(&format!("user name {user:?} not valid")));
                }
                parts.remove(0);
                Some(user.to_string())
            }
            _ => None,
        };

        let (series, name_part) = match parts.as_slice() {
            [name] => (None, *name),
            [series, name] => {
                if !is_valid_series(series) {
                    return Err(fail(&format!("series name {series:?} not valid")));
                }
                (Some((*series).to_string()), *name)
            }
            _ => return Err(fail("too many path segments")),
        };

        let (name, revision) = split_revision(name_part);
        if !is_valid_charm_name(name) {
            return Err(fail(&format!("name {name:?} not valid")));
        }
        let revision = revision
            .map(|rev| rev.parse::<u32>().map_err(|_| fail("revision out of range")))
            .transpose()?;

        Ok(Self {
            schema,
            user,
            series,
            name: name.to_string(),
            revision,
        })
    }
}

impl FromStr for CharmUrl {
    type Err = CharmError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for CharmUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.schema.prefix())?;
        if let Some(user) = &self.user {
            write!(f, "~{user}/")?;
        }
        if let Some(series) = &self.series {
            write!(f, "{series}/")?;
        }
        f.write_str(&self.name)?;
        if let Some(revision) = self.revision {
            write!(f, "-{revision}")?;
        }
        Ok(())
    }
}

/// Whether a charm reference is a filesystem path rather than an identifier
pub fn is_local_path(charm: &str) -> bool {
    charm.starts_with('.') || charm.starts_with('/')
}

/// `name-12` splits into `name` and `12`; names may themselves contain hyphens
fn split_revision(s: &str) -> (&str, Option<&str>) {
    match s.rsplit_once('-') {
        Some((name, rev)) if !rev.is_empty() && rev.bytes().all(|b| b.is_ascii_digit()) => {
            if is_number(rev) {
                (name, Some(rev))
            } else {
                // leading zero: not a revision, and not a valid name segment either
                (s, None)
            }
        }
        _ => (s, None),
    }
}

/// Charm names: lowercase alphanumerics in hyphen-separated segments, each
/// segment after the first containing a letter
fn is_valid_charm_name(s: &str) -> bool {
    crate::common::names::is_valid_application_name(s)
}

fn is_valid_user(s: &str) -> bool {
    s.chars()
        .next()
        .is_some_and(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        && s.len() > 1
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '.' | '-'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_name() {
        let url = CharmUrl::parse("mysql").unwrap();
        assert_eq!(url.schema, Schema::Charmhub);
        assert_eq!(url.name, "mysql");
        assert_eq!(url.series, None);
        assert_eq!(url.revision, None);
        assert_eq!(url.to_string(), "ch:mysql");
    }

    #[test]
    fn test_parse_full_charm_store_url() {
        let url = CharmUrl::parse("cs:~bob/trusty/wordpress-k8s-42").unwrap();
        assert_eq!(url.schema, Schema::CharmStore);
        assert_eq!(url.user.as_deref(), Some("bob"));
        assert_eq!(url.series.as_deref(), Some("trusty"));
        assert_eq!(url.name, "wordpress-k8s");
        assert_eq!(url.revision, Some(42));
        assert_eq!(url.to_string(), "cs:~bob/trusty/wordpress-k8s-42");
    }

    #[test]
    fn test_parse_local_schema() {
        let url = CharmUrl::parse("local:focal/dummy").unwrap();
        assert_eq!(url.schema, Schema::Local);
        assert_eq!(url.series.as_deref(), Some("focal"));
    }

    #[test]
    fn test_parse_invalid() {
        for input in [
            "",
            "bad:mysql",
            "cs:~/mysql",
            "ch:~bob/mysql",
            "cs:Trusty/mysql",
            "cs:a/b/c/d",
            "cs:focal/MySQL",
            "mysql-",
            "./local/path",
            "/abs/path",
            "mysql-99999999999",
        ] {
            assert!(CharmUrl::parse(input).is_err(), "{input:?} should not parse");
        }
    }

    #[test]
    fn test_is_local_path() {
        assert!(is_local_path("./mysql"));
        assert!(is_local_path("../charms/mysql"));
        assert!(is_local_path("/srv/charms/mysql"));
        assert!(!is_local_path("mysql"));
        assert!(!is_local_path("local:focal/mysql"));
    }
}
