//! Name grammars shared by the bundle model, placement parser and verifier.
//!
//! All grammars are lowercase ASCII. Each check is a plain predicate so the
//! verifier can decide how a mismatch is reported.

fn is_lower_alnum(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit()
}

fn starts_with_lower(s: &str) -> bool {
    s.chars().next().is_some_and(|c| c.is_ascii_lowercase())
}

/// Non-negative integer literal without leading zeros (`0`, `7`, `42`)
pub fn is_number(s: &str) -> bool {
    match s.as_bytes() {
        [] => false,
        [b'0'] => true,
        [b'0', ..] => false,
        bytes => bytes.iter().all(u8::is_ascii_digit),
    }
}

/// Series names: lowercase letters, optionally followed by letters or digits
/// (`focal`, `win2012r2`)
pub fn is_valid_series(s: &str) -> bool {
    starts_with_lower(s) && s.chars().all(is_lower_alnum)
}

/// Bases are written `name@channel`, e.g. `ubuntu@22.04` or `ubuntu@22.04/stable`
pub fn is_valid_base(s: &str) -> bool {
    let Some((name, channel)) = s.split_once('@') else {
        return false;
    };
    is_valid_series(name)
        && !channel.is_empty()
        && channel
            .chars()
            .all(|c| is_lower_alnum(c) || matches!(c, '.' | '/' | '-'))
}

/// Application names: hyphen-separated lowercase segments, the first starting
/// with a letter and every later one containing at least one letter
/// (`mysql`, `wordpress-2`, `k8s-worker`)
pub fn is_valid_application_name(s: &str) -> bool {
    let mut segments = s.split('-');
    let first_ok = segments
        .next()
        .is_some_and(|first| starts_with_lower(first) && first.chars().all(is_lower_alnum));
    first_ok
        && segments.all(|seg| {
            !seg.is_empty()
                && seg.chars().all(is_lower_alnum)
                && seg.chars().any(|c| c.is_ascii_lowercase())
        })
}

/// Storage and device names: a lowercase letter followed by lowercase
/// alphanumerics, with single hyphens between segments. Underscores are not
/// accepted.
pub fn is_valid_storage_name(s: &str) -> bool {
    let mut segments = s.split('-');
    let first_ok = segments
        .next()
        .is_some_and(|first| starts_with_lower(first) && first.chars().all(is_lower_alnum));
    first_ok && segments.all(|seg| !seg.is_empty() && seg.chars().all(is_lower_alnum))
}

/// Relation names: a lowercase letter followed by lowercase alphanumerics,
/// `-` or `_`
pub fn is_valid_relation_name(s: &str) -> bool {
    starts_with_lower(s) && s.chars().all(|c| is_lower_alnum(c) || matches!(c, '-' | '_'))
}

/// Machine ids: a plain number, the only form a placement directive can
/// reference
pub fn is_valid_machine_id(s: &str) -> bool {
    is_number(s)
}

/// Container types accepted in placement directives
pub const CONTAINER_TYPES: &[&str] = &["lxd", "kvm", "lxc"];

/// Container type still accepted but deployed as `lxd`
pub const DEPRECATED_CONTAINER_TYPE: &str = "lxc";

pub fn is_valid_container_type(s: &str) -> bool {
    CONTAINER_TYPES.contains(&s)
}
