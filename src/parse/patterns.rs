//! Token patterns, compiled once per process

use regex::Regex;
use std::sync::LazyLock;

pub(crate) static TRUTHY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:t|true|1)$").expect("static regex must compile"));

pub(crate) static FALSY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:f|false|0)$").expect("static regex must compile"));

/// A leading module path segment such as `core::net::`
pub(crate) static MODULE_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Za-z_][A-Za-z0-9_]*::").expect("static regex must compile")
});

/// Optional sign, optional base prefix, then the digits
///
/// A lone `0` matches with no prefix and is read as decimal zero.
pub(crate) static INTEGER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(-)?(0[xX]|0b|0)?([0-9a-zA-Z]+)$").expect("static regex must compile")
});
