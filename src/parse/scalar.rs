//! Parsers for booleans, characters, strings, and the `FromStr` fallback

use std::any::type_name;
use std::str::FromStr;

use super::patterns::{FALSY, MODULE_PATH, TRUTHY};
use super::{FromArg, ValueKind};
use crate::error::IncorrectType;

/// Name of `T` with module paths dropped, e.g. `Vec<Ipv4Addr>`
pub(crate) fn short_type_name<T: ?Sized>() -> String {
    MODULE_PATH.replace_all(type_name::<T>(), "").into_owned()
}

/// Parse any [`FromStr`] type, failing unless the whole token converts
pub fn parse_from_str<T: FromStr>(text: &str) -> Result<T, IncorrectType> {
    text.parse::<T>()
        .map_err(|_| IncorrectType::new(text, short_type_name::<T>()))
}

impl FromArg for bool {
    fn type_name() -> String {
        "bool".to_string()
    }

    fn from_arg(text: &str) -> Result<Self, IncorrectType> {
        if TRUTHY.is_match(text) {
            Ok(true)
        } else if FALSY.is_match(text) {
            Ok(false)
        } else {
            Err(IncorrectType::new(text, "bool"))
        }
    }

    fn render(&self) -> String {
        self.to_string()
    }

    fn kind() -> ValueKind {
        ValueKind::Switch
    }

    fn switch_values() -> Option<(Self, Self)> {
        Some((false, true))
    }
}

impl FromArg for char {
    fn type_name() -> String {
        "char".to_string()
    }

    fn from_arg(text: &str) -> Result<Self, IncorrectType> {
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => Err(IncorrectType::new(text, "char")),
        }
    }

    fn render(&self) -> String {
        self.to_string()
    }
}

impl FromArg for String {
    fn type_name() -> String {
        "String".to_string()
    }

    fn from_arg(text: &str) -> Result<Self, IncorrectType> {
        Ok(text.to_string())
    }

    fn render(&self) -> String {
        self.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse;

    #[test]
    fn test_bool() {
        assert!(parse::<bool>("true").unwrap());
        assert!(parse::<bool>("T").unwrap());
        assert!(parse::<bool>("1").unwrap());
        assert!(!parse::<bool>("0").unwrap());
        assert!(!parse::<bool>("False").unwrap());
        assert!(!parse::<bool>("f").unwrap());
    }

    #[test]
    fn test_bool_rejects_other_words() {
        assert_eq!(
            parse::<bool>("maybe"),
            Err(IncorrectType::new("maybe", "bool"))
        );
        assert!(parse::<bool>("hello world").is_err());
        assert!(parse::<bool>("").is_err());
    }

    #[test]
    fn test_char() {
        assert_eq!(parse::<char>("x").unwrap(), 'x');
        assert_eq!(parse::<char>("é").unwrap(), 'é');
        assert_eq!(parse::<char>(""), Err(IncorrectType::new("", "char")));
        assert!(parse::<char>("xy").is_err());
    }

    #[test]
    fn test_string_is_unchanged() {
        assert_eq!(parse::<String>("").unwrap(), "");
        assert_eq!(parse::<String>(" padded ").unwrap(), " padded ");
    }

    #[test]
    fn test_parse_from_str() {
        assert_eq!(parse_from_str::<u16>("42").unwrap(), 42);
        let err = parse_from_str::<u16>("42x").unwrap_err();
        assert_eq!(err.token, "42x");
        assert_eq!(err.type_name, "u16");

        let err = parse_from_str::<std::net::Ipv4Addr>("1.2.3").unwrap_err();
        assert_eq!(err.type_name, "Ipv4Addr");
    }

    #[test]
    fn test_short_type_name() {
        assert_eq!(short_type_name::<u8>(), "u8");
        assert_eq!(short_type_name::<std::path::PathBuf>(), "PathBuf");
        assert_eq!(short_type_name::<Vec<String>>(), "Vec<String>");
        assert_eq!(
            short_type_name::<Option<std::net::SocketAddr>>(),
            "Option<SocketAddr>"
        );
    }
}
