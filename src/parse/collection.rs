//! Comma separated sequences and optional values

use super::{FromArg, ValueKind};
use crate::error::IncorrectType;

impl<T: FromArg> FromArg for Vec<T> {
    fn type_name() -> String {
        format!("Vec<{}>", T::type_name())
    }

    /// Empty input is an empty sequence. A single trailing comma is ignored.
    fn from_arg(text: &str) -> Result<Self, IncorrectType> {
        if text.is_empty() {
            return Ok(Vec::new());
        }
        let body = text.strip_suffix(',').unwrap_or(text);
        body.split(',').map(T::from_arg).collect()
    }

    /// One token is comma split; several tokens are one element each
    fn from_tokens(tokens: &[&str]) -> Result<Self, IncorrectType> {
        match tokens {
            [single] => Self::from_arg(single),
            _ => tokens.iter().map(|token| T::from_arg(token)).collect(),
        }
    }

    fn render(&self) -> String {
        self.iter().map(FromArg::render).collect::<Vec<_>>().join(",")
    }

    fn kind() -> ValueKind {
        ValueKind::Sequence
    }
}

impl<T: FromArg> FromArg for Option<T> {
    fn type_name() -> String {
        format!("Option<{}>", T::type_name())
    }

    fn from_arg(text: &str) -> Result<Self, IncorrectType> {
        if text.is_empty() {
            return Ok(None);
        }
        T::from_arg(text).map(Some)
    }

    fn from_tokens(tokens: &[&str]) -> Result<Self, IncorrectType> {
        if tokens.is_empty() {
            return Ok(None);
        }
        T::from_tokens(tokens).map(Some)
    }

    fn render(&self) -> String {
        self.as_ref().map(FromArg::render).unwrap_or_default()
    }
}
