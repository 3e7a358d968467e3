//! Conversion of raw tokens into typed values
//!
//! Every type that can be the target of an argument implements [`FromArg`].
//! Scalars (`bool`, integers of every width, `char`, `String`) have
//! hand-written parsers; other standard types go through their [`FromStr`]
//! implementation. `Vec<T>` splits on commas and `Option<T>` maps empty input
//! to `None`.
//!
//! ```
//! use argparse::parse::parse;
//!
//! assert_eq!(parse::<u8>("0xff").unwrap(), 255);
//! assert_eq!(parse::<Vec<i32>>("1,2,3").unwrap(), vec![1, 2, 3]);
//! assert_eq!(parse::<Option<i32>>("").unwrap(), None);
//! assert!(parse::<bool>("maybe").is_err());
//! ```

mod collection;
mod integer;
mod patterns;
mod scalar;

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::path::PathBuf;

use crate::error::IncorrectType;

pub use scalar::parse_from_str;

/// How an argument of a given type consumes tokens by default
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Takes no token; presence alone sets the value
    Switch,
    /// Takes exactly one token
    Single,
    /// Takes one or more tokens
    Sequence,
}

/// A type that can be parsed from a single raw token
pub trait FromArg: Sized + Clone + Send + Sync + 'static {
    /// Human readable name used in errors and help text
    fn type_name() -> String;

    fn from_arg(text: &str) -> Result<Self, IncorrectType>;

    /// Parse the tokens consumed by one occurrence of an argument
    ///
    /// Scalars see the tokens joined with `,`; sequences keep each token as
    /// one element.
    fn from_tokens(tokens: &[&str]) -> Result<Self, IncorrectType> {
        Self::from_arg(&tokens.join(","))
    }

    /// Textual form shown for defaults in help output
    fn render(&self) -> String;

    fn kind() -> ValueKind {
        ValueKind::Single
    }

    /// Values taken when a switch is left out and when it is given
    fn switch_values() -> Option<(Self, Self)> {
        None
    }
}

/// Parse `text` as `T`
pub fn parse<T: FromArg>(text: &str) -> Result<T, IncorrectType> {
    T::from_arg(text)
}

/// Parse `text` into `out`, leaving it untouched on failure
pub fn parse_into<T: FromArg>(text: &str, out: &mut T) -> Result<(), IncorrectType> {
    *out = T::from_arg(text)?;
    Ok(())
}

/// Implements [`FromArg`] for types whose [`FromStr`](std::str::FromStr) is the whole story
macro_rules! from_str_arg {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FromArg for $ty {
                fn type_name() -> String {
                    stringify!($ty).to_string()
                }

                fn from_arg(text: &str) -> Result<Self, IncorrectType> {
                    parse_from_str(text)
                }

                fn render(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

from_str_arg!(f32, f64, IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr);

impl FromArg for PathBuf {
    fn type_name() -> String {
        "PathBuf".to_string()
    }

    fn from_arg(text: &str) -> Result<Self, IncorrectType> {
        parse_from_str(text)
    }

    fn render(&self) -> String {
        self.display().to_string()
    }
}
