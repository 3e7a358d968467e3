//! argparse: typed command-line argument parsing
//!
//! Programs declare options and positionals with a Rust type, then parse
//! invocation tokens into a [`ResultTable`] of type-erased [`Value`]s that
//! are read back with a checked downcast.

pub mod cli;
pub mod core;
pub mod error;
pub mod parse;

pub use crate::cli::{Argument, ArgumentBuilder, ArgumentParser, HelpConfig, Nargs};
pub use crate::core::{ResultTable, Value};
pub use crate::error::{Error, IncorrectType, LookupError, ParseError, Result, SpecError};
pub use crate::parse::{parse, parse_into, FromArg, ValueKind};
