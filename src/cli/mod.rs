//! CLI module - argument declaration, invocation parsing and help output

pub mod argument;
pub mod config;
pub mod help;
pub mod parser;

pub use argument::{Argument, ArgumentBuilder, Nargs};
pub use config::HelpConfig;
pub use parser::ArgumentParser;
