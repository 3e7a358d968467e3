//! Error types for declaring, parsing and reading arguments

use miette::Diagnostic;
use thiserror::Error;

/// A raw token could not be converted to the requested type
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("Argument '{token}' failed to parse as type '{type_name}'")]
#[diagnostic(code(argparse::incorrect_type))]
pub struct IncorrectType {
    /// The offending token, unchanged
    pub token: String,

    /// Human readable name of the target type
    pub type_name: String,
}

impl IncorrectType {
    pub fn new(token: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            type_name: type_name.into(),
        }
    }
}

/// Failures when reading values back out of a [`ResultTable`](crate::ResultTable)
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum LookupError {
    #[error("no value stored under key '{0}'")]
    #[diagnostic(code(argparse::key_not_found))]
    KeyNotFound(String),

    #[error("value has type '{found}', requested '{expected}'")]
    #[diagnostic(code(argparse::type_mismatch))]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("value of type '{from}' cannot be represented as '{to}'")]
    #[diagnostic(code(argparse::cast_failed))]
    CastFailed {
        from: &'static str,
        to: &'static str,
    },
}

/// Mistakes in how arguments were declared
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum SpecError {
    #[error("argument declared without any names")]
    #[diagnostic(code(argparse::spec::no_names))]
    NoNames,

    #[error("argument name '{0}' is not valid")]
    #[diagnostic(code(argparse::spec::invalid_name))]
    InvalidName(String),

    #[error("argument name '{0}' is declared more than once")]
    #[diagnostic(code(argparse::spec::duplicate_name))]
    DuplicateName(String),

    #[error("argument '{0}' mixes positional and option names")]
    #[diagnostic(code(argparse::spec::mixed_names))]
    MixedNames(String),

    #[error("positional argument '{0}' must consume at least one token")]
    #[diagnostic(code(argparse::spec::zero_arity_positional))]
    ZeroArityPositional(String),

    #[error("option '{0}' takes no value but has no implicit value to store")]
    #[diagnostic(code(argparse::spec::no_implicit_value))]
    NoImplicitValue(String),

    #[error("'{0}' is not a valid arity, expected a digit or one of '?', '+', '*'")]
    #[diagnostic(code(argparse::spec::invalid_nargs))]
    InvalidNargs(char),
}

/// Failures while consuming invocation tokens
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum ParseError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    IncorrectType(#[from] IncorrectType),

    #[error("unknown argument '{0}'")]
    #[diagnostic(
        code(argparse::unknown_argument),
        help("run with --help to see the accepted arguments")
    )]
    UnknownArgument(String),

    #[error("argument '{argument}' expects {expected}")]
    #[diagnostic(code(argparse::missing_value))]
    MissingValue { argument: String, expected: String },

    #[error("missing required argument '{0}'")]
    #[diagnostic(code(argparse::missing_required))]
    MissingRequired(String),

    #[error("unexpected positional argument '{0}'")]
    #[diagnostic(code(argparse::unexpected_positional))]
    UnexpectedPositional(String),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Spec(#[from] SpecError),
}

/// Any error produced by this crate
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum Error {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Lookup(#[from] LookupError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Spec(#[from] SpecError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    IncorrectType(#[from] IncorrectType),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
