//! Argument declarations
//!
//! An [`Argument`] describes one named option (`-b`, `--base`) or positional
//! (`file`): how many tokens it consumes, whether it must be supplied, the
//! values it falls back to, and how to turn its tokens into a [`Value`].
//! Arguments are created through
//! [`ArgumentParser::add_argument`](crate::ArgumentParser::add_argument),
//! which hands back a typed [`ArgumentBuilder`].

use std::fmt;
use std::marker::PhantomData;

use crate::core::Value;
use crate::error::{IncorrectType, SpecError};
use crate::parse::{FromArg, ValueKind};

/// Group positionals are listed under in help output
pub const POSITIONAL_GROUP: &str = "Positional";

/// How many tokens an argument consumes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nargs {
    /// Exactly this many tokens
    Exact(u8),
    /// Zero or one token (`?`)
    Optional,
    /// At least one token (`+`)
    OneOrMore,
    /// Any number of tokens (`*`)
    ZeroOrMore,
}

impl Nargs {
    /// Fewest tokens this arity accepts
    pub fn min(&self) -> usize {
        match self {
            Nargs::Exact(n) => *n as usize,
            Nargs::Optional | Nargs::ZeroOrMore => 0,
            Nargs::OneOrMore => 1,
        }
    }
}

impl fmt::Display for Nargs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Nargs::Exact(1) => write!(f, "1 value"),
            Nargs::Exact(n) => write!(f, "{} values", n),
            Nargs::Optional => write!(f, "at most 1 value"),
            Nargs::OneOrMore => write!(f, "at least 1 value"),
            Nargs::ZeroOrMore => write!(f, "any number of values"),
        }
    }
}

impl TryFrom<char> for Nargs {
    type Error = SpecError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            '0'..='9' => Ok(Nargs::Exact(c as u8 - b'0')),
            '?' => Ok(Nargs::Optional),
            '+' => Ok(Nargs::OneOrMore),
            '*' => Ok(Nargs::ZeroOrMore),
            _ => Err(SpecError::InvalidNargs(c)),
        }
    }
}

/// Names that do not start with `-` are positional
pub fn is_positional(name: &str) -> bool {
    !name.is_empty() && !name.starts_with('-')
}

type ValueParser = fn(&[&str]) -> Result<Value, IncorrectType>;

fn erased_parser<T: FromArg>(tokens: &[&str]) -> Result<Value, IncorrectType> {
    T::from_tokens(tokens).map(Value::new)
}

/// A default or implicit value together with its help text form
#[derive(Debug, Clone)]
pub(crate) struct Preset {
    pub(crate) value: Value,
    rendered: String,
}

impl Preset {
    fn new<T: FromArg>(value: T) -> Self {
        Self {
            rendered: value.render(),
            value: Value::new(value),
        }
    }
}

/// A declared option or positional argument
#[derive(Clone)]
pub struct Argument {
    names: Vec<String>,
    positional: bool,
    required: bool,
    nargs: Nargs,
    group: String,
    description: String,
    metavar: Option<String>,
    type_name: String,
    parser: ValueParser,
    pub(crate) default: Option<Preset>,
    pub(crate) implicit: Option<Preset>,
}

impl Argument {
    /// Declare an argument of type `T` under the given names
    ///
    /// Names are ordered shortest first, so the last one is the long form
    /// used for the key and in usage text.
    pub fn new<T: FromArg>(names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        let mut names: Vec<String> = names.into_iter().map(Into::into).collect();
        names.sort_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));
        let positional = names.iter().any(|n| is_positional(n));

        let nargs = match T::kind() {
            ValueKind::Switch => Nargs::Exact(0),
            ValueKind::Single => Nargs::Exact(1),
            ValueKind::Sequence => Nargs::OneOrMore,
        };
        let (default, implicit) = match T::switch_values() {
            Some((off, on)) => (Some(Preset::new(off)), Some(Preset::new(on))),
            None => (None, None),
        };

        Self {
            names,
            positional,
            required: positional,
            nargs,
            group: if positional {
                POSITIONAL_GROUP.to_string()
            } else {
                String::new()
            },
            description: String::new(),
            metavar: None,
            type_name: T::type_name(),
            parser: erased_parser::<T>,
            default,
            implicit,
        }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// The longest name, as written on the command line
    pub fn long_name(&self) -> &str {
        self.names.last().map(String::as_str).unwrap_or_default()
    }

    /// Key the parsed value is stored under: the long name without dashes
    pub fn key(&self) -> &str {
        self.long_name().trim_start_matches('-')
    }

    /// Placeholder shown for the argument's values
    pub fn metavar(&self) -> String {
        match &self.metavar {
            Some(metavar) => metavar.clone(),
            None => self.key().to_uppercase(),
        }
    }

    pub fn is_positional(&self) -> bool {
        self.positional
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn nargs(&self) -> Nargs {
        self.nargs
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Convert a raw token with this argument's type
    pub fn convert(&self, text: &str) -> Result<Value, IncorrectType> {
        (self.parser)(&[text])
    }

    /// Convert the tokens consumed by one occurrence of this argument
    pub fn convert_tokens(&self, tokens: &[&str]) -> Result<Value, IncorrectType> {
        (self.parser)(tokens)
    }

    pub(crate) fn validate(&self) -> Result<(), SpecError> {
        if self.names.is_empty() {
            return Err(SpecError::NoNames);
        }
        for name in &self.names {
            if name.trim_start_matches('-').is_empty() || name.contains(char::is_whitespace) {
                return Err(SpecError::InvalidName(name.clone()));
            }
        }
        if self.positional && self.names.iter().any(|n| !is_positional(n)) {
            return Err(SpecError::MixedNames(self.long_name().to_string()));
        }
        if self.nargs == Nargs::Exact(0) {
            if self.positional {
                return Err(SpecError::ZeroArityPositional(self.long_name().to_string()));
            }
            if self.implicit.is_none() {
                return Err(SpecError::NoImplicitValue(self.long_name().to_string()));
            }
        }
        Ok(())
    }

    /// Usage fragment, e.g. `[--base BASE]` or `INTS [INTS ...]`
    pub fn usage(&self) -> String {
        let meta = self.metavar();
        let mut usage = if self.positional {
            String::new()
        } else {
            self.long_name().to_string()
        };

        match self.nargs {
            Nargs::Exact(n) => {
                for _ in 0..n {
                    usage.push(' ');
                    usage.push_str(&meta);
                }
            }
            Nargs::Optional => usage.push_str(&format!(" [{meta}]")),
            Nargs::OneOrMore => usage.push_str(&format!(" {meta} [{meta} ...]")),
            Nargs::ZeroOrMore => usage.push_str(&format!(" [{meta} [{meta} ...]]")),
        }

        let usage = usage.trim_start();
        if self.required {
            usage.to_string()
        } else {
            format!("[{usage}]")
        }
    }

    /// Left column of the help table; empty when there is no description
    pub fn help_key(&self) -> String {
        if self.description.is_empty() {
            return String::new();
        }
        let mut key = if self.positional {
            String::new()
        } else {
            self.names.join(", ")
        };
        if self.nargs != Nargs::Exact(0) {
            if !key.is_empty() {
                key.push(' ');
            }
            key.push_str(&self.metavar());
        }
        key
    }

    /// Right column of the help table: description, type and presets
    pub fn help(&self) -> String {
        let mut help = self.description.clone();
        if self.nargs == Nargs::Exact(0) {
            return help;
        }

        help.push_str(" [");
        help.push_str(&self.type_name);
        if let Some(default) = &self.default {
            help.push('=');
            help.push_str(&default.rendered);
        }
        if let Some(implicit) = &self.implicit {
            help.push_str("(=");
            help.push_str(&implicit.rendered);
            help.push(')');
        }
        help.push(']');
        help
    }
}

impl fmt::Debug for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Argument")
            .field("names", &self.names)
            .field("type", &self.type_name)
            .field("nargs", &self.nargs)
            .field("required", &self.required)
            .field("group", &self.group)
            .finish_non_exhaustive()
    }
}

/// Typed handle for configuring a freshly declared argument
pub struct ArgumentBuilder<'a, T> {
    argument: &'a mut Argument,
    _marker: PhantomData<T>,
}

impl<'a, T: FromArg> ArgumentBuilder<'a, T> {
    pub(crate) fn new(argument: &'a mut Argument) -> Self {
        Self {
            argument,
            _marker: PhantomData,
        }
    }

    pub fn help(self, help: impl Into<String>) -> Self {
        self.argument.description = help.into();
        self
    }

    /// Same as [`help`](Self::help)
    pub fn description(self, description: impl Into<String>) -> Self {
        self.help(description)
    }

    pub fn group(self, group: impl Into<String>) -> Self {
        self.argument.group = group.into();
        self
    }

    pub fn nargs(self, nargs: Nargs) -> Self {
        self.argument.nargs = nargs;
        self
    }

    pub fn required(self, required: bool) -> Self {
        self.argument.required = required;
        self
    }

    pub fn optional(self, optional: bool) -> Self {
        self.required(!optional)
    }

    pub fn metavar(self, metavar: impl Into<String>) -> Self {
        self.argument.metavar = Some(metavar.into());
        self
    }

    /// Value stored when the argument is not supplied at all
    pub fn default_value(self, value: T) -> Self {
        self.argument.default = Some(Preset::new(value));
        self
    }

    /// Value stored when the argument is supplied without any tokens
    pub fn implicit_value(self, value: T) -> Self {
        self.argument.implicit = Some(Preset::new(value));
        self
    }

    /// The argument as configured so far
    pub fn argument(&self) -> &Argument {
        self.argument
    }
}
