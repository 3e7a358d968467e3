//! Argument parser: declaration, invocation parsing, usage and help
//!
//! ```
//! use argparse::ArgumentParser;
//!
//! let mut parser = ArgumentParser::new("sum");
//! parser.add_argument::<Vec<i64>>(["ints"]).help("numbers to add");
//! parser
//!     .add_argument::<u32>(["-b", "--base"])
//!     .help("output base")
//!     .default_value(10)
//!     .implicit_value(16);
//!
//! let results = parser.parse_args(["1", "2", "-b"]).unwrap();
//! assert_eq!(results.get::<Vec<i64>>("ints").unwrap(), vec![1, 2]);
//! assert_eq!(results.get::<u32>("base").unwrap(), 16);
//! ```

use std::collections::{BTreeSet, HashMap, HashSet};

use crate::cli::argument::{Argument, ArgumentBuilder, Nargs};
use crate::cli::config::HelpConfig;
use crate::cli::help::{pad_right, wrap};
use crate::core::{ResultTable, Value};
use crate::error::{ParseError, SpecError};
use crate::parse::FromArg;

/// A token that selects an option rather than being a value
///
/// `-` alone and negative numbers (`-5`, `-.5`) are values.
fn looks_like_option(token: &str) -> bool {
    let mut chars = token.chars();
    chars.next() == Some('-') && matches!(chars.next(), Some(c) if !c.is_ascii_digit() && c != '.')
}

/// A program's (or subcommand's) declared arguments
#[derive(Debug, Clone, Default)]
pub struct ArgumentParser {
    program_name: String,
    short_description: String,
    description: String,
    epilog: String,
    config: HelpConfig,
    /// Kept sorted by long name
    arguments: Vec<Argument>,
    /// Declaration order of positionals, by key
    positional: Vec<String>,
    /// Kept sorted by name
    subcommands: Vec<ArgumentParser>,
}

impl ArgumentParser {
    pub fn new(program_name: impl Into<String>) -> Self {
        Self {
            program_name: program_name.into(),
            ..Self::default()
        }
    }

    pub fn program_name(&self) -> &str {
        &self.program_name
    }

    pub fn description(&mut self, description: impl Into<String>) -> &mut Self {
        self.description = description.into();
        self
    }

    /// One line summary, also shown in a parent's subcommand table
    pub fn short_description(&mut self, short_description: impl Into<String>) -> &mut Self {
        self.short_description = short_description.into();
        self
    }

    pub fn epilog(&mut self, epilog: impl Into<String>) -> &mut Self {
        self.epilog = epilog.into();
        self
    }

    pub fn config(&mut self, config: HelpConfig) -> &mut Self {
        self.config = config;
        self
    }

    pub fn short_usage(&mut self, short_usage: bool) -> &mut Self {
        self.config.short_usage = short_usage;
        self
    }

    /// Declare an argument of type `T`
    ///
    /// Names starting with `-` declare an option, any other name a positional.
    pub fn add_argument<T: FromArg>(
        &mut self,
        names: impl IntoIterator<Item = impl Into<String>>,
    ) -> ArgumentBuilder<'_, T> {
        let argument = Argument::new::<T>(names);
        if argument.is_positional() {
            self.positional.push(argument.key().to_string());
        }

        let index = self
            .arguments
            .partition_point(|a| a.long_name() <= argument.long_name());
        self.arguments.insert(index, argument);
        ArgumentBuilder::new(&mut self.arguments[index])
    }

    /// Declare a subcommand and return its parser for further declarations
    pub fn add_subcommand(&mut self, name: impl Into<String>, help: impl Into<String>) -> &mut ArgumentParser {
        let mut subcommand = ArgumentParser::new(name);
        subcommand.short_description(help);
        subcommand.config = self.config;

        let index = self
            .subcommands
            .partition_point(|s| s.program_name <= subcommand.program_name);
        self.subcommands.insert(index, subcommand);
        &mut self.subcommands[index]
    }

    pub fn subcommand(&self, name: &str) -> Option<&ArgumentParser> {
        self.subcommands.iter().find(|s| s.program_name == name)
    }

    pub fn arguments(&self) -> &[Argument] {
        &self.arguments
    }

    pub fn argument(&self, key: &str) -> Option<&Argument> {
        self.arguments.iter().find(|a| a.key() == key)
    }

    /// Positionals in the order they were declared
    pub fn positionals(&self) -> impl Iterator<Item = &Argument> {
        self.positional.iter().filter_map(|key| self.argument(key))
    }

    fn find_option(&self, token: &str) -> Option<&Argument> {
        self.arguments
            .iter()
            .find(|a| !a.is_positional() && a.names().iter().any(|n| n == token))
    }

    /// Check the declarations of this parser and every subcommand
    pub fn validate(&self) -> Result<(), SpecError> {
        let mut names = HashSet::new();
        let mut keys = HashSet::new();
        for argument in &self.arguments {
            argument.validate()?;
            for name in argument.names() {
                if !names.insert(name.as_str()) {
                    return Err(SpecError::DuplicateName(name.clone()));
                }
            }
            if !keys.insert(argument.key()) {
                return Err(SpecError::DuplicateName(argument.key().to_string()));
            }
        }
        for subcommand in &self.subcommands {
            subcommand.validate()?;
        }
        Ok(())
    }

    /// Parse invocation tokens (without the program name) into a result table
    pub fn parse_args<I>(&self, args: I) -> Result<ResultTable, ParseError>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.validate()?;
        let tokens: Vec<String> = args.into_iter().map(Into::into).collect();
        self.parse_tokens(&tokens)
    }

    fn parse_tokens(&self, tokens: &[String]) -> Result<ResultTable, ParseError> {
        let mut table = ResultTable::new();
        let mut counts: HashMap<&str, u8> = HashMap::new();
        let positionals: Vec<&Argument> = self.positionals().collect();
        let mut next_positional = 0;
        let mut only_positional = false;
        let mut i = 0;

        while i < tokens.len() {
            let token = tokens[i].as_str();

            if !only_positional && token == "--" {
                tracing::debug!("end of options");
                only_positional = true;
                i += 1;
                continue;
            }

            if !only_positional && looks_like_option(token) {
                let argument = self
                    .find_option(token)
                    .ok_or_else(|| ParseError::UnknownArgument(token.to_string()))?;
                let available = tokens[i + 1..]
                    .iter()
                    .take_while(|t| !looks_like_option(t))
                    .count();
                let take = option_arity(argument, available)?;
                let values = &tokens[i + 1..i + 1 + take];
                tracing::debug!(token, key = argument.key(), values = take, "matched option");

                let value = resolve(argument, values)?;
                let count = counts.entry(argument.key()).or_insert(0);
                *count = count.saturating_add(1);
                table.insert_value(argument.key(), value.counted(*count));
                i += 1 + take;
                continue;
            }

            if let Some(argument) = positionals.get(next_positional).copied() {
                let available = if only_positional {
                    tokens.len() - i
                } else {
                    tokens[i..].iter().take_while(|t| !looks_like_option(t)).count()
                };
                let reserved: usize = positionals[next_positional + 1..]
                    .iter()
                    .map(|p| p.nargs().min())
                    .sum();
                let take = positional_arity(argument, available, reserved)?;
                next_positional += 1;
                if take == 0 {
                    continue;
                }
                let values = &tokens[i..i + take];
                tracing::debug!(key = argument.key(), values = take, "matched positional");

                let value = resolve(argument, values)?;
                counts.insert(argument.key(), 1);
                table.insert_value(argument.key(), value.counted(1));
                i += take;
                continue;
            }

            if let Some(subcommand) = self.subcommand(token) {
                tracing::debug!(subcommand = token, "entering subcommand");
                let nested = subcommand.parse_tokens(&tokens[i + 1..])?;
                table.insert_with_count(subcommand.program_name.clone(), nested, 1);
                break;
            }

            return Err(ParseError::UnexpectedPositional(token.to_string()));
        }

        for argument in &self.arguments {
            if counts.contains_key(argument.key()) {
                continue;
            }
            if let Some(default) = &argument.default {
                tracing::trace!(key = argument.key(), "applying default");
                table.insert_value(argument.key(), default.value.clone());
            } else if argument.is_required() && !can_be_empty(argument) {
                return Err(ParseError::MissingRequired(argument.long_name().to_string()));
            }
        }

        Ok(table)
    }

    /// One line (wrapped) synopsis of the invocation
    pub fn usage(&self) -> String {
        let mut usage = format!("Usage: {}", self.program_name);

        if self.config.short_usage {
            if self.arguments.iter().any(|a| !a.is_positional()) {
                usage.push_str(" [options]");
            }
        } else {
            for argument in self.arguments.iter().filter(|a| !a.is_positional()) {
                usage.push(' ');
                usage.push_str(&argument.usage());
            }
        }
        for argument in self.positionals() {
            usage.push(' ');
            usage.push_str(&argument.usage());
        }

        if !self.subcommands.is_empty() {
            usage.push_str(" [subcommand...]");
        }

        wrap(
            &usage,
            8 + self.program_name.chars().count(),
            0,
            self.config.width,
        )
    }

    /// Full help text: usage, descriptions, subcommands and argument tables
    pub fn help(&self) -> String {
        let width = self.config.width;
        let mut help = self.usage();
        help.push_str("\n\n");

        for text in [&self.short_description, &self.description] {
            if !text.is_empty() {
                help.push_str(&wrap(text, 0, 0, width));
                help.push_str("\n\n");
            }
        }

        if !self.subcommands.is_empty() {
            help.push_str("Subcommands:\n");
            let longest = self
                .subcommands
                .iter()
                .map(|s| s.program_name.chars().count())
                .max()
                .unwrap_or_default();
            for subcommand in &self.subcommands {
                help.push_str(&table_row(
                    &subcommand.program_name,
                    &subcommand.short_description,
                    longest,
                    width,
                ));
            }
            help.push('\n');
        }

        if !self.arguments.is_empty() {
            let longest = self
                .arguments
                .iter()
                .map(|a| a.help_key().chars().count())
                .max()
                .unwrap_or_default();
            let groups: BTreeSet<&str> = self
                .arguments
                .iter()
                .map(Argument::group)
                .filter(|g| !g.is_empty())
                .collect();

            for group in std::iter::once("").chain(groups) {
                let members: Vec<&Argument> = self
                    .arguments
                    .iter()
                    .filter(|a| a.group() == group && !a.description().is_empty())
                    .collect();
                if members.is_empty() {
                    continue;
                }
                help.push_str(if group.is_empty() { "Options" } else { group });
                help.push_str(":\n");
                for argument in members {
                    help.push_str(&table_row(&argument.help_key(), &argument.help(), longest, width));
                }
                help.push('\n');
            }
        }

        if !self.epilog.is_empty() {
            help.push_str(&wrap(&self.epilog, 0, 0, width));
            help.push('\n');
        }

        help.truncate(help.trim_end_matches('\n').len());
        help
    }
}

/// `  <key padded>  <text wrapped under itself>\n`
fn table_row(key: &str, text: &str, longest: usize, width: usize) -> String {
    format!(
        "  {}  {}\n",
        pad_right(key, longest),
        wrap(text, longest + 4, longest + 4, width)
    )
}

/// Tokens an option takes given how many value tokens follow it
fn option_arity(argument: &Argument, available: usize) -> Result<usize, ParseError> {
    let has_implicit = argument.implicit.is_some();
    let take = match argument.nargs() {
        Nargs::Exact(n) if available >= n as usize => n as usize,
        Nargs::Exact(_) if available == 0 && has_implicit => 0,
        Nargs::Exact(_) => return Err(missing_value(argument)),
        Nargs::Optional => available.min(1),
        Nargs::OneOrMore if available == 0 && !has_implicit => return Err(missing_value(argument)),
        Nargs::OneOrMore | Nargs::ZeroOrMore => available,
    };
    Ok(take)
}

/// Tokens a positional takes, leaving `reserved` for the positionals after it
fn positional_arity(argument: &Argument, available: usize, reserved: usize) -> Result<usize, ParseError> {
    let spare = available.saturating_sub(reserved);
    let take = match argument.nargs() {
        Nargs::Exact(n) if available >= n as usize => n as usize,
        Nargs::Exact(_) => return Err(missing_value(argument)),
        Nargs::Optional => spare.min(1),
        Nargs::OneOrMore if available == 0 => return Err(missing_value(argument)),
        Nargs::OneOrMore => spare.max(1),
        Nargs::ZeroOrMore => spare,
    };
    Ok(take)
}

/// Turn the consumed tokens into the stored value
///
/// Each token reaches the argument's parser intact, so sequence types get
/// one element per token.
fn resolve(argument: &Argument, values: &[String]) -> Result<Value, ParseError> {
    if values.is_empty() {
        if let Some(implicit) = &argument.implicit {
            return Ok(implicit.value.clone());
        }
        if argument.nargs().min() > 0 {
            return Err(missing_value(argument));
        }
    }
    let tokens: Vec<&str> = values.iter().map(String::as_str).collect();
    Ok(argument.convert_tokens(&tokens)?)
}

/// Positionals that accept zero tokens are satisfied by omission
fn can_be_empty(argument: &Argument) -> bool {
    argument.is_positional() && argument.nargs().min() == 0
}

fn missing_value(argument: &Argument) -> ParseError {
    ParseError::MissingValue {
        argument: argument.long_name().to_string(),
        expected: argument.nargs().to_string(),
    }
}
