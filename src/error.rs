//! Errors raised while reading account files, batch commands and
//! command-line arguments.
//!
//! The hash table itself never fails: a missing key is reported as [`None`].

use std::io;
use std::num::{ParseFloatError, ParseIntError};

use thiserror::Error;

/// A line of input that does not describe a valid record or command.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// The line was empty after trimming.
    #[error("empty line")]
    Empty,
    /// A customer record had fewer than its four fields.
    #[error("record `{0}` needs an id, a full name, an email and a balance")]
    IncompleteRecord(String),
    /// A command was missing one of its arguments.
    #[error("`{command}` command is missing its {field}")]
    MissingField {
        /// Command being parsed.
        command: &'static str,
        /// Name of the absent argument.
        field: &'static str,
    },
    /// A customer id was not a 64-bit signed integer.
    #[error("invalid customer id `{value}`")]
    InvalidId {
        /// Offending text.
        value: String,
        /// Underlying integer parse failure.
        #[source]
        source: ParseIntError,
    },
    /// A balance or amount was not a number.
    #[error("invalid amount `{value}`")]
    InvalidAmount {
        /// Offending text.
        value: String,
        /// Underlying float parse failure.
        #[source]
        source: ParseFloatError,
    },
    /// A balance or amount parsed to infinity or NaN.
    #[error("amount `{0}` is not a finite number")]
    NonFiniteAmount(String),
    /// The command name is not one of `insert`, `update`, `find`, `delete`.
    #[error("unknown command `{0}`")]
    UnknownCommand(String),
    /// An update named something other than `deposit` or `withdrawal`.
    #[error("unknown update operation `{0}`")]
    UnknownOperation(String),
}

/// Failure to load an account file into a table.
#[derive(Error, Debug)]
pub enum LoadError {
    /// Reading the source failed.
    #[error(transparent)]
    Io(#[from] io::Error),
    /// A line could not be parsed into a customer record.
    #[error("line {line}: {source}")]
    Malformed {
        /// 1-based line number.
        line: usize,
        /// Why the line was rejected.
        #[source]
        source: ParseError,
    },
}

/// Invalid command-line arguments or environment.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A flag that the driver does not know.
    #[error("unknown option `{0}`")]
    UnknownOption(String),
    /// A flag given without its value.
    #[error("option `{0}` requires a value")]
    MissingValue(&'static str),
    /// The initial capacity was not an unsigned integer.
    #[error("invalid capacity `{value}`")]
    InvalidCapacity {
        /// Offending text.
        value: String,
        /// Underlying integer parse failure.
        #[source]
        source: ParseIntError,
    },
    /// More positional arguments than input files.
    #[error("unexpected argument `{0}`")]
    UnexpectedArgument(String),
}
