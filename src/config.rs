//! Command-line configuration of the driver.

use std::env;
use std::ffi::OsString;
use std::path::PathBuf;

use crate::collections::hash_table::DEFAULT_CAPACITY;
use crate::error::ConfigError;

/// Environment variable read when `--capacity` is not given.
pub const CAPACITY_ENV: &str = "CHAINKV_CAPACITY";

/// Help text printed for `-h`/`--help` and argument errors.
pub const USAGE: &str = "\
usage: chainkv [--capacity N] [ACCOUNTS [TRANSACTIONS]]

  ACCOUNTS       account file to load (default: accountLoad.txt)
  TRANSACTIONS   batch command file to run (default: transactions.txt)
  --capacity N   initial bucket count, rounded up to a prime (default: 11,
                 or $CHAINKV_CAPACITY)
  -h, --help     print this help";

/// Settings for one run of the driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Account file loaded before the batch runs.
    pub accounts: PathBuf,
    /// Batch command file.
    pub transactions: PathBuf,
    /// Initial bucket count requested for the table.
    pub initial_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            accounts: PathBuf::from("accountLoad.txt"),
            transactions: PathBuf::from("transactions.txt"),
            initial_capacity: DEFAULT_CAPACITY,
        }
    }
}

impl Config {
    /// Builds the configuration from the process arguments and environment.
    ///
    /// Returns `Ok(None)` when help was requested.
    pub fn from_env() -> Result<Option<Self>, ConfigError> {
        Self::parse(env::args_os().skip(1), env::var_os(CAPACITY_ENV))
    }

    /// Builds the configuration from `args` (without the program name) and
    /// the value of [`CAPACITY_ENV`], if set.
    ///
    /// Returns `Ok(None)` when help was requested.
    ///
    /// # Examples
    ///
    /// ```
    /// use chainkv::config::Config;
    ///
    /// let config = Config::parse(["--capacity", "50", "accounts.csv"], None)
    ///     .unwrap()
    ///     .unwrap();
    ///
    /// assert_eq!(config.initial_capacity, 50);
    /// assert_eq!(config.accounts.to_str(), Some("accounts.csv"));
    /// assert_eq!(config.transactions.to_str(), Some("transactions.txt"));
    /// ```
    pub fn parse<I, S>(args: I, env_capacity: Option<OsString>) -> Result<Option<Self>, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        let mut config = Self::default();
        let mut capacity = None;
        let mut positional = Vec::new();

        let mut args = args.into_iter().map(Into::into);
        while let Some(arg) = args.next() {
            let text = arg.to_string_lossy().into_owned();

            if text == "-h" || text == "--help" {
                return Ok(None);
            } else if text == "--capacity" {
                let value = args.next().ok_or(ConfigError::MissingValue("--capacity"))?;
                capacity = Some(value);
            } else if let Some(value) = text.strip_prefix("--capacity=") {
                capacity = Some(OsString::from(value));
            } else if text.starts_with('-') && text != "-" {
                return Err(ConfigError::UnknownOption(text));
            } else {
                positional.push(arg);
            }
        }

        if let Some(value) = capacity.or(env_capacity) {
            config.initial_capacity = parse_capacity(&value)?;
        }

        let mut positional = positional.into_iter();
        if let Some(accounts) = positional.next() {
            config.accounts = accounts.into();
        }
        if let Some(transactions) = positional.next() {
            config.transactions = transactions.into();
        }
        if let Some(extra) = positional.next() {
            return Err(ConfigError::UnexpectedArgument(
                extra.to_string_lossy().into_owned(),
            ));
        }

        Ok(Some(config))
    }
}

fn parse_capacity(value: &OsString) -> Result<usize, ConfigError> {
    let text = value.to_string_lossy();

    text.trim()
        .parse()
        .map_err(|source| ConfigError::InvalidCapacity {
            value: text.into_owned(),
            source,
        })
}
