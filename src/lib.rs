//! Customer account store backed by a separately-chained hash table.
//!
//! The engine lives in [`collections::hash_table`]; the remaining modules load
//! account files, interpret batch commands against the table and configure
//! the command-line driver.

#![deny(missing_docs)]
#![warn(missing_debug_implementations)]
#![warn(rust_2018_idioms)]

pub mod algorithms;
pub mod collections;
pub mod commands;
pub mod config;
pub mod customer;
pub mod error;
pub mod loader;
pub mod logger;

/// Account store keyed by customer id.
pub type AccountTable = collections::hash_table::HashTable<i64, customer::Customer>;

/// Chained Key-Value Store Prelude
pub mod prelude {
    #[doc(no_inline)]
    pub use super::collections::prelude::*;

    #[doc(no_inline)]
    pub use super::algorithms::linear_search::*;
    #[doc(no_inline)]
    pub use super::algorithms::primes::*;

    #[doc(no_inline)]
    pub use super::AccountTable;
    #[doc(no_inline)]
    pub use super::commands::{BatchSummary, Command, process_commands};
    #[doc(no_inline)]
    pub use super::customer::Customer;
    #[doc(no_inline)]
    pub use super::loader::{load_accounts, load_accounts_from_path};
}
