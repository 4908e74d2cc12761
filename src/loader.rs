//! Bulk loading of customer accounts.
//!
//! An account file holds one `<id>, <full name>, <email>, <balance>` record
//! per line. Blank lines are ignored and a repeated id replaces the earlier
//! record.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::info;

use crate::AccountTable;
use crate::customer::Customer;
use crate::error::LoadError;

/// Reads every record from `reader` into a new table of at least `capacity`
/// buckets.
///
/// Stops at the first malformed line.
///
/// # Examples
///
/// ```
/// use chainkv::prelude::*;
///
/// let data = "1, Ann Lee, ann@example.com, 10\n2, Bo Chen, bo@example.com, 20\n";
/// let table = load_accounts(data.as_bytes(), 11).unwrap();
///
/// assert_eq!(table.len(), 2);
/// assert_eq!(table[&2].full_name, "Bo Chen");
/// ```
pub fn load_accounts<R: BufRead>(reader: R, capacity: usize) -> Result<AccountTable, LoadError> {
    let mut table = AccountTable::with_capacity(capacity);

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let customer: Customer = line
            .parse()
            .map_err(|source| LoadError::Malformed { line: i + 1, source })?;
        table.insert(customer.id, customer);
    }

    info!("loaded {} accounts ({})", table.len(), table.stats());

    Ok(table)
}

/// Opens `path` and loads it with [`load_accounts`].
pub fn load_accounts_from_path(
    path: impl AsRef<Path>,
    capacity: usize,
) -> Result<AccountTable, LoadError> {
    let file = File::open(path.as_ref())?;
    load_accounts(BufReader::new(file), capacity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseError;

    #[test]
    fn test_load_skips_blank_lines() {
        let data = "\n1, A, a@example.com, 1\n   \n2, B, b@example.com, 2\n";
        let table = load_accounts(data.as_bytes(), 11).unwrap();

        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_load_duplicate_ids_keep_last() {
        let data = "1, Old, old@example.com, 1\n1, New, new@example.com, 2\n";
        let table = load_accounts(data.as_bytes(), 11).unwrap();

        assert_eq!(table.len(), 1);
        assert_eq!(table[&1].email, "new@example.com");
    }

    #[test]
    fn test_load_grows_table() {
        let data: String = (1..=8)
            .map(|id| format!("{id}, Customer {id}, c{id}@example.com, {id}.50\n"))
            .collect();
        let table = load_accounts(data.as_bytes(), 11).unwrap();

        assert_eq!(table.len(), 8);
        assert_eq!(table.capacity(), 23);
        assert_eq!(table.expansions(), 1);
        for id in 1..=8 {
            assert_eq!(table[&id].full_name, format!("Customer {id}"));
        }
    }

    #[test]
    fn test_load_reports_malformed_line() {
        let data = "1, A, a@example.com, 1\n2, B, b@example.com, two\n";
        let err = load_accounts(data.as_bytes(), 11).unwrap_err();

        match err {
            LoadError::Malformed { line, source } => {
                assert_eq!(line, 2);
                assert!(matches!(source, ParseError::InvalidAmount { .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_accounts_from_path("/nonexistent/accounts.txt", 11).unwrap_err();

        assert!(matches!(err, LoadError::Io(_)));
    }
}
