//! Batch command interpreter.
//!
//! Each line of a batch is `<command>, <data>`:
//!
//! ```text
//! insert, 1001, Alice Smith, alice@example.com, 250.00
//! update, 1001, deposit, 100
//! update, 1001, withdrawal, 25.50
//! find, 1001
//! delete, 1001
//! ```
//!
//! Command and operation names are case-insensitive. Lines that fail to parse
//! are logged and skipped.

use std::fmt;
use std::hash::BuildHasher;
use std::io::{self, BufRead, Write};
use std::str::FromStr;

use log::{debug, warn};

use crate::collections::hash_table::HashTable;
use crate::customer::{Customer, parse_amount, parse_id};
use crate::error::ParseError;

/// How an `update` command changes a balance.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Adds to the balance.
    Deposit,
    /// Subtracts from the balance.
    Withdrawal,
}

/// A single parsed batch command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Inserts a customer, replacing any record with the same id.
    Insert(Customer),
    /// Applies a deposit or withdrawal to an existing customer.
    Update {
        /// Customer to update.
        id: i64,
        /// Deposit or withdrawal.
        operation: Operation,
        /// Amount in dollars.
        amount: f64,
    },
    /// Prints a customer.
    Find(i64),
    /// Removes a customer.
    Delete(i64),
}

/// Counts of what a batch did.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct BatchSummary {
    /// Commands parsed and applied.
    pub applied: usize,
    /// Non-blank lines that could not be parsed.
    pub skipped: usize,
}

impl FromStr for Operation {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if s.eq_ignore_ascii_case("deposit") {
            Ok(Self::Deposit)
        } else if s.eq_ignore_ascii_case("withdrawal") {
            Ok(Self::Withdrawal)
        } else {
            Err(ParseError::UnknownOperation(s.to_owned()))
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Deposit => "deposit",
            Self::Withdrawal => "withdrawal",
        })
    }
}

/// Parses one batch line.
///
/// # Examples
///
/// ```
/// use chainkv::commands::Operation;
/// use chainkv::prelude::*;
///
/// let cmd: Command = "UPDATE, 7, Deposit, 12.5".parse().unwrap();
/// assert_eq!(
///     cmd,
///     Command::Update { id: 7, operation: Operation::Deposit, amount: 12.5 }
/// );
/// ```
impl FromStr for Command {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ParseError::Empty);
        }

        let (name, data) = s.split_once(',').unwrap_or((s, ""));
        let name = name.trim().to_ascii_lowercase();

        match name.as_str() {
            "insert" => Ok(Self::Insert(data.parse()?)),
            "update" => {
                let mut args = data.splitn(3, ',');
                let id = next_arg(&mut args, "update", "customer id")?;
                let operation = next_arg(&mut args, "update", "operation")?;
                let amount = next_arg(&mut args, "update", "amount")?;

                Ok(Self::Update {
                    id: parse_id(id)?,
                    operation: operation.parse()?,
                    amount: parse_amount(amount)?,
                })
            }
            "find" => Ok(Self::Find(parse_id(required(data, "find")?)?)),
            "delete" => Ok(Self::Delete(parse_id(required(data, "delete")?)?)),
            _ => Err(ParseError::UnknownCommand(name)),
        }
    }
}

fn next_arg<'a>(
    args: &mut impl Iterator<Item = &'a str>,
    command: &'static str,
    field: &'static str,
) -> Result<&'a str, ParseError> {
    args.next()
        .map(str::trim)
        .filter(|arg| !arg.is_empty())
        .ok_or(ParseError::MissingField { command, field })
}

fn required<'a>(data: &'a str, command: &'static str) -> Result<&'a str, ParseError> {
    next_arg(&mut std::iter::once(data), command, "customer id")
}

impl Command {
    /// Applies the command to `table`, writing its outcome to `out`.
    ///
    /// `update` mutates the stored record in place through
    /// [`HashTable::get_mut`].
    ///
    /// # Examples
    ///
    /// ```
    /// use chainkv::prelude::*;
    ///
    /// let mut table = AccountTable::new();
    /// let mut out = Vec::new();
    ///
    /// let cmd: Command = "insert, 1, Ann Lee, ann@example.com, 10".parse().unwrap();
    /// cmd.apply(&mut table, &mut out).unwrap();
    ///
    /// assert_eq!(String::from_utf8(out).unwrap(), "Inserted: Ann Lee\n");
    /// assert_eq!(table.len(), 1);
    /// ```
    pub fn apply<H, W>(self, table: &mut HashTable<i64, Customer, H>, out: &mut W) -> io::Result<()>
    where
        H: BuildHasher,
        W: Write + ?Sized,
    {
        match self {
            Self::Insert(customer) => {
                writeln!(out, "Inserted: {}", customer.full_name)?;
                table.insert(customer.id, customer);
            }
            Self::Update {
                id,
                operation,
                amount,
            } => match table.get_mut(&id) {
                Some(customer) => {
                    match operation {
                        Operation::Deposit => customer.deposit(amount),
                        Operation::Withdrawal => customer.withdraw(amount),
                    }
                    writeln!(
                        out,
                        "Updated: {}, New Balance: {}",
                        customer.full_name,
                        customer.formatted_balance()
                    )?;
                }
                None => not_found(out, id)?,
            },
            Self::Find(id) => match table.get(&id) {
                Some(customer) => writeln!(
                    out,
                    "Found: Customer ID: {id}, Full Name: {}, Email: {}, Balance: {}",
                    customer.full_name,
                    customer.email,
                    customer.formatted_balance()
                )?,
                None => not_found(out, id)?,
            },
            Self::Delete(id) => match table.remove(&id) {
                Some(customer) => writeln!(out, "Deleted: {}", customer.full_name)?,
                None => not_found(out, id)?,
            },
        }

        Ok(())
    }
}

fn not_found<W: Write + ?Sized>(out: &mut W, id: i64) -> io::Result<()> {
    writeln!(out, "Customer ID: {id} not found")
}

/// Reads commands line by line from `reader` and applies each to `table`.
///
/// Blank lines are ignored. Lines that fail to parse are logged at `warn`
/// and counted as skipped. Only I/O errors abort the batch.
pub fn process_commands<R, H, W>(
    reader: R,
    table: &mut HashTable<i64, Customer, H>,
    out: &mut W,
) -> io::Result<BatchSummary>
where
    R: BufRead,
    H: BuildHasher,
    W: Write + ?Sized,
{
    let mut summary = BatchSummary::default();

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        match line.parse::<Command>() {
            Ok(command) => {
                debug!("line {}: {command:?}", i + 1);
                command.apply(table, out)?;
                summary.applied += 1;
            }
            Err(err) => {
                warn!("skipping line {}: {err}", i + 1);
                summary.skipped += 1;
            }
        }
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::AccountTable;

    fn run(table: &mut AccountTable, batch: &str) -> (String, BatchSummary) {
        let mut out = Vec::new();
        let summary = process_commands(batch.as_bytes(), table, &mut out).unwrap();
        (String::from_utf8(out).unwrap(), summary)
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            "insert, 5, Kim, kim@example.com, 1.25".parse::<Command>(),
            Ok(Command::Insert(Customer::new(5, "Kim", "kim@example.com", 1.25)))
        );
        assert_eq!("Find, 5".parse::<Command>(), Ok(Command::Find(5)));
        assert_eq!("delete,5".parse::<Command>(), Ok(Command::Delete(5)));
        assert_eq!(
            "update, 5, WITHDRAWAL, 3".parse::<Command>(),
            Ok(Command::Update {
                id: 5,
                operation: Operation::Withdrawal,
                amount: 3.0
            })
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            "transfer, 1, 2".parse::<Command>(),
            Err(ParseError::UnknownCommand("transfer".to_owned()))
        );
        assert_eq!(
            "update, 1, refund, 3".parse::<Command>(),
            Err(ParseError::UnknownOperation("refund".to_owned()))
        );
        assert_eq!(
            "update, 1, deposit".parse::<Command>(),
            Err(ParseError::MissingField {
                command: "update",
                field: "amount"
            })
        );
        assert_eq!(
            "find".parse::<Command>(),
            Err(ParseError::MissingField {
                command: "find",
                field: "customer id"
            })
        );
        assert!(matches!(
            "find, abc".parse::<Command>(),
            Err(ParseError::InvalidId { .. })
        ));
    }

    #[test]
    fn test_update_mutates_stored_record() {
        let mut table = AccountTable::new();
        table.insert(1, Customer::new(1, "Ann Lee", "ann@example.com", 100.0));

        let (out, summary) = run(
            &mut table,
            "update, 1, deposit, 50.5\nupdate, 1, withdrawal, 20\n",
        );

        assert_eq!(
            out,
            "Updated: Ann Lee, New Balance: $150.50\nUpdated: Ann Lee, New Balance: $130.50\n"
        );
        assert_eq!(summary.applied, 2);
        assert_eq!(table[&1].balance, 130.5);
    }

    #[test]
    fn test_missing_customers() {
        let mut table = AccountTable::new();

        let (out, _) = run(&mut table, "find, 9\nupdate, 9, deposit, 1\ndelete, 9\n");

        assert_eq!(
            out,
            "Customer ID: 9 not found\nCustomer ID: 9 not found\nCustomer ID: 9 not found\n"
        );
        assert!(table.is_empty());
    }

    #[test]
    fn test_full_batch() {
        let mut table = AccountTable::new();
        let batch = "\
insert, 10, Jo Park, jo@example.com, 5
find, 10

insert, 11, Lee, Sam, sam@example.com, 7.125
bogus line
delete, 10
find, 10
";

        let (out, summary) = run(&mut table, batch);

        assert_eq!(
            out,
            "\
Inserted: Jo Park
Found: Customer ID: 10, Full Name: Jo Park, Email: jo@example.com, Balance: $5.00
Inserted: Lee, Sam
Deleted: Jo Park
Customer ID: 10 not found
"
        );
        assert_eq!(
            summary,
            BatchSummary {
                applied: 5,
                skipped: 1
            }
        );
        assert_eq!(table.len(), 1);
        assert_eq!(table[&11].full_name, "Lee, Sam");
    }

    #[test]
    fn test_insert_existing_id_replaces_record() {
        let mut table = AccountTable::new();

        run(
            &mut table,
            "insert, 42, First, a@example.com, 1\ninsert, 42, Second, b@example.com, 2\n",
        );

        assert_eq!(table.len(), 1);
        assert_eq!(table[&42].full_name, "Second");
    }
}
