//! Customer account records stored in the table.

use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;

/// A customer account.
#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    /// Unique customer identifier, also the table key.
    pub id: i64,
    /// Full name. May itself contain commas.
    pub full_name: String,
    /// Contact email.
    pub email: String,
    /// Current balance in dollars.
    pub balance: f64,
}

impl Customer {
    /// Creates a new customer record.
    pub fn new(
        id: i64,
        full_name: impl Into<String>,
        email: impl Into<String>,
        balance: f64,
    ) -> Self {
        Self {
            id,
            full_name: full_name.into(),
            email: email.into(),
            balance,
        }
    }

    /// Adds `amount` to the balance.
    #[inline]
    pub fn deposit(&mut self, amount: f64) {
        self.balance += amount;
    }

    /// Subtracts `amount` from the balance. Overdrafts are allowed.
    #[inline]
    pub fn withdraw(&mut self, amount: f64) {
        self.balance -= amount;
    }

    /// Returns the balance formatted as dollars with two decimals.
    #[inline]
    pub fn formatted_balance(&self) -> String {
        format!("${:.2}", self.balance)
    }
}

/// Parses `<id>, <full name>, <email>, <balance>`.
///
/// Everything between the id and the last two fields is the full name,
/// so `"7, Doe, Jane, jane@example.com, 10"` is Jane Doe with name
/// `"Doe, Jane"`.
///
/// # Examples
///
/// ```
/// use chainkv::prelude::*;
///
/// let c: Customer = "7, Doe, Jane, jane@example.com, 10.5".parse().unwrap();
/// assert_eq!(c.id, 7);
/// assert_eq!(c.full_name, "Doe, Jane");
/// assert_eq!(c.balance, 10.5);
/// ```
impl FromStr for Customer {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ParseError::Empty);
        }

        let fields: Vec<&str> = s.split(',').map(str::trim).collect();
        let [id, name @ .., email, balance] = fields.as_slice() else {
            return Err(ParseError::IncompleteRecord(s.to_owned()));
        };
        if name.is_empty() {
            return Err(ParseError::IncompleteRecord(s.to_owned()));
        }

        Ok(Self {
            id: parse_id(id)?,
            full_name: name.join(", "),
            email: (*email).to_owned(),
            balance: parse_amount(balance)?,
        })
    }
}

/// Account details without the id, which a report prints from the table key.
impl fmt::Display for Customer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Full Name: {}, Email: {}, Balance: ${:.2}",
            self.full_name, self.email, self.balance
        )
    }
}

/// Parses a customer id.
pub(crate) fn parse_id(s: &str) -> Result<i64, ParseError> {
    s.trim().parse().map_err(|source| ParseError::InvalidId {
        value: s.trim().to_owned(),
        source,
    })
}

/// Parses a finite dollar amount.
pub(crate) fn parse_amount(s: &str) -> Result<f64, ParseError> {
    let s = s.trim();
    let amount: f64 = s.parse().map_err(|source| ParseError::InvalidAmount {
        value: s.to_owned(),
        source,
    })?;

    if !amount.is_finite() {
        return Err(ParseError::NonFiniteAmount(s.to_owned()));
    }

    Ok(amount)
}
