//! Algorithms backing the collection types.

pub mod linear_search;
pub mod primes;
