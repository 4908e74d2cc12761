//! Prime number helpers used to size hash table bucket arrays.
//!
//! Bucket counts are kept prime so that the modulo reduction of a hash value
//! spreads keys evenly even when the keys themselves share common factors.

/// Returns `true` if `n` is a prime number.
///
/// # Time Complexity
///
/// Takes *O*(√*n*) time. Candidates are trial-divided by 2, 3 and then only
/// by numbers of the form 6k ± 1.
///
/// # Examples
///
/// ```
/// use chainkv::prelude::*;
///
/// assert!(is_prime(2));
/// assert!(is_prime(23));
/// assert!(!is_prime(1));
/// assert!(!is_prime(25));
/// ```
pub fn is_prime(n: usize) -> bool {
    if n < 2 {
        return false;
    }
    if n < 4 {
        return true;
    }
    if n % 2 == 0 || n % 3 == 0 {
        return false;
    }

    let mut i = 5;
    while i <= n / i {
        if n % i == 0 || n % (i + 2) == 0 {
            return false;
        }
        i += 6;
    }

    true
}

/// Returns the smallest prime strictly greater than `n`.
///
/// # Panics
///
/// Panics if no such prime fits in a `usize`.
///
/// # Examples
///
/// ```
/// use chainkv::prelude::*;
///
/// assert_eq!(next_prime(22), 23);
/// assert_eq!(next_prime(23), 29);
/// assert_eq!(next_prime(0), 2);
/// ```
pub fn next_prime(n: usize) -> usize {
    let mut candidate = n.checked_add(1).expect("prime search overflowed usize");

    while !is_prime(candidate) {
        candidate = candidate
            .checked_add(1)
            .expect("prime search overflowed usize");
    }

    candidate
}

/// Returns the smallest prime greater than or equal to `n`.
///
/// # Examples
///
/// ```
/// use chainkv::prelude::*;
///
/// assert_eq!(prime_at_least(11), 11);
/// assert_eq!(prime_at_least(12), 13);
/// ```
#[inline]
pub fn prime_at_least(n: usize) -> usize {
    if is_prime(n) { n } else { next_prime(n) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_numbers() {
        let primes: Vec<usize> = (0..30).filter(|&n| is_prime(n)).collect();
        assert_eq!(primes, [2, 3, 5, 7, 11, 13, 17, 19, 23, 29]);
    }

    #[test]
    fn test_squares_of_primes_are_composite() {
        for p in [5, 7, 11, 13, 97, 101] {
            assert!(!is_prime(p * p));
        }
    }

    #[test]
    fn test_next_prime_is_strictly_greater() {
        assert_eq!(next_prime(1), 2);
        assert_eq!(next_prime(2), 3);
        assert_eq!(next_prime(11), 13);
        assert_eq!(next_prime(22), 23);
        assert_eq!(next_prime(46), 47);
        assert_eq!(next_prime(94), 97);
    }

    #[test]
    fn test_doubling_sequence_from_eleven() {
        let mut capacity = 11;
        let mut seen = vec![capacity];

        for _ in 0..5 {
            capacity = next_prime(capacity * 2);
            seen.push(capacity);
        }

        assert_eq!(seen, [11, 23, 47, 97, 197, 397]);
    }

    #[test]
    fn test_prime_at_least() {
        assert_eq!(prime_at_least(0), 2);
        assert_eq!(prime_at_least(2), 2);
        assert_eq!(prime_at_least(14), 17);
        assert_eq!(prime_at_least(7919), 7919);
    }

    #[test]
    fn test_large_prime() {
        // 2^31 - 1
        assert!(is_prime(2_147_483_647));
        assert!(!is_prime(2_147_483_649));
    }
}
