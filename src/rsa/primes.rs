// Prime Table
// Parsing and filtering of prime tables, plus a built-in sieve when no table file is given

use std::collections::BTreeSet;

use crate::error::{Error, Result};

/// Parse a whitespace-separated prime table and keep the entries strictly
/// between `min_exclusive` and `max_exclusive`.
///
/// The low bound keeps small primes out of key material.
pub fn load_primes(source: &str, min_exclusive: u64, max_exclusive: u64) -> Result<BTreeSet<u64>> {
    let mut primes = Vec::new();
    for token in source.split_whitespace() {
        let prime = token.parse::<u64>().map_err(|_| Error::PrimeTableParse {
            token: token.to_string(),
        })?;
        primes.push(prime);
    }

    Ok(filter_primes(primes, min_exclusive, max_exclusive))
}

/// Keep the primes inside the open interval (min_exclusive, max_exclusive)
pub fn filter_primes<I>(primes: I, min_exclusive: u64, max_exclusive: u64) -> BTreeSet<u64>
where
    I: IntoIterator<Item = u64>,
{
    primes
        .into_iter()
        .filter(|&p| p > min_exclusive && p < max_exclusive)
        .collect()
}

/// Largest bound the built-in sieve accepts; bigger ranges need a prime table file
pub const MAX_SIEVE_LIMIT: u64 = 50_000_000;

/// All primes below `limit` (sieve of Eratosthenes)
pub fn sieve(limit: u64) -> Result<Vec<u64>> {
    let too_large = || Error::InvalidPrimeRange {
        limit,
        max: MAX_SIEVE_LIMIT,
    };
    if limit > MAX_SIEVE_LIMIT {
        return Err(too_large());
    }
    let limit = usize::try_from(limit).map_err(|_| too_large())?;
    if limit < 3 {
        return Ok(Vec::new());
    }

    let mut composite = vec![false; limit];
    let mut primes = Vec::new();

    for n in 2..limit {
        if composite[n] {
            continue;
        }
        primes.push(n as u64);
        let mut multiple = n * n;
        while multiple < limit {
            composite[multiple] = true;
            multiple += n;
        }
    }

    Ok(primes)
}
