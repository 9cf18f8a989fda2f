// RSA Key Generation
// Builds textbook RSA keys from a table of small primes

use std::collections::BTreeSet;

use num_traits::Zero;
use rand::seq::SliceRandom;
use rand::{thread_rng, Rng};
use tracing::{debug, info, warn};

use super::bigint::{from_u64, mod_inverse, RsaBigInt};
use super::ciphertext::Ciphertext;
use super::primes::{filter_primes, load_primes, sieve};
use crate::codec::{packet_bound, Alphabet};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::util::file_ops::read_prime_table;

/// RSA Public Key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaPublicKey {
    pub n: RsaBigInt, // Modulus
    pub e: RsaBigInt, // Public exponent
}

/// RSA Private Key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaPrivateKey {
    pub n: RsaBigInt, // Modulus (same as public)
    pub d: RsaBigInt, // Private exponent
}

/// RSA Key Pair (both public and private keys)
///
/// Key sizes are deliberately tiny; these keys are for classroom use only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaKeyPair {
    pub public_key: RsaPublicKey,
    pub private_key: RsaPrivateKey,
    /// (p-1)(q-1); unknown when the pair was loaded from key files
    pub totient: Option<RsaBigInt>,
}

impl RsaPublicKey {
    /// Get the bit length of the modulus
    pub fn bit_length(&self) -> u64 {
        self.n.bits()
    }

    /// Encrypt a message using this public key
    pub fn encrypt(&self, message: &str, alphabet: &Alphabet, group_size: usize) -> Result<Ciphertext> {
        super::encrypt::encrypt_text(message, self, alphabet, group_size)
    }
}

impl RsaPrivateKey {
    /// Get the bit length of the modulus
    pub fn bit_length(&self) -> u64 {
        self.n.bits()
    }

    /// Decrypt a ciphertext using this private key
    pub fn decrypt(&self, ciphertext: &Ciphertext, alphabet: &Alphabet, group_size: usize) -> Result<String> {
        super::decrypt::decrypt_text(ciphertext, self, alphabet, group_size)
    }
}

impl RsaKeyPair {
    /// Assemble a pair from the numbers stored in key files
    pub fn from_parts(n: RsaBigInt, e: RsaBigInt, d: RsaBigInt) -> Self {
        Self {
            public_key: RsaPublicKey { n: n.clone(), e },
            private_key: RsaPrivateKey { n, d },
            totient: None,
        }
    }

    /// Get the bit length of the key
    pub fn bit_length(&self) -> u64 {
        self.public_key.bit_length()
    }
}

/// Pick two distinct primes and return the modulus and its totient
pub fn choose_modulus<R>(primes: &BTreeSet<u64>, rng: &mut R) -> Result<(RsaBigInt, RsaBigInt)>
where
    R: Rng + ?Sized,
{
    let pool: Vec<u64> = primes.iter().copied().collect();
    let picked: Vec<u64> = pool.choose_multiple(rng, 2).copied().collect();

    let (p, q) = match picked.as_slice() {
        [p, q] => (*p, *q),
        _ => {
            return Err(Error::InsufficientPrimes {
                available: pool.len(),
            })
        }
    };

    let n = from_u64(p) * from_u64(q);
    let totient = from_u64(p - 1) * from_u64(q - 1);

    debug!(%p, %q, %n, %totient, "chose RSA modulus");

    Ok((n, totient))
}

/// Choose a public exponent by rejection sampling from the prime pool.
///
/// A candidate is accepted when it is below the totient and does not divide
/// it; being prime, it is then coprime with the totient.
pub fn choose_public_exponent<R>(
    primes: &BTreeSet<u64>,
    totient: &RsaBigInt,
    max_attempts: usize,
    rng: &mut R,
) -> Result<RsaBigInt>
where
    R: Rng + ?Sized,
{
    let pool: Vec<u64> = primes.iter().copied().collect();
    if pool.is_empty() {
        return Err(Error::InsufficientPrimes { available: 0 });
    }

    for attempt in 1..=max_attempts {
        let Some(&candidate) = pool.choose(rng) else {
            break;
        };
        let e = from_u64(candidate);

        if &e >= totient || (totient % &e).is_zero() {
            continue;
        }

        debug!(%e, attempt, "chose public exponent");
        return Ok(e);
    }

    Err(Error::GenerationExhausted {
        attempts: max_attempts,
    })
}

/// The private exponent is the inverse of `e` modulo the totient
pub fn derive_private_exponent(e: &RsaBigInt, totient: &RsaBigInt) -> Result<RsaBigInt> {
    let d = mod_inverse(e, totient)?;
    debug!("derived private exponent");
    Ok(d)
}

/// Generate RSA key pair from a filtered prime pool
pub fn generate_keypair<R>(primes: &BTreeSet<u64>, max_attempts: usize, rng: &mut R) -> Result<RsaKeyPair>
where
    R: Rng + ?Sized,
{
    let (n, totient) = choose_modulus(primes, rng)?;
    let e = choose_public_exponent(primes, &totient, max_attempts, rng)?;
    let d = derive_private_exponent(&e, &totient)?;

    Ok(RsaKeyPair {
        public_key: RsaPublicKey { n: n.clone(), e },
        private_key: RsaPrivateKey { n, d },
        totient: Some(totient),
    })
}

/// Load the prime pool the config describes: the prime table file if one is
/// set, otherwise a sieve up to the upper bound.
pub fn prime_pool(config: &Config) -> Result<BTreeSet<u64>> {
    let (low, high) = (config.min_prime_exclusive, config.max_prime_exclusive);

    let primes = match &config.prime_table {
        Some(path) => {
            info!(path = %path.display(), "loading prime numbers");
            load_primes(&read_prime_table(path)?, low, high)?
        }
        None => filter_primes(sieve(high)?, low, high),
    };

    debug!(count = primes.len(), low, high, "prime pool ready");
    Ok(primes)
}

/// Generate a key pair with the settings in `config`
pub fn generate_rsa_keys(config: &Config) -> Result<RsaKeyPair> {
    generate_rsa_keys_with_rng(config, &mut thread_rng())
}

pub fn generate_rsa_keys_with_rng<R>(config: &Config, rng: &mut R) -> Result<RsaKeyPair>
where
    R: Rng + ?Sized,
{
    let primes = prime_pool(config)?;
    let keypair = generate_keypair(&primes, config.max_attempts, rng)?;

    if keypair.public_key.n < packet_bound(config.group_size) {
        warn!(
            n = %keypair.public_key.n,
            group_size = config.group_size,
            "modulus is smaller than the packet size; RSA encryption will be refused"
        );
    }

    info!(bits = keypair.bit_length(), "generated RSA key pair");
    Ok(keypair)
}
