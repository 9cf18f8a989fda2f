// Configuration
// Key generation bounds, packet sizing, file locations and session defaults

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Settings shared by the key generator, the RSA cipher and key storage.
///
/// Every field has a default, so a config file only needs the keys it changes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Primes at or below this value are not used for keys
    pub min_prime_exclusive: u64,
    /// Primes at or above this value are not used for keys
    pub max_prime_exclusive: u64,
    /// Public exponent candidates drawn before giving up
    pub max_attempts: usize,
    /// Symbols per RSA packet
    pub group_size: usize,
    /// Prime table file; a sieve is used when absent
    pub prime_table: Option<PathBuf>,
    pub public_key_file: PathBuf,
    pub private_key_file: PathBuf,
    pub default_shift: i64,
    pub default_password: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            min_prime_exclusive: 10_000,
            max_prime_exclusive: 100_000,
            max_attempts: 1000,
            group_size: 4,
            prime_table: None,
            public_key_file: PathBuf::from("rsa.json"),
            private_key_file: PathBuf::from("private.json"),
            default_shift: -3,
            default_password: "FIDELIO".to_string(),
        }
    }
}

impl Config {
    /// Read a JSON config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn with_prime_range(mut self, min_exclusive: u64, max_exclusive: u64) -> Self {
        self.min_prime_exclusive = min_exclusive;
        self.max_prime_exclusive = max_exclusive;
        self
    }

    pub fn with_max_attempts(mut self, attempts: usize) -> Self {
        self.max_attempts = attempts;
        self
    }

    pub fn with_group_size(mut self, size: usize) -> Self {
        self.group_size = size;
        self
    }

    pub fn with_prime_table(mut self, path: impl Into<PathBuf>) -> Self {
        self.prime_table = Some(path.into());
        self
    }

    pub fn with_key_files(mut self, public: impl Into<PathBuf>, private: impl Into<PathBuf>) -> Self {
        self.public_key_file = public.into();
        self.private_key_file = private.into();
        self
    }
}
