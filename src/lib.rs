// Fidelio
// Classical ciphers and textbook RSA for teaching cryptography

//! Encode text under a chosen alphabet, encrypt it with a shift cipher, a
//! repeating-key cipher or textbook RSA, and try simple cryptanalysis.
//!
//! None of this is secure. Keys are built from five-digit primes and nothing
//! is constant time; the point is to show how the arithmetic works.

pub mod analysis;
pub mod cipher;
pub mod codec;
pub mod config;
pub mod error;
pub mod rsa;
pub mod session;
pub mod ui;
pub mod util;

pub use cipher::{repeating_key_cipher, shift_cipher, Direction};
pub use codec::{Alphabet, AlphabetKind};
pub use config::Config;
pub use error::{Error, Result};
pub use rsa::{generate_rsa_keys, rsa_decrypt, rsa_encrypt, Ciphertext, RsaKeyPair, RsaPrivateKey, RsaPublicKey};
pub use session::{Operation, Outcome, Scheme, Session};

/// Encode text as alphabet indices, dropping characters the alphabet lacks
pub fn encode_text(text: &str, alphabet: &Alphabet) -> Vec<u8> {
    alphabet.encode(text)
}

/// Decode alphabet indices, dropping indices past the end of the alphabet
pub fn decode_text(indices: &[u8], alphabet: &Alphabet) -> String {
    alphabet.decode(indices)
}
