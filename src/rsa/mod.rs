// RSA Module - Main module file
// Textbook RSA: number theory, key generation, encryption and decryption

pub mod bigint;
pub mod ciphertext;
pub mod decrypt;
pub mod encrypt;
pub mod keygen;
pub mod primes;

pub use bigint::{extended_gcd, gcd, mod_inverse, mod_pow, RsaBigInt};
pub use ciphertext::Ciphertext;
pub use decrypt::{decrypt_text, rsa_decrypt};
pub use encrypt::{encrypt_text, encrypt_text_with_rng, rsa_encrypt};
pub use keygen::{
    choose_modulus, choose_public_exponent, derive_private_exponent, generate_keypair,
    generate_rsa_keys, generate_rsa_keys_with_rng, prime_pool, RsaKeyPair, RsaPrivateKey,
    RsaPublicKey,
};
pub use primes::{filter_primes, load_primes, sieve, MAX_SIEVE_LIMIT};
