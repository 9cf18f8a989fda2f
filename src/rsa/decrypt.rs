// RSA Decryption Implementation
// block^d mod n -> packets -> symbol indices -> text

use tracing::debug;

use super::bigint::mod_pow;
use super::ciphertext::Ciphertext;
use super::keygen::RsaPrivateKey;
use crate::codec::{unpacketize, Alphabet};
use crate::error::{Error, Result};

/// Decrypt a ciphertext with an RSA private key
pub fn decrypt_text(
    ciphertext: &Ciphertext,
    private_key: &RsaPrivateKey,
    alphabet: &Alphabet,
    group_size: usize,
) -> Result<String> {
    if ciphertext.is_empty() {
        return Err(Error::EmptyCiphertext);
    }

    // A block at or above n cannot have come from this key
    if let Some(block) = ciphertext.blocks.iter().find(|&c| c >= &private_key.n) {
        return Err(Error::CiphertextOutOfRange {
            block: block.to_string(),
            modulus: private_key.n.to_string(),
        });
    }

    let packets: Vec<_> = ciphertext
        .blocks
        .iter()
        .map(|c| mod_pow(c, &private_key.d, &private_key.n))
        .collect();

    let digits = unpacketize(&packets, group_size)?;
    debug!(packets = packets.len(), symbols = digits.len(), "RSA decrypted");

    Ok(alphabet.decode(&digits))
}

/// Parse transport text and decrypt it
pub fn rsa_decrypt(
    ciphertext: &str,
    private_key: &RsaPrivateKey,
    alphabet: &Alphabet,
    group_size: usize,
) -> Result<String> {
    let ciphertext: Ciphertext = ciphertext.parse()?;
    decrypt_text(&ciphertext, private_key, alphabet, group_size)
}
