// Repeating-Key Cipher
// Polyalphabetic shift driven by a cyclically repeated password (Dodgson's cipher)

use super::Direction;
use crate::codec::Alphabet;
use crate::error::{Error, Result};

/// Password indices, after checking every character belongs to the alphabet
fn password_key(password: &str, alphabet: &Alphabet) -> Result<Vec<u8>> {
    if let Some(symbol) = password.chars().find(|&c| !alphabet.contains(c)) {
        return Err(Error::UnrepresentablePassword { symbol });
    }

    let key = alphabet.encode(password);
    if key.is_empty() {
        return Err(Error::EmptyPassword);
    }

    Ok(key)
}

/// Shift each symbol by the matching password symbol, repeating the password
/// as often as needed. Decryption subtracts instead of adding.
pub fn repeating_key_cipher(
    text: &str,
    password: &str,
    alphabet: &Alphabet,
    direction: Direction,
) -> Result<String> {
    let key = password_key(password, alphabet)?;
    let size = alphabet.len() as i16;

    let shifted: Vec<u8> = alphabet
        .encode(text)
        .into_iter()
        .zip(key.iter().cycle())
        .map(|(symbol, &k)| {
            let (symbol, k) = (i16::from(symbol), i16::from(k));
            let value = match direction {
                Direction::Encrypt => symbol + k,
                Direction::Decrypt => symbol - k,
            };
            value.rem_euclid(size) as u8
        })
        .collect();

    Ok(alphabet.decode(&shifted))
}
