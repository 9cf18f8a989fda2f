// RSA Encryption Implementation
// Text -> symbol indices -> packets -> packet^e mod n

use rand::{thread_rng, Rng};
use tracing::debug;

use super::bigint::mod_pow;
use super::ciphertext::Ciphertext;
use super::keygen::RsaPublicKey;
use crate::codec::{packetize_with_rng, Alphabet};
use crate::error::{Error, Result};

/// Encrypt text with an RSA public key.
///
/// Characters outside the alphabet are dropped. Every packet has to be
/// smaller than the modulus, otherwise the message cannot be recovered and
/// encryption is refused.
pub fn encrypt_text(
    message: &str,
    public_key: &RsaPublicKey,
    alphabet: &Alphabet,
    group_size: usize,
) -> Result<Ciphertext> {
    encrypt_text_with_rng(message, public_key, alphabet, group_size, &mut thread_rng())
}

/// [`encrypt_text`] with the padding drawn from `rng`
pub fn encrypt_text_with_rng<R>(
    message: &str,
    public_key: &RsaPublicKey,
    alphabet: &Alphabet,
    group_size: usize,
    rng: &mut R,
) -> Result<Ciphertext>
where
    R: Rng + ?Sized,
{
    let digits = alphabet.encode(message);
    let packets = packetize_with_rng(&digits, group_size, rng)?;

    if let Some(packet) = packets.iter().find(|&p| p >= &public_key.n) {
        return Err(Error::PacketTooLarge {
            packet: packet.to_string(),
            modulus: public_key.n.to_string(),
        });
    }

    let blocks: Vec<_> = packets
        .iter()
        .map(|m| mod_pow(m, &public_key.e, &public_key.n))
        .collect();

    debug!(symbols = digits.len(), packets = blocks.len(), "RSA encrypted");

    Ok(Ciphertext::new(blocks))
}

/// Encrypt text and render it for transport
pub fn rsa_encrypt(
    message: &str,
    public_key: &RsaPublicKey,
    alphabet: &Alphabet,
    group_size: usize,
) -> Result<String> {
    Ok(encrypt_text(message, public_key, alphabet, group_size)?.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rsa::bigint::from_u64;

    // p = 10007, q = 10009
    fn test_public_key() -> RsaPublicKey {
        RsaPublicKey {
            n: from_u64(100_160_063),
            e: from_u64(10_039),
        }
    }

    #[test]
    fn test_encrypt_text() {
        let alphabet = Alphabet::default();
        let ciphertext = encrypt_text("Hello, RSA!", &test_public_key(), &alphabet, 4).unwrap();

        // 11 symbols in packets of 4: three packets
        assert_eq!(ciphertext.len(), 3);
        assert!(ciphertext.blocks.iter().all(|c| c < &test_public_key().n));
    }

    #[test]
    fn test_rsa_encrypt_transport_format() {
        let alphabet = Alphabet::all_caps();
        let text = rsa_encrypt("ATTACK", &test_public_key(), &alphabet, 4).unwrap();

        let tokens: Vec<&str> = text.split(' ').collect();
        assert_eq!(tokens.len(), 2);
        assert!(tokens.iter().all(|t| t.parse::<u64>().is_ok()));
    }

    #[test]
    fn test_encrypt_empty_message() {
        let ciphertext = encrypt_text("", &test_public_key(), &Alphabet::default(), 4).unwrap();
        assert_eq!(ciphertext.len(), 1);
    }

    #[test]
    fn test_modulus_too_small_for_packets() {
        let key = RsaPublicKey {
            n: from_u64(143),
            e: from_u64(7),
        };
        let result = encrypt_text("HELLO", &key, &Alphabet::all_caps(), 4);
        assert!(matches!(result, Err(Error::PacketTooLarge { .. })));
    }

    #[test]
    fn test_alphabet_beyond_two_digits() {
        // Symbols past index 99 cannot be packed
        let alphabet = Alphabet::new((0u32..120).filter_map(|i| char::from_u32(0x100 + i))).unwrap();
        let last = alphabet.symbols()[110].to_string();
        let result = encrypt_text(&last, &test_public_key(), &alphabet, 4);
        assert!(matches!(result, Err(Error::DigitOutOfRange { value: 110 })));
    }
}
