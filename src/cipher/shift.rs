// Shift Cipher
// Caesar-style constant shift modulo the alphabet size

use super::Direction;
use crate::codec::Alphabet;

/// Shift every symbol by `shift` positions, wrapping around the alphabet.
///
/// Any `i64` shift is fine; it is reduced modulo the alphabet size first.
/// Decryption shifts by `-shift`.
/// Characters outside the alphabet are dropped, as in [`Alphabet::encode`].
pub fn shift_cipher(text: &str, shift: i64, alphabet: &Alphabet, direction: Direction) -> String {
    let size = alphabet.len() as i64;
    // In [0, size) from here on
    let shift = shift.rem_euclid(size);
    let shift = match direction {
        Direction::Encrypt => shift,
        Direction::Decrypt => size - shift,
    };

    let shifted: Vec<u8> = alphabet
        .encode(text)
        .into_iter()
        // Result is in [0, size) and size <= 127
        .map(|i| ((i64::from(i) + shift) % size) as u8)
        .collect();

    alphabet.decode(&shifted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::AlphabetKind;
    use rstest::rstest;

    #[test]
    fn test_classic_caesar() {
        let alphabet = Alphabet::all_caps();
        assert_eq!(shift_cipher("HELLO", 3, &alphabet, Direction::Encrypt), "KHOOR");
        assert_eq!(shift_cipher("KHOOR", -3, &alphabet, Direction::Encrypt), "HELLO");
        assert_eq!(shift_cipher("KHOOR", 3, &alphabet, Direction::Decrypt), "HELLO");
    }

    #[test]
    fn test_wraps_around() {
        let alphabet = Alphabet::all_caps();
        assert_eq!(shift_cipher("XYZ", 3, &alphabet, Direction::Encrypt), "ABC");
        assert_eq!(shift_cipher("ABC", -29, &alphabet, Direction::Encrypt), "XYZ");
    }

    #[test]
    fn test_rot13_is_its_own_inverse() {
        let alphabet = Alphabet::all_caps();
        let once = shift_cipher("WHYDIDTHECHICKEN", 13, &alphabet, Direction::Encrypt);
        assert_eq!(shift_cipher(&once, 13, &alphabet, Direction::Encrypt), "WHYDIDTHECHICKEN");
    }

    #[test]
    fn test_drops_unrepresentable() {
        let alphabet = Alphabet::all_caps();
        assert_eq!(shift_cipher("HE LLO!", 1, &alphabet, Direction::Encrypt), "IFMMP");
    }

    #[test]
    fn test_extreme_shifts() {
        let alphabet = Alphabet::all_caps();
        // i64::MAX is 7 mod 26
        assert_eq!(shift_cipher("Z", i64::MAX, &alphabet, Direction::Encrypt), "G");
        // i64::MIN is 18 mod 26, so decrypting shifts forward by 8
        assert_eq!(shift_cipher("A", i64::MIN, &alphabet, Direction::Decrypt), "I");
    }

    #[rstest]
    fn test_involution(
        #[values(AlphabetKind::AllCaps, AlphabetKind::CapsPlus, AlphabetKind::Ascii94, AlphabetKind::Default100)]
        kind: AlphabetKind,
        #[values(i64::MIN, -1000, -27, -3, 0, 1, 26, 99, 12345, i64::MAX)] shift: i64,
    ) {
        let alphabet = kind.alphabet();
        let text: String = alphabet.symbols().iter().collect();
        let cipher = shift_cipher(&text, shift, &alphabet, Direction::Encrypt);
        assert_eq!(shift_cipher(&cipher, shift, &alphabet, Direction::Decrypt), text);
    }
}
