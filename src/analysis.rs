// Cryptanalysis
// Brute-force search over shift keys and character frequency counts

use std::collections::HashMap;

use crate::cipher::{shift_cipher, Direction};
use crate::codec::Alphabet;

/// One guess at a shift-cipher plaintext
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftCandidate {
    pub shift: i64,
    pub plaintext: String,
}

/// Decrypt `ciphertext` with every possible shift, 0 through N-1.
/// A human reads the list and spots the real message.
pub fn brute_force_shift(ciphertext: &str, alphabet: &Alphabet) -> Vec<ShiftCandidate> {
    (0..alphabet.len() as i64)
        .map(|shift| ShiftCandidate {
            shift,
            plaintext: shift_cipher(ciphertext, shift, alphabet, Direction::Decrypt),
        })
        .collect()
}

/// How often each character appears, most frequent first.
/// Ties are listed in character order.
pub fn frequency_counts(text: &str) -> Vec<(char, usize)> {
    let mut counts: HashMap<char, usize> = HashMap::new();
    for c in text.chars() {
        *counts.entry(c).or_default() += 1;
    }

    let mut counts: Vec<(char, usize)> = counts.into_iter().collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    counts
}
