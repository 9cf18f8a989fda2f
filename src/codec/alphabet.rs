// Alphabet Codec
// Maps text to small integers and back for a chosen symbol set

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Largest alphabet the ciphers accept.
pub const MAX_SYMBOLS: usize = 127;

/// Extra symbols appended to printable ASCII in the default alphabet
const DEFAULT_EXTRAS: [char; 5] = ['∃', '∀', '∑', '¬', '∞'];

/// An ordered set of unique characters.
///
/// Each character encodes to its position. The reverse lookup is built once on
/// construction and never changes afterwards.
#[derive(Debug, Clone)]
pub struct Alphabet {
    symbols: Vec<char>,
    index: HashMap<char, u8>,
}

impl Alphabet {
    /// Build an alphabet from its symbols, in encoding order.
    pub fn new<I>(symbols: I) -> Result<Self>
    where
        I: IntoIterator<Item = char>,
    {
        let symbols: Vec<char> = symbols.into_iter().collect();

        if symbols.is_empty() {
            return Err(Error::InvalidAlphabet {
                reason: "no symbols".to_string(),
            });
        }
        if symbols.len() > MAX_SYMBOLS {
            return Err(Error::InvalidAlphabet {
                reason: format!("{} symbols, at most {} allowed", symbols.len(), MAX_SYMBOLS),
            });
        }

        let mut index = HashMap::with_capacity(symbols.len());
        for (position, &symbol) in symbols.iter().enumerate() {
            // position < 127, fits in u8
            if index.insert(symbol, position as u8).is_some() {
                return Err(Error::DuplicateSymbol { symbol });
            }
        }

        Ok(Self { symbols, index })
    }

    /// The 26 capital letters
    pub fn all_caps() -> Self {
        Self::from_preset(('A'..='Z').collect())
    }

    /// Digits, space, capital letters and some punctuation
    pub fn caps_plus() -> Self {
        let symbols = ('0'..='9')
            .chain(std::iter::once(' '))
            .chain('A'..='Z')
            .chain([',', '.', '?', '!', '/'])
            .collect();
        Self::from_preset(symbols)
    }

    /// ASCII characters 32 through 125
    pub fn ascii_94() -> Self {
        Self::from_preset((32u8..=125).map(char::from).collect())
    }

    /// ASCII characters 32 through 126 plus five logic symbols, 100 in total
    pub fn default_100() -> Self {
        let symbols = (32u8..=126)
            .map(char::from)
            .chain(DEFAULT_EXTRAS)
            .collect();
        Self::from_preset(symbols)
    }

    fn from_preset(symbols: Vec<char>) -> Self {
        let index = symbols
            .iter()
            .enumerate()
            .map(|(position, &symbol)| (symbol, position as u8))
            .collect();
        Self { symbols, index }
    }

    /// Number of symbols
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Always false; an alphabet has at least one symbol
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }

    pub fn contains(&self, symbol: char) -> bool {
        self.index.contains_key(&symbol)
    }

    /// Index of a single character, if it belongs to the alphabet
    pub fn index_of(&self, symbol: char) -> Option<u8> {
        self.index.get(&symbol).copied()
    }

    /// Encode text as symbol indices.
    /// Characters outside the alphabet are dropped.
    pub fn encode(&self, text: &str) -> Vec<u8> {
        text.chars().filter_map(|c| self.index_of(c)).collect()
    }

    /// Decode symbol indices back into text.
    /// Indices past the end of the alphabet are dropped.
    pub fn decode(&self, indices: &[u8]) -> String {
        indices
            .iter()
            .filter_map(|&i| self.symbols.get(i as usize))
            .collect()
    }
}

impl PartialEq for Alphabet {
    fn eq(&self, other: &Self) -> bool {
        self.symbols == other.symbols
    }
}

impl Eq for Alphabet {}

impl Default for Alphabet {
    fn default() -> Self {
        Self::default_100()
    }
}

/// The built-in alphabets a session can switch between
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlphabetKind {
    AllCaps,
    CapsPlus,
    Ascii94,
    #[default]
    Default100,
}

impl AlphabetKind {
    pub const ALL: [AlphabetKind; 4] = [
        AlphabetKind::AllCaps,
        AlphabetKind::CapsPlus,
        AlphabetKind::Ascii94,
        AlphabetKind::Default100,
    ];

    pub fn alphabet(self) -> Alphabet {
        match self {
            AlphabetKind::AllCaps => Alphabet::all_caps(),
            AlphabetKind::CapsPlus => Alphabet::caps_plus(),
            AlphabetKind::Ascii94 => Alphabet::ascii_94(),
            AlphabetKind::Default100 => Alphabet::default_100(),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            AlphabetKind::AllCaps => "ALL_CAPS",
            AlphabetKind::CapsPlus => "CAPS_PLUS",
            AlphabetKind::Ascii94 => "ASCII_94",
            AlphabetKind::Default100 => "DEFAULT_100",
        }
    }
}

impl fmt::Display for AlphabetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AlphabetKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        AlphabetKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnknownAlphabet {
                name: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_preset_sizes() {
        assert_eq!(Alphabet::all_caps().len(), 26);
        assert_eq!(Alphabet::caps_plus().len(), 42);
        assert_eq!(Alphabet::ascii_94().len(), 94);
        assert_eq!(Alphabet::default_100().len(), 100);
    }

    #[test]
    fn test_presets_have_unique_symbols() {
        for kind in AlphabetKind::ALL {
            let preset = kind.alphabet();
            let rebuilt = Alphabet::new(preset.symbols().iter().copied()).unwrap();
            assert_eq!(preset, rebuilt, "{kind}");
        }
    }

    #[rstest]
    #[case::all_caps(AlphabetKind::AllCaps, "ATTACKATDAWN")]
    #[case::caps_plus(AlphabetKind::CapsPlus, "MEET AT 10, OK?")]
    #[case::ascii_94(AlphabetKind::Ascii94, "Hello, World! 1+1=2")]
    #[case::default_100(AlphabetKind::Default100, "∀x ∃y: x ≠ y ~ ∞")]
    fn test_roundtrip(#[case] kind: AlphabetKind, #[case] text: &str) {
        let alphabet = kind.alphabet();
        let representable: String = text.chars().filter(|&c| alphabet.contains(c)).collect();
        assert_eq!(alphabet.decode(&alphabet.encode(text)), representable);
    }

    #[test]
    fn test_roundtrip_every_symbol() {
        for kind in AlphabetKind::ALL {
            let alphabet = kind.alphabet();
            let text: String = alphabet.symbols().iter().collect();
            assert_eq!(alphabet.decode(&alphabet.encode(&text)), text);
        }
    }

    #[test]
    fn test_encode_drops_unknown_characters() {
        let alphabet = Alphabet::all_caps();
        assert_eq!(alphabet.encode("A b-C"), vec![0, 2]);
    }

    #[test]
    fn test_decode_drops_out_of_range_indices() {
        let alphabet = Alphabet::all_caps();
        assert_eq!(alphabet.decode(&[7, 26, 4, 99, 11]), "HEL");
    }

    #[test]
    fn test_rejects_bad_definitions() {
        assert!(matches!(
            Alphabet::new("".chars()),
            Err(Error::InvalidAlphabet { .. })
        ));
        assert!(matches!(
            Alphabet::new("ABCA".chars()),
            Err(Error::DuplicateSymbol { symbol: 'A' })
        ));
        let too_many = (0u32..200).filter_map(char::from_u32);
        assert!(matches!(
            Alphabet::new(too_many),
            Err(Error::InvalidAlphabet { .. })
        ));
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!("all_caps".parse::<AlphabetKind>().unwrap(), AlphabetKind::AllCaps);
        assert_eq!(" DEFAULT_100 ".parse::<AlphabetKind>().unwrap(), AlphabetKind::Default100);
        assert!("klingon".parse::<AlphabetKind>().is_err());
    }
}
