// RSA Ciphertext
// Encrypted packets and their whitespace-separated decimal transport form

use std::fmt;
use std::str::FromStr;

use super::bigint::RsaBigInt;
use crate::error::{Error, Result};

/// Encrypted packets, in message order.
///
/// Rendered as decimal numbers separated by single spaces so the text can be
/// copied between users; parsing accepts any whitespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ciphertext {
    pub blocks: Vec<RsaBigInt>,
}

impl Ciphertext {
    pub fn new(blocks: Vec<RsaBigInt>) -> Self {
        Self { blocks }
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

impl fmt::Display for Ciphertext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, block) in self.blocks.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", block)?;
        }
        Ok(())
    }
}

impl FromStr for Ciphertext {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let blocks = s
            .split_whitespace()
            .map(|token| {
                // from_str_radix tolerates '_' separators; transport text never has them
                if !token.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(Error::CiphertextParse {
                        token: token.to_string(),
                    });
                }
                RsaBigInt::parse_bytes(token.as_bytes(), 10).ok_or_else(|| Error::CiphertextParse {
                    token: token.to_string(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        if blocks.is_empty() {
            return Err(Error::EmptyCiphertext);
        }

        Ok(Self { blocks })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rsa::bigint::from_u64;

    #[test]
    fn test_display() {
        let ciphertext = Ciphertext::new(vec![from_u64(12), from_u64(0), from_u64(987654321)]);
        assert_eq!(ciphertext.to_string(), "12 0 987654321");
    }

    #[test]
    fn test_parse_any_whitespace() {
        let ciphertext: Ciphertext = "  12\t0\n987654321 ".parse().unwrap();
        assert_eq!(ciphertext.blocks, vec![from_u64(12), from_u64(0), from_u64(987654321)]);
    }

    #[test]
    fn test_parse_names_bad_token() {
        for bad in ["12 x7 3", "12 -3", "1_000", "4.5"] {
            let err = bad.parse::<Ciphertext>().unwrap_err();
            assert!(matches!(err, Error::CiphertextParse { .. }), "{bad}");
        }

        let err = "12 x7 3".parse::<Ciphertext>().unwrap_err();
        assert!(err.to_string().contains("'x7'"));
    }

    #[test]
    fn test_parse_empty() {
        assert!(matches!("   ".parse::<Ciphertext>(), Err(Error::EmptyCiphertext)));
    }
}
