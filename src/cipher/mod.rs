// Classical Ciphers
// Additive ciphers over alphabet indices

pub mod repeating_key;
pub mod shift;

pub use repeating_key::repeating_key_cipher;
pub use shift::shift_cipher;

/// Which way a symmetric cipher runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Encrypt,
    Decrypt,
}
