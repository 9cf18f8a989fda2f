// Error Types
// Every failure the codecs, key generator and ciphers can report

use thiserror::Error;

/// Result type for library operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Library error.
///
/// Representation problems during encoding never show up here: characters and
/// indices that do not fit the active alphabet are dropped instead.
#[derive(Error, Debug)]
pub enum Error {
    // Alphabet definitions
    #[error("Invalid alphabet: {reason}")]
    InvalidAlphabet { reason: String },

    #[error("Invalid alphabet: symbol {symbol:?} appears more than once")]
    DuplicateSymbol { symbol: char },

    #[error("Unknown alphabet '{name}'")]
    UnknownAlphabet { name: String },

    // Packet codec
    #[error("Group size must be between 1 and 99, got {group_size}")]
    InvalidGroupSize { group_size: usize },

    #[error("Digit {value} does not fit in a two-digit group")]
    DigitOutOfRange { value: u8 },

    #[error("No packets to unpack")]
    EmptyPacketStream,

    #[error("Packet {packet} is wider than {width} digits")]
    PacketOverflow { packet: String, width: usize },

    #[error("Invalid padding marker {marker}")]
    InvalidPadding { marker: u8 },

    // Number theory
    #[error("Precondition violated: {context}")]
    Precondition { context: String },

    #[error("{value} is not invertible modulo {modulus}")]
    NotInvertible { value: String, modulus: String },

    // Key generation
    #[error("Need at least two primes to build a modulus, found {available}")]
    InsufficientPrimes { available: usize },

    #[error("Gave up looking for a public exponent after {attempts} attempts")]
    GenerationExhausted { attempts: usize },

    #[error("Cannot sieve primes below {limit}; the built-in limit is {max}, use a prime table file")]
    InvalidPrimeRange { limit: u64, max: u64 },

    #[error("Invalid prime table entry '{token}'")]
    PrimeTableParse { token: String },

    // Ciphers
    #[error("Password is empty under the selected alphabet")]
    EmptyPassword,

    #[error("Password character {symbol:?} is not in the selected alphabet")]
    UnrepresentablePassword { symbol: char },

    #[error("Packet {packet} is not smaller than the RSA modulus {modulus}")]
    PacketTooLarge { packet: String, modulus: String },

    #[error("Ciphertext block {block} is not smaller than the RSA modulus {modulus}")]
    CiphertextOutOfRange { block: String, modulus: String },

    #[error("Ciphertext token '{token}' is not a decimal integer")]
    CiphertextParse { token: String },

    #[error("Ciphertext is empty")]
    EmptyCiphertext,

    #[error("No RSA keys loaded")]
    MissingKeys,

    // Storage
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
