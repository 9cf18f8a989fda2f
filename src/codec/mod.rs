// Codec Module
// Text <-> symbol indices, and symbol indices <-> RSA-sized packets

pub mod alphabet;
pub mod packet;

pub use alphabet::{Alphabet, AlphabetKind, MAX_SYMBOLS};
pub use packet::{packet_bound, packet_width, packetize, packetize_with_rng, unpacketize};
