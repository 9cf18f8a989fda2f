// Session State
// The alphabet, password and keys a user works with, and the operations that change them

use rand::{thread_rng, Rng};
use tracing::{info, warn};

use crate::analysis::{brute_force_shift, frequency_counts, ShiftCandidate};
use crate::cipher::{repeating_key_cipher, shift_cipher, Direction};
use crate::codec::{Alphabet, AlphabetKind};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::rsa::{
    encrypt_text_with_rng, generate_rsa_keys_with_rng, rsa_decrypt, RsaKeyPair, RsaPrivateKey, RsaPublicKey,
};
use crate::util::file_ops::{load_keys, save_keys};

/// Everything a user has selected so far.
///
/// Operations never modify a session in place; [`Session::apply`] returns the
/// next one, so a failed operation leaves the current session untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub alphabet_kind: AlphabetKind,
    pub alphabet: Alphabet,
    pub password: String,
    pub keys: Option<RsaKeyPair>,
}

/// Cipher used by an encrypt or decrypt operation
#[derive(Debug, Clone, PartialEq)]
pub enum Scheme {
    /// Shift by a fixed amount
    Shift(i64),
    /// Repeating-key cipher with the session password
    RepeatingKey,
    /// RSA. When encrypting, `recipient` overrides the session's own public key.
    Rsa { recipient: Option<RsaPublicKey> },
}

/// One menu action
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    SelectAlphabet(AlphabetKind),
    SetPassword(String),
    Encrypt { scheme: Scheme, message: String },
    Decrypt { scheme: Scheme, message: String },
    CrackShift(String),
    Frequencies(String),
    GenerateKeys,
    LoadKeys,
    SaveKeys,
    ShowPublic,
    ShowPrivate,
    Exit,
}

/// What an operation produced, for the front end to display
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    AlphabetSelected { kind: AlphabetKind, size: usize },
    /// `representable` is false when some password characters are outside the alphabet
    PasswordSet { representable: bool },
    Text(String),
    Candidates(Vec<ShiftCandidate>),
    Frequencies(Vec<(char, usize)>),
    KeysGenerated(RsaPublicKey),
    KeysLoaded(RsaPublicKey),
    KeysSaved,
    Public(RsaPublicKey),
    Private { password: String, private_key: RsaPrivateKey },
    Exit,
}

impl Session {
    /// Default alphabet and password, no keys
    pub fn new(config: &Config) -> Self {
        let kind = AlphabetKind::default();
        Self {
            alphabet_kind: kind,
            alphabet: kind.alphabet(),
            password: config.default_password.clone(),
            keys: None,
        }
    }

    pub fn with_keys(mut self, keys: RsaKeyPair) -> Self {
        self.keys = Some(keys);
        self
    }

    fn require_keys(&self) -> Result<&RsaKeyPair> {
        self.keys.as_ref().ok_or(Error::MissingKeys)
    }

    /// Run one operation and return the next session with its outcome
    pub fn apply(&self, operation: Operation, config: &Config) -> Result<(Session, Outcome)> {
        self.apply_with_rng(operation, config, &mut thread_rng())
    }

    pub fn apply_with_rng<R>(&self, operation: Operation, config: &Config, rng: &mut R) -> Result<(Session, Outcome)>
    where
        R: Rng + ?Sized,
    {
        let mut next = self.clone();

        let outcome = match operation {
            Operation::SelectAlphabet(kind) => {
                next.alphabet_kind = kind;
                next.alphabet = kind.alphabet();
                info!(alphabet = %kind, size = next.alphabet.len(), "selected alphabet");
                Outcome::AlphabetSelected {
                    kind,
                    size: next.alphabet.len(),
                }
            }

            Operation::SetPassword(password) => {
                let representable = password.chars().all(|c| next.alphabet.contains(c));
                if !representable {
                    warn!("password contains characters not available in the selected alphabet");
                }
                next.password = password;
                Outcome::PasswordSet { representable }
            }

            Operation::Encrypt { scheme, message } => Outcome::Text(self.encrypt(scheme, &message, config, rng)?),

            Operation::Decrypt { scheme, message } => Outcome::Text(self.decrypt(scheme, &message, config)?),

            Operation::CrackShift(ciphertext) => Outcome::Candidates(brute_force_shift(&ciphertext, &self.alphabet)),

            Operation::Frequencies(text) => Outcome::Frequencies(frequency_counts(&text)),

            Operation::GenerateKeys => {
                let keys = generate_rsa_keys_with_rng(config, rng)?;
                let public = keys.public_key.clone();
                next.keys = Some(keys);
                Outcome::KeysGenerated(public)
            }

            Operation::LoadKeys => {
                let (keys, password) = load_keys(config)?;
                let public = keys.public_key.clone();
                next.keys = Some(keys);
                next.password = password;
                Outcome::KeysLoaded(public)
            }

            Operation::SaveKeys => {
                save_keys(self.require_keys()?, &self.password, config)?;
                Outcome::KeysSaved
            }

            Operation::ShowPublic => Outcome::Public(self.require_keys()?.public_key.clone()),

            Operation::ShowPrivate => Outcome::Private {
                password: self.password.clone(),
                private_key: self.require_keys()?.private_key.clone(),
            },

            Operation::Exit => Outcome::Exit,
        };

        Ok((next, outcome))
    }

    fn encrypt<R>(&self, scheme: Scheme, message: &str, config: &Config, rng: &mut R) -> Result<String>
    where
        R: Rng + ?Sized,
    {
        match scheme {
            Scheme::Shift(shift) => Ok(shift_cipher(message, shift, &self.alphabet, Direction::Encrypt)),
            Scheme::RepeatingKey => repeating_key_cipher(message, &self.password, &self.alphabet, Direction::Encrypt),
            Scheme::Rsa { recipient } => {
                let public_key = match recipient {
                    Some(key) => key,
                    None => self.require_keys()?.public_key.clone(),
                };
                let ciphertext = encrypt_text_with_rng(message, &public_key, &self.alphabet, config.group_size, rng)?;
                Ok(ciphertext.to_string())
            }
        }
    }

    fn decrypt(&self, scheme: Scheme, message: &str, config: &Config) -> Result<String> {
        match scheme {
            Scheme::Shift(shift) => Ok(shift_cipher(message, shift, &self.alphabet, Direction::Decrypt)),
            Scheme::RepeatingKey => repeating_key_cipher(message, &self.password, &self.alphabet, Direction::Decrypt),
            Scheme::Rsa { .. } => rsa_decrypt(
                message,
                &self.require_keys()?.private_key,
                &self.alphabet,
                config.group_size,
            ),
        }
    }
}
