// Terminal Menu
// Reads menu choices, turns them into session operations and prints the outcome

use std::io::{BufRead, Write};

use tracing::{debug, info};

use crate::codec::AlphabetKind;
use crate::config::Config;
use crate::rsa::{RsaBigInt, RsaPublicKey};
use crate::session::{Operation, Outcome, Scheme, Session};

const MAIN_MENU: &str = "
What would you like to do?

[A] select Alphabet

[C] crack a Caesar cipher
[F] Frequency analysis
[D] Decrypt message
[E] Encrypt message

[G] Generate rsa number and keys

[L] Load password, rsa number, and keys
[M] Modify password

[P] show Password and private key
[R] show RSA number and public key
[S] Save password, rsa number, and keys

[X] exit
";

const ALPHABET_MENU: &str = "
Choose an alphabet or hit Enter to use default.
[A] ALL_CAPS:    26 capital letters and nothing else
[B] CAPS_PLUS:   capital letters, digits, some punctuation
[C] ASCII_94:    ASCII chars 32 through 125
[D] DEFAULT_100: ASCII chars 32 through 126 and five logic symbols
";

const SCHEME_MENU: &str = "
Choose encryption scheme:
[C] Caesar
[D] Dodgson
[R] RSA
";

/// The menu loop. Generic over its input and output so it can be scripted.
pub struct App<I, O> {
    session: Session,
    config: Config,
    input: I,
    output: O,
}

impl<I: BufRead, O: Write> App<I, O> {
    pub fn new(config: Config, input: I, output: O) -> Self {
        Self {
            session: Session::new(&config),
            config,
            input,
            output,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Try the saved key files; missing files are not an error at startup
    pub fn load_saved_keys(&mut self) {
        match self.session.apply(Operation::LoadKeys, &self.config) {
            Ok((session, _)) => {
                info!("loaded saved keys");
                self.session = session;
            }
            Err(err) => debug!(%err, "no saved keys"),
        }
    }

    /// Run until the user exits or input ends
    pub fn run(&mut self) -> std::io::Result<()> {
        loop {
            let Some(operation) = self.read_operation()? else {
                continue;
            };

            match self.session.apply(operation, &self.config) {
                Ok((session, Outcome::Exit)) => {
                    self.session = session;
                    return Ok(());
                }
                Ok((session, outcome)) => {
                    self.session = session;
                    self.show(&outcome)?;
                }
                Err(err) => writeln!(self.output, "\n*** {}", err)?,
            }
        }
    }

    /// Print `text` and read one trimmed line. End of input reads as "x".
    fn prompt(&mut self, text: &str) -> std::io::Result<String> {
        writeln!(self.output, "{}", text)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok("x".to_string());
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    fn read_operation(&mut self) -> std::io::Result<Option<Operation>> {
        let selection = self.prompt(MAIN_MENU)?.trim().to_lowercase();

        let operation = match selection.as_str() {
            "a" => Operation::SelectAlphabet(self.read_alphabet()?),
            "c" => Operation::CrackShift(self.prompt("\nEnter encrypted message")?),
            "f" => Operation::Frequencies(self.prompt("\nEnter the message to analyze")?),
            "d" => match self.read_scheme(false)? {
                Some((scheme, message)) => Operation::Decrypt { scheme, message },
                None => return Ok(None),
            },
            "e" => match self.read_scheme(true)? {
                Some((scheme, message)) => Operation::Encrypt { scheme, message },
                None => return Ok(None),
            },
            "g" => {
                writeln!(self.output, "\nGenerating RSA keys...")?;
                Operation::GenerateKeys
            }
            "l" => Operation::LoadKeys,
            "m" => Operation::SetPassword(self.prompt("\nEnter a password for polyalphabetic encryption.")?),
            "p" => Operation::ShowPrivate,
            "r" => Operation::ShowPublic,
            "s" => Operation::SaveKeys,
            "x" => Operation::Exit,
            other => {
                writeln!(self.output, "\nI'm sorry, I don't know what '{}' means.", other)?;
                return Ok(None);
            }
        };

        Ok(Some(operation))
    }

    fn read_alphabet(&mut self) -> std::io::Result<AlphabetKind> {
        let kind = match self.prompt(ALPHABET_MENU)?.trim().to_lowercase().as_str() {
            "a" => AlphabetKind::AllCaps,
            "b" => AlphabetKind::CapsPlus,
            "c" => AlphabetKind::Ascii94,
            _ => AlphabetKind::Default100,
        };
        Ok(kind)
    }

    fn read_scheme(&mut self, encrypting: bool) -> std::io::Result<Option<(Scheme, String)>> {
        let choice = self.prompt(SCHEME_MENU)?.trim().to_lowercase();
        if !matches!(choice.as_str(), "c" | "d" | "r") {
            writeln!(self.output, "\n*** Unknown method '{}'", choice)?;
            return Ok(None);
        }

        let message = self.prompt("\nEnter message:")?;

        let scheme = match choice.as_str() {
            "c" => {
                let shift = self.prompt("Enter shift amount (or hit Enter to use default)")?;
                let shift = shift.trim();
                if shift.is_empty() {
                    Scheme::Shift(self.config.default_shift)
                } else {
                    match shift.parse::<i64>() {
                        Ok(shift) => Scheme::Shift(shift),
                        Err(_) => {
                            writeln!(self.output, "\n*** '{}' is not a whole number", shift)?;
                            return Ok(None);
                        }
                    }
                }
            }
            "d" => Scheme::RepeatingKey,
            _ if encrypting => match self.read_recipient()? {
                Ok(recipient) => Scheme::Rsa { recipient },
                Err(problem) => {
                    writeln!(self.output, "\n*** {}", problem)?;
                    return Ok(None);
                }
            },
            _ => Scheme::Rsa { recipient: None },
        };

        Ok(Some((scheme, message)))
    }

    /// Someone else's public key, or None to use our own.
    /// The inner error is the message to show the user.
    fn read_recipient(&mut self) -> std::io::Result<Result<Option<RsaPublicKey>, String>> {
        let n = self.prompt("Enter recipient's RSA number. (Hit Enter to use yours)")?;
        let e = self.prompt("Enter recipient's public key. (Hit Enter to use yours)")?;

        let recipient = match (n.trim(), e.trim()) {
            ("", "") => Ok(None),
            ("", _) => Err("Recipient's public key given without an RSA number".to_string()),
            (_, "") => Err("Recipient's RSA number given without a public key".to_string()),
            (n, e) => {
                let parse = |token: &str| {
                    RsaBigInt::parse_bytes(token.as_bytes(), 10)
                        .ok_or_else(|| format!("'{}' is not a decimal integer", token))
                };
                parse(n).and_then(|n| Ok(Some(RsaPublicKey { n, e: parse(e)? })))
            }
        };
        Ok(recipient)
    }

    fn show(&mut self, outcome: &Outcome) -> std::io::Result<()> {
        let out = &mut self.output;
        writeln!(out)?;

        match outcome {
            Outcome::AlphabetSelected { kind, size } => {
                writeln!(out, "Using {}-char alphabet '{}'", size, kind)?;
            }
            Outcome::PasswordSet { representable: true } => writeln!(out, "Password accepted")?,
            Outcome::PasswordSet { representable: false } => writeln!(
                out,
                "*** Warning: password contains characters not available in selected alphabet!"
            )?,
            Outcome::Text(text) => writeln!(out, "{}", text)?,
            Outcome::Candidates(candidates) => {
                writeln!(out, "Showing all possible Caesar decryptions...")?;
                for candidate in candidates {
                    writeln!(out, "{}\t{}", candidate.shift, candidate.plaintext)?;
                }
            }
            Outcome::Frequencies(counts) => {
                for (symbol, count) in counts {
                    writeln!(out, "{:?}\t{}", symbol, count)?;
                }
            }
            Outcome::KeysGenerated(public) | Outcome::KeysLoaded(public) | Outcome::Public(public) => {
                writeln!(out, "RSA number: {}", public.n)?;
                writeln!(out, "Public key: {}", public.e)?;
            }
            Outcome::KeysSaved => writeln!(
                out,
                "Saved keys to {} and {}",
                self.config.public_key_file.display(),
                self.config.private_key_file.display()
            )?,
            Outcome::Private { password, private_key } => {
                writeln!(out, "Password:    {}", password)?;
                writeln!(out, "Private key: {}", private_key.d)?;
            }
            Outcome::Exit => {}
        }

        Ok(())
    }
}
