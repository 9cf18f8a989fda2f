// File Operations for Key Material
// Reads prime tables, saves and loads RSA keys and the password as JSON

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::Config;
use crate::error::Result;
use crate::rsa::{RsaBigInt, RsaKeyPair};

/// Public half of the key files: safe to hand out
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicRecord {
    #[serde(with = "decimal")]
    pub rsa_number: RsaBigInt,
    #[serde(with = "decimal")]
    pub public_key: RsaBigInt,
}

/// Private half of the key files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivateRecord {
    #[serde(with = "decimal")]
    pub private_key: RsaBigInt,
    pub password: String,
}

/// Big integers are written as decimal strings. Plain JSON numbers are
/// accepted when reading, since older key files store them that way.
mod decimal {
    use serde::{de, Deserialize, Deserializer, Serializer};

    use crate::rsa::RsaBigInt;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Text(String),
        Number(u64),
    }

    pub fn serialize<S: Serializer>(value: &RsaBigInt, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_str_radix(10))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<RsaBigInt, D::Error> {
        match Repr::deserialize(deserializer)? {
            Repr::Number(n) => Ok(RsaBigInt::from(n)),
            Repr::Text(text) => {
                let text = text.trim();
                if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(de::Error::custom(format!("'{}' is not a decimal integer", text)));
                }
                RsaBigInt::parse_bytes(text.as_bytes(), 10)
                    .ok_or_else(|| de::Error::custom(format!("'{}' is not a decimal integer", text)))
            }
        }
    }
}

/// Read entire file into a string
pub fn read_file(path: &Path) -> Result<String> {
    let mut file = File::open(path)?;
    let mut data = String::new();
    file.read_to_string(&mut data)?;
    Ok(data)
}

/// Write data to file
pub fn write_file(path: &Path, data: &str) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    Ok(())
}

/// Read a JSON file
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = read_file(path)?;
    Ok(serde_json::from_str(&text)?)
}

/// Write a JSON file
pub fn write_json<T: Serialize>(path: &Path, content: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(content)?;
    write_file(path, &text)
}

/// Read the prime table; parsing happens in the key generator
pub fn read_prime_table(path: &Path) -> Result<String> {
    read_file(path)
}

/// Save the key pair and password to the files named in `config`
pub fn save_keys(keypair: &RsaKeyPair, password: &str, config: &Config) -> Result<()> {
    let public = PublicRecord {
        rsa_number: keypair.public_key.n.clone(),
        public_key: keypair.public_key.e.clone(),
    };
    let private = PrivateRecord {
        private_key: keypair.private_key.d.clone(),
        password: password.to_string(),
    };

    info!(path = %config.public_key_file.display(), "saving RSA number and public key");
    write_json(&config.public_key_file, &public)?;

    info!(path = %config.private_key_file.display(), "saving password and private key");
    write_json(&config.private_key_file, &private)?;

    Ok(())
}

/// Load the key pair and password saved by [`save_keys`]
pub fn load_keys(config: &Config) -> Result<(RsaKeyPair, String)> {
    info!(path = %config.public_key_file.display(), "loading RSA number and public key");
    let public: PublicRecord = read_json(&config.public_key_file)?;

    info!(path = %config.private_key_file.display(), "loading password and private key");
    let private: PrivateRecord = read_json(&config.private_key_file)?;

    let keypair = RsaKeyPair::from_parts(public.rsa_number, public.public_key, private.private_key);
    Ok((keypair, private.password))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::rsa::bigint::from_u64;

    fn temp_config(dir: &Path) -> Config {
        Config::default().with_key_files(dir.join("rsa.json"), dir.join("private.json"))
    }

    #[test]
    fn test_save_and_load_keys() {
        let dir = tempfile::tempdir().unwrap();
        let config = temp_config(dir.path());
        let keypair = RsaKeyPair::from_parts(from_u64(100_160_063), from_u64(10_039), from_u64(30_932_791));

        save_keys(&keypair, "FIDELIO", &config).unwrap();
        let (loaded, password) = load_keys(&config).unwrap();

        assert_eq!(loaded, keypair);
        assert_eq!(password, "FIDELIO");
    }

    #[test]
    fn test_public_file_has_no_private_material() {
        let dir = tempfile::tempdir().unwrap();
        let config = temp_config(dir.path());
        let keypair = RsaKeyPair::from_parts(from_u64(3233), from_u64(17), from_u64(2753));

        save_keys(&keypair, "SECRET", &config).unwrap();
        let public = read_file(&config.public_key_file).unwrap();

        assert!(public.contains("\"3233\""));
        assert!(!public.contains("2753"));
        assert!(!public.contains("SECRET"));
    }

    #[test]
    fn test_load_numeric_records() {
        let dir = tempfile::tempdir().unwrap();
        let config = temp_config(dir.path());
        write_file(&config.public_key_file, r#"{"rsa_number": 3233, "public_key": 17}"#).unwrap();
        write_file(&config.private_key_file, r#"{"private_key": 2753, "password": "FIDELIO"}"#).unwrap();

        let (keypair, _) = load_keys(&config).unwrap();
        assert_eq!(keypair.public_key.n, from_u64(3233));
        assert_eq!(keypair.private_key.d, from_u64(2753));
    }

    #[test]
    fn test_load_rejects_bad_number() {
        let dir = tempfile::tempdir().unwrap();
        let config = temp_config(dir.path());
        write_file(&config.public_key_file, r#"{"rsa_number": "32x3", "public_key": "17"}"#).unwrap();
        write_file(&config.private_key_file, r#"{"private_key": "1", "password": ""}"#).unwrap();

        assert!(matches!(load_keys(&config), Err(Error::Json(_))));
    }

    #[test]
    fn test_load_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(load_keys(&temp_config(dir.path())), Err(Error::Io(_))));
    }
}
