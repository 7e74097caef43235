//! OpenSSH public key parsing and fingerprints
//!
//! The provider references account keys by their MD5 fingerprint, so that is
//! what gets sent on droplet creation. The SHA-256 form is only logged.

use base64::engine::general_purpose::{STANDARD, STANDARD_NO_PAD};
use base64::Engine;
use md5::Md5;
use sha2::{Digest, Sha256};

use crate::domain::DomainError;

/// Public key in `authorized_keys` format: `<algorithm> <base64 blob> [comment]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKey {
    pub algorithm: String,
    pub blob: Vec<u8>,
    pub comment: Option<String>,
}

impl PublicKey {
    /// Parse the content of a `.pub` file. Line breaks inside the content are ignored.
    pub fn parse(content: &str) -> Result<Self, DomainError> {
        let joined = content.replace(['\r', '\n'], "");
        let mut parts = joined.split_whitespace();

        let algorithm = parts.next().ok_or_else(|| invalid("empty key file"))?;
        let encoded = parts
            .next()
            .ok_or_else(|| invalid("missing base64 key data"))?;
        let comment = {
            let rest: Vec<&str> = parts.collect();
            (!rest.is_empty()).then(|| rest.join(" "))
        };

        let blob = STANDARD
            .decode(encoded)
            .map_err(|e| invalid(&format!("bad base64 key data: {e}")))?;

        let embedded = embedded_algorithm(&blob)?;
        if embedded != algorithm {
            return Err(invalid(&format!(
                "key type {algorithm} does not match encoded type {embedded}"
            )));
        }

        Ok(Self {
            algorithm: algorithm.to_string(),
            blob,
            comment,
        })
    }

    /// Colon-separated lowercase hex MD5 digest of the key blob.
    pub fn md5_fingerprint(&self) -> String {
        let digest = Md5::digest(&self.blob);
        hex::encode(digest)
            .as_bytes()
            .chunks(2)
            .map(|pair| String::from_utf8_lossy(pair).into_owned())
            .collect::<Vec<_>>()
            .join(":")
    }

    /// `SHA256:<base64>` as printed by `ssh-keygen -l`.
    pub fn sha256_fingerprint(&self) -> String {
        let digest = Sha256::digest(&self.blob);
        format!("SHA256:{}", STANDARD_NO_PAD.encode(digest))
    }
}

/// Read the length-prefixed algorithm name at the start of a key blob.
fn embedded_algorithm(blob: &[u8]) -> Result<&str, DomainError> {
    let header: [u8; 4] = blob
        .get(..4)
        .and_then(|b| b.try_into().ok())
        .ok_or_else(|| invalid("key data too short"))?;
    let len = u32::from_be_bytes(header) as usize;
    let name = blob
        .get(4..4 + len)
        .ok_or_else(|| invalid("truncated key type"))?;
    std::str::from_utf8(name).map_err(|_| invalid("key type is not utf-8"))
}

fn invalid(message: &str) -> DomainError {
    DomainError::InvalidPublicKey {
        message: message.to_string(),
    }
}
