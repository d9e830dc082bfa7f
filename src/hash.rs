use serde::{Deserialize, Serialize};
use sha2::Digest;
use std::fmt::{Display, Formatter};

const SHA256_BYTE_COUNT: usize = 32;

/// Sha-256 is a 256-bit array or 32 bytes.
/// It provides an API to display as hex-encoded string and parse it from a hex-encoded string.
#[derive(Copy, Clone, Debug, Hash, Ord, PartialOrd, Eq, PartialEq, Serialize, Deserialize)]
pub struct Sha256([u8; SHA256_BYTE_COUNT]);

impl Sha256 {
    pub const fn from_raw(raw_bytes: [u8; SHA256_BYTE_COUNT]) -> Self {
        Self(raw_bytes)
    }

    pub fn digest(data: &[u8]) -> Self {
        let mut hasher = sha2::Sha256::new();
        hasher.update(data);
        let mut output = [0; SHA256_BYTE_COUNT];
        output.copy_from_slice(hasher.finalize().as_slice());
        Sha256::from_raw(output)
    }

    /// SHA-256 applied twice, the way transaction ids are derived.
    pub fn double_digest(data: &[u8]) -> Self {
        let first_hash = Self::digest(data);
        Self::digest(first_hash.as_slice())
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0[..]
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.as_slice())
    }

    pub fn from_hex(s: &str) -> Result<Self, String> {
        let bytes = hex::decode(s).map_err(|e| e.to_string())?;
        <[u8; SHA256_BYTE_COUNT]>::try_from(bytes.as_slice())
            .map(Sha256::from_raw)
            .map_err(|_| {
                format!(
                    "Invalid SHA-256 length. Expected: {} but got: {} in: {}",
                    SHA256_BYTE_COUNT,
                    bytes.len(),
                    s
                )
            })
    }
}

impl Display for Sha256 {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_hello_world() {
        assert_eq!(
            Sha256::digest(b"hello world").to_hex(),
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
    }

    #[test]
    fn double_digest_hashes_the_first_digest() {
        let once = Sha256::digest(b"hello world");
        assert_eq!(
            Sha256::double_digest(b"hello world"),
            Sha256::digest(once.as_slice())
        );
    }

    #[test]
    fn parse_hex() {
        let hash = Sha256::digest(b"abc");
        assert_eq!(Sha256::from_hex(&hash.to_hex()), Ok(hash));
    }

    #[test]
    fn parse_hex_with_wrong_length() {
        let err = Sha256::from_hex("abcd").unwrap_err();
        assert!(err.contains("Expected: 32 but got: 2"), "{}", err);
    }

    #[test]
    fn parse_invalid_hex() {
        assert!(Sha256::from_hex("zz").is_err());
    }
}
