//! Fixed-length digest with a canonical hex form

use crate::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// An opaque digest, compared byte-wise and displayed as lowercase hex.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HashCode(pub(crate) Box<[u8]>);

impl HashCode {
    /// Wrap raw digest bytes. Empty input is rejected.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Result<Self> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(Error::Empty);
        }
        Ok(Self(bytes.into_boxed_slice()))
    }

    /// The raw digest bytes
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Number of bytes in the digest
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the digest has no bytes
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Lowercase hex encoding, the form used as a cache lookup key
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }
}

impl FromStr for HashCode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.is_empty() {
            return Err(Error::Empty);
        }
        let bytes = hex::decode(s).map_err(|_| Error::invalid_hex(s))?;
        Self::from_bytes(bytes)
    }
}

impl TryFrom<&[u8]> for HashCode {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        Self::from_bytes(bytes)
    }
}

impl TryFrom<Vec<u8>> for HashCode {
    type Error = Error;

    fn try_from(bytes: Vec<u8>) -> Result<Self> {
        Self::from_bytes(bytes)
    }
}

impl AsRef<[u8]> for HashCode {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for HashCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for HashCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HashCode({})", self.to_hex())
    }
}

impl Serialize for HashCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for HashCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_bytes_rejects_empty() {
        assert_eq!(HashCode::from_bytes(Vec::<u8>::new()), Err(Error::Empty));
    }

    #[test]
    fn test_display_is_lowercase_hex() {
        let hash = HashCode::from_bytes([0xAB_u8, 0x01, 0xFF]).unwrap();
        assert_eq!(hash.to_string(), "ab01ff");
        assert_eq!(format!("{hash:?}"), "HashCode(ab01ff)");
        assert_eq!(hash.len(), 3);
    }

    #[test]
    fn test_parse_hex() {
        let hash: HashCode = "AB01ff".parse().unwrap();
        assert_eq!(hash.as_bytes(), &[0xAB, 0x01, 0xFF]);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert_eq!("".parse::<HashCode>(), Err(Error::Empty));
        assert_eq!("abc".parse::<HashCode>(), Err(Error::invalid_hex("abc")));
        assert_eq!("zz".parse::<HashCode>(), Err(Error::invalid_hex("zz")));
    }

    #[test]
    fn test_equality_is_bytewise() {
        let a = HashCode::from_bytes([1_u8, 2]).unwrap();
        let b: HashCode = "0102".parse().unwrap();
        let c = HashCode::from_bytes([1_u8, 2, 0]).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_serde_uses_hex_string() {
        let hash = HashCode::from_bytes([0xDE_u8, 0xAD]).unwrap();
        let json = serde_json::to_string(&hash).unwrap();
        assert_eq!(json, "\"dead\"");

        let parsed: HashCode = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, hash);

        assert!(serde_json::from_str::<HashCode>("\"xyz\"").is_err());
    }
}
