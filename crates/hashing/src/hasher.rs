//! Incremental hasher for build cache keys
//!
//! Mirrors the shape of a plain `sha2` digest builder, with one addition:
//! every fragment is prefixed by its byte length (little-endian `u64`) so
//! that fragment boundaries are part of the digest.

use crate::{Error, HashCode, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256, Sha512};
use std::fmt;
use std::str::FromStr;

/// Append-only accumulator that yields a single digest.
///
/// Fragments are absorbed in call order with no normalization. `hash`
/// consumes the hasher, so it can be finalized exactly once.
pub trait BuildCacheHasher {
    /// Absorb a raw byte fragment
    fn put_bytes(&mut self, bytes: &[u8]);

    /// Absorb a string fragment as UTF-8
    fn put_string(&mut self, value: &str);

    /// Finalize and return the digest
    fn hash(self) -> HashCode
    where
        Self: Sized;
}

/// Digest algorithm backing a [`DefaultBuildCacheHasher`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    /// SHA-256, 32 byte digests
    #[default]
    Sha256,
    /// SHA-512, 64 byte digests
    Sha512,
}

impl HashAlgorithm {
    /// Lowercase algorithm name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sha256 => "sha256",
            Self::Sha512 => "sha512",
        }
    }

    /// Size in bytes of digests produced by this algorithm
    #[must_use]
    pub const fn digest_len(self) -> usize {
        match self {
            Self::Sha256 => 32,
            Self::Sha512 => 64,
        }
    }

    /// Plain, unframed digest of `content`.
    ///
    /// Intended for callers producing input property or classloader hashes.
    #[must_use]
    pub fn digest(self, content: &[u8]) -> HashCode {
        let bytes = match self {
            Self::Sha256 => Sha256::digest(content).to_vec(),
            Self::Sha512 => Sha512::digest(content).to_vec(),
        };
        HashCode(bytes.into_boxed_slice())
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HashAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sha256" => Ok(Self::Sha256),
            "sha512" => Ok(Self::Sha512),
            _ => Err(Error::unknown_algorithm(s)),
        }
    }
}

enum State {
    Sha256(Sha256),
    Sha512(Sha512),
}

/// Length-framed [`BuildCacheHasher`] over SHA-256 or SHA-512
pub struct DefaultBuildCacheHasher {
    state: State,
}

impl DefaultBuildCacheHasher {
    /// Create a hasher for the given algorithm
    #[must_use]
    pub fn new(algorithm: HashAlgorithm) -> Self {
        let state = match algorithm {
            HashAlgorithm::Sha256 => State::Sha256(Sha256::new()),
            HashAlgorithm::Sha512 => State::Sha512(Sha512::new()),
        };
        Self { state }
    }

    /// The algorithm this hasher finalizes with
    #[must_use]
    pub fn algorithm(&self) -> HashAlgorithm {
        match self.state {
            State::Sha256(_) => HashAlgorithm::Sha256,
            State::Sha512(_) => HashAlgorithm::Sha512,
        }
    }

    fn update(&mut self, data: &[u8]) {
        match &mut self.state {
            State::Sha256(h) => h.update(data),
            State::Sha512(h) => h.update(data),
        }
    }

    fn put_framed(&mut self, data: &[u8]) {
        let len = data.len() as u64;
        self.update(&len.to_le_bytes());
        self.update(data);
    }
}

impl Default for DefaultBuildCacheHasher {
    fn default() -> Self {
        Self::new(HashAlgorithm::default())
    }
}

impl fmt::Debug for DefaultBuildCacheHasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DefaultBuildCacheHasher")
            .field("algorithm", &self.algorithm())
            .finish_non_exhaustive()
    }
}

impl BuildCacheHasher for DefaultBuildCacheHasher {
    fn put_bytes(&mut self, bytes: &[u8]) {
        self.put_framed(bytes);
    }

    fn put_string(&mut self, value: &str) {
        self.put_framed(value.as_bytes());
    }

    fn hash(self) -> HashCode {
        let bytes = match self.state {
            State::Sha256(h) => h.finalize().to_vec(),
            State::Sha512(h) => h.finalize().to_vec(),
        };
        HashCode(bytes.into_boxed_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn framed_sha256(fragments: &[&[u8]]) -> Vec<u8> {
        let mut h = Sha256::new();
        for fragment in fragments {
            h.update((fragment.len() as u64).to_le_bytes());
            h.update(fragment);
        }
        h.finalize().to_vec()
    }

    #[test]
    fn test_hash_matches_length_framed_sha256() {
        let mut hasher = DefaultBuildCacheHasher::default();
        hasher.put_string("Compile");
        hasher.put_bytes(&[0xAA, 0xBB]);

        let expected = framed_sha256(&[b"Compile", &[0xAA, 0xBB]]);
        assert_eq!(hasher.hash().as_bytes(), expected.as_slice());
    }

    #[test]
    fn test_empty_hasher_still_produces_digest() {
        let hash = DefaultBuildCacheHasher::default().hash();
        assert_eq!(hash.len(), 32);
        assert_eq!(hash.as_bytes(), Sha256::digest(b"").to_vec().as_slice());
    }

    #[test]
    fn test_framing_prevents_boundary_collisions() {
        let mut left = DefaultBuildCacheHasher::default();
        left.put_string("ab");
        left.put_string("c");

        let mut right = DefaultBuildCacheHasher::default();
        right.put_string("a");
        right.put_string("bc");

        assert_ne!(left.hash(), right.hash());
    }

    #[test]
    fn test_order_is_significant() {
        let mut first = DefaultBuildCacheHasher::default();
        first.put_string("a");
        first.put_string("b");

        let mut second = DefaultBuildCacheHasher::default();
        second.put_string("b");
        second.put_string("a");

        assert_ne!(first.hash(), second.hash());
    }

    #[test]
    fn test_sha512_digest_length() {
        let mut hasher = DefaultBuildCacheHasher::new(HashAlgorithm::Sha512);
        assert_eq!(hasher.algorithm(), HashAlgorithm::Sha512);
        hasher.put_string("x");
        assert_eq!(hasher.hash().len(), HashAlgorithm::Sha512.digest_len());
    }

    #[test]
    fn test_plain_digest_known_vector() {
        let hash = HashAlgorithm::Sha256.digest(b"hello world");
        assert_eq!(
            hash.to_hex(),
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
    }

    #[test]
    fn test_algorithm_parse_and_display() {
        assert_eq!("SHA256".parse::<HashAlgorithm>(), Ok(HashAlgorithm::Sha256));
        assert_eq!(" sha512 ".parse::<HashAlgorithm>(), Ok(HashAlgorithm::Sha512));
        assert_eq!(
            "md5".parse::<HashAlgorithm>(),
            Err(Error::unknown_algorithm("md5"))
        );
        assert_eq!(HashAlgorithm::Sha512.to_string(), "sha512");
    }

    #[test]
    fn test_algorithm_serde() {
        let json = serde_json::to_string(&HashAlgorithm::Sha512).unwrap();
        assert_eq!(json, "\"sha512\"");
        let parsed: HashAlgorithm = serde_json::from_str("\"sha256\"").unwrap();
        assert_eq!(parsed, HashAlgorithm::Sha256);
    }
}
