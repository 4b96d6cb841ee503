//! Digest type and incremental hasher used to derive build cache keys.
//!
//! The hasher absorbs fragments strictly in the order they are written. Each
//! fragment is framed with its length, so adjacent fragments can never be
//! re-split into a colliding sequence:
//!
//! ```
//! use buildkey_hashing::{BuildCacheHasher, DefaultBuildCacheHasher};
//!
//! let mut left = DefaultBuildCacheHasher::default();
//! left.put_string("ab");
//! left.put_string("c");
//!
//! let mut right = DefaultBuildCacheHasher::default();
//! right.put_string("a");
//! right.put_string("bc");
//!
//! assert_ne!(left.hash(), right.hash());
//! ```

mod error;
mod hash_code;
mod hasher;

pub use error::{Error, Result};
pub use hash_code::HashCode;
pub use hasher::{BuildCacheHasher, DefaultBuildCacheHasher, HashAlgorithm};
