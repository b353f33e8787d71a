//! Hash function implementations
//!
//! This module defines the hashing traits used across the library and the
//! SM3 hash function the SM2 scheme depends on.

use crate::error::Result;

pub mod sm3;

pub use sm3::Sm3;

/// Marker trait describing a concrete hash algorithm
pub trait HashAlgorithm {
    /// Digest size in bytes
    const OUTPUT_SIZE: usize;

    /// Message block size in bytes
    const BLOCK_SIZE: usize;

    /// Static algorithm identifier
    const ALGORITHM_ID: &'static str;
}

/// Common trait for all hash functions
pub trait HashFunction {
    /// The algorithm this hash function implements
    type Algorithm: HashAlgorithm;

    /// Digest output type
    type Output: AsRef<[u8]> + Clone;

    /// Create a new hash state
    fn new() -> Self;

    /// Absorb more input into the state
    fn update(&mut self, data: &[u8]) -> Result<&mut Self>;

    /// Consume the state and produce the digest
    fn finalize(&mut self) -> Result<Self::Output>;

    /// Digest size in bytes
    fn output_size() -> usize {
        Self::Algorithm::OUTPUT_SIZE
    }

    /// Message block size in bytes
    fn block_size() -> usize {
        Self::Algorithm::BLOCK_SIZE
    }

    /// Returns the hash function name
    fn name() -> String {
        Self::Algorithm::ALGORITHM_ID.to_string()
    }

    /// One-shot convenience: hash a complete message
    fn digest(data: &[u8]) -> Result<Self::Output>
    where
        Self: Sized,
    {
        let mut hasher = Self::new();
        hasher.update(data)?;
        hasher.finalize()
    }
}
