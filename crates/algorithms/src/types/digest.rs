//! Type-safe digest implementation with size guarantees
//!
//! Provides the `Digest` type, representing the output of a
//! cryptographic hash function with compile-time size guarantees.

use core::fmt;
use core::ops::Deref;
use zeroize::Zeroize;

use crate::error::{Error, Result};

/// A cryptographic digest with a fixed size
#[derive(Clone, Zeroize)]
pub struct Digest<const N: usize> {
    data: [u8; N],
}

impl<const N: usize> Digest<N> {
    /// Create a new digest from an existing array
    pub fn new(data: [u8; N]) -> Self {
        Self { data }
    }

    /// Create from a slice, if it has the correct length
    pub fn from_slice(slice: &[u8]) -> Result<Self> {
        if slice.len() != N {
            return Err(Error::Length {
                context: "Digest::from_slice",
                expected: N,
                actual: slice.len(),
            });
        }

        let mut data = [0u8; N];
        data.copy_from_slice(slice);
        Ok(Self { data })
    }

    /// Get the length of the digest
    pub fn len(&self) -> usize {
        N
    }

    /// Check if the digest is empty (always false for non-zero N)
    pub fn is_empty(&self) -> bool {
        N == 0
    }

    /// Return the digest as a fixed-size byte array
    pub fn into_bytes(self) -> [u8; N] {
        self.data
    }

    /// Convert to a hexadecimal string
    pub fn to_hex(&self) -> String {
        hex::encode(self.data)
    }

    /// Create from a hexadecimal string
    pub fn from_hex(hex_str: &str) -> Result<Self> {
        let bytes = hex::decode(hex_str)
            .map_err(|_| Error::param("hex_str", "Invalid hexadecimal string"))?;
        Self::from_slice(&bytes)
    }
}

impl<const N: usize> AsRef<[u8]> for Digest<N> {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl<const N: usize> Deref for Digest<N> {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

impl<const N: usize> PartialEq for Digest<N> {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

impl<const N: usize> Eq for Digest<N> {}

impl<const N: usize> fmt::Debug for Digest<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest<{}>({})", N, self.to_hex())
    }
}

impl<const N: usize> fmt::Display for Digest<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digest_round_trip() {
        let digest = Digest::<4>::new([0xDE, 0xAD, 0xBE, 0xEF]);
        assert_eq!(digest.to_hex(), "deadbeef");
        assert_eq!(Digest::<4>::from_hex("deadbeef").unwrap(), digest);
    }

    #[test]
    fn test_digest_from_slice_length_mismatch() {
        assert!(Digest::<32>::from_slice(&[0u8; 16]).is_err());
        assert!(Digest::<32>::from_slice(&[0u8; 32]).is_ok());
    }
}
