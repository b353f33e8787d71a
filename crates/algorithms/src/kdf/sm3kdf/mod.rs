//! SM3 counter-mode key derivation function
//!
//! This module implements the KDF specified alongside SM2: the input is
//! expanded by hashing `Z ∥ counter` with SM3 for a 32-bit big-endian
//! counter starting at 1, and the concatenated digests are truncated to
//! the requested bit length.

use crate::error::{validate, Error, Result};
use crate::hash::{HashFunction, Sm3};
use crate::kdf::{KdfAlgorithm, KeyDerivationFunction};
use gmcrypt_params::hash::SM3_OUTPUT_SIZE;

/// Digest size of the underlying hash in bits
const V: u64 = (SM3_OUTPUT_SIZE as u64) * 8;

/// Type-level constants for the SM3 KDF algorithm
pub enum Sm3KdfAlgorithm {}

impl KdfAlgorithm for Sm3KdfAlgorithm {
    const DEFAULT_OUTPUT_SIZE: usize = 32;
    const ALGORITHM_ID: &'static str = "SM3-KDF";
}

/// The SM3 counter-mode KDF
#[derive(Clone, Debug, Default)]
pub struct Sm3Kdf;

impl Sm3Kdf {
    /// Exclusive upper bound on the requested output length in bits.
    ///
    /// The 32-bit counter addresses at most 2³² − 1 digests.
    pub const MAX_OUTPUT_BITS: u64 = (u32::MAX as u64) * V;

    /// Derive exactly `klen` bits of key material from `z`.
    ///
    /// The output is returned as `⌈klen/8⌉` bytes; when `klen` is not a
    /// multiple of 8, the unused low bits of the final byte are cleared so
    /// the result is the exact bit string of the specification.
    pub fn derive_bits(z: &[u8], klen: u64) -> Result<Vec<u8>> {
        validate::parameter(klen > 0, "klen", "KDF output length must be > 0")?;
        if klen >= Self::MAX_OUTPUT_BITS {
            return Err(Error::Length {
                context: "SM3 KDF output",
                expected: (Self::MAX_OUTPUT_BITS / 8) as usize,
                actual: (klen / 8) as usize,
            });
        }

        let blocks = klen.div_ceil(V);
        let out_len = (klen as usize).div_ceil(8);
        let mut out = Vec::with_capacity((blocks as usize) * SM3_OUTPUT_SIZE);

        let mut counter: u32 = 1;
        for _ in 0..blocks {
            let mut hasher = <Sm3 as HashFunction>::new();
            hasher.update(z)?;
            hasher.update(&counter.to_be_bytes())?;
            let digest = hasher.finalize()?;
            out.extend_from_slice(digest.as_ref());
            counter = counter.wrapping_add(1);
        }

        out.truncate(out_len);
        let rem = (klen % 8) as u32;
        if rem != 0 {
            // drop the surplus trailing bits of the final byte
            let last = out.last_mut().expect("output is non-empty for klen > 0");
            *last &= 0xFFu8 << (8 - rem);
        }
        Ok(out)
    }

    /// Derive a whole number of bytes of key material from `z`
    pub fn derive_bytes(z: &[u8], len: usize) -> Result<Vec<u8>> {
        Self::derive_bits(z, (len as u64) * 8)
    }
}

impl KeyDerivationFunction for Sm3Kdf {
    type Algorithm = Sm3KdfAlgorithm;

    fn new() -> Self {
        Sm3Kdf
    }

    /// Salt and info are accepted for API compatibility but unused: the
    /// SM2 KDF is keyed by the input material alone.
    fn derive_key(
        &self,
        input: &[u8],
        _salt: Option<&[u8]>,
        _info: Option<&[u8]>,
        length: usize,
    ) -> Result<Vec<u8>> {
        Self::derive_bytes(input, length)
    }
}

#[cfg(test)]
mod tests;
