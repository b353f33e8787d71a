//! SM2 scalar operations

use crate::ec::sm2::constants::SM2_SCALAR_SIZE;
use crate::error::{validate, Error, Result};
use gmcrypt_common::security::SecretBuffer;
use gmcrypt_params::sm2::SM2_P256V1;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// SM2 scalar: an integer in [1, n−1], where n is the curve order
/// n = 0xFFFFFFFEFFFFFFFFFFFFFFFFFFFFFFFF7203DF6B21C6052B53BBF40939D54123.
#[derive(Clone, Zeroize, ZeroizeOnDrop, Debug)]
pub struct Scalar(SecretBuffer<SM2_SCALAR_SIZE>);

impl Scalar {
    /// Create a scalar from raw bytes with reduction mod n.
    /// Ensures result ∈ [1, n−1]. Errors if result = 0.
    pub fn new(mut data: [u8; SM2_SCALAR_SIZE]) -> Result<Self> {
        Self::reduce_scalar_bytes(&mut data)?;
        Ok(Scalar(SecretBuffer::new(data)))
    }

    /// Create from existing SecretBuffer (applies reduction & zero check)
    pub fn from_secret_buffer(buffer: SecretBuffer<SM2_SCALAR_SIZE>) -> Result<Self> {
        let mut tmp = [0u8; SM2_SCALAR_SIZE];
        tmp.copy_from_slice(buffer.as_ref());
        Self::new(tmp)
    }

    /// Access the underlying SecretBuffer
    pub fn as_secret_buffer(&self) -> &SecretBuffer<SM2_SCALAR_SIZE> {
        &self.0
    }

    /// Serialize to big-endian bytes
    pub fn serialize(&self) -> [u8; SM2_SCALAR_SIZE] {
        let mut out = [0u8; SM2_SCALAR_SIZE];
        out.copy_from_slice(self.0.as_ref());
        out
    }

    /// Deserialize from bytes (with validation)
    pub fn deserialize(bytes: &[u8]) -> Result<Self> {
        validate::length("SM2 Scalar", bytes.len(), SM2_SCALAR_SIZE)?;
        let mut tmp = [0u8; SM2_SCALAR_SIZE];
        tmp.copy_from_slice(bytes);
        Self::new(tmp)
    }

    /// Is this scalar zero?
    pub fn is_zero(&self) -> bool {
        self.0.as_ref().iter().all(|&b| b == 0)
    }

    /// Internal helper: reduce raw bytes mod n, ensure ≠ 0.
    ///
    /// The input is below 2²⁵⁶ < 2n, so a single conditional subtraction
    /// of the order is a full reduction.
    fn reduce_scalar_bytes(bytes: &mut [u8; SM2_SCALAR_SIZE]) -> Result<()> {
        let order = &SM2_P256V1.n;
        // reject zero
        if bytes.iter().all(|&b| b == 0) {
            return Err(Error::param("SM2 Scalar", "Scalar cannot be zero"));
        }
        // compare bytes vs order, big-endian
        let mut gt = 0u8;
        let mut lt = 0u8;
        for i in 0..SM2_SCALAR_SIZE {
            let x = bytes[i];
            let y = order[i];
            gt |= ((x > y) as u8) & (!lt);
            lt |= ((x < y) as u8) & (!gt);
        }
        // if ≥ order, subtract order
        if gt == 1 || (lt == 0 && gt == 0) {
            let mut borrow = 0u16;
            for i in (0..SM2_SCALAR_SIZE).rev() {
                let v = (bytes[i] as i16) - (order[i] as i16) - (borrow as i16);
                if v < 0 {
                    bytes[i] = (v + 256) as u8;
                    borrow = 1;
                } else {
                    bytes[i] = v as u8;
                    borrow = 0;
                }
            }
        }
        // ensure not zero after reduction
        if bytes.iter().all(|&b| b == 0) {
            return Err(Error::param("SM2 Scalar", "Reduction resulted in zero"));
        }
        Ok(())
    }
}
