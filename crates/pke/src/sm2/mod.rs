//! SM2 public-key encryption (GB/T 32918 part 4).
//!
//! Ciphertext layout is the classic `C1 ∥ C2 ∥ C3`: 64 bytes of bare
//! big-endian point coordinates, the masked message, then the 32-byte SM3
//! integrity tag. There are no separators or length prefixes; component
//! boundaries are derived from the total length.

use gmcrypt_algorithms::ec::sm2 as ec;
use gmcrypt_algorithms::hash::{HashFunction, Sm3};
use gmcrypt_algorithms::kdf::Sm3Kdf;
use gmcrypt_api::error::Error as ApiError;
use gmcrypt_api::traits::Pke;
use gmcrypt_common::security::SecureCompare;
use gmcrypt_params::hash::SM3_OUTPUT_SIZE;
use gmcrypt_params::sm2::SM2_P256V1;
use rand::{CryptoRng, RngCore};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{Error as PkeError, Result as PkeResult};

/// Length of C1 on the wire: two bare 32-byte coordinates
const SM2_C1_SIZE: usize = 2 * ec::SM2_FIELD_ELEMENT_SIZE;

/// Length of the SM3 integrity tag C3
const SM2_C3_SIZE: usize = SM3_OUTPUT_SIZE;

/// Retry budget for the all-zero derived key stream condition.
///
/// A single occurrence already has negligible probability; the bound only
/// exists so a degenerate shared point cannot loop forever.
const MAX_ZERO_KDF_RETRIES: usize = 8;

/// Public key for SM2. Stores the serialized uncompressed point.
#[derive(Clone, Debug)]
pub struct Sm2PublicKey([u8; ec::SM2_POINT_UNCOMPRESSED_SIZE]);

impl AsRef<[u8]> for Sm2PublicKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Secret key for SM2. Stores the serialized scalar.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Sm2SecretKey([u8; ec::SM2_SCALAR_SIZE]);

impl AsRef<[u8]> for Sm2SecretKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// The SM2 public-key encryption scheme
pub struct Sm2;

/// The cofactor as a scalar; h = 1 for this curve
fn cofactor_scalar() -> PkeResult<ec::Scalar> {
    let mut bytes = [0u8; ec::SM2_SCALAR_SIZE];
    bytes[ec::SM2_SCALAR_SIZE - 1] = SM2_P256V1.h;
    ec::Scalar::new(bytes).map_err(PkeError::from)
}

/// C3 = SM3(x2 ∥ M ∥ y2), binding the plaintext to the shared secret
fn integrity_tag(
    x2: &[u8; ec::SM2_FIELD_ELEMENT_SIZE],
    message: &[u8],
    y2: &[u8; ec::SM2_FIELD_ELEMENT_SIZE],
) -> PkeResult<[u8; SM2_C3_SIZE]> {
    let mut hasher = <Sm3 as HashFunction>::new();
    hasher.update(x2)?;
    hasher.update(message)?;
    hasher.update(y2)?;
    let digest = hasher.finalize()?;

    let mut tag = [0u8; SM2_C3_SIZE];
    tag.copy_from_slice(digest.as_ref());
    Ok(tag)
}

impl Sm2 {
    fn encrypt_internal<R: RngCore + CryptoRng>(
        pb: &ec::Point,
        plaintext: &[u8],
        rng: &mut R,
    ) -> PkeResult<Vec<u8>> {
        if plaintext.is_empty() {
            return Err(PkeError::InvalidPlaintext("message must not be empty"));
        }

        // S = [h]PB must not be the point at infinity
        let h = cofactor_scalar()?;
        let s = ec::scalar_mult(&h, pb)?;
        if s.is_identity() {
            return Err(PkeError::InfinityPoint("h·PB is the point at infinity"));
        }

        let klen = (plaintext.len() as u64) * 8;

        // Bounded retry: an all-zero key stream discards k and draws afresh
        for _ in 0..MAX_ZERO_KDF_RETRIES {
            // Ephemeral scalar k and C1 = [k]G
            let (k, c1) = ec::generate_keypair(rng)?;

            // (x2, y2) = [k]PB
            let shared = ec::scalar_mult(&k, pb)?;
            if shared.is_identity() {
                continue;
            }
            let x2 = shared.x_coordinate_bytes();
            let y2 = shared.y_coordinate_bytes();

            // t = KDF(x2 ∥ y2, bitlen(M))
            let mut z = [0u8; SM2_C1_SIZE];
            z[..ec::SM2_FIELD_ELEMENT_SIZE].copy_from_slice(&x2);
            z[ec::SM2_FIELD_ELEMENT_SIZE..].copy_from_slice(&y2);
            let mut t = Sm3Kdf::derive_bits(&z, klen)?;
            z.zeroize();
            if t.iter().all(|&b| b == 0) {
                continue;
            }

            // C2 = M ⊕ t
            let c2: Vec<u8> = plaintext
                .iter()
                .zip(t.iter())
                .map(|(&m, &ti)| m ^ ti)
                .collect();
            t.zeroize();

            let c3 = integrity_tag(&x2, plaintext, &y2)?;

            // C = C1 ∥ C2 ∥ C3
            let mut out = Vec::with_capacity(SM2_C1_SIZE + c2.len() + SM2_C3_SIZE);
            out.extend_from_slice(&c1.x_coordinate_bytes());
            out.extend_from_slice(&c1.y_coordinate_bytes());
            out.extend_from_slice(&c2);
            out.extend_from_slice(&c3);
            return Ok(out);
        }

        Err(PkeError::ZeroDerivedKey)
    }

    fn decrypt_internal(d: &ec::Scalar, ciphertext: &[u8]) -> PkeResult<Vec<u8>> {
        if ciphertext.len() <= SM2_C1_SIZE + SM2_C3_SIZE {
            return Err(PkeError::InvalidCiphertextFormat(
                "ciphertext must be longer than C1 and C3 combined",
            ));
        }

        // Parse C1 and reject anything not on the curve
        let mut x1 = [0u8; ec::SM2_FIELD_ELEMENT_SIZE];
        let mut y1 = [0u8; ec::SM2_FIELD_ELEMENT_SIZE];
        x1.copy_from_slice(&ciphertext[..ec::SM2_FIELD_ELEMENT_SIZE]);
        y1.copy_from_slice(&ciphertext[ec::SM2_FIELD_ELEMENT_SIZE..SM2_C1_SIZE]);
        let c1 = ec::Point::new_uncompressed(&x1, &y1)
            .map_err(|_| PkeError::InvalidPoint("C1 does not satisfy the curve equation"))?;

        // (x2, y2) = [dB]C1
        let shared = ec::scalar_mult(d, &c1)?;
        if shared.is_identity() {
            return Err(PkeError::InfinityPoint("dB·C1 is the point at infinity"));
        }
        let x2 = shared.x_coordinate_bytes();
        let y2 = shared.y_coordinate_bytes();

        // t = KDF(x2 ∥ y2, bitlen(C2))
        let c2 = &ciphertext[SM2_C1_SIZE..ciphertext.len() - SM2_C3_SIZE];
        let mut z = [0u8; SM2_C1_SIZE];
        z[..ec::SM2_FIELD_ELEMENT_SIZE].copy_from_slice(&x2);
        z[ec::SM2_FIELD_ELEMENT_SIZE..].copy_from_slice(&y2);
        let mut t = Sm3Kdf::derive_bits(&z, (c2.len() as u64) * 8)?;
        z.zeroize();

        // M = C2 ⊕ t
        let plaintext: Vec<u8> = c2.iter().zip(t.iter()).map(|(&c, &ti)| c ^ ti).collect();
        t.zeroize();

        // u = SM3(x2 ∥ M ∥ y2) must equal C3; the comparison is
        // constant-time and the plaintext is withheld on mismatch
        let expected = integrity_tag(&x2, &plaintext, &y2)?;
        let mut received = [0u8; SM2_C3_SIZE];
        received.copy_from_slice(&ciphertext[ciphertext.len() - SM2_C3_SIZE..]);
        if !expected.secure_eq(&received) {
            return Err(PkeError::IntegrityCheckFailed);
        }

        Ok(plaintext)
    }
}

impl Pke for Sm2 {
    type PublicKey = Sm2PublicKey;
    type SecretKey = Sm2SecretKey;
    type Ciphertext = Vec<u8>;

    fn name() -> &'static str {
        "SM2-P256V1"
    }

    fn keypair<R: RngCore + CryptoRng>(
        rng: &mut R,
    ) -> gmcrypt_api::error::Result<(Self::PublicKey, Self::SecretKey)> {
        let (sk_scalar, pk_point) =
            ec::generate_keypair(rng).map_err(|e| ApiError::from(PkeError::from(e)))?;
        Ok((
            Sm2PublicKey(pk_point.serialize_uncompressed()),
            Sm2SecretKey(sk_scalar.serialize()),
        ))
    }

    fn encrypt<R: RngCore + CryptoRng>(
        pk_recipient: &Self::PublicKey,
        plaintext: &[u8],
        rng: &mut R,
    ) -> gmcrypt_api::error::Result<Self::Ciphertext> {
        let pb = ec::Point::deserialize_uncompressed(&pk_recipient.0)
            .map_err(|e| ApiError::from(PkeError::from(e)))?;
        if pb.is_identity() {
            return Err(ApiError::from(PkeError::InfinityPoint(
                "recipient public key is the point at infinity",
            )));
        }

        Self::encrypt_internal(&pb, plaintext, rng).map_err(ApiError::from)
    }

    fn decrypt(
        sk_recipient: &Self::SecretKey,
        ciphertext: &Self::Ciphertext,
    ) -> gmcrypt_api::error::Result<Vec<u8>> {
        let d = ec::Scalar::deserialize(&sk_recipient.0)
            .map_err(|e| ApiError::from(PkeError::from(e)))?;

        Self::decrypt_internal(&d, ciphertext.as_slice()).map_err(ApiError::from)
    }
}

#[cfg(test)]
mod tests;
