//! SM2 Elliptic Curve Primitives (sm2p256v1)
//!
//! This module implements the recommended SM2 curve operations. The curve
//! equation is y² = x³ + ax + b over the prime field 𝔽ₚ where:
//! - p = 2²⁵⁶ − 2²²⁴ − 2⁹⁶ + 2⁶⁴ − 1
//! - a = p − 3
//! - The curve order n = 0xFFFFFFFEFFFFFFFFFFFFFFFFFFFFFFFF7203DF6B21C6052B53BBF40939D54123
//!
//! The implementation uses:
//! - Affine coordinates with an explicit point-at-infinity flag
//! - Chord-and-tangent point addition with Fermat modular inversion
//! - LSB-first double-and-add scalar multiplication

mod constants;
mod field;
mod point;
mod scalar;

pub use constants::{SM2_FIELD_ELEMENT_SIZE, SM2_POINT_UNCOMPRESSED_SIZE, SM2_SCALAR_SIZE};
pub use field::FieldElement;
pub use point::Point;
pub use scalar::Scalar;

use crate::error::Result;
use gmcrypt_params::sm2::SM2_P256V1;
use rand::{CryptoRng, RngCore};

/// Get the standard base point G of the SM2 curve
///
/// Returns the generator point specified in the standard. This point
/// generates the cyclic subgroup used for SM2 encryption.
pub fn base_point_g() -> Point {
    Point::new_uncompressed(&SM2_P256V1.g_x, &SM2_P256V1.g_y)
        .expect("Standard base point must be valid")
}

/// Scalar multiplication with the base point: scalar * G
///
/// This is the core operation for generating public keys from private keys.
pub fn scalar_mult_base_g(scalar: &Scalar) -> Result<Point> {
    let g = base_point_g();
    g.mul(scalar)
}

/// General scalar multiplication: compute scalar * point
///
/// Performs scalar multiplication with an arbitrary point on the curve.
pub fn scalar_mult(scalar: &Scalar, point: &Point) -> Result<Point> {
    if point.is_identity() {
        // scalar * O = O (identity element)
        return Ok(Point::identity());
    }

    point.mul(scalar)
}

/// Generate an SM2 keypair
///
/// Uses rejection sampling to ensure the private key scalar is uniformly
/// distributed in the range [1, n-1]. The public key is computed as
/// private_key * G where G is the standard base point.
///
/// Returns (private_key, public_key) pair.
pub fn generate_keypair<R: CryptoRng + RngCore>(rng: &mut R) -> Result<(Scalar, Point)> {
    let mut scalar_bytes = [0u8; SM2_SCALAR_SIZE];

    // Use rejection sampling for uniform distribution
    loop {
        rng.fill_bytes(&mut scalar_bytes);

        // Attempt to create a valid scalar (non-zero, < n)
        match Scalar::new(scalar_bytes) {
            Ok(private_key) => {
                // Compute corresponding public key
                let public_key = scalar_mult_base_g(&private_key)?;
                return Ok((private_key, public_key));
            }
            Err(_) => {
                // Invalid scalar generated, retry with new random bytes
                continue;
            }
        }
    }
}

#[cfg(test)]
mod tests;
