//! SM2 elliptic curve point operations
//!
//! Points are kept in affine coordinates with an explicit identity flag;
//! the group law is the textbook chord-and-tangent construction with the
//! modular inverse computed via Fermat's little theorem.

use crate::ec::sm2::{
    constants::{SM2_FIELD_ELEMENT_SIZE, SM2_POINT_UNCOMPRESSED_SIZE},
    field::FieldElement,
    scalar::Scalar,
};
use crate::error::{validate, Error, Result};
use subtle::Choice;

/// Affine coordinates (x, y) or the point at infinity
#[derive(Clone, Debug)]
pub struct Point {
    pub(crate) is_identity: Choice,
    pub(crate) x: FieldElement,
    pub(crate) y: FieldElement,
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        let a_id: bool = self.is_identity.into();
        let b_id: bool = other.is_identity.into();
        if a_id || b_id {
            return a_id == b_id;
        }
        self.x == other.x && self.y == other.y
    }
}

impl Point {
    /// Create a new affine point from big-endian byte coordinates
    pub fn new_uncompressed(
        x_bytes: &[u8; SM2_FIELD_ELEMENT_SIZE],
        y_bytes: &[u8; SM2_FIELD_ELEMENT_SIZE],
    ) -> Result<Self> {
        let x_fe = FieldElement::from_bytes(x_bytes)?;
        let y_fe = FieldElement::from_bytes(y_bytes)?;
        if !Self::is_on_curve(&x_fe, &y_fe) {
            return Err(Error::param("SM2 Point", "Point not on curve"));
        }
        Ok(Point {
            is_identity: Choice::from(0),
            x: x_fe,
            y: y_fe,
        })
    }

    /// The identity (point at infinity)
    pub fn identity() -> Self {
        Point {
            is_identity: Choice::from(1),
            x: FieldElement::zero(),
            y: FieldElement::zero(),
        }
    }

    /// Is this the identity point?
    pub fn is_identity(&self) -> bool {
        self.is_identity.into()
    }

    /// Extract x-coordinate as big-endian bytes
    pub fn x_coordinate_bytes(&self) -> [u8; SM2_FIELD_ELEMENT_SIZE] {
        self.x.to_bytes()
    }

    /// Extract y-coordinate as big-endian bytes
    pub fn y_coordinate_bytes(&self) -> [u8; SM2_FIELD_ELEMENT_SIZE] {
        self.y.to_bytes()
    }

    /// Serialize this point as uncompressed: 0x04 ∥ x ∥ y
    pub fn serialize_uncompressed(&self) -> [u8; SM2_POINT_UNCOMPRESSED_SIZE] {
        let mut out = [0u8; SM2_POINT_UNCOMPRESSED_SIZE];
        if self.is_identity() {
            return out; // all zeros
        }
        out[0] = 0x04;
        out[1..1 + SM2_FIELD_ELEMENT_SIZE].copy_from_slice(&self.x.to_bytes());
        out[1 + SM2_FIELD_ELEMENT_SIZE..].copy_from_slice(&self.y.to_bytes());
        out
    }

    /// Deserialize from uncompressed bytes (0x04 ∥ x ∥ y), or all-zeros for identity
    pub fn deserialize_uncompressed(bytes: &[u8]) -> Result<Self> {
        validate::length("SM2 Point", bytes.len(), SM2_POINT_UNCOMPRESSED_SIZE)?;
        if bytes.iter().all(|&b| b == 0) {
            return Ok(Self::identity());
        }
        if bytes[0] != 0x04 {
            return Err(Error::param("SM2 Point", "Invalid prefix for uncompressed"));
        }
        let mut xb = [0u8; SM2_FIELD_ELEMENT_SIZE];
        let mut yb = [0u8; SM2_FIELD_ELEMENT_SIZE];
        xb.copy_from_slice(&bytes[1..1 + SM2_FIELD_ELEMENT_SIZE]);
        yb.copy_from_slice(&bytes[1 + SM2_FIELD_ELEMENT_SIZE..]);
        Self::new_uncompressed(&xb, &yb)
    }

    /// Add two points (group law)
    pub fn add(&self, other: &Self) -> Self {
        // Identity element contract: P + O = O + P = P
        if self.is_identity() {
            return other.clone();
        }
        if other.is_identity() {
            return self.clone();
        }

        let doubling = self.x == other.x && self.y == other.y;

        // Additive inverses cancel: same x, different y ⇒ infinity
        if self.x == other.x && !doubling {
            return Self::identity();
        }

        // Doubling a point on the x-axis also lands at infinity
        if doubling && self.y.is_zero() {
            return Self::identity();
        }

        // λ = (3x² + a) / (2y) when doubling, (y₂ − y₁) / (x₂ − x₁) otherwise
        let lambda = if doubling {
            let x_sq = self.x.square();
            let numer = x_sq
                .add(&x_sq)
                .add(&x_sq)
                .add(&FieldElement(FieldElement::A_LIMBS));
            let denom = self.y.add(&self.y);
            let denom_inv = denom.invert().expect("2y ≠ 0 for y ≠ 0");
            numer.mul(&denom_inv)
        } else {
            let numer = other.y.sub(&self.y);
            let denom = other.x.sub(&self.x);
            let denom_inv = denom.invert().expect("x₂ ≠ x₁ in the chord case");
            numer.mul(&denom_inv)
        };

        // x₃ = λ² − x₁ − x₂ ; y₃ = λ·(x₁ − x₃) − y₁
        let x3 = lambda.square().sub(&self.x).sub(&other.x);
        let y3 = lambda.mul(&self.x.sub(&x3)).sub(&self.y);

        Point {
            is_identity: Choice::from(0),
            x: x3,
            y: y3,
        }
    }

    /// Double this point: 2P
    pub fn double(&self) -> Self {
        self.add(self)
    }

    /// Negate this point: (x, −y)
    pub fn negate(&self) -> Self {
        if self.is_identity() {
            return self.clone();
        }
        Point {
            is_identity: Choice::from(0),
            x: self.x.clone(),
            y: self.y.negate(),
        }
    }

    /// Scalar multiplication: P * scalar
    ///
    /// Double-and-add over the bits of the scalar, least significant
    /// first: the accumulator collects the base on set bits and the base
    /// is doubled each step.
    pub fn mul(&self, scalar: &Scalar) -> Result<Self> {
        if scalar.is_zero() {
            return Ok(Self::identity());
        }
        let bytes = scalar.serialize(); // big-endian
        let msb = bytes
            .iter()
            .position(|&b| b != 0)
            .expect("non-zero scalar has a set byte");

        let mut result = Self::identity();
        let mut addend = self.clone();
        // Walk the bytes from the least significant end, stopping after
        // the most significant non-zero byte.
        for &byte in bytes[msb..].iter().rev() {
            for i in 0..8 {
                if (byte >> i) & 1 == 1 {
                    result = result.add(&addend);
                }
                addend = addend.double();
            }
        }
        Ok(result)
    }

    /// Check that (x, y) satisfies y² = x³ + ax + b
    pub(crate) fn is_on_curve(x: &FieldElement, y: &FieldElement) -> bool {
        let y2 = y.square();
        let x2 = x.square();
        let x3 = x2.mul(x);
        let a = FieldElement(FieldElement::A_LIMBS);
        let b_coeff = FieldElement(FieldElement::B_LIMBS);
        let rhs = x3.add(&a.mul(x)).add(&b_coeff);
        y2 == rhs
    }
}
