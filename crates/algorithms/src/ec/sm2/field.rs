//! SM2 field arithmetic implementation

use crate::ec::sm2::constants::SM2_FIELD_ELEMENT_SIZE;
use crate::error::{Error, Result};
use subtle::{Choice, ConditionallySelectable};

/// Number of 32-bit limbs for an SM2 field element (8 × 32 = 256 bits)
const NLIMBS: usize = 8;

/// SM2 field element representing values in 𝔽ₚ, where
/// p = 2²⁵⁶ − 2²²⁴ − 2⁹⁶ + 2⁶⁴ − 1.
/// Internally stored as 8 little-endian 32-bit limbs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldElement(pub(crate) [u32; NLIMBS]);

impl FieldElement {
    /// p = 0xFFFFFFFE FFFFFFFF FFFFFFFF FFFFFFFF FFFFFFFF 00000000 FFFFFFFF FFFFFFFF
    /// Stored as eight 32-bit words, little-endian.
    pub(crate) const MOD_LIMBS: [u32; NLIMBS] = [
        0xFFFFFFFF, // least significant
        0xFFFFFFFF, 0x00000000, 0xFFFFFFFF, 0xFFFFFFFF, 0xFFFFFFFF, 0xFFFFFFFF,
        0xFFFFFFFE, // most significant
    ];

    /// Curve coefficient a = p − 3 (the curve uses a = −3)
    pub(crate) const A_LIMBS: [u32; NLIMBS] = [
        0xFFFFFFFC, 0xFFFFFFFF, 0x00000000, 0xFFFFFFFF, 0xFFFFFFFF, 0xFFFFFFFF, 0xFFFFFFFF,
        0xFFFFFFFE,
    ];

    /// Curve coefficient b
    pub(crate) const B_LIMBS: [u32; NLIMBS] = [
        0x4D940E93, 0xDDBCBD41, 0x15AB8F92, 0xF39789F5, 0xCF6509A7, 0x4D5A9E4B, 0x9D9F5E34,
        0x28E9FA9E,
    ];

    /* ================================================================= */
    /*  Tiny helpers                                                     */
    /* ================================================================= */

    /// Build a field element from a small literal (`0 ≤ n < 2³²`)
    #[inline]
    pub fn from_u32(n: u32) -> Self {
        let mut limbs = [0u32; NLIMBS];
        limbs[0] = n;
        FieldElement(limbs)
    }

    /// The additive identity: 0
    #[inline]
    pub fn zero() -> Self {
        FieldElement([0u32; NLIMBS])
    }

    /// The multiplicative identity: 1
    #[inline]
    pub fn one() -> Self {
        let mut limbs = [0u32; NLIMBS];
        limbs[0] = 1;
        FieldElement(limbs)
    }

    /// Create a field element from big-endian bytes.
    /// Validates that the value < p. Returns Err if ≥ p.
    pub fn from_bytes(bytes: &[u8; SM2_FIELD_ELEMENT_SIZE]) -> Result<Self> {
        // Convert big-endian → little-endian limbs
        let mut limbs = [0u32; NLIMBS];
        for (i, limb) in limbs.iter_mut().enumerate() {
            let offset = (NLIMBS - 1 - i) * 4;
            *limb = u32::from_be_bytes([
                bytes[offset],
                bytes[offset + 1],
                bytes[offset + 2],
                bytes[offset + 3],
            ]);
        }
        let (_, borrow) = Self::sbb8(limbs, Self::MOD_LIMBS);
        if borrow == 1 {
            // limbs < p → canonical
            Ok(FieldElement(limbs))
        } else {
            Err(Error::param("FieldElement SM2", "Value ≥ modulus"))
        }
    }

    /// Convert this field element into big-endian bytes.
    pub fn to_bytes(&self) -> [u8; SM2_FIELD_ELEMENT_SIZE] {
        let mut out = [0u8; SM2_FIELD_ELEMENT_SIZE];
        for (i, &limb) in self.0.iter().enumerate() {
            let limb_bytes = limb.to_be_bytes();
            let offset = (NLIMBS - 1 - i) * 4;
            out[offset..offset + 4].copy_from_slice(&limb_bytes);
        }
        out
    }

    /// Check if element is zero
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&w| w == 0)
    }

    /// Addition: (self + other) mod p
    pub fn add(&self, other: &Self) -> Self {
        // 1. Full 256-bit addition
        let (sum, carry) = Self::adc8(self.0, other.0);

        // 2. Reduce if necessary
        // If carry = 1 or sum >= p, subtract p
        let (reduced, borrow) = Self::sbb8(sum, Self::MOD_LIMBS);
        let need_reduce = (carry | (borrow ^ 1)) & 1;

        Self::conditional_select(&sum, &reduced, Choice::from(need_reduce as u8))
    }

    /// Subtraction: (self - other) mod p
    pub fn sub(&self, other: &Self) -> Self {
        let (diff, borrow) = Self::sbb8(self.0, other.0);
        // If borrow == 1, we add p back
        let (diff_plus_p, _) = Self::adc8(diff, Self::MOD_LIMBS);
        Self::conditional_select(&diff, &diff_plus_p, Choice::from(borrow as u8))
    }

    /// Field multiplication: (self * other) mod p
    /// Implements schoolbook 8×8 → 16-limb product, then reduction
    pub fn mul(&self, other: &Self) -> Self {
        // Phase 1: 8×8 → 16 128-bit partial accumulators
        let mut t = [0u128; NLIMBS * 2];
        for i in 0..NLIMBS {
            for j in 0..NLIMBS {
                t[i + j] += (self.0[i] as u128) * (other.0[j] as u128);
            }
        }

        // Phase 2: Carry-propagate into 16 × u32 limbs
        let mut wide = [0u32; NLIMBS * 2];
        let mut carry: u128 = 0;
        for i in 0..(NLIMBS * 2) {
            let v = t[i] + carry;
            wide[i] = (v & 0xFFFF_FFFF) as u32;
            carry = v >> 32;
        }

        // Phase 3: Reduce 16 limbs → 8 limbs mod p
        Self::reduce_wide(wide)
    }

    /// Field squaring: (self²) mod p
    #[inline(always)]
    pub fn square(&self) -> Self {
        self.mul(self)
    }

    /// Compute multiplicative inverse via Fermat: a^(p-2) mod p
    pub fn invert(&self) -> Result<Self> {
        if self.is_zero() {
            return Err(Error::param("FieldElement SM2", "Inverse of zero"));
        }

        // p-2 = FFFFFFFEFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF00000000FFFFFFFFFFFFFFFD
        const P_MINUS_2: [u8; 32] = [
            0xFF, 0xFF, 0xFF, 0xFE, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
            0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x00, 0x00, 0x00, 0x00, 0xFF, 0xFF, 0xFF, 0xFF,
            0xFF, 0xFF, 0xFF, 0xFD,
        ];

        // Binary exponentiation
        let mut result = FieldElement::one();
        let base = self.clone();

        for &byte in P_MINUS_2.iter() {
            for bit in (0..8).rev() {
                result = result.square();
                if (byte >> bit) & 1 == 1 {
                    result = result.mul(&base);
                }
            }
        }

        Ok(result)
    }

    /// Negate this field element: returns p - self if non-zero, else zero
    pub fn negate(&self) -> Self {
        if self.is_zero() {
            self.clone()
        } else {
            FieldElement::zero().sub(self)
        }
    }

    /* ================================================================= */
    /*  Private helper methods                                           */
    /* ================================================================= */

    /// 8-limb addition with carry
    #[inline(always)]
    fn adc8(a: [u32; NLIMBS], b: [u32; NLIMBS]) -> ([u32; NLIMBS], u32) {
        let mut r = [0u32; NLIMBS];
        let mut carry = 0u64;
        for ((&a_limb, &b_limb), r_limb) in a.iter().zip(b.iter()).zip(r.iter_mut()) {
            let tmp = (a_limb as u64) + (b_limb as u64) + carry;
            *r_limb = (tmp & 0xFFFF_FFFF) as u32;
            carry = tmp >> 32;
        }
        (r, carry as u32)
    }

    /// 8-limb subtraction with borrow
    #[inline(always)]
    fn sbb8(a: [u32; NLIMBS], b: [u32; NLIMBS]) -> ([u32; NLIMBS], u32) {
        let mut r = [0u32; NLIMBS];
        let mut borrow = 0u32;

        for ((&a_limb, &b_limb), r_limb) in a.iter().zip(b.iter()).zip(r.iter_mut()) {
            // Compute: a[i] − b[i] − borrow in u64, truncate back to 32 bits
            let ai = a_limb as u64;
            let bi = b_limb as u64;
            let tmp = ai.wrapping_sub(bi + borrow as u64);

            *r_limb = tmp as u32;

            // New borrow = 1 iff ai < bi + old_borrow
            borrow = (ai < bi + borrow as u64) as u32;
        }

        (r, borrow)
    }

    /// Select: if flag == 0 return a else return b
    fn conditional_select(a: &[u32; NLIMBS], b: &[u32; NLIMBS], flag: Choice) -> Self {
        let mut out = [0u32; NLIMBS];
        for ((a_limb, b_limb), out_limb) in a.iter().zip(b.iter()).zip(out.iter_mut()) {
            *out_limb = u32::conditional_select(a_limb, b_limb, flag);
        }
        FieldElement(out)
    }

    /// Reduce a 16-word (512-bit) value modulo
    /// `p = 2²⁵⁶ − 2²²⁴ − 2⁹⁶ + 2⁶⁴ − 1`.
    ///
    /// Repeatedly folds the high half H using
    /// `2²⁵⁶ ≡ 2²²⁴ + 2⁹⁶ − 2⁶⁴ + 1 (mod p)`; all shift amounts are
    /// word-aligned (7, 3, 2 and 0 limbs). Signed accumulators absorb the
    /// negative term, and each pass ends with a carry normalization. The
    /// fold converges in at most nine passes, after which the value fits
    /// in 8 limbs and at most two subtractions of p canonicalize it.
    fn reduce_wide(t: [u32; NLIMBS * 2]) -> FieldElement {
        let mut acc = [0i128; NLIMBS * 2];
        for (a, &w) in acc.iter_mut().zip(t.iter()) {
            *a = w as i128;
        }

        while acc[NLIMBS..].iter().any(|&w| w != 0) {
            let mut high = [0i128; NLIMBS];
            high.copy_from_slice(&acc[NLIMBS..]);
            for w in &mut acc[NLIMBS..] {
                *w = 0;
            }

            for (j, &h) in high.iter().enumerate() {
                acc[j + 7] += h; // + H·2²²⁴
                acc[j + 3] += h; // + H·2⁹⁶
                acc[j] += h; // + H
                acc[j + 2] -= h; // − H·2⁶⁴
            }

            // Signed carry propagation over all 16 limbs
            let mut carry: i128 = 0;
            for w in acc.iter_mut() {
                let v = *w + carry;
                *w = v & 0xFFFF_FFFF;
                carry = v >> 32;
            }
            debug_assert_eq!(carry, 0);
        }

        let mut out = [0u32; NLIMBS];
        for (o, &w) in out.iter_mut().zip(acc.iter()) {
            *o = w as u32;
        }

        // At most two conditional subtractions of p
        for _ in 0..2 {
            let (sub, borrow) = Self::sbb8(out, Self::MOD_LIMBS);
            /* if borrow == 0 → out ≥ p → use the subtracted value */
            let selected = Self::conditional_select(&out, &sub, Choice::from((borrow ^ 1) as u8));
            out = selected.0;
        }

        FieldElement(out)
    }
}
