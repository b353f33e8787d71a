//! SM2 curve test vectors and unit tests

use super::*;
use gmcrypt_params::sm2::SM2_P256V1;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

fn fe(hex_str: &str) -> FieldElement {
    let bytes: [u8; SM2_FIELD_ELEMENT_SIZE] = hex::decode(hex_str)
        .expect("valid hex")
        .try_into()
        .expect("32 bytes");
    FieldElement::from_bytes(&bytes).expect("canonical field element")
}

/// Test vectors for SM2 field arithmetic
mod field_tests {
    use super::*;

    #[test]
    fn test_field_zero_one() {
        let zero = FieldElement::zero();
        let one = FieldElement::one();

        assert!(zero.is_zero());
        assert!(!one.is_zero());

        // Test that zero + one = one
        let sum = zero.add(&one);
        assert_eq!(sum, one);

        // Test that one - one = zero
        let diff = one.sub(&one);
        assert_eq!(diff, zero);
    }

    #[test]
    fn test_field_addition_commutativity() {
        let a = fe("123456789abcdef011223344556677889aabbccddeeff00fedcba98765432100");

        let b = fe("0fedcba98765432101122334455667788990011223344556677889900aabbccd");

        let sum_ab = a.add(&b);
        let sum_ba = b.add(&a);
        assert_eq!(sum_ab, sum_ba);
    }

    #[test]
    fn test_field_multiplication() {
        let one = FieldElement::one();
        let two = FieldElement::from_u32(2);

        // Test that 1 * 2 = 2
        let product = one.mul(&two);
        assert_eq!(product, two);

        // Test that 2 * 2 = 4
        let four = two.mul(&two);
        assert_eq!(four, FieldElement::from_u32(4));
    }

    #[test]
    fn test_field_mul_wraps_modulus() {
        // (p − 1)² = p² − 2p + 1 ≡ 1 (mod p)
        let p_minus_1 = fe("fffffffefffffffffffffffffffffffffffffffF00000000fffffffffffffffe");
        assert_eq!(p_minus_1.mul(&p_minus_1), FieldElement::one());
    }

    #[test]
    fn test_field_squaring() {
        let x = fe("123456789abcdef011223344556677889aabbccddeeff00fedcba98765432100");

        let square1 = x.square();
        let square2 = x.mul(&x);
        assert_eq!(square1, square2);
    }

    #[test]
    fn test_field_inversion() {
        let x = fe("123456789abcdef011223344556677889aabbccddeeff00fedcba98765432100");
        let x_inv = x.invert().unwrap();

        // Test that x * x^(-1) = 1
        let product = x.mul(&x_inv);
        let one = FieldElement::one();
        assert_eq!(product, one);
    }

    #[test]
    fn test_field_inversion_zero_fails() {
        let zero = FieldElement::zero();
        assert!(zero.invert().is_err());
    }

    #[test]
    fn test_field_negate() {
        let x = fe("123456789abcdef011223344556677889aabbccddeeff00fedcba98765432100");
        let sum = x.add(&x.negate());
        assert!(sum.is_zero());
        assert!(FieldElement::zero().negate().is_zero());
    }

    #[test]
    fn test_field_serialization() {
        let original = "123456789abcdef011223344556677889aabbccddeeff00fedcba98765432100";
        let element = fe(original);
        assert_eq!(hex::encode(element.to_bytes()), original);
    }

    #[test]
    fn test_field_modulus_rejection() {
        // Test that values >= p are rejected
        let p_bytes = SM2_P256V1.p;
        assert!(FieldElement::from_bytes(&p_bytes).is_err());

        let ff_bytes = [0xFFu8; SM2_FIELD_ELEMENT_SIZE];
        assert!(FieldElement::from_bytes(&ff_bytes).is_err());

        // Test that p-1 is accepted
        let mut p_minus_1 = SM2_P256V1.p;
        p_minus_1[SM2_FIELD_ELEMENT_SIZE - 1] = 0xFE;
        assert!(FieldElement::from_bytes(&p_minus_1).is_ok());
    }

    #[test]
    fn test_field_distributivity() {
        let mut rng = ChaCha20Rng::from_seed([3u8; 32]);
        for _ in 0..20 {
            let mut a_bytes = [0u8; SM2_FIELD_ELEMENT_SIZE];
            let mut b_bytes = [0u8; SM2_FIELD_ELEMENT_SIZE];
            let mut c_bytes = [0u8; SM2_FIELD_ELEMENT_SIZE];

            rng.fill_bytes(&mut a_bytes);
            rng.fill_bytes(&mut b_bytes);
            rng.fill_bytes(&mut c_bytes);

            if let (Ok(a), Ok(b), Ok(c)) = (
                FieldElement::from_bytes(&a_bytes),
                FieldElement::from_bytes(&b_bytes),
                FieldElement::from_bytes(&c_bytes),
            ) {
                // a * (b + c) = a * b + a * c
                let left = a.mul(&b.add(&c));
                let right = a.mul(&b).add(&a.mul(&c));
                assert_eq!(left, right);

                // (a + b) + c = a + (b + c)
                assert_eq!(a.add(&b).add(&c), a.add(&b.add(&c)));
            }
        }
    }
}

/// Test vectors for SM2 point operations
mod point_tests {
    use super::*;

    #[test]
    fn test_base_point() {
        let g = base_point_g();
        assert!(!g.is_identity());

        // Verify that the base point satisfies the curve equation
        let x_bytes = g.x_coordinate_bytes();
        let y_bytes = g.y_coordinate_bytes();
        let recreated = Point::new_uncompressed(&x_bytes, &y_bytes).unwrap();
        assert_eq!(g, recreated);

        assert_eq!(x_bytes, SM2_P256V1.g_x);
        assert_eq!(y_bytes, SM2_P256V1.g_y);
    }

    #[test]
    fn test_point_identity() {
        let identity = Point::identity();
        assert!(identity.is_identity());

        let g = base_point_g();

        // Test that G + O = G
        let sum = g.add(&identity);
        assert_eq!(sum, g);

        // Test that O + G = G
        let sum2 = identity.add(&g);
        assert_eq!(sum2, g);
    }

    #[test]
    fn test_point_inverse_cancellation() {
        let g = base_point_g();
        let neg_g = g.negate();

        // G + (−G) = O
        let sum = g.add(&neg_g);
        assert!(sum.is_identity());
    }

    #[test]
    fn test_point_doubling() {
        let g = base_point_g();

        // Test that 2G = G + G
        let double1 = g.double();
        let double2 = g.add(&g);
        assert_eq!(double1, double2);

        // Fixed vector for 2G
        assert_eq!(
            hex::encode(double1.x_coordinate_bytes()),
            "56cefd60d7c87c000d58ef57fa73ba4d9c0dfa08c08a7331495c2e1da3f2bd52"
        );
        assert_eq!(
            hex::encode(double1.y_coordinate_bytes()),
            "31b7e7e6cc8189f668535ce0f8eaf1bd6de84c182f6c8e716f780d3a970a23c3"
        );
    }

    #[test]
    fn test_point_triple_vector() {
        let g = base_point_g();

        // Fixed vector for 3G = 2G + G
        let triple = g.double().add(&g);
        assert_eq!(
            hex::encode(triple.x_coordinate_bytes()),
            "a97f7cd4b3c993b4be2daa8cdb41e24ca13f6bd945302244e26918f1d0509ebf"
        );
        assert_eq!(
            hex::encode(triple.y_coordinate_bytes()),
            "530b5dd88c688ef5ccc5cec08a72150f7c400ee5cd045292aaacdd037458f6e6"
        );
    }

    #[test]
    fn test_point_addition_commutativity() {
        let g = base_point_g();
        let g2 = g.double();

        // Test that G + 2G = 2G + G
        let sum1 = g.add(&g2);
        let sum2 = g2.add(&g);
        assert_eq!(sum1, sum2);
    }

    #[test]
    fn test_point_scalar_multiplication() {
        let g = base_point_g();

        // Create a small scalar
        let mut scalar_bytes = [0u8; SM2_SCALAR_SIZE];
        scalar_bytes[SM2_SCALAR_SIZE - 1] = 3; // scalar = 3
        let scalar = Scalar::new(scalar_bytes).unwrap();

        // Test that 3G = G + G + G
        let result1 = g.mul(&scalar).unwrap();
        let result2 = g.add(&g).add(&g);
        assert_eq!(result1, result2);
    }

    #[test]
    fn test_point_uncompressed_serialization() {
        let g = base_point_g();

        // Test round-trip serialization
        let serialized = g.serialize_uncompressed();
        assert_eq!(serialized[0], 0x04);
        let deserialized = Point::deserialize_uncompressed(&serialized).unwrap();
        assert_eq!(g, deserialized);
    }

    #[test]
    fn test_point_identity_serialization() {
        let identity = Point::identity();

        let uncompressed = identity.serialize_uncompressed();
        assert!(uncompressed.iter().all(|&b| b == 0));
        let deserialized = Point::deserialize_uncompressed(&uncompressed).unwrap();
        assert_eq!(identity, deserialized);
    }

    #[test]
    fn test_point_invalid_coordinates() {
        // Coordinates that don't satisfy the curve equation
        let invalid_x = [0x12; SM2_FIELD_ELEMENT_SIZE];
        let invalid_y = [0x34; SM2_FIELD_ELEMENT_SIZE];

        assert!(Point::new_uncompressed(&invalid_x, &invalid_y).is_err());
    }

    #[test]
    fn test_point_malformed_encodings() {
        let too_short = vec![0u8; 10];
        let too_long = vec![0u8; 100];
        assert!(Point::deserialize_uncompressed(&too_short).is_err());
        assert!(Point::deserialize_uncompressed(&too_long).is_err());

        let mut bad_prefix = base_point_g().serialize_uncompressed();
        bad_prefix[0] = 0x05;
        assert!(Point::deserialize_uncompressed(&bad_prefix).is_err());
    }
}

/// Test vectors for SM2 scalar operations
mod scalar_tests {
    use super::*;

    #[test]
    fn test_scalar_creation() {
        let scalar_bytes: [u8; SM2_SCALAR_SIZE] =
            hex::decode("123456789abcdef011223344556677889aabbccddeeff00fedcba98765432100")
                .unwrap()
                .try_into()
                .unwrap();

        let scalar = Scalar::new(scalar_bytes).unwrap();
        assert!(!scalar.is_zero());

        // Test serialization round-trip
        let serialized = scalar.serialize();
        let deserialized = Scalar::deserialize(&serialized).unwrap();
        assert_eq!(scalar.serialize(), deserialized.serialize());
    }

    #[test]
    fn test_scalar_zero_rejection() {
        let zero_bytes = [0u8; SM2_SCALAR_SIZE];
        assert!(Scalar::new(zero_bytes).is_err());
    }

    #[test]
    fn test_scalar_order_reduction() {
        // A value >= n must be reduced modulo the order
        let large_bytes = [0xFF; SM2_SCALAR_SIZE];
        let scalar = Scalar::new(large_bytes).unwrap();
        assert!(!scalar.is_zero());
        assert_ne!(scalar.serialize(), large_bytes);

        // The order itself reduces to zero and is rejected
        assert!(Scalar::new(SM2_P256V1.n).is_err());
    }

    #[test]
    fn test_scalar_malformed_lengths() {
        assert!(Scalar::deserialize(&[0u8; 10]).is_err());
        assert!(Scalar::deserialize(&[0u8; 64]).is_err());
    }
}

/// Integration tests for high-level SM2 curve operations
mod integration_tests {
    use super::*;

    #[test]
    fn test_keypair_generation() {
        let mut rng = ChaCha20Rng::from_seed([0u8; 32]);

        let (private_key, public_key) = generate_keypair(&mut rng).unwrap();

        // Verify that the public key is not the identity
        assert!(!public_key.is_identity());

        // Verify that private_key * G = public_key
        let computed_public = scalar_mult_base_g(&private_key).unwrap();
        assert_eq!(public_key, computed_public);
    }

    #[test]
    fn test_random_multiples_stay_on_curve() {
        let mut rng = ChaCha20Rng::from_seed([1u8; 32]);

        for _ in 0..4 {
            let mut scalar_bytes = [0u8; SM2_SCALAR_SIZE];
            rng.fill_bytes(&mut scalar_bytes);
            let scalar = Scalar::new(scalar_bytes).unwrap();

            let point = scalar_mult_base_g(&scalar).unwrap();
            assert!(!point.is_identity());

            // Re-validating through the byte constructor checks the curve equation
            let x = point.x_coordinate_bytes();
            let y = point.y_coordinate_bytes();
            assert!(Point::new_uncompressed(&x, &y).is_ok());
        }
    }

    #[test]
    fn test_scalar_multiplication_with_identity() {
        let identity = Point::identity();
        let mut scalar_bytes = [0u8; SM2_SCALAR_SIZE];
        scalar_bytes[SM2_SCALAR_SIZE - 1] = 5; // scalar = 5
        let scalar = Scalar::new(scalar_bytes).unwrap();

        let result = scalar_mult(&scalar, &identity).unwrap();
        assert_eq!(result, identity);
    }

    #[test]
    fn test_known_scalar_multiplication_is_deterministic() {
        let mut rng = ChaCha20Rng::from_seed([42u8; 32]);
        let mut scalar_bytes = [0u8; SM2_SCALAR_SIZE];
        rng.fill_bytes(&mut scalar_bytes);

        let scalar = Scalar::new(scalar_bytes).unwrap();
        let result1 = scalar_mult_base_g(&scalar).unwrap();
        let result2 = scalar_mult_base_g(&scalar).unwrap();

        assert_eq!(result1, result2);
    }

    #[test]
    fn test_scalar_mul_associativity_with_small_factors() {
        // (2 * 3) * G = 2 * (3 * G)
        let g = base_point_g();

        let mut six = [0u8; SM2_SCALAR_SIZE];
        six[SM2_SCALAR_SIZE - 1] = 6;
        let mut two = [0u8; SM2_SCALAR_SIZE];
        two[SM2_SCALAR_SIZE - 1] = 2;
        let mut three = [0u8; SM2_SCALAR_SIZE];
        three[SM2_SCALAR_SIZE - 1] = 3;

        let lhs = g.mul(&Scalar::new(six).unwrap()).unwrap();
        let g3 = g.mul(&Scalar::new(three).unwrap()).unwrap();
        let rhs = g3.mul(&Scalar::new(two).unwrap()).unwrap();
        assert_eq!(lhs, rhs);
    }
}
