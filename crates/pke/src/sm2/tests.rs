//! SM2 encryption scheme tests

use super::*;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

/// Test RNG that hands out a fixed 32-byte pattern, for driving the
/// rejection-sampling key generation to a chosen scalar.
struct FixedRng([u8; 32]);

impl RngCore for FixedRng {
    fn next_u32(&mut self) -> u32 {
        let mut buf = [0u8; 4];
        self.fill_bytes(&mut buf);
        u32::from_le_bytes(buf)
    }

    fn next_u64(&mut self) -> u64 {
        let mut buf = [0u8; 8];
        self.fill_bytes(&mut buf);
        u64::from_le_bytes(buf)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for (i, d) in dest.iter_mut().enumerate() {
            *d = self.0[i % 32];
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl CryptoRng for FixedRng {}

fn fixed_rng(hex_seed: &str) -> FixedRng {
    let seed: [u8; 32] = hex::decode(hex_seed).unwrap().try_into().unwrap();
    FixedRng(seed)
}

#[test]
fn test_encrypt_decrypt_round_trip() {
    let mut rng = ChaCha20Rng::from_seed([7u8; 32]);
    let (pk, sk) = Sm2::keypair(&mut rng).unwrap();

    let plaintext = b"SM2 test message";
    let ciphertext = Sm2::encrypt(&pk, plaintext, &mut rng).unwrap();

    assert_eq!(ciphertext.len(), SM2_C1_SIZE + plaintext.len() + SM2_C3_SIZE);

    let recovered = Sm2::decrypt(&sk, &ciphertext).unwrap();
    assert_eq!(recovered, plaintext);
}

#[test]
fn test_ciphertexts_are_randomized() {
    let mut rng = ChaCha20Rng::from_seed([8u8; 32]);
    let (pk, _) = Sm2::keypair(&mut rng).unwrap();

    let c1 = Sm2::encrypt(&pk, b"same message", &mut rng).unwrap();
    let c2 = Sm2::encrypt(&pk, b"same message", &mut rng).unwrap();
    assert_ne!(c1, c2);
}

#[test]
fn test_known_answer_standard_example() {
    // The worked example from the standard: fixed private key dB and
    // fixed ephemeral scalar k, message "encryption standard".
    let mut key_rng =
        fixed_rng("3945208f7b2144b13f36e38ac6d39f95889393692860b51a42fb81ef4df7c5b8");
    let (pk, sk) = Sm2::keypair(&mut key_rng).unwrap();

    assert_eq!(
        hex::encode(&pk.as_ref()[1..]),
        "09f9df311e5421a150dd7d161e4bc5c672179fad1833fc076bb08ff356f35020\
         ccea490ce26775a52dc6ea718cc1aa600aed05fbf35e084a6632f6072da9ad13"
    );

    let mut eph_rng =
        fixed_rng("59276e27d506861a16680f3ad9c02dccef3cc1fa3cdbe4ce6d54b80deac1bc21");
    let ciphertext = Sm2::encrypt(&pk, b"encryption standard", &mut eph_rng).unwrap();

    assert_eq!(
        hex::encode(&ciphertext),
        "04ebfc718e8d1798620432268e77feb6415e2ede0e073c0f4f640ecd2e149a73\
         e858f9d81e5430a57b36daab8f950a3c64e6ee6a63094d99283aff767e124df0\
         21886ca989ca9c7d58087307ca93092d651efa\
         59983c18f809e262923c53aec295d30383b54e39d609d160afcb1908d0bd8766"
    );

    let recovered = Sm2::decrypt(&sk, &ciphertext).unwrap();
    assert_eq!(recovered, b"encryption standard");
}

#[test]
fn test_end_to_end_repeated() {
    // One key pair, one hundred encryptions with fresh ephemeral scalars
    let mut rng = ChaCha20Rng::from_seed([9u8; 32]);
    let (pk, sk) = Sm2::keypair(&mut rng).unwrap();

    let plaintext = b"SM2 test message";
    for _ in 0..100 {
        let ciphertext = Sm2::encrypt(&pk, plaintext, &mut rng).unwrap();
        let recovered = Sm2::decrypt(&sk, &ciphertext).unwrap();
        assert_eq!(recovered, plaintext);
    }
}

#[test]
fn test_tampered_c2_or_c3_fails_integrity_check() {
    let mut rng = ChaCha20Rng::from_seed([10u8; 32]);
    let (pk, sk) = Sm2::keypair(&mut rng).unwrap();

    let ciphertext = Sm2::encrypt(&pk, b"ab", &mut rng).unwrap();

    // Every bit of C2
    for byte_idx in SM2_C1_SIZE..SM2_C1_SIZE + 2 {
        for bit in 0..8 {
            let mut tampered = ciphertext.clone();
            tampered[byte_idx] ^= 1 << bit;
            let err = Sm2::decrypt(&sk, &tampered).unwrap_err();
            assert!(
                matches!(err, ApiError::DecryptionFailed { .. }),
                "C2 byte {} bit {}: {:?}",
                byte_idx,
                bit,
                err
            );
        }
    }

    // One bit per byte of C3, varying the bit position
    let c3_start = ciphertext.len() - SM2_C3_SIZE;
    for (i, byte_idx) in (c3_start..ciphertext.len()).enumerate() {
        let mut tampered = ciphertext.clone();
        tampered[byte_idx] ^= 1 << (i % 8);
        let err = Sm2::decrypt(&sk, &tampered).unwrap_err();
        assert!(
            matches!(err, ApiError::DecryptionFailed { .. }),
            "C3 byte {}: {:?}",
            byte_idx,
            err
        );
    }
}

#[test]
fn test_tampered_c1_fails() {
    let mut rng = ChaCha20Rng::from_seed([11u8; 32]);
    let (pk, sk) = Sm2::keypair(&mut rng).unwrap();

    let ciphertext = Sm2::encrypt(&pk, b"ab", &mut rng).unwrap();

    // Flipping C1 bits yields either an off-curve point or a tag mismatch
    for byte_idx in [0usize, 13, 31, 32, 47, 63] {
        let mut tampered = ciphertext.clone();
        tampered[byte_idx] ^= 0x01;
        let err = Sm2::decrypt(&sk, &tampered).unwrap_err();
        assert!(
            matches!(
                err,
                ApiError::InvalidCiphertext { .. } | ApiError::DecryptionFailed { .. }
            ),
            "C1 byte {}: {:?}",
            byte_idx,
            err
        );
    }
}

#[test]
fn test_decrypt_with_wrong_key_fails() {
    let mut rng = ChaCha20Rng::from_seed([12u8; 32]);
    let (pk, _) = Sm2::keypair(&mut rng).unwrap();
    let (_, other_sk) = Sm2::keypair(&mut rng).unwrap();

    let ciphertext = Sm2::encrypt(&pk, b"for someone else", &mut rng).unwrap();
    let err = Sm2::decrypt(&other_sk, &ciphertext).unwrap_err();
    assert!(matches!(err, ApiError::DecryptionFailed { .. }));
}

#[test]
fn test_undersized_ciphertext_rejected() {
    let mut rng = ChaCha20Rng::from_seed([13u8; 32]);
    let (_, sk) = Sm2::keypair(&mut rng).unwrap();

    for len in [0usize, 1, 64, 95, 96] {
        let ciphertext = vec![0u8; len];
        assert!(Sm2::decrypt(&sk, &ciphertext).is_err(), "length {}", len);
    }
}

#[test]
fn test_empty_plaintext_rejected() {
    let mut rng = ChaCha20Rng::from_seed([14u8; 32]);
    let (pk, _) = Sm2::keypair(&mut rng).unwrap();

    let err = Sm2::encrypt(&pk, b"", &mut rng).unwrap_err();
    assert!(matches!(err, ApiError::InvalidParameter { .. }));
}

#[test]
fn test_identity_public_key_rejected() {
    let mut rng = ChaCha20Rng::from_seed([15u8; 32]);

    let identity_pk = Sm2PublicKey([0u8; ec::SM2_POINT_UNCOMPRESSED_SIZE]);
    let err = Sm2::encrypt(&identity_pk, b"message", &mut rng).unwrap_err();
    assert!(matches!(err, ApiError::InvalidKey { .. }));
}

#[test]
fn test_single_byte_and_long_messages() {
    let mut rng = ChaCha20Rng::from_seed([16u8; 32]);
    let (pk, sk) = Sm2::keypair(&mut rng).unwrap();

    // One byte, one full KDF block, and a multi-block message
    for len in [1usize, 32, 100] {
        let plaintext: Vec<u8> = (0..len).map(|i| (i * 7 + 3) as u8).collect();
        let ciphertext = Sm2::encrypt(&pk, &plaintext, &mut rng).unwrap();
        assert_eq!(ciphertext.len(), SM2_C1_SIZE + len + SM2_C3_SIZE);
        assert_eq!(Sm2::decrypt(&sk, &ciphertext).unwrap(), plaintext);
    }
}
