use super::*;
use hex;

#[test]
fn test_kdf_first_block_is_hash_of_z_and_counter_one() {
    let z = b"shared secret material";

    let derived = Sm3Kdf::derive_bits(z, 256).unwrap();

    let mut preimage = z.to_vec();
    preimage.extend_from_slice(&1u32.to_be_bytes());
    let digest = Sm3::digest(&preimage).unwrap();

    assert_eq!(derived, digest.as_ref());
}

#[test]
fn test_kdf_known_output() {
    let derived = Sm3Kdf::derive_bits(b"test kdf input", 384).unwrap();
    assert_eq!(
        hex::encode(&derived),
        "52ff4fd0133fd07a7c05061f8d705470511699162da99a2dbdc20ce0ebc01bf9c3ce4cd0b24754a239ae42c5ccd74c31"
    );
}

#[test]
fn test_kdf_is_deterministic() {
    let z = [0x5Au8; 64];
    let a = Sm3Kdf::derive_bits(&z, 1000).unwrap();
    let b = Sm3Kdf::derive_bits(&z, 1000).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_kdf_bit_precise_truncation() {
    let z = [0u8; 64];

    // 123 bits = 15 bytes + 3 bits; the low 5 bits of the last byte are cleared
    let derived = Sm3Kdf::derive_bits(&z, 123).unwrap();
    assert_eq!(derived.len(), 16);
    assert_eq!(hex::encode(&derived), "fc7ba982b2f9a11365f757fb5eb65420");
    assert_eq!(derived[15] & 0x1F, 0);

    // a prefix relationship must hold with the untruncated stream
    let full = Sm3Kdf::derive_bits(&z, 256).unwrap();
    assert_eq!(&derived[..15], &full[..15]);
}

#[test]
fn test_kdf_output_lengths() {
    let z = b"z";
    for klen in [1u64, 7, 8, 9, 255, 256, 257, 512, 300] {
        let out = Sm3Kdf::derive_bits(z, klen).unwrap();
        assert_eq!(out.len() as u64, klen.div_ceil(8), "klen {}", klen);
    }
}

#[test]
fn test_kdf_rejects_zero_length() {
    assert!(Sm3Kdf::derive_bits(b"z", 0).is_err());
}

#[test]
fn test_kdf_rejects_counter_overflow() {
    let err = Sm3Kdf::derive_bits(b"z", Sm3Kdf::MAX_OUTPUT_BITS).unwrap_err();
    match err {
        Error::Length { context, .. } => assert_eq!(context, "SM3 KDF output"),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_kdf_trait_interface_matches_derive_bytes() {
    let kdf = <Sm3Kdf as KeyDerivationFunction>::new();
    let via_trait = kdf.derive_key(b"ikm", None, None, 48).unwrap();
    let direct = Sm3Kdf::derive_bytes(b"ikm", 48).unwrap();
    assert_eq!(via_trait, direct);
    assert_eq!(via_trait.len(), 48);
}
