//! Cryptographic primitives for the gmcrypt library
//!
//! This crate implements the primitives behind the SM2 public-key
//! encryption scheme: arithmetic on the recommended sm2p256v1 curve, the
//! SM3 hash function and the SM3-based counter-mode key derivation
//! function. The library implements security patterns to protect
//! sensitive cryptographic material, including:
//!
//! - Secure memory handling with automatic zeroization
//! - Constant-time comparison operations
//! - Memory barrier utilities
//!
//! The big-integer arithmetic itself is written for clarity and
//! correctness, not constant-time execution.

#![forbid(unsafe_code)]

// Error module and re-exports
pub mod error;
pub use error::{validate, Error, Result};

// Hash function implementations
pub mod hash;
pub use hash::{HashAlgorithm, HashFunction, Sm3};

// KDF implementations
pub mod kdf;
pub use kdf::{KdfAlgorithm, KeyDerivationFunction, Sm3Kdf};

// Elliptic curve primitives
pub mod ec;
pub use ec::{sm2, Sm2Point, Sm2Scalar};

// Type system
pub mod types;
pub use types::Digest;

// Re-export security types from gmcrypt-common
pub use gmcrypt_common::security::{
    barrier, EphemeralSecret, SecretBuffer, SecureCompare, ZeroizeGuard,
};
