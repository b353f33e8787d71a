//! # gmcrypt
//!
//! A pure Rust implementation of the SM2 public-key encryption scheme and
//! the SM3 cryptographic hash function (GB/T 32918 / GB/T 32905).
//!
//! ## Usage
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! gmcrypt = "0.1"
//! ```
//!
//! ## Crate Structure
//!
//! This is a facade crate that re-exports functionality from several sub-crates:
//!
//! - [`gmcrypt-algorithms`]: Core primitives (SM2 curve arithmetic, SM3, KDF)
//! - [`gmcrypt-pke`]: The SM2 public-key encryption scheme
//! - [`gmcrypt-api`]: Public traits and error types
//! - [`gmcrypt-common`]: Secure-memory utilities
//! - [`gmcrypt-params`]: Standard curve and hash constants

// Core re-exports (always available)
pub use gmcrypt_api as api;
pub use gmcrypt_common as common;
pub use gmcrypt_params as params;

pub use gmcrypt_algorithms as algorithms;
pub use gmcrypt_pke as pke;

/// Common imports for gmcrypt users
pub mod prelude {
    // Re-export error types
    pub use crate::api::{Error, Result};

    // Re-export core traits
    pub use crate::api::Pke;
    pub use crate::algorithms::hash::HashFunction;
    pub use crate::algorithms::kdf::KeyDerivationFunction;

    // Re-export the scheme and its primitives
    pub use crate::algorithms::hash::sm3::Sm3;
    pub use crate::algorithms::kdf::sm3kdf::Sm3Kdf;
    pub use crate::pke::sm2::{Sm2, Sm2PublicKey, Sm2SecretKey};

    // Re-export security types
    pub use crate::common::{EphemeralSecret, SecretBuffer, ZeroizeGuard};
}
