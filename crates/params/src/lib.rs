//! Standard constants for the gmcrypt library
//!
//! This crate holds the fixed parameters of the algorithms implemented by
//! gmcrypt: the recommended sm2p256v1 elliptic curve and the SM3 hash
//! function. Everything here is a `const`; nothing is ever mutated.

pub mod hash;
pub mod sm2;

pub use hash::{SM3_BLOCK_SIZE, SM3_OUTPUT_SIZE};
pub use sm2::{Sm2Params, SM2_P256V1};
