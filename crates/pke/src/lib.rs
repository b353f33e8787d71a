//! Public Key Encryption schemes for the gmcrypt library
//!
//! This crate implements the SM2 public-key encryption protocol on top of
//! the primitives in `gmcrypt-algorithms`.

pub mod error;
pub mod sm2;

pub use error::{Error, Result};
pub use sm2::{Sm2, Sm2PublicKey, Sm2SecretKey};
