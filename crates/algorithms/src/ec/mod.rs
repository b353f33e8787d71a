//! Elliptic Curve Primitives
//!
//! This module implements arithmetic on the recommended SM2 curve
//! (sm2p256v1). The implementation favors clarity over constant-time
//! execution and provides the foundation for the SM2 public-key
//! encryption scheme.

pub mod sm2;

pub use sm2::{Point as Sm2Point, Scalar as Sm2Scalar};
