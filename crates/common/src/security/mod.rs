//! Security primitives and memory safety utilities
//!
//! This module provides foundational security types and patterns used throughout
//! the gmcrypt ecosystem to ensure proper handling of sensitive cryptographic material.

pub mod memory;
pub mod secret;

// Re-export core security types
pub use secret::{EphemeralSecret, SecretBuffer, SecureZeroingType, ZeroizeGuard};

// Re-export memory safety traits and utilities
pub use memory::SecureCompare;

// Re-export memory barrier utilities
pub use memory::barrier;
