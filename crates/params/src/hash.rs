//! Constants for the SM3 hash function

/// Size of the SM3 digest in bytes (256 bits)
pub const SM3_OUTPUT_SIZE: usize = 32;

/// Size of an SM3 message block in bytes (512 bits)
pub const SM3_BLOCK_SIZE: usize = 64;
